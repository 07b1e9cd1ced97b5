//! # printquote
//!
//! Turns an uploaded STL mesh into a deterministic 3D-printing quote.
//!
//! The pipeline has three stages:
//!
//! - **Decoding**: binary or ASCII STL bytes become a lazy stream of
//!   triangles ([`parser`], [`streaming`])
//! - **Measurement**: one pass over the triangles yields volume, surface
//!   area, bounding box and a watertightness heuristic ([`mesh_ops`])
//! - **Quoting**: the volume, a material's pricing profile and the
//!   customer's print configuration become a cost breakdown with print
//!   time and delivery estimates ([`pricing`], [`estimate`], [`quote`])
//!
//! Fee tables and rates are injected through [`QuoteConfig`].
//!
//! ## Features
//!
//! - Pure Rust implementation with no unsafe code
//! - Streaming analysis; the triangle list is never materialised
//! - Malformed uploads produce an analysis flagged with errors instead of a
//!   hard failure
//! - Structured logging through `tracing`
//!
//! ## Example
//!
//! ```
//! use printquote::{
//!     MaterialPricing, MaterialProfile, PrintConfiguration, QuoteAssembler, analyze_mesh,
//! };
//!
//! let stl = b"solid tetra
//! facet normal 0 0 0
//!  outer loop
//!   vertex 10 0 0
//!   vertex 0 10 0
//!   vertex 0 0 10
//!  endloop
//! endfacet
//! facet normal 0 0 0
//!  outer loop
//!   vertex 0 0 0
//!   vertex 0 10 0
//!   vertex 10 0 0
//!  endloop
//! endfacet
//! facet normal 0 0 0
//!  outer loop
//!   vertex 0 0 0
//!   vertex 10 0 0
//!   vertex 0 0 10
//!  endloop
//! endfacet
//! facet normal 0 0 0
//!  outer loop
//!   vertex 0 0 0
//!   vertex 0 0 10
//!   vertex 0 10 0
//!  endloop
//! endfacet
//! endsolid tetra
//! ";
//!
//! let analysis = analyze_mesh(stl);
//! assert!(!analysis.has_errors);
//! assert_eq!(analysis.triangle_count, 4);
//! assert_eq!(analysis.volume_cm3, 0.17);
//! assert!(analysis.is_watertight);
//!
//! let material = MaterialProfile::new("pla", MaterialPricing::new(0.5, 10.0, 25.0))
//!     .with_color("white");
//! let request = PrintConfiguration::new("white").with_quantity(2);
//!
//! let quote = QuoteAssembler::default().assemble_from_analysis(&analysis, &material, &request)?;
//! assert_eq!(quote.pricing.total, 25.0);
//! # Ok::<(), printquote::Error>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod estimate;
pub mod mesh_ops;
pub mod model;
pub mod parser;
pub mod pricing;
pub mod quote;
pub mod streaming;
pub mod validator;

pub use config::{ConfigurationBounds, DiscountTier, QuoteConfig, RateTable, UnknownTagPolicy};
pub use error::{Error, Result};
pub use estimate::{estimate_delivery, estimate_time};
pub use mesh_ops::{MeshAccumulator, analyze_mesh, analyze_reader, analyze_upload};
pub use model::{
    BoundingBox, MaterialPricing, MaterialProfile, MaterialProperties, MeshAnalysis,
    PricingBreakdown, PrintConfiguration, Quote, Triangle, Vertex,
};
pub use parser::{FileFormat, StlFormat, StlSource};
pub use pricing::{PricingEngine, price_quote};
pub use quote::QuoteAssembler;
