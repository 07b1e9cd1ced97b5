//! Error types for mesh analysis and quoting
//!
//! All errors carry an error code so callers (and the people reading their
//! logs) can categorise a failure without matching on message text.
//!
//! # Error Codes
//!
//! Error codes follow the pattern: `E<category><number>`
//!
//! Categories:
//! - **E1xxx**: Mesh input errors (reading and decoding STL data)
//! - **E2xxx**: Print request validation errors
//! - **E3xxx**: Pricing errors
//! - **E4xxx**: Quote configuration errors
//!
//! ## Common Error Codes
//!
//! - `E1001`: I/O error reading mesh data
//! - `E1002`: Truncated or size-mismatched binary STL
//! - `E1003`: Unparseable ASCII STL vertex
//! - `E1004`: Non-finite vertex coordinate
//! - `E2001`: Print configuration field out of bounds
//! - `E2002`: Color not offered by the material
//! - `E3001`: Unknown post-processing tag
//! - `E3002`: Invalid volume passed to pricing
//! - `E4001`: Invalid quote configuration
//! - `E4002`: Quote configuration JSON error

use std::io;
use thiserror::Error;

/// Result type for printquote operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while analysing meshes or building quotes
#[derive(Error, Debug)]
pub enum Error {
    /// IO error occurred while reading mesh data
    ///
    /// **Error Code**: E1001
    #[error("[E1001] I/O error: {0}")]
    Io(#[from] io::Error),

    /// Binary STL buffer is shorter than its header or declared triangle count
    ///
    /// **Error Code**: E1002
    ///
    /// **Common Causes**:
    /// - Upload interrupted before the whole file arrived
    /// - A non-STL file uploaded with an `.stl` extension
    /// - Corrupted triangle count in the header
    ///
    /// **Suggestions**:
    /// - Re-export the model from the CAD tool
    /// - Check the upload size limit of the front end
    #[error("[E1002] Malformed STL: {0}")]
    MalformedInput(String),

    /// ASCII STL vertex line could not be parsed
    ///
    /// **Error Code**: E1003
    ///
    /// **Common Causes**:
    /// - Locale-formatted numbers (e.g. "1,5" instead of "1.5")
    /// - Missing coordinates on a `vertex` line
    #[error("[E1003] Parse error: {0}")]
    ParseError(String),

    /// A vertex coordinate is NaN or infinite
    ///
    /// **Error Code**: E1004
    #[error("[E1004] Non-finite geometry: {0}")]
    NonFiniteGeometry(String),

    /// Print configuration field outside its permitted range
    ///
    /// **Error Code**: E2001
    #[error("[E2001] Invalid print configuration: {0}")]
    Validation(String),

    /// Requested color is not offered by the material
    ///
    /// **Error Code**: E2002
    #[error("[E2002] Color '{color}' is not available for material '{material}'")]
    UnsupportedColor {
        /// The requested color
        color: String,
        /// Identifier of the material that was asked for
        material: String,
    },

    /// Post-processing tag has no fee in the configured table
    ///
    /// **Error Code**: E3001
    ///
    /// Only raised when the configuration uses [`UnknownTagPolicy::Reject`].
    ///
    /// [`UnknownTagPolicy::Reject`]: crate::config::UnknownTagPolicy::Reject
    #[error("[E3001] Unknown post-processing option: {0}")]
    UnknownPostProcessing(String),

    /// Volume is negative, NaN or infinite
    ///
    /// **Error Code**: E3002
    #[error("[E3002] Invalid volume: {0}")]
    InvalidVolume(String),

    /// Quote configuration is internally inconsistent
    ///
    /// **Error Code**: E4001
    #[error("[E4001] Invalid quote configuration: {0}")]
    Config(String),

    /// Quote configuration could not be deserialized
    ///
    /// **Error Code**: E4002
    #[error("[E4002] Quote configuration JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a MalformedInput error for a buffer that is too short
    ///
    /// # Arguments
    /// * `what` - What the buffer was expected to contain (e.g., "header")
    /// * `expected` - Minimum number of bytes required
    /// * `actual` - Number of bytes available
    pub fn truncated(what: &str, expected: usize, actual: usize) -> Self {
        Error::MalformedInput(format!(
            "buffer too short for {}: expected at least {} bytes, got {}",
            what, expected, actual
        ))
    }

    /// Create a ParseError pointing at a line of ASCII STL text
    ///
    /// # Arguments
    /// * `line` - 1-based line number
    /// * `field_name` - The field being parsed (e.g., "vertex y coordinate")
    /// * `value` - The token that failed to parse
    pub fn parse_error_at_line(line: usize, field_name: &str, value: &str) -> Self {
        Error::ParseError(format!(
            "line {}: failed to parse {}: expected floating-point number, got '{}'",
            line, field_name, value
        ))
    }

    /// Create a Validation error for a numeric field outside its range
    ///
    /// # Arguments
    /// * `field_name` - The configuration field (e.g., "quantity")
    /// * `value` - The rejected value
    /// * `min` - Inclusive lower bound
    /// * `max` - Inclusive upper bound
    pub fn out_of_range(
        field_name: &str,
        value: impl std::fmt::Display,
        min: impl std::fmt::Display,
        max: impl std::fmt::Display,
    ) -> Self {
        Error::Validation(format!(
            "{} must be between {} and {}, got {}",
            field_name, min, max, value
        ))
    }
}
