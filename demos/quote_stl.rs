//! Analyse an STL file and print a quote as JSON
//!
//! ```text
//! cargo run --example quote_stl -- part.stl [--quantity N] [--color C]
//!     [--material material.json] [--config quote_config.json]
//! ```
//!
//! Set `RUST_LOG=printquote=debug` to see decoding details.

use printquote::{
    FileFormat, MaterialPricing, MaterialProfile, PrintConfiguration, QuoteAssembler, QuoteConfig,
    analyze_upload,
};
use std::fs::{self, File};
use std::process::ExitCode;

const USAGE: &str =
    "usage: quote_stl <model> [--quantity N] [--color C] [--material FILE] [--config FILE]";

struct Args {
    model: String,
    quantity: u32,
    color: Option<String>,
    material: Option<String>,
    config: Option<String>,
}

fn parse_args() -> Result<Args, String> {
    let mut args = std::env::args().skip(1);
    let mut model = None;
    let mut quantity = 1;
    let mut color = None;
    let mut material = None;
    let mut config = None;

    while let Some(arg) = args.next() {
        let mut value = |name: &str| args.next().ok_or(format!("{} needs a value", name));
        match arg.as_str() {
            "--quantity" => {
                quantity = value("--quantity")?
                    .parse()
                    .map_err(|e| format!("invalid --quantity: {}", e))?
            }
            "--color" => color = Some(value("--color")?),
            "--material" => material = Some(value("--material")?),
            "--config" => config = Some(value("--config")?),
            other if model.is_none() => model = Some(other.to_string()),
            other => return Err(format!("unexpected argument '{}'", other)),
        }
    }

    Ok(Args {
        model: model.ok_or(USAGE)?,
        quantity,
        color,
        material,
        config,
    })
}

fn default_material() -> MaterialProfile {
    MaterialProfile::new("pla", MaterialPricing::new(0.5, 10.0, 25.0))
        .with_name("PLA")
        .with_color("white")
        .with_color("black")
        .with_lead_time_days(1)
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &args.config {
        Some(path) => QuoteConfig::from_reader(File::open(path)?)?,
        None => QuoteConfig::default(),
    };
    let material = match &args.material {
        Some(path) => serde_json::from_reader(File::open(path)?)?,
        None => default_material(),
    };
    let color = match args.color {
        Some(color) => color,
        None => material
            .properties
            .color_options
            .iter()
            .next()
            .cloned()
            .ok_or("material offers no colors")?,
    };

    let bytes = fs::read(&args.model)?;
    let format = FileFormat::from_file_name(&args.model);
    let analysis = analyze_upload(&bytes, &format);
    println!("{}", serde_json::to_string_pretty(&analysis)?);

    if let Some(message) = analysis.errors_message() {
        return Err(format!("{}: {}", args.model, message).into());
    }

    let request = PrintConfiguration::new(color).with_quantity(args.quantity);
    let quote =
        QuoteAssembler::new(config)?.assemble_from_analysis(&analysis, &material, &request)?;
    println!("{}", serde_json::to_string_pretty(&quote)?);
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "printquote=info".into()))
        .with_writer(std::io::stderr)
        .init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{}", message);
            return ExitCode::from(2);
        }
    };

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Quote failed");
            ExitCode::FAILURE
        }
    }
}
