use std::env;
use std::path::Path;

use anyhow::Result;
use clap::Parser;
use log::info;

use nyc_clean::step::{self, CleaningParams};
use nyc_clean::store::LocalDirStore;

/// Environment variable naming the artifact store root; defaults to
/// `./artifacts`.
const STORE_DIR_VAR: &str = "ARTIFACT_STORE_DIR";

/// A very basic data cleaning
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Name for the input artifact
    #[arg(long = "input_artifact")]
    input_artifact: String,

    /// Name for the output artifact
    #[arg(long = "output_artifact")]
    output_artifact: String,

    /// Output artifact type
    #[arg(long = "output_type")]
    output_type: String,

    /// Output artifact description
    #[arg(long = "output_description")]
    output_description: String,

    /// Minimum value for price column
    #[arg(long = "min_price")]
    min_price: f64,

    /// Maximum value for price column
    #[arg(long = "max_price")]
    max_price: f64,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let store_root = env::var(STORE_DIR_VAR).unwrap_or_else(|_| "artifacts".to_string());
    info!("Using artifact store at '{store_root}'");
    let store = LocalDirStore::open(store_root)?;

    let params = CleaningParams {
        input_artifact: args.input_artifact,
        output_artifact: args.output_artifact,
        output_type: args.output_type,
        output_description: args.output_description,
        min_price: args.min_price,
        max_price: args.max_price,
    };

    let handle = step::run(&store, &params, Path::new("."))?;
    info!(
        "Registered artifact '{}' version v{}",
        handle.name, handle.version
    );
    Ok(())
}
