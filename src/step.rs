use std::path::Path;

use log::info;
use serde::Serialize;

use crate::data::{filter, loader, writer};
use crate::error::CleanError;
use crate::store::{ArtifactHandle, ArtifactSpec, ArtifactStore};

/// Job type recorded with the run configuration.
pub const JOB_TYPE: &str = "basic_cleaning";

/// Fixed name of the cleaned file written to the working directory.
pub const CLEAN_FILE_NAME: &str = "clean_sample.csv";

/// Parameters of one cleaning run, as supplied by the caller.
#[derive(Debug, Clone, Serialize)]
pub struct CleaningParams {
    pub input_artifact: String,
    pub output_artifact: String,
    pub output_type: String,
    pub output_description: String,
    pub min_price: f64,
    pub max_price: f64,
}

/// Run the basic cleaning step.
///
/// Resolves the input artifact, loads it, applies the price filter, the
/// `last_review` date normalization, and the bounding-box filter in that
/// order, writes [`CLEAN_FILE_NAME`] into `work_dir`, and registers it with
/// the store. The intermediate file is left on disk.
///
/// Any error aborts before registration; no partial artifact is created.
/// Note `min_price > max_price` is not rejected — it simply drops every row.
pub fn run(
    store: &dyn ArtifactStore,
    params: &CleaningParams,
    work_dir: &Path,
) -> Result<ArtifactHandle, CleanError> {
    let config = serde_json::to_value(params)
        .map_err(|e| CleanError::parse(e.to_string()))?;
    store.record_run_config(JOB_TYPE, &config)?;

    info!("Downloading input artifact {}", params.input_artifact);
    let local_path = store.resolve(&params.input_artifact)?;
    let table = loader::load_csv(&local_path)?;
    info!("Loaded {} rows", table.len());

    info!(
        "Keeping prices between {} and {}",
        params.min_price, params.max_price
    );
    let kept = filter::rows_in_range(&table, "price", params.min_price, params.max_price)?;
    let mut table = table.select(&kept);

    info!("Converting 'last_review' column to datetime format");
    table.coerce_date_column("last_review");

    info!("Ensuring proper geolocation");
    let kept = filter::rows_in_bounding_box(&table)?;
    let table = table.select(&kept);
    info!("{} rows remain after cleaning", table.len());

    info!("Saving clean data as '{CLEAN_FILE_NAME}'");
    let clean_path = work_dir.join(CLEAN_FILE_NAME);
    writer::write_csv(&table, &clean_path)?;

    info!("Uploading output artifact as {}", params.output_artifact);
    let spec = ArtifactSpec {
        name: params.output_artifact.clone(),
        kind: params.output_type.clone(),
        description: params.output_description.clone(),
    };
    store.register(&spec, &clean_path)
}
