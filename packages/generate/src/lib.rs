#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Synthetic training data and encoder artifact generation.
//!
//! Backs the `wpi_generate` binary: runs a generation profile into a CSV
//! training file and fits the ward encoder artifact the server loads next
//! to the model.

use std::path::{Path, PathBuf};

use rand::SeedableRng;
use rand::rngs::StdRng;
use thiserror::Error;
use wpi_model::ArtifactError;
use wpi_model::encoder::LabelEncoder;
use wpi_signal::GenerateError;
use wpi_signal::dataset::{read_csv_file, write_csv_file};
use wpi_signal::generator::{DatasetGenerator, DatasetSummary};
use wpi_signal::profiles;
use wpi_signal::progress::ProgressCallback;
use wpi_signal_models::WardSampling;

/// Default training CSV location.
pub const DEFAULT_DATASET_PATH: &str = "data/generated/bmc_waste_festival_ml_data.csv";

/// Default ward encoder artifact location.
pub const DEFAULT_ENCODER_PATH: &str = "data/model/ward_encoder.json";

/// Errors from the generation commands.
#[derive(Debug, Error)]
pub enum Error {
    /// Dataset generation or CSV I/O failed.
    #[error(transparent)]
    Generate(#[from] GenerateError),
    /// The encoder artifact could not be written.
    #[error(transparent)]
    Artifact(#[from] ArtifactError),
}

/// Arguments for a dataset run.
#[derive(Debug, Clone)]
pub struct DatasetArgs {
    /// Generation profile id.
    pub profile: String,
    /// Row count. Falls back to the profile's default.
    pub rows: Option<usize>,
    /// RNG seed. Unseeded runs draw from the OS.
    pub seed: Option<u64>,
    /// Overrides the profile's ward sampling with a weighted demo/extra
    /// split.
    pub demo_share: Option<f64>,
    /// Output CSV path.
    pub output: PathBuf,
}

/// Generates a dataset and writes it as CSV.
///
/// # Errors
///
/// Returns an error if the profile is unknown or invalid, generation fails,
/// or the file cannot be written.
pub fn generate_dataset(
    args: &DatasetArgs,
    progress: &dyn ProgressCallback,
) -> Result<DatasetSummary, Error> {
    let profile = profiles::profile(&args.profile)?;
    let rows = args.rows.unwrap_or(profile.rows);

    let mut generator = DatasetGenerator::new(profile)?;
    if let Some(demo_share) = args.demo_share {
        generator = generator.with_sampling(WardSampling::Weighted { demo_share })?;
    }

    let mut rng = args
        .seed
        .map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);

    log::info!(
        "Generating {rows} rows with profile {} ({}){}",
        args.profile,
        generator.profile().name,
        args.seed
            .map_or_else(String::new, |seed| format!(", seed {seed}"))
    );

    let data = generator.generate(rows, &mut rng, progress)?;
    write_csv_file(&data, &args.output)?;

    let summary = DatasetSummary::from_rows(&data);
    log::info!(
        "Dataset summary: {} rows, mean WPI {:.2}, max WPI {}, {:.1}% in festival windows",
        summary.rows,
        summary.mean_wpi,
        summary.max_wpi,
        summary.festival_share * 100.0
    );
    Ok(summary)
}

/// Fits the ward encoder from the ward names in a training CSV, or from
/// the ward registry when no dataset is given.
///
/// # Errors
///
/// Returns an error if the dataset cannot be read.
pub fn fit_encoder(dataset: Option<&Path>) -> Result<LabelEncoder, Error> {
    let encoder = match dataset {
        Some(path) => {
            let rows = read_csv_file(path)?;
            log::info!("Fitting ward encoder on {} rows from {}", rows.len(), path.display());
            LabelEncoder::fit(rows.iter().map(|row| row.ward_name.as_str()))
        }
        None => {
            log::info!("Fitting ward encoder on the ward registry");
            LabelEncoder::fit_registry()
        }
    };
    Ok(encoder)
}

/// Fits the ward encoder and writes it to `output`.
///
/// # Errors
///
/// Returns an error if fitting or writing fails.
pub fn write_encoder(dataset: Option<&Path>, output: &Path) -> Result<LabelEncoder, Error> {
    let encoder = fit_encoder(dataset)?;
    encoder.save(output)?;
    log::info!(
        "Wrote ward encoder with {} classes to {}",
        encoder.classes().len(),
        output.display()
    );
    Ok(encoder)
}
