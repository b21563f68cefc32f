#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! CLI tool for generating synthetic WPI training data.
//!
//! Runs a versioned generation profile into a CSV training file, and fits
//! the ward encoder artifact served alongside the regression model.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use wpi_cli_utils::{IndicatifProgress, init_logger};
use wpi_generate::{DEFAULT_DATASET_PATH, DEFAULT_ENCODER_PATH, DatasetArgs};
use wpi_signal::profiles::{DEFAULT_PROFILE_ID, all_profiles};

#[derive(Parser)]
#[command(name = "wpi_generate", about = "WPI training data generator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a synthetic training dataset as CSV
    Dataset {
        /// Generation profile id
        #[arg(long, default_value = DEFAULT_PROFILE_ID)]
        profile: String,

        /// Number of rows (defaults to the profile's row count)
        #[arg(long)]
        rows: Option<usize>,

        /// RNG seed for a reproducible dataset
        #[arg(long)]
        seed: Option<u64>,

        /// Sample the demo ward roster with this probability instead of the
        /// profile's sampling policy
        #[arg(long)]
        demo_share: Option<f64>,

        /// Output CSV path
        #[arg(long, default_value = DEFAULT_DATASET_PATH)]
        output: PathBuf,
    },
    /// Fit the ward encoder and write it as JSON
    Encoder {
        /// Training CSV to fit on (defaults to the ward registry)
        #[arg(long)]
        dataset: Option<PathBuf>,

        /// Output JSON path
        #[arg(long, default_value = DEFAULT_ENCODER_PATH)]
        output: PathBuf,
    },
    /// List registered generation profiles
    Profiles,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let multi = init_logger();
    let cli = Cli::parse();

    match cli.command {
        Commands::Dataset {
            profile,
            rows,
            seed,
            demo_share,
            output,
        } => {
            let args = DatasetArgs {
                profile,
                rows,
                seed,
                demo_share,
                output,
            };
            let bar = IndicatifProgress::rows_bar(&multi, "Preparing generator");
            wpi_generate::generate_dataset(&args, &*bar)?;
        }
        Commands::Encoder { dataset, output } => {
            wpi_generate::write_encoder(dataset.as_deref(), &output)?;
        }
        Commands::Profiles => {
            println!("{:<6} {:<10} {:<10} NAME", "ID", "AGGREGATOR", "ROWS");
            println!("{}", "-".repeat(60));
            for profile in all_profiles() {
                let marker = if profile.id == DEFAULT_PROFILE_ID {
                    " (default)"
                } else {
                    ""
                };
                println!(
                    "{:<6} {:<10} {:<10} {}{marker}",
                    profile.id,
                    profile.aggregator.as_ref(),
                    profile.rows,
                    profile.name
                );
            }
        }
    }

    Ok(())
}
