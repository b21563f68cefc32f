#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Signal derivation, WPI aggregation, and synthetic dataset generation.
//!
//! Two derivation strategies live side by side in [`derive`]:
//! [`derive::derive_for_synthesis`] draws randomized signals for labeled
//! training rows, and [`derive::derive_for_inference`] computes the
//! calendar-only signals used at prediction time. They are never swapped
//! for one another. [`aggregate`] turns a feature set into a WPI label,
//! [`generator`] drives both across many random draws, and [`dataset`]
//! reads and writes the resulting CSV file. [`recommend`] turns a
//! dashboard forecast into suggested collection actions.

pub mod aggregate;
pub mod dataset;
pub mod derive;
pub mod generator;
pub mod profiles;
pub mod progress;
pub mod recommend;

use thiserror::Error;
use wpi_ward_models::{Roster, UnknownZoneError};

/// Errors that can occur while generating or exporting a dataset.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// A zone has no festival weight in the active profile.
    #[error(transparent)]
    UnknownZone(#[from] UnknownZoneError),

    /// No profile is registered under the requested id.
    #[error("Unknown generation profile '{id}'")]
    UnknownProfile {
        /// The requested profile id.
        id: String,
    },

    /// A profile failed validation.
    #[error("Invalid generation profile '{id}': {message}")]
    InvalidProfile {
        /// The profile id.
        id: String,
        /// Description of what went wrong.
        message: String,
    },

    /// A weighted sampling policy has a demo share outside `[0, 1]`.
    #[error("Demo roster share {demo_share} is not in [0, 1]")]
    InvalidDemoShare {
        /// The rejected share.
        demo_share: f64,
    },

    /// Uniform sampling found no registered wards.
    #[error("No wards registered")]
    EmptyRegistry,

    /// The sampling policy drew from a roster with no wards.
    #[error("No wards registered under the {roster} roster")]
    EmptyRoster {
        /// The roster that was empty.
        roster: Roster,
    },

    /// A drawn month/day pair is not a calendar date.
    #[error("Invalid calendar date: month {month}, day {day}")]
    InvalidDate {
        /// Drawn month.
        month: u32,
        /// Drawn day of month.
        day: u32,
    },

    /// CSV encoding or decoding failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// File I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Rounds to two decimal places.
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
