#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Model input encoding, predictor contract, and WPI inference.
//!
//! The regression model is opaque: anything implementing
//! [`predictor::WpiPredictor`] can score rows. This crate owns the one
//! invariant that ties inference to training, namely that
//! [`encoding::EncodedModelInput`] reproduces the fitted column set and
//! order, and the [`forecast::Forecaster`] that runs the inference-time
//! derivation, encodes, predicts, and rounds.

pub mod encoder;
pub mod encoding;
pub mod forecast;
pub mod predictor;

use thiserror::Error;

/// Errors raised while encoding a ward/zone pair for the model.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodingError {
    /// The ward encoder was not fitted on this ward name.
    #[error("Ward '{ward}' was not seen when the ward encoder was fitted")]
    UnseenWard {
        /// The ward name that was looked up.
        ward: String,
    },

    /// The zone label is not a registered zone.
    #[error("Zone '{zone}' is not a registered zone")]
    UnknownZone {
        /// The zone label that was looked up.
        zone: String,
    },
}

/// Errors raised while loading a model or encoder artifact.
#[derive(Debug, Error)]
pub enum ArtifactError {
    /// The artifact file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The artifact is not valid JSON for its schema.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The artifact content is inconsistent.
    #[error("Invalid artifact: {message}")]
    Invalid {
        /// Description of what went wrong.
        message: String,
    },
}

/// Errors raised by a predictor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PredictError {
    /// The predictor returned a different number of scores than rows.
    #[error("Predictor returned {got} scores for {expected} rows")]
    RowCount {
        /// Rows submitted.
        expected: usize,
        /// Scores returned.
        got: usize,
    },

    /// The predictor produced a NaN or infinite score.
    #[error("Predictor returned a non-finite score")]
    NonFinite,
}

/// Errors surfaced to callers of the inference path.
#[derive(Debug, Error)]
pub enum ForecastError {
    /// The date string could not be parsed.
    #[error("Invalid date '{input}': expected an ISO-8601 date such as 2024-09-15")]
    InvalidDate {
        /// The rejected input.
        input: String,
    },

    /// The ward or zone could not be encoded.
    #[error(transparent)]
    Encoding(#[from] EncodingError),

    /// No model is loaded.
    #[error("Prediction model is not loaded")]
    ModelUnavailable,

    /// The predictor failed.
    #[error(transparent)]
    Prediction(#[from] PredictError),
}
