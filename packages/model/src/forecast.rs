//! Inference adapter: date, ward, and zone in; rounded WPI estimate out.

use std::sync::Arc;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use wpi_signal::derive::derive_for_inference;
use wpi_signal::round2;
use wpi_signal_models::FeatureSet;

use crate::encoding::EncodingAdapter;
use crate::predictor::WpiPredictor;
use crate::{ForecastError, PredictError};

/// One inference request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub date: String,
    pub ward: String,
    pub zone: String,
}

/// Result of a successful prediction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Prediction {
    /// Model output rounded to two decimals. Not clamped.
    pub predicted_wpi: f64,
    /// The derived features the model was scored on.
    pub features: FeatureSet,
}

/// Parses an ISO-8601 date, with or without a time part. Only the calendar
/// date is kept.
///
/// # Errors
///
/// Returns [`ForecastError::InvalidDate`] if `input` is not a recognizable
/// date.
pub fn parse_date(input: &str) -> Result<NaiveDate, ForecastError> {
    let trimmed = input.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(trimmed)
                .ok()
                .map(|dt| dt.date_naive())
        })
        .or_else(|| {
            NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S")
                .ok()
                .map(|dt| dt.date())
        })
        .ok_or_else(|| ForecastError::InvalidDate {
            input: input.to_string(),
        })
}

/// Runs the inference-time feature strategy, encodes, and scores one row.
#[derive(Clone)]
pub struct Forecaster {
    predictor: Arc<dyn WpiPredictor>,
    encoding: EncodingAdapter,
}

impl std::fmt::Debug for Forecaster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Forecaster")
            .field("encoding", &self.encoding)
            .finish_non_exhaustive()
    }
}

impl Forecaster {
    #[must_use]
    pub fn new(predictor: Arc<dyn WpiPredictor>, encoding: EncodingAdapter) -> Self {
        Self {
            predictor,
            encoding,
        }
    }

    #[must_use]
    pub const fn encoding(&self) -> &EncodingAdapter {
        &self.encoding
    }

    /// Predicts the WPI for `request`.
    ///
    /// Validation order is date, then ward, then zone; the model is only
    /// invoked once all three are accepted.
    ///
    /// # Errors
    ///
    /// Returns [`ForecastError::InvalidDate`] for an unparseable date,
    /// [`ForecastError::Encoding`] for an unknown ward or zone, or
    /// [`ForecastError::Prediction`] if the model fails.
    pub fn predict(&self, request: &PredictionRequest) -> Result<Prediction, ForecastError> {
        let date = parse_date(&request.date)?;
        let features = derive_for_inference(&date);
        let row = self.encoding.encode_row(
            date.month(),
            date.day(),
            features,
            &request.ward,
            &request.zone,
        )?;

        let scores = self.predictor.predict(std::slice::from_ref(&row))?;
        let [score] = scores.as_slice() else {
            return Err(PredictError::RowCount {
                expected: 1,
                got: scores.len(),
            }
            .into());
        };

        let predicted_wpi = round2(*score);
        log::debug!(
            "Predicted WPI {predicted_wpi} for {} ({}) on {date}",
            request.ward,
            request.zone
        );

        Ok(Prediction {
            predicted_wpi,
            features,
        })
    }
}
