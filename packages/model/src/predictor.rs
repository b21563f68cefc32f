//! Predictor contract and the linear-regression artifact.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::encoding::{COLUMN_COUNT, EncodedModelInput};
use crate::{ArtifactError, PredictError};

/// A fitted regression model over [`EncodedModelInput`] rows.
pub trait WpiPredictor: Send + Sync {
    /// Scores each row, returning one raw prediction per row in input
    /// order.
    ///
    /// # Errors
    ///
    /// Returns an error if the model cannot score the rows.
    fn predict(&self, rows: &[EncodedModelInput]) -> Result<Vec<f64>, PredictError>;
}

/// Linear regression exported as JSON.
///
/// `columns` must list [`EncodedModelInput::COLUMNS`] in order, so an
/// artifact fitted on a different column layout is rejected at load time
/// instead of producing silently wrong scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    /// Generation profile the training data came from.
    pub profile: String,
    pub columns: Vec<String>,
    pub intercept: f64,
    pub coefficients: Vec<f64>,
}

impl LinearModel {
    /// Parses and validates a model artifact.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed, the column list differs
    /// from the fitted column order, or any parameter is not finite.
    pub fn from_json(json: &str) -> Result<Self, ArtifactError> {
        let model: Self = serde_json::from_str(json)?;
        model.validate()?;
        Ok(model)
    }

    /// Loads a model artifact from `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or fails
    /// [`Self::from_json`].
    pub fn load(path: &Path) -> Result<Self, ArtifactError> {
        let model = Self::from_json(&std::fs::read_to_string(path)?)?;
        log::info!(
            "Loaded linear model (profile {}) from {}",
            model.profile,
            path.display()
        );
        Ok(model)
    }

    fn validate(&self) -> Result<(), ArtifactError> {
        if self.columns.len() != COLUMN_COUNT
            || self
                .columns
                .iter()
                .zip(EncodedModelInput::COLUMNS)
                .any(|(found, expected)| found != expected)
        {
            return Err(ArtifactError::Invalid {
                message: format!(
                    "model columns {:?} do not match {:?}",
                    self.columns,
                    EncodedModelInput::COLUMNS
                ),
            });
        }
        if self.coefficients.len() != COLUMN_COUNT {
            return Err(ArtifactError::Invalid {
                message: format!(
                    "expected {COLUMN_COUNT} coefficients, found {}",
                    self.coefficients.len()
                ),
            });
        }
        if !self.intercept.is_finite() || self.coefficients.iter().any(|c| !c.is_finite()) {
            return Err(ArtifactError::Invalid {
                message: "model parameters must be finite".to_string(),
            });
        }
        Ok(())
    }

    fn score(&self, row: &EncodedModelInput) -> f64 {
        row.values()
            .iter()
            .zip(&self.coefficients)
            .fold(self.intercept, |acc, (x, w)| x.mul_add(*w, acc))
    }
}

impl WpiPredictor for LinearModel {
    fn predict(&self, rows: &[EncodedModelInput]) -> Result<Vec<f64>, PredictError> {
        rows.iter()
            .map(|row| {
                let score = self.score(row);
                if score.is_finite() {
                    Ok(score)
                } else {
                    Err(PredictError::NonFinite)
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::ZoneOneHot;
    use wpi_signal_models::FeatureSet;

    fn model_json(columns: &[&str], coefficients: &[f64]) -> String {
        serde_json::json!({
            "profile": "v2",
            "columns": columns,
            "intercept": 2.0,
            "coefficients": coefficients,
        })
        .to_string()
    }

    fn row() -> EncodedModelInput {
        EncodedModelInput {
            month: 9,
            day_of_month: 15,
            features: FeatureSet {
                is_festival_window: true,
                festival_intensity: 0.9,
                complaint_intensity: 0.85,
                crowd_index: 0.8,
                weather_risk: 0.6,
            },
            ward_coded: 3,
            zone: ZoneOneHot {
                south: true,
                ..ZoneOneHot::default()
            },
        }
    }

    #[test]
    fn scores_dot_product_plus_intercept() {
        let mut coefficients = [0.0; COLUMN_COUNT];
        coefficients[0] = 1.0; // month
        coefficients[4] = 10.0; // complaint_intensity
        coefficients[10] = 5.0; // zone_South
        let model =
            LinearModel::from_json(&model_json(&EncodedModelInput::COLUMNS, &coefficients))
                .unwrap();
        let scores = model.predict(&[row(), row()]).unwrap();
        assert_eq!(scores.len(), 2);
        // 2 + 9 + 8.5 + 5
        assert!((scores[0] - 24.5).abs() < 1e-9);
    }

    #[test]
    fn rejects_reordered_columns() {
        let mut columns = EncodedModelInput::COLUMNS;
        columns.swap(8, 9);
        let result = LinearModel::from_json(&model_json(&columns, &[0.0; COLUMN_COUNT]));
        assert!(matches!(result, Err(ArtifactError::Invalid { .. })));
    }

    #[test]
    fn rejects_wrong_coefficient_count() {
        let result = LinearModel::from_json(&model_json(&EncodedModelInput::COLUMNS, &[1.0; 3]));
        assert!(matches!(result, Err(ArtifactError::Invalid { .. })));
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(
            LinearModel::from_json("{\"profile\":\"v2\"}"),
            Err(ArtifactError::Json(_))
        ));
    }
}
