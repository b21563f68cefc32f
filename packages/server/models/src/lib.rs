#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the WPI server.
//!
//! These types are serialized to JSON for the REST API. Field names are
//! `snake_case` to match the `/predict-wpi` contract the dashboard backend
//! already speaks.

use serde::{Deserialize, Serialize};
use wpi_signal_models::{
    AggregatorVariant, FeatureSet, GenerationProfile, OperatingMode, Recommendation,
    RecommendationSignals, StatusColor, WardSampling,
};
use wpi_ward_models::{Roster, Ward, Zone};

/// Body of `POST /predict-wpi`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiPredictRequest {
    pub ward_name: String,
    pub zone: String,
    /// ISO-8601 date.
    pub date: String,
}

/// Response of `POST /predict-wpi`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiPredictResponse {
    pub ward: String,
    pub zone: String,
    pub date: String,
    /// Raw model output rounded to two decimals.
    pub predicted_wpi: f64,
    pub features_used: FeatureSet,
}

/// Body of `POST /api/forecast`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiForecastRequest {
    pub date: String,
    pub ward: String,
    pub zone: String,
    /// Operating mode for status thresholds. Defaults to normal.
    #[serde(default)]
    pub mode: OperatingMode,
}

/// Echo of the forecast inputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiForecastInput {
    pub date: String,
    pub ward: String,
    pub zone: String,
}

/// Forecast on the dashboard's 0-100 index scale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiForecast {
    /// Dashboard index: model output doubled, clamped to `0..=100`, and
    /// rounded.
    pub predicted_wpi: u32,
    /// Raw model output rounded to two decimals.
    pub model_wpi: f64,
    pub status: StatusColor,
    pub blink: bool,
    pub mode: OperatingMode,
    pub signals: RecommendationSignals,
    /// Suggested actions in rule order.
    pub recommendations: Vec<Recommendation>,
    pub features: FeatureSet,
}

/// Response of `POST /api/forecast`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiForecastResponse {
    pub input: ApiForecastInput,
    pub forecast: ApiForecast,
}

/// A registered ward as returned by `GET /api/wards`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiWard {
    pub id: String,
    pub name: String,
    pub zone: Zone,
    pub roster: Roster,
}

impl From<&Ward> for ApiWard {
    fn from(ward: &Ward) -> Self {
        Self {
            id: ward.id.to_string(),
            name: ward.name.to_string(),
            zone: ward.zone,
            roster: ward.roster,
        }
    }
}

/// A generation profile summary as returned by `GET /api/profiles`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiProfile {
    pub id: String,
    pub name: String,
    pub aggregator: AggregatorVariant,
    pub festival_months: Vec<u32>,
    pub festival_trigger_threshold: f64,
    pub sampling: WardSampling,
    /// Whether the generator uses this profile when none is requested.
    pub is_default: bool,
}

impl ApiProfile {
    #[must_use]
    pub fn new(profile: &GenerationProfile, is_default: bool) -> Self {
        Self {
            id: profile.id.clone(),
            name: profile.name.clone(),
            aggregator: profile.aggregator,
            festival_months: profile.festival_months.clone(),
            festival_trigger_threshold: profile.festival_trigger_threshold,
            sampling: profile.sampling,
            is_default,
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiHealth {
    /// Whether the server is healthy.
    pub healthy: bool,
    /// Server version string.
    pub version: String,
    /// Whether a prediction model is loaded.
    pub model_loaded: bool,
    /// Generation profile of the loaded model, if any.
    pub model_profile: Option<String>,
}

/// Error body for rejected requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
}

impl ApiError {
    #[must_use]
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forecast_mode_defaults_to_normal() {
        let request: ApiForecastRequest = serde_json::from_str(
            r#"{"date":"2024-09-15","ward":"Dadar","zone":"Central"}"#,
        )
        .unwrap();
        assert_eq!(request.mode, OperatingMode::Normal);

        let request: ApiForecastRequest = serde_json::from_str(
            r#"{"date":"2024-09-15","ward":"Dadar","zone":"Central","mode":"emergency"}"#,
        )
        .unwrap();
        assert_eq!(request.mode, OperatingMode::Emergency);
    }

    #[test]
    fn ward_serializes_zone_label() {
        let ward = Ward::new("X001", "Fort", Zone::IslandCity, Roster::Extra);
        let json = serde_json::to_value(ApiWard::from(&ward)).unwrap();
        assert_eq!(json["zone"], "Island City");
        assert_eq!(json["roster"], "extra");
    }

    #[test]
    fn predict_response_flags_festival_as_integer() {
        let response = ApiPredictResponse {
            ward: "Dadar".to_string(),
            zone: "Central".to_string(),
            date: "2024-09-15".to_string(),
            predicted_wpi: 41.23,
            features_used: FeatureSet {
                is_festival_window: true,
                festival_intensity: 0.9,
                complaint_intensity: 1.0,
                crowd_index: 1.0,
                weather_risk: 0.8,
            },
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["features_used"]["is_festival_window"], 1);
        assert_eq!(json["predicted_wpi"], 41.23);
    }
}
