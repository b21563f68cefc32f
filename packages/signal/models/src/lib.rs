#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Feature set, training row, and generation profile types.
//!
//! A [`FeatureSet`] is the five-signal observation for one ward on one
//! date. It is produced by two different derivation strategies (synthetic
//! generation and live inference) that share this shape but not their
//! value ranges. See [`profile`] for the generation-time configuration
//! schema and [`status`] for the dashboard status types.

pub mod profile;
pub mod status;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

pub use profile::{GenerationProfile, ScaledSignal, SignalRange, WardSampling, WeatherRange};
pub use status::{
    OperatingMode, Recommendation, RecommendationSignals, StatusColor, StatusThresholds,
};

/// The five derived signals fed to the regression model.
///
/// All fields are always present. `is_festival_window` is serialized as
/// `0`/`1` to match the training data and the model input columns.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureSet {
    /// Whether the date falls inside a festival window.
    #[serde(with = "flag")]
    pub is_festival_window: bool,
    /// Festival intensity, `0.0..=1.0`.
    pub festival_intensity: f64,
    /// Complaint intensity. Integer-valued on the generation path,
    /// `0.0..=1.0` on the inference path.
    pub complaint_intensity: f64,
    /// Crowd index. Same ranges as `complaint_intensity`.
    pub crowd_index: f64,
    /// Weather risk. Integer `10..=60` on the generation path, `0.3` or
    /// `0.8` on the inference path.
    pub weather_risk: f64,
}

impl FeatureSet {
    /// Returns the festival window flag as the `0`/`1` model column value.
    #[must_use]
    pub const fn festival_flag(&self) -> u8 {
        if self.is_festival_window { 1 } else { 0 }
    }
}

/// One labeled synthetic observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingRow {
    /// Ward code (e.g. `"W001"`).
    pub ward_id: String,
    /// Ward display name.
    pub ward_name: String,
    /// Zone label.
    pub zone: String,
    /// Calendar month, `1..=12`.
    pub month: u32,
    /// Day of month, `1..=28`.
    pub day_of_month: u32,
    /// Derived signals for this observation.
    #[serde(flatten)]
    pub features: FeatureSet,
    /// Waste pressure index label, `0..=100`.
    pub wpi: u32,
}

/// Column order of the synthetic dataset file.
pub const TRAINING_COLUMNS: [&str; 11] = [
    "ward_id",
    "ward_name",
    "zone",
    "month",
    "day_of_month",
    "is_festival_window",
    "festival_intensity",
    "complaint_intensity",
    "crowd_index",
    "weather_risk",
    "wpi",
];

/// Weighting formula used to turn a feature set into a WPI label.
///
/// Each variant is tied to the generation profile whose rows a model was
/// trained on, so both stay callable.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AggregatorVariant {
    /// `0.40 * complaint + 0.35 * crowd + 0.25 * weather`
    VariantA,
    /// `0.45 * complaint + 0.40 * crowd + 0.15 * weather`
    VariantB,
}

impl AggregatorVariant {
    /// Returns the `(complaint, crowd, weather)` weights.
    #[must_use]
    pub const fn weights(self) -> (f64, f64, f64) {
        match self {
            Self::VariantA => (0.40, 0.35, 0.25),
            Self::VariantB => (0.45, 0.40, 0.15),
        }
    }
}

/// Serializes a `bool` as `0`/`1` and accepts either form back.
mod flag {
    use serde::{Deserialize, Deserializer, Serializer};

    #[allow(clippy::trivially_copy_pass_by_ref)]
    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(u8::from(*value))
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(u8),
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        match Flag::deserialize(deserializer)? {
            Flag::Bool(value) => Ok(value),
            Flag::Int(0) => Ok(false),
            Flag::Int(1) => Ok(true),
            Flag::Int(other) => Err(serde::de::Error::custom(format!(
                "invalid festival flag {other}: expected 0 or 1"
            ))),
        }
    }
}
