//! Generation profile schema.
//!
//! A [`GenerationProfile`] captures every tunable of the synthetic data
//! generator: festival months, trigger threshold, signal ranges, zone
//! weights, ward sampling, and the aggregator variant used for labels.
//! Profiles are deserialized from TOML and identified by a version id, so
//! a model trained on one profile's rows can be traced back to it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use wpi_ward_models::{UnknownZoneError, Zone};

use crate::AggregatorVariant;

/// A versioned synthetic data generation profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationProfile {
    /// Unique profile identifier (e.g. `"v1"`).
    pub id: String,
    /// Human-readable description.
    pub name: String,
    /// Default number of rows to generate.
    pub rows: usize,
    /// Aggregator variant used to label rows.
    pub aggregator: AggregatorVariant,
    /// Calendar months eligible for a festival window.
    pub festival_months: Vec<u32>,
    /// A festival window triggers when a uniform draw in `[0, 1)` is
    /// strictly greater than this value.
    pub festival_trigger_threshold: f64,
    /// Upper bound of the intensity noise drawn outside festival windows.
    pub off_festival_noise: f64,
    /// Highest day of month drawn.
    pub max_day_of_month: u32,
    /// Complaint intensity scaling.
    pub complaint: ScaledSignal,
    /// Crowd index scaling.
    pub crowd: ScaledSignal,
    /// Weather risk range.
    pub weather: WeatherRange,
    /// Ward sampling policy.
    pub sampling: WardSampling,
    /// Festival weight per zone label.
    pub zone_weights: BTreeMap<String, f64>,
}

impl GenerationProfile {
    /// Returns the profile identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns whether `month` is eligible for a festival window.
    #[must_use]
    pub fn is_festival_month(&self, month: u32) -> bool {
        self.festival_months.contains(&month)
    }

    /// Returns the festival weight for `zone`.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownZoneError`] if this profile has no weight for the
    /// zone.
    pub fn zone_weight(&self, zone: Zone) -> Result<f64, UnknownZoneError> {
        self.zone_weights
            .get(zone.as_ref())
            .copied()
            .ok_or_else(|| UnknownZoneError {
                zone: zone.to_string(),
            })
    }

    /// Returns weight table keys that are not registered zone labels.
    #[must_use]
    pub fn unregistered_zones(&self) -> Vec<&str> {
        self.zone_weights
            .keys()
            .map(String::as_str)
            .filter(|label| Zone::from_label(label).is_err())
            .collect()
    }
}

/// A festival-scaled signal: `base * (1 + festival_intensity * factor)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaledSignal {
    /// Range the unscaled base value is drawn from.
    pub base: SignalRange,
    /// Multiplier applied to festival intensity before scaling.
    pub festival_factor: f64,
}

/// Inclusive real-valued range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignalRange {
    /// Lower bound.
    pub min: f64,
    /// Upper bound.
    pub max: f64,
}

/// Inclusive integer weather risk range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherRange {
    /// Lower bound.
    pub min: u32,
    /// Upper bound.
    pub max: u32,
}

/// How the generator picks a ward for each row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WardSampling {
    /// Every registered ward is equally likely.
    Uniform,
    /// Pick the demo roster with probability `demo_share`, otherwise the
    /// extra roster, then a ward uniformly within the roster.
    Weighted {
        /// Probability of drawing from the demo roster.
        demo_share: f64,
    },
}
