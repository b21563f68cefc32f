//! Dashboard status types.
//!
//! The dashboard colors each ward by its index and blinks the critical
//! ones. Thresholds tighten as the city moves from normal operations into
//! event or emergency mode.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

use crate::FeatureSet;

/// Operating mode of the collection service.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
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
pub enum OperatingMode {
    /// Regular operations.
    #[default]
    Normal,
    /// A festival or large public event is under way.
    Event,
    /// Emergency operations (floods, disasters).
    Emergency,
}

impl OperatingMode {
    /// Returns the status thresholds for this mode.
    #[must_use]
    pub const fn thresholds(self) -> StatusThresholds {
        match self {
            Self::Normal => StatusThresholds {
                green_max: 29,
                yellow_max: 54,
                orange_max: 79,
                blink_at: 90,
            },
            Self::Event => StatusThresholds {
                green_max: 24,
                yellow_max: 49,
                orange_max: 74,
                blink_at: 85,
            },
            Self::Emergency => StatusThresholds {
                green_max: 19,
                yellow_max: 44,
                orange_max: 69,
                blink_at: 80,
            },
        }
    }

    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Normal, Self::Event, Self::Emergency]
    }
}

/// Upper bounds (inclusive) of each status band, plus the blink cutoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusThresholds {
    /// Highest index still shown green.
    pub green_max: u32,
    /// Highest index still shown yellow.
    pub yellow_max: u32,
    /// Highest index still shown orange.
    pub orange_max: u32,
    /// Index at or above which the ward blinks.
    pub blink_at: u32,
}

impl StatusThresholds {
    /// Returns the status color for `wpi`.
    #[must_use]
    pub const fn color(self, wpi: u32) -> StatusColor {
        if wpi <= self.green_max {
            StatusColor::Green
        } else if wpi <= self.yellow_max {
            StatusColor::Yellow
        } else if wpi <= self.orange_max {
            StatusColor::Orange
        } else {
            StatusColor::Red
        }
    }

    /// Returns whether a ward at `wpi` should blink.
    #[must_use]
    pub const fn should_blink(self, wpi: u32) -> bool {
        wpi >= self.blink_at
    }
}

/// Dashboard status color.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum StatusColor {
    Green,
    Yellow,
    Orange,
    Red,
}

/// Rule-engine signals on a `0..=100` scale, derived from an inference
/// feature set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RecommendationSignals {
    /// Complaint intensity scaled to `0..=100`.
    pub complaint_intensity: u32,
    /// Festival intensity scaled to `0..=100`.
    pub event_presence: u32,
    /// Weather risk scaled to `0..=100`.
    pub weather_alert: u32,
    /// `70` when complaints run high, otherwise `30`.
    pub hotspot_history: u32,
    /// High complaints coinciding with heavy crowds.
    pub spike_flag: bool,
}

impl RecommendationSignals {
    const HOTSPOT_COMPLAINT_CUTOFF: f64 = 0.6;
    const SPIKE_COMPLAINT_CUTOFF: f64 = 0.75;
    const SPIKE_CROWD_CUTOFF: f64 = 0.7;
}

impl From<&FeatureSet> for RecommendationSignals {
    fn from(features: &FeatureSet) -> Self {
        Self {
            complaint_intensity: percent(features.complaint_intensity),
            event_presence: percent(features.festival_intensity),
            weather_alert: percent(features.weather_risk),
            hotspot_history: if features.complaint_intensity > Self::HOTSPOT_COMPLAINT_CUTOFF {
                70
            } else {
                30
            },
            spike_flag: features.complaint_intensity > Self::SPIKE_COMPLAINT_CUTOFF
                && features.crowd_index > Self::SPIKE_CROWD_CUTOFF,
        }
    }
}

/// A collection action suggested for a forecast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Recommendation {
    pub action: String,
    /// Rule reason followed by the index and the contributing signals.
    pub reason: String,
    /// How strongly the action is advised, `0..=100`.
    pub actionability_score: u32,
}

/// Scales a `0..=1` signal to a rounded `0..=100` integer.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn percent(value: f64) -> u32 {
    (value * 100.0).round().clamp(0.0, 100.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normal_mode_bands() {
        let t = OperatingMode::Normal.thresholds();
        assert_eq!(t.color(0), StatusColor::Green);
        assert_eq!(t.color(29), StatusColor::Green);
        assert_eq!(t.color(30), StatusColor::Yellow);
        assert_eq!(t.color(54), StatusColor::Yellow);
        assert_eq!(t.color(55), StatusColor::Orange);
        assert_eq!(t.color(80), StatusColor::Red);
        assert!(!t.should_blink(89));
        assert!(t.should_blink(90));
    }

    #[test]
    fn thresholds_tighten_with_mode() {
        let normal = OperatingMode::Normal.thresholds();
        let event = OperatingMode::Event.thresholds();
        let emergency = OperatingMode::Emergency.thresholds();
        assert!(emergency.green_max < event.green_max && event.green_max < normal.green_max);
        assert!(emergency.blink_at < event.blink_at && event.blink_at < normal.blink_at);
        assert_eq!(emergency.color(70), StatusColor::Red);
        assert_eq!(normal.color(70), StatusColor::Orange);
    }

    #[test]
    fn mode_parses_and_defaults() {
        assert_eq!(OperatingMode::default(), OperatingMode::Normal);
        assert_eq!("emergency".parse::<OperatingMode>(), Ok(OperatingMode::Emergency));
        assert!("panic".parse::<OperatingMode>().is_err());
    }

    #[test]
    fn signals_from_festival_weekend() {
        let features = FeatureSet {
            is_festival_window: true,
            festival_intensity: 0.9,
            complaint_intensity: 1.0,
            crowd_index: 1.0,
            weather_risk: 0.8,
        };
        let signals = RecommendationSignals::from(&features);
        assert_eq!(signals.complaint_intensity, 100);
        assert_eq!(signals.event_presence, 90);
        assert_eq!(signals.weather_alert, 80);
        assert_eq!(signals.hotspot_history, 70);
        assert!(signals.spike_flag);
    }

    #[test]
    fn signals_from_quiet_weekday() {
        let features = FeatureSet {
            is_festival_window: false,
            festival_intensity: 0.0,
            complaint_intensity: 0.4,
            crowd_index: 0.3,
            weather_risk: 0.3,
        };
        let signals = RecommendationSignals::from(&features);
        assert_eq!(signals.complaint_intensity, 40);
        assert_eq!(signals.event_presence, 0);
        assert_eq!(signals.weather_alert, 30);
        assert_eq!(signals.hotspot_history, 30);
        assert!(!signals.spike_flag);
    }
}
