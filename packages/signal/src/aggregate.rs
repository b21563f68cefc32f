//! WPI aggregation.
//!
//! `wpi = min(floor(wc * complaint + wr * crowd + ww * weather) / 2, 100)`
//!
//! The weighted sum is truncated before the integer halving, and the
//! halving itself maps the raw weighted range onto the index scale. There
//! is no lower clamp; inputs are non-negative.

use wpi_signal_models::{AggregatorVariant, FeatureSet};

/// Upper bound of the index.
pub const MAX_WPI: u32 = 100;

/// Returns the untruncated weighted sum of the three pressure signals.
#[must_use]
pub fn weighted_sum(variant: AggregatorVariant, complaint: f64, crowd: f64, weather: f64) -> f64 {
    let (wc, wr, ww) = variant.weights();
    ww.mul_add(weather, wc.mul_add(complaint, wr * crowd))
}

/// Aggregates the three pressure signals into a WPI in `0..=100`.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn aggregate(variant: AggregatorVariant, complaint: f64, crowd: f64, weather: f64) -> u32 {
    // `as` saturates: negative sums land on 0 and huge ones on u32::MAX.
    let truncated = weighted_sum(variant, complaint, crowd, weather).floor() as u32;
    (truncated / 2).min(MAX_WPI)
}

/// Aggregates a feature set with `variant`.
#[must_use]
pub fn aggregate_features(variant: AggregatorVariant, features: &FeatureSet) -> u32 {
    aggregate(
        variant,
        features.complaint_intensity,
        features.crowd_index,
        features.weather_risk,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const VARIANTS: [AggregatorVariant; 2] =
        [AggregatorVariant::VariantA, AggregatorVariant::VariantB];

    #[test]
    fn zero_inputs_give_zero() {
        assert_eq!(aggregate(AggregatorVariant::VariantA, 0.0, 0.0, 0.0), 0);
        assert_eq!(aggregate(AggregatorVariant::VariantB, 0.0, 0.0, 0.0), 0);
    }

    #[test]
    fn variant_a_known_value() {
        // 0.4*50 + 0.35*60 + 0.25*30 = 48.5 -> 48 -> 24
        assert_eq!(aggregate(AggregatorVariant::VariantA, 50.0, 60.0, 30.0), 24);
    }

    #[test]
    fn variant_b_known_value() {
        // 0.45*50 + 0.40*61 + 0.15*30 = 51.4 -> 51 -> 25
        assert_eq!(aggregate(AggregatorVariant::VariantB, 50.0, 61.0, 30.0), 25);
    }

    #[test]
    fn halving_is_applied_after_truncation() {
        // 0.4*10 + 0.35*10 + 0.25*11 = 10.25 -> 10 -> 5
        assert_eq!(aggregate(AggregatorVariant::VariantA, 10.0, 10.0, 11.0), 5);
        // 0.4*33 + 0.35*20 + 0.25*13 = 23.45 -> 23 -> 11
        assert_eq!(aggregate(AggregatorVariant::VariantA, 33.0, 20.0, 13.0), 11);
    }

    #[test]
    fn clamps_at_one_hundred() {
        for variant in VARIANTS {
            assert_eq!(aggregate(variant, 500.0, 500.0, 60.0), MAX_WPI);
            assert_eq!(aggregate(variant, 1.0e12, 1.0e12, 1.0e12), MAX_WPI);
        }
    }

    #[test]
    fn stays_in_range_over_input_grid() {
        for variant in VARIANTS {
            for complaint in (0..=300).step_by(15) {
                for crowd in (0..=300).step_by(15) {
                    for weather in (0..=60).step_by(10) {
                        let wpi = aggregate(
                            variant,
                            f64::from(complaint),
                            f64::from(crowd),
                            f64::from(weather),
                        );
                        assert!(wpi <= MAX_WPI);
                    }
                }
            }
        }
    }

    #[test]
    fn matches_hand_computed_sum_for_inference_inputs() {
        let features = FeatureSet {
            is_festival_window: true,
            festival_intensity: 0.9,
            complaint_intensity: 1.0,
            crowd_index: 1.0,
            weather_risk: 0.8,
        };
        let by_hand = 0.4 * 1.0 + 0.35 * 1.0 + 0.25 * 0.8;
        let sum = weighted_sum(
            AggregatorVariant::VariantA,
            features.complaint_intensity,
            features.crowd_index,
            features.weather_risk,
        );
        assert!((sum - by_hand).abs() < 0.005);
        assert!((sum - 0.95).abs() < 0.005);
        // 0.95 truncates to 0 before halving.
        assert_eq!(aggregate_features(AggregatorVariant::VariantA, &features), 0);
    }

    #[test]
    fn matches_hand_computed_sum_for_training_inputs() {
        let (complaint, crowd, weather): (f64, f64, f64) = (83.0, 117.0, 42.0);
        let by_hand = (0.4 * complaint + 0.35 * crowd + 0.25 * weather).floor() / 2.0;
        let wpi = aggregate(AggregatorVariant::VariantA, complaint, crowd, weather);
        // 33.2 + 40.95 + 10.5 = 84.65 -> 84 -> 42
        assert_eq!(wpi, 42);
        assert!((f64::from(wpi) - by_hand.floor()).abs() < 0.005);
    }
}
