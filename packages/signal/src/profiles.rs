//! Compile-time registry of generation profiles.
//!
//! Each entry is a `(id, toml_content)` pair embedded via `include_str!`.
//! Adding a profile requires creating a TOML file in `profiles/` and adding
//! a corresponding entry here. Existing profiles are never edited in
//! place: models trained on their rows would silently drift.

use wpi_signal_models::{GenerationProfile, WardSampling};
use wpi_ward::Zone;

use crate::GenerateError;

/// Number of registered profiles. Enforced by a test.
#[cfg(test)]
const EXPECTED_PROFILE_COUNT: usize = 2;

/// Profile used when none is requested.
pub const DEFAULT_PROFILE_ID: &str = "v2";

/// Embedded TOML profile definitions.
const PROFILE_TOMLS: &[(&str, &str)] = &[
    ("v1", include_str!("../profiles/v1.toml")),
    ("v2", include_str!("../profiles/v2.toml")),
];

/// Returns all registered profiles.
///
/// # Panics
///
/// Panics if any embedded TOML file fails to parse. Since these are
/// compile-time constants, parse failures indicate a development error
/// and are caught by the tests below.
#[must_use]
pub fn all_profiles() -> Vec<GenerationProfile> {
    PROFILE_TOMLS
        .iter()
        .map(|(id, toml_str)| {
            toml::de::from_str(toml_str)
                .unwrap_or_else(|e| panic!("Failed to parse generation profile '{id}': {e}"))
        })
        .collect()
}

/// Returns the ids of all registered profiles.
#[must_use]
pub fn profile_ids() -> Vec<&'static str> {
    PROFILE_TOMLS.iter().map(|(id, _)| *id).collect()
}

/// Looks up a registered profile by id.
///
/// # Errors
///
/// Returns [`GenerateError::UnknownProfile`] if no profile has this id, or
/// [`GenerateError::InvalidProfile`] if its TOML does not parse.
pub fn profile(id: &str) -> Result<GenerationProfile, GenerateError> {
    let (_, toml_str) = PROFILE_TOMLS
        .iter()
        .find(|(profile_id, _)| *profile_id == id)
        .ok_or_else(|| GenerateError::UnknownProfile { id: id.to_string() })?;

    toml::de::from_str(toml_str).map_err(|e| GenerateError::InvalidProfile {
        id: id.to_string(),
        message: e.to_string(),
    })
}

/// Checks that a profile can drive the generator without panicking or
/// producing out-of-contract rows.
///
/// # Errors
///
/// Returns [`GenerateError::InvalidProfile`] describing the first problem
/// found, or [`GenerateError::UnknownZone`] if a registered zone has no
/// weight.
pub fn validate(profile: &GenerationProfile) -> Result<(), GenerateError> {
    let invalid = |message: String| GenerateError::InvalidProfile {
        id: profile.id.clone(),
        message,
    };

    if profile.rows == 0 {
        return Err(invalid("rows must be positive".to_string()));
    }
    if let Some(month) = profile
        .festival_months
        .iter()
        .find(|m| !(1..=12).contains(*m))
    {
        return Err(invalid(format!("festival month {month} is not 1-12")));
    }
    if !(0.0..=1.0).contains(&profile.festival_trigger_threshold) {
        return Err(invalid(format!(
            "festival_trigger_threshold {} is not in [0, 1]",
            profile.festival_trigger_threshold
        )));
    }
    if !(0.0..=1.0).contains(&profile.off_festival_noise) {
        return Err(invalid(format!(
            "off_festival_noise {} is not in [0, 1]",
            profile.off_festival_noise
        )));
    }
    if !(1..=28).contains(&profile.max_day_of_month) {
        return Err(invalid(format!(
            "max_day_of_month {} is not 1-28",
            profile.max_day_of_month
        )));
    }
    for (label, signal) in [("complaint", profile.complaint), ("crowd", profile.crowd)] {
        if signal.base.min < 0.0 || signal.base.min > signal.base.max {
            return Err(invalid(format!(
                "{label} base range [{}, {}] is empty or negative",
                signal.base.min, signal.base.max
            )));
        }
        if signal.festival_factor < 0.0 {
            return Err(invalid(format!("{label} festival_factor is negative")));
        }
    }
    if profile.weather.min > profile.weather.max {
        return Err(invalid(format!(
            "weather range [{}, {}] is empty",
            profile.weather.min, profile.weather.max
        )));
    }
    if let WardSampling::Weighted { demo_share } = profile.sampling {
        if !(0.0..=1.0).contains(&demo_share) {
            return Err(invalid(format!("demo_share {demo_share} is not in [0, 1]")));
        }
    }
    if let Some(label) = profile.unregistered_zones().first() {
        return Err(invalid(format!("zone weight for unregistered zone '{label}'")));
    }
    for (label, weight) in &profile.zone_weights {
        if !(0.0..=1.0).contains(weight) {
            return Err(invalid(format!("zone weight {weight} for '{label}' is not in [0, 1]")));
        }
    }
    for zone in Zone::all() {
        profile.zone_weight(*zone)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use wpi_signal_models::AggregatorVariant;

    #[test]
    fn loads_all_profiles() {
        let profiles = all_profiles();
        assert_eq!(
            profiles.len(),
            EXPECTED_PROFILE_COUNT,
            "Expected {EXPECTED_PROFILE_COUNT} generation profiles, found {}. \
             Update EXPECTED_PROFILE_COUNT after adding/removing profiles.",
            profiles.len()
        );
    }

    #[test]
    fn profile_ids_are_unique_and_match_registry_keys() {
        let mut seen = BTreeSet::new();
        for ((key, _), profile) in PROFILE_TOMLS.iter().zip(all_profiles()) {
            assert_eq!(*key, profile.id, "registry key does not match profile id");
            assert!(seen.insert(profile.id.clone()), "Duplicate profile ID: {}", profile.id);
        }
    }

    #[test]
    fn all_profiles_validate() {
        for profile in all_profiles() {
            validate(&profile).unwrap_or_else(|e| panic!("{}: {e}", profile.id));
        }
    }

    #[test]
    fn every_registered_ward_zone_has_a_weight() {
        for profile in all_profiles() {
            for ward in wpi_ward::all() {
                assert!(
                    profile.zone_weight(ward.zone).is_ok(),
                    "{}: no weight for {} ({})",
                    profile.id,
                    ward.zone,
                    ward.name
                );
            }
        }
    }

    #[test]
    fn default_profile_is_registered() {
        assert!(profile_ids().contains(&DEFAULT_PROFILE_ID));
        assert!(profile(DEFAULT_PROFILE_ID).is_ok());
    }

    #[test]
    fn profile_versions_differ() {
        let v1 = profile("v1").unwrap();
        let v2 = profile("v2").unwrap();
        assert_eq!(v1.aggregator, AggregatorVariant::VariantA);
        assert_eq!(v2.aggregator, AggregatorVariant::VariantB);
        assert_eq!(v1.festival_months, vec![8, 9, 10]);
        assert_eq!(v2.festival_months, vec![3, 8, 9, 10, 11]);
        assert!((v1.festival_trigger_threshold - 0.35).abs() < f64::EPSILON);
        assert!((v2.festival_trigger_threshold - 0.25).abs() < f64::EPSILON);
        assert_eq!(v1.sampling, WardSampling::Weighted { demo_share: 0.7 });
        assert_eq!(v2.sampling, WardSampling::Uniform);
    }

    #[test]
    fn unknown_profile() {
        assert!(matches!(
            profile("v9"),
            Err(GenerateError::UnknownProfile { id }) if id == "v9"
        ));
    }

    #[test]
    fn rejects_inverted_ranges() {
        let mut profile = profile("v1").unwrap();
        profile.complaint.base.min = 90.0;
        assert!(matches!(
            validate(&profile),
            Err(GenerateError::InvalidProfile { .. })
        ));
    }

    #[test]
    fn rejects_missing_zone_weight() {
        let mut profile = profile("v1").unwrap();
        profile.zone_weights.remove("Central");
        assert!(matches!(validate(&profile), Err(GenerateError::UnknownZone(_))));
    }
}
