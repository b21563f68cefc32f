//! Feature derivation strategies.
//!
//! The synthesis strategy and the inference strategy compute the same five
//! signals with deliberately different heuristics and value ranges. A model
//! must be scored with features from the same strategy family it will see
//! in production, so callers pick one explicitly; there is no shared entry
//! point.

use chrono::{Datelike, Weekday};
use rand::Rng;
use wpi_signal_models::{FeatureSet, GenerationProfile};
use wpi_ward_models::{UnknownZoneError, Zone};

use crate::round2;

/// Months treated as the monsoon at inference time.
pub const MONSOON_MONTHS: [u32; 4] = [6, 7, 8, 9];

/// Festival intensity for `month` at inference time.
///
/// September carries Ganesh Chaturthi, October and November Navratri and
/// Diwali, March and August Holi and local fairs.
#[must_use]
pub const fn calendar_festival_intensity(month: u32) -> f64 {
    match month {
        9 => 0.9,
        10 | 11 => 0.8,
        3 | 8 => 0.4,
        _ => 0.0,
    }
}

/// Returns whether `weekday` falls on Saturday or Sunday.
#[must_use]
pub const fn is_weekend(weekday: Weekday) -> bool {
    weekday.num_days_from_monday() >= 5
}

/// Derives the inference-time feature set for `date`.
///
/// Deterministic and calendar-only: the same date always yields the same
/// features.
#[must_use]
pub fn derive_for_inference<D: Datelike>(date: &D) -> FeatureSet {
    let month = date.month();
    let weekend = is_weekend(date.weekday());

    let festival_intensity = calendar_festival_intensity(month);
    let complaint_intensity = (0.4 + festival_intensity + if weekend { 0.2 } else { 0.0 }).min(1.0);
    let crowd_index = (0.3 + festival_intensity + if weekend { 0.3 } else { 0.0 }).min(1.0);
    let weather_risk = if MONSOON_MONTHS.contains(&month) {
        0.8
    } else {
        0.3
    };

    FeatureSet {
        is_festival_window: festival_intensity > 0.0,
        festival_intensity,
        complaint_intensity,
        crowd_index,
        weather_risk,
    }
}

/// Derives a randomized feature set for a synthetic training row.
///
/// Only the month of `date` matters. A festival window opens when the
/// month is one of the profile's festival months and a uniform draw beats
/// the profile's trigger threshold; intensity then equals the zone weight.
/// Outside a window intensity is small noise rounded to two decimals.
/// Complaint and crowd values are truncated to integers.
///
/// # Errors
///
/// Returns [`UnknownZoneError`] if the profile has no weight for `zone`,
/// whether or not a window opens.
pub fn derive_for_synthesis<D: Datelike, R: Rng + ?Sized>(
    date: &D,
    zone: Zone,
    profile: &GenerationProfile,
    rng: &mut R,
) -> Result<FeatureSet, UnknownZoneError> {
    let zone_weight = profile.zone_weight(zone)?;

    let is_festival_window = profile.is_festival_month(date.month())
        && rng.random::<f64>() > profile.festival_trigger_threshold;

    let festival_intensity = if is_festival_window {
        zone_weight
    } else {
        round2(rng.random_range(0.0..=profile.off_festival_noise))
    };

    let complaint = profile.complaint;
    let complaint_intensity = (rng.random_range(complaint.base.min..=complaint.base.max)
        * festival_intensity.mul_add(complaint.festival_factor, 1.0))
    .trunc();

    let crowd = profile.crowd;
    let crowd_index = (rng.random_range(crowd.base.min..=crowd.base.max)
        * festival_intensity.mul_add(crowd.festival_factor, 1.0))
    .trunc();

    let weather_risk = f64::from(rng.random_range(profile.weather.min..=profile.weather.max));

    Ok(FeatureSet {
        is_festival_window,
        festival_intensity,
        complaint_intensity,
        crowd_index,
        weather_risk,
    })
}
