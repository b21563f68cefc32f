//! Synthetic training dataset generator.
//!
//! Each row is an independent draw: a ward picked by the profile's
//! sampling policy, a random month and day, synthesis-strategy features,
//! and a WPI label from the profile's aggregator variant. The random
//! source is injected so runs are reproducible under a fixed seed.

use chrono::NaiveDate;
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::Serialize;
use wpi_signal_models::{GenerationProfile, TrainingRow, WardSampling};
use wpi_ward::{Roster, Ward};

use crate::GenerateError;
use crate::aggregate::aggregate_features;
use crate::derive::derive_for_synthesis;
use crate::profiles;
use crate::progress::ProgressCallback;

/// Year used to turn drawn month/day pairs into dates. Only the month
/// feeds the synthesis strategy; a leap year keeps every `1..=28` day
/// valid.
pub const REFERENCE_YEAR: i32 = 2024;

/// Drives the synthesis strategy and aggregator across random draws.
#[derive(Debug, Clone)]
pub struct DatasetGenerator {
    profile: GenerationProfile,
    sampling: WardSampling,
}

impl DatasetGenerator {
    /// Creates a generator for a validated `profile`, sampling wards with
    /// the profile's own policy.
    ///
    /// # Errors
    ///
    /// Returns an error if the profile fails [`profiles::validate`].
    pub fn new(profile: GenerationProfile) -> Result<Self, GenerateError> {
        profiles::validate(&profile)?;
        let sampling = profile.sampling;
        Ok(Self { profile, sampling })
    }

    /// Replaces the ward sampling policy.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::InvalidDemoShare`] if a weighted policy's
    /// demo share is outside `[0, 1]` or NaN.
    pub fn with_sampling(mut self, sampling: WardSampling) -> Result<Self, GenerateError> {
        if let WardSampling::Weighted { demo_share } = sampling
            && !(0.0..=1.0).contains(&demo_share)
        {
            return Err(GenerateError::InvalidDemoShare { demo_share });
        }
        self.sampling = sampling;
        Ok(self)
    }

    /// Returns the generation profile.
    #[must_use]
    pub const fn profile(&self) -> &GenerationProfile {
        &self.profile
    }

    /// Returns the active ward sampling policy.
    #[must_use]
    pub const fn sampling(&self) -> WardSampling {
        self.sampling
    }

    /// Picks a ward according to the sampling policy.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::EmptyRegistry`] or
    /// [`GenerateError::EmptyRoster`] if there is no ward to draw from.
    pub fn choose_ward<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<&'static Ward, GenerateError> {
        match self.sampling {
            WardSampling::Uniform => wpi_ward::all()
                .choose(rng)
                .ok_or(GenerateError::EmptyRegistry),
            WardSampling::Weighted { demo_share } => {
                let roster = if rng.random::<f64>() < demo_share {
                    Roster::Demo
                } else {
                    Roster::Extra
                };
                wpi_ward::wards_in(roster)
                    .choose(rng)
                    .copied()
                    .ok_or(GenerateError::EmptyRoster { roster })
            }
        }
    }

    /// Generates one labeled row.
    ///
    /// # Errors
    ///
    /// Returns an error if the ward's zone has no weight in the profile or
    /// the sampling policy hits an empty roster.
    pub fn generate_row<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<TrainingRow, GenerateError> {
        let ward = self.choose_ward(rng)?;

        let month = rng.random_range(1..=12);
        let day = rng.random_range(1..=self.profile.max_day_of_month);
        let date = NaiveDate::from_ymd_opt(REFERENCE_YEAR, month, day)
            .ok_or(GenerateError::InvalidDate { month, day })?;

        let features = derive_for_synthesis(&date, ward.zone, &self.profile, rng)?;
        let wpi = aggregate_features(self.profile.aggregator, &features);

        Ok(TrainingRow {
            ward_id: ward.id.to_string(),
            ward_name: ward.name.to_string(),
            zone: ward.zone.to_string(),
            month,
            day_of_month: day,
            features,
            wpi,
        })
    }

    /// Generates `rows` labeled rows in draw order.
    ///
    /// Any failure aborts the whole run; rows are never skipped.
    ///
    /// # Errors
    ///
    /// Returns the first error hit by [`Self::generate_row`].
    pub fn generate<R: Rng + ?Sized>(
        &self,
        rows: usize,
        rng: &mut R,
        progress: &dyn ProgressCallback,
    ) -> Result<Vec<TrainingRow>, GenerateError> {
        log::debug!(
            "Generating {rows} rows with profile {} ({:?} sampling)",
            self.profile.id,
            self.sampling
        );

        progress.set_total(rows as u64);
        progress.set_message(format!("Generating rows ({})", self.profile.id));

        let mut out = Vec::with_capacity(rows);
        for _ in 0..rows {
            out.push(self.generate_row(rng)?);
            progress.inc(1);
        }

        progress.finish(format!("Generated {} rows", out.len()));
        Ok(out)
    }
}

/// Aggregate statistics over a generated dataset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetSummary {
    /// Number of rows.
    pub rows: usize,
    /// Mean WPI label.
    pub mean_wpi: f64,
    /// Highest WPI label.
    pub max_wpi: u32,
    /// Share of rows inside a festival window.
    pub festival_share: f64,
}

impl DatasetSummary {
    /// Computes summary statistics for `rows`. An empty slice yields all
    /// zeros.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_rows(rows: &[TrainingRow]) -> Self {
        if rows.is_empty() {
            return Self {
                rows: 0,
                mean_wpi: 0.0,
                max_wpi: 0,
                festival_share: 0.0,
            };
        }

        let total: u64 = rows.iter().map(|row| u64::from(row.wpi)).sum();
        let festival = rows
            .iter()
            .filter(|row| row.features.is_festival_window)
            .count();

        Self {
            rows: rows.len(),
            mean_wpi: total as f64 / rows.len() as f64,
            max_wpi: rows.iter().map(|row| row.wpi).max().unwrap_or(0),
            festival_share: festival as f64 / rows.len() as f64,
        }
    }
}
