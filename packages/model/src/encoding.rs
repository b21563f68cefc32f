//! Model input encoding.
//!
//! The regression model was fitted on a fixed column set. Zone is one-hot
//! encoded with `Central` as the dropped baseline; since `Island City` has
//! no column of its own it also encodes as all zeros.

use serde::Serialize;
use wpi_signal_models::FeatureSet;
use wpi_ward::Zone;

use crate::EncodingError;
use crate::encoder::LabelEncoder;

/// Number of model input columns.
pub const COLUMN_COUNT: usize = 12;

/// Zone one-hot indicators.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ZoneOneHot {
    pub east: bool,
    pub north: bool,
    pub south: bool,
    pub west: bool,
}

impl ZoneOneHot {
    /// Encodes a zone label. Any label other than the four indicator zones,
    /// including `Central` and `Island City`, yields all zeros.
    #[must_use]
    pub fn for_label(label: &str) -> Self {
        Self {
            east: label == Zone::East.as_ref(),
            north: label == Zone::North.as_ref(),
            south: label == Zone::South.as_ref(),
            west: label == Zone::West.as_ref(),
        }
    }

    /// Number of set indicators. At most one.
    #[must_use]
    pub fn count(self) -> usize {
        [self.east, self.north, self.south, self.west]
            .into_iter()
            .filter(|set| *set)
            .count()
    }
}

/// One row of model input, in fitted column order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EncodedModelInput {
    pub month: u32,
    pub day_of_month: u32,
    pub features: FeatureSet,
    pub ward_coded: usize,
    pub zone: ZoneOneHot,
}

impl EncodedModelInput {
    /// Column names in the order the model was fitted on.
    pub const COLUMNS: [&'static str; COLUMN_COUNT] = [
        "month",
        "day_of_month",
        "is_festival_window",
        "festival_intensity",
        "complaint_intensity",
        "crowd_index",
        "weather_risk",
        "ward_coded",
        "zone_East",
        "zone_North",
        "zone_South",
        "zone_West",
    ];

    /// Returns the numeric row in [`Self::COLUMNS`] order.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn values(&self) -> [f64; COLUMN_COUNT] {
        let indicator = |set: bool| if set { 1.0 } else { 0.0 };
        [
            f64::from(self.month),
            f64::from(self.day_of_month),
            f64::from(self.features.festival_flag()),
            self.features.festival_intensity,
            self.features.complaint_intensity,
            self.features.crowd_index,
            self.features.weather_risk,
            self.ward_coded as f64,
            indicator(self.zone.east),
            indicator(self.zone.north),
            indicator(self.zone.south),
            indicator(self.zone.west),
        ]
    }
}

/// Encodes ward and zone labels with the fitted ward encoder.
#[derive(Debug, Clone)]
pub struct EncodingAdapter {
    wards: LabelEncoder,
}

impl EncodingAdapter {
    #[must_use]
    pub const fn new(wards: LabelEncoder) -> Self {
        Self { wards }
    }

    #[must_use]
    pub const fn ward_encoder(&self) -> &LabelEncoder {
        &self.wards
    }

    /// Encodes a ward name and zone label.
    ///
    /// # Errors
    ///
    /// Returns [`EncodingError::UnseenWard`] if the encoder was not fitted
    /// on `ward_name`, or [`EncodingError::UnknownZone`] if `zone` is not a
    /// registered zone label.
    pub fn encode(&self, ward_name: &str, zone: &str) -> Result<(usize, ZoneOneHot), EncodingError> {
        let code = self.wards.transform(ward_name)?;
        if Zone::from_label(zone).is_err() {
            return Err(EncodingError::UnknownZone {
                zone: zone.to_string(),
            });
        }
        Ok((code, ZoneOneHot::for_label(zone)))
    }

    /// Builds a full model input row.
    ///
    /// # Errors
    ///
    /// Propagates [`Self::encode`] failures.
    pub fn encode_row(
        &self,
        month: u32,
        day_of_month: u32,
        features: FeatureSet,
        ward_name: &str,
        zone: &str,
    ) -> Result<EncodedModelInput, EncodingError> {
        let (ward_coded, zone) = self.encode(ward_name, zone)?;
        Ok(EncodedModelInput {
            month,
            day_of_month,
            features,
            ward_coded,
            zone,
        })
    }
}
