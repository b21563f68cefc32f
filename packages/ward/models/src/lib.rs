#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Ward, zone, and roster types for the waste pressure index.
//!
//! This crate defines the administrative units scored by the index. A
//! [`Ward`] is the smallest scored unit and always belongs to exactly one
//! [`Zone`]. Zones group wards that share a festival-intensity weight
//! during synthetic data generation.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Geographic grouping of wards.
///
/// The string forms match the labels the ward encoder and the frontend
/// use, including the space in `"Island City"`.
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
pub enum Zone {
    /// Southern tip of the city (Colaba, Worli).
    South,
    /// Island City wards (Fort, Churchgate, Cuffe Parade).
    #[serde(rename = "Island City")]
    #[strum(serialize = "Island City")]
    IslandCity,
    /// Central wards (Dadar, Parel, Byculla).
    Central,
    /// Western suburbs (Bandra, Andheri, Juhu).
    West,
    /// Eastern suburbs (Kurla, Ghatkopar, Vikhroli).
    East,
    /// Northern suburbs (Borivali, Mulund, Dahisar).
    North,
}

impl Zone {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::South,
            Self::IslandCity,
            Self::Central,
            Self::West,
            Self::East,
            Self::North,
        ]
    }

    /// Parses a zone label, failing with [`UnknownZoneError`] for labels
    /// outside the registered set.
    ///
    /// # Errors
    ///
    /// Returns an error if `label` is not one of the registered zones.
    pub fn from_label(label: &str) -> Result<Self, UnknownZoneError> {
        label.parse().map_err(|_| UnknownZoneError {
            zone: label.to_string(),
        })
    }
}

/// Which ward list a ward was registered under.
///
/// Demo wards are the fixed set shown in the dashboard; extra wards pad
/// out the training data with non-critical identifiers.
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
pub enum Roster {
    /// Fixed demo wards (`W001`..`W008`).
    Demo,
    /// Extra wards (`X001`..`X012`).
    Extra,
}

/// A municipal ward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Ward {
    /// Stable ward code (e.g. `"W001"`).
    pub id: &'static str,
    /// Display name (e.g. `"Colaba"`).
    pub name: &'static str,
    /// Zone the ward belongs to.
    pub zone: Zone,
    /// Roster the ward was registered under.
    pub roster: Roster,
}

impl Ward {
    /// Creates a ward definition. Used to build the static registry.
    #[must_use]
    pub const fn new(id: &'static str, name: &'static str, zone: Zone, roster: Roster) -> Self {
        Self {
            id,
            name,
            zone,
            roster,
        }
    }
}

/// Error returned when a ward id or name is not in the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownWardError {
    /// The id or name that was looked up.
    pub key: String,
}

impl std::fmt::Display for UnknownWardError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown ward '{}'", self.key)
    }
}

impl std::error::Error for UnknownWardError {}

/// Error returned when a zone label is not registered, or a weight table
/// has no entry for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownZoneError {
    /// The zone label that was looked up.
    pub zone: String,
}

impl std::fmt::Display for UnknownZoneError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown zone '{}'", self.zone)
    }
}

impl std::error::Error for UnknownZoneError {}
