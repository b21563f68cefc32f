#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Static ward registry.
//!
//! Every ward the index knows about is listed once in [`WARDS`]. The ids
//! of the demo roster match the ids the dashboard uses, so they must not
//! be renumbered.

pub use wpi_ward_models::{Roster, UnknownWardError, UnknownZoneError, Ward, Zone};

/// Number of registered wards. Enforced by a test.
#[cfg(test)]
const EXPECTED_WARD_COUNT: usize = 20;

/// All registered wards, demo roster first.
pub const WARDS: &[Ward] = &[
    Ward::new("W001", "Colaba", Zone::South, Roster::Demo),
    Ward::new("W002", "Bandra West", Zone::West, Roster::Demo),
    Ward::new("W003", "Andheri East", Zone::West, Roster::Demo),
    Ward::new("W004", "Dadar", Zone::Central, Roster::Demo),
    Ward::new("W005", "Kurla", Zone::East, Roster::Demo),
    Ward::new("W006", "Borivali", Zone::North, Roster::Demo),
    Ward::new("W007", "Mulund", Zone::North, Roster::Demo),
    Ward::new("W008", "Worli", Zone::South, Roster::Demo),
    // ── Extra ───────────────────────────────────────────
    Ward::new("X001", "Fort", Zone::IslandCity, Roster::Extra),
    Ward::new("X002", "Churchgate", Zone::IslandCity, Roster::Extra),
    Ward::new("X003", "Cuffe Parade", Zone::IslandCity, Roster::Extra),
    Ward::new("X004", "Marine Lines", Zone::IslandCity, Roster::Extra),
    Ward::new("X005", "Andheri West", Zone::West, Roster::Extra),
    Ward::new("X006", "Juhu", Zone::West, Roster::Extra),
    Ward::new("X007", "Ghatkopar", Zone::East, Roster::Extra),
    Ward::new("X008", "Vikhroli", Zone::East, Roster::Extra),
    Ward::new("X009", "Parel", Zone::Central, Roster::Extra),
    Ward::new("X010", "Byculla", Zone::Central, Roster::Extra),
    Ward::new("X011", "Dahisar", Zone::North, Roster::Extra),
    Ward::new("X012", "Kandarpada", Zone::North, Roster::Extra),
];

/// Returns all registered wards.
#[must_use]
pub const fn all() -> &'static [Ward] {
    WARDS
}

/// Looks up a ward by its id (e.g. `"W004"`).
///
/// # Errors
///
/// Returns [`UnknownWardError`] if no ward has this id.
pub fn lookup_ward(id: &str) -> Result<&'static Ward, UnknownWardError> {
    WARDS
        .iter()
        .find(|ward| ward.id == id)
        .ok_or_else(|| UnknownWardError { key: id.to_string() })
}

/// Looks up a ward by its display name (e.g. `"Dadar"`).
///
/// # Errors
///
/// Returns [`UnknownWardError`] if no ward has this name.
pub fn ward_by_name(name: &str) -> Result<&'static Ward, UnknownWardError> {
    WARDS
        .iter()
        .find(|ward| ward.name == name)
        .ok_or_else(|| UnknownWardError {
            key: name.to_string(),
        })
}

/// Returns the wards registered under `roster`, in registry order.
#[must_use]
pub fn wards_in(roster: Roster) -> Vec<&'static Ward> {
    WARDS.iter().filter(|ward| ward.roster == roster).collect()
}

/// Returns the sorted, deduplicated ward names. This is the class list a
/// label encoder fitted on registry data would carry.
#[must_use]
pub fn ward_names() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = WARDS.iter().map(|ward| ward.name).collect();
    names.sort_unstable();
    names.dedup();
    names
}
