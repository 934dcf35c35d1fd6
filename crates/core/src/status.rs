//! Controlled vocabulary for equipment availability.
//!
//! Status text arrives from many places (data files, operator input) with
//! inconsistent casing and a handful of historical aliases. Everything funnels
//! through [`EquipmentStatus::normalize`] so the rest of the system only ever
//! sees the four canonical values.

use std::str::FromStr;

/// Operational state of a piece of equipment.
///
/// Display renders the canonical wire form (`AVAILABLE`, `IN_USE`,
/// `MAINTENANCE`, `DOWN`). Parsing additionally accepts the legacy aliases
/// listed per variant, ignoring case and surrounding whitespace.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[strum(ascii_case_insensitive)]
pub enum EquipmentStatus {
    /// Free to be reserved.
    #[default]
    #[strum(to_string = "AVAILABLE", serialize = "AVAIL")]
    Available,
    /// Occupied by an active reservation.
    #[strum(to_string = "IN_USE", serialize = "IN USE", serialize = "INUSE", serialize = "BUSY")]
    InUse,
    /// Taken offline for scheduled upkeep.
    #[strum(to_string = "MAINTENANCE", serialize = "MAINT")]
    Maintenance,
    /// Broken, awaiting repair.
    #[strum(to_string = "DOWN", serialize = "BROKEN")]
    Down,
}

impl EquipmentStatus {
    /// Map arbitrary status text onto the canonical vocabulary.
    ///
    /// Input is trimmed and matched case-insensitively against the canonical
    /// names and their aliases. Anything unrecognized collapses to
    /// [`EquipmentStatus::Available`], so a mangled status field can never
    /// take a record out of circulation. Canonical values map to themselves,
    /// which makes repeated normalization a no-op.
    pub fn normalize(input: &str) -> Self {
        Self::from_str(input.trim()).unwrap_or_default()
    }

    /// Short human-readable explanation of the status.
    pub fn description(self) -> &'static str {
        match self {
            Self::Available => "Available for reservation",
            Self::InUse => "Currently being used",
            Self::Maintenance => "Under maintenance",
            Self::Down => "Out of order",
        }
    }

    pub fn is_available(self) -> bool {
        matches!(self, Self::Available)
    }
}
