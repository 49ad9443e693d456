//! Status and confidence normalization

use crate::core::types::{Character, Presence, Status};

/// Map a raw status to its canonical presence.
///
/// Only `online` and `offline_empty` are taken at face value; everything
/// else (unknown, unset, legacy values) is treated as a player who is
/// offline with troops at home.
pub fn normalize_status(raw: Status) -> Presence {
    match raw {
        Status::Online => Presence::Online,
        Status::OfflineEmpty => Presence::OfflineEmpty,
        Status::OfflineNotEmpty | Status::Unknown => Presence::OfflineNotEmpty,
    }
}

/// Confidence weight of a character, `baseline` when unset or not a number
pub fn resolve_confidence(character: &Character, baseline: f64) -> f64 {
    match character.confidence_level {
        Some(c) if c.is_finite() => c,
        _ => baseline,
    }
}
