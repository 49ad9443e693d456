//! Outgoing capacity and incoming cap resolution
//!
//! Caps are computed once per run, before any assignment phase, and are
//! never recomputed while edges are being added.

use crate::core::config::{EngineConfig, MarchLimits, SmartConfig};
use crate::core::types::Character;

/// Effective outgoing capacity for a raw `marchesCount`
///
/// A raw 0 means "use the default"; the result is then clamped to the
/// configured bounds.
pub fn effective_marches(raw: i32, limits: &MarchLimits) -> u32 {
    let count = if raw == 0 {
        i64::from(limits.default_when_zero)
    } else {
        i64::from(raw)
    };
    count.clamp(i64::from(limits.min), i64::from(limits.max)) as u32
}

/// Where a target's incoming cap comes from when it has no explicit override
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncomingCapPolicy {
    /// No default limit; only troop capacity (if known) restricts the target
    Unbounded,
    /// Default derived from town center level, further capped by troop capacity
    TownCenter,
}

/// Incoming cap implied by an absolute troop capacity
pub fn capacity_derived_cap(character: &Character, troops_per_march: u64) -> Option<u32> {
    character
        .reinforcement_capacity
        .map(|troops| (troops / troops_per_march.max(1)).min(u64::from(u32::MAX)) as u32)
}

/// Default cap from town center level
fn town_center_default(character: &Character, smart: &SmartConfig) -> u32 {
    match character.town_center_level {
        Some(level) if level >= smart.town_center_threshold => smart.high_town_center_cap,
        _ => smart.low_town_center_cap,
    }
}

/// Effective incoming cap of a character under `policy`
///
/// Explicit override and capacity-derived cap are both honored when
/// present; the smaller wins.
pub fn incoming_cap(character: &Character, policy: IncomingCapPolicy, config: &EngineConfig) -> u32 {
    let base = match (character.max_reinforcement_marches, policy) {
        (Some(explicit), _) => Some(explicit),
        (None, IncomingCapPolicy::TownCenter) => Some(town_center_default(character, &config.smart)),
        (None, IncomingCapPolicy::Unbounded) => None,
    };
    let derived = capacity_derived_cap(character, config.troops_per_march);

    match (base, derived) {
        (Some(b), Some(d)) => b.min(d),
        (Some(b), None) => b,
        (None, Some(d)) => d,
        (None, None) => config.unbounded_incoming_cap,
    }
}
