//! Display value of reinforcement edges
//!
//! An edge is worth less the more marches its target already receives.
//! Offline targets that still hold troops are worth the least.

use ahash::AHashMap;

use crate::core::config::ScoringConfig;
use crate::core::types::{Character, CharacterId, Presence};
use crate::roster::normalize_status;

/// Number of edges pointing at each character
pub fn incoming_counts(roster: &[Character]) -> AHashMap<CharacterId, usize> {
    let mut counts = AHashMap::new();
    for source in roster {
        for edge in &source.reinforce {
            *counts.entry(edge.target_id.clone()).or_insert(0) += 1;
        }
    }
    counts
}

/// Value of one edge into a target with the given presence and incoming count
pub fn edge_value(target: Presence, incoming: usize, cfg: &ScoringConfig) -> f64 {
    let count = incoming.max(1) as f64;
    match target {
        Presence::Online => cfg.online_value / count,
        Presence::OfflineEmpty => cfg.offline_empty_value / count,
        Presence::OfflineNotEmpty => {
            cfg.offline_not_empty_value / (cfg.offline_not_empty_offset + incoming as f64)
        }
    }
}

/// Fill `scoreValue` on every edge and `score` on every character
///
/// Edges into characters missing from the roster are worth 0.
pub fn finalize_scores(roster: &mut [Character], cfg: &ScoringConfig) {
    let counts = incoming_counts(roster);
    let presence: AHashMap<CharacterId, Presence> = roster
        .iter()
        .map(|c| (c.id.clone(), normalize_status(c.status)))
        .collect();

    for character in roster.iter_mut() {
        let mut total = 0.0;
        for edge in &mut character.reinforce {
            let value = match presence.get(&edge.target_id) {
                Some(&p) => edge_value(p, counts.get(&edge.target_id).copied().unwrap_or(0), cfg),
                None => 0.0,
            };
            edge.score_value = Some(value);
            total += value;
        }
        character.score = Some(total);
    }
}
