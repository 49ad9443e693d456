//! Aggregate view of an assigned roster
//!
//! Expected reinforcement of a character is the summed confidence of the
//! characters reinforcing it. A character "holds" when that sum reaches the
//! survival threshold.

use ahash::AHashMap;
use serde::Serialize;

use crate::core::config::{EngineConfig, MarchLimits};
use crate::core::types::{Character, CharacterId, Presence};
use crate::roster::{effective_marches, normalize_status, resolve_confidence};

/// Totals for one presence group
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GroupReport {
    pub characters: usize,
    /// Characters whose expected reinforcement reaches the threshold
    pub holding: usize,
    pub expected_reinforcement: f64,
    pub incoming_edges: usize,
}

impl GroupReport {
    pub fn average_expected(&self) -> f64 {
        if self.characters == 0 {
            0.0
        } else {
            self.expected_reinforcement / self.characters as f64
        }
    }
}

/// Report over a whole roster
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RosterReport {
    pub online: GroupReport,
    pub offline_empty: GroupReport,
    pub offline_not_empty: GroupReport,
    pub total_edges: usize,
    /// Marches not used by any edge, counting each character's normalized
    /// `marchesCount`
    ///
    /// This is roster-level capacity. Characters a strategy bars from
    /// sending (farms, unknown or offline_not_empty under greedy) still
    /// count, so it can exceed the unused total a strategy logs.
    pub unused_marches: u64,
    pub survival_threshold: f64,
}

impl RosterReport {
    pub fn build(roster: &[Character], survival_threshold: f64, config: &EngineConfig) -> Self {
        let mut expected: AHashMap<&CharacterId, (f64, usize)> = AHashMap::new();
        let mut total_edges = 0;
        let mut unused_marches = 0u64;

        for source in roster {
            let weight = resolve_confidence(source, config.default_confidence);
            for edge in &source.reinforce {
                let entry = expected.entry(&edge.target_id).or_insert((0.0, 0));
                entry.0 += weight;
                entry.1 += 1;
            }
            total_edges += source.reinforce.len();
            unused_marches += unused(source, &config.marches);
        }

        let mut report = RosterReport {
            total_edges,
            unused_marches,
            survival_threshold,
            ..Default::default()
        };

        for c in roster {
            let (sum, edges) = expected.get(&c.id).copied().unwrap_or((0.0, 0));
            let group = match normalize_status(c.status) {
                Presence::Online => &mut report.online,
                Presence::OfflineEmpty => &mut report.offline_empty,
                Presence::OfflineNotEmpty => &mut report.offline_not_empty,
            };
            group.characters += 1;
            group.expected_reinforcement += sum;
            group.incoming_edges += edges;
            if sum >= survival_threshold {
                group.holding += 1;
            }
        }

        report
    }
}

fn unused(source: &Character, limits: &MarchLimits) -> u64 {
    let capacity = u64::from(effective_marches(source.marches_count, limits));
    capacity.saturating_sub(source.reinforce.len() as u64)
}
