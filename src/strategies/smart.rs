//! Smart strategy: priority-scored round robin, then a cleanup pass
//!
//! 1. Incoming caps are fixed from overrides, town center level and troop
//!    capacity, without touching the roster's own fields.
//! 2. Owners reinforce their farms.
//! 3. Online and offline_empty players reinforce each other. Each source
//!    prefers targets ranked no higher than itself and, among those, the one
//!    with the highest base score per incoming slot. A source with no such
//!    target falls back to the lowest-valued target available.
//! 4. Remaining marches (farms included) go to offline_not_empty players,
//!    always to the least reinforced one that someone can still serve.

use super::AssignmentAlgorithm;
use crate::assignment::{assign_farm_priority, Ledger, Snapshot, SourceOrder};
use crate::core::config::EngineConfig;
use crate::core::types::{Character, Presence, Status};
use crate::roster::{effective_marches, incoming_cap, IncomingCapPolicy};

pub struct SmartAlgorithm {
    config: EngineConfig,
}

impl SmartAlgorithm {
    pub const NAME: &'static str = "smart";

    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    fn outgoing_capacity(&self, c: &Character) -> u32 {
        if c.status == Status::Unknown {
            0
        } else {
            effective_marches(c.marches_count, &self.config.marches)
        }
    }

    /// Status multiplier times confidence; 0 for offline_not_empty
    fn base_score(&self, presence: Presence, confidence: f64) -> f64 {
        let multiplier = match presence {
            Presence::Online => self.config.smart.online_multiplier,
            Presence::OfflineEmpty => self.config.smart.offline_empty_multiplier,
            Presence::OfflineNotEmpty => 0.0,
        };
        multiplier * confidence
    }

    /// Phase 3 target choice for `source`
    fn pick_prioritized(
        ledger: &Ledger,
        base: &[f64],
        source: usize,
        participants: &[usize],
    ) -> Option<usize> {
        let value = |t: usize| base[t] / f64::from(ledger.in_cap(t).max(1));
        let candidates: Vec<usize> = participants
            .iter()
            .copied()
            .filter(|&t| ledger.can_assign(source, t))
            .collect();

        let mut best: Option<(usize, f64)> = None;
        for &t in candidates.iter().filter(|&&t| base[t] <= base[source]) {
            let v = value(t);
            match best {
                Some((_, b)) if v <= b => {}
                _ => best = Some((t, v)),
            }
        }
        if best.is_some() {
            return best.map(|(t, _)| t);
        }

        // Nobody ranked at or below the source: take the least valuable target
        let mut fallback: Option<(usize, f64)> = None;
        for &t in &candidates {
            let v = value(t);
            match fallback {
                Some((_, b)) if v >= b => {}
                _ => fallback = Some((t, v)),
            }
        }
        fallback.map(|(t, _)| t)
    }

    fn prioritized_round_robin(
        &self,
        snapshot: &Snapshot,
        ledger: &mut Ledger,
        order: &mut SourceOrder,
    ) -> usize {
        let base: Vec<f64> = (0..snapshot.len())
            .map(|i| self.base_score(snapshot.presence[i], snapshot.confidence[i]))
            .collect();
        let participants = snapshot.select(|i| snapshot.presence[i] != Presence::OfflineNotEmpty);
        let sources: Vec<usize> = participants
            .iter()
            .copied()
            .filter(|&i| !snapshot.is_farm(i))
            .collect();
        let sources = order.ranked(&sources, |i| base[i]);

        let mut assigned = 0;
        loop {
            let mut made = 0;
            for &s in &sources {
                if ledger.remaining(s) == 0 {
                    continue;
                }
                if let Some(t) = Self::pick_prioritized(ledger, &base, s, &participants) {
                    if ledger.try_assign(s, t) {
                        made += 1;
                    }
                }
            }
            if made == 0 {
                break;
            }
            assigned += made;
        }

        tracing::debug!(assigned, "smart prioritized round robin");
        assigned
    }

    fn cleanup(&self, snapshot: &Snapshot, ledger: &mut Ledger, order: &mut SourceOrder) -> usize {
        let targets = snapshot.select(|i| snapshot.presence[i] == Presence::OfflineNotEmpty);
        let mut sources = snapshot.select(|i| {
            snapshot.presence[i] != Presence::OfflineNotEmpty && ledger.remaining(i) > 0
        });
        order.shuffle(&mut sources);

        let mut skipped = vec![false; snapshot.len()];
        let mut assigned = 0;

        while sources.iter().any(|&s| ledger.remaining(s) > 0) {
            let Some(target) = targets
                .iter()
                .copied()
                .filter(|&t| !skipped[t] && !ledger.is_full(t))
                .min_by_key(|&t| ledger.incoming(t))
            else {
                break;
            };

            match sources.iter().copied().find(|&s| ledger.can_assign(s, target)) {
                Some(source) => {
                    if ledger.try_assign(source, target) {
                        assigned += 1;
                    }
                }
                None => skipped[target] = true,
            }
        }

        tracing::debug!(assigned, "smart cleanup");
        assigned
    }
}

impl AssignmentAlgorithm for SmartAlgorithm {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn description(&self) -> &str {
        "Smart allocation strategy prioritizing active players and farm utilization."
    }

    fn solve(&self, roster: &[Character]) -> Vec<Character> {
        let snapshot = Snapshot::new(roster, self.config.default_confidence);

        let out_caps = snapshot
            .characters
            .iter()
            .map(|c| self.outgoing_capacity(c))
            .collect();
        let in_caps = snapshot
            .characters
            .iter()
            .map(|c| incoming_cap(c, IncomingCapPolicy::TownCenter, &self.config))
            .collect();
        let weights = snapshot.confidence.iter().map(|c| c.max(0.0)).collect();
        let mut ledger =
            Ledger::new(out_caps, in_caps, weights).with_identity(snapshot.identity());
        let mut order = SourceOrder::new(self.config.tie_break);

        assign_farm_priority(&snapshot, &mut ledger);
        self.prioritized_round_robin(&snapshot, &mut ledger, &mut order);
        self.cleanup(&snapshot, &mut ledger, &mut order);

        tracing::info!(
            algorithm = Self::NAME,
            characters = snapshot.len(),
            edges = ledger.total_edges(),
            unused_marches = ledger.total_remaining(),
            "assignment complete"
        );

        snapshot.into_characters(&ledger, &self.config.marches, true)
    }
}
