//! Greedy strategy: round-robin rounds, each source taking its best-scoring
//! target
//!
//! After farm priority, online sources get a few preferential rounds over
//! online and offline_empty targets. Then offline_empty sources (serving
//! offline players) and online sources alternate until a full alternation
//! adds nothing. A target's score drops as the confidence-weighted sum of
//! its incoming reinforcements grows, so marches spread out.
//!
//! Farms, unknown-status characters and offline_not_empty characters never
//! send marches under this strategy.

use super::AssignmentAlgorithm;
use crate::assignment::{assign_farm_priority, Ledger, Snapshot, SourceOrder};
use crate::core::config::EngineConfig;
use crate::core::types::{Character, Presence, Status};
use crate::report::finalize_scores;
use crate::roster::{effective_marches, incoming_cap, IncomingCapPolicy};

pub struct GreedyAlgorithm {
    config: EngineConfig,
}

impl GreedyAlgorithm {
    pub const NAME: &'static str = "greedy";

    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    fn outgoing_capacity(&self, c: &Character, presence: Presence) -> u32 {
        let marches = effective_marches(c.marches_count, &self.config.marches);
        let banned =
            c.is_farm() || c.status == Status::Unknown || presence == Presence::OfflineNotEmpty;
        if banned {
            0
        } else {
            marches
        }
    }

    /// Selection score of target `t` given the reinforcements it has so far
    ///
    /// A target nobody reinforces yet scores +inf, so all of them tie and
    /// the first in pool order wins.
    fn target_score(&self, snapshot: &Snapshot, ledger: &Ledger, t: usize) -> f64 {
        let g = &self.config.greedy;
        let weight = ledger.incoming_weight(t);
        let not_empty = g.offline_not_empty_base / (g.penalty + weight);

        let base = match snapshot.presence[t] {
            Presence::Online => g.online_base,
            Presence::OfflineEmpty => g.offline_empty_base,
            Presence::OfflineNotEmpty => return not_empty,
        };

        // Low confidence in the target's status pulls it toward the
        // offline_not_empty score; none at all leaves only that score
        let confidence = snapshot.confidence[t];
        if confidence <= 0.0 {
            return not_empty;
        }
        (base / weight) * confidence + (1.0 - confidence) * not_empty
    }

    /// First eligible target with the highest score
    fn pick_target(
        &self,
        snapshot: &Snapshot,
        ledger: &Ledger,
        source: usize,
        pool: &[usize],
    ) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for &t in pool {
            if !ledger.can_assign(source, t) {
                continue;
            }
            let score = self.target_score(snapshot, ledger, t);
            match best {
                Some((_, s)) if score <= s => {}
                _ => best = Some((t, score)),
            }
        }
        best.map(|(t, _)| t)
    }

    /// One pass in which every source with marches left may add one edge
    fn run_round(
        &self,
        snapshot: &Snapshot,
        ledger: &mut Ledger,
        order: &mut SourceOrder,
        sources: &[usize],
        pool: &[usize],
    ) -> usize {
        let mut made = 0;
        for s in order.ranked(sources, |i| snapshot.confidence[i]) {
            if ledger.remaining(s) == 0 {
                continue;
            }
            if let Some(t) = self.pick_target(snapshot, ledger, s, pool) {
                if ledger.try_assign(s, t) {
                    made += 1;
                }
            }
        }
        made
    }
}

impl AssignmentAlgorithm for GreedyAlgorithm {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn description(&self) -> &str {
        "Spreads marches round by round toward the least reinforced targets, online players first."
    }

    fn solve(&self, roster: &[Character]) -> Vec<Character> {
        let snapshot = Snapshot::new(roster, self.config.default_confidence);
        let n = snapshot.len();

        let out_caps = (0..n)
            .map(|i| self.outgoing_capacity(&snapshot.characters[i], snapshot.presence[i]))
            .collect();
        let in_caps = snapshot
            .characters
            .iter()
            .map(|c| incoming_cap(c, IncomingCapPolicy::Unbounded, &self.config))
            .collect();
        let weights = snapshot.confidence.iter().map(|c| c.max(0.0)).collect();
        let mut ledger =
            Ledger::new(out_caps, in_caps, weights).with_identity(snapshot.identity());
        let mut order = SourceOrder::new(self.config.tie_break);

        assign_farm_priority(&snapshot, &mut ledger);

        let presence = &snapshot.presence;
        let online_sources =
            snapshot.select(|i| presence[i] == Presence::Online && !snapshot.is_farm(i));
        let offline_sources =
            snapshot.select(|i| presence[i] == Presence::OfflineEmpty && !snapshot.is_farm(i));
        // Target pools list the higher-ranked status first so ties go to it
        let active_targets =
            snapshot.select_in_order(&[Presence::Online, Presence::OfflineEmpty]);
        let offline_targets =
            snapshot.select_in_order(&[Presence::OfflineEmpty, Presence::OfflineNotEmpty]);

        let mut preferential = 0;
        for _ in 0..self.config.greedy.preferential_rounds {
            let made = self.run_round(
                &snapshot,
                &mut ledger,
                &mut order,
                &online_sources,
                &active_targets,
            );
            if made == 0 {
                break;
            }
            preferential += made;
        }
        tracing::debug!(assigned = preferential, "greedy preferential rounds");

        let mut alternating = 0;
        loop {
            let made = self.run_round(
                &snapshot,
                &mut ledger,
                &mut order,
                &offline_sources,
                &offline_targets,
            ) + self.run_round(
                &snapshot,
                &mut ledger,
                &mut order,
                &online_sources,
                &active_targets,
            );
            if made == 0 {
                break;
            }
            alternating += made;
        }
        tracing::debug!(assigned = alternating, "greedy alternating rounds");

        tracing::info!(
            algorithm = Self::NAME,
            characters = n,
            edges = ledger.total_edges(),
            unused_marches = ledger.total_remaining(),
            "assignment complete"
        );

        let mut result = snapshot.into_characters(&ledger, &self.config.marches, true);
        finalize_scores(&mut result, &self.config.scoring);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::TieBreak;
    use crate::core::types::CharacterId;

    fn algo() -> GreedyAlgorithm {
        GreedyAlgorithm::new(EngineConfig::default().with_tie_break(TieBreak::Stable))
    }

    fn character(id: &str, status: Status, marches: i32) -> Character {
        let mut c = Character::new(id, status);
        c.marches_count = marches;
        c
    }

    fn targets_of<'a>(result: &'a [Character], id: &str) -> Vec<&'a str> {
        result
            .iter()
            .find(|c| c.id.as_str() == id)
            .map(|c| c.reinforce.iter().map(|e| e.target_id.as_str()).collect())
            .unwrap_or_default()
    }

    #[test]
    fn test_online_target_outscores_offline_empty() {
        let a = algo();
        let snapshot = Snapshot::new(
            &[
                Character::new("src", Status::Online),
                Character::new("on", Status::Online),
                Character::new("oe", Status::OfflineEmpty),
                Character::new("one", Status::OfflineNotEmpty),
            ],
            1.0,
        );
        let mut ledger = Ledger::new(vec![3, 0, 0, 0], vec![10; 4], vec![1.0; 4]);
        for t in 1..4 {
            assert!(ledger.try_assign(0, t));
        }
        let on = a.target_score(&snapshot, &ledger, 1);
        let oe = a.target_score(&snapshot, &ledger, 2);
        let one = a.target_score(&snapshot, &ledger, 3);
        assert!((on - 1.5).abs() < 1e-12);
        assert!((oe - 1.0).abs() < 1e-12);
        assert!((one - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_unreinforced_targets_tie_at_infinity() {
        let a = algo();
        let mut unsure = Character::new("unsure", Status::Online);
        unsure.confidence_level = Some(0.5);
        let snapshot = Snapshot::new(
            &[unsure, Character::new("oe", Status::OfflineEmpty)],
            1.0,
        );
        let ledger = Ledger::new(vec![0; 2], vec![10; 2], vec![1.0; 2]);
        assert_eq!(a.target_score(&snapshot, &ledger, 0), f64::INFINITY);
        assert_eq!(a.target_score(&snapshot, &ledger, 1), f64::INFINITY);
    }

    #[test]
    fn test_zero_confidence_scores_as_offline_not_empty() {
        let a = algo();
        let mut ghost = Character::new("ghost", Status::Online);
        ghost.confidence_level = Some(0.0);
        let snapshot = Snapshot::new(&[ghost], 1.0);
        let ledger = Ledger::new(vec![0], vec![10], vec![1.0]);
        let score = a.target_score(&snapshot, &ledger, 0);
        assert!((score - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_score_falls_with_incoming_weight() {
        let a = algo();
        let snapshot = Snapshot::new(
            &[
                Character::new("s", Status::Online),
                Character::new("t", Status::OfflineEmpty),
            ],
            1.0,
        );
        let mut ledger = Ledger::new(vec![1, 0], vec![10; 2], vec![1.0; 2]);
        let before = a.target_score(&snapshot, &ledger, 1);
        assert!(ledger.try_assign(0, 1));
        let after = a.target_score(&snapshot, &ledger, 1);
        assert!(after < before);
        assert!((after - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_low_confidence_blends_toward_offline_not_empty() {
        let a = algo();
        let mut sure = Character::new("sure", Status::Online);
        sure.confidence_level = Some(1.0);
        let mut unsure = Character::new("unsure", Status::Online);
        unsure.confidence_level = Some(0.5);
        let snapshot = Snapshot::new(&[Character::new("src", Status::Online), sure, unsure], 1.0);
        let mut ledger = Ledger::new(vec![2, 0, 0], vec![10; 3], vec![1.0; 3]);
        assert!(ledger.try_assign(0, 1));
        assert!(ledger.try_assign(0, 2));

        assert!(a.target_score(&snapshot, &ledger, 2) < a.target_score(&snapshot, &ledger, 1));
    }

    #[test]
    fn test_first_unreinforced_target_in_pool_order_wins() {
        let mut unsure = character("ON", Status::Online, 6);
        unsure.confidence_level = Some(0.5);
        let result = algo().solve(&[
            character("S", Status::Online, 1),
            character("OE", Status::OfflineEmpty, 6),
            unsure,
        ]);

        // Online targets come before offline_empty ones in the pool
        assert_eq!(targets_of(&result, "S"), vec!["ON"]);
    }

    #[test]
    fn test_online_pair_and_offline_empty() {
        let result = algo().solve(&[
            character("O1", Status::Online, 6),
            character("O2", Status::Online, 6),
            character("OE1", Status::OfflineEmpty, 6),
        ]);

        assert_eq!(targets_of(&result, "O1"), vec!["O2", "OE1"]);
        assert_eq!(targets_of(&result, "O2"), vec!["O1", "OE1"]);
        assert!(targets_of(&result, "OE1").is_empty());
    }

    #[test]
    fn test_offline_empty_source_mixes_targets() {
        let result = algo().solve(&[
            character("S_1", Status::OfflineEmpty, 6),
            character("T_1", Status::OfflineEmpty, 0),
            character("T_2", Status::OfflineNotEmpty, 0),
        ]);

        assert_eq!(targets_of(&result, "S_1"), vec!["T_1", "T_2"]);
    }

    #[test]
    fn test_unknown_status_never_sends() {
        let result = algo().solve(&[
            character("S_1", Status::Unknown, 6),
            character("T_1", Status::OfflineEmpty, 0),
        ]);
        assert!(targets_of(&result, "S_1").is_empty());
        assert_eq!(result[0].status, Status::OfflineNotEmpty);
    }

    #[test]
    fn test_scores_are_attached() {
        let result = algo().solve(&[
            character("S", Status::Online, 1),
            character("T", Status::OfflineEmpty, 0),
        ]);
        let s = &result[0];
        assert_eq!(s.reinforce[0].target_id, CharacterId::from("T"));
        assert_eq!(s.reinforce[0].score_value, Some(1.0));
        assert_eq!(s.score, Some(1.0));
        assert_eq!(result[1].score, Some(0.0));
    }

    #[test]
    fn test_preferential_rounds_limit_is_configurable() {
        let mut config = EngineConfig::default().with_tie_break(TieBreak::Stable);
        config.greedy.preferential_rounds = 0;
        let result = GreedyAlgorithm::new(config).solve(&[
            character("S", Status::Online, 2),
            character("T1", Status::Online, 1),
            character("T2", Status::OfflineEmpty, 1),
        ]);
        // Alternating rounds still serve online sources
        assert_eq!(targets_of(&result, "S").len(), 2);
    }
}
