//! Property tests: structural invariants every strategy must hold on
//! arbitrary rosters

use proptest::prelude::*;
use reinforcement_engine::roster::{
    effective_marches, incoming_cap, normalize_status, IncomingCapPolicy,
};
use reinforcement_engine::{
    AlgorithmRegistry, Character, CharacterId, EngineConfig, Presence, Status, TieBreak,
};
use std::collections::HashSet;

fn status_strategy() -> impl Strategy<Value = Status> {
    prop_oneof![
        Just(Status::Online),
        Just(Status::OfflineEmpty),
        Just(Status::OfflineNotEmpty),
        Just(Status::Unknown),
    ]
}

fn roster_strategy() -> impl Strategy<Value = Vec<Character>> {
    let member = (
        status_strategy(),
        -2_i32..9,
        prop::option::weighted(0.2, 0_usize..14),
        prop::option::of(0_u64..1_200_000),
        prop::option::of(0_u32..7),
        prop::option::of(0.2_f64..1.5),
        prop::option::of(25_u32..40),
    );
    prop::collection::vec(member, 0..12).prop_map(|members| {
        members
            .into_iter()
            .enumerate()
            .map(|(i, (status, marches, owner, capacity, max_in, confidence, tc))| {
                let mut c = Character::new(format!("c{}", i), status);
                c.marches_count = marches;
                // Owners past the roster end are dangling references
                c.main_character_id = owner.map(|k| CharacterId::new(format!("c{}", k)));
                c.reinforcement_capacity = capacity;
                c.max_reinforcement_marches = max_in;
                c.confidence_level = confidence;
                c.town_center_level = tc;
                c
            })
            .collect()
    })
}

fn config(seed: u64) -> EngineConfig {
    EngineConfig::default().with_tie_break(TieBreak::Seeded { seed })
}

/// Caps, self-loops, duplicates and dangling targets
fn check_structure(
    input: &[Character],
    result: &[Character],
    policy: IncomingCapPolicy,
    config: &EngineConfig,
) -> Result<(), TestCaseError> {
    prop_assert_eq!(input.len(), result.len());
    let ids: HashSet<&CharacterId> = result.iter().map(|c| &c.id).collect();

    for (before, after) in input.iter().zip(result) {
        prop_assert_eq!(&before.id, &after.id);

        let outgoing = after.reinforce.len() as u32;
        prop_assert!(outgoing <= effective_marches(before.marches_count, &config.marches));

        let mut seen = HashSet::new();
        for edge in &after.reinforce {
            prop_assert!(edge.target_id != after.id, "self edge on {}", after.id);
            prop_assert!(seen.insert(&edge.target_id), "duplicate edge from {}", after.id);
            prop_assert!(ids.contains(&edge.target_id));
        }

        let incoming = result.iter().filter(|c| c.reinforces(&before.id)).count() as u32;
        prop_assert!(incoming <= incoming_cap(before, policy, config));
    }
    Ok(())
}

proptest! {
    #[test]
    fn property_greedy_respects_caps_and_farm_exclusivity(
        roster in roster_strategy(),
        seed in 0_u64..1_000,
    ) {
        let config = config(seed);
        let before = roster.clone();
        let result = AlgorithmRegistry::builtin(config.clone())
            .calculate_assignments(&roster, Some("greedy"));

        prop_assert_eq!(&roster, &before);
        check_structure(&roster, &result, IncomingCapPolicy::Unbounded, &config)?;

        for (input, out) in roster.iter().zip(&result) {
            let banned = input.is_farm()
                || input.status == Status::Unknown
                || input.status == Status::OfflineNotEmpty;
            if banned {
                prop_assert!(out.reinforce.is_empty(), "{} must not send", out.id);
            }
        }
    }

    #[test]
    fn property_smart_respects_caps_and_farm_rules(
        roster in roster_strategy(),
        seed in 0_u64..1_000,
    ) {
        let config = config(seed);
        let before = roster.clone();
        let result = AlgorithmRegistry::builtin(config.clone())
            .calculate_assignments(&roster, Some("smart"));

        prop_assert_eq!(&roster, &before);
        check_structure(&roster, &result, IncomingCapPolicy::TownCenter, &config)?;

        for (input, out) in roster.iter().zip(&result) {
            if input.status == Status::Unknown {
                prop_assert!(out.reinforce.is_empty());
            }
            if input.is_farm() {
                // Farms only send during cleanup, which serves offline_not_empty
                for edge in &out.reinforce {
                    let target = roster
                        .iter()
                        .find(|c| c.id == edge.target_id)
                        .map(|c| normalize_status(c.status));
                    prop_assert_eq!(target, Some(Presence::OfflineNotEmpty));
                }
            }
        }
    }

    #[test]
    fn property_seeded_runs_are_deterministic(
        roster in roster_strategy(),
        seed in 0_u64..1_000,
    ) {
        let registry = AlgorithmRegistry::builtin(config(seed));
        for name in ["greedy", "smart"] {
            let a = registry.calculate_assignments(&roster, Some(name));
            let b = registry.calculate_assignments(&roster, Some(name));
            prop_assert_eq!(a, b);
        }
    }

    #[test]
    fn property_empty_clears_everything(roster in roster_strategy()) {
        let registry = AlgorithmRegistry::default();
        let once = registry.calculate_assignments(&roster, Some("empty"));
        prop_assert!(once.iter().all(|c| c.reinforce.is_empty()));
        prop_assert!(once.iter().all(|c| (1..=6).contains(&c.marches_count)));

        let twice = registry.calculate_assignments(&once, Some("empty"));
        prop_assert_eq!(once, twice);
    }
}
