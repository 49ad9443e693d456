//! Reinforcement Engine - march assignment for alliance events
//!
//! Decides which characters send their limited reinforcement marches to
//! which other characters, under per-source and per-target caps, farm
//! ownership, and status/confidence priorities.

pub mod assignment;
pub mod core;
pub mod report;
pub mod roster;
pub mod strategies;

pub use crate::core::config::{EngineConfig, TieBreak};
pub use crate::core::error::{EngineError, Result};
pub use crate::core::types::{Character, CharacterId, Presence, ReinforcementEdge, Status};
pub use crate::strategies::{AlgorithmInfo, AlgorithmRegistry, AssignmentAlgorithm};

/// Run `algorithm` (default `greedy`) from the built-in registry with the
/// default configuration
pub fn calculate_assignments(roster: &[Character], algorithm: Option<&str>) -> Vec<Character> {
    AlgorithmRegistry::default().calculate_assignments(roster, algorithm)
}

/// Names and descriptions of the built-in strategies
pub fn available_algorithms() -> Vec<AlgorithmInfo> {
    AlgorithmRegistry::default().available_algorithms()
}
