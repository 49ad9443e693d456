//! Assignment strategies
//!
//! Architecture: trait + registry
//! - `AssignmentAlgorithm` is the interface every strategy implements
//! - `AlgorithmRegistry` maps names to strategies and picks the default
//! - All strategies share the primitives in `crate::assignment`

pub mod empty;
pub mod greedy;
pub mod registry;
pub mod smart;

pub use empty::EmptyAlgorithm;
pub use greedy::GreedyAlgorithm;
pub use registry::{AlgorithmInfo, AlgorithmRegistry};
pub use smart::SmartAlgorithm;

use crate::core::types::Character;

/// A named reinforcement assignment strategy
pub trait AssignmentAlgorithm: Send + Sync {
    fn name(&self) -> &str;

    /// One-line description for presenting the strategy to users
    fn description(&self) -> &str;

    /// Compute assignments for `roster`, returning a new roster
    ///
    /// Implementations work on a deep copy; the input is never modified.
    fn solve(&self, roster: &[Character]) -> Vec<Character>;
}
