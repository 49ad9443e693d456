//! Algorithm registry: named strategies selectable by the caller
//!
//! The registry is an ordinary value the caller builds and owns, so several
//! configurations (or test doubles) can live side by side.

use serde::Serialize;

use super::{AssignmentAlgorithm, EmptyAlgorithm, GreedyAlgorithm, SmartAlgorithm};
use crate::core::config::EngineConfig;
use crate::core::types::Character;

/// Name and description for presenting a strategy to users
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlgorithmInfo {
    pub name: String,
    pub description: String,
}

/// Registry of assignment strategies with a mandatory default
pub struct AlgorithmRegistry {
    /// Used when no name or an unknown name is requested
    default: Box<dyn AssignmentAlgorithm>,
    others: Vec<Box<dyn AssignmentAlgorithm>>,
}

impl AlgorithmRegistry {
    /// Create a registry holding only its default strategy
    pub fn new(default: Box<dyn AssignmentAlgorithm>) -> Self {
        Self {
            default,
            others: Vec::new(),
        }
    }

    /// `greedy` (default), `smart`, and `empty`, all sharing `config`
    pub fn builtin(config: EngineConfig) -> Self {
        let mut registry = Self::new(Box::new(GreedyAlgorithm::new(config.clone())));
        registry.register(Box::new(SmartAlgorithm::new(config.clone())));
        registry.register(Box::new(EmptyAlgorithm::new(config.marches)));
        registry
    }

    /// Add a strategy, replacing any registered under the same name
    pub fn register(&mut self, algorithm: Box<dyn AssignmentAlgorithm>) {
        if algorithm.name() == self.default.name() {
            self.default = algorithm;
            return;
        }
        match self.others.iter_mut().find(|a| a.name() == algorithm.name()) {
            Some(slot) => *slot = algorithm,
            None => self.others.push(algorithm),
        }
    }

    pub fn get(&self, name: &str) -> Option<&dyn AssignmentAlgorithm> {
        std::iter::once(&self.default)
            .chain(self.others.iter())
            .find(|a| a.name() == name)
            .map(|a| a.as_ref())
    }

    /// Strategy for `name`; the default when the name is missing or unknown
    pub fn resolve(&self, name: Option<&str>) -> &dyn AssignmentAlgorithm {
        match name {
            None => self.default.as_ref(),
            Some(name) => self.get(name).unwrap_or_else(|| {
                tracing::warn!(
                    requested = name,
                    fallback = self.default.name(),
                    "unknown assignment algorithm"
                );
                self.default.as_ref()
            }),
        }
    }

    /// Registered strategies, default first
    pub fn available_algorithms(&self) -> Vec<AlgorithmInfo> {
        std::iter::once(&self.default)
            .chain(self.others.iter())
            .map(|a| AlgorithmInfo {
                name: a.name().to_string(),
                description: a.description().to_string(),
            })
            .collect()
    }

    /// Run the named strategy (or the default) over `roster`
    ///
    /// The caller's roster is never modified.
    pub fn calculate_assignments(&self, roster: &[Character], name: Option<&str>) -> Vec<Character> {
        self.resolve(name).solve(roster)
    }
}

impl Default for AlgorithmRegistry {
    fn default() -> Self {
        Self::builtin(EngineConfig::default())
    }
}
