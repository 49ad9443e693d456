//! Engine configuration with documented constants
//!
//! All magic numbers of the assignment strategies are collected here.
//! `EngineConfig::default()` reproduces the tuned values; a TOML file can
//! override any subset of them.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::core::error::{EngineError, Result};

/// Bounds applied to a character's raw `marchesCount`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MarchLimits {
    /// Lowest effective outgoing capacity after clamping
    pub min: u32,
    /// Highest effective outgoing capacity after clamping
    pub max: u32,
    /// Value substituted for a raw count of 0 before clamping
    pub default_when_zero: u32,
}

impl Default for MarchLimits {
    fn default() -> Self {
        Self {
            min: 1,
            max: 6,
            default_when_zero: 6,
        }
    }
}

/// Constants of the greedy strategy's target scoring
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GreedyConfig {
    pub online_base: f64,
    pub offline_empty_base: f64,
    pub offline_not_empty_base: f64,
    /// Added to the incoming weight of offline_not_empty targets
    ///
    /// At 3.0 an untouched offline_not_empty target scores about as much
    /// as an offline_empty target that already has three full-confidence
    /// reinforcements.
    pub penalty: f64,
    /// Rounds in which online sources are served before offline sources
    pub preferential_rounds: u32,
}

impl Default for GreedyConfig {
    fn default() -> Self {
        Self {
            online_base: 1.5,
            offline_empty_base: 1.0,
            offline_not_empty_base: 1.0,
            penalty: 3.0,
            preferential_rounds: 3,
        }
    }
}

/// Constants of the smart strategy
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SmartConfig {
    /// Base score multiplier for online participants
    pub online_multiplier: f64,
    /// Base score multiplier for offline_empty participants
    pub offline_empty_multiplier: f64,
    /// Town center level from which the lower default cap applies
    pub town_center_threshold: u32,
    /// Default incoming cap at or above the threshold
    pub high_town_center_cap: u32,
    /// Default incoming cap below the threshold or with no level known
    pub low_town_center_cap: u32,
}

impl Default for SmartConfig {
    fn default() -> Self {
        Self {
            online_multiplier: 1.3,
            offline_empty_multiplier: 1.0,
            town_center_threshold: 34,
            high_town_center_cap: 2,
            low_town_center_cap: 3,
        }
    }
}

/// Constants of the display score attached to the output
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub online_value: f64,
    pub offline_empty_value: f64,
    pub offline_not_empty_value: f64,
    /// Added to the incoming count of offline_not_empty targets
    pub offline_not_empty_offset: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            online_value: 1.3,
            offline_empty_value: 1.0,
            offline_not_empty_value: 1.0,
            offline_not_empty_offset: 4.0,
        }
    }
}

/// How ties between equally ranked sources are ordered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum TieBreak {
    /// Keep roster order
    Stable,
    /// Shuffle with a ChaCha8 stream from a fixed seed
    Seeded { seed: u64 },
    /// Shuffle with a fresh seed every run
    #[default]
    Random,
}

/// Configuration for the assignment engine
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub marches: MarchLimits,
    /// Troops one incoming march occupies; `reinforcementCapacity / this`
    /// gives the capacity-derived incoming cap
    pub troops_per_march: u64,
    /// Incoming cap used when nothing limits a target
    pub unbounded_incoming_cap: u32,
    /// Confidence assumed when a character has none set
    pub default_confidence: f64,
    pub greedy: GreedyConfig,
    pub smart: SmartConfig,
    pub scoring: ScoringConfig,
    pub tie_break: TieBreak,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            marches: MarchLimits::default(),
            troops_per_march: 150_000,
            unbounded_incoming_cap: 100,
            default_confidence: 1.0,
            greedy: GreedyConfig::default(),
            smart: SmartConfig::default(),
            scoring: ScoringConfig::default(),
            tie_break: TieBreak::default(),
        }
    }
}

impl EngineConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Same config with a different tie-break policy
    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.marches.min == 0 || self.marches.min > self.marches.max {
            return Err(EngineError::InvalidConfig(format!(
                "march limits must satisfy 1 <= min ({}) <= max ({})",
                self.marches.min, self.marches.max
            )));
        }

        if self.troops_per_march == 0 {
            return Err(EngineError::InvalidConfig(
                "troops_per_march must be positive".into(),
            ));
        }

        if !(self.default_confidence.is_finite() && self.default_confidence >= 0.0) {
            return Err(EngineError::InvalidConfig(format!(
                "default_confidence ({}) must be a non-negative number",
                self.default_confidence
            )));
        }

        let constants = [
            self.greedy.online_base,
            self.greedy.offline_empty_base,
            self.greedy.offline_not_empty_base,
            self.greedy.penalty,
            self.smart.online_multiplier,
            self.smart.offline_empty_multiplier,
            self.scoring.online_value,
            self.scoring.offline_empty_value,
            self.scoring.offline_not_empty_value,
            self.scoring.offline_not_empty_offset,
        ];
        if constants.iter().any(|c| !c.is_finite() || *c < 0.0) {
            return Err(EngineError::InvalidConfig(
                "scoring constants must be non-negative numbers".into(),
            ));
        }

        Ok(())
    }
}

/// Parse and validate a config from TOML text
pub fn parse_config(contents: &str) -> Result<EngineConfig> {
    let config: EngineConfig = toml::from_str(contents)?;
    config.validate()?;
    Ok(config)
}

/// Load and validate a config from a TOML file
pub fn load_config(path: &Path) -> Result<EngineConfig> {
    let contents = fs::read_to_string(path)?;
    parse_config(&contents)
}
