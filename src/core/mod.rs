pub mod config;
pub mod error;
pub mod types;

pub use config::{EngineConfig, TieBreak};
pub use error::{EngineError, Result};
pub use types::{Character, CharacterId, Presence, ReinforcementEdge, Status};
