use thiserror::Error;

/// Failures around the engine: loading rosters and configuration.
///
/// Assignment itself never fails; see `assignment::Ledger::try_assign`.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Roster JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
