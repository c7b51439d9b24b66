use thiserror::Error;

#[derive(Error, Debug)]
pub enum DuelError {
    #[error("Combatant is not ready to act: {0:?}")]
    NotReady(crate::core::types::Side),

    #[error("Not enough MP: need {needed}, have {available}")]
    OutOfMana { needed: i32, available: i32 },

    #[error("Battle is already finished")]
    BattleFinished,

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DuelError>;
