use thiserror::Error;

#[derive(Error, Debug)]
pub enum BattleError {
    #[error("Invalid action: {0}")]
    InvalidAction(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

impl BattleError {
    /// Shorthand for building an [`BattleError::InvalidAction`]
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidAction(reason.into())
    }

    /// Shorthand for building a [`BattleError::Configuration`]
    pub fn configuration(reason: impl Into<String>) -> Self {
        Self::Configuration(reason.into())
    }

    pub fn is_invalid_action(&self) -> bool {
        matches!(self, Self::InvalidAction(_))
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}

pub type Result<T> = std::result::Result<T, BattleError>;
