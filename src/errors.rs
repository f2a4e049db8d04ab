use thiserror::Error;

/// Error type shared by the engine, the store and the services.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Invalid {field} on `{id}`: {message}")]
    Validation {
        id: String,
        field: &'static str,
        message: String,
    },
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Persistence error: {0}")]
    Storage(String),
    #[error("Configuration error: {0}")]
    Config(String),
}

impl LedgerError {
    pub fn validation(
        id: impl Into<String>,
        field: &'static str,
        message: impl Into<String>,
    ) -> Self {
        LedgerError::Validation {
            id: id.into(),
            field,
            message: message.into(),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, LedgerError::Validation { .. })
    }
}

pub type Result<T> = std::result::Result<T, LedgerError>;
