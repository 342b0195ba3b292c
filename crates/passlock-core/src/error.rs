use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Storage write failed for {key}: {reason}")]
    WriteFailed { key: String, reason: String },

    #[error("Storage read failed for {key}: {reason}")]
    ReadFailed { key: String, reason: String },

    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Crypto error: {0}")]
    Crypto(String),
}

impl StoreError {
    pub fn write_failed(key: &str, reason: impl Into<String>) -> Self {
        Self::WriteFailed {
            key: key.to_string(),
            reason: reason.into(),
        }
    }

    pub fn read_failed(key: &str, reason: impl Into<String>) -> Self {
        Self::ReadFailed {
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Secret must have {expected} symbols, got {got}")]
    InvalidLength { expected: usize, got: usize },

    #[error("Secret must not be empty")]
    Empty,

    #[error(transparent)]
    Store(#[from] StoreError),
}
