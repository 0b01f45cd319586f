use thiserror::Error;

/// Errors from loading, saving or validating [`InputBufferSettings`](crate::InputBufferSettings).
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("deserialization error: {0}")]
    Deserialization(#[from] ron::error::SpannedError),

    #[error("serialization error: {0}")]
    Serialization(#[from] ron::Error),

    #[error("capacity must be at least 1")]
    ZeroCapacity,

    #[error("validity window must be a finite, non-negative number of seconds, got {0}")]
    InvalidValidityWindow(f64),
}
