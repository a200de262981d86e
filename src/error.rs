use std::io;

/// Custom error type for spark_notify operations
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Destination room error: {0}")]
    Resolution(String),

    #[error("Message delivery failed with HTTP {status}: {message}")]
    Delivery { status: u16, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parsing error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

impl NotifyError {
    /// Process exit code for this error. Always non-zero.
    pub fn exit_code(&self) -> u8 {
        match self {
            NotifyError::Config(_) | NotifyError::TomlParse(_) => 2,
            NotifyError::Resolution(_) => 3,
            NotifyError::Delivery { .. } | NotifyError::Http(_) => 4,
            NotifyError::Io(_) => 1,
        }
    }
}

/// Helper type for Results that use NotifyError
pub type Result<T> = std::result::Result<T, NotifyError>;
