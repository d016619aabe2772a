use thiserror::Error;

/// Result type for text profile operations
pub type Result<T> = std::result::Result<T, TextProfileError>;

/// Errors that can occur while managing the profile document
#[derive(Error, Debug)]
pub enum TextProfileError {
    /// IO error occurred
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Path has no usable parent directory
    #[error("Invalid path: {0}")]
    InvalidPath(String),
}

impl TextProfileError {
    /// Create an invalid config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}
