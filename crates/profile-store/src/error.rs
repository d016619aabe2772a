use thiserror::Error;

/// Result type for local store operations
pub type Result<T> = std::result::Result<T, StoreError>;

/// Result type for remote store operations
pub type RemoteResult<T> = std::result::Result<T, RemoteStoreError>;

/// Errors raised by a [`crate::LocalProfileStore`]
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Profile not found: {0}")]
    NotFound(String),

    #[error("Invalid profile: {0}")]
    InvalidProfile(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Errors raised by a [`crate::RemoteProfileStore`]
#[derive(Error, Debug)]
pub enum RemoteStoreError {
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Unexpected status {status} from {url}")]
    Status { status: u16, url: String },

    #[error("Malformed document: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Document not found: {0}")]
    NotFound(String),

    #[error("Document for {requested} carries userId {found}")]
    IdentityMismatch { requested: String, found: String },

    #[error("Remote unavailable: {0}")]
    Unavailable(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl StoreError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidProfile(msg.into())
    }
}

impl RemoteStoreError {
    /// True when the remote answered but the document does not exist
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
