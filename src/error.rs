//! Error types for session bootstrap and request signing.

use thiserror::Error;

/// Result type alias for yq-session operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while bootstrapping a session or signing requests.
#[derive(Error, Debug)]
pub enum Error {
    /// Embedded RSA public key could not be decoded
    #[error("public key decode failed: {0}")]
    KeyDecode(String),

    /// RSA encryption rejected the input
    #[error("encryption failed: {0}")]
    Encryption(String),

    /// Network or I/O failure reported by the transport
    #[error("transport error: {0}")]
    Transport(String),

    /// Server answered with a non-success status
    #[error("unexpected HTTP status {status}")]
    Status { status: u16 },

    /// Anonymous-registration response was missing expected fields
    #[error("bootstrap response malformed: {0}")]
    BootstrapParse(String),

    /// Request violated a signing precondition
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Server rejected the cached credential
    #[error("credential rejected by server")]
    Unauthorized,

    /// Preference store could not be read or written
    #[error("credential store error: {0}")]
    Store(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a new transport error
    pub fn transport(msg: impl Into<String>) -> Self {
        Error::Transport(msg.into())
    }

    /// Create a new bootstrap parse error
    pub fn bootstrap_parse(msg: impl Into<String>) -> Self {
        Error::BootstrapParse(msg.into())
    }

    /// Create a new invalid request error
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Error::InvalidRequest(msg.into())
    }

    /// Create a new store error
    pub fn store(msg: impl Into<String>) -> Self {
        Error::Store(msg.into())
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// Check if the caller may retry the failed operation as-is
    pub fn is_retriable(&self) -> bool {
        match self {
            Error::Transport(_) => true,
            Error::Status { status } => *status == 429 || *status >= 500,
            _ => false,
        }
    }

    /// Check if this error indicates a broken build or a programming error
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Error::KeyDecode(_)
                | Error::Encryption(_)
                | Error::BootstrapParse(_)
                | Error::InvalidRequest(_)
                | Error::Config(_)
        )
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Store(err.to_string())
    }
}
