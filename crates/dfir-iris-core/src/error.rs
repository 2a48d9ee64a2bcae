//! Error types for DFIR-IRIS client operations

use thiserror::Error;

/// The main error type for DFIR-IRIS client operations
#[derive(Error, Debug)]
pub enum Error {
    /// Required configuration value missing or unusable; fatal at startup
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed URL or body serialization failure before anything is sent
    #[error("Invalid request: {0}")]
    Request(String),

    /// Connection, TLS or timeout failure while executing the request
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The remote API answered with a non-success envelope or an error page
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Response body does not have the envelope shape
    #[error("Envelope decode error: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Failure reported by the remote API
///
/// `status` is empty when the server did not answer with an envelope at all
/// (for example a proxy error page); `message` then holds the raw body.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("DFIR-IRIS API error (HTTP {http_status}): {status} - {message}")]
pub struct ApiError {
    pub http_status: u16,
    pub status: String,
    pub message: String,
}

/// Coarse classification of [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Config,
    Request,
    Transport,
    Api,
    Decode,
}

/// Result type alias for DFIR-IRIS client operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// Create a request construction error
    pub fn request(msg: impl Into<String>) -> Self {
        Error::Request(msg.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Config(_) => ErrorKind::Config,
            Error::Request(_) => ErrorKind::Request,
            Error::Transport(_) => ErrorKind::Transport,
            Error::Api(_) => ErrorKind::Api,
            Error::Decode(_) => ErrorKind::Decode,
        }
    }

    /// The API error carried by this error, if any
    pub fn as_api(&self) -> Option<&ApiError> {
        match self {
            Error::Api(err) => Some(err),
            _ => None,
        }
    }
}
