//! Error types for the portal library.
//!
//! Every failure of the request pipeline is reported through one [`Error`]
//! with explicit variants for malformed URLs, transport failures, empty
//! bodies, decode failures and lost background tasks. Nothing in the pipeline retries on its own.

use thiserror::Error;

/// The unified error type for portal operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A URL could not be parsed or is not usable as an API target.
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] InvalidUrlError),

    /// Network transport errors (connection, timeout, non-success status).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The server answered successfully but sent no body.
    #[error("response from {url} had no body")]
    NoBody { url: String },

    /// The body could not be decoded into the requested shape.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Client configuration could not be loaded.
    #[error("invalid configuration: {message}")]
    Config { message: String },

    /// A background request task ended without a result (it panicked or
    /// was cancelled).
    #[error("request task failed: {message}")]
    Task { message: String },
}

impl Error {
    /// Returns true if this error came from a malformed URL.
    pub fn is_invalid_url(&self) -> bool {
        matches!(self, Error::InvalidUrl(_))
    }

    /// Returns true if this error is a decode failure.
    pub fn is_decode(&self) -> bool {
        matches!(self, Error::Decode(_))
    }

    /// Returns the HTTP status if the server answered with a non-success code.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Transport(TransportError::Status { status, .. }) => Some(*status),
            _ => None,
        }
    }
}

/// Malformed URL input.
#[derive(Debug, Error)]
#[error("'{value}': {reason}")]
pub struct InvalidUrlError {
    /// The offending input.
    pub value: String,
    /// Why it was rejected.
    pub reason: String,
}

impl InvalidUrlError {
    pub fn new(value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            reason: reason.into(),
        }
    }
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out in the underlying transport.
    #[error("request timed out: {message}")]
    Timeout { message: String },

    /// The server answered with a non-success status code.
    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout {
                message: err.to_string(),
            }
        } else if err.is_connect() {
            TransportError::Connection {
                message: err.to_string(),
            }
        } else {
            TransportError::Http {
                message: err.to_string(),
            }
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Transport(TransportError::from(err))
    }
}

/// A body that did not match the requested shape.
#[derive(Debug, Error)]
#[error("{url} did not decode as {target}: {source}")]
pub struct DecodeError {
    /// The URL whose body failed to decode.
    pub url: String,
    /// Name of the Rust type the caller asked for.
    pub target: &'static str,
    /// The underlying serde failure.
    #[source]
    pub source: serde_json::Error,
}
