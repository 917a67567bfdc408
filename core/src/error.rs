//! Error types for the FiveStar client.
//!
//! # Design
//! Every HTTP-level, decode and encode failure is normalized into a single
//! `ApiError` carrying a human-readable message and, for HTTP failures, the
//! status code. Transport failures (connect errors, timeouts) are kept apart
//! in `TransportError` so callers can tell "the server said no" from "we never
//! reached the server".

use thiserror::Error;

/// Boxed source error carried by `TransportError`.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Normalized failure returned by the API layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ApiError {
    pub message: String,
    pub status_code: Option<u16>,
}

impl ApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status_code: None,
        }
    }

    pub fn with_status(message: impl Into<String>, status: u16) -> Self {
        Self {
            message: message.into(),
            status_code: Some(status),
        }
    }

    /// Generic `HTTP {status}` error used when the server gave no message.
    pub fn http(status: u16) -> Self {
        Self::with_status(format!("HTTP {status}"), status)
    }

    pub fn decode(detail: impl std::fmt::Display) -> Self {
        Self::new(format!("Failed to decode response: {detail}"))
    }

    pub fn encode(detail: impl std::fmt::Display) -> Self {
        Self::new(format!("Failed to encode request: {detail}"))
    }
}

/// The request never produced an HTTP response.
#[derive(Debug, Error)]
#[error("transport error: {source}")]
pub struct TransportError {
    #[source]
    source: BoxError,
}

impl TransportError {
    pub fn new(source: impl Into<BoxError>) -> Self {
        Self {
            source: source.into(),
        }
    }

    /// Whether the underlying failure was a timeout, when the source exposes it.
    pub fn is_timeout(&self) -> bool {
        self.source
            .downcast_ref::<reqwest::Error>()
            .is_some_and(reqwest::Error::is_timeout)
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        Self::new(err)
    }
}

/// Invalid client configuration, reported at construction time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("client id must not be empty")]
    MissingClientId,

    #[error("invalid api url {url:?}: {reason}")]
    InvalidApiUrl { url: String, reason: String },

    #[error("invalid value for header {header}")]
    InvalidHeaderValue { header: &'static str },

    #[error("environment variable {0} is not set")]
    MissingEnv(&'static str),

    #[error("failed to build HTTP client: {0}")]
    HttpClient(String),
}

/// Anything an async SDK operation can fail with.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl Error {
    /// HTTP status code, if the failure came from a non-200 response.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::Api(err) => err.status_code,
            Error::Transport(_) => None,
        }
    }

    pub fn as_api(&self) -> Option<&ApiError> {
        match self {
            Error::Api(err) => Some(err),
            Error::Transport(_) => None,
        }
    }
}
