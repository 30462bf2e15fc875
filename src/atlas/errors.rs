/// Errors from the Board Game Atlas layer and the driver in front of it.
use std::time::Duration;

use reqwest::StatusCode;
use thiserror::Error;

/// Everything that can stop a search from producing results.
#[derive(Debug, Error)]
pub enum AtlasError {
    /// A required flag was absent or blank. Raised before any network activity.
    #[error("Please use --{flag} to set {what}")]
    MissingArgument {
        /// Flag name without the leading dashes.
        flag: &'static str,
        /// What the flag is for, e.g. "the boardgame name to search".
        what: &'static str,
    },

    /// The HTTP client itself could not be built (TLS backend, etc.).
    #[error("cannot create HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),

    /// The search URL could not be constructed.
    #[error("cannot build search request: {0}")]
    InvalidRequest(#[from] url::ParseError),

    /// Connection, TLS or body read failure.
    #[error("cannot invoke search endpoint: {0}")]
    Transport(#[source] reqwest::Error),

    /// The call context was cancelled before the response arrived.
    #[error("search request was cancelled")]
    Cancelled,

    /// The call context's deadline elapsed before the response arrived.
    #[error("search request timed out after {}s", timeout.as_secs())]
    TimedOut {
        /// The timeout the context was created with.
        timeout: Duration,
    },

    /// The endpoint answered with a status >= 400. The body is not read.
    #[error("error HTTP status: {status}")]
    Status {
        /// Status code and canonical reason.
        status: StatusCode,
    },

    /// The response body does not match the search result schema.
    #[error("cannot deserialize JSON payload: {0}")]
    Decode(#[from] serde_json::Error),
}

impl AtlasError {
    /// Machine-readable error code (snake_case) for the JSON error envelope.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingArgument { .. } => "missing_argument",
            Self::HttpClient(_) => "http_client",
            Self::InvalidRequest(_) => "invalid_request",
            Self::Transport(_) => "transport",
            Self::Cancelled => "cancelled",
            Self::TimedOut { .. } => "timed_out",
            Self::Status { .. } => "http_status",
            Self::Decode(_) => "decode",
        }
    }

    /// Whether the error was detected before anything touched the network.
    #[must_use]
    pub fn is_usage(&self) -> bool {
        matches!(self, Self::MissingArgument { .. })
    }
}
