/// Shared serializable output types.
///
/// Search results are written using the wire model directly; this module
/// holds the envelopes that have no wire counterpart.
use serde::{Deserialize, Serialize};

use crate::atlas::AtlasError;

/// Usage line shown alongside argument errors.
pub const USAGE: &str = "boardgameatlas --query <NAME> --clientId <CLIENT_ID> [--limit N] [--skip N] [--timeout SECONDS]";

/// A structured error envelope for JSON error output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorOutput {
    /// Always `false`.
    pub ok: bool,
    /// Error details.
    pub error: ErrorDetail,
}

/// Error detail in the JSON error envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Machine-readable error code (snake_case).
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Usage synopsis, present for argument errors only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<String>,
}

impl ErrorOutput {
    /// Construct from an `AtlasError`.
    #[must_use]
    pub fn from_atlas_error(err: &AtlasError) -> Self {
        let (message, usage) = if err.is_usage() {
            (err.to_string(), Some(USAGE.to_owned()))
        } else {
            (format!("Cannot search for boardgame: {err}"), None)
        };
        Self {
            ok: false,
            error: ErrorDetail {
                code: err.code().to_owned(),
                message,
                usage,
            },
        }
    }
}
