use reqwest::StatusCode;
use thiserror::Error;

use crate::config::{ENV_KEY, KEY_FILE};

/// Convenience alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Everything that can go wrong while fetching a forecast.
///
/// The variants split along the only seam a caller can act on: fix the
/// configuration ([`Error::MissingApiKey`]) or deal with the provider
/// (everything else).
#[derive(Debug, Error)]
pub enum Error {
    /// No API key in the environment or the fallback key file.
    #[error(
        "no API key found in environment variable `{}` or key file `{}`",
        ENV_KEY,
        KEY_FILE
    )]
    MissingApiKey,

    /// The request never produced an HTTP status: connect failure,
    /// timeout, or an aborted body read.
    #[error("OpenWeatherMap request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The provider answered with a non-success status.
    #[error("OpenWeatherMap request failed with status {status}: {body}")]
    Status {
        status: StatusCode,
        /// Raw response body, capped to a diagnostic-sized prefix.
        body: String,
    },

    /// The provider answered with a success status but the body was not
    /// usable JSON.
    #[error("failed to decode OpenWeatherMap response: {0}")]
    Decode(#[source] serde_json::Error),

    /// The payload decoded but carried no `daily` array.
    #[error("malformed OpenWeatherMap response: missing `daily` array")]
    MissingDaily,
}

/// Builds the error for a non-success provider response, keeping a capped
/// copy of the raw body for diagnostics.
pub(crate) fn status_error(status: StatusCode, body: &str) -> Error {
    Error::Status {
        status,
        body: truncate_body(body),
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() <= MAX {
        return body.to_string();
    }
    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}
