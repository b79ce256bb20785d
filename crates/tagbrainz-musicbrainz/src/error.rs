// SPDX-License-Identifier: GPL-3.0-or-later

use thiserror::Error;

pub type Result<T> = std::result::Result<T, MusicBrainzError>;

#[derive(Debug, Error)]
pub enum MusicBrainzError {
    /// Connection, DNS, timeout or body-read failure.
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The body was not JSON or did not have the expected shape.
    #[error("Failed to decode MusicBrainz response: {source}")]
    Decode {
        #[source]
        source: serde_json::Error,
        body: String,
    },

    /// The strict-match lookup saw anything other than exactly one recording.
    #[error("MusicBrainz didn't find the song ({count} matches)")]
    NoMatch { count: usize },

    /// A per-call deadline ran out before the request was sent.
    #[error("MusicBrainz call timed out after {0:?}")]
    Timeout(std::time::Duration),

    /// The underlying HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    #[error("Invalid MusicBrainz URL: {0}")]
    InvalidUrl(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },
}

impl MusicBrainzError {
    /// Raw response body for decode failures.
    pub fn body(&self) -> Option<&str> {
        match self {
            MusicBrainzError::Decode { body, .. } => Some(body.as_str()),
            _ => None,
        }
    }
}
