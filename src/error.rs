// src/error.rs
// =============================================================================
// Error type for the update fetchers.
//
// Failure kinds:
// - Timeout / Transport: the request never produced a response
//   (DNS, connection refused, timeout)
// - Status: the server answered with a non-2xx code (rate limits included)
// - Json / Feed: the body arrived but could not be parsed
//
// Fetchers never let these escape to the caller as a panic or an
// unhandled error: they log them and hand back a FetchOutcome::Failed.
// =============================================================================

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    /// The request exceeded the configured timeout
    #[error("request to {url} timed out")]
    Timeout { url: String },

    /// DNS failure, refused connection, TLS failure, broken body stream...
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Server answered with a non-success status code
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    /// Release payload was not the JSON object we expected
    #[error("malformed JSON payload: {0}")]
    Json(#[from] serde_json::Error),

    /// Feed body was not valid RSS or Atom
    #[error("malformed feed: {0}")]
    Feed(#[from] feed_rs::parser::ParseFeedError),
}

impl FetchError {
    // Sorts a reqwest error into Timeout or Transport
    //
    // Same idea as the link checker's error categorization: reqwest tells us
    // whether the failure was a timeout, everything else is transport.
    pub fn from_reqwest(url: &str, error: reqwest::Error) -> Self {
        if error.is_timeout() {
            FetchError::Timeout {
                url: url.to_string(),
            }
        } else {
            FetchError::Transport {
                url: url.to_string(),
                source: error,
            }
        }
    }
}
