//! Remote service error types.

use thiserror::Error;

/// Any failure talking to the analysis or QA service. The pipeline never
/// surfaces these; it substitutes fallback data instead.
#[derive(Error, Debug)]
pub enum RemoteCallError {
    #[error("Failed to create HTTP client: {0}")]
    ClientBuild(String),

    #[error("Request to {url} failed: {reason}")]
    Network { url: String, reason: String },

    #[error("{url} returned {status}: {body}")]
    Status {
        url: String,
        status: u16,
        body: String,
    },

    #[error("Malformed response from {url}: {reason}")]
    MalformedResponse { url: String, reason: String },

    #[error("Remote service disabled (offline mode)")]
    Disabled,
}
