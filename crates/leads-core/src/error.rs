//! Dashboard Errors
//!
//! One error type for every fallible operation in the crate. Collaborator
//! boundaries log these and degrade; nothing propagates into the reconciler.

use thiserror::Error;

/// Unified error type for backend access and feed decoding
#[derive(Error, Debug)]
pub enum DashboardError {
    /// Transport-level HTTP failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("Backend returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// JSON could not be decoded into the expected shape.
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// A realtime frame was well-formed JSON but violated the channel protocol.
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// The browser socket could not be opened or written to.
    #[error("WebSocket error: {0}")]
    Socket(String),
}

/// Result type for dashboard operations
pub type DashboardResult<T> = Result<T, DashboardError>;
