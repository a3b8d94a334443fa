//! # Store Errors
//!
//! Every remote table implementation reports failures through [`StoreError`],
//! whether the table lives in a local task or behind an HTTP endpoint.

/// Errors raised by a remote table.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Table actor closed")]
    ActorClosed,
    #[error("Table actor dropped response channel")]
    ActorDropped,
    #[error("Row not found: {0}")]
    NotFound(String),
    #[error("Row rejected: {0}")]
    Rejected(Box<dyn std::error::Error + Send + Sync>),
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Remote store error ({status}): {body}")]
    Api { status: u16, body: String },
    #[error("Malformed response: {0}")]
    Decode(String),
}

impl StoreError {
    /// True when the table could not be reached at all, as opposed to the
    /// table answering with a refusal.
    pub fn is_unreachable(&self) -> bool {
        match self {
            StoreError::ActorClosed | StoreError::ActorDropped => true,
            StoreError::Request(e) => e.is_connect() || e.is_timeout(),
            _ => false,
        }
    }
}
