//! # Gateway Errors
//!
//! Errors every table request can fail with. Row-level refusals keep the row's own
//! error inside [`GatewayError::Rejected`] so callers can still print the reason.

/// Errors that can occur while talking to a table.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("Table closed")]
    TableClosed,
    #[error("Table dropped response channel")]
    ResponseDropped,
    #[error("Row not found: {0}")]
    NotFound(String),
    #[error("Row rejected: {0}")]
    Rejected(Box<dyn std::error::Error + Send + Sync>),
}

impl GatewayError {
    /// Builds a `Rejected` error from a plain message, mostly for test doubles.
    pub fn rejected(reason: impl Into<String>) -> Self {
        GatewayError::Rejected(reason.into().into())
    }
}
