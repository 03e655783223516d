//! Join error taxonomy.
//!
//! Validation errors are raised before any network call; issuance errors are
//! retryable; directory errors degrade to an empty list at the call site.
//! Camera permission denial is not an error: the state machine models it as
//! a terminal state, since recovery needs out-of-band browser settings
//! action rather than a retry.

use thiserror::Error;

/// Errors surfaced by the join clients and state machine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum JoinError {
    /// Missing/empty required field. User-correctable; no network call made.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Token service reachable but rejected or failed. Retryable.
    #[error("Token issuance failed: {0}")]
    Issuance(String),

    /// Room list unreachable. Callers degrade to an empty list.
    #[error("Room directory unavailable: {0}")]
    DirectoryUnavailable(String),

    /// Client-side configuration problem (e.g. the HTTP client could not be
    /// built). Not user-correctable.
    #[error("Client misconfigured: {0}")]
    Misconfigured(String),
}
