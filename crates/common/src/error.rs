//! Common error types for Huddle components.

use thiserror::Error;

/// Errors produced when constructing shared domain types.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TypeError {
    /// Room code failed validation
    #[error("Invalid room code: {0}")]
    InvalidRoomCode(String),

    /// Display name failed validation
    #[error("Invalid display name: {0}")]
    InvalidDisplayName(String),
}
