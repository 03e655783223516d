//! Common types shared across Huddle components.

#![warn(clippy::pedantic)]

/// Module for shared error types
pub mod error;

/// Module for shared data types
pub mod types;

pub use error::TypeError;
pub use types::{DisplayName, RoomCode};
