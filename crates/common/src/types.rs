//! Shared data types for Huddle components.
//!
//! Room codes and display names are validated at construction so the
//! rest of the system never sees an empty or malformed value.

use crate::error::TypeError;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Length of generated room codes.
pub const GENERATED_CODE_LENGTH: usize = 6;

/// Maximum accepted display name length in characters.
pub const MAX_DISPLAY_NAME_LENGTH: usize = 100;

/// Alphabet used for generated room codes.
const CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Short alphanumeric room identifier, case-normalized to uppercase.
///
/// Uniqueness is only per active session on the media provider; codes are
/// not guaranteed globally unique across time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RoomCode(String);

impl RoomCode {
    /// Parse a user-supplied room code.
    ///
    /// Trims surrounding whitespace and normalizes to uppercase.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidRoomCode` if the input is empty after
    /// trimming or contains non-alphanumeric characters.
    pub fn parse(input: &str) -> Result<Self, TypeError> {
        let trimmed = input.trim();

        if trimmed.is_empty() {
            return Err(TypeError::InvalidRoomCode(
                "room code must not be empty".to_string(),
            ));
        }

        if !trimmed.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(TypeError::InvalidRoomCode(
                "room code may only contain letters and digits".to_string(),
            ));
        }

        Ok(Self(trimmed.to_ascii_uppercase()))
    }

    /// Generate a random room code.
    #[must_use]
    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();
        let code: String = (0..GENERATED_CODE_LENGTH)
            .filter_map(|_| CODE_ALPHABET.choose(&mut rng))
            .map(|&b| char::from(b))
            .collect();
        Self(code)
    }

    /// The normalized code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for RoomCode {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<RoomCode> for String {
    fn from(code: RoomCode) -> Self {
        code.0
    }
}

/// Non-empty, user-supplied participant name.
///
/// No uniqueness constraint within a room.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DisplayName(String);

impl DisplayName {
    /// Parse a user-supplied display name, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidDisplayName` if the input is empty after
    /// trimming or longer than `MAX_DISPLAY_NAME_LENGTH` characters.
    pub fn parse(input: &str) -> Result<Self, TypeError> {
        let trimmed = input.trim();

        if trimmed.is_empty() {
            return Err(TypeError::InvalidDisplayName(
                "display name must not be empty".to_string(),
            ));
        }

        if trimmed.chars().count() > MAX_DISPLAY_NAME_LENGTH {
            return Err(TypeError::InvalidDisplayName(format!(
                "display name must be at most {MAX_DISPLAY_NAME_LENGTH} characters"
            )));
        }

        Ok(Self(trimmed.to_string()))
    }

    /// The trimmed name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for DisplayName {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<DisplayName> for String {
    fn from(name: DisplayName) -> Self {
        name.0
    }
}
