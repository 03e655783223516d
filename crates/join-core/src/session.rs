//! Session-scoped display-name store.
//!
//! Remembers the display name a user chose for each room, for the lifetime
//! of one session (one tab). Keyed by room code so concurrent sessions for
//! different rooms in the same browser do not interfere. Absence is a
//! normal, expected state; there are no error conditions here.

use common::{DisplayName, RoomCode};
use std::collections::HashMap;

/// In-memory display-name store with session lifetime.
///
/// Dropping the store is equivalent to the session ending: nothing is
/// persisted across it.
#[derive(Debug, Default)]
pub struct SessionStore {
    names: HashMap<RoomCode, String>,
}

impl SessionStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The stored display name for a room, if one was set this session.
    #[must_use]
    pub fn get(&self, room: &RoomCode) -> Option<&str> {
        self.names.get(room).map(String::as_str)
    }

    /// Remember a display name for a room.
    pub fn set(&mut self, room: RoomCode, name: &DisplayName) {
        self.names.insert(room, name.as_str().to_string());
    }

    /// Forget the stored name for one room.
    pub fn clear(&mut self, room: &RoomCode) {
        self.names.remove(room);
    }

    /// Forget everything, modeling the tab/session ending.
    pub fn end_session(&mut self) {
        self.names.clear();
    }
}
