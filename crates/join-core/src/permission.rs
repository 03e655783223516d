//! Camera permission observation.
//!
//! Permission state is owned by the browser; this module only observes it.
//! The state machine consumes an injected `PermissionSource` rather than a
//! global listener, and owns its subscription for its lifetime - dropping
//! the machine drops the subscription.

use async_trait::async_trait;
use tokio::sync::watch;

/// Browser camera permission state. Observed, never mutated, by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionState {
    /// Not yet queried.
    Unknown,
    /// Camera access granted.
    Granted,
    /// The browser will prompt on first capture attempt.
    Prompt,
    /// Camera access denied; recoverable only via browser settings.
    Denied,
}

/// Source of camera permission state and its asynchronous changes.
#[async_trait]
pub trait PermissionSource: Send {
    /// The current permission state.
    async fn current(&self) -> PermissionState;

    /// Wait for the next permission change.
    ///
    /// Returns `None` when the source is closed (e.g. the underlying
    /// listener was torn down).
    async fn changed(&mut self) -> Option<PermissionState>;
}

/// `PermissionSource` backed by a `tokio::sync::watch` channel.
///
/// Embedders bridge the browser's permission-change events into the sender
/// half; tests drive it directly.
#[derive(Debug)]
pub struct WatchPermissionSource {
    rx: watch::Receiver<PermissionState>,
}

impl WatchPermissionSource {
    /// Create a channel seeded with an initial state.
    ///
    /// Returns the sender half (for the event bridge) and the source (for
    /// the state machine).
    #[must_use]
    pub fn channel(initial: PermissionState) -> (watch::Sender<PermissionState>, Self) {
        let (tx, rx) = watch::channel(initial);
        (tx, Self { rx })
    }
}

#[async_trait]
impl PermissionSource for WatchPermissionSource {
    async fn current(&self) -> PermissionState {
        *self.rx.borrow()
    }

    async fn changed(&mut self) -> Option<PermissionState> {
        self.rx.changed().await.ok()?;
        Some(*self.rx.borrow_and_update())
    }
}
