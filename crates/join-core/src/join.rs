//! The join state machine.
//!
//! Orchestrates permission checks, name collection and token acquisition,
//! then hands the connection details to the external media session:
//!
//! ```text
//! CheckingPermission -> {AwaitingName, Requesting, Denied}
//! AwaitingName       -> Requesting
//! Requesting         -> {Connected, Failed}
//! Failed             -> Requesting (retry via submit_name)
//! ```
//!
//! `Connected` is terminal here; ownership passes to the media session.
//! `Denied` is terminal for the session: recovery requires a browser
//! settings change, so the machine never leaves it on its own.
//!
//! The machine is single-threaded and cooperative. At most one token
//! request is ever in flight: submissions arriving while a request is
//! pending, or after a terminal state, are dropped. Tearing the machine
//! down mid-request just drops the in-flight future; no state is mutated
//! on a dead session.

use crate::errors::JoinError;
use crate::layout::{LayoutOptions, OverlayCorner};
use crate::permission::{PermissionSource, PermissionState};
use crate::session::SessionStore;
use crate::token_client::{JoinCredential, TokenIssuer};
use common::{DisplayName, RoomCode};
use std::sync::Arc;
use tracing::{info, warn};

/// Join flow state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinState {
    /// Querying camera permission on mount.
    CheckingPermission,

    /// Waiting for the user to submit a display name.
    AwaitingName,

    /// A token request is in flight.
    Requesting,

    /// Credential acquired; the media session takes over.
    Connected,

    /// Token issuance failed; the user may retry.
    Failed(String),

    /// Camera permission denied by the browser.
    Denied,
}

impl JoinState {
    /// Whether the machine will ignore further input in this state.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, JoinState::Connected | JoinState::Denied)
    }
}

/// Cosmetic configuration. The historical room-page variants differed only
/// in theme and overlay placement, so those are flags here rather than
/// separate flows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinOptions {
    /// Theme class handed through to the rendering layer.
    pub theme: String,

    /// Corner for the local picture-in-picture overlay.
    pub overlay_corner: OverlayCorner,
}

impl Default for JoinOptions {
    fn default() -> Self {
        Self {
            theme: "default".to_string(),
            overlay_corner: OverlayCorner::BottomRight,
        }
    }
}

/// The opaque pair handed to the external media transport.
#[derive(Debug, Clone, Copy)]
pub struct ConnectionDetails<'a> {
    /// Provider connection URL.
    pub server_url: &'a str,

    /// Signed join credential.
    pub token: &'a str,
}

/// State machine driving one join attempt for one room.
pub struct JoinStateMachine {
    room: RoomCode,
    server_url: String,
    options: JoinOptions,
    state: JoinState,
    credential: Option<JoinCredential>,
    issuer: Arc<dyn TokenIssuer>,
    permissions: Box<dyn PermissionSource>,
}

impl JoinStateMachine {
    /// Create a machine in `CheckingPermission`.
    ///
    /// The permission source is owned for the machine's lifetime and the
    /// subscription ends when the machine is dropped.
    pub fn new(
        room: RoomCode,
        server_url: impl Into<String>,
        issuer: Arc<dyn TokenIssuer>,
        permissions: Box<dyn PermissionSource>,
        options: JoinOptions,
    ) -> Self {
        Self {
            room,
            server_url: server_url.into(),
            options,
            state: JoinState::CheckingPermission,
            credential: None,
            issuer,
            permissions,
        }
    }

    /// The current state.
    #[must_use]
    pub fn state(&self) -> &JoinState {
        &self.state
    }

    /// The room this machine is joining.
    #[must_use]
    pub fn room(&self) -> &RoomCode {
        &self.room
    }

    /// Cosmetic options for the rendering layer.
    #[must_use]
    pub fn options(&self) -> &JoinOptions {
        &self.options
    }

    /// Layout options derived from the cosmetic configuration.
    #[must_use]
    pub fn layout_options(&self) -> LayoutOptions {
        LayoutOptions {
            overlay_corner: self.options.overlay_corner,
        }
    }

    /// The `(server_url, token)` pair for the media transport.
    ///
    /// `Some` only in `Connected`.
    #[must_use]
    pub fn connection_details(&self) -> Option<ConnectionDetails<'_>> {
        match (&self.state, &self.credential) {
            (JoinState::Connected, Some(credential)) => Some(ConnectionDetails {
                server_url: &self.server_url,
                token: credential.as_str(),
            }),
            _ => None,
        }
    }

    /// Run the on-mount permission check.
    ///
    /// With permission already granted and a display name stored for this
    /// room from earlier in the session, the name prompt is skipped and the
    /// token request fires immediately. A `prompt` state still collects the
    /// name first, so the browser permission dialog is only triggered by
    /// media capture after the user has committed to joining.
    ///
    /// Calling `start` again after the first transition is a no-op.
    pub async fn start(&mut self, store: &SessionStore) -> &JoinState {
        if !matches!(self.state, JoinState::CheckingPermission) {
            return &self.state;
        }

        match self.permissions.current().await {
            PermissionState::Denied => {
                warn!(target: "join.machine", room = %self.room, "Camera permission denied");
                self.state = JoinState::Denied;
            }
            PermissionState::Granted => {
                let stored = store
                    .get(&self.room)
                    .and_then(|name| DisplayName::parse(name).ok());
                match stored {
                    Some(name) => self.request(name).await,
                    None => self.state = JoinState::AwaitingName,
                }
            }
            PermissionState::Prompt | PermissionState::Unknown => {
                self.state = JoinState::AwaitingName;
            }
        }

        &self.state
    }

    /// Submit a display name and request a join credential.
    ///
    /// Accepted from `AwaitingName` and `Failed` (retry). Submissions in
    /// any other state are dropped, preserving the one-outstanding-request
    /// invariant. An empty trimmed name fails with `JoinError::Validation`
    /// and leaves the state untouched.
    ///
    /// On acceptance the name is persisted to the session store for this
    /// room before the request fires.
    pub async fn submit_name(
        &mut self,
        store: &mut SessionStore,
        input: &str,
    ) -> Result<&JoinState, JoinError> {
        match self.state {
            JoinState::AwaitingName | JoinState::Failed(_) => {}
            _ => return Ok(&self.state),
        }

        let name = DisplayName::parse(input).map_err(|e| JoinError::Validation(e.to_string()))?;

        store.set(self.room.clone(), &name);
        self.request(name).await;

        Ok(&self.state)
    }

    /// Apply an asynchronous permission change.
    ///
    /// Denial before `Connected` moves to `Denied` from any state. A
    /// `prompt`/`unknown` to `granted` change while `AwaitingName` does not
    /// auto-submit: explicit name submission is still required.
    pub fn on_permission_change(&mut self, new_state: PermissionState) -> &JoinState {
        if new_state == PermissionState::Denied && self.state != JoinState::Connected {
            warn!(target: "join.machine", room = %self.room, "Camera permission revoked");
            self.credential = None;
            self.state = JoinState::Denied;
        }
        &self.state
    }

    /// Wait for the next permission change and apply it.
    ///
    /// Drive this from the UI event loop alongside user input. Returns
    /// `None` when the permission source closes.
    pub async fn poll_permission_change(&mut self) -> Option<PermissionState> {
        let next = self.permissions.changed().await?;
        self.on_permission_change(next);
        Some(next)
    }

    async fn request(&mut self, name: DisplayName) {
        self.state = JoinState::Requesting;

        match self
            .issuer
            .request_token(self.room.as_str(), name.as_str())
            .await
        {
            Ok(credential) => {
                info!(target: "join.machine", room = %self.room, "Join credential acquired");
                // In memory only; the credential is never persisted.
                self.credential = Some(credential);
                self.state = JoinState::Connected;
            }
            Err(e) => {
                warn!(target: "join.machine", room = %self.room, error = %e, "Token request failed");
                self.state = JoinState::Failed(e.to_string());
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::permission::WatchPermissionSource;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Scripted token issuer that counts calls.
    struct MockIssuer {
        results: Mutex<VecDeque<Result<JoinCredential, JoinError>>>,
        calls: AtomicUsize,
        last_name: Mutex<Option<String>>,
    }

    impl MockIssuer {
        fn scripted(results: Vec<Result<JoinCredential, JoinError>>) -> Arc<Self> {
            Arc::new(Self {
                results: Mutex::new(results.into()),
                calls: AtomicUsize::new(0),
                last_name: Mutex::new(None),
            })
        }

        fn succeeding() -> Arc<Self> {
            Self::scripted(vec![])
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn last_name(&self) -> Option<String> {
            self.last_name.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl TokenIssuer for MockIssuer {
        async fn request_token(
            &self,
            _room: &str,
            name: &str,
        ) -> Result<JoinCredential, JoinError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_name.lock().unwrap() = Some(name.to_string());
            self.results
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(JoinCredential::from("mock-token".to_string())))
        }
    }

    fn machine(
        issuer: Arc<MockIssuer>,
        initial_permission: PermissionState,
    ) -> (
        JoinStateMachine,
        tokio::sync::watch::Sender<PermissionState>,
    ) {
        let (tx, source) = WatchPermissionSource::channel(initial_permission);
        let machine = JoinStateMachine::new(
            RoomCode::parse("ABC123").unwrap(),
            "wss://media.example.com",
            issuer,
            Box::new(source),
            JoinOptions::default(),
        );
        (machine, tx)
    }

    #[tokio::test]
    async fn test_granted_with_stored_name_skips_prompt() {
        let issuer = MockIssuer::succeeding();
        let (mut m, _tx) = machine(issuer.clone(), PermissionState::Granted);

        let mut store = SessionStore::new();
        store.set(
            RoomCode::parse("ABC123").unwrap(),
            &DisplayName::parse("alice").unwrap(),
        );

        m.start(&store).await;

        assert_eq!(*m.state(), JoinState::Connected);
        assert_eq!(issuer.call_count(), 1);
        assert_eq!(issuer.last_name().as_deref(), Some("alice"));
    }

    #[tokio::test]
    async fn test_granted_without_stored_name_awaits_name() {
        let issuer = MockIssuer::succeeding();
        let (mut m, _tx) = machine(issuer.clone(), PermissionState::Granted);
        let store = SessionStore::new();

        m.start(&store).await;

        assert_eq!(*m.state(), JoinState::AwaitingName);
        assert_eq!(issuer.call_count(), 0);
    }

    #[tokio::test]
    async fn test_prompt_awaits_name_before_capture() {
        let issuer = MockIssuer::succeeding();
        let (mut m, _tx) = machine(issuer.clone(), PermissionState::Prompt);
        let store = SessionStore::new();

        m.start(&store).await;

        assert_eq!(*m.state(), JoinState::AwaitingName);
    }

    #[tokio::test]
    async fn test_denied_on_mount_is_terminal() {
        let issuer = MockIssuer::succeeding();
        let (mut m, _tx) = machine(issuer.clone(), PermissionState::Denied);
        let mut store = SessionStore::new();

        m.start(&store).await;
        assert_eq!(*m.state(), JoinState::Denied);

        // Submissions in Denied are dropped, not errors.
        let state = m.submit_name(&mut store, "alice").await.unwrap();
        assert_eq!(*state, JoinState::Denied);
        assert_eq!(issuer.call_count(), 0);
    }

    #[tokio::test]
    async fn test_submit_name_connects_and_persists() {
        let issuer = MockIssuer::succeeding();
        let (mut m, _tx) = machine(issuer.clone(), PermissionState::Granted);
        let mut store = SessionStore::new();

        m.start(&store).await;
        m.submit_name(&mut store, "  alice  ").await.unwrap();

        assert_eq!(*m.state(), JoinState::Connected);
        assert_eq!(issuer.call_count(), 1);
        // The trimmed name is remembered for this room
        assert_eq!(
            store.get(&RoomCode::parse("ABC123").unwrap()),
            Some("alice")
        );
    }

    #[tokio::test]
    async fn test_empty_name_is_validation_error_without_transition() {
        let issuer = MockIssuer::succeeding();
        let (mut m, _tx) = machine(issuer.clone(), PermissionState::Granted);
        let mut store = SessionStore::new();

        m.start(&store).await;
        let result = m.submit_name(&mut store, "   ").await;

        assert!(matches!(result, Err(JoinError::Validation(_))));
        assert_eq!(*m.state(), JoinState::AwaitingName);
        assert_eq!(issuer.call_count(), 0);
    }

    #[tokio::test]
    async fn test_issuance_failure_allows_retry() {
        let issuer = MockIssuer::scripted(vec![Err(JoinError::Issuance(
            "service exploded".to_string(),
        ))]);
        let (mut m, _tx) = machine(issuer.clone(), PermissionState::Granted);
        let mut store = SessionStore::new();

        m.start(&store).await;
        m.submit_name(&mut store, "alice").await.unwrap();

        match m.state() {
            JoinState::Failed(message) => assert!(message.contains("service exploded")),
            other => panic!("expected Failed, got {:?}", other),
        }

        // Retry with a different name succeeds
        m.submit_name(&mut store, "alicia").await.unwrap();
        assert_eq!(*m.state(), JoinState::Connected);
        assert_eq!(issuer.call_count(), 2);
        assert_eq!(issuer.last_name().as_deref(), Some("alicia"));
    }

    #[tokio::test]
    async fn test_submission_after_connected_is_dropped() {
        let issuer = MockIssuer::succeeding();
        let (mut m, _tx) = machine(issuer.clone(), PermissionState::Granted);
        let mut store = SessionStore::new();

        m.start(&store).await;
        m.submit_name(&mut store, "alice").await.unwrap();
        assert_eq!(*m.state(), JoinState::Connected);

        m.submit_name(&mut store, "bob").await.unwrap();

        assert_eq!(*m.state(), JoinState::Connected);
        assert_eq!(issuer.call_count(), 1);
    }

    #[tokio::test]
    async fn test_grant_while_awaiting_name_does_not_auto_submit() {
        let issuer = MockIssuer::succeeding();
        let (mut m, tx) = machine(issuer.clone(), PermissionState::Prompt);
        let store = SessionStore::new();

        m.start(&store).await;
        assert_eq!(*m.state(), JoinState::AwaitingName);

        tx.send(PermissionState::Granted).unwrap();
        let observed = m.poll_permission_change().await;

        assert_eq!(observed, Some(PermissionState::Granted));
        // Explicit submission is still required
        assert_eq!(*m.state(), JoinState::AwaitingName);
        assert_eq!(issuer.call_count(), 0);
    }

    #[tokio::test]
    async fn test_denial_before_connected_wins_from_any_state() {
        let issuer = MockIssuer::succeeding();
        let (mut m, tx) = machine(issuer.clone(), PermissionState::Prompt);
        let store = SessionStore::new();

        m.start(&store).await;

        tx.send(PermissionState::Denied).unwrap();
        m.poll_permission_change().await;

        assert_eq!(*m.state(), JoinState::Denied);
    }

    #[tokio::test]
    async fn test_denial_after_connected_is_ignored() {
        let issuer = MockIssuer::succeeding();
        let (mut m, _tx) = machine(issuer.clone(), PermissionState::Granted);
        let mut store = SessionStore::new();

        m.start(&store).await;
        m.submit_name(&mut store, "alice").await.unwrap();
        assert_eq!(*m.state(), JoinState::Connected);

        m.on_permission_change(PermissionState::Denied);

        assert_eq!(*m.state(), JoinState::Connected);
        assert!(m.connection_details().is_some());
    }

    #[tokio::test]
    async fn test_connection_details_only_when_connected() {
        let issuer = MockIssuer::succeeding();
        let (mut m, _tx) = machine(issuer.clone(), PermissionState::Granted);
        let mut store = SessionStore::new();

        m.start(&store).await;
        assert!(m.connection_details().is_none());

        m.submit_name(&mut store, "alice").await.unwrap();

        let details = m.connection_details().unwrap();
        assert_eq!(details.server_url, "wss://media.example.com");
        assert_eq!(details.token, "mock-token");
    }

    #[tokio::test]
    async fn test_start_is_idempotent() {
        let issuer = MockIssuer::succeeding();
        let (mut m, _tx) = machine(issuer.clone(), PermissionState::Prompt);
        let store = SessionStore::new();

        m.start(&store).await;
        m.start(&store).await;

        assert_eq!(*m.state(), JoinState::AwaitingName);
    }

    #[tokio::test]
    async fn test_permission_source_close_ends_polling() {
        let issuer = MockIssuer::succeeding();
        let (mut m, tx) = machine(issuer.clone(), PermissionState::Prompt);
        let store = SessionStore::new();

        m.start(&store).await;
        drop(tx);

        assert_eq!(m.poll_permission_change().await, None);
        assert_eq!(*m.state(), JoinState::AwaitingName);
    }
}
