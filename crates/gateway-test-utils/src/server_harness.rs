//! Test server harness for E2E testing
//!
//! Provides `TestGateway` for spawning real gateway instances in tests.

use gateway_service::config::Config;
use gateway_service::routes::{self, AppState};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// API key used by spawned test gateways.
pub const TEST_API_KEY: &str = "test-key";

/// API secret used by spawned test gateways. Tests can decode issued tokens
/// with this secret.
pub const TEST_API_SECRET: &str = "test-secret";

/// Test harness for spawning the gateway in integration tests.
///
/// # Example
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_token_flow_e2e() -> Result<(), anyhow::Error> {
///     let server = TestGateway::spawn("http://localhost:1").await?;
///     let client = reqwest::Client::new();
///
///     let response = client
///         .get(format!("{}/health", server.url()))
///         .send()
///         .await?;
///
///     assert_eq!(response.status(), 200);
///     Ok(())
/// }
/// ```
pub struct TestGateway {
    addr: SocketAddr,
    config: Config,
    _handle: JoinHandle<()>,
}

impl TestGateway {
    /// Spawn a new test gateway instance.
    ///
    /// The server will:
    /// - Bind to a random available port (127.0.0.1:0)
    /// - Use `provider_url` as the media provider base (point this at a
    ///   `wiremock` server to fake the room service)
    /// - Start the HTTP server in the background
    ///
    /// # Errors
    ///
    /// Returns an error if configuration or server spawn fails.
    pub async fn spawn(provider_url: &str) -> Result<Self, anyhow::Error> {
        // Build configuration for the test environment
        let vars = HashMap::from([
            ("LIVEKIT_API_KEY".to_string(), TEST_API_KEY.to_string()),
            (
                "LIVEKIT_API_SECRET".to_string(),
                TEST_API_SECRET.to_string(),
            ),
            ("LIVEKIT_URL".to_string(), provider_url.to_string()),
            ("BIND_ADDRESS".to_string(), "127.0.0.1:0".to_string()),
        ]);

        let config = Config::from_vars(&vars)
            .map_err(|e| anyhow::anyhow!("Failed to create config: {}", e))?;

        let state = Arc::new(
            AppState::from_config(config.clone())
                .map_err(|e| anyhow::anyhow!("Failed to build app state: {}", e))?,
        );

        // Build routes using the gateway's real route builder
        let app = routes::build_routes(state);

        // Bind to random port
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .map_err(|e| anyhow::anyhow!("Failed to bind test server: {}", e))?;

        let addr = listener
            .local_addr()
            .map_err(|e| anyhow::anyhow!("Failed to get local address: {}", e))?;

        // Spawn server in background
        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                eprintln!("Test server error: {}", e);
            }
        });

        Ok(Self {
            addr,
            config,
            _handle: handle,
        })
    }

    /// Spawn a gateway whose provider URL points at a closed port.
    ///
    /// Useful for token and health tests that never touch the provider, and
    /// for exercising the directory-unavailable path.
    pub async fn spawn_without_provider() -> Result<Self, anyhow::Error> {
        // Port 1 is reserved; connections fail fast.
        Self::spawn("http://127.0.0.1:1").await
    }

    /// Get the base URL of the test server.
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Get the socket address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Get reference to the server configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl Drop for TestGateway {
    fn drop(&mut self) {
        // Abort the HTTP server task so the port is released as soon as the
        // test completes.
        self._handle.abort();
    }
}
