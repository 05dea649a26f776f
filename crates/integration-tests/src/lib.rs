//! Integration tests for ProcessorHub.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p processor-hub-integration-tests
//! ```
//!
//! Each test starts the real storefront router on an ephemeral port, backed
//! by a file store in a temporary directory, and talks to it over HTTP.

use std::net::SocketAddr;
use std::path::Path;

use processor_hub_core::catalog;
use processor_hub_storefront::config::StorefrontConfig;
use processor_hub_storefront::routes;
use processor_hub_storefront::state::AppState;
use tokio::task::JoinHandle;

/// Error type for test setup.
pub type SetupError = Box<dyn std::error::Error + Send + Sync>;

/// A storefront server running in the background for one test.
///
/// The server task is aborted on drop.
pub struct TestServer {
    addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a storefront persisting to `data_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory or listener cannot be set up.
    pub async fn start(data_dir: &Path) -> Result<Self, SetupError> {
        let config = StorefrontConfig {
            port: 0,
            data_dir: data_dir.to_path_buf(),
            ..StorefrontConfig::default()
        };
        let state = AppState::new(config, catalog())?;
        let app = routes::app(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                report_server_error(&e);
            }
        });

        Ok(Self { addr, handle })
    }

    /// Absolute URL for `path` on this server.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[allow(clippy::print_stderr)]
fn report_server_error(error: &std::io::Error) {
    eprintln!("test server stopped: {error}");
}
