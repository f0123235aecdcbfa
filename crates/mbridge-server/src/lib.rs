//! HTTP service for the markup bridge.
//!
//! This crate provides a native Rust HTTP server using axum, exposing the
//! two conversion directions:
//! - `POST /discord2contentapi`: Discord markdown body in, 12y body out
//! - `POST /contentapi2discord?lang=<dialect>`: markup body in, markdown out
//!
//! Both conversions are synchronous pure functions over the request body;
//! the only await point is reading the body off the socket, so the service
//! needs no coordination between concurrent requests.
//!
//! # Quick Start
//!
//! ```ignore
//! use mbridge_server::{ServerConfig, run_server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ServerConfig {
//!         host: "127.0.0.1".to_string(),
//!         port: 7878,
//!         ..ServerConfig::default()
//!     };
//!
//!     run_server(config).await.unwrap();
//! }
//! ```

mod app;
mod error;
mod handlers;
mod state;

use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;

use mbridge_markup::DialectRegistry;
use state::AppState;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Dialect used when a request omits `lang`.
    pub default_dialect: String,
    /// Fail requests containing constructs markdown cannot express.
    pub strict_render: bool,
    /// Enable verbose request logging.
    pub verbose: bool,
    /// Application version (for startup logging).
    pub version: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 7878,
            default_dialect: "12y2".to_owned(),
            strict_render: false,
            verbose: false,
            version: String::new(),
        }
    }
}

/// Run the server.
///
/// # Errors
///
/// Returns an error if the configured default dialect is not registered or
/// the server fails to start.
pub async fn run_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let registry = DialectRegistry::with_defaults();
    if !registry.contains(&config.default_dialect) {
        return Err(format!("unknown default dialect: {}", config.default_dialect).into());
    }

    let state = Arc::new(AppState {
        registry,
        default_dialect: config.default_dialect.clone(),
        strict_render: config.strict_render,
        verbose: config.verbose,
    });

    let app = app::create_router(state);

    let addr = SocketAddr::from_str(&format!("{}:{}", config.host, config.port))?;
    tracing::info!(address = %addr, version = %config.version, "Starting markup service");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received, stopping server...");
}

/// Create server configuration from bridge config.
#[must_use]
pub fn server_config_from_config(
    config: &mbridge_config::Config,
    version: String,
    verbose: bool,
) -> ServerConfig {
    ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        default_dialect: config.markup.default_dialect.clone(),
        strict_render: config.markup.strict_render,
        verbose,
        version,
    }
}
