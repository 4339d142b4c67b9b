use anyhow::{Context, Result};
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::api::{self, AppState};
use crate::config::{Config, Environment};
use crate::dalle::DalleClient;
use crate::db::{Database, PostRepo};

/// Database used when the connection URI does not name one.
pub const DEFAULT_DB_NAME: &str = "dalle";

/// A booted server: database verified, router built, socket bound, not yet
/// serving. Splitting this from `serve` lets tests boot on port 0 without
/// blocking on the accept loop.
pub struct Server {
    listener: TcpListener,
    app: Router,
    port: u16,
    environment: Environment,
}

/// Fail-fast boot sequence: log the configuration summary, verify the
/// database connection, build the router, bind the socket. Any error aborts
/// the whole sequence; nothing is retried.
pub async fn boot(config: &Config) -> Result<Server> {
    let current_dir = std::env::current_dir()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|_| "<unknown>".to_string());

    // The URL itself never goes to the logs, only whether it is set.
    tracing::info!(
        mongodb_url_set = !config.mongodb_url.is_empty(),
        port = config.port,
        environment = config.environment.as_str(),
        current_dir = %current_dir,
        "Starting server with configuration"
    );

    let db = Database::connect(&config.mongodb_url, DEFAULT_DB_NAME).await?;

    if config.openai_api_key.is_none() {
        tracing::warn!("OPENAI_API_KEY is not set; image generation requests will fail");
    }

    let state = AppState {
        posts: Arc::new(PostRepo::new(&db)),
        dalle: Arc::new(DalleClient::new(config.openai_api_key.clone())),
    };
    let app = api::create_router(state, config.environment);

    let listener = TcpListener::bind(("0.0.0.0", config.port))
        .await
        .with_context(|| format!("Failed to bind port {}", config.port))?;
    let port = listener.local_addr()?.port();

    Ok(Server {
        listener,
        app,
        port,
        environment: config.environment,
    })
}

impl Server {
    /// The port actually bound (differs from the configured one when booted
    /// with port 0).
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Serve requests until the process dies. There is no shutdown hook.
    pub async fn serve(self) -> Result<()> {
        tracing::info!("Server running on port {}", self.port);
        tracing::info!("Environment: {}", self.environment.as_str());

        axum::serve(self.listener, self.app)
            .await
            .context("Server error")?;
        Ok(())
    }
}

/// Full startup path used by `main`: configuration, boot, serve.
pub async fn run() -> Result<()> {
    let config = Config::from_env()?;
    boot(&config).await?.serve().await
}
