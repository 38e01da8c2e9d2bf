//! pipedag HTTP server
//!
//! Serves the pipeline validator to the browser editor.
//!
//! ## Endpoints
//!
//! - `GET /` returns `{"Ping": "Pong"}`
//! - `POST /pipelines/parse` takes `{"nodes": [...], "edges": [...]}` and
//!   returns `{"num_nodes": n, "num_edges": m, "is_dag": bool}`
//!
//! Rejected bodies never reach the validator. The status depends on what is
//! wrong: `415` without a JSON `Content-Type`, `400` for malformed JSON, and
//! `422` for well-formed JSON missing a required field.
//!
//! ## Usage
//!
//! ```bash
//! pipedag-server --config pipedag.toml
//! ```

mod cors;
mod error;
mod routes;

use axum::routing::{get, post};
use axum::Router;
use pipedag_core::Config;
use std::path::Path;
use tower_http::trace::TraceLayer;

pub use cors::cors_layer;
pub use error::ServerError;

/// Config file looked up in the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "pipedag.toml";

/// Build the application router
pub fn router(config: &Config) -> Result<Router, ServerError> {
    let router = Router::new()
        .route("/", get(routes::ping))
        .route("/pipelines/parse", post(routes::parse_pipeline))
        .layer(cors_layer(&config.cors)?)
        .layer(TraceLayer::new_for_http());

    Ok(router)
}

/// Load config from `path`, else `./pipedag.toml` if present, else defaults,
/// then apply environment overrides
pub fn load_config(path: Option<&Path>) -> Result<Config, ServerError> {
    load_config_with(path, |key| std::env::var(key).ok())
}

/// Same as [`load_config`], with overrides read through `lookup`
pub fn load_config_with<F>(path: Option<&Path>, lookup: F) -> Result<Config, ServerError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match path {
        Some(path) => Config::from_file(path)?,
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
            Config::from_file(Path::new(DEFAULT_CONFIG_FILE))?
        }
        None => {
            tracing::debug!("No config file found, using defaults");
            Config::default()
        }
    };

    config.apply_env_overrides(lookup)?;

    Ok(config)
}

/// Bind the configured address and serve until Ctrl-C
pub async fn serve(config: Config) -> Result<(), ServerError> {
    let app = router(&config)?;
    let address = config.server.address();

    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .map_err(|e| ServerError::BindError(address.clone(), e.to_string()))?;

    tracing::info!(%address, "pipedag server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ServerError::IoError(e.to_string()))?;

    tracing::info!("pipedag server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
