//! HTTP server command

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;

use crate::config::ServiceConfig;
use crate::server::{self, AppState};

/// Start the prediction server
///
/// The artifact is loaded and validated before the listener binds; any
/// failure aborts startup.
pub async fn serve(
    artifact: Option<PathBuf>,
    config: Option<PathBuf>,
    port: Option<u16>,
    host: Option<String>,
) -> Result<()> {
    let mut config = ServiceConfig::resolve(config.as_deref(), artifact)?;
    if let Some(port) = port {
        config.server.port = port;
    }
    if let Some(host) = host {
        config.server.host = host;
    }

    let (predictor, artifact_path) = super::load_predictor(&config.artifact_path)?;
    let state = Arc::new(AppState::new(predictor, artifact_path));

    tracing::info!("Starting server at http://{}", config.server.addr());
    server::start(state, config.server).await?;

    Ok(())
}
