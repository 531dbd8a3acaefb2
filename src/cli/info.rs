//! Artifact info command

use std::path::PathBuf;

use anyhow::Result;
use serde_json::json;

use crate::config::ServiceConfig;

/// Validate an artifact and print its summary
pub async fn info(artifact: Option<PathBuf>, config: Option<PathBuf>) -> Result<()> {
    let config = ServiceConfig::resolve(config.as_deref(), artifact)?;
    let (predictor, artifact_path) = super::load_predictor(&config.artifact_path)?;

    let summary = json!({
        "artifact_path": artifact_path.display().to_string(),
        "artifact": predictor.artifact().summary(),
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}
