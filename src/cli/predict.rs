//! One-shot prediction command

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use serde_json::{json, Value};

use crate::config::ServiceConfig;

/// Predict one price from a JSON body and print `{"price": ...}`
pub async fn predict(
    artifact: Option<PathBuf>,
    config: Option<PathBuf>,
    input: String,
) -> Result<()> {
    let config = ServiceConfig::resolve(config.as_deref(), artifact)?;
    let (predictor, _) = super::load_predictor(&config.artifact_path)?;

    let body = parse_input(&input)?;
    let price = predictor
        .predict_value(body)
        .map_err(|e| anyhow!(e.detail()))?;

    println!("{}", json!({ "price": price }));
    Ok(())
}

/// Inline JSON, or `@path` to a JSON file
fn parse_input(input: &str) -> Result<Value> {
    let text = match input.strip_prefix('@') {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read request body from {}", path))?,
        None => input.to_string(),
    };
    serde_json::from_str(&text).context("request body is not valid JSON")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_inline() {
        let body = parse_input(r#"{"year": 2015}"#).unwrap();
        assert_eq!(body["year"], 2015);
    }

    #[test]
    fn test_parse_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("body.json");
        std::fs::write(&path, r#"{"odometer": 60000.0}"#).unwrap();

        let body = parse_input(&format!("@{}", path.display())).unwrap();
        assert_eq!(body["odometer"], 60000.0);
    }

    #[test]
    fn test_parse_invalid() {
        assert!(parse_input("not json").is_err());
    }
}
