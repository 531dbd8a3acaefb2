//! Configuration system for carprice
//!
//! Values resolve in order: command-line flag, environment variable,
//! config file, built-in default.

mod server;

pub use server::ServerConfig;

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

/// Environment variable overriding the artifact location
pub const ARTIFACT_ENV: &str = "CARPRICE_ARTIFACT";

/// Artifact location used when nothing else is configured
pub const DEFAULT_ARTIFACT_PATH: &str = "artifacts/linear_simple.json";

/// Service configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Artifact file or directory
    #[serde(default = "default_artifact_path")]
    pub artifact_path: PathBuf,

    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,
}

fn default_artifact_path() -> PathBuf {
    PathBuf::from(DEFAULT_ARTIFACT_PATH)
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            artifact_path: default_artifact_path(),
            server: ServerConfig::default(),
        }
    }
}

impl ServiceConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from a JSON file
    pub fn from_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration, picking the parser from the file extension
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        let config = match ext {
            "yaml" | "yml" => Self::from_yaml(path),
            "json" => Self::from_json(path),
            _ => return Err(anyhow!("unsupported config format: .{}", ext)),
        };
        config.with_context(|| format!("failed to load config {}", path.display()))
    }

    /// Optional config file, then the artifact override
    ///
    /// `artifact` is the flag value; clap already falls back to
    /// [`ARTIFACT_ENV`] when the flag is absent.
    pub fn resolve(config_file: Option<&Path>, artifact: Option<PathBuf>) -> Result<Self> {
        let mut config = match config_file {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        if let Some(artifact) = artifact {
            config.artifact_path = artifact;
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_config_yaml() {
        let yaml = r#"
artifact_path: /srv/models/linear_simple.json

server:
  port: 9000
  host: 127.0.0.1
  cors_origins:
    - http://localhost:3000
"#;
        let config: ServiceConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            config.artifact_path,
            PathBuf::from("/srv/models/linear_simple.json")
        );
        assert_eq!(config.server.addr(), "127.0.0.1:9000");
        assert_eq!(config.server.cors_origins, vec!["http://localhost:3000"]);
        assert!(config.server.cors_enabled);
        assert_eq!(config.server.max_body_size, 64 * 1024);
    }

    #[test]
    fn test_defaults() {
        let config: ServiceConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, ServiceConfig::default());
        assert_eq!(config.artifact_path, PathBuf::from(DEFAULT_ARTIFACT_PATH));
        assert_eq!(config.server.addr(), "0.0.0.0:8000");
    }

    #[test]
    fn test_resolve_flag_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("carprice.json");
        std::fs::write(&path, r#"{"artifact_path": "from_file.json"}"#).unwrap();

        let config = ServiceConfig::resolve(Some(&path), None).unwrap();
        assert_eq!(config.artifact_path, PathBuf::from("from_file.json"));

        let config =
            ServiceConfig::resolve(Some(&path), Some(PathBuf::from("from_flag.json"))).unwrap();
        assert_eq!(config.artifact_path, PathBuf::from("from_flag.json"));
    }

    #[test]
    fn test_load_unknown_extension() {
        assert!(ServiceConfig::load("carprice.toml").is_err());
    }
}
