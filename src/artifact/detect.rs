//! Artifact format and source detection

use std::path::{Path, PathBuf};

use crate::error::ArtifactError;

/// Serialization format of an artifact file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactFormat {
    Json,
    Yaml,
}

/// Resolved artifact location
#[derive(Debug, Clone)]
pub struct ArtifactSource {
    /// Path to the artifact file
    pub path: PathBuf,
    /// Detected format
    pub format: ArtifactFormat,
}

/// Detect artifact format and file from a path
///
/// The path can be:
/// - A direct path to a .json, .yaml or .yml file
/// - A directory containing `artifact.{json,yaml,yml}` or any .json file
pub fn detect_artifact_source<P: AsRef<Path>>(path: P) -> Result<ArtifactSource, ArtifactError> {
    let path = path.as_ref();

    if path.is_file() {
        let format = format_from_extension(path)?;
        Ok(ArtifactSource {
            path: path.to_path_buf(),
            format,
        })
    } else if path.is_dir() {
        detect_artifact_in_directory(path)
    } else {
        Err(ArtifactError::NotFound(path.to_path_buf()))
    }
}

fn format_from_extension(path: &Path) -> Result<ArtifactFormat, ArtifactError> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    match ext {
        "json" => Ok(ArtifactFormat::Json),
        "yaml" | "yml" => Ok(ArtifactFormat::Yaml),
        _ => Err(ArtifactError::UnsupportedFormat(format!(
            "{} (expected .json, .yaml or .yml)",
            path.display()
        ))),
    }
}

/// Look for artifact files in a directory
fn detect_artifact_in_directory(dir: &Path) -> Result<ArtifactSource, ArtifactError> {
    let names = [
        ("artifact.json", ArtifactFormat::Json),
        ("artifact.yaml", ArtifactFormat::Yaml),
        ("artifact.yml", ArtifactFormat::Yaml),
    ];

    for (name, format) in names {
        let candidate = dir.join(name);
        if candidate.is_file() {
            return Ok(ArtifactSource {
                path: candidate,
                format,
            });
        }
    }

    match find_json_in_dir(dir) {
        Some(path) => Ok(ArtifactSource {
            path,
            format: ArtifactFormat::Json,
        }),
        None => Err(ArtifactError::NotFound(dir.to_path_buf())),
    }
}

/// First .json file in a directory, in glob order
fn find_json_in_dir(dir: &Path) -> Option<PathBuf> {
    let pattern = dir.join("*.json");
    glob::glob(pattern.to_str()?)
        .ok()?
        .filter_map(|r| r.ok())
        .next()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_file_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let json = dir.path().join("model.json");
        let yml = dir.path().join("model.yml");
        std::fs::write(&json, "{}").unwrap();
        std::fs::write(&yml, "{}").unwrap();

        assert_eq!(
            detect_artifact_source(&json).unwrap().format,
            ArtifactFormat::Json
        );
        assert_eq!(
            detect_artifact_source(&yml).unwrap().format,
            ArtifactFormat::Yaml
        );
    }

    #[test]
    fn test_detect_unsupported_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("linear_simple.joblib");
        std::fs::write(&path, b"\x80\x04").unwrap();

        assert!(matches!(
            detect_artifact_source(&path),
            Err(ArtifactError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_detect_in_directory_prefers_artifact_name() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("aaa.json"), "{}").unwrap();
        std::fs::write(dir.path().join("artifact.yaml"), "{}").unwrap();

        let source = detect_artifact_source(dir.path()).unwrap();
        assert_eq!(source.path, dir.path().join("artifact.yaml"));
        assert_eq!(source.format, ArtifactFormat::Yaml);
    }

    #[test]
    fn test_detect_in_directory_falls_back_to_json() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("linear_simple.json"), "{}").unwrap();

        let source = detect_artifact_source(dir.path()).unwrap();
        assert_eq!(source.path, dir.path().join("linear_simple.json"));
    }

    #[test]
    fn test_detect_missing_path() {
        assert!(matches!(
            detect_artifact_source("/nonexistent/artifact.json"),
            Err(ArtifactError::NotFound(_))
        ));
    }
}
