//! Model artifact loading
//!
//! An artifact bundles the fitted model with what it needs to turn a
//! request into a feature row. Two layouts are supported:
//! - **aligned**: `model` + `feature_names`; request fields are reordered
//!   into `feature_names` order
//! - **pipeline**: `model` + `scaler` + `encoder` + `numeric_columns` +
//!   `categorical_columns`; numeric columns are scaled, categorical columns
//!   one-hot encoded, numeric block first
//!
//! Artifacts are validated completely at load time. A loaded [`Artifact`]
//! is never mutated.

mod detect;

pub use detect::{detect_artifact_source, ArtifactFormat, ArtifactSource};

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ArtifactError;
use crate::model::{Regress, Regressor};
use crate::preprocess::{OneHotEncoder, Scaler};

/// Artifact as found on disk, every key optional
#[derive(Debug, Default, Deserialize)]
struct RawArtifact {
    model: Option<Regressor>,
    feature_names: Option<Vec<String>>,
    scaler: Option<Scaler>,
    #[serde(alias = "ohe")]
    encoder: Option<OneHotEncoder>,
    #[serde(alias = "num_cols")]
    numeric_columns: Option<Vec<String>>,
    #[serde(alias = "cat_cols")]
    categorical_columns: Option<Vec<String>>,
}

/// Scale + encode preprocessing
#[derive(Debug, Clone, PartialEq)]
pub struct Pipeline {
    pub scaler: Scaler,
    pub encoder: OneHotEncoder,
    pub numeric_columns: Vec<String>,
    pub categorical_columns: Vec<String>,
}

impl Pipeline {
    /// Width of the concatenated feature row
    pub fn n_features_out(&self) -> usize {
        self.numeric_columns.len() + self.encoder.n_features_out()
    }
}

/// How request fields become a feature row
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureLayout {
    Aligned { feature_names: Vec<String> },
    Pipeline(Pipeline),
}

impl FeatureLayout {
    /// Variant name
    pub fn variant(&self) -> &'static str {
        match self {
            FeatureLayout::Aligned { .. } => "aligned",
            FeatureLayout::Pipeline(_) => "pipeline",
        }
    }

    /// Every request column the transform reads, in artifact order
    pub fn required_columns(&self) -> Vec<&str> {
        match self {
            FeatureLayout::Aligned { feature_names } => {
                feature_names.iter().map(String::as_str).collect()
            }
            FeatureLayout::Pipeline(p) => p
                .numeric_columns
                .iter()
                .chain(&p.categorical_columns)
                .map(String::as_str)
                .collect(),
        }
    }

    /// Width of the feature row handed to the model
    pub fn n_features_out(&self) -> usize {
        match self {
            FeatureLayout::Aligned { feature_names } => feature_names.len(),
            FeatureLayout::Pipeline(p) => p.n_features_out(),
        }
    }
}

/// Loaded, validated artifact
#[derive(Debug, Clone, PartialEq)]
pub struct Artifact {
    model: Regressor,
    features: FeatureLayout,
}

/// Description of a loaded artifact
#[derive(Debug, Clone, Serialize)]
pub struct ArtifactSummary {
    pub variant: &'static str,
    pub model: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feature_names: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numeric_columns: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categorical_columns: Option<Vec<String>>,
    pub n_features: usize,
}

impl Artifact {
    /// Build and validate an artifact
    pub fn new(model: Regressor, features: FeatureLayout) -> Result<Self, ArtifactError> {
        let artifact = Self { model, features };
        artifact.validate()?;
        Ok(artifact)
    }

    /// Load an artifact file or directory
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ArtifactError> {
        Self::load_with_source(path).map(|(artifact, _)| artifact)
    }

    /// Load an artifact, also returning the file that was actually read
    pub fn load_with_source<P: AsRef<Path>>(
        path: P,
    ) -> Result<(Self, ArtifactSource), ArtifactError> {
        let source = detect_artifact_source(path)?;
        let content = std::fs::read_to_string(&source.path).map_err(|e| ArtifactError::Io {
            path: source.path.clone(),
            source: e,
        })?;

        tracing::debug!("Parsing {:?} artifact {}", source.format, source.path.display());
        let artifact = match source.format {
            ArtifactFormat::Json => Self::from_json(&content)?,
            ArtifactFormat::Yaml => Self::from_yaml(&content)?,
        };
        Ok((artifact, source))
    }

    /// Parse a JSON artifact
    pub fn from_json(content: &str) -> Result<Self, ArtifactError> {
        let raw: RawArtifact = serde_json::from_str(content)?;
        Self::from_raw(raw)
    }

    /// Parse a YAML artifact
    pub fn from_yaml(content: &str) -> Result<Self, ArtifactError> {
        let raw: RawArtifact = serde_yaml::from_str(content)?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawArtifact) -> Result<Self, ArtifactError> {
        let RawArtifact {
            model,
            feature_names,
            scaler,
            encoder,
            numeric_columns,
            categorical_columns,
        } = raw;

        let mut missing = Vec::new();
        if model.is_none() {
            missing.push("model");
        }

        let features = match (
            feature_names,
            scaler,
            encoder,
            numeric_columns,
            categorical_columns,
        ) {
            (
                feature_names,
                Some(scaler),
                Some(encoder),
                Some(numeric_columns),
                Some(categorical_columns),
            ) => {
                if feature_names.is_some() {
                    tracing::warn!(
                        "Artifact has both feature_names and a preprocessing pipeline, using the pipeline"
                    );
                }
                Some(FeatureLayout::Pipeline(Pipeline {
                    scaler,
                    encoder,
                    numeric_columns,
                    categorical_columns,
                }))
            }
            (Some(feature_names), scaler, encoder, numeric_columns, categorical_columns) => {
                if scaler.is_some()
                    || encoder.is_some()
                    || numeric_columns.is_some()
                    || categorical_columns.is_some()
                {
                    tracing::warn!("Artifact has an incomplete preprocessing pipeline, using feature_names");
                }
                Some(FeatureLayout::Aligned { feature_names })
            }
            (None, scaler, encoder, numeric_columns, categorical_columns) => {
                let pipeline_keys = [
                    ("scaler", scaler.is_some()),
                    ("encoder", encoder.is_some()),
                    ("numeric_columns", numeric_columns.is_some()),
                    ("categorical_columns", categorical_columns.is_some()),
                ];
                if pipeline_keys.iter().any(|(_, present)| *present) {
                    missing.extend(
                        pipeline_keys
                            .iter()
                            .filter(|(_, present)| !present)
                            .map(|(key, _)| *key),
                    );
                } else {
                    missing.push("feature_names");
                }
                None
            }
        };

        match (model, features) {
            (Some(model), Some(features)) if missing.is_empty() => Self::new(model, features),
            _ => Err(ArtifactError::MissingKeys(missing)),
        }
    }

    /// Check that model, columns and transforms agree in shape
    fn validate(&self) -> Result<(), ArtifactError> {
        let inconsistent =
            |msg: String| -> Result<(), ArtifactError> { Err(ArtifactError::Inconsistent(msg)) };

        if let FeatureLayout::Pipeline(p) = &self.features {
            p.scaler.validate().map_err(ArtifactError::Inconsistent)?;
            p.encoder.validate().map_err(ArtifactError::Inconsistent)?;

            if p.scaler.n_features() != p.numeric_columns.len() {
                return inconsistent(format!(
                    "scaler was fitted on {} columns but numeric_columns has {}",
                    p.scaler.n_features(),
                    p.numeric_columns.len()
                ));
            }
            if p.encoder.n_features_in() != p.categorical_columns.len() {
                return inconsistent(format!(
                    "encoder was fitted on {} columns but categorical_columns has {}",
                    p.encoder.n_features_in(),
                    p.categorical_columns.len()
                ));
            }
        }

        // Numeric and categorical lists may share a column
        let lists: Vec<(&str, &[String])> = match &self.features {
            FeatureLayout::Aligned { feature_names } => {
                vec![("feature_names", feature_names.as_slice())]
            }
            FeatureLayout::Pipeline(p) => vec![
                ("numeric_columns", p.numeric_columns.as_slice()),
                ("categorical_columns", p.categorical_columns.as_slice()),
            ],
        };
        for (key, columns) in lists {
            if let Some(dup) = find_duplicate(columns) {
                return inconsistent(format!(
                    "column '{}' is listed more than once in {}",
                    dup, key
                ));
            }
        }

        let width = self.features.n_features_out();
        if self.model.n_features() != width {
            return inconsistent(format!(
                "model expects {} features but the {} layout produces {}",
                self.model.n_features(),
                self.features.variant(),
                width
            ));
        }

        Ok(())
    }

    pub fn model(&self) -> &Regressor {
        &self.model
    }

    pub fn features(&self) -> &FeatureLayout {
        &self.features
    }

    /// Serializable description used by `/health` and `info`
    pub fn summary(&self) -> ArtifactSummary {
        let model = match self.model {
            Regressor::Linear(_) => "linear",
        };
        let (feature_names, numeric_columns, categorical_columns) = match &self.features {
            FeatureLayout::Aligned { feature_names } => (Some(feature_names.clone()), None, None),
            FeatureLayout::Pipeline(p) => (
                None,
                Some(p.numeric_columns.clone()),
                Some(p.categorical_columns.clone()),
            ),
        };

        ArtifactSummary {
            variant: self.features.variant(),
            model,
            feature_names,
            numeric_columns,
            categorical_columns,
            n_features: self.features.n_features_out(),
        }
    }
}

/// First name that appears twice in a column list
fn find_duplicate(columns: &[String]) -> Option<&str> {
    let mut seen = HashSet::new();
    columns
        .iter()
        .map(String::as_str)
        .find(|c| !seen.insert(*c))
}
