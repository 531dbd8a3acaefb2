//! Error types
//!
//! `PredictError` separates client errors (bad request body, columns the
//! request cannot satisfy) from server errors raised while transforming
//! features or running the model. Mapping to HTTP status codes happens in
//! the server module only.

use std::path::PathBuf;

use thiserror::Error;

/// Failure of a single prediction
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PredictError {
    /// Body is not a JSON object or a field has the wrong type
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// Required request fields are absent from the body
    #[error("Missing fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),

    /// Columns the artifact needs that the request schema does not provide
    #[error("Missing columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    /// Encoder saw a category code it was not fitted on
    #[error("Found unknown category {value} in column '{column}' during transform")]
    UnknownCategory { column: String, value: i64 },

    /// A value could not be used as the type a transform expects
    #[error("column '{column}': {message}")]
    TypeMismatch { column: String, message: String },

    /// Feature vector width differs from what the model was fitted on
    #[error("X has {actual} features, but the model is expecting {expected} features as input")]
    ShapeMismatch { expected: usize, actual: usize },

    /// Model produced NaN or infinity
    #[error("prediction is not a finite number: {0}")]
    NonFinite(f64),
}

impl PredictError {
    /// Name of the failure category
    pub fn kind(&self) -> &'static str {
        match self {
            PredictError::InvalidBody(_) => "InvalidBody",
            PredictError::MissingFields(_) => "MissingFields",
            PredictError::MissingColumns(_) => "MissingColumns",
            PredictError::UnknownCategory { .. } => "UnknownCategory",
            PredictError::TypeMismatch { .. } => "TypeMismatch",
            PredictError::ShapeMismatch { .. } => "ShapeMismatch",
            PredictError::NonFinite(_) => "NonFinite",
        }
    }

    /// True when the caller sent something the service cannot use
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            PredictError::InvalidBody(_)
                | PredictError::MissingFields(_)
                | PredictError::MissingColumns(_)
        )
    }

    /// Names carried by the missing-fields/missing-columns variants
    pub fn missing(&self) -> Option<&[String]> {
        match self {
            PredictError::MissingFields(names) | PredictError::MissingColumns(names) => {
                Some(names)
            }
            _ => None,
        }
    }

    /// Message surfaced to the caller
    ///
    /// Server errors are prefixed with the failure kind so the response is
    /// never an unexplained 500.
    pub fn detail(&self) -> String {
        if self.is_client_error() {
            self.to_string()
        } else {
            format!("Predict failed: {}: {}", self.kind(), self)
        }
    }
}

/// Failure to load or validate an artifact
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("artifact path does not exist: {}", .0.display())]
    NotFound(PathBuf),

    #[error("unsupported artifact format: {0}")]
    UnsupportedFormat(String),

    #[error("failed to read artifact {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON artifact: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid YAML artifact: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Required keys are absent
    #[error("invalid artifact, missing keys: {}", .0.join(", "))]
    MissingKeys(Vec<&'static str>),

    /// Keys are present but disagree with each other
    #[error("inconsistent artifact: {0}")]
    Inconsistent(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_classification() {
        assert!(PredictError::InvalidBody("x".into()).is_client_error());
        assert!(PredictError::MissingFields(vec!["year".into()]).is_client_error());
        assert!(PredictError::MissingColumns(vec!["color".into()]).is_client_error());
        assert!(!PredictError::NonFinite(f64::NAN).is_client_error());
        assert!(!PredictError::ShapeMismatch {
            expected: 3,
            actual: 2
        }
        .is_client_error());
    }

    #[test]
    fn test_server_detail_carries_kind() {
        let err = PredictError::UnknownCategory {
            column: "fuel_id".into(),
            value: 42,
        };
        assert_eq!(
            err.detail(),
            "Predict failed: UnknownCategory: Found unknown category 42 in column 'fuel_id' during transform"
        );
    }

    #[test]
    fn test_client_detail_lists_names() {
        let err = PredictError::MissingColumns(vec!["color".into(), "doors".into()]);
        assert_eq!(err.detail(), "Missing columns: color, doors");
        assert_eq!(
            err.missing(),
            Some(&["color".to_string(), "doors".to_string()][..])
        );
    }
}
