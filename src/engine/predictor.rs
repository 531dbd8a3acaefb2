//! Request → feature row → price

use std::sync::Arc;

use serde_json::Value;

use super::PredictRequest;
use crate::artifact::{Artifact, FeatureLayout, Pipeline};
use crate::error::PredictError;
use crate::model::Regress;
use crate::preprocess::{FeatureValue, SparseRow};

/// Runs predictions against a loaded artifact
///
/// Cloning is cheap; every clone shares the same read-only artifact.
#[derive(Debug, Clone)]
pub struct Predictor {
    artifact: Arc<Artifact>,
}

impl Predictor {
    /// Wrap a loaded artifact
    ///
    /// Columns the request schema cannot provide are logged here and
    /// reported to callers on every prediction.
    pub fn new(artifact: Artifact) -> Self {
        let unsatisfied: Vec<&str> = artifact
            .features()
            .required_columns()
            .into_iter()
            .filter(|c| !PredictRequest::FIELDS.iter().any(|f| f == c))
            .collect();
        if !unsatisfied.is_empty() {
            tracing::warn!(
                "Artifact requires columns not in the request schema: {}",
                unsatisfied.join(", ")
            );
        }

        Self {
            artifact: Arc::new(artifact),
        }
    }

    pub fn artifact(&self) -> &Artifact {
        &self.artifact
    }

    /// Validate an untyped body, then predict
    pub fn predict_value(&self, body: Value) -> Result<f64, PredictError> {
        let request = PredictRequest::from_value(body)?;
        self.predict(&request)
    }

    /// Predict the price for one request
    pub fn predict(&self, request: &PredictRequest) -> Result<f64, PredictError> {
        let features = self.features(request)?;
        self.artifact.model().predict(&features)
    }

    /// Build the feature row the model expects
    ///
    /// All required columns are checked before any transform runs.
    pub fn features(&self, request: &PredictRequest) -> Result<SparseRow, PredictError> {
        let layout = self.artifact.features();
        let values = lookup_columns(request, &layout.required_columns())?;

        match layout {
            FeatureLayout::Aligned { .. } => {
                let dense: Vec<f64> = values.iter().map(|v| v.as_f64()).collect();
                Ok(SparseRow::from_dense(&dense))
            }
            FeatureLayout::Pipeline(pipeline) => transform_pipeline(pipeline, &values),
        }
    }
}

/// Fetch columns by name, failing with every name the request lacks
fn lookup_columns(
    request: &PredictRequest,
    columns: &[&str],
) -> Result<Vec<FeatureValue>, PredictError> {
    let mut values = Vec::with_capacity(columns.len());
    let mut missing = Vec::new();

    for column in columns {
        match request.column(column) {
            Some(v) => values.push(v),
            None => missing.push(column.to_string()),
        }
    }

    if missing.is_empty() {
        Ok(values)
    } else {
        Err(PredictError::MissingColumns(missing))
    }
}

/// Scale numeric columns, encode categorical columns, numeric block first
fn transform_pipeline(
    pipeline: &Pipeline,
    values: &[FeatureValue],
) -> Result<SparseRow, PredictError> {
    let (numeric, categorical) = values.split_at(pipeline.numeric_columns.len());

    let numeric: Vec<f64> = numeric.iter().map(|v| v.as_f64()).collect();
    let scaled = SparseRow::from_dense(&pipeline.scaler.transform(&numeric));

    let names: Vec<&str> = pipeline
        .categorical_columns
        .iter()
        .map(String::as_str)
        .collect();
    let encoded = pipeline.encoder.transform(&names, categorical)?;

    Ok(SparseRow::hstack(&[scaled, encoded]))
}
