//! Regression models
//!
//! A model exposes a single operation: predict one scalar from one
//! feature row. Models are deserialized from the artifact and never
//! mutated afterwards.

mod linear;

pub use linear::LinearModel;

use serde::{Deserialize, Serialize};

use crate::error::PredictError;
use crate::preprocess::SparseRow;

/// Single-row regression
pub trait Regress {
    /// Width of the feature row the model was fitted on
    fn n_features(&self) -> usize;

    /// Predict one value
    fn predict(&self, features: &SparseRow) -> Result<f64, PredictError>;
}

/// Any model an artifact can carry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Regressor {
    Linear(LinearModel),
}

impl Regress for Regressor {
    fn n_features(&self) -> usize {
        match self {
            Regressor::Linear(m) => m.n_features(),
        }
    }

    fn predict(&self, features: &SparseRow) -> Result<f64, PredictError> {
        match self {
            Regressor::Linear(m) => m.predict(features),
        }
    }
}
