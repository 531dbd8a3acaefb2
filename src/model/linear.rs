//! Ordinary least squares / ridge style linear model

use serde::{Deserialize, Serialize};

use super::Regress;
use crate::error::PredictError;
use crate::preprocess::SparseRow;

/// `y = coef · x + intercept`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    pub coef: Vec<f64>,
    #[serde(default)]
    pub intercept: f64,
}

impl Regress for LinearModel {
    fn n_features(&self) -> usize {
        self.coef.len()
    }

    fn predict(&self, features: &SparseRow) -> Result<f64, PredictError> {
        if features.width() != self.coef.len() {
            return Err(PredictError::ShapeMismatch {
                expected: self.coef.len(),
                actual: features.width(),
            });
        }

        let y = features.dot(&self.coef) + self.intercept;
        if !y.is_finite() {
            return Err(PredictError::NonFinite(y));
        }
        Ok(y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predict() {
        let model = LinearModel {
            coef: vec![2.0, -1.0, 0.5],
            intercept: 10.0,
        };
        let x = SparseRow::from_dense(&[1.0, 3.0, 4.0]);
        assert_eq!(model.predict(&x).unwrap(), 11.0);
    }

    #[test]
    fn test_shape_mismatch() {
        let model = LinearModel {
            coef: vec![1.0, 1.0],
            intercept: 0.0,
        };
        let err = model.predict(&SparseRow::from_dense(&[1.0])).unwrap_err();
        assert_eq!(
            err,
            PredictError::ShapeMismatch {
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn test_non_finite() {
        let model = LinearModel {
            coef: vec![f64::MAX],
            intercept: 0.0,
        };
        let err = model
            .predict(&SparseRow::from_dense(&[10.0]))
            .unwrap_err();
        assert_eq!(err.kind(), "NonFinite");
    }
}
