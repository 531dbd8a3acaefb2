//! Fitted one-hot encoder for integer category codes

use serde::{Deserialize, Serialize};

use super::{FeatureValue, SparseRow};
use crate::error::PredictError;

/// What to do with a code absent from the fitted categories
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandleUnknown {
    /// Fail the transform
    #[default]
    Error,
    /// Emit an all-zero block for the column
    Ignore,
}

/// One-hot encoder
///
/// `categories[i]` holds the fitted codes of the i-th categorical column in
/// output order. The encoded width is the total number of codes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OneHotEncoder {
    pub categories: Vec<Vec<i64>>,
    #[serde(default)]
    pub handle_unknown: HandleUnknown,
}

impl OneHotEncoder {
    /// Number of input columns
    pub fn n_features_in(&self) -> usize {
        self.categories.len()
    }

    /// Width of the encoded block
    pub fn n_features_out(&self) -> usize {
        self.categories.iter().map(Vec::len).sum()
    }

    /// Reject encoders with an empty category list
    pub fn validate(&self) -> Result<(), String> {
        match self.categories.iter().position(Vec::is_empty) {
            Some(i) => Err(format!("encoder column {} has no categories", i)),
            None => Ok(()),
        }
    }

    /// Encode one row
    ///
    /// `columns` names the inputs for error messages; it must be as long
    /// as `values` and `categories`.
    pub fn transform(
        &self,
        columns: &[&str],
        values: &[FeatureValue],
    ) -> Result<SparseRow, PredictError> {
        let mut row = SparseRow::zeros(self.n_features_out());
        let mut offset = 0;

        for ((column, value), categories) in columns.iter().zip(values).zip(&self.categories) {
            let code = value.as_code().ok_or_else(|| PredictError::TypeMismatch {
                column: column.to_string(),
                message: format!("expected an integer category code, got {}", value),
            })?;

            match categories.iter().position(|c| *c == code) {
                Some(i) => row.push(offset + i, 1.0),
                None if self.handle_unknown == HandleUnknown::Ignore => {}
                None => {
                    return Err(PredictError::UnknownCategory {
                        column: column.to_string(),
                        value: code,
                    })
                }
            }
            offset += categories.len();
        }

        Ok(row)
    }
}
