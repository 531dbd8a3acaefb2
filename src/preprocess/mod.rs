//! Feature preprocessing
//!
//! Fitted transforms applied between the request and the model:
//! - [`Scaler`]: numeric columns to a dense normalized block
//! - [`OneHotEncoder`]: categorical codes to a sparse indicator block
//! - [`SparseRow`]: the single-row representation both blocks end up in

mod encoder;
mod scaler;
mod sparse;

pub use encoder::{HandleUnknown, OneHotEncoder};
pub use scaler::Scaler;
pub use sparse::SparseRow;

use std::fmt;

/// A single request field value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FeatureValue {
    Int(i64),
    Float(f64),
}

impl FeatureValue {
    pub fn as_f64(self) -> f64 {
        match self {
            FeatureValue::Int(v) => v as f64,
            FeatureValue::Float(v) => v,
        }
    }

    /// Integer category code, if the value is integral
    pub fn as_code(self) -> Option<i64> {
        match self {
            FeatureValue::Int(v) => Some(v),
            FeatureValue::Float(v) if v.fract() == 0.0 && v.is_finite() => Some(v as i64),
            FeatureValue::Float(_) => None,
        }
    }
}

impl fmt::Display for FeatureValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureValue::Int(v) => write!(f, "{}", v),
            FeatureValue::Float(v) => write!(f, "{}", v),
        }
    }
}
