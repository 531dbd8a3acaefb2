//! Fitted numeric scalers

use serde::{Deserialize, Serialize};

/// Numeric column scaler, fitted offline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Scaler {
    /// `(x - mean) / scale`
    Standard { mean: Vec<f64>, scale: Vec<f64> },
    /// `x * scale + min`
    MinMax { min: Vec<f64>, scale: Vec<f64> },
}

impl Scaler {
    /// Number of columns the scaler was fitted on
    pub fn n_features(&self) -> usize {
        match self {
            Scaler::Standard { mean, .. } => mean.len(),
            Scaler::MinMax { min, .. } => min.len(),
        }
    }

    /// Check that the parameter vectors agree in length
    pub fn validate(&self) -> Result<(), String> {
        let (name, offset, scale) = match self {
            Scaler::Standard { mean, scale } => ("mean", mean, scale),
            Scaler::MinMax { min, scale } => ("min", min, scale),
        };
        if offset.len() != scale.len() {
            return Err(format!(
                "scaler has {} {} values but {} scale values",
                offset.len(),
                name,
                scale.len()
            ));
        }
        Ok(())
    }

    /// Scale one row. `values` must have `n_features()` entries.
    pub fn transform(&self, values: &[f64]) -> Vec<f64> {
        match self {
            Scaler::Standard { mean, scale } => values
                .iter()
                .zip(mean.iter().zip(scale))
                .map(|(x, (m, s))| {
                    // Constant columns are fitted with scale 0
                    let s = if *s == 0.0 { 1.0 } else { *s };
                    (x - m) / s
                })
                .collect(),
            Scaler::MinMax { min, scale } => values
                .iter()
                .zip(min.iter().zip(scale))
                .map(|(x, (m, s))| x * s + m)
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_scaler() {
        let scaler = Scaler::Standard {
            mean: vec![2010.0, 50000.0],
            scale: vec![5.0, 20000.0],
        };
        assert_eq!(scaler.transform(&[2015.0, 60000.0]), vec![1.0, 0.5]);
    }

    #[test]
    fn test_standard_scaler_zero_scale() {
        let scaler = Scaler::Standard {
            mean: vec![3.0],
            scale: vec![0.0],
        };
        assert_eq!(scaler.transform(&[4.0]), vec![1.0]);
    }

    #[test]
    fn test_min_max_scaler() {
        let scaler = Scaler::MinMax {
            min: vec![-1.0],
            scale: vec![0.1],
        };
        assert_eq!(scaler.transform(&[20.0]), vec![1.0]);
    }

    #[test]
    fn test_validate_length_mismatch() {
        let scaler = Scaler::Standard {
            mean: vec![1.0, 2.0],
            scale: vec![1.0],
        };
        assert!(scaler.validate().is_err());
    }

    #[test]
    fn test_deserialize_tagged() {
        let json = r#"{"kind": "min_max", "min": [0.0], "scale": [2.0]}"#;
        let scaler: Scaler = serde_json::from_str(json).unwrap();
        assert_eq!(scaler.n_features(), 1);
    }
}
