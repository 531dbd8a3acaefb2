//! carprice - vehicle price prediction server
//!
//! Serves a pre-trained regression model over HTTP. The model and the
//! preprocessing it was trained with are shipped as one artifact file,
//! loaded and validated once at startup.
//!
//! # Architecture
//!
//! - **artifact**: artifact format detection, loading, validation
//! - **preprocess**: fitted scaler, one-hot encoder, sparse feature row
//! - **model**: regressors exposing a single `predict`
//! - **engine**: request schema and the validate → align → predict path
//! - **server**: `GET /health`, `POST /predict`
//!
//! # Example
//!
//! ```bash
//! # Start server
//! carprice serve --artifact artifacts/linear_simple.json --port 8000
//!
//! # Inspect an artifact
//! carprice info --artifact artifacts/linear_simple.json
//!
//! # Single prediction
//! carprice predict --input '{"year": 2015, "odometer": 60000.0, "manufacturer_id": 3,
//!   "fuel_id": 1, "transmission_id": 0, "type_id": 2, "age_car": 9}'
//! ```

pub mod artifact;
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod model;
pub mod preprocess;
pub mod server;

// Re-export key types
pub use artifact::{Artifact, FeatureLayout};
pub use config::{ServerConfig, ServiceConfig};
pub use engine::{PredictRequest, Predictor};
pub use error::{ArtifactError, PredictError};
