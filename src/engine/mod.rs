//! Core inference engine
//!
//! - [`PredictRequest`]: the fixed request schema and its validation
//! - [`Predictor`]: column check, feature alignment and model invocation

mod predictor;
mod request;

pub use predictor::Predictor;
pub use request::PredictRequest;
