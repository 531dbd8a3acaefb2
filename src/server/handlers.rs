//! HTTP request handlers

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Json, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::artifact::ArtifactSummary;
use crate::engine::Predictor;
use crate::error::PredictError;

/// Shared application state
///
/// Built once before the listener starts and only read afterwards.
pub struct AppState {
    pub predictor: Predictor,
    pub artifact_path: PathBuf,
    summary: ArtifactSummary,
}

impl AppState {
    pub fn new(predictor: Predictor, artifact_path: PathBuf) -> Self {
        let summary = predictor.artifact().summary();
        Self {
            predictor,
            artifact_path,
            summary,
        }
    }
}

/// Health check endpoint
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        ok: true,
        artifact_path: state.artifact_path.display().to_string(),
        artifact: state.summary.clone(),
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Price prediction endpoint
pub async fn predict(
    State(state): State<Arc<AppState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Response {
    let body = match body {
        Ok(Json(body)) => body,
        Err(rejection) => {
            return PredictError::InvalidBody(rejection.body_text()).into_response();
        }
    };

    match state.predictor.predict_value(body) {
        Ok(price) => (StatusCode::OK, Json(PredictResponse { price })).into_response(),
        Err(e) => e.into_response(),
    }
}

impl PredictError {
    /// HTTP status for this failure
    pub fn status_code(&self) -> StatusCode {
        if self.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for PredictError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(kind = self.kind(), "Predict failed: {}", self);
        } else {
            tracing::debug!(kind = self.kind(), "Rejected predict request: {}", self);
        }

        let body = ErrorResponse {
            detail: self.detail(),
            missing: self.missing().map(<[String]>::to_vec),
        };
        (status, Json(body)).into_response()
    }
}

// Request/Response types

#[derive(Debug, Serialize, Deserialize)]
pub struct PredictResponse {
    pub price: f64,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub ok: bool,
    pub artifact_path: String,
    #[serde(flatten)]
    pub artifact: ArtifactSummary,
    pub version: &'static str,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub missing: Option<Vec<String>>,
}
