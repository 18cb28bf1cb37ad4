//! Generation endpoint.
//!
//! `POST /api/generate` accepts the canvas contents plus a style name and
//! responds with the generated image inline and a short-lived stored URL.
//! All failures use the `{ "success": false, "error": ... }` body shape.

use std::net::SocketAddr;

use axum::extract::rejection::JsonRejection;
use axum::extract::{ConnectInfo, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::services::generate::{self as service, GenerateError};
use crate::state::AppState;
use crate::styles;

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    #[serde(default)]
    pub image_data: Option<String>,
    #[serde(default)]
    pub style: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateData {
    pub prompt: String,
    pub image_base64: String,
    pub image_url: Option<String>,
    pub style: String,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub success: bool,
    pub data: GenerateData,
}

// =============================================================================
// ERROR RESPONSE
// =============================================================================

/// API error carrying the status code and client-facing message.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn bad_request(message: String) -> Self {
        Self { status: StatusCode::BAD_REQUEST, message }
    }
}

impl From<GenerateError> for ApiError {
    fn from(err: GenerateError) -> Self {
        Self { status: generate_error_to_status(&err), message: err.to_string() }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "success": false, "error": self.message });
        (self.status, Json(body)).into_response()
    }
}

pub(crate) fn generate_error_to_status(err: &GenerateError) -> StatusCode {
    match err {
        GenerateError::InvalidSketch(_) => StatusCode::BAD_REQUEST,
        GenerateError::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
        GenerateError::NotConfigured | GenerateError::Provider(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

// =============================================================================
// HANDLER
// =============================================================================

/// `POST /api/generate` — run the sketch-to-image pipeline.
pub async fn generate(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    body: Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<Json<GenerateResponse>, ApiError> {
    let Json(body) = body.map_err(|e| ApiError::bad_request(format!("Invalid JSON: {e}")))?;

    let image_data = body.image_data.unwrap_or_default();
    let style = body.style.unwrap_or_else(|| styles::DEFAULT_STYLE.to_string());

    let result = service::generate_from_sketch(&state, addr.ip(), &image_data, &style)
        .await
        .map_err(|e| {
            warn!(error = %e, retryable = e.retryable(), client = %addr.ip(), "generate request failed");
            ApiError::from(e)
        })?;

    Ok(Json(GenerateResponse {
        success: true,
        data: GenerateData {
            prompt: result.prompt,
            image_base64: result.image_base64,
            image_url: result.image_url,
            style: result.style,
        },
    }))
}

#[cfg(test)]
#[path = "generate_test.rs"]
mod tests;
