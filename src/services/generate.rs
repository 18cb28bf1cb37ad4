//! Generation service — sketch payload → provider call → stored image.
//!
//! DESIGN
//! ======
//! Validates the submitted sketch, applies rate limits, sends the sketch with
//! the style prompt to the image provider, then persists the result to the
//! image store. Storage is best-effort: a failed write downgrades the
//! response to `image_url: None` instead of failing the request, since the
//! client already receives the image inline.

use std::net::IpAddr;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use tracing::{info, warn};
use uuid::Uuid;

use crate::rate_limit::RateLimitError;
use crate::sketch::{SketchError, SketchPayload};
use crate::state::AppState;
use crate::styles;

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("image generation not configured")]
    NotConfigured,
    #[error(transparent)]
    InvalidSketch(#[from] SketchError),
    #[error(transparent)]
    RateLimited(#[from] RateLimitError),
    #[error("image generation failed: {0}")]
    Provider(#[from] crate::gemini::GeminiError),
}

impl GenerateError {
    /// Whether the client may retry the request as-is.
    #[must_use]
    pub fn retryable(&self) -> bool {
        match self {
            Self::RateLimited(_) => true,
            Self::Provider(e) => e.retryable(),
            Self::NotConfigured | Self::InvalidSketch(_) => false,
        }
    }
}

/// Result of a successful generation.
#[derive(Debug)]
pub struct GeneratedImage {
    /// The full prompt sent to the provider.
    pub prompt: String,
    /// Generated image as a `data:image/png;base64,...` URL.
    pub image_base64: String,
    /// Short-lived local URL, `None` when storage failed.
    pub image_url: Option<String>,
    /// Style the image was generated with, echoed back to the client.
    pub style: String,
}

// =============================================================================
// MAIN ENTRY POINT
// =============================================================================

/// Run the full sketch-to-image pipeline for one request.
///
/// # Errors
///
/// Returns a [`GenerateError`] when the sketch is invalid, the client is
/// rate-limited, the provider is unconfigured, or generation fails.
pub async fn generate_from_sketch(
    state: &AppState,
    client: IpAddr,
    image_data: &str,
    style: &str,
) -> Result<GeneratedImage, GenerateError> {
    let request_id = Uuid::new_v4();
    let sketch = SketchPayload::parse(image_data)?;
    state.rate_limiter.check_and_record(client)?;

    let Some(generator) = &state.generator else {
        return Err(GenerateError::NotConfigured);
    };

    let prompt = styles::full_prompt(style);
    info!(%request_id, %client, style, mime = %sketch.mime_type, sketch_len = sketch.data.len(), "generate: calling provider");

    let image_base64 = generator.generate(&prompt, &sketch.data, &sketch.mime_type).await?;
    info!(%request_id, image_len = image_base64.len(), "generate: image received");

    let image_url = store_image(state, &image_base64, style).await;

    Ok(GeneratedImage {
        prompt,
        image_base64: format!("data:image/png;base64,{image_base64}"),
        image_url,
        style: style.to_string(),
    })
}

/// Decode and persist the generated image. Failures are logged, not raised.
async fn store_image(state: &AppState, image_base64: &str, style: &str) -> Option<String> {
    let bytes = match BASE64.decode(image_base64) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(error = %e, "generated image is not valid base64; skipping store");
            return None;
        }
    };

    match state.store.save_png(&bytes, style).await {
        Ok(url) => {
            info!(%url, "generated image stored");
            Some(url)
        }
        Err(e) => {
            warn!(error = %e, "image store write failed");
            None
        }
    }
}

#[cfg(test)]
#[path = "generate_test.rs"]
mod tests;
