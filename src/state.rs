//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! It holds the optional image provider, the on-disk image store, and the
//! in-memory rate limiter. Clone is required by Axum, so inner fields are
//! Arc-wrapped or Clone.

use std::sync::Arc;

use crate::gemini::GenerateImage;
use crate::rate_limit::RateLimiter;
use crate::services::store::ImageStore;

#[derive(Clone)]
pub struct AppState {
    /// Optional image provider. `None` if `GEMINI_API_KEY` is not configured.
    pub generator: Option<Arc<dyn GenerateImage>>,
    /// On-disk store for generated images.
    pub store: Arc<ImageStore>,
    /// In-memory rate limiter for generation requests.
    pub rate_limiter: RateLimiter,
}

impl AppState {
    #[must_use]
    pub fn new(generator: Option<Arc<dyn GenerateImage>>, store: Arc<ImageStore>) -> Self {
        Self { generator, store, rate_limiter: RateLimiter::new() }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
