//! Router assembly.
//!
//! The page shell is served at `/`, the generation API under `/api`, stored
//! images under `/images`, and the opaque drawing-widget bundle under
//! `/assets`.

pub mod generate;
pub mod pages;

use std::path::PathBuf;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let images_service = ServeDir::new(state.store.dir());

    Router::new()
        .route("/", get(pages::index))
        .route("/api/generate", post(generate::generate))
        .route("/healthz", get(healthz))
        .nest_service("/images", images_service)
        .nest_service("/assets", ServeDir::new(assets_dir()))
        .layer(cors)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Resolve the path to the drawing-widget bundle directory.
fn assets_dir() -> PathBuf {
    std::env::var("ASSETS_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets"))
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
