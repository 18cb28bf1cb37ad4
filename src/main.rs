mod gemini;
mod rate_limit;
mod routes;
mod services;
mod sketch;
mod state;
mod styles;

use std::net::SocketAddr;
use std::sync::Arc;

use crate::gemini::GenerateImage;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()
        .expect("invalid PORT");

    // Initialize the image provider (non-fatal: generation disabled if the
    // API key is missing).
    let generator: Option<Arc<dyn GenerateImage>> = match gemini::GeminiClient::from_env() {
        Ok(client) => {
            tracing::info!(model = client.model(), "Gemini client initialized");
            Some(Arc::new(client))
        }
        Err(e) => {
            tracing::warn!(error = %e, "Gemini client not configured — generation disabled");
            None
        }
    };

    let store = Arc::new(services::store::ImageStore::from_env());
    store.init().await.expect("image store init failed");

    let state = state::AppState::new(generator, store.clone());

    // Spawn the background image expiry sweep.
    let _sweep = services::store::spawn_sweep_task(store);

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "sketchgen listening");
    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .await
        .expect("server failed");
}
