use super::*;
use crate::gemini::{GeminiError, GenerateImage};
use crate::state::test_helpers;
use std::net::{IpAddr, Ipv4Addr};
use std::sync::{Arc, Mutex};

const CLIENT: IpAddr = IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1));
const SKETCH: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUg";

// =========================================================================
// MockGenerator
// =========================================================================

struct MockGenerator {
    responses: Mutex<Vec<Result<String, GeminiError>>>,
    calls: Mutex<Vec<(String, String, String)>>,
}

impl MockGenerator {
    fn new(responses: Vec<Result<String, GeminiError>>) -> Arc<Self> {
        Arc::new(Self { responses: Mutex::new(responses), calls: Mutex::new(Vec::new()) })
    }
}

#[async_trait::async_trait]
impl GenerateImage for MockGenerator {
    async fn generate(
        &self,
        prompt: &str,
        sketch_base64: &str,
        mime_type: &str,
    ) -> Result<String, GeminiError> {
        self.calls
            .lock()
            .unwrap()
            .push((prompt.to_string(), sketch_base64.to_string(), mime_type.to_string()));
        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            // "image" in base64
            Ok("aW1hZ2U=".to_string())
        } else {
            responses.remove(0)
        }
    }
}

// =========================================================================
// generate_from_sketch
// =========================================================================

#[tokio::test]
async fn success_returns_inline_image_and_stored_url() {
    let mock = MockGenerator::new(vec![]);
    let (state, dir) = test_helpers::test_app_state(Some(mock.clone() as Arc<dyn GenerateImage>));

    let result = generate_from_sketch(&state, CLIENT, SKETCH, "anime").await.unwrap();

    assert!(result.prompt.contains("anime style"));
    assert_eq!(result.image_base64, "data:image/png;base64,aW1hZ2U=");
    assert_eq!(result.style, "anime");

    let url = result.image_url.expect("image should be stored");
    let filename = url.strip_prefix("/images/").unwrap();
    let written = std::fs::read(dir.path().join(filename)).unwrap();
    assert_eq!(written, b"image");
}

#[tokio::test]
async fn provider_receives_stripped_sketch_and_mime() {
    let mock = MockGenerator::new(vec![]);
    let (state, _dir) = test_helpers::test_app_state(Some(mock.clone() as Arc<dyn GenerateImage>));

    generate_from_sketch(&state, CLIENT, "data:image/jpeg;base64,/9j/4AAQSkZJRg", "realistic")
        .await
        .unwrap();

    let calls = mock.calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    let (prompt, sketch, mime) = &calls[0];
    assert!(prompt.contains("photorealistic"));
    assert_eq!(sketch, "/9j/4AAQSkZJRg");
    assert_eq!(mime, "image/jpeg");
}

#[tokio::test]
async fn invalid_sketch_is_rejected_before_provider_or_limits() {
    // No generator configured: a validation failure must win over
    // NotConfigured, proving validation runs first.
    let (state, _dir) = test_helpers::test_app_state(None);

    let err = generate_from_sketch(&state, CLIENT, "", "realistic").await.unwrap_err();
    assert!(matches!(err, GenerateError::InvalidSketch(SketchError::Missing)));

    let err = generate_from_sketch(&state, CLIENT, "short", "realistic").await.unwrap_err();
    assert!(matches!(err, GenerateError::InvalidSketch(SketchError::TooShort)));
}

#[tokio::test]
async fn missing_generator_is_not_configured() {
    let (state, _dir) = test_helpers::test_app_state(None);

    let err = generate_from_sketch(&state, CLIENT, SKETCH, "realistic").await.unwrap_err();
    assert!(matches!(err, GenerateError::NotConfigured));
}

#[tokio::test]
async fn provider_failure_is_surfaced() {
    let mock = MockGenerator::new(vec![Err(GeminiError::NoImage)]);
    let (state, _dir) = test_helpers::test_app_state(Some(mock as Arc<dyn GenerateImage>));

    let err = generate_from_sketch(&state, CLIENT, SKETCH, "realistic").await.unwrap_err();
    assert!(matches!(err, GenerateError::Provider(GeminiError::NoImage)));
}

#[tokio::test]
async fn per_client_limit_rejects_after_budget() {
    let mock = MockGenerator::new(vec![]);
    let (state, _dir) = test_helpers::test_app_state(Some(mock as Arc<dyn GenerateImage>));

    // Default per-client limit is 10 requests/min.
    for _ in 0..10 {
        generate_from_sketch(&state, CLIENT, SKETCH, "realistic").await.unwrap();
    }
    let err = generate_from_sketch(&state, CLIENT, SKETCH, "realistic").await.unwrap_err();
    assert!(matches!(err, GenerateError::RateLimited(_)));
}

#[test]
fn rate_limit_and_transient_provider_errors_are_retryable() {
    let rate_limited = GenerateError::RateLimited(crate::rate_limit::RateLimitError::GlobalExceeded {
        limit: 20,
        window_secs: 60,
    });
    assert!(rate_limited.retryable());

    let overloaded =
        GenerateError::Provider(GeminiError::ApiResponse { status: 503, body: String::new() });
    assert!(overloaded.retryable());
}

#[test]
fn validation_and_config_errors_are_not_retryable() {
    assert!(!GenerateError::NotConfigured.retryable());
    assert!(!GenerateError::InvalidSketch(SketchError::TooShort).retryable());
    assert!(!GenerateError::Provider(GeminiError::NoImage).retryable());
}

#[tokio::test]
async fn undecodable_provider_output_skips_store() {
    let mock = MockGenerator::new(vec![Ok("not valid base64 !!!".to_string())]);
    let (state, _dir) = test_helpers::test_app_state(Some(mock as Arc<dyn GenerateImage>));

    let result = generate_from_sketch(&state, CLIENT, SKETCH, "realistic").await.unwrap();
    assert!(result.image_url.is_none());
    assert!(result.image_base64.starts_with("data:image/png;base64,"));
}

#[tokio::test]
async fn store_failure_is_tolerated() {
    let mock = MockGenerator::new(vec![]);
    let state = test_helpers::test_app_state_with_broken_store(Some(mock as Arc<dyn GenerateImage>));

    let result = generate_from_sketch(&state, CLIENT, SKETCH, "realistic").await.unwrap();
    assert!(result.image_url.is_none());
    assert_eq!(result.image_base64, "data:image/png;base64,aW1hZ2U=");
}
