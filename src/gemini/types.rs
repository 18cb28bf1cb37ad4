//! Provider-neutral image generation trait and errors.

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by image provider operations.
#[derive(Debug, thiserror::Error)]
pub enum GeminiError {
    /// The required API key environment variable is not set.
    #[error("missing API key: env var {var} not set")]
    MissingApiKey { var: String },

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),

    /// The HTTP request to the provider failed.
    #[error("API request failed: {0}")]
    ApiRequest(String),

    /// The provider returned a non-success HTTP status. The body is
    /// truncated at construction so the diagnostic stays log-sized.
    #[error("API response error: status {status}: {body}")]
    ApiResponse { status: u16, body: String },

    /// The provider response body could not be deserialized.
    #[error("API response parse failed: {0}")]
    ApiParse(String),

    /// The provider response carried no image part.
    #[error("no image in provider response")]
    NoImage,
}

impl GeminiError {
    /// Whether the failure is worth retrying from the client's side.
    #[must_use]
    pub fn retryable(&self) -> bool {
        matches!(self, Self::ApiRequest(_) | Self::ApiResponse { status: 429 | 500..=599, .. })
    }
}

// =============================================================================
// GENERATE TRAIT
// =============================================================================

/// Provider-neutral async trait for sketch-to-image generation. Enables
/// mocking in tests.
#[async_trait::async_trait]
pub trait GenerateImage: Send + Sync {
    /// Generate an image from a base64 sketch and a text prompt.
    ///
    /// Returns the generated image as bare base64 PNG data.
    ///
    /// # Errors
    ///
    /// Returns a [`GeminiError`] if the request fails, the response is
    /// malformed, or no image part is present.
    async fn generate(
        &self,
        prompt: &str,
        sketch_base64: &str,
        mime_type: &str,
    ) -> Result<String, GeminiError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_and_server_errors_are_retryable() {
        assert!(GeminiError::ApiRequest("timeout".into()).retryable());
        assert!(GeminiError::ApiResponse { status: 429, body: String::new() }.retryable());
        assert!(GeminiError::ApiResponse { status: 503, body: String::new() }.retryable());
    }

    #[test]
    fn api_response_error_surfaces_status_and_body() {
        let err = GeminiError::ApiResponse { status: 400, body: "API key expired".into() };
        let msg = err.to_string();
        assert!(msg.contains("400"));
        assert!(msg.contains("API key expired"));
    }

    #[test]
    fn client_errors_are_not_retryable() {
        assert!(!GeminiError::ApiResponse { status: 400, body: String::new() }.retryable());
        assert!(!GeminiError::NoImage.retryable());
        assert!(!GeminiError::MissingApiKey { var: "GEMINI_API_KEY".into() }.retryable());
    }
}
