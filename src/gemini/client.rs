//! Gemini `generateContent` API client.
//!
//! Sends the sketch inline alongside the style prompt and asks for both TEXT
//! and IMAGE response modalities. Pure parsing in `parse_response` for
//! testability.

use std::time::Duration;

use super::config::GeminiConfig;
use super::types::{GeminiError, GenerateImage};

// =============================================================================
// CLIENT
// =============================================================================

pub struct GeminiClient {
    http: reqwest::Client,
    config: GeminiConfig,
}

impl GeminiClient {
    /// Build a client from an explicit config.
    ///
    /// # Errors
    ///
    /// Returns [`GeminiError::HttpClientBuild`] if the HTTP client cannot be
    /// constructed.
    pub fn new(config: GeminiConfig) -> Result<Self, GeminiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| GeminiError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, config })
    }

    /// Build a client from environment variables.
    ///
    /// # Errors
    ///
    /// Returns a [`GeminiError`] when the API key is absent or the HTTP
    /// client cannot be constructed.
    pub fn from_env() -> Result<Self, GeminiError> {
        Self::new(GeminiConfig::from_env()?)
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.config.model
    }
}

#[async_trait::async_trait]
impl GenerateImage for GeminiClient {
    async fn generate(
        &self,
        prompt: &str,
        sketch_base64: &str,
        mime_type: &str,
    ) -> Result<String, GeminiError> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.config.base_url, self.config.model
        );
        let body = build_request_body(prompt, sketch_base64, mime_type);

        let response = self
            .http
            .post(&url)
            .query(&[("key", self.config.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|e| GeminiError::ApiRequest(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| GeminiError::ApiRequest(e.to_string()))?;

        if status != 200 {
            return Err(GeminiError::ApiResponse { status, body: truncate_error_body(text) });
        }

        parse_response(&text)
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(serde::Serialize)]
struct ApiRequest<'a> {
    contents: Vec<RequestContent<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
    #[serde(rename = "safetySettings")]
    safety_settings: Vec<SafetySetting>,
}

#[derive(serde::Serialize)]
struct RequestContent<'a> {
    role: &'a str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(serde::Serialize)]
enum RequestPart<'a> {
    #[serde(rename = "text")]
    Text(&'a str),
    #[serde(rename = "inlineData")]
    InlineData {
        #[serde(rename = "mimeType")]
        mime_type: &'a str,
        data: &'a str,
    },
}

#[derive(serde::Serialize)]
struct GenerationConfig {
    #[serde(rename = "responseModalities")]
    response_modalities: [&'static str; 2],
}

#[derive(serde::Serialize)]
struct SafetySetting {
    category: &'static str,
    threshold: &'static str,
}

const BLOCKED_CATEGORIES: [&str; 4] = [
    "HARM_CATEGORY_SEXUALLY_EXPLICIT",
    "HARM_CATEGORY_HATE_SPEECH",
    "HARM_CATEGORY_HARASSMENT",
    "HARM_CATEGORY_DANGEROUS_CONTENT",
];

#[derive(serde::Deserialize)]
struct ApiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(serde::Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(serde::Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(serde::Deserialize)]
struct ResponsePart {
    #[serde(rename = "inlineData")]
    inline_data: Option<InlineData>,
}

#[derive(serde::Deserialize)]
struct InlineData {
    #[serde(rename = "mimeType", default)]
    mime_type: String,
    data: Option<String>,
}

// =============================================================================
// REQUEST / PARSING
// =============================================================================

fn build_request_body<'a>(prompt: &'a str, sketch_base64: &'a str, mime_type: &'a str) -> ApiRequest<'a> {
    ApiRequest {
        contents: vec![RequestContent {
            role: "user",
            parts: vec![
                RequestPart::Text(prompt),
                RequestPart::InlineData { mime_type, data: sketch_base64 },
            ],
        }],
        generation_config: GenerationConfig { response_modalities: ["TEXT", "IMAGE"] },
        safety_settings: BLOCKED_CATEGORIES
            .into_iter()
            .map(|category| SafetySetting { category, threshold: "BLOCK_MEDIUM_AND_ABOVE" })
            .collect(),
    }
}

const MAX_ERROR_BODY_LEN: usize = 300;

/// Cap an error body so the diagnostic fits in a log line.
fn truncate_error_body(mut body: String) -> String {
    if body.len() > MAX_ERROR_BODY_LEN {
        let mut cut = MAX_ERROR_BODY_LEN;
        while !body.is_char_boundary(cut) {
            cut -= 1;
        }
        body.truncate(cut);
        body.push_str("...");
    }
    body
}

/// Extract the first image part from a `generateContent` response body.
fn parse_response(json: &str) -> Result<String, GeminiError> {
    let api: ApiResponse = serde_json::from_str(json).map_err(|e| GeminiError::ApiParse(e.to_string()))?;

    api.candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| content.parts)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|part| part.inline_data)
        .find(|inline| inline.mime_type.starts_with("image/"))
        .and_then(|inline| inline.data)
        .ok_or(GeminiError::NoImage)
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
