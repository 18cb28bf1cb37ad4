//! Gemini image-generation client.
//!
//! Thin HTTP wrapper around the `generateContent` endpoint, used to turn a
//! sketch (inline base64 image) plus a style prompt into a generated image.
//! The provider seam is the [`GenerateImage`] trait so the service layer can
//! be exercised with mocks.

pub mod client;
pub mod config;
pub mod types;

pub use client::GeminiClient;
pub use config::GeminiConfig;
pub use types::{GeminiError, GenerateImage};
