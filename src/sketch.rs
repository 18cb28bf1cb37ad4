//! Sketch payload validation and data-URL handling.
//!
//! Clients submit the canvas contents either as a raw base64 string or as a
//! `data:image/...;base64,...` data URL. The handler needs the bare base64
//! payload plus a MIME type to forward inline to the image provider.

const MIN_IMAGE_DATA_LEN: usize = 10;
const DEFAULT_MIME_TYPE: &str = "image/png";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SketchError {
    #[error("No image data provided")]
    Missing,

    #[error("imageData is too short")]
    TooShort,

    #[error("Invalid data URL format")]
    InvalidDataUrl,
}

/// A validated sketch ready to send to the image provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SketchPayload {
    /// MIME type of the sketch, from the data URL prefix or `image/png`.
    pub mime_type: String,
    /// Bare base64 payload with any data-URL prefix stripped.
    pub data: String,
}

impl SketchPayload {
    /// Validate raw `imageData` and strip a data-URL prefix if present.
    ///
    /// # Errors
    ///
    /// Returns a [`SketchError`] when the payload is missing, shorter than
    /// the minimum length, or a malformed data URL.
    pub fn parse(image_data: &str) -> Result<Self, SketchError> {
        if image_data.is_empty() {
            return Err(SketchError::Missing);
        }
        if image_data.len() < MIN_IMAGE_DATA_LEN {
            return Err(SketchError::TooShort);
        }

        if image_data.starts_with("data:image") {
            let mut parts = image_data.splitn(3, ',');
            let header = parts.next().unwrap_or_default();
            let (Some(payload), None) = (parts.next(), parts.next()) else {
                return Err(SketchError::InvalidDataUrl);
            };

            // Header shape: "data:<mime>;base64". Anything unparseable keeps
            // the default MIME rather than rejecting the sketch.
            let mime_type = header
                .split(';')
                .next()
                .and_then(|s| s.strip_prefix("data:"))
                .filter(|s| !s.is_empty())
                .unwrap_or(DEFAULT_MIME_TYPE)
                .to_string();

            return Ok(Self { mime_type, data: payload.to_string() });
        }

        Ok(Self { mime_type: DEFAULT_MIME_TYPE.to_string(), data: image_data.to_string() })
    }
}

#[cfg(test)]
#[path = "sketch_test.rs"]
mod tests;
