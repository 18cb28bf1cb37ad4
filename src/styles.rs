//! Style presets for sketch-to-image prompts.
//!
//! Each preset maps a client-facing style name to a prompt fragment. Unknown
//! styles fall back to a generic fragment rather than failing the request, so
//! the API tolerates clients shipping newer style lists than the server.

pub const DEFAULT_STYLE: &str = "realistic";

const FALLBACK_FRAGMENT: &str = "high quality artistic style";

/// All style names with dedicated prompt fragments.
pub const KNOWN_STYLES: [&str; 10] = [
    "realistic",
    "anime",
    "cartoon",
    "oil-painting",
    "watercolor",
    "sketch",
    "3d-render",
    "pixel-art",
    "cyberpunk",
    "fantasy",
];

/// Prompt fragment for a style name. Unknown names get the generic fallback.
#[must_use]
pub fn prompt_fragment(style: &str) -> &'static str {
    match style {
        "realistic" => {
            "photorealistic, highly detailed, professional photography, natural lighting, 8k quality"
        }
        "anime" => "anime style, vibrant colors, Japanese animation aesthetic, cel-shaded, manga inspired",
        "cartoon" => "cartoon style, bold colors, playful illustration, animated feel, exaggerated features",
        "oil-painting" => {
            "oil painting style, classical art, textured brushstrokes, rich colors, artistic masterpiece"
        }
        "watercolor" => "watercolor painting, soft washes, delicate colors, artistic, painted on paper texture",
        "sketch" => {
            "detailed pencil sketch, hand-drawn, artistic line work, shading and hatching, graphite drawing"
        }
        "3d-render" => {
            "3D rendered, computer graphics, smooth surfaces, professional CGI, octane render, unreal engine"
        }
        "pixel-art" => "pixel art style, retro gaming aesthetic, 8-bit or 16-bit graphics, pixelated, sprite art",
        "cyberpunk" => {
            "cyberpunk style, neon lights, futuristic, sci-fi aesthetic, dark with bright accents, technological"
        }
        "fantasy" => {
            "fantasy art style, magical atmosphere, ethereal, epic illustration, mystical and enchanting"
        }
        _ => FALLBACK_FRAGMENT,
    }
}

/// Build the full generation prompt for a style.
#[must_use]
pub fn full_prompt(style: &str) -> String {
    format!(
        "Transform this sketch into a beautiful image, {}, masterpiece quality, professional artwork",
        prompt_fragment(style)
    )
}

#[cfg(test)]
#[path = "styles_test.rs"]
mod tests;
