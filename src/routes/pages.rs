//! Page shell.
//!
//! A static layout hosting the drawing widget: title, subtitle, the widget
//! mount node, and footer attribution. The widget itself is an external
//! bundle loaded from `/assets`; the shell mounts it once with no properties
//! and knows nothing about its internals.

use axum::response::Html;

const PAGE_SHELL: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>AI Sketch to Image</title>
<link rel="stylesheet" href="/assets/app.css">
</head>
<body>
<header>
<h1>AI Sketch to Image</h1>
<p class="subtitle">Transform your drawings into beautiful images with Gemini AI</p>
</header>
<main>
<div id="drawing-canvas"></div>
</main>
<footer>
<p>CLOUD TECHNOLOGY INFRASTRUCTURE (1-2025)</p>
<p>School of Information Technology, KMITL</p>
</footer>
<script src="/assets/drawing-canvas.js"></script>
</body>
</html>
"#;

/// `GET /` — the drawing page.
pub async fn index() -> Html<&'static str> {
    Html(PAGE_SHELL)
}

#[cfg(test)]
#[path = "pages_test.rs"]
mod tests;
