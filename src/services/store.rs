//! Image store — local disk persistence for generated images.
//!
//! DESIGN
//! ======
//! Generated images are written under a single directory and served back as
//! static files at `/images/{filename}`. A background sweep task deletes
//! files older than the TTL, so stored URLs are short-lived (default 1h).
//!
//! ERROR HANDLING
//! ==============
//! Store failures never fail a generation request: the caller logs the error
//! and responds with a null `imageUrl`, still carrying the inline image.

use std::path::{Path, PathBuf};
use std::time::Duration;

use time::OffsetDateTime;
use time::macros::format_description;
use tokio::task::JoinHandle;
use tracing::{info, warn};

const DEFAULT_IMAGE_DIR: &str = "generated-images";
const DEFAULT_IMAGE_TTL_SECS: u64 = 3600;
const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 300;

/// Public URL prefix the router serves the image directory under.
pub const IMAGE_URL_PREFIX: &str = "/images";

fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

// =============================================================================
// IMAGE STORE
// =============================================================================

pub struct ImageStore {
    dir: PathBuf,
}

impl ImageStore {
    #[must_use]
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Build a store from the `IMAGE_DIR` environment variable.
    #[must_use]
    pub fn from_env() -> Self {
        let dir = std::env::var("IMAGE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_IMAGE_DIR));
        Self::new(dir)
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create the image directory if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error when the directory cannot be created.
    pub async fn init(&self) -> std::io::Result<()> {
        tokio::fs::create_dir_all(&self.dir).await
    }

    /// Write PNG bytes to disk and return the public URL path.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error when the write fails.
    pub async fn save_png(&self, bytes: &[u8], style: &str) -> std::io::Result<String> {
        let filename = image_filename(style, OffsetDateTime::now_utc(), rand::random::<u16>())?;
        tokio::fs::write(self.dir.join(&filename), bytes).await?;
        Ok(format!("{IMAGE_URL_PREFIX}/{filename}"))
    }
}

/// Build a timestamped filename. The style comes from client input, so it is
/// reduced to a filename-safe alphabet before use.
fn image_filename(style: &str, now: OffsetDateTime, nonce: u16) -> std::io::Result<String> {
    let stamp = now
        .format(format_description!("[year][month][day]_[hour][minute][second]"))
        .map_err(std::io::Error::other)?;
    Ok(format!("drawing_{stamp}_{}_{nonce:04x}.png", sanitize_style(style)))
}

fn sanitize_style(style: &str) -> String {
    let cleaned: String = style
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
        .take(32)
        .collect::<String>()
        .to_ascii_lowercase();
    if cleaned.is_empty() { "style".to_string() } else { cleaned }
}

// =============================================================================
// EXPIRY SWEEP
// =============================================================================

/// Spawn the background sweep task. Returns a handle for shutdown.
pub fn spawn_sweep_task(store: std::sync::Arc<ImageStore>) -> JoinHandle<()> {
    let ttl_secs: u64 = env_parse("IMAGE_TTL_SECS", DEFAULT_IMAGE_TTL_SECS);
    let interval_secs: u64 = env_parse("IMAGE_SWEEP_INTERVAL_SECS", DEFAULT_SWEEP_INTERVAL_SECS);
    info!(ttl_secs, interval_secs, "image expiry sweep configured");

    tokio::spawn(async move {
        let ttl = Duration::from_secs(ttl_secs);
        loop {
            match sweep_expired(store.dir(), ttl).await {
                Ok(0) => {}
                Ok(removed) => info!(removed, "expired images removed"),
                Err(e) => warn!(error = %e, "image sweep failed"),
            }
            tokio::time::sleep(Duration::from_secs(interval_secs)).await;
        }
    })
}

/// Remove files older than `ttl`. Returns the number of files removed.
async fn sweep_expired(dir: &Path, ttl: Duration) -> std::io::Result<usize> {
    let mut removed = 0;
    let mut entries = tokio::fs::read_dir(dir).await?;

    while let Some(entry) = entries.next_entry().await? {
        let metadata = entry.metadata().await?;
        if !metadata.is_file() {
            continue;
        }
        let expired = metadata
            .modified()
            .ok()
            .and_then(|modified| modified.elapsed().ok())
            .is_some_and(|age| age > ttl);
        if !expired {
            continue;
        }
        match tokio::fs::remove_file(entry.path()).await {
            Ok(()) => removed += 1,
            Err(e) => warn!(error = %e, path = %entry.path().display(), "failed to remove expired image"),
        }
    }

    Ok(removed)
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
