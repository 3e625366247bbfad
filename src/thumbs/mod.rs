//! Game thumbnail fetch-and-cache side-job.
//!
//! Best-effort: fetches the BoardGameGeek page for a game, extracts the
//! `og:image` meta tag, downloads the image and caches it in the local
//! image directory. Failures are reported to the caller but never block
//! score recording.

use std::path::PathBuf;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::Client;
use scraper::{Html, Selector};
use thiserror::Error;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::info;
use url::Url;

/// Errors that can occur during thumbnail fetching.
#[derive(Debug, Error)]
pub enum ThumbError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} fetching {url}")]
    HttpStatus { status: u16, url: String },

    #[error("No og:image tag found at {0}")]
    NoOgImage(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration for the thumbnail fetcher.
#[derive(Debug, Clone)]
pub struct ThumbnailConfig {
    /// Directory where cached images are written
    pub images_dir: PathBuf,

    /// Page URL base; the game ID is appended as a path segment
    pub base_url: String,

    /// Request timeout
    pub timeout: Duration,

    /// User agent string (BGG rejects the default reqwest agent)
    pub user_agent: String,
}

impl Default for ThumbnailConfig {
    fn default() -> Self {
        Self {
            images_dir: PathBuf::from("./data/game-images"),
            base_url: "https://boardgamegeek.com/boardgame".to_string(),
            timeout: Duration::from_secs(30),
            user_agent: "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36"
                .to_string(),
        }
    }
}

/// Outcome of a thumbnail request.
#[derive(Debug, Clone)]
pub struct ThumbnailResult {
    /// Where the image lives on disk
    pub path: PathBuf,

    /// Whether it was already cached
    pub cached: bool,
}

/// Fetches and caches game cover images.
pub struct ThumbnailFetcher {
    client: Client,
    config: ThumbnailConfig,
}

impl ThumbnailFetcher {
    /// Create a new fetcher with the given configuration.
    pub fn new(config: ThumbnailConfig) -> Result<Self, ThumbError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent)
                .unwrap_or_else(|_| HeaderValue::from_static("board-tally/0.1.0")),
        );

        let client = Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self { client, config })
    }

    /// Cache path for a game's thumbnail.
    pub fn image_path(&self, game_id: u32) -> PathBuf {
        self.config.images_dir.join(format!("{}.jpg", game_id))
    }

    /// Fetch and cache a game's thumbnail, or return the cached copy.
    pub async fn ensure_thumbnail(
        &self,
        game_id: u32,
        game_name: &str,
    ) -> Result<ThumbnailResult, ThumbError> {
        let path = self.image_path(game_id);
        if path.exists() {
            return Ok(ThumbnailResult { path, cached: true });
        }

        info!("Fetching thumbnail for {} (ID: {})", game_name, game_id);

        let page_url = Url::parse(&format!("{}/{}", self.config.base_url, game_id))?;
        let html = self.fetch_text(&page_url).await?;

        let image_url = extract_og_image(&html)
            .ok_or_else(|| ThumbError::NoOgImage(page_url.to_string()))?;
        let image_url = Url::parse(&image_url)?;

        let bytes = self.fetch_bytes(&image_url).await?;

        fs::create_dir_all(&self.config.images_dir).await?;
        let mut file = fs::File::create(&path).await?;
        file.write_all(&bytes).await?;
        file.flush().await?;

        info!("Saved thumbnail for {} to {:?}", game_name, path);
        Ok(ThumbnailResult {
            path,
            cached: false,
        })
    }

    async fn fetch_text(&self, url: &Url) -> Result<String, ThumbError> {
        let response = self.client.get(url.as_str()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ThumbError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        Ok(response.text().await?)
    }

    async fn fetch_bytes(&self, url: &Url) -> Result<Vec<u8>, ThumbError> {
        let response = self.client.get(url.as_str()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ThumbError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        Ok(response.bytes().await?.to_vec())
    }
}

/// Extract the `og:image` content from an HTML page.
///
/// Handles both attribute orders (`property` before or after `content`).
pub fn extract_og_image(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse(r#"meta[property="og:image"]"#).ok()?;
    document
        .select(&selector)
        .next()?
        .value()
        .attr("content")
        .map(str::to_string)
}
