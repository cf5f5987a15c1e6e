//! Image fetching seam.
//!
//! The resolver, preview and archive code only see [`ImageFetcher`]; the
//! libcurl-backed [`CurlFetcher`] is the production implementation.

mod curl_fetcher;
#[cfg(test)]
pub(crate) mod fake;

pub use curl_fetcher::{get_bytes, CurlFetcher, CurlOptions};

use async_trait::async_trait;

/// Failure of a single image probe or fetch.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// libcurl reported an error (DNS, connect, timeout, ...).
    #[error(transparent)]
    Curl(#[from] curl::Error),
    /// Response had a non-2xx status.
    #[error("HTTP {0}")]
    Http(u32),
    /// 2xx response without any bytes; not a usable image.
    #[error("empty response body")]
    EmptyBody,
    /// 2xx response whose type and leading bytes are not an image.
    #[error("not an image (content type {})", .0.as_deref().unwrap_or("unknown"))]
    NotAnImage(Option<String>),
    /// The blocking transfer task panicked or was cancelled.
    #[error("fetch task failed: {0}")]
    Join(String),
}

#[async_trait]
pub trait ImageFetcher: Send + Sync {
    /// Downloads the image at `url` and returns its bytes.
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError>;

    /// Image-load probe: succeeds when `url` serves something that is an image.
    async fn probe(&self, url: &str) -> Result<(), FetchError> {
        self.fetch(url).await.map(|_| ())
    }
}
