//! libcurl GET into memory.

use super::{FetchError, ImageFetcher};
use crate::config::YtThumbConfig;
use async_trait::async_trait;
use std::time::Duration;

const USER_AGENT: &str = concat!("ytthumb/", env!("CARGO_PKG_VERSION"));

/// Per-request libcurl settings. `None` leaves the libcurl default (no limit).
#[derive(Debug, Clone, Copy, Default)]
pub struct CurlOptions {
    pub connect_timeout: Option<Duration>,
    pub timeout: Option<Duration>,
}

impl CurlOptions {
    pub fn from_config(cfg: &YtThumbConfig) -> Self {
        Self {
            connect_timeout: cfg.connect_timeout(),
            timeout: cfg.request_timeout(),
        }
    }
}

/// Leading bytes of the formats the thumbnail host serves.
fn has_image_signature(body: &[u8]) -> bool {
    body.starts_with(&[0xFF, 0xD8, 0xFF])
        || body.starts_with(b"\x89PNG\r\n\x1a\n")
        || body.starts_with(b"GIF8")
        || (body.len() >= 12 && &body[..4] == b"RIFF" && &body[8..12] == b"WEBP")
}

fn is_image_content_type(content_type: &str) -> bool {
    content_type
        .trim_start()
        .get(..6)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("image/"))
}

/// Performs a GET and returns the whole body.
///
/// Follows redirects; non-2xx and empty bodies are errors, and so is a body
/// that is neither declared `image/*` nor starts with an image signature.
/// Runs in the current thread; call from `spawn_blocking` if used from async code.
pub fn get_bytes(url: &str, opts: CurlOptions) -> Result<Vec<u8>, FetchError> {
    let mut body = Vec::new();

    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.follow_location(true)?;
    easy.max_redirections(10)?;
    easy.useragent(USER_AGENT)?;
    if let Some(t) = opts.connect_timeout {
        easy.connect_timeout(t)?;
    }
    if let Some(t) = opts.timeout {
        easy.timeout(t)?;
    }

    {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| {
            body.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer.perform()?;
    }

    let code = easy.response_code()?;
    if !(200..300).contains(&code) {
        return Err(FetchError::Http(code));
    }
    if body.is_empty() {
        return Err(FetchError::EmptyBody);
    }
    let content_type = easy.content_type()?.map(str::to_string);
    if !content_type.as_deref().is_some_and(is_image_content_type) && !has_image_signature(&body)
    {
        return Err(FetchError::NotAnImage(content_type));
    }
    Ok(body)
}

/// [`ImageFetcher`] backed by blocking libcurl transfers on tokio's blocking pool.
#[derive(Debug, Clone, Default)]
pub struct CurlFetcher {
    opts: CurlOptions,
}

impl CurlFetcher {
    pub fn new(opts: CurlOptions) -> Self {
        Self { opts }
    }

    pub fn from_config(cfg: &YtThumbConfig) -> Self {
        Self::new(CurlOptions::from_config(cfg))
    }
}

#[async_trait]
impl ImageFetcher for CurlFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let url = url.to_string();
        let opts = self.opts;
        tokio::task::spawn_blocking(move || get_bytes(&url, opts))
            .await
            .map_err(|e| FetchError::Join(e.to_string()))?
    }
}
