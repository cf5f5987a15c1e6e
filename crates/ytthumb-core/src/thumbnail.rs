//! Thumbnail resolution over the fixed quality ladder.
//!
//! Each video is probed from the highest quality down, one probe at a time.
//! The first probe that loads wins. `default` is never probed: when every
//! level above it fails, its location is returned as-is.

use crate::extract::VideoId;
use crate::fetch::ImageFetcher;
use std::fmt;

/// Thumbnail variants published by the host, highest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Quality {
    MaxRes,
    Standard,
    High,
    Medium,
    Default,
}

impl Quality {
    /// Probe order. The last entry is the unconditional fallback.
    pub const LADDER: [Quality; 5] = [
        Quality::MaxRes,
        Quality::Standard,
        Quality::High,
        Quality::Medium,
        Quality::Default,
    ];

    /// Image file stem used by the host for this variant.
    pub fn file_stem(self) -> &'static str {
        match self {
            Quality::MaxRes => "maxresdefault",
            Quality::Standard => "sddefault",
            Quality::High => "hqdefault",
            Quality::Medium => "mqdefault",
            Quality::Default => "default",
        }
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Quality::MaxRes => "maxres",
            Quality::Standard => "standard",
            Quality::High => "high",
            Quality::Medium => "medium",
            Quality::Default => "default",
        };
        f.pad(name)
    }
}

/// `<host>/<id>/<stem>.jpg`
pub fn thumbnail_url(host: &str, id: &VideoId, quality: Quality) -> String {
    format!(
        "{}/{}/{}.jpg",
        host.trim_end_matches('/'),
        id,
        quality.file_stem()
    )
}

/// Best available thumbnail for one video.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedThumbnail {
    pub video_id: VideoId,
    pub quality: Quality,
    pub url: String,
    /// Always `<id>.jpg`.
    pub filename: String,
}

impl ResolvedThumbnail {
    fn new(host: &str, video_id: &VideoId, quality: Quality) -> Self {
        Self {
            url: thumbnail_url(host, video_id, quality),
            filename: video_id.filename(),
            video_id: video_id.clone(),
            quality,
        }
    }
}

/// Resolves the highest quality thumbnail that loads. Never fails.
pub async fn resolve(fetcher: &dyn ImageFetcher, host: &str, id: &VideoId) -> ResolvedThumbnail {
    let fallback = Quality::Default;

    for &quality in Quality::LADDER.iter().take_while(|&&q| q != fallback) {
        let url = thumbnail_url(host, id, quality);
        match fetcher.probe(&url).await {
            Ok(()) => {
                tracing::debug!(video = %id, %quality, "thumbnail resolved");
                return ResolvedThumbnail::new(host, id, quality);
            }
            Err(e) => {
                tracing::debug!(video = %id, %quality, "probe failed: {}", e);
            }
        }
    }

    tracing::debug!(video = %id, "all probes failed, using {}", fallback);
    ResolvedThumbnail::new(host, id, fallback)
}
