//! Preview entries for resolved thumbnails, each with its own download action.

use crate::fetch::ImageFetcher;
use crate::notice::{Notice, StatusSink};
use crate::sink::DownloadSink;
use crate::thumbnail::{Quality, ResolvedThumbnail};
use std::path::PathBuf;
use std::sync::Mutex;

/// Label of the per-entry download action.
pub const DOWNLOAD_LABEL: &str = "Download";

/// One preview block: image, identifier label and a download action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewEntry {
    pub image_url: String,
    pub label: String,
    pub alt_text: String,
    pub quality: Quality,
    /// Name the download action saves under (`<id>.jpg`).
    pub filename: String,
}

impl PreviewEntry {
    pub fn new(thumb: &ResolvedThumbnail) -> Self {
        Self {
            image_url: thumb.url.clone(),
            label: thumb.video_id.to_string(),
            alt_text: format!("Thumbnail for {}", thumb.video_id),
            quality: thumb.quality,
            filename: thumb.filename.clone(),
        }
    }

    pub fn button_label(&self) -> &'static str {
        DOWNLOAD_LABEL
    }

    /// Re-fetches this image and saves it as [`PreviewEntry::filename`].
    ///
    /// Independent of any earlier fetch. On failure shows "Download Failed"
    /// for this file and returns `None`.
    pub async fn download(
        &self,
        fetcher: &dyn ImageFetcher,
        sink: &dyn DownloadSink,
        status: &dyn StatusSink,
    ) -> Option<PathBuf> {
        let saved = match fetcher.fetch(&self.image_url).await {
            Ok(bytes) => sink.save(&self.filename, &bytes),
            Err(e) => Err(e.into()),
        };
        match saved {
            Ok(path) => Some(path),
            Err(e) => {
                tracing::error!("error downloading {}: {:#}", self.filename, e);
                status.show(&Notice::DownloadFailed {
                    filename: self.filename.clone(),
                });
                None
            }
        }
    }
}

/// Where preview entries are shown.
pub trait PreviewSink: Send + Sync {
    /// Removes every entry and brings back the empty-state placeholder.
    fn clear(&self);
    /// Appends one entry; the empty-state placeholder goes away.
    fn append(&self, entry: PreviewEntry);
}

/// In-memory preview region.
#[derive(Debug)]
pub struct PreviewBoard {
    inner: Mutex<BoardState>,
}

#[derive(Debug)]
struct BoardState {
    entries: Vec<PreviewEntry>,
    empty_state_visible: bool,
}

impl Default for PreviewBoard {
    fn default() -> Self {
        Self {
            inner: Mutex::new(BoardState {
                entries: Vec::new(),
                empty_state_visible: true,
            }),
        }
    }
}

impl PreviewBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<PreviewEntry> {
        self.inner.lock().unwrap().entries.clone()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn empty_state_visible(&self) -> bool {
        self.inner.lock().unwrap().empty_state_visible
    }
}

impl PreviewSink for PreviewBoard {
    fn clear(&self) {
        let mut state = self.inner.lock().unwrap();
        state.entries.clear();
        state.empty_state_visible = true;
    }

    fn append(&self, entry: PreviewEntry) {
        let mut state = self.inner.lock().unwrap();
        state.entries.push(entry);
        state.empty_state_visible = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::VideoId;
    use crate::fetch::fake::FakeFetcher;
    use crate::notice::StatusBoard;
    use crate::sink::MemorySink;

    fn thumb(id: &str) -> ResolvedThumbnail {
        ResolvedThumbnail {
            video_id: VideoId::new(id),
            quality: Quality::High,
            url: format!("https://img.youtube.com/vi/{}/hqdefault.jpg", id),
            filename: format!("{}.jpg", id),
        }
    }

    #[test]
    fn entry_fields() {
        let entry = PreviewEntry::new(&thumb("abc123"));
        assert_eq!(entry.label, "abc123");
        assert_eq!(entry.alt_text, "Thumbnail for abc123");
        assert_eq!(entry.filename, "abc123.jpg");
        assert_eq!(entry.button_label(), "Download");
    }

    #[test]
    fn board_empty_state_toggles() {
        let board = PreviewBoard::new();
        assert!(board.empty_state_visible());
        board.append(PreviewEntry::new(&thumb("a")));
        assert!(!board.empty_state_visible());
        assert_eq!(board.len(), 1);
        board.clear();
        assert!(board.is_empty());
        assert!(board.empty_state_visible());
    }

    #[tokio::test]
    async fn download_refetches_and_saves() {
        let fetcher = FakeFetcher::default();
        let sink = MemorySink::new();
        let status = StatusBoard::new();
        let entry = PreviewEntry::new(&thumb("abc123"));

        let first = entry.download(&fetcher, &sink, &status).await;
        let second = entry.download(&fetcher, &sink, &status).await;
        assert!(first.is_some() && second.is_some());
        assert_eq!(fetcher.fetch_log().len(), 2);
        assert_eq!(sink.saved()[0].0, "abc123.jpg");
        assert!(status.current().is_none());
    }

    #[tokio::test]
    async fn download_failure_shows_notice() {
        let entry = PreviewEntry::new(&thumb("abc123"));
        let mut fetcher = FakeFetcher::default();
        fetcher.broken_fetch.insert(entry.image_url.clone());
        let sink = MemorySink::new();
        let status = StatusBoard::new();

        assert!(entry.download(&fetcher, &sink, &status).await.is_none());
        assert!(sink.saved().is_empty());
        assert_eq!(
            status.current(),
            Some(Notice::DownloadFailed {
                filename: "abc123.jpg".to_string()
            })
        );
    }
}
