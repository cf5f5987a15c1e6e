//! Batch orchestration: one run takes a block of URLs through extraction,
//! concurrent thumbnail resolution, previews and (for more than one
//! thumbnail) a single zip archive.
//!
//! At most one batch runs per orchestrator. A run requested while another is
//! in flight is dropped, not queued.

use crate::archive::{self, SavedArchive};
use crate::config::{Compression, YtThumbConfig};
use crate::extract::{self, LineKind, PlaylistId, VideoId};
use crate::fetch::ImageFetcher;
use crate::notice::{Notice, StatusSink};
use crate::preview::{PreviewEntry, PreviewSink};
use crate::sink::DownloadSink;
use crate::thumbnail::{self, ResolvedThumbnail};
use futures::future::join_all;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Settings a batch needs from the global config.
#[derive(Debug, Clone)]
pub struct BatchSettings {
    pub thumbnail_host: String,
    pub archive_prefix: String,
    pub compression: Compression,
}

impl From<&YtThumbConfig> for BatchSettings {
    fn from(cfg: &YtThumbConfig) -> Self {
        Self {
            thumbnail_host: cfg.thumbnail_host.clone(),
            archive_prefix: cfg.archive_prefix.clone(),
            compression: cfg.compression,
        }
    }
}

impl Default for BatchSettings {
    fn default() -> Self {
        Self::from(&YtThumbConfig::default())
    }
}

/// What a finished batch produced.
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    /// One per unique video id, in first-seen order.
    pub thumbnails: Vec<ResolvedThumbnail>,
    /// Playlist ids that were recognized (and not expanded).
    pub playlists: Vec<PlaylistId>,
    /// Lines that matched neither a video nor a playlist shape.
    pub unrecognized: usize,
    /// Set only when more than one thumbnail resolved and the archive was saved.
    pub archive: Option<SavedArchive>,
}

#[derive(Debug, Clone)]
pub enum BatchOutcome {
    /// Another batch was running; this request was dropped.
    Busy,
    /// Input rejected before any state changed.
    Rejected(Notice),
    Completed(BatchReport),
}

/// Lines of one input block, routed by kind. Video ids are deduplicated.
#[derive(Debug, Default)]
struct Partition {
    video_ids: Vec<VideoId>,
    playlists: Vec<PlaylistId>,
    saw_playlist_marker: bool,
    unrecognized: usize,
}

fn partition(lines: &[&str]) -> Partition {
    let mut part = Partition::default();
    let mut seen = HashSet::new();
    for line in lines {
        match extract::classify_line(line) {
            LineKind::Playlist(id) => {
                part.saw_playlist_marker = true;
                part.playlists.extend(id);
            }
            LineKind::Video(id) => {
                if seen.insert(id.clone()) {
                    part.video_ids.push(id);
                }
            }
            LineKind::Unrecognized => {
                tracing::debug!("skipping unrecognized line: {}", line);
                part.unrecognized += 1;
            }
        }
    }
    part
}

/// Clears the running flag when the batch ends, on every path.
struct RunningGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> RunningGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for RunningGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

pub struct BatchOrchestrator {
    fetcher: Arc<dyn ImageFetcher>,
    preview: Arc<dyn PreviewSink>,
    status: Arc<dyn StatusSink>,
    downloads: Arc<dyn DownloadSink>,
    settings: BatchSettings,
    running: AtomicBool,
}

impl BatchOrchestrator {
    pub fn new(
        fetcher: Arc<dyn ImageFetcher>,
        preview: Arc<dyn PreviewSink>,
        status: Arc<dyn StatusSink>,
        downloads: Arc<dyn DownloadSink>,
        settings: BatchSettings,
    ) -> Self {
        Self {
            fetcher,
            preview,
            status,
            downloads,
            settings,
            running: AtomicBool::new(false),
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    pub fn settings(&self) -> &BatchSettings {
        &self.settings
    }

    /// Runs one batch over a multi-line block of URLs.
    pub async fn run(&self, input: &str) -> BatchOutcome {
        let Some(_guard) = RunningGuard::acquire(&self.running) else {
            tracing::debug!("batch already running; request dropped");
            return BatchOutcome::Busy;
        };

        let lines = extract::split_input(input);
        if lines.is_empty() {
            self.status.show(&Notice::NoUrlFound);
            return BatchOutcome::Rejected(Notice::NoUrlFound);
        }

        self.preview.clear();
        self.status.hide();

        let part = partition(&lines);
        for playlist in &part.playlists {
            tracing::info!(playlist = %playlist, "playlist expansion is not supported");
            self.status.show(&Notice::PlaylistsNotSupported);
        }

        let mut report = BatchReport {
            playlists: part.playlists,
            unrecognized: part.unrecognized,
            ..BatchReport::default()
        };

        if part.video_ids.is_empty() {
            if !part.saw_playlist_marker {
                self.status.show(&Notice::NoValidUrls);
            }
            return BatchOutcome::Completed(report);
        }

        tracing::info!(videos = part.video_ids.len(), "resolving thumbnails");
        report.thumbnails =
            join_all(part.video_ids.iter().map(|id| self.resolve_and_preview(id))).await;

        if report.thumbnails.len() > 1 {
            report.archive = archive::download_as_zip(
                self.fetcher.as_ref(),
                &report.thumbnails,
                self.settings.compression,
                &self.settings.archive_prefix,
                self.downloads.as_ref(),
                self.status.as_ref(),
            )
            .await;
        }

        BatchOutcome::Completed(report)
    }

    async fn resolve_and_preview(&self, id: &VideoId) -> ResolvedThumbnail {
        let thumb =
            thumbnail::resolve(self.fetcher.as_ref(), &self.settings.thumbnail_host, id).await;
        self.preview.append(PreviewEntry::new(&thumb));
        thumb
    }

    /// Runs the per-entry download action of a preview entry.
    pub async fn download_entry(&self, entry: &PreviewEntry) -> Option<std::path::PathBuf> {
        entry
            .download(
                self.fetcher.as_ref(),
                self.downloads.as_ref(),
                self.status.as_ref(),
            )
            .await
    }

    /// Empties the preview region and hides the status notice.
    pub fn clear(&self) {
        self.preview.clear();
        self.status.hide();
    }
}
