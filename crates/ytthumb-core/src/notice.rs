//! User-visible status notices.
//!
//! There is a single status region: it is either hidden or shows one notice
//! (title + message). Nothing here is ever returned to a caller as an error.

use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Notice {
    #[error("No URL Found: Please enter at least one YouTube URL to download")]
    NoUrlFound,
    #[error("No Valid URLs: Could not extract any valid video IDs from the provided URLs")]
    NoValidUrls,
    #[error("Playlists Not Supported: Sorry, playlist downloads are not supported yet.")]
    PlaylistsNotSupported,
    #[error("Download Failed: Could not download {filename}")]
    DownloadFailed { filename: String },
    #[error("Zip Creation Failed: Could not create zip file")]
    ZipCreationFailed,
}

impl Notice {
    pub fn title(&self) -> &'static str {
        match self {
            Notice::NoUrlFound => "No URL Found",
            Notice::NoValidUrls => "No Valid URLs",
            Notice::PlaylistsNotSupported => "Playlists Not Supported",
            Notice::DownloadFailed { .. } => "Download Failed",
            Notice::ZipCreationFailed => "Zip Creation Failed",
        }
    }

    pub fn message(&self) -> String {
        match self {
            Notice::NoUrlFound => "Please enter at least one YouTube URL to download".to_string(),
            Notice::NoValidUrls => {
                "Could not extract any valid video IDs from the provided URLs".to_string()
            }
            Notice::PlaylistsNotSupported => {
                "Sorry, playlist downloads are not supported yet.".to_string()
            }
            Notice::DownloadFailed { filename } => format!("Could not download {}", filename),
            Notice::ZipCreationFailed => "Could not create zip file".to_string(),
        }
    }
}

/// The status region. Implementations must tolerate calls from concurrent resolutions.
pub trait StatusSink: Send + Sync {
    /// Replaces whatever is shown with `notice`.
    fn show(&self, notice: &Notice);
    fn hide(&self);
}

/// In-memory status region: remembers the visible notice and every notice shown.
#[derive(Debug, Default)]
pub struct StatusBoard {
    inner: Mutex<StatusState>,
}

#[derive(Debug, Default)]
struct StatusState {
    current: Option<Notice>,
    history: Vec<Notice>,
}

impl StatusBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Notice currently visible, `None` when hidden.
    pub fn current(&self) -> Option<Notice> {
        self.inner.lock().unwrap().current.clone()
    }

    /// Every notice shown since creation, oldest first.
    pub fn history(&self) -> Vec<Notice> {
        self.inner.lock().unwrap().history.clone()
    }
}

impl StatusSink for StatusBoard {
    fn show(&self, notice: &Notice) {
        let mut state = self.inner.lock().unwrap();
        state.current = Some(notice.clone());
        state.history.push(notice.clone());
    }

    fn hide(&self) {
        self.inner.lock().unwrap().current = None;
    }
}
