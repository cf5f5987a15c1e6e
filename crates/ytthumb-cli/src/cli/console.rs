//! Terminal renditions of the preview region and status notice.

use ytthumb_core::notice::{Notice, StatusSink};
use ytthumb_core::preview::{PreviewBoard, PreviewEntry, PreviewSink};

/// Prints each preview entry as it arrives and keeps it for later download actions.
#[derive(Debug, Default)]
pub struct ConsolePreview {
    board: PreviewBoard,
}

impl ConsolePreview {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<PreviewEntry> {
        self.board.entries()
    }
}

impl PreviewSink for ConsolePreview {
    fn clear(&self) {
        self.board.clear();
    }

    fn append(&self, entry: PreviewEntry) {
        println!("{:<14} {:<9} {}", entry.label, entry.quality, entry.image_url);
        self.board.append(entry);
    }
}

/// Status notices go to stderr; hiding is a no-op on a terminal.
#[derive(Debug, Default)]
pub struct ConsoleStatus;

impl StatusSink for ConsoleStatus {
    fn show(&self, notice: &Notice) {
        tracing::warn!(title = notice.title(), "{}", notice.message());
        eprintln!("{}: {}", notice.title(), notice.message());
    }

    fn hide(&self) {}
}
