//! `ytthumb extract <url>...` – offline routing of input lines.

use ytthumb_core::extract::{classify_line, split_input, LineKind};

/// One output line per input line: how it would be routed in a batch.
pub fn describe_line(line: &str) -> String {
    match classify_line(line) {
        LineKind::Video(id) => format!("video     {}", id),
        LineKind::Playlist(Some(id)) => format!("playlist  {}", id),
        LineKind::Playlist(None) => format!("playlist  ? ({})", line),
        LineKind::Unrecognized => format!("skip      {}", line),
    }
}

pub fn run_extract(text: &str) {
    for line in split_input(text) {
        println!("{}", describe_line(line));
    }
}
