//! Identifier extraction from user-supplied YouTube URLs.
//!
//! A line carrying a `list=` marker is routed to playlist handling and is
//! never tried against the video patterns. Anything else is matched against
//! the recognized video URL shapes in a fixed order; the first capture wins.

use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;

lazy_static! {
    /// Video URL shapes, tried in order: watch / short link, embed, direct `/v/`.
    static ref VIDEO_PATTERNS: [Regex; 3] = [
        Regex::new(r"(?:youtube\.com/watch\?v=|youtu\.be/)([^&\n?#]+)").unwrap(),
        Regex::new(r"youtube\.com/embed/([^&\n?#]+)").unwrap(),
        Regex::new(r"youtube\.com/v/([^&\n?#]+)").unwrap(),
    ];
    static ref PLAYLIST_PATTERN: Regex = Regex::new(r"[?&]list=([^&\n?#]+)").unwrap();
}

/// Substring that routes a line to playlist handling.
const PLAYLIST_MARKER: &str = "list=";

/// Opaque video token, e.g. `dQw4w9WgXcQ`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VideoId(String);

impl VideoId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Suggested download name for this video's thumbnail.
    pub fn filename(&self) -> String {
        format!("{}.jpg", self.0)
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque playlist token. Never resolved into videos.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlaylistId(String);

impl PlaylistId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlaylistId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How a single input line is routed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    /// Line has a `list=` marker. The id is `None` when the marker is not a
    /// proper query parameter (e.g. `playlist=`-like text).
    Playlist(Option<PlaylistId>),
    Video(VideoId),
    Unrecognized,
}

/// Returns the first video id matched by the recognized URL shapes.
pub fn extract_video_id(raw: &str) -> Option<VideoId> {
    VIDEO_PATTERNS.iter().find_map(|re| {
        re.captures(raw)
            .and_then(|c| c.get(1))
            .map(|m| VideoId(m.as_str().to_string()))
    })
}

/// Returns the value of a `list=` query parameter, if any.
pub fn extract_playlist_id(raw: &str) -> Option<PlaylistId> {
    PLAYLIST_PATTERN
        .captures(raw)
        .and_then(|c| c.get(1))
        .map(|m| PlaylistId(m.as_str().to_string()))
}

/// True if the line would be routed to playlist handling.
pub fn has_playlist_marker(raw: &str) -> bool {
    raw.contains(PLAYLIST_MARKER)
}

pub fn classify_line(raw: &str) -> LineKind {
    if has_playlist_marker(raw) {
        return LineKind::Playlist(extract_playlist_id(raw));
    }
    match extract_video_id(raw) {
        Some(id) => LineKind::Video(id),
        None => LineKind::Unrecognized,
    }
}

/// Splits a block of input into trimmed, non-blank lines.
pub fn split_input(text: &str) -> Vec<&str> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}
