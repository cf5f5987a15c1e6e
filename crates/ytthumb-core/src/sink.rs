//! Download targets: where finished images and archives are handed over.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Suffix of the file being written before it is renamed into place.
const PART_SUFFIX: &str = ".part";

/// Receives a finished download (single image or archive) under a suggested name.
pub trait DownloadSink: Send + Sync {
    /// Stores `bytes` as `filename`; returns where it ended up.
    fn save(&self, filename: &str, bytes: &[u8]) -> Result<PathBuf>;
}

/// Makes a suggested name safe to use as a single path component on Linux.
///
/// - `/`, `\`, NUL, whitespace and control characters become `_` (runs collapsed)
/// - leading/trailing dots, spaces and underscores are trimmed
/// - at most 255 bytes are kept
/// - an empty result becomes `download`
pub fn sanitize_filename(name: &str) -> String {
    const NAME_MAX: usize = 255;

    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        let bad = c == '/' || c == '\\' || c.is_control() || c.is_whitespace();
        if !bad {
            out.push(c);
        } else if !out.ends_with('_') {
            out.push('_');
        }
    }

    let mut trimmed = out.trim_matches(|c| c == '.' || c == '_' || c == ' ');
    if trimmed.len() > NAME_MAX {
        let mut take = NAME_MAX;
        while !trimmed.is_char_boundary(take) {
            take -= 1;
        }
        trimmed = &trimmed[..take];
    }
    if trimmed.is_empty() {
        "download".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Writes downloads into a directory, via `<name>.part` and an atomic rename.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl DownloadSink for DirectorySink {
    fn save(&self, filename: &str, bytes: &[u8]) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("create {}", self.dir.display()))?;
        let final_path = self.dir.join(sanitize_filename(filename));
        let mut part = final_path.as_os_str().to_owned();
        part.push(PART_SUFFIX);
        let part = PathBuf::from(part);

        std::fs::write(&part, bytes).with_context(|| format!("write {}", part.display()))?;
        std::fs::rename(&part, &final_path).with_context(|| {
            format!("rename {} to {}", part.display(), final_path.display())
        })?;
        tracing::info!(path = %final_path.display(), bytes = bytes.len(), "saved download");
        Ok(final_path)
    }
}

/// Keeps downloads in memory (library embedding, tests).
#[derive(Debug, Default)]
pub struct MemorySink {
    saved: Mutex<Vec<(String, Vec<u8>)>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// (filename, bytes) pairs in save order.
    pub fn saved(&self) -> Vec<(String, Vec<u8>)> {
        self.saved.lock().unwrap().clone()
    }
}

impl DownloadSink for MemorySink {
    fn save(&self, filename: &str, bytes: &[u8]) -> Result<PathBuf> {
        self.saved
            .lock()
            .unwrap()
            .push((filename.to_string(), bytes.to_vec()));
        Ok(PathBuf::from(filename))
    }
}
