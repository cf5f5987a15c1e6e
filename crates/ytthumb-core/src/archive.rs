//! Zip packaging of a batch of resolved thumbnails.
//!
//! Every entry is fetched again (nothing is reused from resolution or
//! preview). A failed fetch drops that entry from the archive and is only
//! logged; partial archives are fine.

use crate::config::Compression;
use crate::fetch::ImageFetcher;
use crate::notice::{Notice, StatusSink};
use crate::sink::DownloadSink;
use crate::thumbnail::ResolvedThumbnail;
use chrono::{DateTime, Local, TimeZone};
use std::io::{Cursor, Write};
use std::path::PathBuf;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

#[derive(Debug, thiserror::Error)]
pub enum ArchiveError {
    #[error("zip: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

/// Serialized archive plus what went into it.
#[derive(Debug, Clone)]
pub struct BuiltArchive {
    pub bytes: Vec<u8>,
    /// Entry names in insertion order.
    pub entries: Vec<String>,
    /// Filenames whose fetch failed.
    pub skipped: Vec<String>,
}

/// Archive handed to the download sink.
#[derive(Debug, Clone)]
pub struct SavedArchive {
    pub path: PathBuf,
    pub filename: String,
    pub entries: Vec<String>,
    pub skipped: Vec<String>,
}

impl From<Compression> for CompressionMethod {
    fn from(c: Compression) -> Self {
        match c {
            Compression::Deflated => CompressionMethod::Deflated,
            Compression::Stored => CompressionMethod::Stored,
        }
    }
}

/// `<prefix>-YYYY-MM-DD-HH-MM-SS.zip`, zero-padded.
pub fn archive_filename<Tz>(prefix: &str, now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    format!("{}-{}.zip", prefix, now.format("%Y-%m-%d-%H-%M-%S"))
}

/// Fetches each thumbnail in order and writes the ones that arrive into a zip.
pub async fn build_archive(
    fetcher: &dyn ImageFetcher,
    thumbnails: &[ResolvedThumbnail],
    compression: Compression,
) -> Result<BuiltArchive, ArchiveError> {
    let options = SimpleFileOptions::default().compression_method(compression.into());
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let mut entries = Vec::with_capacity(thumbnails.len());
    let mut skipped = Vec::new();

    for thumb in thumbnails {
        match fetcher.fetch(&thumb.url).await {
            Ok(bytes) => {
                zip.start_file(thumb.filename.as_str(), options)?;
                zip.write_all(&bytes)?;
                entries.push(thumb.filename.clone());
            }
            Err(e) => {
                tracing::error!("error adding {} to zip: {}", thumb.filename, e);
                skipped.push(thumb.filename.clone());
            }
        }
    }

    let bytes = zip.finish()?.into_inner();
    Ok(BuiltArchive {
        bytes,
        entries,
        skipped,
    })
}

/// Builds the archive and saves it under a timestamped name.
///
/// The timestamp is taken once the archive is serialized. Any failure is
/// logged and shown as "Zip Creation Failed"; it never propagates.
pub async fn download_as_zip(
    fetcher: &dyn ImageFetcher,
    thumbnails: &[ResolvedThumbnail],
    compression: Compression,
    prefix: &str,
    sink: &dyn DownloadSink,
    status: &dyn StatusSink,
) -> Option<SavedArchive> {
    let result = match build_archive(fetcher, thumbnails, compression).await {
        Ok(built) => {
            let filename = archive_filename(prefix, &Local::now());
            sink.save(&filename, &built.bytes).map(|path| SavedArchive {
                path,
                filename,
                entries: built.entries,
                skipped: built.skipped,
            })
        }
        Err(e) => Err(e.into()),
    };

    match result {
        Ok(saved) => {
            tracing::info!(
                archive = %saved.filename,
                entries = saved.entries.len(),
                skipped = saved.skipped.len(),
                "archive written"
            );
            Some(saved)
        }
        Err(e) => {
            tracing::error!("error creating zip: {:#}", e);
            status.show(&Notice::ZipCreationFailed);
            None
        }
    }
}
