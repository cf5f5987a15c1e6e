//! `ytthumb download <url>` – resolve one video and save `<id>.jpg`.

use anyhow::Result;
use std::path::PathBuf;
use ytthumb_core::config::YtThumbConfig;
use ytthumb_core::extract::{classify_line, LineKind};
use ytthumb_core::fetch::CurlFetcher;
use ytthumb_core::notice::{Notice, StatusSink};
use ytthumb_core::preview::{PreviewEntry, PreviewSink};
use ytthumb_core::sink::DirectorySink;
use ytthumb_core::thumbnail;

use crate::cli::console::{ConsolePreview, ConsoleStatus};

pub async fn run_download(cfg: &YtThumbConfig, url: &str, out: Option<PathBuf>) -> Result<()> {
    let status = ConsoleStatus;
    let id = match classify_line(url.trim()) {
        LineKind::Video(id) => id,
        LineKind::Playlist(_) => {
            status.show(&Notice::PlaylistsNotSupported);
            return Ok(());
        }
        LineKind::Unrecognized => {
            status.show(&Notice::NoValidUrls);
            return Ok(());
        }
    };

    let out_dir = match out {
        Some(dir) => dir,
        None => cfg.resolve_output_dir()?,
    };
    let fetcher = CurlFetcher::from_config(cfg);
    let thumb = thumbnail::resolve(&fetcher, &cfg.thumbnail_host, &id).await;
    let entry = PreviewEntry::new(&thumb);
    ConsolePreview::new().append(entry.clone());

    if let Some(path) = entry
        .download(&fetcher, &DirectorySink::new(out_dir), &status)
        .await
    {
        println!("Saved {}", path.display());
    }
    Ok(())
}
