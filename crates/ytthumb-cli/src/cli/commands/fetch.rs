//! `ytthumb fetch <url>...` – run one batch.

use anyhow::Result;
use std::path::PathBuf;
use std::sync::Arc;
use ytthumb_core::batch::{BatchOrchestrator, BatchOutcome, BatchSettings};
use ytthumb_core::config::YtThumbConfig;
use ytthumb_core::fetch::CurlFetcher;
use ytthumb_core::sink::DirectorySink;

use crate::cli::console::{ConsolePreview, ConsoleStatus};

pub async fn run_fetch(
    cfg: &YtThumbConfig,
    text: &str,
    out: Option<PathBuf>,
    save_each: bool,
) -> Result<()> {
    let out_dir = match out {
        Some(dir) => dir,
        None => cfg.resolve_output_dir()?,
    };
    let preview = Arc::new(ConsolePreview::new());
    let orch = BatchOrchestrator::new(
        Arc::new(CurlFetcher::from_config(cfg)),
        preview.clone(),
        Arc::new(ConsoleStatus),
        Arc::new(DirectorySink::new(&out_dir)),
        BatchSettings::from(cfg),
    );

    let report = match orch.run(text).await {
        BatchOutcome::Completed(report) => report,
        BatchOutcome::Busy | BatchOutcome::Rejected(_) => return Ok(()),
    };

    if let Some(archive) = &report.archive {
        println!(
            "Saved {} ({} of {} thumbnails)",
            archive.path.display(),
            archive.entries.len(),
            report.thumbnails.len()
        );
    }

    if save_each {
        for entry in preview.entries() {
            if let Some(path) = orch.download_entry(&entry).await {
                println!("Saved {}", path.display());
            }
        }
    } else if report.thumbnails.len() == 1 {
        println!("Single thumbnail: no archive. Use --save-each to save it.");
    }

    tracing::info!(
        thumbnails = report.thumbnails.len(),
        playlists = report.playlists.len(),
        unrecognized = report.unrecognized,
        "fetch finished"
    );
    Ok(())
}
