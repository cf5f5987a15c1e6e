//! Integration test: a local thumbnail host, the libcurl fetcher and a
//! directory sink, driven through a full batch.

mod common;

use std::collections::HashMap;
use std::io::Read;
use std::sync::Arc;

use tempfile::tempdir;
use ytthumb_core::batch::{BatchOrchestrator, BatchOutcome, BatchReport, BatchSettings};
use ytthumb_core::config::YtThumbConfig;
use ytthumb_core::fetch::CurlFetcher;
use ytthumb_core::notice::StatusBoard;
use ytthumb_core::preview::PreviewBoard;
use ytthumb_core::sink::DirectorySink;
use ytthumb_core::thumbnail::Quality;

fn jpeg(tag: &str) -> Vec<u8> {
    let mut body = vec![0xFF, 0xD8, 0xFF];
    body.extend_from_slice(tag.as_bytes());
    body
}

fn report(outcome: BatchOutcome) -> BatchReport {
    match outcome {
        BatchOutcome::Completed(r) => r,
        other => panic!("expected Completed, got {:?}", other),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn batch_resolves_over_http_and_writes_archive() {
    let mut images = HashMap::new();
    images.insert("/vi/abc123/maxresdefault.jpg".to_string(), jpeg("abc-max"));
    images.insert("/vi/xyz789/hqdefault.jpg".to_string(), jpeg("xyz-hq"));
    images.insert("/vi/xyz789/mqdefault.jpg".to_string(), jpeg("xyz-mq"));
    let server = common::image_server::start(images);

    let out = tempdir().unwrap();
    let cfg = YtThumbConfig {
        thumbnail_host: server.thumbnail_host(),
        request_timeout_secs: Some(10),
        ..YtThumbConfig::default()
    };
    let preview = Arc::new(PreviewBoard::new());
    let status = Arc::new(StatusBoard::new());
    let orch = BatchOrchestrator::new(
        Arc::new(CurlFetcher::from_config(&cfg)),
        preview.clone(),
        status.clone(),
        Arc::new(DirectorySink::new(out.path())),
        BatchSettings::from(&cfg),
    );

    let r = report(
        orch.run("https://youtu.be/abc123\nhttps://www.youtube.com/watch?v=xyz789&t=5")
            .await,
    );

    assert_eq!(r.thumbnails.len(), 2);
    assert_eq!(r.thumbnails[0].quality, Quality::MaxRes);
    assert_eq!(r.thumbnails[1].quality, Quality::High);
    assert_eq!(preview.len(), 2);
    assert!(status.current().is_none());

    let archive = r.archive.expect("archive written");
    assert!(archive.path.starts_with(out.path()));
    let file = std::fs::File::open(&archive.path).unwrap();
    let mut zip = zip::ZipArchive::new(file).unwrap();
    assert_eq!(zip.len(), 2);
    let mut body = Vec::new();
    zip.by_name("xyz789.jpg").unwrap().read_to_end(&mut body).unwrap();
    assert_eq!(body, jpeg("xyz-hq"));

    // Standard was probed and missed before high was found; medium never asked.
    let requests = server.requests();
    assert!(requests.contains(&"/vi/xyz789/sddefault.jpg".to_string()));
    assert!(!requests.contains(&"/vi/xyz789/mqdefault.jpg".to_string()));
}

#[tokio::test(flavor = "multi_thread")]
async fn missing_video_falls_back_and_is_left_out_of_archive() {
    let mut images = HashMap::new();
    images.insert("/vi/present/sddefault.jpg".to_string(), jpeg("present-sd"));
    let server = common::image_server::start(images);

    let out = tempdir().unwrap();
    let cfg = YtThumbConfig {
        thumbnail_host: server.thumbnail_host(),
        ..YtThumbConfig::default()
    };
    let status = Arc::new(StatusBoard::new());
    let orch = BatchOrchestrator::new(
        Arc::new(CurlFetcher::from_config(&cfg)),
        Arc::new(PreviewBoard::new()),
        status.clone(),
        Arc::new(DirectorySink::new(out.path())),
        BatchSettings::from(&cfg),
    );

    let r = report(orch.run("https://youtu.be/present\nhttps://youtu.be/absent").await);

    let absent = &r.thumbnails[1];
    assert_eq!(absent.quality, Quality::Default);
    assert!(absent.url.ends_with("/vi/absent/default.jpg"));

    let archive = r.archive.expect("partial archive still written");
    assert_eq!(archive.entries, vec!["present.jpg"]);
    assert_eq!(archive.skipped, vec!["absent.jpg"]);
    assert!(status.current().is_none());

    // Default was never probed, only fetched once for the archive.
    let default_hits = server
        .requests()
        .iter()
        .filter(|p| p.as_str() == "/vi/absent/default.jpg")
        .count();
    assert_eq!(default_hits, 1);
}
