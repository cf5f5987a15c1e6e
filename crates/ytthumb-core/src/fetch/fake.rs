//! In-memory fetcher for unit tests.

use super::{FetchError, ImageFetcher};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Mutex;

/// Serves a fixed set of URLs; records every probe and fetch.
#[derive(Default)]
pub(crate) struct FakeFetcher {
    pub(crate) available: HashSet<String>,
    pub(crate) broken_fetch: HashSet<String>,
    pub(crate) probes: Mutex<Vec<String>>,
    pub(crate) fetches: Mutex<Vec<String>>,
}

impl FakeFetcher {
    pub(crate) fn with_available<I: IntoIterator<Item = String>>(urls: I) -> Self {
        Self {
            available: urls.into_iter().collect(),
            ..Self::default()
        }
    }

    pub(crate) fn probe_log(&self) -> Vec<String> {
        self.probes.lock().unwrap().clone()
    }

    pub(crate) fn fetch_log(&self) -> Vec<String> {
        self.fetches.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageFetcher for FakeFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        self.fetches.lock().unwrap().push(url.to_string());
        if self.broken_fetch.contains(url) {
            return Err(FetchError::Http(500));
        }
        Ok(format!("jpeg:{}", url).into_bytes())
    }

    async fn probe(&self, url: &str) -> Result<(), FetchError> {
        self.probes.lock().unwrap().push(url.to_string());
        if self.available.contains(url) {
            Ok(())
        } else {
            Err(FetchError::Http(404))
        }
    }
}
