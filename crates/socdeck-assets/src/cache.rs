use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use crate::error::AssetError;
use crate::fetch::{is_fetchable_url, AssetFetcher};
use crate::probe::{normalize_image, ImageAsset};

#[derive(Debug)]
enum AssetEntry {
    Available(ImageAsset),
    Unavailable,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub available: usize,
    pub unavailable: usize,
}

/// URL-keyed asset cache scoped to a single report.
///
/// Once an entry is set, success or failure, it is never fetched again.
/// There is no eviction.
pub struct AssetCache {
    fetcher: Arc<dyn AssetFetcher>,
    timeout: Duration,
    entries: HashMap<String, AssetEntry>,
    fetch_count: usize,
}

impl AssetCache {
    #[must_use]
    pub fn new(fetcher: Arc<dyn AssetFetcher>, timeout: Duration) -> Self {
        Self {
            fetcher,
            timeout,
            entries: HashMap::new(),
            fetch_count: 0,
        }
    }

    /// Resolve `url` into the cache, fetching it on first reference.
    ///
    /// Returns whether the asset is available. Never fails: every error is
    /// recorded as an unavailable entry.
    pub async fn fetch(&mut self, url: &str) -> bool {
        if let Some(entry) = self.entries.get(url) {
            return matches!(entry, AssetEntry::Available(_));
        }

        let entry = if is_fetchable_url(url) {
            self.fetch_count += 1;
            match self.retrieve(url).await {
                Ok(asset) => {
                    tracing::debug!(
                        url,
                        bytes = asset.bytes.len(),
                        width = asset.width,
                        height = asset.height,
                        "asset cached"
                    );
                    AssetEntry::Available(asset)
                }
                Err(e) => {
                    tracing::warn!(url, error = %e, "asset unavailable, using fallback");
                    AssetEntry::Unavailable
                }
            }
        } else {
            tracing::debug!(url, "asset URL not fetchable, marking unavailable");
            AssetEntry::Unavailable
        };

        let available = matches!(entry, AssetEntry::Available(_));
        self.entries.insert(url.to_string(), entry);
        available
    }

    async fn retrieve(&self, url: &str) -> Result<ImageAsset, AssetError> {
        let bytes = tokio::time::timeout(self.timeout, self.fetcher.fetch_bytes(url))
            .await
            .map_err(|_| AssetError::Timeout(self.timeout))??;
        normalize_image(bytes)
    }

    /// Cached asset for `url`, or `None` when it was never fetched or is unavailable.
    #[must_use]
    pub fn get(&self, url: &str) -> Option<&ImageAsset> {
        match self.entries.get(url) {
            Some(AssetEntry::Available(asset)) => Some(asset),
            Some(AssetEntry::Unavailable) | None => None,
        }
    }

    /// Number of network retrievals attempted.
    #[must_use]
    pub fn fetch_count(&self) -> usize {
        self.fetch_count
    }

    #[must_use]
    pub fn stats(&self) -> CacheStats {
        self.entries
            .values()
            .fold(CacheStats::default(), |mut stats, entry| {
                match entry {
                    AssetEntry::Available(_) => stats.available += 1,
                    AssetEntry::Unavailable => stats.unavailable += 1,
                }
                stats
            })
    }
}
