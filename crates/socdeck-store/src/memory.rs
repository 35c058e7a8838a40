use std::cmp::Reverse;
use std::collections::{HashMap, HashSet};
use std::path::Path;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use socdeck_core::{
    AdsDataSource, AdsMonthlySummary, CollaboratorError, MetricsStore, MonthRange, Platform,
    PostRecord,
};

use crate::dataset::{AdsAccountMonth, Dataset, FollowerSnapshot, StoredPost};
use crate::error::StoreError;

/// Currency reported for months without any ad records.
pub const DEFAULT_ADS_CURRENCY: &str = "EUR";

/// Metrics Store and Ads Data Source over an in-memory [`Dataset`].
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    dataset: Dataset,
    as_of: Option<DateTime<Utc>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new(dataset: Dataset) -> Self {
        Self {
            dataset,
            as_of: None,
        }
    }

    /// Load a dataset from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the file cannot be read, parsed, or validated.
    pub fn from_json_file(path: &Path) -> Result<Self, StoreError> {
        let content = std::fs::read_to_string(path).map_err(|e| StoreError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_json_str(&content)
    }

    /// # Errors
    ///
    /// Returns [`StoreError`] if the JSON is malformed or fails validation.
    pub fn from_json_str(json: &str) -> Result<Self, StoreError> {
        let dataset: Dataset = serde_json::from_str(json)?;
        validate_dataset(&dataset)?;
        tracing::debug!(
            posts = dataset.posts.len(),
            follower_snapshots = dataset.follower_snapshots.len(),
            ads = dataset.ads.len(),
            "dataset loaded"
        );
        Ok(Self::new(dataset))
    }

    /// Pin the "query time" used to pick post metric snapshots. Defaults to now.
    #[must_use]
    pub fn with_as_of(mut self, as_of: DateTime<Utc>) -> Self {
        self.as_of = Some(as_of);
        self
    }

    pub fn push_post(&mut self, post: impl Into<StoredPost>) {
        self.dataset.posts.push(post.into());
    }

    pub fn push_follower_snapshot(&mut self, snapshot: FollowerSnapshot) {
        self.dataset.follower_snapshots.push(snapshot);
    }

    pub fn push_ads(&mut self, record: AdsAccountMonth) {
        self.dataset.ads.push(record);
    }

    #[must_use]
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Every distinct thumbnail URL referenced by the dataset, sorted.
    #[must_use]
    pub fn thumbnail_urls(&self) -> Vec<&str> {
        let mut urls: Vec<&str> = self
            .dataset
            .posts
            .iter()
            .filter_map(|p| p.post.thumbnail_url.as_deref())
            .collect();
        urls.sort_unstable();
        urls.dedup();
        urls
    }

    fn posts_in(
        &self,
        platform: Platform,
        account_ids: &[String],
        range: &MonthRange,
    ) -> Vec<PostRecord> {
        let as_of = self.as_of.unwrap_or_else(Utc::now);
        self.dataset
            .posts
            .iter()
            .filter(|p| {
                p.post.platform == platform
                    && account_ids.contains(&p.post.account_id)
                    && range.contains(p.post.created_at)
            })
            .map(|p| p.resolve(as_of))
            .collect()
    }

    fn followers_at(
        &self,
        platform: Platform,
        account_ids: &[String],
        at_or_before: NaiveDate,
    ) -> Option<u64> {
        let mut latest: HashMap<&str, &FollowerSnapshot> = HashMap::new();
        for snapshot in &self.dataset.follower_snapshots {
            if snapshot.platform != platform
                || snapshot.date > at_or_before
                || !account_ids.contains(&snapshot.account_id)
            {
                continue;
            }
            latest
                .entry(snapshot.account_id.as_str())
                .and_modify(|current| {
                    if snapshot.date > current.date {
                        *current = snapshot;
                    }
                })
                .or_insert(snapshot);
        }

        if latest.is_empty() {
            None
        } else {
            Some(latest.values().map(|s| s.followers).sum())
        }
    }

    fn ads_for(
        &self,
        account_ids: &[String],
        range: &MonthRange,
    ) -> Result<AdsMonthlySummary, CollaboratorError> {
        let month = range.month();
        let records: Vec<&AdsAccountMonth> = self
            .dataset
            .ads
            .iter()
            .filter(|r| r.summary.month == month && account_ids.contains(&r.account_id))
            .collect();

        let Some(first) = records.first() else {
            return Ok(AdsMonthlySummary::empty(month, DEFAULT_ADS_CURRENCY));
        };

        let currency = first.summary.currency.clone();
        let mut merged = AdsMonthlySummary::empty(month, &currency);
        for record in &records {
            let s = &record.summary;
            if s.currency != currency {
                return Err(CollaboratorError::Query(format!(
                    "ad accounts report mixed currencies ({currency} and {}) for {month}",
                    s.currency
                )));
            }
            merged.spend += s.spend;
            merged.impressions = merged.impressions.saturating_add(s.impressions);
            merged.clicks = merged.clicks.saturating_add(s.clicks);
            merged.reach = merged.reach.saturating_add(s.reach);
            merged.campaigns.extend(s.campaigns.iter().cloned());
        }
        merged
            .campaigns
            .sort_by(|a, b| b.spend.cmp(&a.spend).then_with(|| a.name.cmp(&b.name)));

        Ok(merged)
    }
}

fn validate_dataset(dataset: &Dataset) -> Result<(), StoreError> {
    let mut seen = HashSet::new();
    for stored in &dataset.posts {
        if stored.post.id.trim().is_empty() {
            return Err(StoreError::Validation("post id must be non-empty".to_string()));
        }
        if !seen.insert((stored.post.platform, stored.post.id.as_str())) {
            return Err(StoreError::Validation(format!(
                "duplicate {} post id: '{}'",
                stored.post.platform, stored.post.id
            )));
        }
    }

    for record in &dataset.ads {
        if record.summary.spend < Decimal::ZERO {
            return Err(StoreError::Validation(format!(
                "ad account '{}' has negative spend for {}",
                record.account_id, record.summary.month
            )));
        }
    }

    Ok(())
}

#[async_trait]
impl MetricsStore for MemoryStore {
    async fn query_posts(
        &self,
        platform: Platform,
        account_ids: &[String],
        range: &MonthRange,
    ) -> Result<Vec<PostRecord>, CollaboratorError> {
        let mut posts = self.posts_in(platform, account_ids, range);
        posts.sort_by_key(|p| (Reverse(p.created_at), p.id.clone()));
        Ok(posts)
    }

    async fn query_follower_snapshot(
        &self,
        platform: Platform,
        account_ids: &[String],
        at_or_before: NaiveDate,
    ) -> Result<Option<u64>, CollaboratorError> {
        Ok(self.followers_at(platform, account_ids, at_or_before))
    }
}

#[async_trait]
impl AdsDataSource for MemoryStore {
    async fn query_ads_summary(
        &self,
        account_ids: &[String],
        range: &MonthRange,
    ) -> Result<AdsMonthlySummary, CollaboratorError> {
        self.ads_for(account_ids, range)
    }
}

#[cfg(test)]
#[path = "memory_test.rs"]
mod tests;
