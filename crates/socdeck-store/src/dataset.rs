//! On-disk shape of the metrics dataset.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use socdeck_core::{AdsMonthlySummary, Platform, PostMetrics, PostRecord};

/// A post plus its history of metric snapshots.
///
/// `post.metrics` is the baseline used when no snapshot was taken at or
/// before the query time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredPost {
    #[serde(flatten)]
    pub post: PostRecord,
    #[serde(default)]
    pub snapshots: Vec<MetricsSnapshot>,
}

impl StoredPost {
    /// The post with its most recent snapshot taken at or before `as_of`.
    #[must_use]
    pub fn resolve(&self, as_of: DateTime<Utc>) -> PostRecord {
        let latest = self
            .snapshots
            .iter()
            .filter(|s| s.taken_at <= as_of)
            .max_by_key(|s| s.taken_at);

        let mut post = self.post.clone();
        if let Some(snapshot) = latest {
            post.metrics = snapshot.metrics;
        }
        post
    }
}

impl From<PostRecord> for StoredPost {
    fn from(post: PostRecord) -> Self {
        Self {
            post,
            snapshots: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub taken_at: DateTime<Utc>,
    pub metrics: PostMetrics,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FollowerSnapshot {
    pub platform: Platform,
    pub account_id: String,
    pub date: NaiveDate,
    pub followers: u64,
}

/// Monthly paid-media totals for one ad account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdsAccountMonth {
    pub account_id: String,
    #[serde(flatten)]
    pub summary: AdsMonthlySummary,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub posts: Vec<StoredPost>,
    #[serde(default)]
    pub follower_snapshots: Vec<FollowerSnapshot>,
    #[serde(default)]
    pub ads: Vec<AdsAccountMonth>,
}
