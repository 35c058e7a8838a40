//! Contracts for the external systems the report engine reads from.
//!
//! All collaborators are read-only from the engine's point of view and must be
//! `Send + Sync` so independent reports can share one instance.

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

use crate::customers::Customer;
use crate::metrics::{AdsMonthlySummary, PostRecord};
use crate::period::MonthRange;
use crate::platform::Platform;

#[derive(Debug, Error)]
pub enum CollaboratorError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("query failed: {0}")]
    Query(String),

    #[error("timed out after {0:?}")]
    Timeout(Duration),
}

/// Customer Directory: resolves branding and account configuration.
#[async_trait]
pub trait CustomerDirectory: Send + Sync {
    async fn get_customer(&self, id: &str) -> Result<Customer, CollaboratorError>;
}

/// Metrics Store: per-post metrics and follower snapshots.
#[async_trait]
pub trait MetricsStore: Send + Sync {
    /// Posts created inside `range`, each carrying its most recent metrics
    /// snapshot taken at or before the time of the query.
    async fn query_posts(
        &self,
        platform: Platform,
        account_ids: &[String],
        range: &MonthRange,
    ) -> Result<Vec<PostRecord>, CollaboratorError>;

    /// Follower count from the snapshot nearest at or before `at_or_before`,
    /// summed across `account_ids`. `None` when no snapshot exists.
    async fn query_follower_snapshot(
        &self,
        platform: Platform,
        account_ids: &[String],
        at_or_before: NaiveDate,
    ) -> Result<Option<u64>, CollaboratorError>;
}

/// Ads Data Source: monthly paid-media totals and campaign breakdowns.
#[async_trait]
pub trait AdsDataSource: Send + Sync {
    async fn query_ads_summary(
        &self,
        account_ids: &[String],
        range: &MonthRange,
    ) -> Result<AdsMonthlySummary, CollaboratorError>;
}
