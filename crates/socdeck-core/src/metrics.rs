//! Metric records consumed and produced by the report engine.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::period::TargetMonth;
use crate::platform::Platform;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostType {
    Image,
    Video,
    Carousel,
    Reel,
    Story,
    Link,
    Text,
}

impl PostType {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            PostType::Image => "Image",
            PostType::Video => "Video",
            PostType::Carousel => "Carousel",
            PostType::Reel => "Reel",
            PostType::Story => "Story",
            PostType::Link => "Link",
            PostType::Text => "Text",
        }
    }
}

/// Latest metrics snapshot for one post.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostMetrics {
    pub reactions: u64,
    pub comments: u64,
    pub shares: u64,
    pub saves: u64,
    pub reach: u64,
    pub impressions: u64,
    pub video_views: u64,
}

impl PostMetrics {
    /// The third interaction component: shares on Facebook, saves on Instagram.
    #[must_use]
    pub fn shares_or_saves(&self, platform: Platform) -> u64 {
        match platform {
            Platform::Instagram => self.saves,
            Platform::Facebook | Platform::Ads => self.shares,
        }
    }

    /// Reactions + comments + platform-dependent shares or saves.
    #[must_use]
    pub fn interactions(&self, platform: Platform) -> u64 {
        self.reactions
            .saturating_add(self.comments)
            .saturating_add(self.shares_or_saves(platform))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostRecord {
    pub id: String,
    pub platform: Platform,
    pub account_id: String,
    pub created_at: DateTime<Utc>,
    pub post_type: PostType,
    #[serde(default)]
    pub permalink: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub metrics: PostMetrics,
}

impl PostRecord {
    #[must_use]
    pub fn interactions(&self) -> u64 {
        self.metrics.interactions(self.platform)
    }
}

/// One aggregated row per (customer, platform, calendar month).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MonthlyKpi {
    pub month: TargetMonth,
    pub posts_count: u64,
    pub reactions: u64,
    pub comments: u64,
    pub shares_or_saves: u64,
    pub reach: u64,
    pub impressions: u64,
    pub video_views: u64,
    pub followers: u64,
    pub new_followers: i64,
    pub avg_reach_per_post: f64,
    pub engagement_rate: f64,
    /// `false` when the row was zero-filled because a query for this month failed.
    pub data_available: bool,
}

impl MonthlyKpi {
    /// A zero-filled row standing in for a month whose data could not be loaded.
    #[must_use]
    pub fn zero_filled(month: TargetMonth) -> Self {
        Self {
            month,
            posts_count: 0,
            reactions: 0,
            comments: 0,
            shares_or_saves: 0,
            reach: 0,
            impressions: 0,
            video_views: 0,
            followers: 0,
            new_followers: 0,
            avg_reach_per_post: 0.0,
            engagement_rate: 0.0,
            data_available: false,
        }
    }

    #[must_use]
    pub fn interactions(&self) -> u64 {
        self.reactions
            .saturating_add(self.comments)
            .saturating_add(self.shares_or_saves)
    }

    /// True when there is nothing to show for the month: failed query or no posts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.data_available || (self.posts_count == 0 && self.followers == 0)
    }
}

/// Three consecutive monthly rows, oldest first.
pub type KpiWindow = [MonthlyKpi; 3];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignSummary {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub objective: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    pub spend: Decimal,
    #[serde(default)]
    pub impressions: u64,
    #[serde(default)]
    pub clicks: u64,
    #[serde(default)]
    pub reach: u64,
    #[serde(default)]
    pub results: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdsMonthlySummary {
    pub month: TargetMonth,
    pub currency: String,
    pub spend: Decimal,
    #[serde(default)]
    pub impressions: u64,
    #[serde(default)]
    pub clicks: u64,
    #[serde(default)]
    pub reach: u64,
    #[serde(default)]
    pub campaigns: Vec<CampaignSummary>,
}

impl AdsMonthlySummary {
    /// An empty summary for a month with no ad activity.
    #[must_use]
    pub fn empty(month: TargetMonth, currency: &str) -> Self {
        Self {
            month,
            currency: currency.to_string(),
            spend: Decimal::ZERO,
            impressions: 0,
            clicks: 0,
            reach: 0,
            campaigns: Vec::new(),
        }
    }

    /// Click-through rate in percent; 0 when there were no impressions.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn ctr(&self) -> f64 {
        if self.impressions == 0 {
            0.0
        } else {
            self.clicks as f64 / self.impressions as f64 * 100.0
        }
    }

    /// Cost per click; `None` when there were no clicks.
    #[must_use]
    pub fn cpc(&self) -> Option<Decimal> {
        if self.clicks == 0 {
            None
        } else {
            Some(self.spend / Decimal::from(self.clicks))
        }
    }

    #[must_use]
    pub fn has_activity(&self) -> bool {
        self.spend > Decimal::ZERO || self.impressions > 0 || !self.campaigns.is_empty()
    }
}
