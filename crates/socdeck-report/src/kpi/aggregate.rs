use std::future::Future;
use std::time::Duration;

use socdeck_core::{
    AdsDataSource, AdsMonthlySummary, CollaboratorError, KpiWindow, MetricsStore, MonthlyKpi,
    Platform, PostRecord, TargetMonth,
};

/// Ads summaries for the three-month window, oldest first. `None` marks a
/// month whose query failed.
pub type AdsWindow = [Option<AdsMonthlySummary>; 3];

/// Everything the slide modules need for one social platform.
#[derive(Debug, Clone)]
pub struct SocialData {
    pub platform: Platform,
    pub window: KpiWindow,
    /// Saves per month, oldest first, regardless of platform.
    pub saves: [u64; 3],
    /// Target-month posts, best first (see [`rank_posts`]).
    pub posts: Vec<PostRecord>,
}

impl SocialData {
    #[must_use]
    pub fn current(&self) -> &MonthlyKpi {
        &self.window[2]
    }

    #[must_use]
    pub fn previous(&self) -> &MonthlyKpi {
        &self.window[1]
    }

    /// True when none of the three months has anything to show.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.window.iter().all(MonthlyKpi::is_empty)
    }
}

struct MonthLoad {
    kpi: MonthlyKpi,
    saves: u64,
    posts: Vec<PostRecord>,
}

/// Pulls KPI inputs from the Metrics Store and Ads Data Source.
///
/// Every collaborator call is bounded by `timeout`. A failed or timed-out
/// month becomes a zero-filled row (or `None` for ads); nothing here returns
/// an error to the caller.
pub struct KpiAggregator<'a> {
    store: &'a dyn MetricsStore,
    ads: &'a dyn AdsDataSource,
    timeout: Duration,
}

impl<'a> KpiAggregator<'a> {
    #[must_use]
    pub fn new(store: &'a dyn MetricsStore, ads: &'a dyn AdsDataSource, timeout: Duration) -> Self {
        Self {
            store,
            ads,
            timeout,
        }
    }

    async fn bounded<T, F>(&self, fut: F) -> Result<T, CollaboratorError>
    where
        F: Future<Output = Result<T, CollaboratorError>>,
    {
        tokio::time::timeout(self.timeout, fut)
            .await
            .map_err(|_| CollaboratorError::Timeout(self.timeout))?
    }

    /// Aggregate the three-month window ending at `month` for one social platform.
    pub async fn social(
        &self,
        platform: Platform,
        account_ids: &[String],
        month: TargetMonth,
    ) -> SocialData {
        let window = month.window();
        let mut rows = window.map(MonthlyKpi::zero_filled);
        let mut saves = [0_u64; 3];
        let mut posts = Vec::new();

        for (i, m) in window.into_iter().enumerate() {
            match self.load_month(platform, account_ids, m).await {
                Ok(load) => {
                    rows[i] = load.kpi;
                    saves[i] = load.saves;
                    if m == month {
                        posts = load.posts;
                    }
                }
                Err(e) => {
                    tracing::warn!(
                        platform = %platform,
                        month = %m,
                        error = %e,
                        "KPI query failed, using zero-filled row"
                    );
                }
            }
        }

        rank_posts(&mut posts);
        tracing::debug!(
            platform = %platform,
            month = %month,
            posts = posts.len(),
            reach = rows[2].reach,
            "platform KPIs aggregated"
        );

        SocialData {
            platform,
            window: rows,
            saves,
            posts,
        }
    }

    async fn load_month(
        &self,
        platform: Platform,
        account_ids: &[String],
        month: TargetMonth,
    ) -> Result<MonthLoad, CollaboratorError> {
        let range = month.range();
        let returned = self
            .bounded(self.store.query_posts(platform, account_ids, &range))
            .await?;
        let returned_count = returned.len();
        let posts: Vec<PostRecord> = returned
            .into_iter()
            .filter(|p| p.platform == platform && range.contains(p.created_at))
            .collect();
        if posts.len() != returned_count {
            tracing::debug!(
                platform = %platform,
                month = %month,
                dropped = returned_count - posts.len(),
                "dropped posts outside the requested month"
            );
        }

        let followers = self
            .bounded(
                self.store
                    .query_follower_snapshot(platform, account_ids, range.last_day()),
            )
            .await?;
        let previous_followers = self
            .bounded(self.store.query_follower_snapshot(
                platform,
                account_ids,
                month.previous().last_day(),
            ))
            .await?;

        let kpi = summarize_month(platform, month, &posts, followers, previous_followers);
        let saves = posts.iter().map(|p| p.metrics.saves).sum();
        Ok(MonthLoad { kpi, saves, posts })
    }

    /// Ads summaries for the three-month window ending at `month`.
    pub async fn ads(&self, account_ids: &[String], month: TargetMonth) -> AdsWindow {
        let window = month.window();
        let mut out: AdsWindow = [None, None, None];
        for (slot, m) in out.iter_mut().zip(window) {
            match self
                .bounded(self.ads.query_ads_summary(account_ids, &m.range()))
                .await
            {
                Ok(summary) => *slot = Some(summary),
                Err(e) => {
                    tracing::warn!(
                        platform = %Platform::Ads,
                        month = %m,
                        error = %e,
                        "ads query failed, month will show no data"
                    );
                }
            }
        }
        out
    }
}

/// Fold one month of posts and follower snapshots into a [`MonthlyKpi`].
///
/// Rates are 0 whenever their denominator is 0. The follower delta is 0
/// unless both snapshots exist.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn summarize_month(
    platform: Platform,
    month: TargetMonth,
    posts: &[PostRecord],
    followers: Option<u64>,
    previous_followers: Option<u64>,
) -> MonthlyKpi {
    let mut row = MonthlyKpi::zero_filled(month);
    row.data_available = true;

    for post in posts {
        let m = &post.metrics;
        row.posts_count += 1;
        row.reactions = row.reactions.saturating_add(m.reactions);
        row.comments = row.comments.saturating_add(m.comments);
        row.shares_or_saves = row.shares_or_saves.saturating_add(m.shares_or_saves(platform));
        row.reach = row.reach.saturating_add(m.reach);
        row.impressions = row.impressions.saturating_add(m.impressions);
        row.video_views = row.video_views.saturating_add(m.video_views);
    }

    if row.posts_count > 0 {
        row.avg_reach_per_post = row.reach as f64 / row.posts_count as f64;
    }
    if row.reach > 0 {
        row.engagement_rate = row.interactions() as f64 / row.reach as f64 * 100.0;
    }

    row.followers = followers.unwrap_or(0);
    row.new_followers = match (followers, previous_followers) {
        (Some(current), Some(previous)) => {
            let current = i64::try_from(current).unwrap_or(i64::MAX);
            let previous = i64::try_from(previous).unwrap_or(i64::MAX);
            current.saturating_sub(previous)
        }
        _ => 0,
    };

    row
}

/// Order posts by interactions, then reach, then newest, then id.
pub fn rank_posts(posts: &mut [PostRecord]) {
    posts.sort_by(|a, b| {
        b.interactions()
            .cmp(&a.interactions())
            .then_with(|| b.metrics.reach.cmp(&a.metrics.reach))
            .then_with(|| b.created_at.cmp(&a.created_at))
            .then_with(|| a.id.cmp(&b.id))
    });
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use socdeck_core::{MonthRange, PostMetrics, PostType};

    use super::*;

    /// July fails, August hangs past the timeout, September over-returns.
    struct ScriptedStore;

    #[async_trait]
    impl MetricsStore for ScriptedStore {
        async fn query_posts(
            &self,
            _platform: Platform,
            _account_ids: &[String],
            range: &MonthRange,
        ) -> Result<Vec<PostRecord>, CollaboratorError> {
            match range.month().to_string().as_str() {
                "2026-07" => Err(CollaboratorError::Query("connection reset".to_string())),
                "2026-08" => {
                    tokio::time::sleep(Duration::from_secs(10)).await;
                    Ok(Vec::new())
                }
                _ => Ok(vec![
                    post("early", "2026-08-31T23:59:59Z", reach(9_000)),
                    post("first", "2026-09-01T00:00:00Z", reach(300)),
                    post("last", "2026-09-30T23:59:59Z", reach(700)),
                    post("next", "2026-10-01T00:00:00Z", reach(9_000)),
                ]),
            }
        }

        async fn query_follower_snapshot(
            &self,
            _platform: Platform,
            _account_ids: &[String],
            at_or_before: NaiveDate,
        ) -> Result<Option<u64>, CollaboratorError> {
            let month_end = NaiveDate::from_ymd_opt(2026, 9, 30).unwrap();
            Ok(Some(if at_or_before >= month_end {
                1_050
            } else {
                1_000
            }))
        }
    }

    #[async_trait]
    impl AdsDataSource for ScriptedStore {
        async fn query_ads_summary(
            &self,
            _account_ids: &[String],
            range: &MonthRange,
        ) -> Result<AdsMonthlySummary, CollaboratorError> {
            if range.month().to_string() == "2026-08" {
                return Err(CollaboratorError::Query("rate limited".to_string()));
            }
            Ok(AdsMonthlySummary::empty(range.month(), "EUR"))
        }
    }

    fn reach(reach: u64) -> PostMetrics {
        PostMetrics {
            reactions: 10,
            reach,
            ..PostMetrics::default()
        }
    }

    fn month() -> TargetMonth {
        TargetMonth::parse("2026-09").unwrap()
    }

    fn post(id: &str, created: &str, metrics: PostMetrics) -> PostRecord {
        PostRecord {
            id: id.to_string(),
            platform: Platform::Facebook,
            account_id: "fb-1".to_string(),
            created_at: created.parse().unwrap(),
            post_type: PostType::Image,
            permalink: None,
            message: None,
            thumbnail_url: None,
            metrics,
        }
    }

    #[tokio::test]
    async fn failed_and_timed_out_months_are_zero_filled() {
        let store = ScriptedStore;
        let aggregator = KpiAggregator::new(&store, &store, Duration::from_millis(50));
        let data = aggregator
            .social(Platform::Facebook, &["fb-1".to_string()], month())
            .await;

        let availability: Vec<(String, bool)> = data
            .window
            .iter()
            .map(|row| (row.month.to_string(), row.data_available))
            .collect();
        assert_eq!(
            availability,
            vec![
                ("2026-07".to_string(), false),
                ("2026-08".to_string(), false),
                ("2026-09".to_string(), true),
            ]
        );
        assert_eq!(data.window[0], MonthlyKpi::zero_filled(data.window[0].month));
        assert_eq!(data.window[1].posts_count, 0);
    }

    #[tokio::test]
    async fn posts_outside_the_month_are_dropped() {
        let store = ScriptedStore;
        let aggregator = KpiAggregator::new(&store, &store, Duration::from_millis(50));
        let data = aggregator
            .social(Platform::Facebook, &["fb-1".to_string()], month())
            .await;

        let current = data.current();
        assert_eq!(current.posts_count, 2);
        assert_eq!(current.reach, 1_000);
        assert_eq!(current.new_followers, 50);
        let ids: Vec<&str> = data.posts.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["last", "first"]);
    }

    #[tokio::test]
    async fn failed_ads_month_is_none() {
        let store = ScriptedStore;
        let aggregator = KpiAggregator::new(&store, &store, Duration::from_millis(50));
        let window = aggregator.ads(&["act-1".to_string()], month()).await;
        let loaded: Vec<bool> = window.iter().map(Option::is_some).collect();
        assert_eq!(loaded, vec![true, false, true]);
    }

    #[test]
    fn zero_posts_give_all_zero_row() {
        let row = summarize_month(Platform::Facebook, month(), &[], None, None);
        assert!(row.data_available);
        assert_eq!(row.posts_count, 0);
        assert_eq!(row.interactions(), 0);
        assert_eq!(row.reach, 0);
        assert_eq!(row.followers, 0);
        assert_eq!(row.new_followers, 0);
        assert!(row.avg_reach_per_post.abs() < f64::EPSILON);
        assert!(row.engagement_rate.abs() < f64::EPSILON);
    }

    #[test]
    fn engagement_rate_is_zero_without_reach() {
        let posts = [post(
            "p1",
            "2026-09-02T10:00:00Z",
            PostMetrics {
                reactions: 50,
                comments: 10,
                shares: 5,
                ..PostMetrics::default()
            },
        )];
        let row = summarize_month(Platform::Facebook, month(), &posts, None, None);
        assert_eq!(row.interactions(), 65);
        assert!(row.engagement_rate.abs() < f64::EPSILON);
        assert!(!row.engagement_rate.is_nan());
    }

    #[test]
    fn sums_and_rates() {
        let posts = [
            post(
                "p1",
                "2026-09-02T10:00:00Z",
                PostMetrics {
                    reactions: 30,
                    comments: 5,
                    shares: 5,
                    saves: 99,
                    reach: 1_000,
                    impressions: 1_500,
                    video_views: 0,
                },
            ),
            post(
                "p2",
                "2026-09-12T10:00:00Z",
                PostMetrics {
                    reactions: 50,
                    comments: 10,
                    shares: 0,
                    saves: 0,
                    reach: 1_000,
                    impressions: 1_200,
                    video_views: 400,
                },
            ),
        ];
        let row = summarize_month(Platform::Facebook, month(), &posts, Some(1_200), Some(1_150));
        assert_eq!(row.posts_count, 2);
        assert_eq!(row.shares_or_saves, 5);
        assert_eq!(row.interactions(), 100);
        assert_eq!(row.video_views, 400);
        assert!((row.avg_reach_per_post - 1_000.0).abs() < f64::EPSILON);
        assert!((row.engagement_rate - 5.0).abs() < 1e-9);
        assert_eq!(row.followers, 1_200);
        assert_eq!(row.new_followers, 50);
    }

    #[test]
    fn follower_delta_needs_both_snapshots() {
        let row = summarize_month(Platform::Instagram, month(), &[], Some(500), None);
        assert_eq!(row.followers, 500);
        assert_eq!(row.new_followers, 0);

        let row = summarize_month(Platform::Instagram, month(), &[], None, Some(500));
        assert_eq!(row.followers, 0);
        assert_eq!(row.new_followers, 0);
    }

    #[test]
    fn follower_loss_is_negative() {
        let row = summarize_month(Platform::Instagram, month(), &[], Some(90), Some(100));
        assert_eq!(row.new_followers, -10);
    }

    #[test]
    fn ranking_is_total_and_deterministic() {
        let m = |reactions, reach| PostMetrics {
            reactions,
            reach,
            ..PostMetrics::default()
        };
        let mut posts = vec![
            post("c", "2026-09-03T00:00:00Z", m(10, 100)),
            post("a", "2026-09-05T00:00:00Z", m(10, 100)),
            post("b", "2026-09-05T00:00:00Z", m(10, 100)),
            post("d", "2026-09-01T00:00:00Z", m(10, 500)),
            post("e", "2026-09-01T00:00:00Z", m(90, 1)),
        ];
        rank_posts(&mut posts);
        let order: Vec<&str> = posts.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(order, vec!["e", "d", "a", "b", "c"]);
    }
}
