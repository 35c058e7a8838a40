//! Three-month KPI aggregation and trend math.

mod aggregate;
mod trend;

pub use aggregate::{rank_posts, summarize_month, AdsWindow, KpiAggregator, SocialData};
pub use trend::{count_trend, trend, Trend, TrendDirection, TREND_THRESHOLD_PCT};
