use super::color::{DOWN_COLOR, NEUTRAL_COLOR, UP_COLOR};
use super::format::{format_signed_percent, NO_VALUE};
use crate::kpi::{Trend, TrendDirection};

/// The rendered form of a [`Trend`]: signed percentage text plus a color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrendPill {
    pub text: String,
    pub color: &'static str,
}

#[must_use]
pub fn trend_pill(trend: &Trend) -> TrendPill {
    let text = trend
        .pct
        .map_or_else(|| NO_VALUE.to_string(), format_signed_percent);
    let color = match trend.direction {
        TrendDirection::Up => UP_COLOR,
        TrendDirection::Down => DOWN_COLOR,
        TrendDirection::Neutral => NEUTRAL_COLOR,
    };
    TrendPill { text, color }
}
