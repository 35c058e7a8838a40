/// Absolute percentage change at which a trend stops being neutral.
pub const TREND_THRESHOLD_PCT: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendDirection {
    Up,
    Down,
    Neutral,
}

/// Month-over-month change. `pct` is `None` when the previous value is zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trend {
    pub pct: Option<f64>,
    pub direction: TrendDirection,
}

impl Trend {
    pub const UNDEFINED: Trend = Trend {
        pct: None,
        direction: TrendDirection::Neutral,
    };
}

/// `(current - previous) / |previous| * 100` rounded to one decimal, classified against
/// [`TREND_THRESHOLD_PCT`].
///
/// Dividing by the magnitude keeps the sign meaningful for quantities that can
/// be negative, such as follower deltas.
#[must_use]
pub fn trend(current: f64, previous: f64) -> Trend {
    if !current.is_finite() || !previous.is_finite() || previous.abs() < f64::EPSILON {
        return Trend::UNDEFINED;
    }
    // Classified at the displayed precision so "+5,0%" is always "up".
    let pct = ((current - previous) / previous.abs() * 1000.0).round() / 10.0;
    let direction = if pct >= TREND_THRESHOLD_PCT {
        TrendDirection::Up
    } else if pct <= -TREND_THRESHOLD_PCT {
        TrendDirection::Down
    } else {
        TrendDirection::Neutral
    };
    Trend {
        pct: Some(pct),
        direction,
    }
}

/// [`trend`] over integer counters.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn count_trend(current: u64, previous: u64) -> Trend {
    trend(current as f64, previous as f64)
}
