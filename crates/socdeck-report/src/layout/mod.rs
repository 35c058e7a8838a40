//! Pure geometry and formatting helpers shared by every slide module.

pub mod bars;
pub mod color;
pub mod format;
pub mod geometry;
pub mod grid;
pub mod pill;

pub use bars::{bar_rects, scale_bars};
pub use color::{
    readable_text_color, DOWN_COLOR, MUTED_COLOR, NEUTRAL_COLOR, SURFACE_COLOR, TEXT_COLOR,
    UP_COLOR, WHITE,
};
pub use format::{
    format_compact, format_currency, format_decimal, format_grouped, format_grouped_signed,
    format_percent, format_signed_percent, truncate_chars, NO_VALUE,
};
pub use geometry::{Rect, SLIDE_HEIGHT, SLIDE_WIDTH};
pub use grid::GridLayout;
pub use pill::{trend_pill, TrendPill};
