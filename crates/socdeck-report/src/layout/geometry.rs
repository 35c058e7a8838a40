/// Slide width in points (16:9).
pub const SLIDE_WIDTH: f64 = 960.0;
/// Slide height in points (16:9).
pub const SLIDE_HEIGHT: f64 = 540.0;

const EMU_PER_POINT: f64 = 12_700.0;

/// Axis-aligned box in points, origin top-left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    #[must_use]
    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    #[must_use]
    pub fn full_slide() -> Self {
        Self::new(0.0, 0.0, SLIDE_WIDTH, SLIDE_HEIGHT)
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }

    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    /// Shrink by `pad` on every side, never below zero size.
    #[must_use]
    pub fn inset(&self, pad: f64) -> Self {
        Self::new(
            self.x + pad,
            self.y + pad,
            (self.w - 2.0 * pad).max(0.0),
            (self.h - 2.0 * pad).max(0.0),
        )
    }

    /// Split off the top `height` points; returns `(top, rest)`.
    #[must_use]
    pub fn split_top(&self, height: f64) -> (Self, Self) {
        let height = height.clamp(0.0, self.h);
        (
            Self::new(self.x, self.y, self.w, height),
            Self::new(self.x, self.y + height, self.w, self.h - height),
        )
    }

    /// Largest box with the given aspect ratio, centered inside `self`.
    #[must_use]
    pub fn fit_aspect(&self, aspect: f64) -> Self {
        if aspect <= 0.0 || !aspect.is_finite() || self.h <= 0.0 {
            return *self;
        }
        let (w, h) = if self.w / self.h > aspect {
            (self.h * aspect, self.h)
        } else {
            (self.w, self.w / aspect)
        };
        Self::new(self.x + (self.w - w) / 2.0, self.y + (self.h - h) / 2.0, w, h)
    }

    /// Extents in English Metric Units as used by `DrawingML`.
    #[must_use]
    pub fn to_emu(&self) -> (i64, i64, i64, i64) {
        (to_emu(self.x), to_emu(self.y), to_emu(self.w), to_emu(self.h))
    }
}

#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn to_emu(points: f64) -> i64 {
    (points * EMU_PER_POINT).round() as i64
}
