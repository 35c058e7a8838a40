use super::geometry::Rect;

/// Fixed-column grid placement.
///
/// Item `i` goes to row `i / columns`, column `i % columns`. Cells never
/// shrink below the minimum size; items whose cell would extend past the
/// bottom of the area are omitted.
#[derive(Debug, Clone, Copy)]
pub struct GridLayout {
    pub area: Rect,
    pub columns: usize,
    pub row_height: f64,
    pub gap: f64,
    pub min_cell_width: f64,
    pub min_cell_height: f64,
}

impl GridLayout {
    #[must_use]
    pub fn new(area: Rect, columns: usize, row_height: f64) -> Self {
        Self {
            area,
            columns: columns.max(1),
            row_height,
            gap: 12.0,
            min_cell_width: 80.0,
            min_cell_height: 60.0,
        }
    }

    #[must_use]
    pub fn with_gap(mut self, gap: f64) -> Self {
        self.gap = gap.max(0.0);
        self
    }

    #[must_use]
    pub fn with_min_cell(mut self, width: f64, height: f64) -> Self {
        self.min_cell_width = width;
        self.min_cell_height = height;
        self
    }

    #[allow(clippy::cast_precision_loss)]
    fn cell_size(&self) -> (f64, f64) {
        let cols = self.columns.max(1) as f64;
        let w = (self.area.w - self.gap * (cols - 1.0)) / cols;
        (w.max(self.min_cell_width), self.row_height.max(self.min_cell_height))
    }

    /// `(item index, cell)` pairs for up to `count` items, in item order.
    ///
    /// Omitted items leave a gap in the indices; the remaining items keep
    /// their row and column.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn place(&self, count: usize) -> Vec<(usize, Rect)> {
        let columns = self.columns.max(1);
        let (w, h) = self.cell_size();
        let mut cells = Vec::with_capacity(count);
        for i in 0..count {
            let row = (i / columns) as f64;
            let col = (i % columns) as f64;
            let cell = Rect::new(
                self.area.x + col * (w + self.gap),
                self.area.y + row * (h + self.gap),
                w,
                h,
            );
            if cell.bottom() > self.area.bottom() + f64::EPSILON
                || cell.right() > self.area.right() + f64::EPSILON
            {
                continue;
            }
            cells.push((i, cell));
        }
        cells
    }
}
