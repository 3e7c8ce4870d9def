//! Grid geometry: converts cell rects to pixels and keeps rects on the grid.
//!
//! Column width is whatever is left of the total width after the margins,
//! split evenly. The container padding equals the margin, so the first
//! column starts one margin in from the left edge.

use board_api::GridRect;

use crate::config::schema::GridConfig;

/// A rect in pixels, relative to the grid container's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    /// Distance from the left edge.
    pub left: i64,
    /// Distance from the top edge.
    pub top: i64,
    /// Width in pixels.
    pub width: i64,
    /// Height in pixels.
    pub height: i64,
}

/// Grid parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSpec {
    /// Number of columns.
    pub cols: u32,
    /// Row height in pixels.
    pub row_height: u32,
    /// Total width in pixels.
    pub width: u32,
    /// Gap between cells, `[horizontal, vertical]`.
    pub margin: [u32; 2],
}

impl Default for GridSpec {
    fn default() -> Self {
        Self::from(&GridConfig::default())
    }
}

impl From<&GridConfig> for GridSpec {
    fn from(config: &GridConfig) -> Self {
        Self {
            cols: config.cols.max(1),
            row_height: config.row_height,
            width: config.width,
            margin: config.margin,
        }
    }
}

impl GridSpec {
    /// Width of one column in pixels.
    pub fn column_width(&self) -> f64 {
        let cols = f64::from(self.columns());
        let margins = f64::from(self.margin[0]) * (cols + 1.0);
        (f64::from(self.width) - margins) / cols
    }

    /// Column count, never below one.
    fn columns(&self) -> u32 {
        self.cols.max(1)
    }

    /// Pixel position and size of `rect`.
    pub fn pixel_rect(&self, rect: GridRect) -> PixelRect {
        let col_w = self.column_width();
        let [mx, my] = self.margin.map(f64::from);
        let row_h = f64::from(self.row_height);
        let (x, y, w, h) = (
            f64::from(rect.x),
            f64::from(rect.y),
            f64::from(rect.w),
            f64::from(rect.h),
        );

        PixelRect {
            left: ((col_w + mx) * x + mx).round() as i64,
            top: ((row_h + my) * y + my).round() as i64,
            width: (col_w * w + (w - 1.0).max(0.0) * mx).round() as i64,
            height: (row_h * h + (h - 1.0).max(0.0) * my).round() as i64,
        }
    }

    /// Clamp `rect` so it is at least one cell and fits within the columns.
    ///
    /// Width is capped at the column count and `x` is pulled left until the
    /// right edge is on the grid. Rows are unbounded.
    pub fn fit(&self, rect: GridRect) -> GridRect {
        let cols = self.columns();
        let w = rect.w.clamp(1, cols);
        let h = rect.h.max(1);
        let x = rect.x.min(cols - w);
        GridRect::new(x, rect.y, w, h)
    }
}
