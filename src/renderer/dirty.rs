//! Bounding rectangle of the pixels a render pass touched.
//!
//! The next pass erases exactly this rectangle instead of clearing the
//! panel. Points are clamped to the panel before they grow the rectangle,
//! so an off-panel glyph can never widen the erase beyond the screen.

/// Inclusive pixel bounds; empty while `max < min` on either axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirtyRegion {
    panel_width: i32,
    panel_height: i32,
    min_x: i32,
    min_y: i32,
    max_x: i32,
    max_y: i32,
}

impl DirtyRegion {
    pub fn new(panel_width: i32, panel_height: i32) -> Self {
        let mut region = Self {
            panel_width: panel_width.max(1),
            panel_height: panel_height.max(1),
            min_x: 0,
            min_y: 0,
            max_x: 0,
            max_y: 0,
        };
        region.reset();
        region
    }

    /// Forget everything: the sentinel has max below min on both axes.
    pub fn reset(&mut self) {
        self.min_x = self.panel_width - 1;
        self.min_y = self.panel_height - 1;
        self.max_x = 0;
        self.max_y = 0;
        if self.panel_width == 1 || self.panel_height == 1 {
            // a one-pixel axis cannot express max < min with in-panel values
            self.max_x = -1;
            self.max_y = -1;
        }
    }

    pub fn add_point(&mut self, x: i32, y: i32) {
        let x = x.clamp(0, self.panel_width - 1);
        let y = y.clamp(0, self.panel_height - 1);
        self.min_x = self.min_x.min(x);
        self.max_x = self.max_x.max(x);
        self.min_y = self.min_y.min(y);
        self.max_y = self.max_y.max(y);
    }

    /// Grow to cover a `width` × `height` box with top-left (x, y).
    pub fn add_rect(&mut self, x: i32, y: i32, width: i32, height: i32) {
        self.add_point(x, y);
        self.add_point(x + width.max(1) - 1, y + height.max(1) - 1);
    }

    /// True once at least one point has been recorded since `reset`.
    pub fn is_valid(&self) -> bool {
        self.max_x >= self.min_x && self.max_y >= self.min_y
    }

    pub fn x(&self) -> i32 {
        self.min_x
    }

    pub fn y(&self) -> i32 {
        self.min_y
    }

    pub fn width(&self) -> i32 {
        1 + (self.max_x - self.min_x)
    }

    pub fn height(&self) -> i32 {
        1 + (self.max_y - self.min_y)
    }

    /// Whether panel row `y` lies inside the region.
    pub fn contains_row(&self, y: i32) -> bool {
        self.is_valid() && y >= self.min_y && y <= self.max_y
    }
}
