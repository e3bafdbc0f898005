use std::ops::Range;

/// Rows kept between the cursor and either edge of the window.
pub const LOOKAHEAD_ROWS: usize = 2;

/// Fixed-height window of rows over a backing collection.
///
/// The origin follows the cursor one row per tick, keeping
/// `LOOKAHEAD_ROWS` of context above and below it. Fast repeat-driven
/// cursor moves therefore scroll smoothly instead of snapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ListViewport {
    origin: usize,
    capacity: usize,
    row_size: f32,
    top_inset: f32,
}

impl ListViewport {
    /// Window for a widget `height` pixels tall with rows of `row_size`.
    /// Leftover pixels are split evenly above and below the rows.
    pub fn new(height: f32, row_size: f32) -> Self {
        let capacity = if row_size > 0.0 && height > 0.0 {
            (height / row_size).floor() as usize
        } else {
            0
        };
        Self {
            origin: 0,
            capacity,
            row_size,
            top_inset: (height - capacity as f32 * row_size).max(0.0) / 2.0,
        }
    }

    /// First visible row.
    pub fn origin(&self) -> usize {
        self.origin
    }

    /// Number of rows that fit.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn row_size(&self) -> f32 {
        self.row_size
    }

    /// Pixels between the widget top and the first row.
    pub fn top_inset(&self) -> f32 {
        self.top_inset
    }

    /// Largest origin that still fills the window.
    pub fn max_origin(&self, len: usize) -> usize {
        len.saturating_sub(self.capacity)
    }

    /// Step the window at most one row toward `selection`.
    pub fn track(&mut self, selection: usize, len: usize) {
        // Collection may have shrunk since the last tick.
        self.origin = self.origin.min(self.max_origin(len));

        if selection < self.origin + LOOKAHEAD_ROWS && self.origin > 0 {
            self.origin -= 1;
        }
        if selection + LOOKAHEAD_ROWS >= self.origin + self.capacity
            && self.origin + self.capacity < len
        {
            self.origin += 1;
        }
    }

    /// Indices currently inside the window.
    pub fn visible_range(&self, len: usize) -> Range<usize> {
        let start = self.origin.min(len);
        start..(self.origin + self.capacity).min(len)
    }
}
