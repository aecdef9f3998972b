//! Justified (row) packing.
//!
//! Items flow into rows in order. Each insertion recomputes the height at
//! which the row's items would exactly span the container width:
//!
//! ```text
//! height = (width - gap * (n - 1)) / ratio_sum
//! ```
//!
//! Adding items lowers that height. A row stays open while its height is
//! above the maximum row height; once it drops to or below the cap the row
//! is closed and the next item opens a new one. Rendered rows are clamped to
//! the cap, so a short trailing row keeps the cap height instead of blowing
//! up to fill the width.

use crate::config::{LayoutConfig, LayoutMode};
use crate::primitives::Rect;

use super::arrangement::{Arrangement, Placement};
use super::ratio::RatioItem;

/// One row of a justified layout.
#[derive(Debug, Clone, PartialEq)]
pub struct Row<I> {
    pub items: Vec<RatioItem<I>>,
    pub ratio_sum: f32,
    /// Natural height: the height at which the items span the full width.
    pub height: f32,
}

impl<I> Row<I> {
    fn new() -> Self {
        Self {
            items: Vec::new(),
            ratio_sum: 0.0,
            height: 0.0,
        }
    }

    fn push(&mut self, item: RatioItem<I>, width: f32, gap: f32) {
        self.ratio_sum += item.ratio;
        self.items.push(item);
        let gaps = gap * (self.items.len() - 1) as f32;
        self.height = (width - gaps) / self.ratio_sum;
    }

    /// A closed row accepts no more items.
    #[inline]
    pub fn is_closed(&self, max_row_height: f32) -> bool {
        self.height <= max_row_height
    }

    /// Height the row is rendered at.
    #[inline]
    pub fn clamped_height(&self, max_row_height: f32) -> f32 {
        self.height.min(max_row_height).max(0.0)
    }
}

/// Group items into rows.
///
/// Returns no rows when the width is unusable, so nothing downstream ever
/// divides by zero or applies NaN.
pub fn pack_rows<I: Copy>(items: &[RatioItem<I>], width: f32, config: &LayoutConfig) -> Vec<Row<I>> {
    if !(width.is_finite() && width > 0.0) {
        if !items.is_empty() {
            tracing::warn!(width, "container width unusable, skipping justified pack");
        }
        return Vec::new();
    }

    let mut rows: Vec<Row<I>> = Vec::new();
    for &item in items {
        let needs_row = rows
            .last()
            .is_none_or(|row| row.is_closed(config.max_row_height));
        if needs_row {
            rows.push(Row::new());
        }
        if let Some(row) = rows.last_mut() {
            row.push(item, width, config.gap);
        }
    }

    tracing::trace!(items = items.len(), rows = rows.len(), "packed rows");
    rows
}

/// Turn rows into absolute placements.
pub fn place_rows<I: Copy + PartialEq>(rows: &[Row<I>], config: &LayoutConfig) -> Arrangement<I> {
    let mut arrangement = Arrangement::empty(LayoutMode::Justified);
    let gap = config.gap;

    let mut y = 0.0f32;
    for (index, row) in rows.iter().enumerate() {
        let height = row.clamped_height(config.max_row_height);
        let mut x = 0.0f32;
        for item in &row.items {
            let item_width = item.ratio * height;
            arrangement.placements.push(Placement {
                item: item.item,
                ratio: item.ratio,
                rect: Rect::new(x, y, item_width, height),
                group: index,
            });
            x += item_width + gap;
        }
        y += height;
        if index + 1 < rows.len() {
            y += gap;
        }
    }

    arrangement.groups = rows.len();
    arrangement.content_height = y;
    arrangement
}

/// Pack and place in one step.
pub fn arrange_justified<I: Copy + PartialEq>(
    items: &[RatioItem<I>],
    width: f32,
    config: &LayoutConfig,
) -> Arrangement<I> {
    place_rows(&pack_rows(items, width, config), config)
}
