//! Waterfall (masonry) packing.
//!
//! A fixed number of equal-width columns. Columns are opened lazily, one
//! per item, until the configured count exists; from then on every item is
//! appended to the currently shortest column (lowest index on ties). This
//! greedy balance keeps the height spread bounded by the tallest single
//! item, whatever the item count.

use crate::config::{LayoutConfig, LayoutMode};
use crate::primitives::Rect;

use super::arrangement::{Arrangement, Placement};
use super::ratio::RatioItem;

/// One column of a waterfall layout.
#[derive(Debug, Clone, PartialEq)]
pub struct Column<I> {
    pub items: Vec<RatioItem<I>>,
    /// Bottom edge of the last item, relative to the column top.
    pub height: f32,
}

impl<I> Column<I> {
    fn new() -> Self {
        Self {
            items: Vec::new(),
            height: 0.0,
        }
    }

    fn push(&mut self, item: RatioItem<I>, column_width: f32, gap: f32) {
        if !self.items.is_empty() {
            self.height += gap;
        }
        self.height += column_width / item.ratio;
        self.items.push(item);
    }
}

/// Width of each column, or `None` when the container cannot fit the
/// columns and their gaps.
pub fn column_width(width: f32, config: &LayoutConfig) -> Option<f32> {
    let columns = config.columns.max(1) as f32;
    let column_width = (width - config.gap * (columns - 1.0)) / columns;
    (column_width.is_finite() && column_width > 0.0).then_some(column_width)
}

/// Index of the shortest column; the first one wins ties.
fn shortest_column<I>(columns: &[Column<I>]) -> usize {
    columns
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| a.height.total_cmp(&b.height))
        .map_or(0, |(index, _)| index)
}

/// Distribute items across columns.
///
/// Returns no columns when the column width is unusable.
pub fn pack_columns<I: Copy>(
    items: &[RatioItem<I>],
    width: f32,
    config: &LayoutConfig,
) -> Vec<Column<I>> {
    let Some(column_width) = column_width(width, config) else {
        if !items.is_empty() {
            tracing::warn!(width, columns = config.columns, "column width unusable, skipping waterfall pack");
        }
        return Vec::new();
    };

    let count = config.columns.max(1);
    let mut columns: Vec<Column<I>> = Vec::with_capacity(count.min(items.len()));
    for &item in items {
        let index = if columns.len() < count {
            columns.push(Column::new());
            columns.len() - 1
        } else {
            shortest_column(&columns)
        };
        columns[index].push(item, column_width, config.gap);
    }

    tracing::trace!(items = items.len(), columns = columns.len(), "packed columns");
    columns
}

/// Turn columns into absolute placements.
pub fn place_columns<I: Copy + PartialEq>(
    columns: &[Column<I>],
    width: f32,
    config: &LayoutConfig,
) -> Arrangement<I> {
    let mut arrangement = Arrangement::empty(LayoutMode::Waterfall);
    let Some(column_width) = column_width(width, config) else {
        return arrangement;
    };
    let gap = config.gap;

    let mut x = 0.0f32;
    for (index, column) in columns.iter().enumerate() {
        let mut y = 0.0f32;
        for item in &column.items {
            let item_height = column_width / item.ratio;
            arrangement.placements.push(Placement {
                item: item.item,
                ratio: item.ratio,
                rect: Rect::new(x, y, column_width, item_height),
                group: index,
            });
            y += item_height + gap;
        }
        x += column_width + gap;
    }

    arrangement.groups = columns.len();
    arrangement.content_height = columns.iter().map(|c| c.height).fold(0.0, f32::max);
    arrangement
}

/// Pack and place in one step.
pub fn arrange_waterfall<I: Copy + PartialEq>(
    items: &[RatioItem<I>],
    width: f32,
    config: &LayoutConfig,
) -> Arrangement<I> {
    place_columns(&pack_columns(items, width, config), width, config)
}
