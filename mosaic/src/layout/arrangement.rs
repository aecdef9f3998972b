//! Placed packer output.

use crate::config::LayoutMode;
use crate::primitives::Rect;

/// Final geometry for one item, relative to the container's top-left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement<I> {
    pub item: I,
    /// The ratio the item was packed with (written back to the cache).
    pub ratio: f32,
    pub rect: Rect,
    /// Row index (justified) or column index (waterfall).
    pub group: usize,
}

/// The result of one packing pass: every item placed exactly once.
#[derive(Debug, Clone, PartialEq)]
pub struct Arrangement<I> {
    pub mode: LayoutMode,
    /// Placements in group order, then in order within the group.
    pub placements: Vec<Placement<I>>,
    /// Number of rows or columns.
    pub groups: usize,
    /// Height the container must be given to contain every placement.
    pub content_height: f32,
}

impl<I: Copy + PartialEq> Arrangement<I> {
    /// An arrangement with nothing placed.
    pub fn empty(mode: LayoutMode) -> Self {
        Self {
            mode,
            placements: Vec::new(),
            groups: 0,
            content_height: 0.0,
        }
    }

    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// Look up the placement of a specific item.
    pub fn get(&self, item: I) -> Option<&Placement<I>> {
        self.placements.iter().find(|p| p.item == item)
    }

    /// Placements belonging to one row or column.
    pub fn group(&self, index: usize) -> impl Iterator<Item = &Placement<I>> {
        self.placements.iter().filter(move |p| p.group == index)
    }
}
