//! The host rendering surface.
//!
//! Mosaic never touches a real element tree. Hosts implement [`Surface`]
//! for their container (a DOM node, a retained widget, a test double) and
//! wire their resize/scroll events to the controller's handlers.

use std::fmt::Debug;
use std::hash::Hash;

use crate::primitives::{Rect, Size};

/// Attribute holding the resolved aspect ratio of an item between passes.
pub const RATIO_ATTRIBUTE: &str = "layout-item-ratio";

/// A layout container and its child items.
pub trait Surface {
    /// Handle to one child item. Must stay valid while the item is a child.
    type Item: Copy + Eq + Hash + Debug;

    /// Whether the container is attached to the visible document tree.
    /// Detached containers have meaningless measurements.
    fn is_attached(&self) -> bool;

    /// Current inner width of the container.
    fn container_width(&self) -> f32;

    /// Current child items, in stable document order.
    fn items(&self) -> Vec<Self::Item>;

    /// Read a string attribute from an item.
    fn attribute(&self, item: Self::Item, name: &str) -> Option<String>;

    /// Write a string attribute on an item.
    fn set_attribute(&mut self, item: Self::Item, name: &str, value: String);

    /// Current rendered size of an item.
    fn measure(&self, item: Self::Item) -> Size;

    /// Bounding box of an item relative to the viewport.
    fn bounding_box(&self, item: Self::Item) -> Rect;

    /// Position an item absolutely inside the container.
    fn place(&mut self, item: Self::Item, rect: Rect);

    /// Set the explicit container height.
    fn set_container_height(&mut self, height: f32);

    /// Show or hide an item without touching its position or size.
    fn set_visible(&mut self, item: Self::Item, visible: bool);

    /// Height of the viewport the scroll root presents.
    fn viewport_height(&self) -> f32;
}
