//! In-memory surface.
//!
//! Models a layout container inside a scrolled document without a real
//! rendering backend: natural item sizes, attributes, applied absolute
//! geometry and visibility. Used by the tests and the command-line tool.
//!
//! Measurement follows what a browser reports:
//! - a hidden item measures as zero,
//! - a placed item measures as its placed size,
//! - anything else measures as its natural size.
//!
//! Bounding boxes always reflect the last placement, hidden or not, so the
//! culler can bring items back into view.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::config::LayoutConfig;
use crate::error::LayoutError;
use crate::primitives::{Point, Rect, Size};
use crate::surface::Surface;

/// Handle to an item of a [`HeadlessSurface`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(pub u32);

#[derive(Debug, Clone)]
struct HeadlessItem {
    id: ItemId,
    natural: Size,
    attributes: HashMap<String, String>,
    placed: Option<Rect>,
    visible: bool,
}

/// A container with its items, sitting in a scrollable document.
#[derive(Debug, Clone)]
pub struct HeadlessSurface {
    items: Vec<HeadlessItem>,
    next_id: u32,
    width: f32,
    container_height: f32,
    viewport_height: f32,
    /// Document offset of the container's top edge.
    container_top: f32,
    scroll_offset: f32,
    attached: bool,
    place_calls: usize,
}

impl HeadlessSurface {
    /// An attached, empty container of the given width in a viewport of the
    /// given height, scrolled to the top.
    pub fn new(width: f32, viewport_height: f32) -> Self {
        Self {
            items: Vec::new(),
            next_id: 0,
            width,
            container_height: 0.0,
            viewport_height,
            container_top: 0.0,
            scroll_offset: 0.0,
            attached: true,
            place_calls: 0,
        }
    }

    /// Append an item with the given natural size.
    pub fn push_item(&mut self, natural: Size) -> ItemId {
        let id = ItemId(self.next_id);
        self.next_id += 1;
        self.items.push(HeadlessItem {
            id,
            natural,
            attributes: HashMap::new(),
            placed: None,
            visible: true,
        });
        id
    }

    /// Insert an item before position `index` (clamped to the end).
    pub fn insert_item(&mut self, index: usize, natural: Size) -> ItemId {
        let id = self.push_item(natural);
        if let Some(item) = self.items.pop() {
            let index = index.min(self.items.len());
            self.items.insert(index, item);
        }
        id
    }

    /// Remove an item. Returns false if it was not a child.
    pub fn remove_item(&mut self, id: ItemId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        self.items.len() != before
    }

    pub fn set_width(&mut self, width: f32) {
        self.width = width;
    }

    pub fn set_viewport_height(&mut self, height: f32) {
        self.viewport_height = height;
    }

    pub fn set_container_top(&mut self, top: f32) {
        self.container_top = top;
    }

    pub fn set_scroll_offset(&mut self, offset: f32) {
        self.scroll_offset = offset;
    }

    pub fn scroll_offset(&self) -> f32 {
        self.scroll_offset
    }

    pub fn set_attached(&mut self, attached: bool) {
        self.attached = attached;
    }

    /// Height last written by the layout.
    pub fn container_height(&self) -> f32 {
        self.container_height
    }

    /// Last applied geometry of an item, relative to the container.
    pub fn placement(&self, id: ItemId) -> Option<Rect> {
        self.find(id).and_then(|item| item.placed)
    }

    pub fn is_visible(&self, id: ItemId) -> bool {
        self.find(id).is_some_and(|item| item.visible)
    }

    /// Number of `place` calls since creation.
    pub fn place_calls(&self) -> usize {
        self.place_calls
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn find(&self, id: ItemId) -> Option<&HeadlessItem> {
        self.items.iter().find(|item| item.id == id)
    }

    fn find_mut(&mut self, id: ItemId) -> Option<&mut HeadlessItem> {
        self.items.iter_mut().find(|item| item.id == id)
    }

    /// Offset that converts container coordinates to viewport coordinates.
    fn viewport_offset(&self) -> Point {
        Point::new(0.0, self.container_top - self.scroll_offset)
    }
}

impl Surface for HeadlessSurface {
    type Item = ItemId;

    fn is_attached(&self) -> bool {
        self.attached
    }

    fn container_width(&self) -> f32 {
        self.width
    }

    fn items(&self) -> Vec<ItemId> {
        self.items.iter().map(|item| item.id).collect()
    }

    fn attribute(&self, item: ItemId, name: &str) -> Option<String> {
        self.find(item).and_then(|i| i.attributes.get(name).cloned())
    }

    fn set_attribute(&mut self, item: ItemId, name: &str, value: String) {
        if let Some(i) = self.find_mut(item) {
            i.attributes.insert(name.to_string(), value);
        }
    }

    fn measure(&self, item: ItemId) -> Size {
        match self.find(item) {
            Some(i) if !i.visible => Size::ZERO,
            Some(i) => i.placed.map_or(i.natural, |rect| rect.size()),
            None => Size::ZERO,
        }
    }

    fn bounding_box(&self, item: ItemId) -> Rect {
        let offset = self.viewport_offset();
        match self.find(item) {
            Some(i) => i
                .placed
                .unwrap_or_else(|| Rect::from_origin_size(Point::ORIGIN, i.natural))
                .translate(offset),
            None => Rect::ZERO,
        }
    }

    fn place(&mut self, item: ItemId, rect: Rect) {
        self.place_calls += 1;
        if let Some(i) = self.find_mut(item) {
            i.placed = Some(rect);
        }
    }

    fn set_container_height(&mut self, height: f32) {
        self.container_height = height;
    }

    fn set_visible(&mut self, item: ItemId, visible: bool) {
        if let Some(i) = self.find_mut(item) {
            i.visible = visible;
        }
    }

    fn viewport_height(&self) -> f32 {
        self.viewport_height
    }
}

/// A serializable description of a container, its viewport and its items.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scene {
    /// Container inner width.
    pub width: f32,
    pub viewport_height: f32,
    #[serde(default)]
    pub container_top: f32,
    #[serde(default)]
    pub scroll_offset: f32,
    /// Natural item sizes, in document order.
    pub items: Vec<Size>,
    #[serde(default)]
    pub config: LayoutConfig,
}

impl Scene {
    /// Parse a scene from JSON and validate its configuration.
    pub fn from_json(json: &str) -> Result<Self, LayoutError> {
        let scene: Scene = serde_json::from_str(json)?;
        scene.config.validate()?;
        Ok(scene)
    }

    /// Build a surface holding this scene's items.
    pub fn surface(&self) -> HeadlessSurface {
        let mut surface = HeadlessSurface::new(self.width, self.viewport_height);
        surface.set_container_top(self.container_top);
        surface.set_scroll_offset(self.scroll_offset);
        for &size in &self.items {
            surface.push_item(size);
        }
        surface
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutMode;

    #[test]
    fn measurement_follows_state() {
        let mut surface = HeadlessSurface::new(500.0, 500.0);
        let id = surface.push_item(Size::new(300.0, 200.0));
        assert_eq!(surface.measure(id), Size::new(300.0, 200.0));

        surface.place(id, Rect::new(0.0, 0.0, 150.0, 100.0));
        assert_eq!(surface.measure(id), Size::new(150.0, 100.0));

        surface.set_visible(id, false);
        assert_eq!(surface.measure(id), Size::ZERO);
        assert_eq!(surface.placement(id), Some(Rect::new(0.0, 0.0, 150.0, 100.0)));
    }

    #[test]
    fn bounding_box_is_viewport_relative() {
        let mut surface = HeadlessSurface::new(500.0, 500.0);
        let id = surface.push_item(Size::new(300.0, 200.0));
        surface.place(id, Rect::new(10.0, 400.0, 100.0, 100.0));
        surface.set_container_top(50.0);
        surface.set_scroll_offset(300.0);
        assert_eq!(surface.bounding_box(id), Rect::new(10.0, 150.0, 100.0, 100.0));
    }

    #[test]
    fn insert_and_remove_keep_order() {
        let mut surface = HeadlessSurface::new(500.0, 500.0);
        let a = surface.push_item(Size::new(1.0, 1.0));
        let b = surface.push_item(Size::new(1.0, 1.0));
        let c = surface.insert_item(1, Size::new(1.0, 1.0));
        assert_eq!(surface.items(), vec![a, c, b]);

        assert!(surface.remove_item(c));
        assert!(!surface.remove_item(c));
        assert_eq!(surface.items(), vec![a, b]);
    }

    #[test]
    fn scene_from_json() {
        let json = r#"{
            "width": 900,
            "viewport_height": 600,
            "scroll_offset": 120,
            "items": [{"width": 400, "height": 300}, {"width": 200, "height": 200}],
            "config": {"mode": "waterfall", "columns": 2, "gap": 4}
        }"#;
        let scene = Scene::from_json(json).unwrap();
        assert_eq!(scene.config.mode, LayoutMode::Waterfall);
        assert_eq!(scene.container_top, 0.0);

        let surface = scene.surface();
        assert_eq!(surface.len(), 2);
        assert_eq!(surface.scroll_offset(), 120.0);
    }

    #[test]
    fn scene_rejects_invalid_config() {
        let json = r#"{"width": 900, "viewport_height": 600, "items": [], "config": {"columns": 0}}"#;
        assert!(matches!(Scene::from_json(json), Err(LayoutError::InvalidColumns(0))));

        assert!(matches!(Scene::from_json("{"), Err(LayoutError::Scene(_))));
    }
}
