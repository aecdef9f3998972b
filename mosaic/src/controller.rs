//! Layout controller.
//!
//! Owns the surface and the live configuration, and decides when packing
//! and culling run:
//!
//! | Trigger                  | Pack | Cull | `Resized` event |
//! |--------------------------|------|------|-----------------|
//! | `render()`               | yes  | yes  | yes             |
//! | `on_items_changed()`     | yes  | yes  | yes             |
//! | `on_resize()` new width  | yes  | yes  | yes             |
//! | `on_resize()` same width | no   | no   | no              |
//! | `on_scroll()` from root  | no   | yes  | no              |
//!
//! Every trigger is a no-op while the container is detached.
//!
//! Hosts wire their platform's resize observer and scroll listener to the
//! `on_*` handlers. Nothing here debounces: one call per raw event is fine.

use std::cell::Cell;
use std::rc::Rc;

use serde::Serialize;
use tokio::sync::broadcast;

use crate::config::{self, LayoutConfig, LayoutMode, ScrollRoot};
use crate::culler::{self, CullReport};
use crate::error::LayoutError;
use crate::layout::{self, collect_items};
use crate::primitives::Size;
use crate::surface::Surface;
use crate::writer::write_arrangement;

/// Widths closer than this are treated as unchanged by `on_resize`.
const WIDTH_EPSILON: f32 = 0.5;

/// Upper bound on back-to-back passes when requests keep arriving mid-pass.
const MAX_PASSES: usize = 4;

/// Capacity of the notification channel.
const EVENT_CAPACITY: usize = 64;

/// Summary of one structural layout pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutReport {
    pub mode: LayoutMode,
    /// Container width the pass packed against.
    pub width: f32,
    /// Height written to the container.
    pub content_height: f32,
    /// Rows (justified) or columns (waterfall).
    pub groups: usize,
    /// Items the surface enumerated.
    pub items: usize,
    /// Items that received geometry.
    pub placed: usize,
}

/// Notifications broadcast to subscribers.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutEvent {
    /// A structural pass finished and the container was resized.
    Resized(LayoutReport),
    /// A culling pass finished.
    Culled(CullReport),
}

#[derive(Debug, Default)]
struct RenderFlags {
    rendering: Cell<bool>,
    requested: Cell<bool>,
}

/// Cloneable handle for requesting a render from code that cannot borrow the
/// controller, typically a host surface whose style writes fire observers
/// synchronously.
///
/// A request made during a pass schedules exactly one follow-up pass; a
/// request made between passes is honoured by the next trigger.
#[derive(Debug, Clone)]
pub struct RenderRequester {
    flags: Rc<RenderFlags>,
}

impl RenderRequester {
    pub fn request(&self) {
        self.flags.requested.set(true);
    }

    pub fn is_pending(&self) -> bool {
        self.flags.requested.get()
    }

    pub fn is_rendering(&self) -> bool {
        self.flags.rendering.get()
    }
}

/// Drives packing, writing and culling for one container.
pub struct LayoutController<S: Surface> {
    surface: S,
    config: LayoutConfig,
    flags: Rc<RenderFlags>,
    /// Width used by the last structural pass.
    last_width: Option<f32>,
    /// Set by configuration and item-set changes; cleared by a pass.
    dirty: bool,
    last_report: Option<LayoutReport>,
    event_tx: broadcast::Sender<LayoutEvent>,
}

impl<S: Surface> LayoutController<S> {
    /// Create a controller with the default configuration.
    pub fn new(surface: S) -> Self {
        let (event_tx, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            surface,
            config: LayoutConfig::default(),
            flags: Rc::new(RenderFlags::default()),
            last_width: None,
            dirty: true,
            last_report: None,
            event_tx,
        }
    }

    /// Create a controller with a validated configuration.
    pub fn with_config(surface: S, config: LayoutConfig) -> Result<Self, LayoutError> {
        config.validate()?;
        let mut controller = Self::new(surface);
        controller.config = config;
        Ok(controller)
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access to the surface. Call [`Self::on_items_changed`] after
    /// adding or removing items.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Subscribe to layout notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<LayoutEvent> {
        self.event_tx.subscribe()
    }

    /// A handle for requesting renders from inside surface callbacks.
    pub fn requester(&self) -> RenderRequester {
        RenderRequester {
            flags: Rc::clone(&self.flags),
        }
    }

    /// Report of the most recent structural pass.
    pub fn last_report(&self) -> Option<&LayoutReport> {
        self.last_report.as_ref()
    }

    /// Whether the next `on_resize` will re-pack even at an unchanged width.
    pub fn is_dirty(&self) -> bool {
        self.dirty || self.flags.requested.get()
    }

    // =====================================================================
    // Configuration
    // =====================================================================

    pub fn mode(&self) -> LayoutMode {
        self.config.mode
    }

    pub fn set_mode(&mut self, mode: LayoutMode) {
        self.config.mode = mode;
        self.dirty = true;
    }

    pub fn gap(&self) -> f32 {
        self.config.gap
    }

    pub fn set_gap(&mut self, gap: f32) -> Result<(), LayoutError> {
        self.config.gap = config::check_gap(gap)?;
        self.dirty = true;
        Ok(())
    }

    pub fn max_row_height(&self) -> f32 {
        self.config.max_row_height
    }

    pub fn set_max_row_height(&mut self, height: f32) -> Result<(), LayoutError> {
        self.config.max_row_height = config::check_max_row_height(height)?;
        self.dirty = true;
        Ok(())
    }

    pub fn columns(&self) -> usize {
        self.config.columns
    }

    pub fn set_columns(&mut self, columns: usize) -> Result<(), LayoutError> {
        self.config.columns = config::check_columns(columns)?;
        self.dirty = true;
        Ok(())
    }

    /// The scroll root whose scroll events trigger culling.
    pub fn root(&self) -> ScrollRoot {
        self.config.effective_root()
    }

    /// Set the scroll root; `None` restores the document.
    pub fn set_root(&mut self, root: Option<ScrollRoot>) {
        self.config.root = root;
    }

    /// The culling margin in effect right now.
    pub fn threshold(&self) -> f32 {
        self.config.effective_threshold(self.surface.viewport_height())
    }

    /// Pin the culling margin; `None` follows the viewport height again.
    pub fn set_threshold(&mut self, threshold: Option<f32>) -> Result<(), LayoutError> {
        self.config.threshold = threshold.map(config::check_threshold).transpose()?;
        Ok(())
    }

    // =====================================================================
    // Triggers
    // =====================================================================

    /// Re-pack, write positions, cull and notify.
    ///
    /// Returns `None` when the container is detached.
    pub fn render(&mut self) -> Option<LayoutReport> {
        if !self.surface.is_attached() {
            tracing::debug!("container detached, skipping render");
            return None;
        }

        self.flags.rendering.set(true);
        let mut passes = 0;
        let report = loop {
            self.flags.requested.set(false);
            let report = self.layout_pass();
            passes += 1;
            if !self.flags.requested.get() {
                break report;
            }
            if passes >= MAX_PASSES {
                tracing::warn!(passes, "render requests kept arriving mid-pass, giving up");
                self.flags.requested.set(false);
                break report;
            }
            tracing::debug!(passes, "render requested during pass, running again");
        };
        self.flags.rendering.set(false);

        self.cull_pass();
        self.last_report = Some(report.clone());
        let _ = self.event_tx.send(LayoutEvent::Resized(report.clone()));
        Some(report)
    }

    /// The container's observed box changed.
    ///
    /// Only a change of the surface's inner width (or a pending invalidation)
    /// re-packs: the height changes every time the writer sets the container
    /// height, and reacting to that would loop forever. `observed` may be a
    /// border box, so it is logged but never compared.
    pub fn on_resize(&mut self, observed: Size) -> Option<LayoutReport> {
        if !self.surface.is_attached() {
            return None;
        }
        let current = self.surface.container_width();
        let width_changed = self
            .last_width
            .is_none_or(|width| (width - current).abs() > WIDTH_EPSILON);
        if !width_changed && !self.is_dirty() {
            tracing::trace!(
                observed_width = observed.width,
                observed_height = observed.height,
                width = current,
                "resize without width change ignored"
            );
            return None;
        }
        self.render()
    }

    /// Items were added, removed or reordered.
    pub fn on_items_changed(&mut self) -> Option<LayoutReport> {
        self.dirty = true;
        self.render()
    }

    /// The document or some element scrolled. Culls if `target` is the
    /// configured root; never re-packs.
    pub fn on_scroll(&mut self, target: ScrollRoot) -> Option<CullReport> {
        if target != self.config.effective_root() {
            return None;
        }
        self.cull()
    }

    /// Run the culler alone.
    pub fn cull(&mut self) -> Option<CullReport> {
        if !self.surface.is_attached() {
            return None;
        }
        Some(self.cull_pass())
    }

    // =====================================================================
    // Passes
    // =====================================================================

    fn layout_pass(&mut self) -> LayoutReport {
        let width = self.surface.container_width();
        let items = collect_items(&self.surface);
        let arrangement = layout::arrange(&items, width, &self.config);
        let placed = write_arrangement(&mut self.surface, &arrangement);

        self.last_width = Some(width);
        self.dirty = false;

        tracing::debug!(
            mode = %self.config.mode,
            width,
            items = items.len(),
            groups = arrangement.groups,
            height = arrangement.content_height,
            "layout pass"
        );

        LayoutReport {
            mode: self.config.mode,
            width,
            content_height: arrangement.content_height,
            groups: arrangement.groups,
            items: items.len(),
            placed,
        }
    }

    fn cull_pass(&mut self) -> CullReport {
        let threshold = self.threshold();
        let report = culler::cull(&mut self.surface, threshold);
        let _ = self.event_tx.send(LayoutEvent::Culled(report));
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::{HeadlessSurface, ItemId};
    use crate::primitives::Rect;
    use crate::surface::RATIO_ATTRIBUTE;

    fn gallery(ratios: &[f32]) -> (LayoutController<HeadlessSurface>, Vec<ItemId>) {
        let mut surface = HeadlessSurface::new(900.0, 600.0);
        let ids = ratios
            .iter()
            .map(|&r| surface.push_item(Size::new(100.0 * r, 100.0)))
            .collect();
        (LayoutController::new(surface), ids)
    }

    #[test]
    fn render_places_items_and_sizes_container() {
        let (mut controller, ids) = gallery(&[1.0, 1.5, 0.8]);
        let report = controller.render().unwrap();

        assert_eq!(report.mode, LayoutMode::Justified);
        assert_eq!(report.groups, 1);
        assert_eq!(report.placed, 3);
        assert_eq!(controller.surface().container_height(), 200.0);

        let second = controller.surface().placement(ids[1]).unwrap();
        assert!((second.x - 200.0).abs() < 0.01);
        assert!((second.width - 300.0).abs() < 0.01);
        assert_eq!(
            controller.surface().attribute(ids[1], RATIO_ATTRIBUTE).as_deref(),
            Some("1.5")
        );
    }

    #[test]
    fn detached_container_ignores_every_trigger() {
        let (mut controller, ids) = gallery(&[1.0, 1.0]);
        controller.surface_mut().set_attached(false);

        assert!(controller.render().is_none());
        assert!(controller.on_resize(Size::new(800.0, 0.0)).is_none());
        assert!(controller.on_items_changed().is_none());
        assert!(controller.on_scroll(ScrollRoot::Document).is_none());
        assert_eq!(controller.surface().placement(ids[0]), None);
        assert_eq!(controller.surface().place_calls(), 0);
    }

    #[test]
    fn height_only_resize_does_not_repack() {
        let (mut controller, _) = gallery(&[1.0, 2.0, 0.5]);
        assert!(controller.on_resize(Size::new(900.0, 0.0)).is_some());
        let calls = controller.surface().place_calls();

        // The writer's own height change comes back as an observed resize.
        let height = controller.surface().container_height();
        assert!(controller.on_resize(Size::new(900.0, height)).is_none());
        assert_eq!(controller.surface().place_calls(), calls);

        controller.surface_mut().set_width(600.0);
        let report = controller.on_resize(Size::new(600.0, height)).unwrap();
        assert_eq!(report.width, 600.0);
    }

    #[test]
    fn resize_compares_surface_width_not_observed_box() {
        let (mut controller, _) = gallery(&[1.0, 2.0, 0.5]);
        controller.render().unwrap();
        let calls = controller.surface().place_calls();

        // A border box 20px wider than the 900px content width.
        assert!(controller.on_resize(Size::new(920.0, 300.0)).is_none());
        assert_eq!(controller.surface().place_calls(), calls);

        controller.surface_mut().set_width(600.0);
        let report = controller.on_resize(Size::new(620.0, 300.0)).unwrap();
        assert_eq!(report.width, 600.0);
        assert!(controller.surface().place_calls() > calls);
    }

    #[test]
    fn settings_apply_on_next_trigger_only() {
        let (mut controller, ids) = gallery(&[1.0; 4]);
        controller.render();
        let before = controller.surface().placement(ids[1]);

        controller.set_mode(LayoutMode::Waterfall);
        controller.set_columns(2).unwrap();
        assert_eq!(controller.surface().placement(ids[1]), before);
        assert!(controller.is_dirty());

        // Same width, but the layout is dirty.
        let report = controller.on_resize(Size::new(900.0, 0.0)).unwrap();
        assert_eq!(report.mode, LayoutMode::Waterfall);
        assert_eq!(
            controller.surface().placement(ids[1]),
            Some(Rect::new(450.0, 0.0, 450.0, 450.0))
        );
        assert!(!controller.is_dirty());
    }

    #[test]
    fn setters_validate() {
        let (mut controller, _) = gallery(&[]);
        assert!(matches!(controller.set_gap(-2.0), Err(LayoutError::InvalidGap(_))));
        assert!(matches!(controller.set_columns(0), Err(LayoutError::InvalidColumns(0))));
        assert!(matches!(
            controller.set_max_row_height(f32::NAN),
            Err(LayoutError::InvalidMaxRowHeight(_))
        ));
        assert!(matches!(
            controller.set_threshold(Some(-1.0)),
            Err(LayoutError::InvalidThreshold(_))
        ));
        assert_eq!(controller.gap(), 0.0);
        assert_eq!(controller.columns(), 1);
        assert_eq!(controller.max_row_height(), 200.0);

        controller.set_gap(8.0).unwrap();
        controller.set_max_row_height(240.0).unwrap();
        assert_eq!(controller.gap(), 8.0);
        assert_eq!(controller.max_row_height(), 240.0);
    }

    #[test]
    fn threshold_tracks_viewport_until_pinned() {
        let (mut controller, _) = gallery(&[]);
        assert_eq!(controller.threshold(), 300.0);

        controller.surface_mut().set_viewport_height(1000.0);
        assert_eq!(controller.threshold(), 500.0);

        controller.set_threshold(Some(40.0)).unwrap();
        assert_eq!(controller.threshold(), 40.0);

        controller.set_threshold(None).unwrap();
        assert_eq!(controller.threshold(), 500.0);
    }

    #[test]
    fn scroll_from_other_root_is_ignored() {
        let (mut controller, _) = gallery(&[1.0]);
        controller.render();
        controller.set_root(Some(ScrollRoot::Element(3)));

        assert_eq!(controller.root(), ScrollRoot::Element(3));
        assert!(controller.on_scroll(ScrollRoot::Document).is_none());
        assert!(controller.on_scroll(ScrollRoot::Element(3)).is_some());

        controller.set_root(None);
        assert_eq!(controller.root(), ScrollRoot::Document);
    }

    #[test]
    fn render_broadcasts_culled_then_resized() {
        let (mut controller, _) = gallery(&[1.0, 1.0]);
        let mut rx = controller.subscribe();
        let report = controller.render().unwrap();

        assert!(matches!(rx.try_recv(), Ok(LayoutEvent::Culled(_))));
        assert_eq!(rx.try_recv().ok(), Some(LayoutEvent::Resized(report)));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn request_between_passes_forces_next_resize() {
        let (mut controller, _) = gallery(&[1.0, 1.0]);
        controller.render();
        let requester = controller.requester();

        assert!(controller.on_resize(Size::new(900.0, 200.0)).is_none());
        requester.request();
        assert!(requester.is_pending());
        assert!(controller.on_resize(Size::new(900.0, 200.0)).is_some());
        assert!(!requester.is_pending());
        assert!(!requester.is_rendering());
    }
}
