//! Visibility culling.
//!
//! Items far outside the scroll viewport are hidden. With `t` the threshold
//! and `vh` the viewport height, an item stays shown while its box overlaps
//! the band `[-t, vh + t]`. Culling only toggles visibility; positions and
//! sizes are left exactly as the last layout pass wrote them.

use serde::Serialize;

use crate::primitives::Rect;
use crate::surface::Surface;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Shown,
    Hidden,
}

impl Visibility {
    pub fn is_shown(self) -> bool {
        matches!(self, Visibility::Shown)
    }
}

/// Counts from one culling pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CullReport {
    pub shown: usize,
    pub hidden: usize,
}

/// Decide the visibility of a viewport-relative box.
#[inline]
pub fn visibility(bounds: Rect, viewport_height: f32, threshold: f32) -> Visibility {
    if bounds.bottom() < -threshold || bounds.top() > viewport_height + threshold {
        Visibility::Hidden
    } else {
        Visibility::Shown
    }
}

/// Show or hide every item of the surface.
pub fn cull<S: Surface>(surface: &mut S, threshold: f32) -> CullReport {
    let viewport_height = surface.viewport_height();
    let mut report = CullReport::default();

    for item in surface.items() {
        let bounds = surface.bounding_box(item);
        let visible = visibility(bounds, viewport_height, threshold).is_shown();
        surface.set_visible(item, visible);
        if visible {
            report.shown += 1;
        } else {
            report.hidden += 1;
        }
    }

    tracing::trace!(shown = report.shown, hidden = report.hidden, threshold, "culled");
    report
}
