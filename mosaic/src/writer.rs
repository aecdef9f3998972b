//! Position writer.
//!
//! Applies an [`Arrangement`] to the surface: absolute geometry per item,
//! the ratio cache attribute, and the container height.

use crate::layout::{Arrangement, format_ratio};
use crate::surface::{RATIO_ATTRIBUTE, Surface};

/// Apply every placement and the container height. Returns the number of
/// items written.
pub fn write_arrangement<S: Surface>(surface: &mut S, arrangement: &Arrangement<S::Item>) -> usize {
    let mut written = 0;
    for placement in &arrangement.placements {
        if !placement.rect.is_finite() {
            tracing::warn!(item = ?placement.item, rect = ?placement.rect, "non-finite placement dropped");
            continue;
        }
        surface.place(placement.item, placement.rect);
        surface.set_attribute(placement.item, RATIO_ATTRIBUTE, format_ratio(placement.ratio));
        tracing::trace!(item = ?placement.item, rect = ?placement.rect, "placed");
        written += 1;
    }

    let height = arrangement.content_height;
    surface.set_container_height(if height.is_finite() { height.max(0.0) } else { 0.0 });
    written
}
