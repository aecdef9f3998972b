//! Aspect ratio resolution.
//!
//! A ratio is read from the item's cache attribute when present, otherwise
//! measured from its rendered box. Measuring only works before the item has
//! been absolutely positioned or hidden, which is why the writer caches the
//! resolved value after every pass.

use crate::surface::{RATIO_ATTRIBUTE, Surface};

/// Ratio used for items whose dimensions cannot be measured.
pub const FALLBACK_RATIO: f32 = 1.0;

/// An item paired with the ratio it is packed with for one pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatioItem<I> {
    pub item: I,
    /// Width over height; always finite and positive.
    pub ratio: f32,
}

impl<I> RatioItem<I> {
    /// Pair an item with a ratio, replacing unusable ratios with the fallback.
    pub fn new(item: I, ratio: f32) -> Self {
        Self {
            item,
            ratio: usable_ratio(ratio).unwrap_or(FALLBACK_RATIO),
        }
    }
}

#[inline]
fn usable_ratio(ratio: f32) -> Option<f32> {
    (ratio.is_finite() && ratio > 0.0).then_some(ratio)
}

/// Parse a cached ratio attribute. Garbage and degenerate values yield `None`.
pub fn parse_cached_ratio(value: &str) -> Option<f32> {
    value.trim().parse::<f32>().ok().and_then(usable_ratio)
}

/// Format a ratio for the cache attribute. Round-trips exactly through
/// [`parse_cached_ratio`].
pub fn format_ratio(ratio: f32) -> String {
    ratio.to_string()
}

/// Resolve one item's ratio: cache attribute, then measurement, then fallback.
pub fn resolve_ratio<S: Surface>(surface: &S, item: S::Item) -> f32 {
    if let Some(cached) = surface
        .attribute(item, RATIO_ATTRIBUTE)
        .as_deref()
        .and_then(parse_cached_ratio)
    {
        return cached;
    }

    match surface.measure(item).aspect_ratio() {
        Some(ratio) => ratio,
        None => {
            tracing::debug!(?item, "unmeasurable item, using fallback ratio");
            FALLBACK_RATIO
        }
    }
}

/// Resolve every current item of the surface, in order.
pub fn collect_items<S: Surface>(surface: &S) -> Vec<RatioItem<S::Item>> {
    surface
        .items()
        .into_iter()
        .map(|item| RatioItem::new(item, resolve_ratio(surface, item)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::HeadlessSurface;
    use crate::primitives::Size;

    #[test]
    fn parse_rejects_degenerate_values() {
        assert_eq!(parse_cached_ratio("1.5"), Some(1.5));
        assert_eq!(parse_cached_ratio(" 0.75 "), Some(0.75));
        assert_eq!(parse_cached_ratio("0"), None);
        assert_eq!(parse_cached_ratio("-2"), None);
        assert_eq!(parse_cached_ratio("NaN"), None);
        assert_eq!(parse_cached_ratio("inf"), None);
        assert_eq!(parse_cached_ratio("wide"), None);
        assert_eq!(parse_cached_ratio(""), None);
    }

    #[test]
    fn format_round_trips() {
        for ratio in [1.0f32, 1.5, 0.8, 1.0 / 3.0, 16.0 / 9.0] {
            assert_eq!(parse_cached_ratio(&format_ratio(ratio)), Some(ratio));
        }
    }

    #[test]
    fn ratio_item_sanitizes() {
        assert_eq!(RatioItem::new(0, 2.0).ratio, 2.0);
        assert_eq!(RatioItem::new(0, 0.0).ratio, FALLBACK_RATIO);
        assert_eq!(RatioItem::new(0, f32::INFINITY).ratio, FALLBACK_RATIO);
        assert_eq!(RatioItem::new(0, f32::NAN).ratio, FALLBACK_RATIO);
    }

    #[test]
    fn cache_attribute_wins_over_measurement() {
        let mut surface = HeadlessSurface::new(900.0, 600.0);
        let item = surface.push_item(Size::new(300.0, 100.0));
        assert_eq!(resolve_ratio(&surface, item), 3.0);

        surface.set_attribute(item, RATIO_ATTRIBUTE, "0.5".to_string());
        assert_eq!(resolve_ratio(&surface, item), 0.5);
    }

    #[test]
    fn bad_cache_falls_back_to_measurement() {
        let mut surface = HeadlessSurface::new(900.0, 600.0);
        let item = surface.push_item(Size::new(200.0, 100.0));
        surface.set_attribute(item, RATIO_ATTRIBUTE, "not-a-number".to_string());
        assert_eq!(resolve_ratio(&surface, item), 2.0);
    }

    #[test]
    fn zero_height_uses_fallback() {
        let mut surface = HeadlessSurface::new(900.0, 600.0);
        let item = surface.push_item(Size::new(200.0, 0.0));
        assert_eq!(resolve_ratio(&surface, item), FALLBACK_RATIO);
    }

    #[test]
    fn collect_preserves_order() {
        let mut surface = HeadlessSurface::new(900.0, 600.0);
        let a = surface.push_item(Size::new(100.0, 100.0));
        let b = surface.push_item(Size::new(150.0, 100.0));
        let c = surface.push_item(Size::new(80.0, 100.0));

        let items = collect_items(&surface);
        let handles: Vec<_> = items.iter().map(|i| i.item).collect();
        assert_eq!(handles, vec![a, b, c]);
        assert_eq!(items[1].ratio, 1.5);
    }
}
