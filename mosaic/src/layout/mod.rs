//! Packing algorithms.
//!
//! Both packers are pure functions of the resolved items, the container
//! width and the configuration:
//!
//! ```text
//! surface items -> ratio resolution -> pack (rows | columns) -> place -> Arrangement
//! ```
//!
//! Nothing here touches the surface except [`ratio::collect_items`]; the
//! writer applies the resulting [`Arrangement`].

pub mod arrangement;
pub mod justified;
pub mod ratio;
pub mod waterfall;

pub use arrangement::{Arrangement, Placement};
pub use justified::{Row, arrange_justified, pack_rows, place_rows};
pub use ratio::{FALLBACK_RATIO, RatioItem, collect_items, format_ratio, parse_cached_ratio, resolve_ratio};
pub use waterfall::{Column, arrange_waterfall, column_width, pack_columns, place_columns};

use crate::config::{LayoutConfig, LayoutMode};

/// Run the packer selected by `config.mode`.
pub fn arrange<I: Copy + PartialEq>(
    items: &[RatioItem<I>],
    width: f32,
    config: &LayoutConfig,
) -> Arrangement<I> {
    match config.mode {
        LayoutMode::Justified => arrange_justified(items, width, config),
        LayoutMode::Waterfall => arrange_waterfall(items, width, config),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatches_on_mode() {
        let items: Vec<_> = (0..4).map(|i| RatioItem::new(i, 1.0)).collect();

        let justified = LayoutConfig::default();
        let arrangement = arrange(&items, 400.0, &justified);
        assert_eq!(arrangement.mode, LayoutMode::Justified);

        let waterfall = LayoutConfig {
            mode: LayoutMode::Waterfall,
            columns: 2,
            ..Default::default()
        };
        let arrangement = arrange(&items, 400.0, &waterfall);
        assert_eq!(arrangement.mode, LayoutMode::Waterfall);
        assert_eq!(arrangement.groups, 2);
    }
}
