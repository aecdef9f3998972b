//! Result rendering for the command line.

use std::fmt::Write;

use mosaic::{CullReport, HeadlessSurface, LayoutController, LayoutReport, Rect, Surface};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ItemSummary {
    pub index: usize,
    pub rect: Option<Rect>,
    pub visible: bool,
}

#[derive(Debug, Serialize)]
pub struct Summary {
    pub report: LayoutReport,
    /// Present when a scroll was simulated.
    pub culled: Option<CullReport>,
    pub items: Vec<ItemSummary>,
}

impl Summary {
    pub fn collect(
        controller: &LayoutController<HeadlessSurface>,
        report: LayoutReport,
        culled: Option<CullReport>,
    ) -> Self {
        let surface = controller.surface();
        let items = surface
            .items()
            .into_iter()
            .enumerate()
            .map(|(index, id)| ItemSummary {
                index,
                rect: surface.placement(id),
                visible: surface.is_visible(id),
            })
            .collect();
        Self { report, culled, items }
    }

    /// Human-readable table, one line per item.
    pub fn table(&self) -> String {
        let mut out = String::new();
        let r = &self.report;
        let _ = writeln!(
            out,
            "{} layout: {} items, {} groups, {:.1} x {:.1}",
            r.mode, r.items, r.groups, r.width, r.content_height
        );
        if let Some(culled) = self.culled {
            let _ = writeln!(out, "after scroll: {} shown, {} hidden", culled.shown, culled.hidden);
        }
        let _ = writeln!(out, "{:>5} {:>9} {:>9} {:>9} {:>9}  visible", "item", "left", "top", "width", "height");
        for item in &self.items {
            match item.rect {
                Some(rect) => {
                    let _ = writeln!(
                        out,
                        "{:>5} {:>9.1} {:>9.1} {:>9.1} {:>9.1}  {}",
                        item.index, rect.x, rect.y, rect.width, rect.height, item.visible
                    );
                }
                None => {
                    let _ = writeln!(out, "{:>5} {:>39}  {}", item.index, "unplaced", item.visible);
                }
            }
        }
        out
    }
}
