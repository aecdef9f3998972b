//! Mosaic: justified and waterfall layout for variable-size items.
//!
//! Mosaic positions a set of rectangular items (photos, cards, tiles) inside
//! a container of known width, and hides the ones far outside the viewport.
//!
//! # Architecture
//!
//! ```text
//! Surface (host) -> ratios -> packer -> Arrangement -> writer -> Surface
//!                                                         \-> culler
//! ```
//!
//! - [`layout`] holds the pure packers: rows scaled to a shared height
//!   (justified) and shortest-column-first stacks (waterfall).
//! - [`writer`] applies an arrangement to a [`Surface`].
//! - [`culler`] toggles item visibility from viewport-relative boxes.
//! - [`controller`] owns the configuration and the resize/scroll triggers.
//! - [`headless`] is an in-memory [`Surface`] for tests and tooling.
//!
//! # Usage
//!
//! ```
//! use mosaic::{HeadlessSurface, LayoutController, LayoutMode, Size};
//!
//! let mut surface = HeadlessSurface::new(900.0, 600.0);
//! for _ in 0..4 {
//!     surface.push_item(Size::new(400.0, 300.0));
//! }
//!
//! let mut controller = LayoutController::new(surface);
//! controller.set_mode(LayoutMode::Waterfall);
//! controller.set_columns(2).unwrap();
//! let report = controller.render().unwrap();
//! assert_eq!(report.groups, 2);
//! ```

pub mod config;
pub mod controller;
pub mod culler;
pub mod error;
pub mod headless;
pub mod layout;
pub mod primitives;
pub mod surface;
pub mod writer;

pub use config::{LayoutConfig, LayoutMode, ScrollRoot};
pub use controller::{LayoutController, LayoutEvent, LayoutReport, RenderRequester};
pub use culler::{CullReport, Visibility};
pub use error::LayoutError;
pub use headless::{HeadlessSurface, ItemId, Scene};
pub use layout::{Arrangement, Placement, RatioItem};
pub use primitives::{Point, Rect, Size};
pub use surface::{RATIO_ATTRIBUTE, Surface};
