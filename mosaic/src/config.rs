//! Layout configuration.
//!
//! All fields are live settings: the controller reads them at the start of
//! every pass. Optional fields carry "live defaults" that are resolved at the
//! point of use by the `effective_*` methods and never cached.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LayoutError;

/// Default maximum row height for justified layout, in pixels.
pub const DEFAULT_MAX_ROW_HEIGHT: f32 = 200.0;

/// Which packer a render pass runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    /// Rows stretched to the container width at a uniform height.
    #[default]
    Justified,
    /// Fixed columns, each item appended to the shortest one.
    Waterfall,
}

impl LayoutMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            LayoutMode::Justified => "justified",
            LayoutMode::Waterfall => "waterfall",
        }
    }
}

impl fmt::Display for LayoutMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LayoutMode {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "justified" => Ok(LayoutMode::Justified),
            "waterfall" | "masonry" => Ok(LayoutMode::Waterfall),
            other => Err(LayoutError::UnknownMode(other.to_string())),
        }
    }
}

/// The scrollable ancestor whose scroll events drive culling.
///
/// Element roots are identified by an opaque host-assigned id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollRoot {
    #[default]
    Document,
    Element(u64),
}

/// Layout settings shared by both packers, the culler and the controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub mode: LayoutMode,
    /// Rows close once their natural height is at or below this; rendered
    /// rows are clamped to it.
    pub max_row_height: f32,
    /// Uniform spacing on both axes.
    pub gap: f32,
    /// Column count for waterfall mode.
    pub columns: usize,
    /// Scroll root; `None` means the document.
    pub root: Option<ScrollRoot>,
    /// Pixels beyond the viewport edges before an item is hidden; `None`
    /// means half the current viewport height.
    pub threshold: Option<f32>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            mode: LayoutMode::Justified,
            max_row_height: DEFAULT_MAX_ROW_HEIGHT,
            gap: 0.0,
            columns: 1,
            root: None,
            threshold: None,
        }
    }
}

impl LayoutConfig {
    /// Check every field, e.g. after deserializing a config from JSON.
    pub fn validate(&self) -> Result<(), LayoutError> {
        check_gap(self.gap)?;
        check_max_row_height(self.max_row_height)?;
        check_columns(self.columns)?;
        if let Some(threshold) = self.threshold {
            check_threshold(threshold)?;
        }
        Ok(())
    }

    /// The scroll root scroll events must come from.
    #[inline]
    pub fn effective_root(&self) -> ScrollRoot {
        self.root.unwrap_or_default()
    }

    /// The culling margin for the given viewport height.
    #[inline]
    pub fn effective_threshold(&self, viewport_height: f32) -> f32 {
        match self.threshold {
            Some(threshold) => threshold,
            None if viewport_height.is_finite() => (viewport_height / 2.0).max(0.0),
            None => 0.0,
        }
    }
}

pub(crate) fn check_gap(gap: f32) -> Result<f32, LayoutError> {
    if gap.is_finite() && gap >= 0.0 {
        Ok(gap)
    } else {
        Err(LayoutError::InvalidGap(gap))
    }
}

pub(crate) fn check_max_row_height(height: f32) -> Result<f32, LayoutError> {
    if height.is_finite() && height > 0.0 {
        Ok(height)
    } else {
        Err(LayoutError::InvalidMaxRowHeight(height))
    }
}

pub(crate) fn check_columns(columns: usize) -> Result<usize, LayoutError> {
    if columns >= 1 {
        Ok(columns)
    } else {
        Err(LayoutError::InvalidColumns(columns))
    }
}

pub(crate) fn check_threshold(threshold: f32) -> Result<f32, LayoutError> {
    if threshold.is_finite() && threshold >= 0.0 {
        Ok(threshold)
    } else {
        Err(LayoutError::InvalidThreshold(threshold))
    }
}
