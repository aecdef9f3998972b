//! Command-line arguments.

use anyhow::Result;
use clap::{Parser, ValueEnum};
use mosaic::{LayoutConfig, LayoutMode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Json,
    Table,
}

/// Lay out a scene in justified or waterfall mode and print the result.
#[derive(Parser, Debug)]
#[command(name = "mosaic", version, about)]
pub struct Args {
    /// Scene JSON file, or `-` for stdin
    pub scene: String,

    /// Layout mode (justified | waterfall); overrides the scene config
    #[arg(long, value_parser = parse_mode)]
    pub mode: Option<LayoutMode>,

    /// Gap between items, both axes
    #[arg(long)]
    pub gap: Option<f32>,

    /// Maximum row height for justified layout
    #[arg(long)]
    pub max_row_height: Option<f32>,

    /// Column count for waterfall layout
    #[arg(long)]
    pub columns: Option<usize>,

    /// Culling threshold in pixels (default: half the viewport height)
    #[arg(long)]
    pub threshold: Option<f32>,

    /// Scroll the document to this offset after laying out, then cull
    #[arg(long)]
    pub scroll: Option<f32>,

    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    pub format: Format,
}

fn parse_mode(s: &str) -> Result<LayoutMode, String> {
    s.parse::<LayoutMode>().map_err(|e| e.to_string())
}

impl Args {
    /// Apply flag overrides on top of the scene's config, then validate.
    pub fn apply_overrides(&self, config: &mut LayoutConfig) -> Result<()> {
        if let Some(mode) = self.mode {
            config.mode = mode;
        }
        if let Some(gap) = self.gap {
            config.gap = gap;
        }
        if let Some(height) = self.max_row_height {
            config.max_row_height = height;
        }
        if let Some(columns) = self.columns {
            config.columns = columns;
        }
        if self.threshold.is_some() {
            config.threshold = self.threshold;
        }
        config.validate()?;
        Ok(())
    }
}
