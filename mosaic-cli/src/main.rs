//! Mosaic - lay out a scene from the command line.
//!
//! Reads a JSON scene (container width, viewport, item sizes, layout
//! config), runs one render pass on the headless surface, optionally
//! scrolls, and prints where every item landed.

mod cli;
mod output;

use std::io::Read;

use anyhow::{Context, Result};
use clap::Parser;
use mosaic::{CullReport, HeadlessSurface, LayoutController, Scene};
use tracing_subscriber::EnvFilter;

use crate::cli::{Args, Format};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let json = read_scene(&args.scene)?;
    let mut scene = Scene::from_json(&json).with_context(|| format!("invalid scene '{}'", args.scene))?;
    args.apply_overrides(&mut scene.config)?;

    tracing::info!(
        mode = %scene.config.mode,
        items = scene.items.len(),
        width = scene.width,
        "laying out scene"
    );

    let mut controller = LayoutController::with_config(scene.surface(), scene.config.clone())
        .context("invalid layout configuration")?;
    let report = controller
        .render()
        .context("container is detached, nothing to lay out")?;

    let culled = args.scroll.and_then(|offset| scroll_and_cull(&mut controller, offset));

    let summary = output::Summary::collect(&controller, report, culled);
    match args.format {
        Format::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
        Format::Table => print!("{}", summary.table()),
    }
    Ok(())
}

/// Scroll the configured root to `offset` and run a culling pass.
fn scroll_and_cull(controller: &mut LayoutController<HeadlessSurface>, offset: f32) -> Option<CullReport> {
    controller.surface_mut().set_scroll_offset(offset);
    let root = controller.root();
    controller.on_scroll(root)
}

/// Read the scene from a path, or from stdin when the path is `-`.
fn read_scene(path: &str) -> Result<String> {
    if path == "-" {
        let mut json = String::new();
        std::io::stdin()
            .read_to_string(&mut json)
            .context("failed to read scene from stdin")?;
        return Ok(json);
    }
    std::fs::read_to_string(path).with_context(|| format!("failed to read scene '{path}'"))
}
