use std::path::PathBuf;

use anyhow::{Context, Result};

use drift_engine::coords::Viewport;
use drift_engine::raster::Canvas;
use drift_ui::GradientView;
use drift_ui::snapshot::save_png;

use crate::card::card_rect;

/// Headless rendering of the card on a virtual clock.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub dir: PathBuf,
    pub frames: u32,
    pub fps: f64,
    /// Logical window size the card is laid out in.
    pub window: Viewport,
}

/// Plays the view from its first appearance and writes one PNG per frame.
/// Returns the number of files written.
pub fn run(view: &mut GradientView, opts: &ExportOptions) -> Result<u32> {
    anyhow::ensure!(opts.fps.is_finite() && opts.fps > 0.0, "fps must be positive, got {}", opts.fps);
    let card = card_rect(opts.window);
    anyhow::ensure!(!card.is_empty(), "window {}x{} leaves no room for the card", opts.window.width, opts.window.height);

    std::fs::create_dir_all(&opts.dir)
        .with_context(|| format!("failed to create {}", opts.dir.display()))?;

    view.layout(card.size.x, card.size.y);
    view.view_did_appear(0.0);

    let mut canvas = Canvas::new(card.size.x.round() as u32, card.size.y.round() as u32);
    for i in 0..opts.frames {
        let now = i as f64 / opts.fps;
        view.tick(now);
        view.compose(now, &mut canvas)?;
        save_png(&canvas, &opts.dir.join(format!("frame-{i:05}.png")))?;
    }
    view.view_will_disappear();

    log::info!("exported {} frames to {}", opts.frames, opts.dir.display());
    Ok(opts.frames)
}
