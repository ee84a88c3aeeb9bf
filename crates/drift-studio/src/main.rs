mod card;
mod export;
mod palette;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use winit::dpi::LogicalSize;

use drift_engine::coords::Viewport;
use drift_engine::device::GpuInit;
use drift_engine::logging::{init_logging, LoggingConfig};
use drift_engine::window::{Runtime, RuntimeConfig};
use drift_ui::{GradientView, Group, MotionConfig, MotionCurve, ToggleMode, ViewConfig};

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
enum Tap {
    /// Tap starts and stops the animation
    StartStop,
    /// Tap pauses and resumes the animation
    PauseResume,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
enum Curve {
    Spring,
    Bezier,
}

#[derive(Parser, Debug)]
#[command(name = "drift-studio")]
#[command(about = "Animated gradient card", long_about = None)]
struct Cli {
    /// Window width in logical pixels
    #[arg(long, default_value_t = 480.0)]
    width: f64,

    /// Window height in logical pixels
    #[arg(long, default_value_t = 640.0)]
    height: f64,

    /// What a click on the card (or Space) does
    #[arg(long, value_enum, default_value_t = Tap::StartStop)]
    tap: Tap,

    /// Seed for reproducible motion
    #[arg(long)]
    seed: Option<u64>,

    /// Animation speed multiplier
    #[arg(long, default_value_t = 1.0)]
    speed: f32,

    /// Easing curve of each step
    #[arg(long, value_enum, default_value_t = Curve::Spring)]
    curve: Curve,

    /// Log filter, env_logger syntax (overrides RUST_LOG)
    #[arg(long)]
    log: Option<String>,

    /// Render PNG frames into this directory instead of opening a window
    #[arg(long)]
    export: Option<PathBuf>,

    /// Number of frames to export
    #[arg(long, default_value_t = 120)]
    frames: u32,

    /// Frame rate of the export clock
    #[arg(long, default_value_t = 30.0)]
    fps: f64,
}

impl Cli {
    fn motion(&self) -> MotionConfig {
        let curve = match self.curve {
            Curve::Spring => MotionCurve::Spring,
            Curve::Bezier => MotionCurve::Bezier,
        };
        MotionConfig::default().with_speed(self.speed).with_curve(curve)
    }

    fn tap(&self) -> ToggleMode {
        match self.tap {
            Tap::StartStop => ToggleMode::StartStop,
            Tap::PauseResume => ToggleMode::PauseResume,
        }
    }

    fn view(&self) -> GradientView {
        let config = ViewConfig::default();
        let mut view = match self.seed {
            Some(seed) => GradientView::with_seed(config, self.motion(), seed),
            None => GradientView::new(config, self.motion()),
        };
        view.reconcile(Group::Base, &palette::base(), 0.0);
        view.reconcile(Group::Highlight, &palette::highlight(), 0.0);
        view
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(LoggingConfig { env_filter: cli.log.clone(), ..LoggingConfig::default() });

    let mut view = cli.view();

    if let Some(dir) = &cli.export {
        let opts = export::ExportOptions {
            dir: dir.clone(),
            frames: cli.frames,
            fps: cli.fps,
            window: Viewport::new(cli.width as f32, cli.height as f32),
        };
        export::run(&mut view, &opts)?;
        return Ok(());
    }

    log::info!("click the card or press Space to toggle; S start/stop, P pause/resume, Up/Down speed, Esc quit");
    let config = RuntimeConfig {
        title: "drift".to_string(),
        initial_size: LogicalSize::new(cli.width, cli.height),
    };
    let window = Viewport::new(cli.width as f32, cli.height as f32);
    Runtime::run(config, GpuInit::default(), card::CardApp::new(view, cli.tap(), window))
}
