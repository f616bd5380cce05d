use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use gravbrush::{BrushSetting, BrushStyle, InputEvent, SimParameters, Simulator, Tool};
use log::info;

/// Run the simulation headless at a simulated 60 Hz frame clock.
#[derive(Parser, Debug)]
struct Args {
    /// YAML parameter file. Defaults apply to anything it leaves out.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of physics steps to run.
    #[arg(short, long, default_value_t = 600)]
    steps: u64,

    /// Force algorithm token, e.g. `pairwise` or `spatial_tree`.
    #[arg(short, long)]
    algorithm: Option<String>,

    /// Paint a scatter stroke across the region before the first step.
    #[arg(long)]
    scatter: bool,

    #[arg(long)]
    seed: Option<u64>,
}

/// Host frame period, a little above the tick interval so every frame steps.
const FRAME_MS: f64 = 17.0;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut params = match &args.config {
        Some(path) => SimParameters::from_yaml_file(path)
            .with_context(|| format!("failed to load parameters from {}", path.display()))?,
        None => SimParameters::default(),
    };
    if args.seed.is_some() {
        params.seed = args.seed;
    }

    let mut sim = Simulator::new(&params).context("failed to build the initial scene")?;
    if let Some(token) = args.algorithm {
        sim.push_event(InputEvent::SelectAlgorithm(token));
    }
    if args.scatter {
        script_scatter_stroke(&mut sim);
    }

    let mut now = 0.0;
    sim.frame(now);
    while sim.diagnostics().steps() < args.steps {
        now += FRAME_MS;
        if sim.frame(now) && sim.diagnostics().steps() % 60 == 0 {
            info!("{}", sim.diagnostics());
        }
    }

    info!(
        "finished after {:.1} simulated seconds: {}",
        now / 1000.0,
        sim.diagnostics()
    );
    Ok(())
}

/// Queue a left-to-right drag above the sun. The whole stroke lands in the first step.
fn script_scatter_stroke(sim: &mut Simulator) {
    let (width, height) = sim.region();
    let y = height / 2.0 - height / 8.0;
    sim.push_event(InputEvent::SelectTool(Tool::Brush));
    sim.push_event(InputEvent::Brush(BrushSetting::Style(BrushStyle::Scatter)));
    sim.push_event(InputEvent::Brush(BrushSetting::Density(20)));
    sim.push_event(InputEvent::Press { x: width / 8.0, y });
    for i in 1..=60 {
        let x = width / 8.0 + i as f64 * width * 0.75 / 60.0;
        sim.push_event(InputEvent::Move {
            x,
            y,
            dragging: true,
        });
    }
    sim.push_event(InputEvent::Release);
}
