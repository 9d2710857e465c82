//! # Runtime Application Logic
//!
//! Loads the config, gates the design through the editor checks and runs
//! the frame loop. The loop never sleeps; `--frame-dt` stands in for the
//! wall time a renderer would measure between frames.

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use bridge::{Outcome, SimConfig, WorldSimulation};
use clap::{Parser, ValueEnum};
use design::{default_design, wood_span_design, Design, Layout};

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Scenario {
    /// Three road beams across the gap.
    Default,
    /// A single wood beam with no deck. Always rejected before play by the
    /// road rule.
    WoodSpan,
}

impl Scenario {
    fn design(self, layout: &Layout) -> Design {
        match self {
            Scenario::Default => default_design(layout),
            Scenario::WoodSpan => wood_span_design(layout),
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "bridge_runtime", about = "Run a train across a bridge design")]
pub struct Args {
    #[arg(long, value_enum, default_value_t = Scenario::Default)]
    pub scenario: Scenario,
    /// JSON file overriding any part of the simulation config.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Seconds of wall time fed to the stepper per frame.
    #[arg(long, default_value_t = 1.0 / 60.0)]
    pub frame_dt: f64,
    /// Frames to run before giving up on a pending run.
    #[arg(long, default_value_t = 3600)]
    pub max_frames: u32,
    /// Override the config's budget.
    #[arg(long)]
    pub budget: Option<f32>,
    /// Print a JSON snapshot after every frame.
    #[arg(long)]
    pub snapshots: bool,
}

fn load_config(args: &Args) -> Result<SimConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => SimConfig::default(),
    };
    if let Some(budget) = args.budget {
        config.budget = budget;
    }
    Ok(config)
}

/// Run one simulation to its outcome or to `--max-frames`.
///
/// # Errors
///
/// Returns an error if the config cannot be read, the design fails the
/// editor checks or the world cannot be built.
pub fn run(args: &Args) -> Result<()> {
    let config = load_config(args)?;
    let design = args.scenario.design(&config.layout);

    design
        .validate_for_play(config.budget)
        .context("design rejected before play")?;
    tracing::info!(
        scenario = ?args.scenario,
        cost = design.total_cost(),
        budget = config.budget,
        "design accepted"
    );

    let mut sim = WorldSimulation::new(&design, config).context("building the world")?;
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    for frame in 0..args.max_frames {
        let report = sim.step(args.frame_dt);
        if args.snapshots {
            serde_json::to_writer(&mut out, &sim.snapshot())?;
            writeln!(out)?;
        }
        for beam in &report.broken {
            tracing::info!(%beam, t = sim.time(), "beam broke");
        }
        if (frame + 1) % 60 == 0 {
            tracing::debug!(
                t = sim.time(),
                camera_x = sim.camera_target_x(),
                "frame {}",
                frame + 1
            );
        }
        if sim.outcome().is_terminal() {
            break;
        }
    }
    out.flush()?;

    match sim.outcome() {
        Outcome::Pending => tracing::warn!(t = sim.time(), "run still pending after frame limit"),
        outcome => tracing::info!(
            %outcome,
            t = sim.outcome_time().unwrap_or_else(|| sim.time()),
            broken = sim.broken_count(),
            "run finished"
        ),
    }
    Ok(())
}
