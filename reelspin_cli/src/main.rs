use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{debug, info, warn};

use reelspin_core::{MachineConfig, PositionSeed, Recorder, ReelAnimator, ResultReporter, LANES};

#[derive(Parser)]
#[command(name = "reelspin-cli", about = "Drive the reel animator without a display")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Machine config (JSON); built-in defaults when omitted
    #[arg(long, env = "REELSPIN_CONFIG")]
    config: Option<String>,
    /// Seed for the start positions
    #[arg(long, env = "REELSPIN_SEED", default_value = "reelspin")]
    seed: String,
    #[arg(long, default_value_t = 0)]
    nonce: u64,
}

#[derive(Subcommand)]
enum Commands {
    /// Spin, stop each lane at the given tick, print the final snapshot as JSON
    Simulate {
        /// Tick at which each lane is stopped, e.g. 30,60,90
        #[arg(long, value_delimiter = ',')]
        stop_at: Vec<u64>,
        /// Override the seeded start positions
        #[arg(long, value_delimiter = ',')]
        positions: Option<Vec<f64>>,
        #[arg(long, default_value_t = 10_000)]
        max_ticks: u64,
    },
    /// Score lanes stopped at fixed positions
    Scan {
        #[arg(long, value_delimiter = ',')]
        positions: Vec<f64>,
    },
    /// Write per-frame lane positions to a CSV file
    Trace {
        #[arg(long, default_value_t = 120)]
        ticks: u64,
        #[arg(long, value_delimiter = ',')]
        stop_at: Option<Vec<u64>>,
        #[arg(long)]
        out: String,
    },
}

fn load_config(path: Option<&str>) -> anyhow::Result<MachineConfig> {
    let Some(path) = path else {
        return Ok(MachineConfig::default());
    };
    let text = std::fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
    let config = MachineConfig::from_json(&text).with_context(|| format!("loading {path}"))?;
    debug!(path, "config loaded");
    Ok(config)
}

fn lanes<T: Copy>(values: &[T], what: &str) -> anyhow::Result<[T; LANES]> {
    values
        .try_into()
        .map_err(|_| anyhow::anyhow!("{what} needs exactly {LANES} values, got {}", values.len()))
}

fn build(
    config: MachineConfig,
    seed: &PositionSeed,
    positions: Option<&[f64]>,
) -> anyhow::Result<ReelAnimator> {
    let machine = match positions {
        Some(p) => ReelAnimator::new(config, lanes(p, "--positions")?)?,
        None => {
            info!(seed = %seed.seed, nonce = seed.nonce, "seeded start");
            ReelAnimator::seeded(config, seed)?
        }
    };
    Ok(machine)
}

/// Stop every lane whose scheduled tick has come.
fn apply_schedule(machine: &mut ReelAnimator, stop_at: &[u64; LANES]) -> anyhow::Result<()> {
    let frame = machine.frame();
    for (lane, &at) in stop_at.iter().enumerate() {
        if frame >= at {
            machine.stop(lane)?;
        }
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    let seed = PositionSeed::new(cli.seed, cli.nonce);
    let mut surface = Recorder::new();
    let mut reporter = ResultReporter::default();

    match cli.command {
        Commands::Simulate {
            stop_at,
            positions,
            max_ticks,
        } => {
            let stop_at = lanes(&stop_at, "--stop-at")?;
            let mut machine = build(config, &seed, positions.as_deref())?;
            while machine.frame() < max_ticks {
                apply_schedule(&mut machine, &stop_at)?;
                let report = machine.tick(&mut surface);
                if let Some(outcome) = reporter.observe(report.outcome.as_ref()) {
                    info!(frame = report.frame, message = %outcome.message, "settled");
                    break;
                }
                if report.outcome.is_none() && machine.all_stopped() {
                    break;
                }
            }
            let snapshot = machine.snapshot();
            if !snapshot.all_stopped() {
                warn!(max_ticks, "tick budget ran out with lanes still spinning");
            } else if snapshot.outcome.is_none() {
                warn!("all lanes stopped but not every lane shows the target glyph");
            }
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        }
        Commands::Scan { positions } => {
            let mut machine = build(config, &seed, Some(positions.as_slice()))?;
            for lane in 0..LANES {
                machine.stop(lane)?;
            }
            let report = machine.tick(&mut surface);
            match report.outcome {
                Some(outcome) => {
                    println!("guide lines: {:?}", surface.guide_lines());
                    println!("spread={} tier={:?}", outcome.spread, outcome.tier);
                    println!("{}", outcome.message);
                }
                None => println!("no target glyph in view"),
            }
        }
        Commands::Trace {
            ticks,
            stop_at,
            out,
        } => {
            let stop_at = match stop_at {
                Some(s) => Some(lanes(&s, "--stop-at")?),
                None => None,
            };
            let mut machine = build(config, &seed, None)?;
            let mut wtr = csv::Writer::from_path(&out)?;
            wtr.write_record(["frame", "lane", "position", "spinning", "spread"])?;
            for _ in 0..ticks {
                if let Some(s) = &stop_at {
                    apply_schedule(&mut machine, s)?;
                }
                let report = machine.tick(&mut surface);
                let spread = report
                    .outcome
                    .as_ref()
                    .map(|o| o.spread.to_string())
                    .unwrap_or_default();
                for lane in machine.snapshot().lanes {
                    wtr.write_record(&[
                        report.frame.to_string(),
                        lane.lane.to_string(),
                        lane.position.to_string(),
                        lane.spinning.to_string(),
                        spread.clone(),
                    ])?;
                }
            }
            wtr.flush()?;
            println!("Exported {} frames to {}", ticks, out);
        }
    }

    Ok(())
}
