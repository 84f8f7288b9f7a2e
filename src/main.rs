use tbsim::{InitialConditions, Parameters, Preset, ScenarioConfig, SimulationRun};
use tbsim::{bench_advance, drift_report, run_2d};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use log::info;

use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about = "Gravitational three-body simulator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Open the interactive 2D viewer
    View(ScenarioArgs),
    /// Integrate without a window and report conservation drift
    Run {
        #[command(flatten)]
        scenario: ScenarioArgs,
        /// Number of ticks to integrate
        #[arg(long, default_value_t = 1000)]
        steps: usize,
    },
    /// Time the step function
    Bench,
    /// Print a built-in preset as a scenario file
    Dump {
        /// Preset to write out
        #[arg(short, long, default_value_t = Preset::default())]
        preset: Preset,
    },
}

#[derive(Args, Debug)]
struct ScenarioArgs {
    /// Scenario YAML file; takes precedence over --preset
    #[arg(short, long)]
    file: Option<PathBuf>,
    /// Built-in initial conditions (sun-and-two-planets, figure-eight)
    #[arg(short, long, default_value_t = Preset::default())]
    preset: Preset,
    /// Speed multiplier, clamped to [0.1, 30]
    #[arg(short, long)]
    speed: Option<f64>,
}

// load here to keep main clean
fn load_scenario(args: &ScenarioArgs) -> Result<(InitialConditions, Parameters)> {
    let (conditions, mut parameters) = match &args.file {
        Some(path) => {
            let cfg = ScenarioConfig::load(path)
                .with_context(|| format!("failed to load scenario {}", path.display()))?;
            cfg.to_parts()
                .with_context(|| format!("invalid scenario {}", path.display()))?
        }
        None => (args.preset.conditions(), Parameters::default()),
    };

    if let Some(speed) = args.speed {
        parameters.speed = tbsim::simulation::params::clamp_speed(speed)?;
    }

    Ok((conditions, parameters))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Command::View(args) => {
            let (conditions, parameters) = load_scenario(&args)?;
            let run = SimulationRun::with_conditions(conditions, parameters)?;
            run_2d(run);
        }
        Command::Run { scenario, steps } => {
            let (conditions, parameters) = load_scenario(&scenario)?;
            let report = drift_report(&conditions, parameters, steps)?;

            info!("integrated {} steps to t = {:.3} in {:.4} s", report.steps, report.system.t, report.elapsed_secs);
            for b in &report.system.bodies {
                info!(
                    "{:>6}: m = {:.1}, x = ({:.3}, {:.3}), v = ({:.4}, {:.4})",
                    b.name, b.m, b.x.x, b.x.y, b.v.x, b.v.y
                );
            }
            info!("|dE/E| = {:.3e}, |dP| = {:.3e}", report.energy_drift(), report.momentum_drift());
        }
        Command::Bench => bench_advance()?,
        Command::Dump { preset } => {
            let cfg = ScenarioConfig::from(&preset.conditions());
            print!("{}", cfg.to_yaml_string()?);
        }
    }

    Ok(())
}
