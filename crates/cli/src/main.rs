//! Soliton CLI

use std::{
    fs::{self, File},
    io::BufWriter,
    path::{Path, PathBuf},
    time::{SystemTime, UNIX_EPOCH},
};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use soliton_core::{Observer, Sample, StateVector};
use soliton_kdv::{
    Simulation, SimulationError, Variant, output,
    scenario::{Parameters, Scenario, ScenarioKind},
};
use soliton_observers::{ProgressLogger, StabilityMonitor};
use soliton_solvers::ode::{Action, Event, Method, Status};

#[derive(Parser)]
#[command(name = "soliton")]
#[command(about = "Soliton - KdV wave simulations on a periodic grid")]
#[command(version)]
struct Cli {
    /// Log verbosity level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    log_level: tracing::Level,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a scenario and write the results to a CSV file
    Run {
        /// Scenario (propagation, collision, wave_breaking, shock_wave)
        scenario: ScenarioKind,

        /// Integration method (euler, leapfrog, rk4)
        #[arg(short, long, default_value = "rk4")]
        method: Method,

        /// Equation variant; only shock_wave accepts a choice (dispersionless, diffusive)
        #[arg(short, long)]
        equation: Option<Variant>,

        /// TOML file of parameter overrides
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Override one parameter, e.g. `--set alpha=1.2`. May be repeated.
        #[arg(long = "set", value_name = "NAME=VALUE", value_parser = parse_assignment)]
        assignments: Vec<(String, f64)>,

        /// Stop early once the L2 norm drifts this far from its initial value
        #[arg(long, value_parser = parse_threshold)]
        stability_threshold: Option<f64>,

        /// Directory for result files
        #[arg(short, long, default_value = "data")]
        output_dir: PathBuf,
    },

    /// Print a scenario's default parameters as TOML
    Defaults {
        /// Scenario (propagation, collision, wave_breaking, shock_wave)
        scenario: ScenarioKind,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(cli.log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Run {
            scenario,
            method,
            equation,
            config,
            assignments,
            stability_threshold,
            output_dir,
        } => {
            let scenario = load_scenario(scenario, config.as_deref(), &assignments, equation)?;
            cmd_run(&scenario, method, stability_threshold, &output_dir)
        }
        Commands::Defaults { scenario } => cmd_defaults(scenario),
    }
}

fn parse_assignment(s: &str) -> Result<(String, f64), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got `{s}`"))?;
    let value = value
        .trim()
        .parse()
        .map_err(|e| format!("invalid value for `{}`: {e}", name.trim()))?;
    Ok((name.trim().to_owned(), value))
}

fn parse_threshold(s: &str) -> Result<f64, String> {
    let threshold: f64 = s.trim().parse().map_err(|e| format!("invalid threshold: {e}"))?;
    if threshold.is_finite() && threshold > 0.0 {
        Ok(threshold)
    } else {
        Err(format!("threshold must be finite and positive, got {threshold}"))
    }
}

fn parse_scenario(kind: ScenarioKind, text: &str) -> Result<Scenario, toml::de::Error> {
    Ok(match kind {
        ScenarioKind::Propagation => Scenario::Propagation(toml::from_str(text)?),
        ScenarioKind::Collision => Scenario::Collision(toml::from_str(text)?),
        ScenarioKind::WaveBreaking => Scenario::WaveBreaking(toml::from_str(text)?),
        ScenarioKind::ShockWave => Scenario::ShockWave(toml::from_str(text)?),
    })
}

/// Applies defaults, then the config file, then `--set`, then `--equation`.
fn load_scenario(
    kind: ScenarioKind,
    config: Option<&Path>,
    assignments: &[(String, f64)],
    equation: Option<Variant>,
) -> Result<Scenario> {
    let mut scenario = match config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            parse_scenario(kind, &text)
                .with_context(|| format!("invalid {kind} config {}", path.display()))?
        }
        None => Scenario::defaults(kind),
    };

    for (name, value) in assignments {
        scenario
            .set(name, *value)
            .with_context(|| format!("cannot set `{name}`"))?;
    }

    if let Some(equation) = equation {
        match &mut scenario {
            Scenario::ShockWave(params) => params.set_equation(equation)?,
            other if other.variant() == equation => {}
            other => bail!(
                "the {} scenario always uses the {} equation",
                other.name(),
                other.variant()
            ),
        }
    }

    scenario.validate()?;
    Ok(scenario)
}

fn cmd_run(
    scenario: &Scenario,
    method: Method,
    stability_threshold: Option<f64>,
    output_dir: &Path,
) -> Result<()> {
    let initial = scenario.initial_condition()?;
    let simulation = Simulation::for_scenario(scenario).with_method(method);

    let mut progress = ProgressLogger::new(simulation.grid().iterations());
    let initial_norm = norm(&initial);
    let mut monitor = match stability_threshold {
        Some(_) if !(initial_norm.is_finite() && initial_norm > 0.0) => {
            tracing::warn!(
                initial_norm,
                "initial norm cannot be used as a reference, stability monitoring disabled"
            );
            None
        }
        Some(threshold) => Some(
            StabilityMonitor::new(move |_t, y: &StateVector| norm(y) / initial_norm)
                .with_threshold(threshold),
        ),
        None => None,
    };

    let result = simulation.run(initial, |event: &Event<'_>| -> Option<Action> {
        Observer::<_, Action>::observe(&mut progress, event);
        monitor.as_mut().and_then(|monitor| monitor.observe(event))
    });

    let (samples, failure) = match result {
        Ok(solution) => {
            if solution.status == Status::StoppedByObserver {
                tracing::warn!(
                    steps = solution.steps,
                    "run stopped early, solution looks unstable"
                );
            }
            (solution.samples, None)
        }
        Err(SimulationError::Run(mut failure)) => {
            let samples = std::mem::take(&mut failure.samples);
            (samples, Some(failure))
        }
        Err(err) => return Err(err.into()),
    };

    let path = write_results(scenario, &samples, output_dir)?;
    println!("{}", path.display());

    match failure {
        Some(failure) => Err(failure)
            .with_context(|| format!("partial results saved to {}", path.display())),
        None => Ok(()),
    }
}

fn cmd_defaults(kind: ScenarioKind) -> Result<()> {
    let text = match Scenario::defaults(kind) {
        Scenario::Propagation(params) => toml::to_string(&params),
        Scenario::Collision(params) => toml::to_string(&params),
        Scenario::WaveBreaking(params) => toml::to_string(&params),
        Scenario::ShockWave(params) => toml::to_string(&params),
    }?;
    print!("{text}");
    Ok(())
}

fn write_results(scenario: &Scenario, samples: &[Sample], output_dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create {}", output_dir.display()))?;

    let timestamp = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();
    let path = output_dir.join(output::file_name(scenario.name(), timestamp));
    let file =
        File::create(&path).with_context(|| format!("failed to create {}", path.display()))?;

    output::write_delimited(
        BufWriter::new(file),
        &scenario.table(),
        &scenario.grid(),
        samples,
    )
    .with_context(|| format!("failed to write {}", path.display()))?;

    tracing::info!(path = %path.display(), samples = samples.len(), "results written");
    Ok(path)
}

fn norm(y: &StateVector) -> f64 {
    y.iter().map(|v| v * v).sum::<f64>().sqrt()
}
