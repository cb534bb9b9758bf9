use gravsim::{bench_update, run_terminal, Catalog, Scenario, ScenarioConfig};

use anyhow::{Context, Result};
use clap::Parser;

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
struct Args {
    /// Scenario file, looked up in `scenarios/` unless it is an existing path
    #[arg(short, default_value = "earth_and_moon.yaml")]
    file_name: String,

    /// Astronomical data catalog; the bundled one when omitted
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Wall-clock seconds to run before shutting down
    #[arg(long, default_value_t = 10.0)]
    seconds: f64,

    /// Milliseconds between printed frames
    #[arg(long, default_value_t = 1000)]
    report_ms: u64,

    /// Override the scenario's simulation speed factor
    #[arg(long)]
    speed: Option<f64>,

    /// Time the physics step for growing body counts and exit
    #[arg(long)]
    bench: bool,
}

fn scenario_path(file_name: &str) -> PathBuf {
    let direct = PathBuf::from(file_name);
    if direct.exists() {
        return direct;
    }
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name)
}

// load here to keep main clean
fn load_scenario_from_yaml(args: &Args) -> Result<ScenarioConfig> {
    let config_path = scenario_path(&args.file_name);
    let file = File::open(&config_path)
        .with_context(|| format!("opening scenario {}", config_path.display()))?;
    let scenario_cfg = ScenarioConfig::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing scenario {}", config_path.display()))?;
    Ok(scenario_cfg)
}

fn load_catalog(args: &Args) -> Result<Catalog> {
    match &args.catalog {
        Some(path) => {
            let file = File::open(path).with_context(|| format!("opening catalog {}", path.display()))?;
            Ok(Catalog::from_reader(BufReader::new(file))?)
        }
        None => Ok(Catalog::builtin().context("parsing bundled catalog")?),
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    if args.bench {
        bench_update();
        return Ok(());
    }

    let scenario_cfg = load_scenario_from_yaml(&args)?;
    let catalog = load_catalog(&args)?;
    let scenario = Scenario::build(scenario_cfg, &catalog)?;

    println!("{}", scenario.title);
    let unit_scale = scenario.parameters.unit_scale;
    let mut clock = scenario.into_clock();
    if let Some(speed) = args.speed {
        clock.controls().set_speed(speed)?;
    }

    clock.start();
    run_terminal(
        &clock,
        unit_scale,
        Duration::from_millis(args.report_ms),
        Duration::from_secs_f64(args.seconds.max(0.0)),
    );
    let report = clock.terminate()?;

    println!(
        "{} clock iterations, {} updates, {:.3e} s simulated",
        report.iterations, report.updates, report.simulated_time
    );

    Ok(())
}
