//! beyond-sim: terminal driver for the world-beyond-xr experience core
//!
//! Usage:
//!   beyond-sim run                          # scripted playthrough
//!   beyond-sim run --scenario broken-room   # room initialization failure
//!   beyond-sim interactive                  # drive the device from the keyboard

mod device;
mod interactive;
mod scenario;
mod stage;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use world_beyond_xr::ExperienceConfig;

use scenario::{Scenario, Simulation};

#[derive(Parser)]
#[command(name = "beyond-sim", about = "Simulate the mixed-reality experience core in a terminal")]
struct Cli {
    /// Experience configuration (TOML); defaults apply when omitted
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `world_beyond_xr=trace`; overrides RUST_LOG
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a scripted playthrough and print a summary
    Run {
        /// Number of ticks to simulate
        #[arg(long, default_value_t = 750)]
        ticks: u64,

        /// Tick length in milliseconds
        #[arg(long, default_value_t = 20, value_parser = clap::value_parser!(u64).range(1..))]
        tick_ms: u64,

        #[arg(long, value_enum, default_value_t = Scenario::Inside)]
        scenario: Scenario,
    },
    /// Drive the simulated device from the keyboard
    Interactive {
        /// Tick length in milliseconds
        #[arg(long, default_value_t = 50, value_parser = clap::value_parser!(u64).range(1..))]
        tick_ms: u64,

        #[arg(long, value_enum, default_value_t = Scenario::Inside)]
        scenario: Scenario,
    },
}

fn init_tracing(level: Option<&str>, default: &str) {
    let filter = match level {
        Some(level) => tracing_subscriber::EnvFilter::new(level),
        None => tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default)),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<ExperienceConfig> {
    match path {
        Some(path) => ExperienceConfig::load(path)
            .with_context(|| format!("loading experience config from {}", path.display())),
        None => Ok(ExperienceConfig::default()),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs would tear through the raw-mode status line, so keep them quiet there
    let default_level = match cli.command {
        Commands::Run { .. } => "info",
        Commands::Interactive { .. } => "warn",
    };
    init_tracing(cli.log_level.as_deref(), default_level);

    let config = load_config(cli.config.as_ref())?;

    match cli.command {
        Commands::Run {
            ticks,
            tick_ms,
            scenario,
        } => {
            let mut simulation =
                Simulation::new(config, scenario, Duration::from_millis(tick_ms))?;
            scenario::run(&mut simulation, ticks).await;
            println!("{}", simulation.summary());
        }
        Commands::Interactive { tick_ms, scenario } => {
            interactive::run(config, scenario, Duration::from_millis(tick_ms)).await?;
        }
    }

    Ok(())
}
