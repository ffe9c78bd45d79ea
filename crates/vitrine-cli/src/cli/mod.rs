//! CLI entry and dispatch.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use vitrine_core::{config, telemetry};

mod commands;

#[derive(Parser)]
#[command(name = "vitrine")]
#[command(version)]
#[command(about = "Scroll stage tooling: configuration and deterministic replays")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Also write logs to a daily file under $VITRINE_HOME/logs
    #[arg(long, global = true)]
    log_file: bool,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Drive a scripted session through the simulated stage
    Replay {
        /// Path to the replay script (JSON)
        #[arg(value_name = "SCRIPT")]
        script: PathBuf,

        /// Fix the text-scramble seed (overrides config)
        #[arg(long, env = "VITRINE_SEED")]
        seed: Option<u64>,

        /// Print every step, including ones that changed nothing
        #[arg(long)]
        all: bool,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
    /// Print the effective configuration as TOML
    Show {
        /// Fix the text-scramble seed (overrides config)
        #[arg(long, env = "VITRINE_SEED")]
        seed: Option<u64>,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let log_dir = cli.log_file.then(config::paths::logs_dir);
    let _telemetry = telemetry::init(log_dir.as_deref()).context("init logging")?;

    match cli.command {
        Commands::Config { command } => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
            ConfigCommands::Show { seed } => commands::config::show(seed),
        },
        Commands::Replay { script, seed, all } => {
            let mut config = config::Config::load().context("load config")?;
            if seed.is_some() {
                config.transitions.scramble_seed = seed;
            }
            commands::replay::run(&script, config, all)
        }
    }
}
