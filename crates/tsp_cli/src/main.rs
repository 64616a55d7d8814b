//! Tactical Soccer CLI
//!
//! Headless match runs with a JSON summary on stdout.

#[cfg(feature = "cli")]
use anyhow::Result;
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Parser, Debug)]
#[command(name = "tsp")]
#[command(about = "Run tactical soccer matches without a front end", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand, Debug)]
enum Commands {
    /// Simulate a match and print a JSON summary
    Run {
        /// Engine RNG seed
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Ticks to simulate (40ms each by default)
        #[arg(long, default_value_t = 1500)]
        ticks: u64,

        /// Engine config file (YAML, or JSON by extension)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Let the decision engine play both sides
        #[arg(long, default_value = "false")]
        autoplay: bool,

        /// Run on the wall clock with live commentary
        #[arg(long, default_value = "false")]
        realtime: bool,

        /// Pretty-print the summary
        #[arg(long, default_value = "false")]
        pretty: bool,
    },
}

#[cfg(feature = "cli")]
fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    // Also installs the `log` bridge, so engine records show up too.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(feature = "cli")]
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging();

    match cli.command {
        Commands::Run { seed, ticks, config, autoplay, realtime, pretty } => {
            let opts = tsp_cli::RunOptions { seed, ticks, config, autoplay, realtime };
            tracing::info!(seed, ticks, autoplay, realtime, "starting match");

            let summary = tsp_cli::run(&opts)?;
            let json = if pretty {
                serde_json::to_string_pretty(&summary)?
            } else {
                serde_json::to_string(&summary)?
            };
            println!("{}", json);
        }
    }

    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("tsp CLI is not available. Enable the 'cli' feature to use it.");
    std::process::exit(1);
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    #[test]
    fn test_run_defaults() {
        let cli = Cli::try_parse_from(["tsp", "run"]).unwrap();
        let Commands::Run { seed, ticks, config, autoplay, realtime, pretty } = cli.command;
        assert_eq!(seed, 42);
        assert_eq!(ticks, 1500);
        assert!(config.is_none());
        assert!(!autoplay && !realtime && !pretty);
    }

    #[test]
    fn test_run_flags() {
        let cli = Cli::try_parse_from([
            "tsp", "run", "--seed", "7", "--ticks", "250", "--config", "engine.yaml", "--autoplay",
        ])
        .unwrap();
        let Commands::Run { seed, ticks, config, autoplay, .. } = cli.command;
        assert_eq!(seed, 7);
        assert_eq!(ticks, 250);
        assert_eq!(config, Some(PathBuf::from("engine.yaml")));
        assert!(autoplay);
    }

    #[test]
    fn test_rejects_bad_seed() {
        assert!(Cli::try_parse_from(["tsp", "run", "--seed", "minus-one"]).is_err());
    }
}
