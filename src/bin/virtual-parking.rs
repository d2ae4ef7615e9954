//! Virtual Parking command-line runner
//!
//! Executes a file of parking lot commands (or stdin) and prints one result
//! per command.
//!
//! # Examples
//!
//! ```bash
//! # Run a command file
//! virtual-parking input.txt
//!
//! # Read commands from stdin, JSON output
//! echo "Create_parking_lot 3" | virtual-parking --output json
//!
//! # Show the effective configuration
//! virtual-parking --config parking.toml --print-config
//! ```

use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use virtual_parking::runner::{self, RunSummary};
use virtual_parking::{CommandRouter, OutputFormat, RunConfig};

/// Virtual Parking - lowest-slot-first parking lot simulator
#[derive(Parser, Debug)]
#[command(name = "virtual-parking")]
#[command(version = virtual_parking::VERSION)]
#[command(about = "Runs parking lot commands from a file or stdin", long_about = None)]
struct Cli {
    /// Command file; stdin when omitted
    input: Option<PathBuf>,

    /// TOML configuration file
    #[arg(short, long, env = "PARKING_CONFIG")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum)]
    output: Option<OutputFormat>,

    /// Stop at the first failed command
    #[arg(long)]
    stop_on_error: bool,

    /// Accept streams that do not start with Create_parking_lot
    #[arg(long)]
    allow_missing_create: bool,

    /// Log directory path (daily rolling files)
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "RUST_LOG")]
    log_level: Option<String>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

impl Cli {
    /// Apply command-line overrides on top of the loaded configuration
    fn merge_into(&self, mut config: RunConfig) -> RunConfig {
        if let Some(output) = self.output {
            config.output = output;
        }
        if self.stop_on_error {
            config.stop_on_error = true;
        }
        if self.allow_missing_create {
            config.require_create_first = false;
        }
        if let Some(dir) = &self.log_dir {
            config.log_dir = Some(dir.clone());
        }
        if let Some(level) = &self.log_level {
            config.log_level = level.clone();
        }
        if self.no_color {
            config.no_color = true;
        }
        config
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = cli.merge_into(RunConfig::load(cli.config.as_deref())?);

    if cli.print_config {
        print!("{}", config.to_toml()?);
        return Ok(());
    }

    // Setup logging
    setup_logging(&config)?;

    let mut router = CommandRouter::new();
    let mut stdout = tokio::io::stdout();

    let result = match &cli.input {
        Some(path) => runner::run_file(path, &mut stdout, &mut router, &config).await,
        None => {
            info!("Reading commands from stdin");
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            runner::run(stdin, &mut stdout, &mut router, &config).await
        }
    };

    match result {
        Ok(summary) => {
            log_summary(&summary);
            Ok(())
        }
        Err(e) => {
            error!("Command stream failed: {}", e);
            Err(e.into())
        }
    }
}

/// Setup logging to stderr and, optionally, rolling files
///
/// stdout carries command results only.
fn setup_logging(config: &RunConfig) -> anyhow::Result<()> {
    let log_level = config
        .log_level
        .parse::<tracing::Level>()
        .unwrap_or(tracing::Level::WARN);

    let file_layer = match &config.log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            let appender = RollingFileAppender::new(Rotation::DAILY, dir, "virtual-parking.log");
            Some(fmt::layer().with_writer(appender).with_ansi(false))
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(!config.no_color),
        )
        .with(file_layer)
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .init();

    Ok(())
}

fn log_summary(summary: &RunSummary) {
    match &summary.stats {
        Some(stats) => info!(
            lines = summary.lines,
            failures = summary.failures,
            capacity = stats.capacity,
            occupied = stats.occupied,
            available = stats.available,
            "Run complete"
        ),
        None => info!(
            lines = summary.lines,
            failures = summary.failures,
            "Run complete, no parking lot was created"
        ),
    }
}
