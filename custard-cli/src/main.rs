// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! Custard CLI - frozen custard flavor of the day from the command line.
//!
//! # Examples
//!
//! ```bash
//! # List vendors
//! custard providers
//!
//! # Find a store
//! custard search culvers "madison, wi"
//! custard search kopps
//!
//! # Today's flavor
//! custard flavor kopps kopps-glendale
//! custard flavor culvers madison-wi-mineral-point-rd --zip 53717
//!
//! # Forward schedule
//! custard upcoming leducs leducs-wales --days 7
//!
//! # Save locations and poll them
//! custard add oscars oscars-franklin
//! custard watch
//! ```

mod commands;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use commands::{check, config, flavor, location, providers, search, upcoming, watch};

// ============================================================================
// CLI Definition
// ============================================================================

/// Custard CLI - flavor of the day lookup and polling.
#[derive(Parser)]
#[command(name = "custard")]
#[command(about = "Frozen custard flavor of the day CLI")]
#[command(long_about = r#"
Custard looks up today's flavor at frozen custard stands.

Supported vendors:
  • Culver's (culvers)
  • Kopp's Frozen Custard (kopps)
  • Oscar's Frozen Custard (oscars)
  • Goodberry's Frozen Custard (goodberrys)
  • Leduc's Frozen Custard (leducs)

Examples:
  custard search culvers madison          # Find stores
  custard flavor kopps kopps-glendale     # Today's flavor
  custard add kopps kopps-glendale        # Save a location
  custard watch                           # Poll saved locations
"#)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (text or json).
    #[arg(long, short = 'f', default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Verbose output (show debug info).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Quiet mode (no logging, minimal output).
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Config file (defaults to the user config directory).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// List supported vendors.
    #[command(visible_alias = "p")]
    Providers,

    /// Search a vendor's locations.
    #[command(visible_alias = "s")]
    Search(search::SearchArgs),

    /// Show one location.
    Location(location::LocationArgs),

    /// Show today's flavor at a location.
    #[command(visible_alias = "f")]
    Flavor(location::LocationArgs),

    /// Show upcoming flavors at a location.
    #[command(visible_alias = "u")]
    Upcoming(upcoming::UpcomingArgs),

    /// Check that today's flavor can be read (exit code 2 on failure).
    Check(location::LocationArgs),

    /// Save a location to the config file.
    Add(config::AddArgs),

    /// Remove a saved location by its unique id.
    Remove(config::RemoveArgs),

    /// List saved locations.
    #[command(visible_alias = "ls")]
    List,

    /// Poll every saved location until Ctrl+C.
    #[command(visible_alias = "w")]
    Watch,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable text with colors.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

/// CLI exit codes.
#[repr(i32)]
pub enum ExitCode {
    /// Success.
    Success = 0,
    /// General error.
    Error = 1,
    /// The flavor check failed.
    CheckFailed = 2,
}

impl Cli {
    /// Config file in use.
    pub fn config_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(custard_store::Config::default_path)
    }
}

// ============================================================================
// Logging Setup
// ============================================================================

fn setup_logging(verbose: bool, quiet: bool) {
    if quiet {
        return;
    }

    let default_directives = if verbose {
        "custard=debug,info"
    } else {
        "custard=warn"
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

// ============================================================================
// Main Entry Point
// ============================================================================

async fn dispatch(cli: &Cli, host: &commands::Host) -> Result<()> {
    match &cli.command {
        Commands::Providers => providers::run(cli),
        Commands::Search(args) => search::run(args, cli, host).await,
        Commands::Location(args) => location::run(args, cli, host).await,
        Commands::Flavor(args) => flavor::run(args, cli, host).await,
        Commands::Upcoming(args) => upcoming::run(args, cli, host).await,
        Commands::Check(args) => {
            if !check::run(args, cli, host).await? {
                std::process::exit(ExitCode::CheckFailed as i32);
            }
            Ok(())
        }
        Commands::Add(args) => config::add(args, cli, host).await,
        Commands::Remove(args) => config::remove(args, cli).await,
        Commands::List => config::list(cli).await,
        Commands::Watch => watch::run(cli, host).await,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let result = match commands::Host::new() {
        Ok(host) => dispatch(&cli, &host).await,
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        if !cli.quiet {
            eprintln!("Error: {e:#}");
        }
        std::process::exit(ExitCode::Error as i32);
    }

    Ok(())
}
