//! sitenav CLI - site navigation diagnostics.
//!
//! Provides commands for:
//! - `check`: Load and validate the site configuration
//! - `resolve`: Show the page context resolved for a request path
//! - `nav`: Show the nav bar of a locale

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CheckArgs, NavArgs, ResolveArgs};
use output::Output;

/// sitenav - site navigation diagnostics.
#[derive(Parser)]
#[command(name = "sitenav", version, about)]
struct Cli {
    /// Enable verbose output (info-level logs).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load and validate the site configuration.
    Check(CheckArgs),
    /// Print the page context for a request path as JSON.
    Resolve(ResolveArgs),
    /// Print the nav bar of a locale as JSON.
    Nav(NavArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Check(args) => args.execute(),
        Commands::Resolve(args) => args.execute(),
        Commands::Nav(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
