//! ssg-rewrite CLI - nginx rewrite rules for Next.js static exports.
//!
//! Provides commands for:
//! - `generate`: Print rewrite rules for the pages directory
//! - `routes`: Print the routes rules are generated for, in priority order

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{GenerateArgs, RoutesArgs};
use output::Output;

/// ssg-rewrite - nginx rewrite rules for Next.js static exports.
#[derive(Parser)]
#[command(name = "ssg-rewrite", version, about)]
struct Cli {
    /// Enable verbose output (debug logging on stderr).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print nginx rewrite rules to stdout.
    Generate(GenerateArgs),
    /// Print routes in rule order, one per line.
    Routes(RoutesArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables DEBUG level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Generate(args) => args.execute(),
        Commands::Routes(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
