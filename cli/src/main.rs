//! # bx CLI
//!
//! Command-line interface for bx - a single-page terminal application
//! driven by an ordered route table.
//!
//! ## Usage
//!
//! - `bx` - Start interactive mode
//! - `bx routes` - Show the route table in evaluation order
//! - `bx resolve /users/42` - Show which page a location selects
//!
//! The interactive mode renders one page at a time inside a shared layout,
//! with a terminal UI powered by iocraft.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod config;
mod interactive;

use commands::{interactive_command, resolve_command, routes_command};
use config::CliConfigLoader;

/// bx - A routed single-page terminal application
#[derive(Parser)]
#[command(name = "bx")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "A routed single-page terminal application")]
#[command(long_about = None)]
struct Cli {
    /// Configuration file or directory path
    #[arg(short, long, env = "BX_CONFIG")]
    config: Option<PathBuf>,

    /// Location to start at, e.g. /users/42
    #[arg(long)]
    initial_location: Option<String>,

    /// Title shown in the layout header
    #[arg(long)]
    title: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Enable debug output mode (default is normal mode)
    #[arg(short = 'd', long = "debug")]
    debug_output: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the route table in evaluation order
    Routes,

    /// Show which page a location selects
    Resolve {
        /// Location to resolve, e.g. /users/42?tab=posts
        location: String,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Build a configuration loader from CLI arguments
fn build_config_loader(cli: &Cli) -> CliConfigLoader {
    let mut loader = CliConfigLoader::new();

    if let Some(config_path) = &cli.config {
        loader = loader.with_config_override(config_path.clone());
    }

    if let Some(location) = &cli.initial_location {
        loader = loader.with_initial_location_override(location.clone());
    }

    if let Some(title) = &cli.title {
        loader = loader.with_title_override(title.clone());
    }

    loader
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    bx_core::init_tracing_with_debug(cli.verbose || cli.debug_output);

    // Build configuration loader
    let config_loader = build_config_loader(&cli);

    match cli.command {
        Some(Commands::Routes) => routes_command(config_loader).await,
        Some(Commands::Resolve { location, json }) => {
            resolve_command(config_loader, location, json).await
        }
        // Default to interactive mode
        None => interactive_command(config_loader, cli.debug_output).await,
    }
}
