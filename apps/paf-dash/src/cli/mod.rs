//! # Dashboard CLI Module
//!
//! This module implements the CLI interface for the dashboard.
//!
//! ## Available Commands
//!
//! - `serve` - Start the HTTP server (default when no command is given)
//! - `summary` - Show dataset summary
//! - `risks` - List risk options
//! - `causes` - List outcome options for a risk
//! - `figure` - Write the plotly figure JSON for one panel

mod commands;

use crate::config::Config;
use clap::{Parser, Subcommand};
use paf_core::{Dataset, PafError, Sex};
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Ensemble vs. Submission PAF Comparison
///
/// Serves an interactive scatter-plot dashboard over a precomputed table
/// of population attributable fractions.
#[derive(Parser, Debug)]
#[command(name = "paf-dash")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to the comparison CSV (overrides the config file)
    #[arg(short, long, global = true)]
    pub data: Option<PathBuf>,

    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start HTTP server
    Serve {
        /// Host to bind to
        #[arg(short = 'H', long)]
        host: Option<String>,

        /// Port to bind to
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Show dataset summary
    Summary,

    /// List risk options
    Risks,

    /// List outcome options for a risk
    Causes {
        /// Risk name
        #[arg(short, long)]
        risk: String,
    },

    /// Write the figure JSON for one panel
    Figure {
        /// Risk name
        #[arg(short, long)]
        risk: String,

        /// Outcome name
        #[arg(short = 'C', long)]
        cause: String,

        /// Panel sex (male, female)
        #[arg(short, long)]
        sex: Sex,

        /// Output file path (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub async fn execute(cli: Cli) -> Result<(), PafError> {
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(data) = cli.data {
        config.data.path = data;
    }
    let json_mode = cli.json_mode;

    let dataset = Dataset::load(&config.data.path)?;

    match cli.command {
        Some(Commands::Serve { host, port }) => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            cmd_serve(dataset, &config).await
        }
        None => cmd_serve(dataset, &config).await,
        Some(Commands::Summary) => cmd_summary(&dataset, json_mode),
        Some(Commands::Risks) => cmd_risks(&dataset, &config.defaults, json_mode),
        Some(Commands::Causes { risk }) => cmd_causes(&dataset, &risk, json_mode),
        Some(Commands::Figure {
            risk,
            cause,
            sex,
            output,
        }) => cmd_figure(
            &dataset,
            &config.defaults,
            &risk,
            &cause,
            sex,
            output.as_deref(),
        ),
    }
}

// =============================================================================
// TESTS
// =============================================================================
