//! CLI command definitions.

use clap::{Parser, Subcommand};
use gili_core::AgeLevel;
use std::path::PathBuf;

/// gili-worker - evaluate student stories from a queue
#[derive(Parser, Debug)]
#[command(name = "gili-worker")]
#[command(about = "Evaluate student stories from a queue and track skill progress", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (replaces ./gili.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Emit JSON-formatted logs
    #[arg(long, global = true)]
    pub json_logs: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Consume the work queue until interrupted
    Run,

    /// Evaluate a local story file and print the result as JSON
    Evaluate {
        /// Path to the story text
        #[arg(long)]
        file: PathBuf,

        /// Author's age band (primary, middle, secondary, tertiary or sd/smp/sma/kuliah)
        #[arg(long, default_value = "primary")]
        age_level: AgeLevel,

        /// Prompt title the story answers
        #[arg(long)]
        title: Option<String>,
    },
}
