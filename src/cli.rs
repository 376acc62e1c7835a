// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: Defines the deploy subcommand and global output flags.

use clap::{Parser, Subcommand};
use risr::output::OutputMode;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "risr")]
#[command(about = "Blue/green AMI rollouts for EC2 Auto Scaling groups")]
#[command(version)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputMode::Normal, global = true)]
    pub output: OutputMode,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Deploy a Stack definition (YAML or JSON) to AWS
    #[command(after_help = "Example:\n  risr deploy stack.yaml")]
    Deploy {
        /// Path to the Stack definition file
        filename: PathBuf,

        /// Give up if the new group isn't healthy after this many seconds
        #[arg(long, value_name = "SECONDS")]
        health_timeout: Option<u64>,
    },
}
