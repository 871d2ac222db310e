//! CLI command definitions and execution
//!
//! This module contains all CLI commands and their implementations.

use clap::{Parser, Subcommand};

use crate::exit_code::ExitCode;
use crate::output::OutputConfig;

mod completions;
mod config;
pub mod put;

/// bucketit - upload files to S3-compatible object storage
///
/// A simple tool for pushing local files (or whole directories) into a
/// bucket, with optional date and folder prefixes on the object keys.
#[derive(Parser, Debug)]
#[command(name = "bucketit")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format: human-readable or JSON
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    /// Disable colored output
    #[arg(long, global = true, default_value = "false")]
    pub no_color: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, default_value = "false")]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, global = true, default_value = "false")]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Upload a file or directory to a bucket
    Put(put::PutArgs),

    /// Manage the endpoint configuration
    #[command(subcommand)]
    Config(config::ConfigCommands),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Execute the CLI command and return an exit code
pub async fn execute(cli: Cli) -> ExitCode {
    let output_config = OutputConfig {
        json: cli.json,
        no_color: cli.no_color,
        quiet: cli.quiet,
    };

    match cli.command {
        Commands::Put(args) => put::execute(args, output_config).await,
        Commands::Config(cmd) => config::execute(cmd, output_config),
        Commands::Completions(args) => completions::execute(args),
    }
}
