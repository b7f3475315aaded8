//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{
    CheckHostCommand, CompletionsCommand, DatabaseNameCommand, ResolveCommand, SitesCommand,
    TrustedHostsCommand, ValidateCommand,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line tool for resolving multi-site deployment configuration.
#[derive(Parser)]
#[command(name = "siteenv")]
#[command(
    version,
    about = "Resolve multi-site deployment configuration",
    long_about = None
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Application root (the directory containing `sites/`)
    #[arg(
        long,
        value_name = "PATH",
        global = true,
        env = "SITEENV_APP_PATH",
        default_value = "."
    )]
    pub app_path: PathBuf,

    /// Site to resolve
    #[arg(
        long,
        value_name = "NAME",
        global = true,
        env = "SITEENV_SITE",
        default_value = "default"
    )]
    pub site: String,

    /// Application name used to namespace per-site variables
    #[arg(long, value_name = "NAME", global = true, env = "SITEENV_APP_NAME")]
    pub app_name: Option<String>,

    /// Do not read `.env` files from the project directory
    #[arg(long, global = true)]
    pub no_dotenv: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Print the resolved configuration trees
    Resolve(ResolveCommand),

    /// Print the site map
    Sites(SitesCommand),

    /// Print the trusted host patterns, one per line
    TrustedHosts(TrustedHostsCommand),

    /// Print the active database name
    DatabaseName(DatabaseNameCommand),

    /// Check a Host header against the server gate
    CheckHost(CheckHostCommand),

    /// Resolve and validate the configuration trees
    Validate(ValidateCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}
