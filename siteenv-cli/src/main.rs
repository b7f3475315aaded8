//! Main entry point for the siteenv CLI.
//!
//! This is the command-line interface for the siteenv configuration resolver.
//! It provides commands for inspecting a deployment:
//! - `resolve`: Print the resolved settings, databases and module config
//! - `sites`: Print the site map
//! - `trusted-hosts`: Print the trusted host patterns
//! - `database-name`: Print the active database name
//! - `check-host`: Run the server gate for a Host header
//! - `validate`: Resolve and check tree invariants

use clap::Parser;
use siteenv_cli::cli::{Cli, Command};
use siteenv_cli::utils::GlobalOptions;

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let _log_level = siteenv::init_logger(cli.verbose, cli.quiet);

    let global = GlobalOptions {
        verbose: cli.verbose,
        quiet: cli.quiet,
        app_path: cli.app_path,
        site: cli.site,
        app_name: cli.app_name,
        no_dotenv: cli.no_dotenv,
    };

    let result = match cli.command {
        Command::Resolve(cmd) => cmd.execute(&global),
        Command::Sites(cmd) => cmd.execute(&global),
        Command::TrustedHosts(cmd) => cmd.execute(&global),
        Command::DatabaseName(cmd) => cmd.execute(&global),
        Command::CheckHost(cmd) => cmd.execute(&global),
        Command::Validate(cmd) => cmd.execute(&global),
        Command::Completions(cmd) => cmd.execute(&global),
    };

    // Handle errors and set exit code
    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
