//! Build script for siteenv-cli.
//!
//! Generates the `siteenv.1` man page into `OUT_DIR/man` with clap_mangen.
//! Build scripts cannot depend on the crate being built, so the command
//! structure is declared here separately.

use clap::{Arg, ArgAction, Command};
use clap_mangen::Man;
use std::fs;
use std::io;
use std::path::PathBuf;

/// Build the CLI command structure for man page generation.
///
/// Keep in sync with src/cli.rs.
fn build_cli() -> Command {
    Command::new("siteenv")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Resolve multi-site deployment configuration")
        .long_about(
            "Resolve settings, database connections and module configuration for one site \
             of a multi-site deployment from environment variables and override files",
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("app-path")
                .long("app-path")
                .help("Application root (the directory containing sites/)")
                .value_name("PATH")
                .global(true)
                .env("SITEENV_APP_PATH"),
        )
        .arg(
            Arg::new("site")
                .long("site")
                .help("Site to resolve")
                .value_name("NAME")
                .global(true)
                .env("SITEENV_SITE"),
        )
        .arg(
            Arg::new("app-name")
                .long("app-name")
                .help("Application name used to namespace per-site variables")
                .value_name("NAME")
                .global(true)
                .env("SITEENV_APP_NAME"),
        )
        .arg(
            Arg::new("no-dotenv")
                .long("no-dotenv")
                .help("Do not read .env files from the project directory")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .subcommands(vec![
            Command::new("resolve")
                .about("Print the resolved configuration trees")
                .long_about("Print settings, databases and module configuration as YAML or JSON"),
            Command::new("sites")
                .about("Print the site map")
                .long_about("Print declared domains, site names and the site key mapping"),
            Command::new("trusted-hosts")
                .about("Print the trusted host patterns, one per line"),
            Command::new("database-name")
                .about("Print the active database name")
                .long_about("Derive the database name from DATABASE_URL and the selected site"),
            Command::new("check-host")
                .about("Check a Host header against the server gate")
                .long_about("Print the HTTP status line a front controller would answer with"),
            Command::new("validate")
                .about("Resolve and validate the configuration trees"),
            Command::new("completions")
                .about("Generate shell completion scripts")
                .long_about("Generate shell completion scripts for bash, zsh, fish, or PowerShell"),
        ])
}

fn main() -> io::Result<()> {
    let out_dir = PathBuf::from(
        std::env::var_os("OUT_DIR").ok_or_else(|| io::Error::other("OUT_DIR is not set"))?,
    );
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir)?;

    let mut buffer = Vec::new();
    Man::new(build_cli()).render(&mut buffer)?;
    fs::write(man_dir.join("siteenv.1"), buffer)?;

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
    Ok(())
}
