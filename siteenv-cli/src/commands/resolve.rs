//! Command to print resolved configuration.

use crate::error::CliError;
use crate::utils::{build_resolver, emit, render, GlobalOptions, OutputFormat};
use clap::{Args, ValueEnum};
use siteenv::{ConfigKind, ExecutionContext};

/// Which tree to print.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TreeSelection {
    /// The settings tree.
    Settings,
    /// The database connections tree.
    Databases,
    /// The module configuration tree.
    Config,
}

impl From<TreeSelection> for ConfigKind {
    fn from(selection: TreeSelection) -> Self {
        match selection {
            TreeSelection::Settings => ConfigKind::Settings,
            TreeSelection::Databases => ConfigKind::Databases,
            TreeSelection::Config => ConfigKind::Config,
        }
    }
}

/// Print the resolved configuration trees.
#[derive(Args)]
pub struct ResolveCommand {
    /// Print a single tree instead of all three
    #[arg(long, value_enum)]
    pub only: Option<TreeSelection>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Yaml)]
    pub format: OutputFormat,
}

impl ResolveCommand {
    /// Execute the resolve command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let resolver = build_resolver(global, ExecutionContext::Cli)?;

        let output = match self.only.map(ConfigKind::from) {
            None => render(&resolver.resolve()?, self.format)?,
            Some(ConfigKind::Settings) => render(&resolver.settings()?, self.format)?,
            Some(ConfigKind::Databases) => render(&resolver.databases()?, self.format)?,
            Some(ConfigKind::Config) => render(&resolver.config()?, self.format)?,
        };

        emit(&output)
    }
}
