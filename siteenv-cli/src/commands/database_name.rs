//! Command to print the active database name.

use crate::error::CliError;
use crate::utils::{build_resolver, GlobalOptions};
use clap::Args;
use siteenv::ExecutionContext;

/// Print the active database name.
#[derive(Args)]
pub struct DatabaseNameCommand {
    /// Use this name instead of deriving one from DATABASE_URL
    #[arg(long, value_name = "NAME")]
    pub database: Option<String>,
}

impl DatabaseNameCommand {
    /// Execute the database-name command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let mut resolver = build_resolver(global, ExecutionContext::Cli)?;
        if let Some(name) = self.database {
            resolver.set_database_name(name);
        }
        println!("{}", resolver.database_name()?);
        Ok(())
    }
}
