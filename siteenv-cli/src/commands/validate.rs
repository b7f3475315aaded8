//! Command to resolve and validate the configuration trees.

use crate::error::CliError;
use crate::utils::{build_resolver, GlobalOptions};
use clap::Args;
use siteenv::{ExecutionContext, TreeValidator};

/// Resolve and validate the configuration trees.
#[derive(Args)]
pub struct ValidateCommand {}

impl ValidateCommand {
    /// Execute the validate command.
    ///
    /// Resolution failures keep their own exit codes. A resolved tree that
    /// breaks a structural invariant is a semantic failure.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let resolver = build_resolver(global, ExecutionContext::Cli)?;
        let resolved = resolver.resolve()?;

        if let Err(e) = TreeValidator::validate(&resolved) {
            return Err(CliError::SemanticFailure(format!(
                "Configuration is invalid: {e}"
            )));
        }

        if !global.quiet {
            println!("Configuration is valid");
        }
        Ok(())
    }
}
