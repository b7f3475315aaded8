//! Command to print trusted host patterns.

use crate::error::CliError;
use crate::utils::{build_resolver, GlobalOptions};
use clap::Args;
use siteenv::ExecutionContext;

/// Print the trusted host patterns, one per line.
#[derive(Args)]
pub struct TrustedHostsCommand {}

impl TrustedHostsCommand {
    /// Execute the trusted-hosts command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let resolver = build_resolver(global, ExecutionContext::Cli)?;
        for pattern in resolver.trusted_host_patterns() {
            println!("{pattern}");
        }
        Ok(())
    }
}
