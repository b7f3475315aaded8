//! Command to run the server gate for a Host header.
//!
//! Prints the status line a front controller would answer with. Anything
//! other than `200 OK` exits nonzero.

use crate::error::CliError;
use crate::utils::{build_resolver, GlobalOptions};
use clap::Args;
use siteenv::ExecutionContext;

/// Check a Host header against the server gate.
#[derive(Args)]
pub struct CheckHostCommand {
    /// Value of the Host header (port allowed)
    #[arg(value_name = "HOST")]
    pub host: String,
}

fn reason_phrase(status: u16) -> &'static str {
    match status {
        200 => "OK",
        400 => "Bad Request",
        401 => "Unauthorized",
        _ => "Internal Server Error",
    }
}

impl CheckHostCommand {
    /// Execute the check-host command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let resolver = build_resolver(global, ExecutionContext::Server)?;

        match resolver.authorize_request(&self.host) {
            Ok(()) => {
                println!("HTTP/1.1 200 {}", reason_phrase(200));
                if !global.quiet {
                    eprintln!(
                        "Serving site '{}' from database '{}'",
                        resolver.site_name(),
                        resolver.database_name()?
                    );
                }
                Ok(())
            }
            Err(e) => {
                let status = e.http_status();
                println!("HTTP/1.1 {status} {}", reason_phrase(status));
                Err(e.into())
            }
        }
    }
}
