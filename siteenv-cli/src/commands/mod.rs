//! CLI command implementations.
//!
//! This module contains the implementations of all CLI commands:
//! - `resolve`: Print the resolved configuration trees
//! - `sites`: Print the site map
//! - `trusted_hosts`: Print trusted host patterns
//! - `database_name`: Print the active database name
//! - `check_host`: Run the server gate for a Host header
//! - `validate`: Resolve and validate the trees
//! - `completions`: Generate shell completion scripts

pub mod check_host;
pub mod completions;
pub mod database_name;
pub mod resolve;
pub mod sites;
pub mod trusted_hosts;
pub mod validate;

pub use check_host::CheckHostCommand;
pub use completions::CompletionsCommand;
pub use database_name::DatabaseNameCommand;
pub use resolve::ResolveCommand;
pub use sites::SitesCommand;
pub use trusted_hosts::TrustedHostsCommand;
pub use validate::ValidateCommand;
