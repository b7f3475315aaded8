//! Command to print the site map.

use crate::error::CliError;
use crate::utils::{build_resolver, emit, render, GlobalOptions, OutputFormat};
use clap::Args;
use serde::Serialize;
use siteenv::{ExecutionContext, SiteMap};

/// Print the site map.
#[derive(Args)]
pub struct SitesCommand {
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Yaml)]
    pub format: OutputFormat,
}

#[derive(Serialize)]
struct SitesReport<'a> {
    multi_site: bool,
    default_site_allowed: bool,
    domains: &'a [String],
    site_names: &'a [String],
    sites: &'a SiteMap,
}

impl SitesCommand {
    /// Execute the sites command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let resolver = build_resolver(global, ExecutionContext::Cli)?;
        let topology = resolver.topology();

        let report = SitesReport {
            multi_site: topology.is_multi_site(),
            default_site_allowed: resolver.is_multi_site_default_site_allowed(),
            domains: topology.domains(),
            site_names: topology.site_names(),
            sites: topology.sites(),
        };

        emit(&render(&report, self.format)?)
    }
}
