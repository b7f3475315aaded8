//! Utility functions for CLI operations.
//!
//! Shared by every command: turning the global options into a [`Resolver`]
//! and rendering serializable results.

use crate::error::CliError;
use clap::ValueEnum;
use serde::Serialize;
use siteenv::{ExecutionContext, Resolver};
use std::io::{self, Write};
use std::path::PathBuf;

/// Global CLI options shared across all commands.
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Application root.
    pub app_path: PathBuf,

    /// Selected site.
    pub site: String,

    /// Application name for per-site variable namespacing.
    pub app_name: Option<String>,

    /// Skip `.env` loading.
    pub no_dotenv: bool,
}

/// Output format for structured results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// YAML document.
    #[default]
    Yaml,
    /// Pretty-printed JSON.
    Json,
}

/// Build a resolver from the global options.
///
/// The process environment is captured as-is; `.env` files in the project
/// directory are layered underneath it unless `--no-dotenv` was given.
///
/// # Errors
///
/// Returns `InvalidArguments` for a blank site or a missing application
/// directory, and propagates `.env` loading failures.
pub fn build_resolver(
    global: &GlobalOptions,
    context: ExecutionContext,
) -> Result<Resolver, CliError> {
    let site = global.site.trim();
    if site.is_empty() {
        return Err(CliError::InvalidArguments(
            "site name cannot be empty".to_string(),
        ));
    }
    if !global.app_path.is_dir() {
        return Err(CliError::InvalidArguments(format!(
            "application path {} is not a directory",
            global.app_path.display()
        )));
    }

    let resolver = Resolver::builder()
        .with_app_path(global.app_path.clone())
        .with_site_name(site)
        .with_app_name(global.app_name.clone())
        .with_context(context)
        .load_dotenv(!global.no_dotenv)
        .build()?;

    log::debug!(
        "Resolving site '{}' from {}",
        resolver.site_name(),
        resolver.app_path().display()
    );
    Ok(resolver)
}

/// Render a value in the requested format.
///
/// # Errors
///
/// Returns `Config` if the value cannot be serialized.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> Result<String, CliError> {
    match format {
        OutputFormat::Yaml => {
            serde_yaml::to_string(value).map_err(|e| CliError::Config(e.to_string()))
        }
        OutputFormat::Json => serde_json::to_string_pretty(value)
            .map(|mut s| {
                s.push('\n');
                s
            })
            .map_err(|e| CliError::Config(e.to_string())),
    }
}

/// Write rendered output to stdout.
///
/// # Errors
///
/// Returns `Io` if stdout is closed or cannot be written.
pub fn emit(output: &str) -> Result<(), CliError> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(output.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn options(app_path: PathBuf, site: &str) -> GlobalOptions {
        GlobalOptions {
            verbose: false,
            quiet: true,
            app_path,
            site: site.to_string(),
            app_name: None,
            no_dotenv: true,
        }
    }

    #[test]
    fn test_blank_site_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = build_resolver(&options(dir.path().to_path_buf(), "  "), ExecutionContext::Cli)
            .unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn test_missing_app_path_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = build_resolver(
            &options(dir.path().join("missing"), "default"),
            ExecutionContext::Cli,
        )
        .unwrap_err();
        assert!(matches!(err, CliError::InvalidArguments(_)));
    }

    #[test]
    fn test_site_is_trimmed() {
        let dir = tempfile::tempdir().unwrap();
        let resolver =
            build_resolver(&options(dir.path().to_path_buf(), " shop "), ExecutionContext::Cli)
                .unwrap();
        assert_eq!(resolver.site_name(), "shop");
    }

    #[test]
    fn test_render_formats() {
        let mut value = BTreeMap::new();
        value.insert("database", "app");

        let yaml = render(&value, OutputFormat::Yaml).unwrap();
        assert_eq!(yaml.trim(), "database: app");

        let json = render(&value, OutputFormat::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["database"], "app");
        assert!(json.ends_with('\n'));
    }
}
