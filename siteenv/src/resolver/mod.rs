//! The configuration resolver.
//!
//! A [`Resolver`] owns an environment snapshot and the override layers for
//! one application root, and produces the settings, databases and module
//! configuration trees for the selected site.
//!
//! # Examples
//!
//! ```
//! use siteenv::env::Environment;
//! use siteenv::Resolver;
//!
//! let resolver = Resolver::builder()
//!     .with_app_path("/srv/project/web")
//!     .with_environment(Environment::from_pairs([
//!         ("APP_ENV", "dev"),
//!         ("DATABASE_URL", "mysql://user:password@db:3306/drupal"),
//!     ]))
//!     .build()
//!     .unwrap();
//!
//! let resolved = resolver.resolve().unwrap();
//! assert_eq!(
//!     resolved.settings.get("hash_salt").and_then(|v| v.as_str()),
//!     Some("foo"),
//! );
//! assert_eq!(resolver.database_name().unwrap(), "drupal");
//! ```

mod databases;
mod modules;
mod settings;

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::database::resolve_database_name;
use crate::env::dotenv::DotenvLoader;
use crate::env::{Environment, ScopedEnv};
use crate::error::{Error, ExecutionContext, Result};
use crate::overrides::{ConfigKind, LayerSlot, OverrideContext, OverrideHook, OverrideLayers};
use crate::topology::{SiteMap, Topology, DEFAULT_SITE};
use crate::trusted_hosts::TrustedHosts;
use crate::tree::Tree;

/// A lower-cased deployment tier name such as `dev` or `prod`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EnvironmentName(String);

impl EnvironmentName {
    /// Normalizes a raw `APP_ENV` value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingEnvironmentName`] for a blank value.
    pub fn parse(raw: &str) -> Result<Self> {
        let name = raw.trim();
        if name.is_empty() {
            return Err(Error::MissingEnvironmentName);
        }
        Ok(Self(name.to_lowercase()))
    }

    /// The name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is the development tier.
    #[must_use]
    pub fn is_dev(&self) -> bool {
        self.0 == "dev"
    }
}

impl fmt::Display for EnvironmentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The three trees handed to the host application.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ResolvedConfig {
    /// Application settings.
    pub settings: Tree,
    /// Datastore connections keyed by connection then shard.
    pub databases: Tree,
    /// Module configuration keyed by module identifier.
    pub config: Tree,
}

/// Resolves deployment configuration for one site.
#[derive(Debug)]
pub struct Resolver {
    env: Environment,
    app_path: PathBuf,
    site_name: String,
    app_name: Option<String>,
    context: ExecutionContext,
    database_name: Option<String>,
    overrides: OverrideLayers,
}

impl Resolver {
    /// Starts configuring a resolver.
    #[must_use]
    pub fn builder() -> ResolverBuilder {
        ResolverBuilder::new()
    }

    pub(crate) fn scoped(&self) -> ScopedEnv<'_> {
        self.env.scoped(self.app_name.as_deref(), &self.site_name)
    }

    /// The environment snapshot in use.
    #[must_use]
    pub const fn environment(&self) -> &Environment {
        &self.env
    }

    /// Where the resolver is running.
    #[must_use]
    pub const fn context(&self) -> ExecutionContext {
        self.context
    }

    /// The active environment name, lower-cased.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingEnvironmentName`] if `APP_ENV` is absent or
    /// blank.
    pub fn environment_name(&self) -> Result<EnvironmentName> {
        let raw = self
            .scoped()
            .get("APP_ENV")
            .ok_or(Error::MissingEnvironmentName)?;
        EnvironmentName::parse(&raw)
    }

    /// The selected site.
    #[must_use]
    pub fn site_name(&self) -> &str {
        &self.site_name
    }

    /// Selects another site.
    pub fn set_site_name(&mut self, site_name: impl Into<String>) {
        self.site_name = site_name.into();
    }

    /// The optional application name used for namespaced lookups.
    #[must_use]
    pub fn app_name(&self) -> Option<&str> {
        self.app_name.as_deref()
    }

    /// The site topology for the current environment.
    #[must_use]
    pub fn topology(&self) -> Topology {
        Topology::from_env(&self.scoped())
    }

    /// The declared domains.
    #[must_use]
    pub fn domains(&self) -> Vec<String> {
        self.topology().domains().to_vec()
    }

    /// The site map.
    #[must_use]
    pub fn sites(&self) -> SiteMap {
        self.topology().sites().clone()
    }

    /// Whether more than one site key is served.
    #[must_use]
    pub fn is_multi_site(&self) -> bool {
        self.topology().is_multi_site()
    }

    /// Whether the `default` site is allowed in multi-site mode.
    #[must_use]
    pub fn is_multi_site_default_site_allowed(&self) -> bool {
        self.scoped().get_flag("MULTISITE_DEFAULT_SITE_ALLOWED")
    }

    /// The trusted host patterns for the current environment.
    ///
    /// A set `TRUSTED_HOST_PATTERNS` is split on commas and each entry is
    /// wrapped as is, without trimming or removing duplicates. In the
    /// `dev` environment a `VIRTUAL_HOST` value is appended as is.
    #[must_use]
    pub fn trusted_hosts(&self) -> TrustedHosts {
        let env = self.scoped();
        let mut hosts = match env.get("TRUSTED_HOST_PATTERNS") {
            Some(value) => {
                let entries: Vec<String> = value.split(',').map(str::to_string).collect();
                TrustedHosts::explicit(&entries)
            }
            None => {
                TrustedHosts::generate(&self.topology(), self.is_multi_site_default_site_allowed())
            }
        };

        let is_dev = self.environment_name().is_ok_and(|name| name.is_dev());
        if is_dev {
            if let Some(virtual_host) = env.get("VIRTUAL_HOST") {
                hosts.push_raw(virtual_host);
            }
        }

        hosts
    }

    /// The trusted host patterns as strings.
    #[must_use]
    pub fn trusted_host_patterns(&self) -> Vec<String> {
        self.trusted_hosts().into_patterns()
    }

    /// The active database name.
    ///
    /// An explicit name from [`Resolver::set_database_name`] wins; otherwise
    /// the name is derived from `DATABASE_URL`.
    ///
    /// # Errors
    ///
    /// - [`Error::MissingVariable`] if `DATABASE_URL` is not set
    /// - [`Error::MalformedPrimaryDatastoreUrl`] if it cannot be parsed
    /// - [`Error::ConfigurationDenied`] if the default-site guard trips
    /// - [`Error::UnresolvableDatabaseName`] if no usable name remains
    pub fn database_name(&self) -> Result<String> {
        self.database_name_in(self.context)
    }

    fn database_name_in(&self, context: ExecutionContext) -> Result<String> {
        if let Some(name) = &self.database_name {
            return Ok(name.clone());
        }
        let url = self.scoped().require("DATABASE_URL")?;
        resolve_database_name(
            &url,
            &self.site_name,
            self.is_multi_site_default_site_allowed(),
            context,
        )
    }

    /// Pins the database name, bypassing derivation.
    pub fn set_database_name(&mut self, database_name: impl Into<String>) {
        self.database_name = Some(database_name.into());
    }

    /// Resolves all three trees.
    ///
    /// # Errors
    ///
    /// Returns the first error from building any tree.
    pub fn resolve(&self) -> Result<ResolvedConfig> {
        Ok(ResolvedConfig {
            settings: self.settings()?,
            databases: self.databases()?,
            config: self.config()?,
        })
    }

    /// Checks an incoming request as a server entry point would.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UntrustedHost`] (HTTP 400) if `host` matches no
    /// trusted pattern, or [`Error::ConfigurationDenied`] (HTTP 401) if the
    /// default-site guard trips.
    pub fn authorize_request(&self, host: &str) -> Result<()> {
        if !self.trusted_hosts().is_trusted(host)? {
            log::warn!("Rejected request for untrusted host {host}");
            return Err(Error::UntrustedHost {
                host: host.to_string(),
            });
        }
        self.database_name_in(ExecutionContext::Server)?;
        Ok(())
    }

    /// The application root.
    #[must_use]
    pub fn app_path(&self) -> &Path {
        &self.app_path
    }

    /// The project root, one level above the application root.
    #[must_use]
    pub fn project_path(&self) -> PathBuf {
        project_path_of(&self.app_path)
    }

    /// Public files directory, relative to the application root by default.
    #[must_use]
    pub fn public_file_path(&self) -> String {
        self.scoped()
            .get("FILE_PUBLIC_PATH")
            .unwrap_or_else(|| format!("sites/{}/files", self.site_name))
    }

    /// Private files directory.
    #[must_use]
    pub fn private_file_path(&self) -> String {
        self.path_or_project_default("FILE_PRIVATE_PATH", &["drupal", "private_files"])
    }

    /// Temporary files directory.
    #[must_use]
    pub fn temporary_file_path(&self) -> String {
        self.path_or_project_default("FILE_TEMP_PATH", &["drupal", "temporary_files"])
    }

    /// Configuration sync directory.
    #[must_use]
    pub fn config_sync_path(&self) -> String {
        self.path_or_project_default("CONFIG_SYNC_PATH", &["drupal", "config", "sync"])
    }

    fn path_or_project_default(&self, key: &str, segments: &[&str]) -> String {
        self.scoped().get(key).unwrap_or_else(|| {
            let mut path = self.project_path();
            path.extend(segments);
            path.display().to_string()
        })
    }

    pub(crate) fn apply_overrides(&self, tree: &mut Tree, kind: ConfigKind) -> Result<()> {
        let env_name = self.environment_name()?;
        self.overrides
            .apply(tree, kind, &self.site_name, env_name.as_str())
    }
}

fn project_path_of(app_path: &Path) -> PathBuf {
    match app_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Configures a [`Resolver`].
pub struct ResolverBuilder {
    app_path: PathBuf,
    site_name: String,
    app_name: Option<String>,
    context: ExecutionContext,
    environment: Option<Environment>,
    load_dotenv: bool,
    database_name: Option<String>,
    overrides: Vec<(ConfigKind, LayerSlot, OverrideHook)>,
}

impl fmt::Debug for ResolverBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolverBuilder")
            .field("app_path", &self.app_path)
            .field("site_name", &self.site_name)
            .field("app_name", &self.app_name)
            .field("context", &self.context)
            .field("load_dotenv", &self.load_dotenv)
            .field("hooks", &self.overrides.len())
            .finish_non_exhaustive()
    }
}

impl Default for ResolverBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ResolverBuilder {
    /// Create a new builder with default settings.
    ///
    /// Defaults: application root `.`, site `default`, CLI context, process
    /// environment, no `.env` loading.
    #[must_use]
    pub fn new() -> Self {
        Self {
            app_path: PathBuf::from("."),
            site_name: DEFAULT_SITE.to_string(),
            app_name: None,
            context: ExecutionContext::Cli,
            environment: None,
            load_dotenv: false,
            database_name: None,
            overrides: Vec::new(),
        }
    }

    /// Set the application root.
    #[must_use]
    pub fn with_app_path(mut self, app_path: impl Into<PathBuf>) -> Self {
        self.app_path = app_path.into();
        self
    }

    /// Select the site.
    #[must_use]
    pub fn with_site_name(mut self, site_name: impl Into<String>) -> Self {
        self.site_name = site_name.into();
        self
    }

    /// Set the application name used for namespaced lookups.
    #[must_use]
    pub fn with_app_name(mut self, app_name: Option<String>) -> Self {
        self.app_name = app_name.filter(|name| !name.trim().is_empty());
        self
    }

    /// Set the execution context.
    #[must_use]
    pub const fn with_context(mut self, context: ExecutionContext) -> Self {
        self.context = context;
        self
    }

    /// Use an explicit environment snapshot instead of the process
    /// environment.
    #[must_use]
    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = Some(environment);
        self
    }

    /// Whether to layer the project's `.env` files under the snapshot.
    #[must_use]
    pub const fn load_dotenv(mut self, load: bool) -> Self {
        self.load_dotenv = load;
        self
    }

    /// Pin the database name.
    #[must_use]
    pub fn with_database_name(mut self, database_name: impl Into<String>) -> Self {
        self.database_name = Some(database_name.into());
        self
    }

    /// Register an in-process override layer.
    #[must_use]
    pub fn with_hook<F>(mut self, kind: ConfigKind, slot: LayerSlot, hook: F) -> Self
    where
        F: Fn(&mut Tree, &OverrideContext<'_>) -> Result<()> + Send + Sync + 'static,
    {
        self.overrides.push((kind, slot, Box::new(hook)));
        self
    }

    /// Build the resolver.
    ///
    /// # Errors
    ///
    /// Returns an error if `.env` loading is enabled and a file cannot be
    /// parsed.
    pub fn build(self) -> Result<Resolver> {
        let mut env = self.environment.unwrap_or_else(Environment::from_process);
        if self.load_dotenv {
            env = DotenvLoader::new(&project_path_of(&self.app_path)).load(env)?;
        }

        let mut overrides = OverrideLayers::new(self.app_path.clone());
        for (kind, slot, hook) in self.overrides {
            overrides.register_boxed(kind, slot, hook);
        }

        log::debug!(
            "Resolver for site '{}' at {} ({} context)",
            self.site_name,
            self.app_path.display(),
            self.context
        );

        Ok(Resolver {
            env,
            app_path: self.app_path,
            site_name: self.site_name,
            app_name: self.app_name,
            context: self.context,
            database_name: self.database_name,
            overrides,
        })
    }
}
