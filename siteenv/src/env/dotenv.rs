//! `.env` file bootstrap.
//!
//! Reads the project's `.env` family of files into an [`Environment`]
//! snapshot without touching the process environment. Variables already
//! present in the base snapshot always win over file values, and later files
//! win over earlier ones.
//!
//! File order when `.env` or `.env.dist` exists:
//!
//! 1. `.env` (or `.env.dist` when `.env` is absent)
//! 2. `.env.local` (skipped for the `test` environment)
//! 3. `.env.{APP_ENV}`
//! 4. `.env.{APP_ENV}.local`
//!
//! `APP_ENV` is read again after step 2, so `.env.local` can select the
//! environment. The `local` environment stops after step 2.
//!
//! `APP_ENV` defaults to `dev` when none of the above define it. A project
//! that only ships `.env.dev` runs as `dev` and loads just that file.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::Environment;
use crate::error::{Error, Result};

const APP_ENV: &str = "APP_ENV";
const DEFAULT_ENV_NAME: &str = "dev";

/// Loads `.env` files from a project directory.
///
/// # Examples
///
/// ```no_run
/// use siteenv::env::{dotenv::DotenvLoader, Environment};
/// use std::path::Path;
///
/// let env = DotenvLoader::new(Path::new("/srv/app"))
///     .load(Environment::from_process())
///     .unwrap();
/// println!("APP_ENV={:?}", env.var("APP_ENV"));
/// ```
#[derive(Debug, Clone)]
pub struct DotenvLoader {
    project_path: PathBuf,
}

impl DotenvLoader {
    /// Creates a loader for the given project directory.
    #[must_use]
    pub fn new(project_path: &Path) -> Self {
        Self {
            project_path: project_path.to_path_buf(),
        }
    }

    /// Layer the project's `.env` files under `base`.
    ///
    /// When `base` already defines `APP_ENV` no file is read.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EnvFile`] if a file exists but cannot be parsed.
    pub fn load(&self, base: Environment) -> Result<Environment> {
        if base.contains(APP_ENV) {
            return Ok(base);
        }

        let dotenv = self.project_path.join(".env");
        let dist = self.project_path.join(".env.dist");
        let dev_only = self.project_path.join(".env.dev");

        let mut file_vars = HashMap::new();
        let mut result = base;

        if dotenv.exists() || dist.exists() {
            let primary = if dotenv.exists() { dotenv } else { dist };
            Self::read_into(&primary, &mut file_vars)?;

            let env_name = file_vars
                .entry(APP_ENV.to_string())
                .or_insert_with(|| DEFAULT_ENV_NAME.to_string())
                .clone();

            let local = self.project_path.join(".env.local");
            if env_name != "test" && local.exists() {
                Self::read_into(&local, &mut file_vars)?;
            }

            // `.env.local` may switch the environment
            let env_name = file_vars
                .get(APP_ENV)
                .cloned()
                .unwrap_or(env_name);

            if env_name != "local" {
                for path in [
                    self.project_path.join(format!(".env.{env_name}")),
                    self.project_path.join(format!(".env.{env_name}.local")),
                ] {
                    if path.exists() {
                        Self::read_into(&path, &mut file_vars)?;
                    }
                }
            }
        } else if dev_only.exists() {
            result.insert_missing(APP_ENV.to_string(), DEFAULT_ENV_NAME.to_string());
            Self::read_into(&dev_only, &mut file_vars)?;
        } else {
            log::debug!(
                "No .env files found in {}, using process environment only",
                self.project_path.display()
            );
        }

        for (key, value) in file_vars {
            result.insert_missing(key, value);
        }

        Ok(result)
    }

    fn read_into(path: &Path, vars: &mut HashMap<String, String>) -> Result<()> {
        log::debug!("Loading environment file {}", path.display());

        let iter = dotenvy::from_path_iter(path).map_err(|e| Error::EnvFile {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        for item in iter {
            let (key, value) = item.map_err(|e| Error::EnvFile {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
            vars.insert(key, value);
        }

        Ok(())
    }
}
