//! Common test utilities for integration tests.
//!
//! This module provides a throwaway project layout (`{project}/web` as the
//! application root) with helpers for writing override and `.env` files.

use std::fs;
use std::path::{Path, PathBuf};

use siteenv::env::Environment;
use siteenv::{Resolver, ResolverBuilder};
use tempfile::TempDir;

/// A temporary project with a `web/` application root.
pub struct TestProject {
    dir: TempDir,
}

#[allow(dead_code)]
impl TestProject {
    /// Creates an empty project.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("web").join("sites").join("default")).unwrap();
        Self { dir }
    }

    /// The project root.
    pub fn project_path(&self) -> &Path {
        self.dir.path()
    }

    /// The application root.
    pub fn app_path(&self) -> PathBuf {
        self.dir.path().join("web")
    }

    /// Writes `web/sites/{site}/{name}`.
    pub fn write_override(&self, site: &str, name: &str, contents: &str) -> PathBuf {
        let dir = self.app_path().join("sites").join(site);
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    /// Writes a file at the project root.
    pub fn write_project_file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.project_path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    /// A builder rooted at this project with an explicit environment.
    pub fn builder(&self, pairs: &[(&str, &str)]) -> ResolverBuilder {
        Resolver::builder()
            .with_app_path(self.app_path())
            .with_environment(Environment::from_pairs(pairs.iter().copied()))
    }

    /// A resolver for the default site.
    pub fn resolver(&self, pairs: &[(&str, &str)]) -> Resolver {
        self.builder(pairs).build().unwrap()
    }
}
