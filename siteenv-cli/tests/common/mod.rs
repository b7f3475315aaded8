//! Common test utilities for CLI integration tests.
//!
//! Each [`TestEnv`] owns a throwaway project directory laid out like a real
//! deployment (`<project>/web/sites/default`) and runs the binary against it
//! with a cleared process environment.

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated project directory plus the environment the binary sees.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Project root (parent of the application root)
    pub project_path: PathBuf,
    /// Application root passed as `--app-path`
    pub app_path: PathBuf,
    vars: Vec<(String, String)>,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment with an empty `default` site.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let project_path = temp_dir.path().to_path_buf();
        let app_path = project_path.join("web");
        fs::create_dir_all(app_path.join("sites").join("default"))
            .expect("Failed to create app directory");

        Self {
            temp_dir,
            project_path,
            app_path,
            vars: Vec::new(),
        }
    }

    /// Add an environment variable for every command run from this env.
    pub fn var(mut self, key: &str, value: &str) -> Self {
        self.vars.push((key.to_string(), value.to_string()));
        self
    }

    /// Add several environment variables.
    pub fn vars(mut self, pairs: &[(&str, &str)]) -> Self {
        for (key, value) in pairs {
            self.vars.push(((*key).to_string(), (*value).to_string()));
        }
        self
    }

    /// Get a bare command builder with a cleared environment.
    pub fn command_bare(&self) -> Command {
        let mut cmd = Command::cargo_bin("siteenv").expect("Failed to find siteenv binary");
        cmd.env_clear();
        cmd
    }

    /// Get a command builder with the environment and `--app-path` set.
    pub fn command(&self) -> Command {
        let mut cmd = self.command_bare();
        cmd.envs(self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        cmd.arg("--app-path").arg(&self.app_path);
        cmd
    }

    /// Get the project path.
    pub fn path(&self) -> &Path {
        &self.project_path
    }

    /// Write an override file under `sites/<site>/`.
    pub fn write_override(&self, site: &str, name: &str, contents: &str) -> PathBuf {
        let dir = self.app_path.join("sites").join(site);
        fs::create_dir_all(&dir).expect("Failed to create site directory");
        let path = dir.join(name);
        fs::write(&path, contents).expect("Failed to write override file");
        path
    }

    /// Write a file at the project root.
    pub fn write_project_file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.project_path.join(name);
        fs::write(&path, contents).expect("Failed to write project file");
        path
    }

    /// Run a command expected to succeed and return its stdout.
    pub fn stdout(&self, args: &[&str]) -> String {
        let output = self
            .command()
            .args(args)
            .output()
            .expect("Failed to run siteenv");

        assert!(
            output.status.success(),
            "siteenv {args:?} failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );

        String::from_utf8(output.stdout).expect("Invalid UTF-8 in output")
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
