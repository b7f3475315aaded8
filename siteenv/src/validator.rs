//! Resolved tree validation.
//!
//! Checks the structural invariants the host application depends on. Values
//! are not checked for semantic usability.

use crate::database::DatabaseConnection;
use crate::error::{Error, Result};
use crate::resolver::ResolvedConfig;
use crate::tree::{Tree, Value};

/// Settings keys that must always be present as strings.
pub const REQUIRED_SETTINGS: [&str; 3] = [
    "config_sync_directory",
    "file_public_path",
    "file_private_path",
];

/// Validates resolved trees.
///
/// # Examples
///
/// ```
/// use siteenv::tree::Tree;
/// use siteenv::TreeValidator;
///
/// let mut settings = Tree::new();
/// settings.insert("config_sync_directory", "../drupal/config/sync");
/// settings.insert("file_public_path", "sites/default/files");
/// settings.insert("file_private_path", "../drupal/private_files");
/// settings.insert("trusted_host_patterns", vec!["^example\\.com$"]);
/// TreeValidator::validate_settings(&settings).unwrap();
/// ```
pub struct TreeValidator;

impl TreeValidator {
    /// Validate all three trees.
    ///
    /// # Errors
    ///
    /// Returns the first validation error found.
    pub fn validate(resolved: &ResolvedConfig) -> Result<()> {
        Self::validate_settings(&resolved.settings)?;
        Self::validate_databases(&resolved.databases)?;
        Self::validate_config(&resolved.config)
    }

    /// Validate the settings tree.
    ///
    /// # Errors
    ///
    /// Returns a validation error if a required path is missing or not a
    /// string, or if `trusted_host_patterns` is not a list of strings.
    pub fn validate_settings(settings: &Tree) -> Result<()> {
        for key in REQUIRED_SETTINGS {
            match settings.get(key) {
                Some(Value::String(s)) if !s.trim().is_empty() => {}
                Some(Value::String(_)) => {
                    return Err(Error::Validation {
                        field: key.into(),
                        message: "Cannot be empty or only whitespace".into(),
                    })
                }
                Some(other) => {
                    return Err(Error::Validation {
                        field: key.into(),
                        message: format!("expected string, found {}", other.type_name()),
                    })
                }
                None => {
                    return Err(Error::Validation {
                        field: key.into(),
                        message: "required setting is missing".into(),
                    })
                }
            }
        }

        if let Some(patterns) = settings.get("trusted_host_patterns") {
            let list = patterns.as_list().ok_or_else(|| Error::Validation {
                field: "trusted_host_patterns".into(),
                message: format!("expected list, found {}", patterns.type_name()),
            })?;
            for (idx, pattern) in list.iter().enumerate() {
                if pattern.as_str().is_none() {
                    return Err(Error::Validation {
                        field: format!("trusted_host_patterns[{idx}]"),
                        message: format!("expected string, found {}", pattern.type_name()),
                    });
                }
            }
        }

        Ok(())
    }

    /// Validate the databases tree.
    ///
    /// Every `connection.shard` entry must be a map with a string `database`
    /// and a string `driver`.
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the offending shard.
    pub fn validate_databases(databases: &Tree) -> Result<()> {
        for (connection, shards) in databases.iter() {
            let shards = shards.as_map().ok_or_else(|| Error::Validation {
                field: connection.clone(),
                message: format!("expected map of shards, found {}", shards.type_name()),
            })?;
            for (shard, value) in shards.iter() {
                let field = format!("{connection}.{shard}");
                let tree = value.as_map().ok_or_else(|| Error::Validation {
                    field: field.clone(),
                    message: format!("expected map, found {}", value.type_name()),
                })?;
                let parsed = DatabaseConnection::from_tree(&field, tree)?;
                if parsed.driver.is_none() {
                    return Err(Error::Validation {
                        field: format!("{field}.driver"),
                        message: "driver is required".into(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Validate the module configuration tree.
    ///
    /// Each top-level entry must be a map keyed by the module's setting
    /// names.
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the offending module key.
    pub fn validate_config(config: &Tree) -> Result<()> {
        for (module, value) in config.iter() {
            if value.as_map().is_none() {
                return Err(Error::Validation {
                    field: module.clone(),
                    message: format!("expected map, found {}", value.type_name()),
                });
            }
        }
        Ok(())
    }
}
