//! Override patch file loading.

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::tree::{Tree, Value};

/// Loads YAML override patches.
///
/// # Examples
///
/// ```no_run
/// use siteenv::overrides::PatchLoader;
/// use std::path::Path;
///
/// let patch = PatchLoader::load_file(Path::new("app/sites/default/settings.dev.yaml")).unwrap();
/// println!("patch touches {} top-level keys", patch.len());
/// ```
pub struct PatchLoader;

impl PatchLoader {
    /// Load and parse a YAML patch file.
    ///
    /// An empty document is an empty patch.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the YAML is invalid, or
    /// the document is not a mapping.
    pub fn load_file(path: &Path) -> Result<Tree> {
        let contents = fs::read_to_string(path).map_err(|e| Error::InvalidPath {
            path: path.to_path_buf(),
            reason: format!("Failed to read override file: {e}"),
        })?;

        let value: Value = serde_yaml::from_str(&contents).map_err(|e| Error::Validation {
            field: format!("{}", path.display()),
            message: format!("Invalid YAML: {e}"),
        })?;

        match value {
            Value::Null => Ok(Tree::new()),
            Value::Map(tree) => Ok(tree),
            other => Err(Error::Validation {
                field: format!("{}", path.display()),
                message: format!("override must be a YAML mapping, found {}", other.type_name()),
            }),
        }
    }
}
