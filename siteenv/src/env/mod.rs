//! Environment variable snapshot and namespaced lookup.
//!
//! The resolver never reads `std::env` directly. An [`Environment`] is
//! captured once at startup (from the process, from `.env` files, or built
//! by hand in tests) and every component reads through a [`ScopedEnv`],
//! which applies the per-site namespacing rule:
//!
//! 1. `APPNAME__SITENAME__KEY` (or `SITENAME__KEY` without an app name)
//! 2. `KEY`
//!
//! # Examples
//!
//! ```
//! use siteenv::env::Environment;
//!
//! let env = Environment::from_pairs([
//!     ("DATABASE_URL", "mysql://global/db"),
//!     ("SHOP__SITE1__DATABASE_URL", "mysql://site1/db"),
//! ]);
//!
//! let site1 = env.scoped(Some("shop"), "site1");
//! assert_eq!(site1.get("database_url").as_deref(), Some("mysql://site1/db"));
//!
//! let site2 = env.scoped(Some("shop"), "site2");
//! assert_eq!(site2.get("DATABASE_URL").as_deref(), Some("mysql://global/db"));
//! ```

pub mod dotenv;

use std::collections::HashMap;

use crate::error::{Error, Result};

/// An immutable snapshot of environment variables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    vars: HashMap<String, String>,
}

impl Environment {
    /// Creates an empty snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Captures the current process environment.
    ///
    /// Variables whose name or value is not valid UTF-8 are skipped.
    #[must_use]
    pub fn from_process() -> Self {
        Self {
            vars: std::env::vars_os()
                .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
                .collect(),
        }
    }

    /// Builds a snapshot from key/value pairs.
    #[must_use]
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Returns a copy with one more variable set.
    #[must_use]
    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }

    /// Raw lookup by exact variable name.
    #[must_use]
    pub fn var(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    /// Whether a variable is defined.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    /// Number of variables in the snapshot.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Whether the snapshot is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// A lookup view namespaced to one site.
    #[must_use]
    pub fn scoped<'a>(&'a self, app_name: Option<&'a str>, site_name: &'a str) -> ScopedEnv<'a> {
        ScopedEnv {
            env: self,
            app_name,
            site_name,
        }
    }

    pub(crate) fn insert_missing(&mut self, key: String, value: String) {
        self.vars.entry(key).or_insert(value);
    }
}

/// A site-namespaced view over an [`Environment`].
#[derive(Debug, Clone, Copy)]
pub struct ScopedEnv<'a> {
    env: &'a Environment,
    app_name: Option<&'a str>,
    site_name: &'a str,
}

impl<'a> ScopedEnv<'a> {
    /// The namespaced variable name for a key.
    ///
    /// # Examples
    ///
    /// ```
    /// use siteenv::env::Environment;
    ///
    /// let env = Environment::new();
    /// assert_eq!(env.scoped(Some("shop"), "site-1").namespaced_key("hash_salt"),
    ///     "SHOP__SITE_1__HASH_SALT");
    /// assert_eq!(env.scoped(None, "default").namespaced_key("HASH_SALT"),
    ///     "DEFAULT__HASH_SALT");
    /// ```
    #[must_use]
    pub fn namespaced_key(&self, key: &str) -> String {
        let mut segments = Vec::with_capacity(3);
        if let Some(app) = self.app_name.filter(|a| !a.is_empty()) {
            segments.push(normalize_segment(app));
        }
        segments.push(normalize_segment(self.site_name));
        segments.push(key.to_uppercase());
        segments.join("__")
    }

    /// Looks up a key, preferring the site-namespaced variable.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        self.env
            .var(&self.namespaced_key(key))
            .or_else(|| self.env.var(&key.to_uppercase()))
            .map(str::to_string)
    }

    /// Looks up a key, failing when it is absent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingVariable`] if neither form of the key is set.
    pub fn require(&self, key: &str) -> Result<String> {
        self.get(key).ok_or_else(|| Error::MissingVariable {
            name: key.to_uppercase(),
        })
    }

    /// Looks up a comma-separated list.
    ///
    /// Entries are trimmed, empty entries dropped, and duplicates removed
    /// keeping the first occurrence. Returns `None` when the key is absent
    /// or yields no entries.
    #[must_use]
    pub fn get_list(&self, key: &str) -> Option<Vec<String>> {
        let list = parse_list(&self.get(key)?);
        (!list.is_empty()).then_some(list)
    }

    /// Looks up a loose boolean flag, absent meaning `false`.
    ///
    /// Follows [`is_truthy`], so any value other than an empty string or a
    /// false keyword enables the flag.
    #[must_use]
    pub fn get_flag(&self, key: &str) -> bool {
        self.get(key).is_some_and(|value| is_truthy(&value))
    }

    /// The underlying snapshot.
    #[must_use]
    pub const fn environment(&self) -> &'a Environment {
        self.env
    }
}

fn normalize_segment(segment: &str) -> String {
    segment
        .chars()
        .map(|c| match c {
            '-' | '.' => '_',
            c => c.to_ascii_uppercase(),
        })
        .collect()
}

/// Loose truthiness for values that double as secrets.
///
/// Empty strings and the false keywords are false; anything else is true.
#[must_use]
pub fn is_truthy(s: &str) -> bool {
    !matches!(
        s.trim().to_lowercase().as_str(),
        "" | "0" | "false" | "no" | "off"
    )
}

/// Split a comma-separated value into trimmed, unique, non-empty entries.
#[must_use]
pub fn parse_list(s: &str) -> Vec<String> {
    let mut items: Vec<String> = Vec::new();
    for part in s.split(',') {
        let part = part.trim();
        if part.is_empty() || items.iter().any(|existing| existing == part) {
            continue;
        }
        items.push(part.to_string());
    }
    items
}


// Property-based tests for list parsing and truthiness
#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        // False keywords are false regardless of case
        #[test]
        fn prop_false_keywords_case_insensitive(upper in any::<bool>()) {
            for word in ["false", "no", "off"] {
                let input = if upper { word.to_uppercase() } else { word.to_string() };
                prop_assert!(!is_truthy(&input));
            }
        }

        // A joined list of distinct names parses back to the same names
        #[test]
        fn prop_list_roundtrip(names in prop::collection::btree_set("[a-z][a-z0-9]{0,8}", 1..6)) {
            let names: Vec<String> = names.into_iter().collect();
            let joined = names.join(",");
            prop_assert_eq!(parse_list(&joined), names);
        }

        // Whitespace around entries never changes the result
        #[test]
        fn prop_list_tolerates_whitespace(
            names in prop::collection::btree_set("[a-z]{1,6}", 1..4),
            pad in 0usize..=3,
        ) {
            let names: Vec<String> = names.into_iter().collect();
            let spaces = " ".repeat(pad);
            let padded = names
                .iter()
                .map(|n| format!("{spaces}{n}{spaces}"))
                .collect::<Vec<_>>()
                .join(",");
            prop_assert_eq!(parse_list(&padded), names);
        }
    }
}
