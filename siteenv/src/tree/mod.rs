//! Configuration tree representation.
//!
//! Every resolved tree (settings, databases, module config) is a [`Tree`]: an
//! insertion-ordered map from string keys to [`Value`] nodes. Ordering is
//! preserved so rendered output and test expectations stay deterministic.
//!
//! # Examples
//!
//! ```
//! use siteenv::tree::{Tree, Value};
//!
//! let mut settings = Tree::new();
//! settings.insert("entity_update_batch_size", 50);
//! settings.set_path(&["cache", "bins", "page"], "cache.backend.null");
//!
//! assert_eq!(settings.get("entity_update_batch_size"), Some(&Value::Int(50)));
//! assert_eq!(
//!     settings.get_path(&["cache", "bins", "page"]).and_then(Value::as_str),
//!     Some("cache.backend.null"),
//! );
//! ```

pub mod merge;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

pub use merge::TreeMerger;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A single node in a configuration tree.
///
/// Deserialization tries the variants in declaration order, so YAML `~`
/// becomes [`Value::Null`] and integers that fit `i64` stay integers.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// An explicitly unset value.
    #[default]
    Null,
    /// A boolean leaf.
    Bool(bool),
    /// An integer leaf.
    Int(i64),
    /// A floating point leaf.
    Float(f64),
    /// A string leaf.
    String(String),
    /// An ordered list of values.
    List(Vec<Value>),
    /// A nested map.
    Map(Tree),
}

impl Value {
    /// Returns the string payload, if this is a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the boolean payload, if this is a boolean.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the integer payload, if this is an integer.
    #[must_use]
    pub const fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the list payload, if this is a list.
    #[must_use]
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the nested map, if this is a map.
    #[must_use]
    pub const fn as_map(&self) -> Option<&Tree> {
        match self {
            Self::Map(tree) => Some(tree),
            _ => None,
        }
    }

    /// Returns the nested map mutably, if this is a map.
    pub fn as_map_mut(&mut self) -> Option<&mut Tree> {
        match self {
            Self::Map(tree) => Some(tree),
            _ => None,
        }
    }

    /// Whether this value is [`Value::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Short name of the node type, used in validation messages.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::List(_) => "list",
            Self::Map(_) => "map",
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<u16> for Value {
    fn from(value: u16) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Tree> for Value {
    fn from(value: Tree) -> Self {
        Self::Map(value)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(values: Vec<T>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// An insertion-ordered map of configuration values.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tree {
    entries: IndexMap<String, Value>,
}

impl Tree {
    /// Creates an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Number of top-level entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the tree has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Inserts a value, returning the previous one.
    ///
    /// Replacing an existing key keeps its original position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.entries.insert(key.into(), value.into())
    }

    /// Returns the value for a key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Returns the value for a key mutably.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.entries.get_mut(key)
    }

    /// Whether the key is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Removes a key, returning its value. Later keys keep their order.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.shift_remove(key)
    }

    /// Follows a path of nested map keys.
    #[must_use]
    pub fn get_path(&self, path: &[&str]) -> Option<&Value> {
        let (last, parents) = path.split_last()?;
        let mut tree = self;
        for key in parents {
            tree = tree.get(key)?.as_map()?;
        }
        tree.get(last)
    }

    /// Returns the nested map stored under `key`, creating it if needed.
    ///
    /// A non-map value already stored under `key` is replaced by an empty map.
    pub fn map_entry(&mut self, key: &str) -> &mut Tree {
        let slot = self
            .entries
            .entry(key.to_string())
            .or_insert_with(|| Value::Map(Tree::new()));
        if !matches!(slot, Value::Map(_)) {
            *slot = Value::Map(Tree::new());
        }
        match slot {
            Value::Map(tree) => tree,
            _ => unreachable!("entry was just made a map"),
        }
    }

    /// Sets a value at a nested path, creating intermediate maps.
    ///
    /// An empty path is ignored.
    pub fn set_path(&mut self, path: &[&str], value: impl Into<Value>) {
        let Some((last, parents)) = path.split_last() else {
            return;
        };
        let mut tree = self;
        for key in parents {
            tree = tree.map_entry(key);
        }
        tree.insert(*last, value);
    }

    /// Iterates over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.entries.iter()
    }

    /// Iterates over keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Tree {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

impl IntoIterator for Tree {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
