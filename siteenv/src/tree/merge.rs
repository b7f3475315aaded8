//! Deep merging of configuration trees.
//!
//! Override layers are applied by merging a patch tree into the computed
//! tree. Merging is additive: keys the patch does not mention are left alone.

use super::{Tree, Value};

/// Merges patch trees into target trees.
///
/// # Examples
///
/// ```
/// use siteenv::tree::{Tree, TreeMerger, Value};
///
/// let mut target = Tree::new();
/// target.set_path(&["cache", "bins", "page"], "cache.backend.null");
///
/// let mut patch = Tree::new();
/// patch.set_path(&["cache", "bins", "render"], "cache.backend.memory");
///
/// TreeMerger::merge_into(&mut target, &patch);
/// assert!(target.get_path(&["cache", "bins", "page"]).is_some());
/// assert!(target.get_path(&["cache", "bins", "render"]).is_some());
/// ```
pub struct TreeMerger;

impl TreeMerger {
    /// Merge a sequence of trees, lowest precedence first.
    #[must_use]
    pub fn merge(layers: impl IntoIterator<Item = Tree>) -> Tree {
        let mut result = Tree::new();
        for layer in layers {
            Self::merge_into(&mut result, &layer);
        }
        result
    }

    /// Merge `patch` into `target` (patch overwrites target).
    ///
    /// # Merging Rules
    ///
    /// - Map into map: merged key by key, recursively
    /// - Anything else: the patch value replaces the target value
    /// - Keys only present in the target are kept
    pub fn merge_into(target: &mut Tree, patch: &Tree) {
        for (key, value) in patch.iter() {
            if let (Some(Value::Map(existing)), Value::Map(incoming)) = (target.get_mut(key), value)
            {
                Self::merge_into(existing, incoming);
                continue;
            }
            target.insert(key.clone(), value.clone());
        }
    }
}
