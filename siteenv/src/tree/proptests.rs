//! Property-based tests for tree merging.

use super::{Tree, TreeMerger, Value};
use proptest::prelude::*;

fn leaf_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Int),
        "[a-z]{0,8}".prop_map(Value::String),
    ]
}

fn value_strategy() -> impl Strategy<Value = Value> {
    leaf_strategy().prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::List),
            prop::collection::vec(("[a-d]{1,2}", inner), 0..4)
                .prop_map(|entries| Value::Map(entries.into_iter().collect())),
        ]
    })
}

fn tree_strategy() -> impl Strategy<Value = Tree> {
    prop::collection::vec(("[a-f]{1,2}", value_strategy()), 0..6)
        .prop_map(|entries| entries.into_iter().collect())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        .. ProptestConfig::default()
    })]

    // Every key of the target survives a merge
    #[test]
    fn merge_never_removes_keys(target in tree_strategy(), patch in tree_strategy()) {
        let mut merged = target.clone();
        TreeMerger::merge_into(&mut merged, &patch);
        for key in target.keys() {
            prop_assert!(merged.contains_key(key));
        }
    }

    // Every non-map leaf of the patch ends up verbatim in the result
    #[test]
    fn merge_patch_leaves_win(target in tree_strategy(), patch in tree_strategy()) {
        let mut merged = target;
        TreeMerger::merge_into(&mut merged, &patch);
        for (key, value) in patch.iter() {
            if !matches!(value, Value::Map(_)) {
                prop_assert_eq!(merged.get(key), Some(value));
            }
        }
    }

    // Applying the same patch twice is the same as applying it once
    #[test]
    fn merge_is_idempotent(target in tree_strategy(), patch in tree_strategy()) {
        let mut once = target.clone();
        TreeMerger::merge_into(&mut once, &patch);
        let mut twice = once.clone();
        TreeMerger::merge_into(&mut twice, &patch);
        prop_assert_eq!(once, twice);
    }
}
