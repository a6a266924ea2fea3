use optree::{OptionNode, OptionRecord, TreePath, mutate};
use proptest::prelude::*;

fn key() -> impl Strategy<Value = String> {
    "[a-zA-Z][a-zA-Z0-9_]{0,7}"
}

fn odd_key() -> impl Strategy<Value = String> {
    // Printable ASCII, including quotes, backslashes, dots, and brackets.
    "[ -~]{1,8}"
}

fn path() -> impl Strategy<Value = TreePath> {
    prop::collection::vec(key(), 1..4).prop_map(TreePath::new)
}

fn records() -> impl Strategy<Value = Vec<OptionRecord>> {
    prop::collection::vec("[a-z]{1,8}", 0..5).prop_map(|labels| {
        labels.into_iter().map(OptionRecord::labeled).collect()
    })
}

fn seeded_root() -> OptionNode {
    OptionNode::from_value(&serde_json::json!({
        "keep": [{"label": "A", "value": "a"}],
    }))
}

proptest! {
    #[test]
    fn set_then_get_round_trips(path in path(), items in records()) {
        let next = mutate::set_at(&OptionNode::empty_branch(), &path, items.clone());
        prop_assert_eq!(mutate::get_items_at(&next, &path), Some(items.as_slice()));
    }

    #[test]
    fn set_never_mutates_the_original(path in path(), items in records()) {
        let root = seeded_root();
        let before = root.clone();
        let _ = mutate::set_at(&root, &path, items);
        prop_assert_eq!(root, before);
    }

    #[test]
    fn healing_preserves_unrelated_siblings(path in path(), items in records()) {
        prop_assume!(path.keys()[0] != "keep");
        let next = mutate::set_at(&seeded_root(), &path, items);
        prop_assert_eq!(
            mutate::get_items_at(&next, &TreePath::from("keep")).map(<[_]>::len),
            Some(1)
        );
    }

    #[test]
    fn path_display_parse_round_trips(keys in prop::collection::vec(odd_key(), 0..4)) {
        let path = TreePath::new(keys);
        let parsed = TreePath::parse(&path.to_string()).expect("display output parses");
        prop_assert_eq!(parsed, path);
    }
}
