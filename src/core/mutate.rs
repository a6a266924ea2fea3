//! Pure, copy-on-write operations over the option tree. Every write returns
//! a new root so a session can keep its last-saved tree without any shared
//! mutable references; malformed paths are healed, never rejected, because
//! the remote configuration may be incomplete.

use indexmap::IndexMap;

use super::node::OptionNode;
use super::path::TreePath;
use super::record::OptionRecord;

/// Node at `path`, or `None` when any segment is absent. Never panics.
pub fn get_at<'a>(root: &'a OptionNode, path: &TreePath) -> Option<&'a OptionNode> {
    let mut current = root;
    for key in path.keys() {
        let OptionNode::Branch(children) = current else {
            return None;
        };
        current = children.get(key.as_str())?;
    }
    Some(current)
}

/// Leaf items at `path`, regardless of which leaf shape lives there.
pub fn get_items_at<'a>(root: &'a OptionNode, path: &TreePath) -> Option<&'a [OptionRecord]> {
    get_at(root, path).and_then(OptionNode::leaf_items)
}

/// Write `items` at `path`, returning the new root.
///
/// Intermediate segments that are missing (or not branches) are healed into
/// branches. The terminal write is normalized against whatever already lives
/// there, so callers never need to know which leaf shape a branch uses:
/// a plain leaf is replaced wholesale, a described leaf keeps its
/// description, and any other shape is synthesized into a described leaf
/// named after the last path segment.
pub fn set_at(root: &OptionNode, path: &TreePath, items: Vec<OptionRecord>) -> OptionNode {
    write_at(Some(root), path.keys(), path.leaf_key().unwrap_or(""), items)
}

fn write_at(
    existing: Option<&OptionNode>,
    keys: &[String],
    leaf_name: &str,
    items: Vec<OptionRecord>,
) -> OptionNode {
    let Some((head, rest)) = keys.split_first() else {
        return normalize_write(existing, leaf_name, items);
    };

    let mut children = match existing {
        Some(OptionNode::Branch(children)) => children.clone(),
        _ => IndexMap::new(),
    };
    let child = write_at(children.get(head.as_str()), rest, leaf_name, items);
    children.insert(head.clone(), child);
    OptionNode::Branch(children)
}

fn normalize_write(
    existing: Option<&OptionNode>,
    leaf_name: &str,
    items: Vec<OptionRecord>,
) -> OptionNode {
    match existing {
        Some(OptionNode::Leaf(_)) => OptionNode::Leaf(items),
        Some(OptionNode::DescribedLeaf { description, .. }) => OptionNode::DescribedLeaf {
            description: description.clone(),
            items,
        },
        _ => OptionNode::DescribedLeaf {
            description: leaf_name.to_string(),
            items,
        },
    }
}

/// Delete the node at `path`, returning the new root. Absent paths are a
/// no-op; deleting the root yields an empty branch. Sibling order is kept.
pub fn remove_at(root: &OptionNode, path: &TreePath) -> OptionNode {
    let Some(leaf_key) = path.leaf_key() else {
        return OptionNode::empty_branch();
    };
    let Some(parent_path) = path.parent() else {
        return root.clone();
    };
    rewrite_branch(root, &parent_path, |children| {
        children.shift_remove(leaf_key);
    })
    .unwrap_or_else(|| root.clone())
}

/// Insert an empty branch under `parent` at key `key`. Missing intermediate
/// branches are healed; an existing child with the same key is left alone.
pub fn insert_branch_at(root: &OptionNode, parent: &TreePath, key: &str) -> OptionNode {
    let healed = heal_branches(root, parent);
    rewrite_branch(&healed, parent, |children| {
        if !children.contains_key(key) {
            children.insert(key.to_string(), OptionNode::empty_branch());
        }
    })
    .unwrap_or(healed)
}

/// Rename the key addressed by `path`, keeping the entry's position. A root
/// path, an absent entry, or a collision with an existing sibling is a no-op.
pub fn rename_key_at(root: &OptionNode, path: &TreePath, new_key: &str) -> OptionNode {
    let (Some(old_key), Some(parent_path)) = (path.leaf_key(), path.parent()) else {
        return root.clone();
    };
    if old_key == new_key {
        return root.clone();
    }
    rewrite_branch(root, &parent_path, |children| {
        if children.contains_key(new_key) {
            return;
        }
        let Some(index) = children.get_index_of(old_key) else {
            return;
        };
        let mut next = IndexMap::with_capacity(children.len());
        for (i, (key, node)) in children.iter().enumerate() {
            if i == index {
                next.insert(new_key.to_string(), node.clone());
            } else {
                next.insert(key.clone(), node.clone());
            }
        }
        *children = next;
    })
    .unwrap_or_else(|| root.clone())
}

/// Clone `root`, applying `edit` to the branch map at `path`. `None` when
/// the path does not lead to a branch.
fn rewrite_branch(
    root: &OptionNode,
    path: &TreePath,
    edit: impl FnOnce(&mut IndexMap<String, OptionNode>),
) -> Option<OptionNode> {
    fn recurse(
        node: &OptionNode,
        keys: &[String],
        edit: impl FnOnce(&mut IndexMap<String, OptionNode>),
    ) -> Option<OptionNode> {
        let OptionNode::Branch(children) = node else {
            return None;
        };
        let mut children = children.clone();
        match keys.split_first() {
            None => edit(&mut children),
            Some((head, rest)) => {
                let child = children.get(head.as_str())?;
                let rewritten = recurse(child, rest, edit)?;
                children.insert(head.clone(), rewritten);
            }
        }
        Some(OptionNode::Branch(children))
    }
    recurse(root, path.keys(), edit)
}

/// Copy of `root` in which every segment of `path` is a branch, missing or
/// mismatched segments replaced with empty branches.
fn heal_branches(root: &OptionNode, path: &TreePath) -> OptionNode {
    fn recurse(existing: Option<&OptionNode>, keys: &[String]) -> OptionNode {
        let Some((head, rest)) = keys.split_first() else {
            return match existing {
                Some(node @ OptionNode::Branch(_)) => node.clone(),
                _ => OptionNode::empty_branch(),
            };
        };
        let mut children = match existing {
            Some(OptionNode::Branch(children)) => children.clone(),
            _ => IndexMap::new(),
        };
        let child = recurse(children.get(head.as_str()), rest);
        children.insert(head.clone(), child);
        OptionNode::Branch(children)
    }
    recurse(Some(root), path.keys())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tree(value: serde_json::Value) -> OptionNode {
        OptionNode::from_value(&value)
    }

    fn records(labels: &[&str]) -> Vec<OptionRecord> {
        labels.iter().map(|l| OptionRecord::labeled(*l)).collect()
    }

    #[test]
    fn get_at_returns_none_on_absent_segment() {
        let root = tree(json!({"options": {"gaji": []}}));
        assert!(get_at(&root, &TreePath::from_keys(["options", "gaji"])).is_some());
        assert!(get_at(&root, &TreePath::from_keys(["options", "missing"])).is_none());
        assert!(get_at(&root, &TreePath::from_keys(["options", "gaji", "deeper"])).is_none());
    }

    #[test]
    fn set_then_get_round_trips() {
        let root = tree(json!({"ukuranPerusahaan": []}));
        let path = TreePath::from("ukuranPerusahaan");
        let items = records(&["1-10", "11-50"]);

        let next = set_at(&root, &path, items.clone());
        assert_eq!(get_items_at(&next, &path), Some(items.as_slice()));
    }

    #[test]
    fn set_replaces_plain_leaf_directly() {
        let root = tree(json!({"tipe": [{"label": "Remote", "value": "remote"}]}));
        let next = set_at(&root, &TreePath::from("tipe"), records(&["Onsite"]));
        assert!(matches!(
            get_at(&next, &TreePath::from("tipe")),
            Some(OptionNode::Leaf(_))
        ));
    }

    #[test]
    fn set_preserves_description_of_described_leaf() {
        let root = tree(json!({
            "skill": {"description": "Hard Skills", "items": [{"label": "Go", "value": "go"}]},
        }));
        let path = TreePath::from("skill");
        let next = set_at(&root, &path, records(&["Rust"]));

        let node = get_at(&next, &path).expect("leaf survives");
        assert_eq!(node.description(), Some("Hard Skills"));
        assert_eq!(node.leaf_items().map(<[_]>::len), Some(1));
    }

    #[test]
    fn set_synthesizes_described_leaf_on_fresh_path() {
        let root = OptionNode::empty_branch();
        let path = TreePath::from_keys(["skill", "softSkills"]);
        let next = set_at(&root, &path, records(&["Empati"]));

        let node = get_at(&next, &path).expect("healed");
        assert_eq!(node.description(), Some("softSkills"));
    }

    #[test]
    fn healing_does_not_touch_the_original_or_siblings() {
        let root = tree(json!({"keep": [{"label": "A", "value": "a"}]}));
        let before = root.clone();
        let next = set_at(&root, &TreePath::from_keys(["new", "deep"]), records(&["X"]));

        assert_eq!(root, before);
        assert_eq!(
            get_items_at(&next, &TreePath::from("keep")).map(<[_]>::len),
            Some(1)
        );
        assert!(get_at(&next, &TreePath::from_keys(["new", "deep"])).is_some());
    }

    #[test]
    fn remove_at_deletes_only_the_addressed_subtree() {
        let root = tree(json!({"a": [], "b": {"c": [], "d": []}}));
        let next = remove_at(&root, &TreePath::from_keys(["b", "c"]));

        assert!(get_at(&next, &TreePath::from_keys(["b", "c"])).is_none());
        assert!(get_at(&next, &TreePath::from_keys(["b", "d"])).is_some());
        assert!(get_at(&next, &TreePath::from("a")).is_some());
        // Absent target is a no-op.
        assert_eq!(remove_at(&root, &TreePath::from("zzz")), root);
    }

    #[test]
    fn insert_branch_heals_and_keeps_existing_children() {
        let root = tree(json!({"skill": {"hard": {"description": "x", "items": []}}}));
        let next = insert_branch_at(&root, &TreePath::from("skill"), "soft");

        let children = get_at(&next, &TreePath::from("skill"))
            .and_then(OptionNode::children)
            .expect("branch");
        let keys: Vec<_> = children.keys().map(String::as_str).collect();
        assert_eq!(keys, ["hard", "soft"]);

        // Same key again does not clobber.
        let again = insert_branch_at(&next, &TreePath::from("skill"), "hard");
        assert_eq!(again, next);
    }

    #[test]
    fn rename_keeps_position_and_subtree() {
        let root = tree(json!({"skill": {"first": [], "second": [], "third": []}}));
        let next = rename_key_at(&root, &TreePath::from_keys(["skill", "second"]), "renamed");

        let children = get_at(&next, &TreePath::from("skill"))
            .and_then(OptionNode::children)
            .expect("branch");
        let keys: Vec<_> = children.keys().map(String::as_str).collect();
        assert_eq!(keys, ["first", "renamed", "third"]);

        // Collision with a sibling is a no-op.
        let collided = rename_key_at(&next, &TreePath::from_keys(["skill", "renamed"]), "first");
        assert_eq!(collided, next);
    }
}
