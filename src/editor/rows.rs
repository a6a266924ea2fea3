//! Flattened row model. A front end paints rows top to bottom; the walk
//! itself decides, per node, whether to show a collapsible branch header, a
//! leaf header, or the leaf's records, honoring the session's expansion
//! state. Insertion order of branch children is display order.

use crate::core::node::OptionNode;
use crate::core::path::TreePath;
use crate::core::record::OptionRecord;

use super::expansion::ExpansionState;

#[derive(Debug, Clone, PartialEq)]
pub struct TreeRow {
    pub path: TreePath,
    pub depth: usize,
    pub kind: RowKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RowKind {
    /// Collapsible header for a named sub-tree.
    Branch {
        label: String,
        expanded: bool,
        child_count: usize,
    },
    /// Header for a record list; its records follow only when expanded.
    Leaf {
        label: String,
        description: Option<String>,
        expanded: bool,
        item_count: usize,
    },
    /// One record of the leaf directly above.
    Record { index: usize, record: OptionRecord },
}

/// Walk the tree and emit the rows a front end should paint. Unrecognized
/// shapes (normalized to empty branches at load) emit a header with no
/// children and are otherwise inert.
pub fn build_rows(root: &OptionNode, expansion: &ExpansionState) -> Vec<TreeRow> {
    let mut rows = Vec::new();
    match root {
        OptionNode::Branch(children) => {
            for (key, child) in children {
                push_rows(&mut rows, key, child, &TreePath::root().child(key.clone()), 0, expansion);
            }
        }
        // A leaf root renders as a single unlabeled section.
        leaf => push_rows(&mut rows, "", leaf, &TreePath::root(), 0, expansion),
    }
    rows
}

fn push_rows(
    rows: &mut Vec<TreeRow>,
    key: &str,
    node: &OptionNode,
    path: &TreePath,
    depth: usize,
    expansion: &ExpansionState,
) {
    let expanded = expansion.is_expanded(path);
    match node {
        OptionNode::Branch(children) => {
            rows.push(TreeRow {
                path: path.clone(),
                depth,
                kind: RowKind::Branch {
                    label: key.to_string(),
                    expanded,
                    child_count: children.len(),
                },
            });
            if !expanded {
                return;
            }
            for (child_key, child) in children {
                push_rows(
                    rows,
                    child_key,
                    child,
                    &path.child(child_key.clone()),
                    depth + 1,
                    expansion,
                );
            }
        }
        leaf => {
            let items = leaf.leaf_items().unwrap_or_default();
            rows.push(TreeRow {
                path: path.clone(),
                depth,
                kind: RowKind::Leaf {
                    label: key.to_string(),
                    description: leaf.description().map(str::to_string),
                    expanded,
                    item_count: items.len(),
                },
            });
            if !expanded {
                return;
            }
            for (index, record) in items.iter().enumerate() {
                rows.push(TreeRow {
                    path: path.clone(),
                    depth: depth + 1,
                    kind: RowKind::Record {
                        index,
                        record: record.clone(),
                    },
                });
            }
        }
    }
}
