use serde_json::Value;
use tracing::{debug, warn};

use crate::core::mutate;
use crate::core::node::OptionNode;
use crate::core::path::TreePath;
use crate::core::record::OptionRecord;
use crate::notify::{Notifier, Toast};
use crate::store::{KeyValueStore, StoreError, unwrap_payload};

use super::expansion::ExpansionState;
use super::rows::{TreeRow, build_rows};

/// One editing session over one named tree. The tree is fetched once, all
/// mutations are synchronous and local, and persistence is a wholesale
/// replace on an explicit save. There is no merge with concurrent writers;
/// a second session saving the same key wins or loses outright.
pub struct EditorSession {
    key: String,
    root: OptionNode,
    last_saved: OptionNode,
    expansion: ExpansionState,
    started_loads: u64,
}

impl EditorSession {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            root: OptionNode::empty_branch(),
            last_saved: OptionNode::empty_branch(),
            expansion: ExpansionState::new(),
            started_loads: 0,
        }
    }

    pub fn key(&self) -> &str {
        self.key.as_str()
    }

    pub fn root(&self) -> &OptionNode {
        &self.root
    }

    pub fn is_dirty(&self) -> bool {
        self.root != self.last_saved
    }

    /// Fetch and apply the tree in one step. A missing key is an empty tree.
    pub fn load(&mut self, store: &impl KeyValueStore) -> Result<(), StoreError> {
        let generation = self.begin_load();
        let payload = store.get(&self.key)?;
        self.apply_load(generation, payload);
        Ok(())
    }

    /// Start a load and reserve its generation. Callers resolving loads
    /// asynchronously pass the generation back to [`apply_load`]; a response
    /// from a superseded load is discarded rather than clobbering a newer
    /// one that already resolved.
    ///
    /// [`apply_load`]: EditorSession::apply_load
    pub fn begin_load(&mut self) -> u64 {
        self.started_loads += 1;
        self.started_loads
    }

    /// Apply a load response. Returns false when the response is stale.
    pub fn apply_load(&mut self, generation: u64, payload: Option<Value>) -> bool {
        if generation < self.started_loads {
            warn!(key = %self.key, generation, latest = self.started_loads, "discarding stale load");
            return false;
        }
        let root = match payload {
            Some(value) => OptionNode::from_value(&unwrap_payload(value)),
            None => OptionNode::empty_branch(),
        };
        debug!(key = %self.key, generation, "tree loaded");
        self.root = root.clone();
        self.last_saved = root;
        self.expansion.collapse_all();
        true
    }

    /// Persist the whole tree. Success and failure are both surfaced through
    /// the toast channel; on failure the in-memory tree is left untouched so
    /// the user can retry by saving again. No automatic retry.
    pub fn save(
        &mut self,
        store: &impl KeyValueStore,
        notifier: &mut impl Notifier,
    ) -> Result<(), StoreError> {
        let payload = self.root.to_value();
        match store.save(&self.key, &payload) {
            Ok(()) => {
                debug!(key = %self.key, "tree saved");
                self.last_saved = self.root.clone();
                notifier.show(Toast::success(format!("\"{}\" saved", self.key)));
                Ok(())
            }
            Err(err) => {
                warn!(key = %self.key, error = %err, "save failed");
                notifier.show(Toast::error(format!(
                    "Failed to save \"{}\": {err}",
                    self.key
                )));
                Err(err)
            }
        }
    }

    pub fn node_at(&self, path: &TreePath) -> Option<&OptionNode> {
        mutate::get_at(&self.root, path)
    }

    pub fn items_at(&self, path: &TreePath) -> Option<&[OptionRecord]> {
        mutate::get_items_at(&self.root, path)
    }

    /// Path-addressed leaf write; the session root is replaced
    /// copy-on-write, never aliased with the last-saved tree.
    pub fn set_items_at(&mut self, path: &TreePath, items: Vec<OptionRecord>) {
        self.root = mutate::set_at(&self.root, path, items);
    }

    pub fn add_branch(&mut self, parent: &TreePath, key: &str) {
        self.root = mutate::insert_branch_at(&self.root, parent, key);
    }

    /// Delete a subtree. Destructive-action confirmation is the caller's
    /// concern; this layer just does the work and forgets the expansion
    /// state underneath.
    pub fn remove_branch(&mut self, path: &TreePath) {
        self.root = mutate::remove_at(&self.root, path);
        self.expansion.remove_subtree(path);
    }

    pub fn rename_branch(&mut self, path: &TreePath, new_key: &str) {
        let renamed = mutate::rename_key_at(&self.root, path, new_key);
        if renamed == self.root {
            return;
        }
        self.root = renamed;
        if let Some(parent) = path.parent() {
            self.expansion
                .remap_prefix(path, &parent.child(new_key.to_string()));
        }
    }

    pub fn toggle(&mut self, path: &TreePath) -> bool {
        self.expansion.toggle(path)
    }

    pub fn expansion(&self) -> &ExpansionState {
        &self.expansion
    }

    pub fn rows(&self) -> Vec<TreeRow> {
        build_rows(&self.root, &self.expansion)
    }
}
