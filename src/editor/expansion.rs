use std::collections::HashSet;

use crate::core::path::TreePath;

/// Which branches (and leaves) of one editing session are unfolded, keyed by
/// path. Scoped to a single session: created with it, dropped with it.
/// Initial state is all collapsed.
#[derive(Debug, Clone, Default)]
pub struct ExpansionState {
    expanded: HashSet<String>,
}

impl ExpansionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_expanded(&self, path: &TreePath) -> bool {
        self.expanded.contains(&path.storage_key())
    }

    /// Flip membership; returns whether the path is now expanded.
    pub fn toggle(&mut self, path: &TreePath) -> bool {
        let key = path.storage_key();
        if self.expanded.remove(&key) {
            false
        } else {
            self.expanded.insert(key);
            true
        }
    }

    pub fn expand(&mut self, path: &TreePath) {
        self.expanded.insert(path.storage_key());
    }

    pub fn collapse(&mut self, path: &TreePath) {
        self.expanded.remove(&path.storage_key());
    }

    pub fn collapse_all(&mut self) {
        self.expanded.clear();
    }

    pub fn len(&self) -> usize {
        self.expanded.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expanded.is_empty()
    }

    /// Drop the path and everything under it; used when a branch is deleted.
    pub fn remove_subtree(&mut self, prefix: &TreePath) {
        self.expanded.retain(|key| {
            TreePath::parse(key)
                .map(|path| path != *prefix && !path.starts_with(prefix))
                .unwrap_or(true)
        });
    }

    /// Rebase every expanded path under `old` onto `new`; keeps the unfolded
    /// shape stable across a branch rename.
    pub fn remap_prefix(&mut self, old: &TreePath, new: &TreePath) {
        let mut next = HashSet::with_capacity(self.expanded.len());
        for key in &self.expanded {
            let Ok(path) = TreePath::parse(key) else {
                next.insert(key.clone());
                continue;
            };
            let remapped = match path.strip_prefix(old) {
                Some(suffix) => new.join(&suffix),
                None => path,
            };
            next.insert(remapped.storage_key());
        }
        self.expanded = next;
    }
}

#[cfg(test)]
mod tests {
    use super::ExpansionState;
    use crate::core::path::TreePath;

    #[test]
    fn starts_fully_collapsed_and_toggles() {
        let mut state = ExpansionState::new();
        let path = TreePath::from_keys(["skill", "hard"]);
        assert!(!state.is_expanded(&path));
        assert!(state.toggle(&path));
        assert!(state.is_expanded(&path));
        assert!(!state.toggle(&path));
        assert!(!state.is_expanded(&path));
    }

    #[test]
    fn remove_subtree_spares_siblings() {
        let mut state = ExpansionState::new();
        state.expand(&TreePath::from_keys(["a", "b"]));
        state.expand(&TreePath::from_keys(["a", "b", "c"]));
        state.expand(&TreePath::from_keys(["a", "bb"]));

        state.remove_subtree(&TreePath::from_keys(["a", "b"]));
        assert!(!state.is_expanded(&TreePath::from_keys(["a", "b"])));
        assert!(!state.is_expanded(&TreePath::from_keys(["a", "b", "c"])));
        assert!(state.is_expanded(&TreePath::from_keys(["a", "bb"])));
    }

    #[test]
    fn remap_prefix_follows_renames() {
        let mut state = ExpansionState::new();
        state.expand(&TreePath::from_keys(["skill", "old"]));
        state.expand(&TreePath::from_keys(["skill", "old", "deep"]));
        state.expand(&TreePath::from_keys(["skill", "other"]));

        state.remap_prefix(
            &TreePath::from_keys(["skill", "old"]),
            &TreePath::from_keys(["skill", "new"]),
        );
        assert!(state.is_expanded(&TreePath::from_keys(["skill", "new"])));
        assert!(state.is_expanded(&TreePath::from_keys(["skill", "new", "deep"])));
        assert!(state.is_expanded(&TreePath::from_keys(["skill", "other"])));
        assert!(!state.is_expanded(&TreePath::from_keys(["skill", "old"])));
    }
}
