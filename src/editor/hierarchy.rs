//! Fixed-depth editor for the industry-style hierarchy: category ->
//! subcategory -> detail, three levels exactly, each level with its own add,
//! edit, and remove affordances. Expansion reuses the path scheme of the
//! generic editor (index keys) instead of hand-built composite strings.

use crate::core::path::TreePath;
use crate::core::record::OptionRecord;

use super::expansion::ExpansionState;

#[derive(Debug, Clone, Default)]
pub struct HierarchyEditor {
    categories: Vec<OptionRecord>,
    expansion: ExpansionState,
}

impl HierarchyEditor {
    /// Takes the record list of the hierarchy leaf; each record's `children`
    /// hold its subcategories, whose `children` hold the details.
    pub fn new(categories: Vec<OptionRecord>) -> Self {
        Self {
            categories,
            expansion: ExpansionState::new(),
        }
    }

    pub fn categories(&self) -> &[OptionRecord] {
        self.categories.as_slice()
    }

    /// Hand the records back for a path-addressed leaf write.
    pub fn into_records(self) -> Vec<OptionRecord> {
        self.categories
    }

    fn category_path(cat: usize) -> TreePath {
        TreePath::from_keys([cat.to_string()])
    }

    fn subcategory_path(cat: usize, sub: usize) -> TreePath {
        TreePath::from_keys([cat.to_string(), sub.to_string()])
    }

    pub fn toggle_category(&mut self, cat: usize) -> bool {
        self.expansion.toggle(&Self::category_path(cat))
    }

    pub fn toggle_subcategory(&mut self, cat: usize, sub: usize) -> bool {
        self.expansion.toggle(&Self::subcategory_path(cat, sub))
    }

    pub fn is_category_expanded(&self, cat: usize) -> bool {
        self.expansion.is_expanded(&Self::category_path(cat))
    }

    pub fn is_subcategory_expanded(&self, cat: usize, sub: usize) -> bool {
        self.expansion.is_expanded(&Self::subcategory_path(cat, sub))
    }

    /// Add affordances expose a single label input per level; the system
    /// value starts out mirroring the label. Blank labels are rejected.
    pub fn add_category(&mut self, label: &str) -> bool {
        push_labeled(&mut self.categories, label)
    }

    pub fn add_subcategory(&mut self, cat: usize, label: &str) -> bool {
        let Some(category) = self.categories.get_mut(cat) else {
            return false;
        };
        push_labeled(&mut category.children, label)
    }

    pub fn add_detail(&mut self, cat: usize, sub: usize, label: &str) -> bool {
        let Some(subcategory) = self.subcategory_mut(cat, sub) else {
            return false;
        };
        push_labeled(&mut subcategory.children, label)
    }

    pub fn update_category_label(&mut self, cat: usize, label: &str) -> bool {
        let Some(category) = self.categories.get_mut(cat) else {
            return false;
        };
        relabel(category, label);
        true
    }

    pub fn update_subcategory_label(&mut self, cat: usize, sub: usize, label: &str) -> bool {
        let Some(subcategory) = self.subcategory_mut(cat, sub) else {
            return false;
        };
        relabel(subcategory, label);
        true
    }

    pub fn update_detail_label(&mut self, cat: usize, sub: usize, detail: usize, label: &str) -> bool {
        let Some(record) = self.detail_mut(cat, sub, detail) else {
            return false;
        };
        relabel(record, label);
        true
    }

    /// Explicitly set a detail's system value, breaking the label mirror.
    pub fn set_detail_value(&mut self, cat: usize, sub: usize, detail: usize, value: &str) -> bool {
        let Some(record) = self.detail_mut(cat, sub, detail) else {
            return false;
        };
        record.value = value.to_string();
        true
    }

    /// Drops the category and its whole subtree. The interactive
    /// confirmation gate lives with the caller.
    pub fn remove_category(&mut self, cat: usize) -> bool {
        if cat >= self.categories.len() {
            return false;
        }
        self.categories.remove(cat);
        self.expansion.remove_subtree(&Self::category_path(cat));
        // Later siblings shift down one index; keep their expansion aligned.
        for idx in cat + 1..=self.categories.len() {
            self.expansion
                .remap_prefix(&Self::category_path(idx), &Self::category_path(idx - 1));
        }
        true
    }

    pub fn remove_subcategory(&mut self, cat: usize, sub: usize) -> bool {
        let Some(category) = self.categories.get_mut(cat) else {
            return false;
        };
        if sub >= category.children.len() {
            return false;
        }
        category.children.remove(sub);
        let remaining = category.children.len();
        self.expansion
            .remove_subtree(&Self::subcategory_path(cat, sub));
        for idx in sub + 1..=remaining {
            self.expansion.remap_prefix(
                &Self::subcategory_path(cat, idx),
                &Self::subcategory_path(cat, idx - 1),
            );
        }
        true
    }

    pub fn remove_detail(&mut self, cat: usize, sub: usize, detail: usize) -> bool {
        let Some(subcategory) = self.subcategory_mut(cat, sub) else {
            return false;
        };
        if detail >= subcategory.children.len() {
            return false;
        }
        subcategory.children.remove(detail);
        true
    }

    fn subcategory_mut(&mut self, cat: usize, sub: usize) -> Option<&mut OptionRecord> {
        self.categories.get_mut(cat)?.children.get_mut(sub)
    }

    fn detail_mut(&mut self, cat: usize, sub: usize, detail: usize) -> Option<&mut OptionRecord> {
        self.subcategory_mut(cat, sub)?.children.get_mut(detail)
    }
}

fn push_labeled(records: &mut Vec<OptionRecord>, label: &str) -> bool {
    let label = label.trim();
    if label.is_empty() {
        return false;
    }
    records.push(OptionRecord::labeled(label));
    true
}

/// Relabel a record. The value follows the label only while the two are in
/// their mirrored state (equal, or value still empty); a value that was set
/// explicitly stays put. The upstream editor synced unconditionally, which
/// clobbered values brought in by bulk import.
fn relabel(record: &mut OptionRecord, label: &str) {
    let mirrored = record.value.is_empty() || record.value == record.label;
    record.label = label.to_string();
    if mirrored {
        record.value = label.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::HierarchyEditor;

    fn editor() -> HierarchyEditor {
        let mut editor = HierarchyEditor::default();
        assert!(editor.add_category("Teknologi"));
        assert!(editor.add_subcategory(0, "Software"));
        assert!(editor.add_detail(0, 0, "Backend"));
        assert!(editor.add_detail(0, 0, "Frontend"));
        editor
    }

    #[test]
    fn builds_three_levels() {
        let editor = editor();
        let category = &editor.categories()[0];
        assert_eq!(category.label, "Teknologi");
        assert_eq!(category.children[0].label, "Software");
        let details: Vec<_> = category.children[0]
            .children
            .iter()
            .map(|d| d.label.as_str())
            .collect();
        assert_eq!(details, ["Backend", "Frontend"]);
    }

    #[test]
    fn blank_labels_are_rejected_at_every_level() {
        let mut editor = editor();
        assert!(!editor.add_category("  "));
        assert!(!editor.add_subcategory(0, ""));
        assert!(!editor.add_detail(0, 0, " "));
        assert!(!editor.add_detail(5, 0, "orphan"));
    }

    #[test]
    fn relabel_keeps_the_mirror_while_untouched() {
        let mut editor = editor();
        assert!(editor.update_detail_label(0, 0, 0, "Backend Engineering"));
        assert_eq!(
            editor.categories()[0].children[0].children[0].value,
            "Backend Engineering"
        );
    }

    #[test]
    fn explicit_value_survives_relabeling() {
        let mut editor = editor();
        assert!(editor.set_detail_value(0, 0, 0, "be"));
        assert!(editor.update_detail_label(0, 0, 0, "Backend Engineering"));
        let detail = &editor.categories()[0].children[0].children[0];
        assert_eq!(detail.label, "Backend Engineering");
        assert_eq!(detail.value, "be");
    }

    #[test]
    fn removal_shifts_expansion_with_the_survivors() {
        let mut editor = HierarchyEditor::default();
        editor.add_category("A");
        editor.add_category("B");
        editor.add_category("C");
        editor.toggle_category(2);

        assert!(editor.remove_category(0));
        let labels: Vec<_> = editor.categories().iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, ["B", "C"]);
        assert!(editor.is_category_expanded(1));
        assert!(!editor.is_category_expanded(2));
    }

    #[test]
    fn removing_a_subcategory_drops_its_details() {
        let mut editor = editor();
        assert!(editor.remove_subcategory(0, 0));
        assert!(editor.categories()[0].children.is_empty());
        assert!(!editor.remove_subcategory(0, 0));
    }

    #[test]
    fn round_trips_as_records() {
        let editor = editor();
        let records = editor.clone().into_records();
        let rebuilt = HierarchyEditor::new(records.clone());
        assert_eq!(rebuilt.categories(), records.as_slice());
        assert_eq!(records[0].children[0].children.len(), 2);
    }
}
