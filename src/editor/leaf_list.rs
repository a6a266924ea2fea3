use crate::core::record::OptionRecord;

/// Editable field of a record, addressed by the UI's input bindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordField {
    Label,
    Value,
    Code,
    Image,
}

/// CRUD over one ordered record list, plus the staged "new record" draft the
/// add affordance fills in. Deletion asks for no confirmation here; callers
/// that need a destructive-action gate put it in front of [`remove`].
///
/// [`remove`]: LeafListEditor::remove
#[derive(Debug, Clone, Default)]
pub struct LeafListEditor {
    items: Vec<OptionRecord>,
    draft: OptionRecord,
}

impl LeafListEditor {
    pub fn new(items: Vec<OptionRecord>) -> Self {
        Self {
            items,
            draft: OptionRecord::default(),
        }
    }

    pub fn items(&self) -> &[OptionRecord] {
        self.items.as_slice()
    }

    pub fn into_items(self) -> Vec<OptionRecord> {
        self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn draft(&self) -> &OptionRecord {
        &self.draft
    }

    pub fn set_draft_field(&mut self, field: RecordField, value: impl Into<String>) {
        apply_field(&mut self.draft, field, value.into());
    }

    /// Append the staged draft. A draft with an empty value borrows its
    /// label first (the simple editors expose only a label input); after
    /// that, both label and value must be non-empty or the add is a no-op.
    /// On success the draft is cleared.
    pub fn add(&mut self) -> bool {
        let mut staged = self.draft.trimmed();
        if staged.value.is_empty() && !staged.label.is_empty() {
            staged.value = staged.label.clone();
        }
        if !staged.is_complete() {
            return false;
        }
        self.items.push(staged);
        self.draft = OptionRecord::default();
        true
    }

    /// Append a fully formed record, same completeness gate as [`add`].
    ///
    /// [`add`]: LeafListEditor::add
    pub fn add_record(&mut self, record: OptionRecord) -> bool {
        let staged = record.trimmed();
        if !staged.is_complete() {
            return false;
        }
        self.items.push(staged);
        true
    }

    /// Replace one field in place. Out-of-range index is a no-op. Edits may
    /// leave label or value empty transiently; the record is not dropped.
    pub fn update(&mut self, index: usize, field: RecordField, value: impl Into<String>) -> bool {
        let Some(record) = self.items.get_mut(index) else {
            return false;
        };
        apply_field(record, field, value.into());
        true
    }

    /// Delete at `index`, preserving the relative order of the rest.
    pub fn remove(&mut self, index: usize) -> bool {
        if index >= self.items.len() {
            return false;
        }
        self.items.remove(index);
        true
    }
}

fn apply_field(record: &mut OptionRecord, field: RecordField, value: String) {
    match field {
        RecordField::Label => record.label = value,
        RecordField::Value => record.value = value,
        // Clearing an optional field removes it from the persisted payload.
        RecordField::Code => record.code = (!value.is_empty()).then_some(value),
        RecordField::Image => record.image = (!value.is_empty()).then_some(value),
    }
}
