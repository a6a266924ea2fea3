use serde::{Deserialize, Serialize};

/// One selectable/editable entry of a leaf list: a dropdown choice, a skill,
/// an industry category. `children` is only populated for multi-level
/// hierarchies (category -> subcategory -> detail).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OptionRecord {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<OptionRecord>,
}

impl OptionRecord {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            ..Self::default()
        }
    }

    /// Label-only record whose system value mirrors the label. The simple
    /// editors stage new entries this way until a value is typed explicitly.
    pub fn labeled(label: impl Into<String>) -> Self {
        let label = label.into();
        Self::new(label.clone(), label)
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    pub fn with_children(mut self, children: Vec<OptionRecord>) -> Self {
        self.children = children;
        self
    }

    /// A record may only be appended to a list when both label and value are
    /// non-empty after trimming. Edits after creation may leave either empty
    /// transiently; that is the editor's concern, not this gate's.
    pub fn is_complete(&self) -> bool {
        !self.label.trim().is_empty() && !self.value.trim().is_empty()
    }

    /// Copy with label/value trimmed, applied at the moment of add.
    pub fn trimmed(&self) -> Self {
        let mut out = self.clone();
        out.label = out.label.trim().to_string();
        out.value = out.value.trim().to_string();
        out
    }

    /// Display affordance derived from the ISO code. Never stored back onto
    /// the record; `code` stays the single source of truth.
    pub fn flag_image_url(&self) -> Option<String> {
        let code = self.code.as_deref()?.trim();
        if code.is_empty() {
            return None;
        }
        Some(format!(
            "https://flagcdn.com/{}.svg",
            code.to_ascii_lowercase()
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::OptionRecord;

    #[test]
    fn completeness_requires_label_and_value() {
        assert!(!OptionRecord::new("", "x").is_complete());
        assert!(!OptionRecord::new("x", "").is_complete());
        assert!(!OptionRecord::new("  ", "x").is_complete());
        assert!(OptionRecord::new("x", "y").is_complete());
    }

    #[test]
    fn labeled_mirrors_value() {
        let record = OptionRecord::labeled("Remote");
        assert_eq!(record.label, "Remote");
        assert_eq!(record.value, "Remote");
    }

    #[test]
    fn flag_url_comes_from_code() {
        let record = OptionRecord::new("English", "en").with_code("GB");
        assert_eq!(
            record.flag_image_url().as_deref(),
            Some("https://flagcdn.com/gb.svg")
        );
        assert_eq!(OptionRecord::new("English", "en").flag_image_url(), None);
    }

    #[test]
    fn empty_optionals_are_skipped_on_serialize() {
        let json = serde_json::to_value(OptionRecord::new("1-10", "1-10")).unwrap();
        assert_eq!(json, serde_json::json!({"label": "1-10", "value": "1-10"}));
    }
}
