//! Searchable selector over a fully materialized option list. A small
//! Closed/Open state machine with an editable query; filtering is a
//! case-insensitive substring match against labels. No arrow-key navigation
//! and no async option fetching, by design.

mod geometry;

pub use geometry::{AnchorRect, PanelPlacement, Viewport};

const DEFAULT_PANEL_MAX_HEIGHT: f64 = 240.0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComboOption {
    pub label: String,
    pub value: String,
}

impl ComboOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }

    /// Option whose value mirrors its label.
    pub fn plain(label: impl Into<String>) -> Self {
        let label = label.into();
        Self::new(label.clone(), label)
    }
}

/// One option that survived the filter, with the matched label range for
/// highlighting. `index` addresses the source option list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComboMatch {
    pub index: usize,
    pub ranges: Vec<(usize, usize)>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct OpenState {
    anchor: AnchorRect,
    placement: PanelPlacement,
}

pub struct Combobox {
    options: Vec<ComboOption>,
    query: String,
    committed: String,
    open: Option<OpenState>,
    allow_custom_value: bool,
    panel_max_height: f64,

    /// Set when a transition wants the input blurred (the clear affordance
    /// commits, closes, and blurs atomically). Drained by the front end.
    pub pending_blur: bool,
}

impl Combobox {
    pub fn new(options: Vec<ComboOption>) -> Self {
        Self {
            options,
            query: String::new(),
            committed: String::new(),
            open: None,
            allow_custom_value: false,
            panel_max_height: DEFAULT_PANEL_MAX_HEIGHT,
            pending_blur: false,
        }
    }

    pub fn from_labels<I>(labels: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self::new(labels.into_iter().map(ComboOption::plain).collect())
    }

    /// Free-text mode: every keystroke commits the raw typed string, with no
    /// requirement that it match an option.
    pub fn with_allow_custom_value(mut self, allow: bool) -> Self {
        self.allow_custom_value = allow;
        self
    }

    pub fn with_panel_max_height(mut self, height: f64) -> Self {
        self.panel_max_height = height;
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.committed = value.into();
        self.query = self.committed_label();
        self
    }

    pub fn set_options(&mut self, options: Vec<ComboOption>) {
        self.options = options;
    }

    pub fn options(&self) -> &[ComboOption] {
        self.options.as_slice()
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    pub fn query(&self) -> &str {
        self.query.as_str()
    }

    pub fn value(&self) -> &str {
        self.committed.as_str()
    }

    pub fn placement(&self) -> Option<PanelPlacement> {
        self.open.map(|state| state.placement)
    }

    /// The anchor snapshot taken when the panel opened.
    pub fn anchor(&self) -> Option<AnchorRect> {
        self.open.map(|state| state.anchor)
    }

    /// Focus opens the panel: the displayed query is cleared so the full
    /// list shows, and the panel position is snapshotted from the anchor
    /// once. It is not re-derived while open.
    pub fn focus(&mut self, anchor: AnchorRect, viewport: Viewport) {
        self.query.clear();
        self.open = Some(OpenState {
            anchor,
            placement: PanelPlacement::compute(anchor, viewport, self.panel_max_height),
        });
    }

    pub fn input(&mut self, text: impl Into<String>) {
        self.query = text.into();
        if self.allow_custom_value {
            self.committed = self.query.clone();
        }
    }

    /// Case-insensitive substring filter over labels; the empty query keeps
    /// every option.
    pub fn filtered(&self) -> Vec<ComboMatch> {
        let query = self.query.trim();
        self.options
            .iter()
            .enumerate()
            .filter_map(|(index, option)| {
                let ranges = substring_ranges(query, &option.label)?;
                Some(ComboMatch { index, ranges })
            })
            .collect()
    }

    /// Commit the option at `index` (into the source list): value becomes
    /// the option's value, the displayed query its label, and the panel
    /// closes. Out-of-range index is a no-op.
    pub fn select(&mut self, index: usize) -> bool {
        let Some(option) = self.options.get(index) else {
            return false;
        };
        self.committed = option.value.clone();
        self.query = option.label.clone();
        self.open = None;
        true
    }

    /// Pointer-down outside both the input and the floating panel dismisses:
    /// close, and restore the query to the committed option's label rather
    /// than whatever was mid-typed.
    pub fn pointer_down(&mut self, inside_input: bool, inside_panel: bool) {
        if inside_input || inside_panel {
            return;
        }
        self.dismiss();
    }

    /// Any scroll originating outside the panel closes it; the placement is
    /// a snapshot, and closing beats a panel detached from its input.
    pub fn scroll(&mut self, inside_panel: bool) {
        if inside_panel {
            return;
        }
        self.dismiss();
    }

    pub fn resize(&mut self) {
        self.dismiss();
    }

    /// Clear affordance: commit the empty value, close, and blur, as one
    /// step.
    pub fn clear(&mut self) {
        self.committed.clear();
        self.query.clear();
        self.open = None;
        self.pending_blur = true;
    }

    pub fn take_pending_blur(&mut self) -> bool {
        std::mem::take(&mut self.pending_blur)
    }

    fn dismiss(&mut self) {
        if self.open.is_none() {
            return;
        }
        self.open = None;
        self.query = self.committed_label();
    }

    /// Label shown for the committed value: the matching option's label, the
    /// raw committed string for custom values, empty when nothing is
    /// committed.
    fn committed_label(&self) -> String {
        if self.committed.is_empty() {
            return String::new();
        }
        self.options
            .iter()
            .find(|option| option.value == self.committed)
            .map(|option| option.label.clone())
            .unwrap_or_else(|| {
                if self.allow_custom_value {
                    self.committed.clone()
                } else {
                    String::new()
                }
            })
    }
}

/// First case-insensitive occurrence of `query` in `label`, as a char-index
/// range. `Some(empty)` for the empty query, `None` for no match.
fn substring_ranges(query: &str, label: &str) -> Option<Vec<(usize, usize)>> {
    if query.is_empty() {
        return Some(Vec::new());
    }
    let query_chars: Vec<char> = query.chars().map(|c| c.to_ascii_lowercase()).collect();
    let label_chars: Vec<char> = label.chars().map(|c| c.to_ascii_lowercase()).collect();
    if query_chars.len() > label_chars.len() {
        return None;
    }
    for start in 0..=label_chars.len() - query_chars.len() {
        if label_chars[start..start + query_chars.len()] == query_chars[..] {
            return Some(vec![(start, start + query_chars.len())]);
        }
    }
    None
}
