pub mod core;
pub mod editor;
pub mod notify;
pub mod select;
pub mod store;

pub use crate::core::mutate;
pub use crate::core::node::OptionNode;
pub use crate::core::path::{TreePath, TreePathParseError};
pub use crate::core::record::OptionRecord;

pub use crate::editor::expansion::ExpansionState;
pub use crate::editor::hierarchy::HierarchyEditor;
pub use crate::editor::leaf_list::{LeafListEditor, RecordField};
pub use crate::editor::rows::{RowKind, TreeRow, build_rows};
pub use crate::editor::session::EditorSession;

pub use crate::notify::{Notifier, Toast, ToastKind, ToastQueue};
pub use crate::select::{AnchorRect, ComboMatch, ComboOption, Combobox, PanelPlacement, Viewport};
pub use crate::store::{HttpStore, KeyValueStore, MemoryStore, StoreError, unwrap_payload};
