pub mod expansion;
pub mod hierarchy;
pub mod leaf_list;
pub mod rows;
pub mod session;

pub use expansion::ExpansionState;
pub use hierarchy::HierarchyEditor;
pub use leaf_list::{LeafListEditor, RecordField};
pub use rows::{RowKind, TreeRow, build_rows};
pub use session::EditorSession;
