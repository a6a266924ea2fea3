pub mod mutate;
pub mod node;
pub mod path;
pub mod record;

pub use node::OptionNode;
pub use path::TreePath;
pub use record::OptionRecord;
