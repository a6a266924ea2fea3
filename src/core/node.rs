use indexmap::IndexMap;
use serde_json::Value;

use super::record::OptionRecord;

/// A node of the option tree. The remote schema is duck-typed JSON; shape
/// probing happens exactly once, in [`OptionNode::from_value`], so the rest
/// of the engine dispatches on this tag and never re-inspects raw JSON.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionNode {
    /// Terminal ordered list of uniform records.
    Leaf(Vec<OptionRecord>),
    /// Leaf that additionally carries a human description, e.g. a skill
    /// category. Writes through the mutation engine replace only `items`.
    DescribedLeaf {
        description: String,
        items: Vec<OptionRecord>,
    },
    /// Named sub-tree. Insertion order is display order.
    Branch(IndexMap<String, OptionNode>),
}

impl OptionNode {
    pub fn empty_branch() -> Self {
        Self::Branch(IndexMap::new())
    }

    /// The single discriminator the renderer uses.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf(_) | Self::DescribedLeaf { .. })
    }

    pub fn leaf_items(&self) -> Option<&[OptionRecord]> {
        match self {
            Self::Leaf(items) => Some(items.as_slice()),
            Self::DescribedLeaf { items, .. } => Some(items.as_slice()),
            Self::Branch(_) => None,
        }
    }

    pub fn leaf_items_mut(&mut self) -> Option<&mut Vec<OptionRecord>> {
        match self {
            Self::Leaf(items) => Some(items),
            Self::DescribedLeaf { items, .. } => Some(items),
            Self::Branch(_) => None,
        }
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            Self::DescribedLeaf { description, .. } => Some(description.as_str()),
            _ => None,
        }
    }

    pub fn children(&self) -> Option<&IndexMap<String, OptionNode>> {
        match self {
            Self::Branch(children) => Some(children),
            _ => None,
        }
    }

    /// Normalize raw JSON into the tagged tree.
    ///
    /// - arrays become [`OptionNode::Leaf`], parsing records leniently;
    /// - objects exposing an items list (canonical `items`, legacy `daftar`)
    ///   become [`OptionNode::DescribedLeaf`];
    /// - other objects become [`OptionNode::Branch`];
    /// - scalars and anything unrecognized become an empty branch, rendered
    ///   as nothing rather than rejected. The remote configuration may be
    ///   partially migrated.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Array(entries) => Self::Leaf(records_from_array(entries)),
            Value::Object(map) => {
                if let Some(items) = described_items(value) {
                    let description = map
                        .get("description")
                        .or_else(|| map.get("deskripsi"))
                        .and_then(Value::as_str)
                        .unwrap_or_default()
                        .to_string();
                    return Self::DescribedLeaf {
                        description,
                        items: records_from_array(items),
                    };
                }
                let mut children = IndexMap::with_capacity(map.len());
                for (key, child) in map {
                    children.insert(key.clone(), Self::from_value(child));
                }
                Self::Branch(children)
            }
            _ => Self::empty_branch(),
        }
    }

    /// Lower back to JSON for the persistence boundary. Described leaves
    /// always serialize under the canonical `items` key.
    pub fn to_value(&self) -> Value {
        match self {
            Self::Leaf(items) => records_to_array(items),
            Self::DescribedLeaf { description, items } => serde_json::json!({
                "description": description,
                "items": records_to_array(items),
            }),
            Self::Branch(children) => {
                let mut map = serde_json::Map::with_capacity(children.len());
                for (key, child) in children {
                    map.insert(key.clone(), child.to_value());
                }
                Value::Object(map)
            }
        }
    }
}

fn described_items(value: &Value) -> Option<&Vec<Value>> {
    let map = value.as_object()?;
    map.get("items")
        .or_else(|| map.get("daftar"))
        .and_then(Value::as_array)
}

fn records_from_array(entries: &[Value]) -> Vec<OptionRecord> {
    entries.iter().map(record_from_value).collect()
}

fn record_from_value(value: &Value) -> OptionRecord {
    match value {
        // Bare strings show up in older payloads; treat them as label=value.
        Value::String(text) => OptionRecord::labeled(text.clone()),
        Value::Object(_) => {
            serde_json::from_value(value.clone()).unwrap_or_default()
        }
        _ => OptionRecord::default(),
    }
}

fn records_to_array(items: &[OptionRecord]) -> Value {
    Value::Array(
        items
            .iter()
            .map(|record| {
                serde_json::to_value(record)
                    .expect("record serializes to plain string-keyed JSON")
            })
            .collect(),
    )
}
