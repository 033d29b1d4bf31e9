use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::TreeError;

/// One node of a mind map: a label and an ordered list of owned children.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub label: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            children: Vec::new(),
        }
    }

    pub fn with_children(label: impl Into<String>, children: Vec<Self>) -> Self {
        Self {
            label: label.into(),
            children,
        }
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Self::node_count).sum::<usize>()
    }

    /// Build a node from untyped JSON, checking structural shape only.
    ///
    /// External generators label nodes inconsistently; `label`, `title`,
    /// `name` and `key` are all accepted. A node with no label field at all
    /// gets an empty label. Anything that is not an object, or whose
    /// `children` is not an array, is rejected.
    pub fn from_value(value: &Value) -> Result<Self, TreeError> {
        let Some(map) = value.as_object() else {
            return Err(TreeError::Malformed(format!(
                "expected an object node, got {value}"
            )));
        };

        let mut label = String::new();
        for field in ["label", "title", "name", "key"] {
            if let Some(raw) = map.get(field) {
                let Some(text) = raw.as_str() else {
                    return Err(TreeError::Malformed(format!(
                        "field '{field}' is not a string"
                    )));
                };
                label = text.to_string();
                break;
            }
        }

        let children = match map.get("children") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items
                .iter()
                .map(Self::from_value)
                .collect::<Result<Vec<_>, _>>()?,
            Some(other) => {
                return Err(TreeError::Malformed(format!(
                    "'children' is not an array, got {other}"
                )));
            }
        };

        Ok(Self { label, children })
    }
}
