//! Rich-text document tree as produced by the note editor.
//!
//! A document is a tree of [`DocumentNode`]s serialized as editor JSON:
//!
//! ```json
//! { "type": "doc", "content": [
//!     { "type": "paragraph", "content": [{ "type": "text", "text": "Hello" }] },
//!     { "type": "image", "attrs": { "src": "https://cdn.example/a.png" } }
//! ] }
//! ```
//!
//! Only `type`, `attrs` and `content` are interpreted. Every other member
//! (`text`, `marks`, ...) is kept in [`DocumentNode::extra`] and written back
//! unchanged, so a document survives a read/sanitize/write cycle intact.
//!
//! The editor is not strict about shapes, so neither is this module: a
//! non-string `type`, a non-object `attrs`, or a `content` that is not an
//! array is stored verbatim in `extra` and the node behaves as if the field
//! were absent. Items of a `content` array that are not objects (a stray
//! `null`, say) are dropped; their object siblings are still parsed.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Node type of a paragraph block.
pub const PARAGRAPH: &str = "paragraph";

/// Node type of an embedded image.
pub const IMAGE: &str = "image";

/// Node type the editor inserts while an image upload is in flight.
pub const IMAGE_UPLOAD: &str = "imageUpload";

/// One node of a rich-text document tree.
///
/// # Examples
///
/// ```rust
/// use lightnote_core::DocumentNode;
///
/// let node: DocumentNode = serde_json::from_str(
///     r#"{"type":"text","text":"hi","marks":[{"type":"bold"}]}"#,
/// ).unwrap();
/// assert!(node.is_type("text"));
/// assert!(node.content.is_none());
/// assert_eq!(node.extra["text"], "hi");
///
/// let back = serde_json::to_value(&node).unwrap();
/// assert_eq!(back["marks"][0]["type"], "bold");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "Value")]
pub struct DocumentNode {
    /// The `type` tag, e.g. `"doc"`, `"paragraph"`, `"image"`.
    pub node_type: Option<String>,
    /// The `attrs` object, e.g. `{ "src": "..." }` on an image.
    pub attrs: Option<Map<String, Value>>,
    /// Child nodes in document order. `None` for leaves.
    pub content: Option<Vec<DocumentNode>>,
    /// All other members, including malformed `type`/`attrs`/`content`.
    pub extra: Map<String, Value>,
}

impl DocumentNode {
    /// Creates an empty node of the given type.
    pub fn new(node_type: impl Into<String>) -> Self {
        Self {
            node_type: Some(node_type.into()),
            ..Self::default()
        }
    }

    /// Replaces the node's children.
    #[must_use]
    pub fn with_content(mut self, children: Vec<DocumentNode>) -> Self {
        self.content = Some(children);
        self
    }

    /// Sets a single attribute, creating the `attrs` map if needed.
    #[must_use]
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attrs
            .get_or_insert_with(Map::new)
            .insert(key.into(), value.into());
        self
    }

    /// Returns `true` if the node's `type` equals `node_type`.
    pub fn is_type(&self, node_type: &str) -> bool {
        self.node_type.as_deref() == Some(node_type)
    }

    /// Returns the attribute `key` if it is present and a string.
    pub fn attr_str(&self, key: &str) -> Option<&str> {
        self.attrs.as_ref()?.get(key)?.as_str()
    }

    /// Returns the children, or an empty slice for leaves.
    pub fn children(&self) -> &[DocumentNode] {
        self.content.as_deref().unwrap_or_default()
    }

    fn from_members(mut members: Map<String, Value>) -> Self {
        let node_type = match members.remove("type") {
            Some(Value::String(s)) => Some(s),
            Some(other) => {
                members.insert("type".to_string(), other);
                None
            }
            None => None,
        };

        let attrs = match members.remove("attrs") {
            Some(Value::Object(map)) => Some(map),
            Some(other) => {
                members.insert("attrs".to_string(), other);
                None
            }
            None => None,
        };

        let content = match members.remove("content") {
            Some(Value::Array(items)) => Some(
                items
                    .into_iter()
                    .filter_map(|item| match item {
                        Value::Object(child) => Some(Self::from_members(child)),
                        _ => None,
                    })
                    .collect(),
            ),
            Some(other) => {
                members.insert("content".to_string(), other);
                None
            }
            None => None,
        };

        Self {
            node_type,
            attrs,
            content,
            extra: members,
        }
    }
}

impl TryFrom<Value> for DocumentNode {
    type Error = serde_json::Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(members) => Ok(Self::from_members(members)),
            other => Err(<serde_json::Error as serde::de::Error>::custom(format!(
                "document node must be a JSON object, found {other}"
            ))),
        }
    }
}

impl From<DocumentNode> for Value {
    fn from(node: DocumentNode) -> Self {
        let mut members = node.extra;
        if let Some(node_type) = node.node_type {
            members.insert("type".to_string(), Value::String(node_type));
        }
        if let Some(attrs) = node.attrs {
            members.insert("attrs".to_string(), Value::Object(attrs));
        }
        if let Some(content) = node.content {
            members.insert(
                "content".to_string(),
                Value::Array(content.into_iter().map(Value::from).collect()),
            );
        }
        Value::Object(members)
    }
}
