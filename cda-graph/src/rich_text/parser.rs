use cda_model::{LinkTarget, Mark, RichNode};
use serde_json::{Map, Value};
use tracing::debug;

/// Parses a raw rich text field value into a `Document` node.
///
/// The root is always treated as a document, whatever its `nodeType`.
/// Returns `None` if the value is not an object.
pub fn parse_document(raw: &Value) -> Option<RichNode> {
    let map = raw.as_object()?;
    Some(RichNode::Document {
        content: parse_content(map),
    })
}

/// Parses one raw node by its `nodeType`.
///
/// Returns `None` for unknown node types, and for values that are not nodes
/// at all; callers drop such children and keep their siblings.
pub fn parse_node(raw: &Value) -> Option<RichNode> {
    let map = raw.as_object()?;
    let node_type = map.get("nodeType").and_then(Value::as_str)?;

    let node = match node_type {
        "document" => RichNode::Document {
            content: parse_content(map),
        },
        "paragraph" => RichNode::Paragraph {
            content: parse_content(map),
        },
        "blockquote" => RichNode::Quote {
            content: parse_content(map),
        },
        "ordered-list" => RichNode::OrderedList {
            content: parse_content(map),
        },
        "unordered-list" => RichNode::UnorderedList {
            content: parse_content(map),
        },
        "list-item" => RichNode::ListItem {
            content: parse_content(map),
        },
        "hr" => RichNode::HorizontalRule,
        "text" => RichNode::Text {
            value: map
                .get("value")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            marks: parse_marks(map.get("marks")),
        },
        "hyperlink" => RichNode::HyperLink {
            target: raw_target(map),
            content: parse_content(map),
        },
        "entry-hyperlink" => RichNode::EntryHyperLink {
            target: raw_target(map),
            content: parse_content(map),
        },
        "asset-hyperlink" => RichNode::AssetHyperLink {
            target: raw_target(map),
            content: parse_content(map),
        },
        "embedded-entry-block" | "embedded-asset-block" => RichNode::EmbeddedBlock {
            target: raw_target(map),
            content: parse_content(map),
        },
        "embedded-entry-inline" => RichNode::EmbeddedInline {
            target: raw_target(map),
            content: parse_content(map),
        },
        other => match heading_level(other) {
            Some(level) => RichNode::Heading {
                level,
                content: parse_content(map),
            },
            None => {
                debug!("Skipping unknown rich text node type {:?}", other);
                return None;
            }
        },
    };
    Some(node)
}

/// Parses a raw `marks` sequence, keeping order and duplicates.
///
/// Unknown mark types become [`Mark::Custom`]; marks without a string
/// `type` are skipped.
pub fn parse_marks(raw: Option<&Value>) -> Vec<Mark> {
    raw.and_then(Value::as_array)
        .map(|marks| {
            marks
                .iter()
                .filter_map(|m| m.get("type").and_then(Value::as_str))
                .map(Mark::from_type)
                .collect()
        })
        .unwrap_or_default()
}

fn parse_content(map: &Map<String, Value>) -> Vec<RichNode> {
    map.get("content")
        .and_then(Value::as_array)
        .map(|children| children.iter().filter_map(parse_node).collect())
        .unwrap_or_default()
}

/// The node's `data` map, kept verbatim until the link pass.
fn raw_target(map: &Map<String, Value>) -> LinkTarget {
    LinkTarget::Unresolved(map.get("data").cloned().unwrap_or(Value::Null))
}

/// Only the six exact `heading-N` tags are headings.
fn heading_level(node_type: &str) -> Option<u8> {
    match node_type {
        "heading-1" => Some(1),
        "heading-2" => Some(2),
        "heading-3" => Some(3),
        "heading-4" => Some(4),
        "heading-5" => Some(5),
        "heading-6" => Some(6),
        _ => None,
    }
}
