//! Link placeholders: `{"sys": {"type": "Link", "linkType": ..., "id": ...}}`.
//!
//! A link is a deferred reference found inside raw field values. It is never
//! a resource itself.

use serde_json::Value;
use std::fmt;

use crate::{LinkType, ResourceId, ResourceKey};

/// Why a raw value is not a well-formed link.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LinkShapeError {
    #[error("expected a link object, found {0}")]
    NotAnObject(&'static str),

    #[error("link has no `sys` object")]
    MissingSys,

    #[error("`sys.type` is {0:?}, expected \"Link\"")]
    NotALink(Option<String>),

    #[error("`sys.linkType` is {0:?}, expected \"Entry\" or \"Asset\"")]
    UnknownLinkType(Option<String>),

    #[error("link has no string `sys.id`")]
    MissingId,

    #[error("expected an array of links, found {0}")]
    NotAnArray(&'static str),
}

impl LinkShapeError {
    /// Error for a value that should have been an array of links.
    pub fn not_an_array(value: &Value) -> Self {
        Self::NotAnArray(json_type_name(value))
    }
}

/// A well-formed, typed link placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Link {
    pub link_type: LinkType,
    pub id: ResourceId,
}

impl Link {
    #[must_use]
    pub fn new(link_type: LinkType, id: impl Into<ResourceId>) -> Self {
        Self {
            link_type,
            id: id.into(),
        }
    }

    /// Validates and extracts a link from a raw value.
    ///
    /// Both link types require an id.
    pub fn from_value(value: &Value) -> Result<Self, LinkShapeError> {
        let map = value
            .as_object()
            .ok_or_else(|| LinkShapeError::NotAnObject(json_type_name(value)))?;
        let sys = map
            .get("sys")
            .and_then(Value::as_object)
            .ok_or(LinkShapeError::MissingSys)?;

        let sys_type = sys.get("type").and_then(Value::as_str);
        if sys_type != Some("Link") {
            return Err(LinkShapeError::NotALink(sys_type.map(str::to_string)));
        }

        let link_type_str = sys.get("linkType").and_then(Value::as_str);
        let link_type = link_type_str
            .and_then(|s| s.parse::<LinkType>().ok())
            .ok_or_else(|| LinkShapeError::UnknownLinkType(link_type_str.map(str::to_string)))?;

        let id = sys
            .get("id")
            .and_then(Value::as_str)
            .ok_or(LinkShapeError::MissingId)?;

        Ok(Self::new(link_type, id))
    }

    /// True if `value` passes [`Link::from_value`].
    #[must_use]
    pub fn is_link(value: &Value) -> bool {
        Self::from_value(value).is_ok()
    }

    /// Key of the resource this link points at.
    #[must_use]
    pub fn key(&self) -> ResourceKey {
        ResourceKey::new(self.link_type.kind(), self.id.clone())
    }

    /// Renders the link back into its raw JSON shape.
    #[must_use]
    pub fn to_value(&self) -> Value {
        serde_json::json!({
            "sys": {
                "type": "Link",
                "linkType": self.link_type.as_str(),
                "id": self.id.as_str(),
            }
        })
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Link<{}>({})", self.link_type, self.id)
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
