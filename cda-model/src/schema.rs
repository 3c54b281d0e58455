use cda_types::LinkType;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use crate::{ContentTypeSource, ModelResult};

/// Field schema of one content type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "WireContentType", into = "WireContentType")]
pub struct ContentType {
    pub id: String,
    pub name: Option<String>,
    pub display_field: Option<String>,
    pub fields: Vec<ContentTypeField>,
}

impl ContentType {
    pub fn new(id: impl Into<String>, fields: Vec<ContentTypeField>) -> Self {
        Self {
            id: id.into(),
            name: None,
            display_field: None,
            fields,
        }
    }

    /// Parses a content type as delivered by the API (`{"sys": {"id": ...}, "fields": [...]}`).
    pub fn from_value(value: &Value) -> ModelResult<Self> {
        Ok(Self::deserialize(value)?)
    }

    pub fn field(&self, field_id: &str) -> Option<&ContentTypeField> {
        self.fields.iter().find(|f| f.id == field_id)
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireContentType {
    sys: WireSys,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    display_field: Option<String>,
    #[serde(default)]
    fields: Vec<ContentTypeField>,
}

#[derive(Serialize, Deserialize)]
struct WireSys {
    id: String,
}

impl From<WireContentType> for ContentType {
    fn from(wire: WireContentType) -> Self {
        Self {
            id: wire.sys.id,
            name: wire.name,
            display_field: wire.display_field,
            fields: wire.fields,
        }
    }
}

impl From<ContentType> for WireContentType {
    fn from(ct: ContentType) -> Self {
        Self {
            sys: WireSys { id: ct.id },
            name: ct.name,
            display_field: ct.display_field,
            fields: ct.fields,
        }
    }
}

/// One field declared by a content type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentTypeField {
    pub id: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Only meaningful when `field_type` is `Link`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_type: Option<LinkType>,
    /// Element schema. Only meaningful when `field_type` is `Array`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<FieldItems>,
    #[serde(default)]
    pub localized: bool,
    #[serde(default)]
    pub disabled: bool,
}

impl ContentTypeField {
    fn simple(id: &str, field_type: FieldType) -> Self {
        Self {
            id: id.into(),
            field_type,
            link_type: None,
            items: None,
            localized: false,
            disabled: false,
        }
    }

    /// Shorthand for a short text field.
    pub fn symbol(id: &str) -> Self {
        Self::simple(id, FieldType::Symbol)
    }

    /// Shorthand for a long text field.
    pub fn text(id: &str) -> Self {
        Self::simple(id, FieldType::Text)
    }

    /// Shorthand for a rich text field.
    pub fn rich_text(id: &str) -> Self {
        Self::simple(id, FieldType::RichText)
    }

    /// Shorthand for a single link field.
    pub fn link(id: &str, link_type: LinkType) -> Self {
        Self {
            link_type: Some(link_type),
            ..Self::simple(id, FieldType::Link)
        }
    }

    /// Shorthand for an array of links.
    pub fn link_array(id: &str, link_type: LinkType) -> Self {
        Self {
            items: Some(FieldItems {
                item_type: FieldType::Link,
                link_type: Some(link_type),
            }),
            ..Self::simple(id, FieldType::Array)
        }
    }

    pub fn is_rich_text(&self) -> bool {
        self.field_type == FieldType::RichText
    }

    pub fn is_link(&self) -> bool {
        self.field_type == FieldType::Link
    }

    /// True for `Array` fields whose items are links.
    pub fn is_link_array(&self) -> bool {
        self.field_type == FieldType::Array
            && self
                .items
                .as_ref()
                .is_some_and(|items| items.item_type == FieldType::Link)
    }
}

/// Element schema of an `Array` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldItems {
    #[serde(rename = "type")]
    pub item_type: FieldType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_type: Option<LinkType>,
}

/// The data type of a content type field, by its wire name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldType {
    Symbol,
    Text,
    RichText,
    Integer,
    Number,
    Date,
    Boolean,
    Location,
    Object,
    Link,
    Array,
    /// A type this client does not know; treated as a plain value.
    #[serde(other)]
    Unknown,
}

/// In-memory [`ContentTypeSource`] keyed by content type id.
#[derive(Debug, Clone, Default)]
pub struct ContentTypeRegistry {
    types: HashMap<String, ContentType>,
}

impl ContentTypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a content type.
    pub fn insert(&mut self, content_type: ContentType) {
        self.types.insert(content_type.id.clone(), content_type);
    }

    pub fn with(mut self, content_type: ContentType) -> Self {
        self.insert(content_type);
        self
    }

    /// Loads every content type from a collection response (`{"items": [...]}`)
    /// or a bare array of content types.
    pub fn from_value(value: &Value) -> ModelResult<Self> {
        let items = value.get("items").unwrap_or(value);
        let types: Vec<ContentType> = Vec::deserialize(items)?;
        Ok(types.into_iter().fold(Self::new(), Self::with))
    }

    pub fn get(&self, content_type_id: &str) -> Option<&ContentType> {
        self.types.get(content_type_id)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl ContentTypeSource for ContentTypeRegistry {
    fn content_type_fields(&self, content_type_id: &str) -> Option<&[ContentTypeField]> {
        self.get(content_type_id).map(|ct| ct.fields.as_slice())
    }
}
