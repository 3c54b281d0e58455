use cda_types::{ResourceId, ResourceKey, ResourceKind};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

use crate::{LinkTarget, RichNode};

/// Resolved field values: field id → locale → value.
pub type FieldMap = BTreeMap<String, BTreeMap<String, FieldValue>>;

/// Raw field values captured from the payload before any resolution.
///
/// Keyed field id → locale → raw JSON. Every resolution pass reads from
/// here, so passes can be repeated against the same source of truth.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RawFieldIndex(BTreeMap<String, BTreeMap<String, Value>>);

impl RawFieldIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Captures an already locale-keyed `fields` object (`{field: {locale: value}}`).
    ///
    /// Field values that are not locale maps are skipped.
    pub fn from_localized(fields: &serde_json::Map<String, Value>) -> Self {
        let mut index = Self::new();
        for (field_id, per_locale) in fields {
            if let Some(per_locale) = per_locale.as_object() {
                for (locale, value) in per_locale {
                    index.insert(field_id, locale, value.clone());
                }
            }
        }
        index
    }

    /// Captures a single-locale `fields` object (`{field: value}`) under `locale`.
    pub fn from_single_locale(fields: &serde_json::Map<String, Value>, locale: &str) -> Self {
        let mut index = Self::new();
        for (field_id, value) in fields {
            index.insert(field_id, locale, value.clone());
        }
        index
    }

    pub fn insert(&mut self, field_id: &str, locale: &str, value: Value) {
        self.0
            .entry(field_id.to_string())
            .or_default()
            .insert(locale.to_string(), value);
    }

    /// The raw value of one field in one locale.
    pub fn get(&self, field_id: &str, locale: &str) -> Option<&Value> {
        self.0.get(field_id).and_then(|locales| locales.get(locale))
    }

    /// All locales of one field.
    pub fn field(&self, field_id: &str) -> Option<&BTreeMap<String, Value>> {
        self.0.get(field_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &BTreeMap<String, Value>)> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// A field value after a resolution pass.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Not a link or rich text field; the raw value as delivered.
    Raw(Value),
    /// A single link field.
    Link(LinkTarget),
    /// An array-of-links field. Links that resolved to nothing are omitted.
    Links(Vec<ResourceKey>),
    RichText(RichNode),
}

impl FieldValue {
    pub fn as_raw(&self) -> Option<&Value> {
        match self {
            Self::Raw(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_link(&self) -> Option<&LinkTarget> {
        match self {
            Self::Link(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_links(&self) -> Option<&[ResourceKey]> {
        match self {
            Self::Links(keys) => Some(keys),
            _ => None,
        }
    }

    pub fn as_rich_text(&self) -> Option<&RichNode> {
        match self {
            Self::RichText(node) => Some(node),
            _ => None,
        }
    }
}

/// An asset or entry, or a deletion marker from a sync delta.
#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    pub id: ResourceId,
    pub kind: ResourceKind,
    /// Set for entries; `None` until known.
    pub content_type_id: Option<String>,
    /// `sys.revision`, when delivered.
    pub revision: Option<u64>,
    pub raw_fields: RawFieldIndex,
    /// Rebuilt from `raw_fields` on every resolution pass.
    pub fields: FieldMap,
    /// True for stand-ins synthesized during link resolution.
    pub placeholder: bool,
}

impl Resource {
    /// Creates a resource with no field data.
    pub fn new(kind: ResourceKind, id: impl Into<ResourceId>) -> Self {
        Self {
            id: id.into(),
            kind,
            content_type_id: None,
            revision: None,
            raw_fields: RawFieldIndex::new(),
            fields: FieldMap::new(),
            placeholder: false,
        }
    }

    /// Stand-in for an asset known to exist but absent from the payload.
    pub fn placeholder_asset(id: impl Into<ResourceId>) -> Self {
        Self {
            placeholder: true,
            ..Self::new(ResourceKind::Asset, id)
        }
    }

    /// Stand-in for an entry known to exist but absent from the payload.
    pub fn placeholder_entry(id: impl Into<ResourceId>, content_type_id: impl Into<String>) -> Self {
        Self {
            placeholder: true,
            content_type_id: Some(content_type_id.into()),
            ..Self::new(ResourceKind::Entry, id)
        }
    }

    pub fn with_content_type(mut self, content_type_id: impl Into<String>) -> Self {
        self.content_type_id = Some(content_type_id.into());
        self
    }

    pub fn with_raw_fields(mut self, raw_fields: RawFieldIndex) -> Self {
        self.raw_fields = raw_fields;
        self
    }

    pub fn key(&self) -> ResourceKey {
        ResourceKey::new(self.kind, self.id.clone())
    }

    /// True for synthesized stand-ins, which carry no field data.
    pub fn is_placeholder(&self) -> bool {
        self.placeholder
    }

    /// Resolved value of a field in one locale.
    pub fn field(&self, locale: &str, field_id: &str) -> Option<&FieldValue> {
        self.fields.get(field_id).and_then(|l| l.get(locale))
    }

    /// Raw value of a field in one locale.
    pub fn raw_field(&self, locale: &str, field_id: &str) -> Option<&Value> {
        self.raw_fields.get(field_id, locale)
    }

    /// Every locale present in the raw fields, sorted.
    pub fn locales(&self) -> Vec<&str> {
        let mut locales: Vec<&str> = self
            .raw_fields
            .iter()
            .flat_map(|(_, per_locale)| per_locale.keys().map(String::as_str))
            .collect();
        locales.sort_unstable();
        locales.dedup();
        locales
    }
}
