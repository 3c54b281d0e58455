//! Graph builder - turns one response body into a [`ResourceSet`].
//!
//! Handles collection responses (`{"items": [...], "includes": {"Asset": [...],
//! "Entry": [...]}}`) and sync deltas (`{"items": [...]}` with deletion
//! markers). Links and rich text are left untouched; those passes run later,
//! possibly over a superset of these resources.

use cda_model::{RawFieldIndex, Resource, ResourceSet};
use cda_types::ResourceKind;
use serde_json::Value;
use tracing::debug;

use crate::{GraphError, GraphResult};

/// Sections of `includes` read by the builder, in order.
const INCLUDE_SECTIONS: [&str; 2] = ["Asset", "Entry"];

/// Builds resource sets from raw response bodies.
#[derive(Debug, Clone, Copy, Default)]
pub struct GraphBuilder;

impl GraphBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Instantiates one resource per primary item, then per included item.
    ///
    /// When a `(kind, id)` appears more than once the first occurrence wins,
    /// so primary items shadow included duplicates. Any malformed item
    /// aborts the whole build.
    pub fn build(&self, payload: &Value) -> GraphResult<ResourceSet> {
        let body = payload.as_object().ok_or_else(|| {
            GraphError::MalformedPayload("response body is not an object".to_string())
        })?;

        let items = array_or_empty(body.get("items"), "items")?;
        let mut included: Vec<&Value> = Vec::new();
        if let Some(includes) = body.get("includes").filter(|v| !v.is_null()) {
            let includes = includes.as_object().ok_or_else(|| {
                GraphError::MalformedPayload("`includes` is not an object".to_string())
            })?;
            for section in INCLUDE_SECTIONS {
                let label = format!("includes.{section}");
                included.extend(array_or_empty(includes.get(section), &label)?);
            }
        }

        let mut set = ResourceSet::new();
        let mut discarded = 0usize;
        for (index, raw) in items.iter().chain(included.iter().copied()).enumerate() {
            let resource = parse_resource(index, raw)?;
            let inserted = set
                .insert(resource)
                .map_err(|e| GraphError::MalformedResource {
                    index,
                    reason: e.to_string(),
                })?;
            if !inserted {
                discarded += 1;
            }
        }

        debug!(
            "Built resource set: {} primary, {} included, {} duplicates discarded",
            items.len(),
            included.len(),
            discarded
        );
        Ok(set)
    }
}

/// Instantiates a single raw item. `index` is only used for diagnostics.
pub fn parse_resource(index: usize, raw: &Value) -> GraphResult<Resource> {
    let malformed = |reason: String| GraphError::MalformedResource { index, reason };

    let sys = raw
        .get("sys")
        .and_then(Value::as_object)
        .ok_or_else(|| malformed("missing `sys`".to_string()))?;
    let kind_name = sys
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| malformed("missing `sys.type`".to_string()))?;
    let kind: ResourceKind = kind_name
        .parse()
        .map_err(|_| malformed(format!("unsupported `sys.type` {kind_name:?}")))?;
    let id = sys
        .get("id")
        .and_then(Value::as_str)
        .ok_or_else(|| malformed("missing `sys.id`".to_string()))?;

    let mut resource = Resource::new(kind, id);
    resource.revision = sys.get("revision").and_then(Value::as_u64);
    if kind == ResourceKind::Entry {
        resource.content_type_id = raw
            .pointer("/sys/contentType/sys/id")
            .and_then(Value::as_str)
            .map(str::to_string);
    }

    if !kind.is_deleted() {
        if let Some(fields) = raw.get("fields").and_then(Value::as_object) {
            resource.raw_fields = match sys.get("locale").and_then(Value::as_str) {
                Some(locale) => RawFieldIndex::from_single_locale(fields, locale),
                None => RawFieldIndex::from_localized(fields),
            };
        }
    }

    Ok(resource)
}

fn array_or_empty<'v>(value: Option<&'v Value>, label: &str) -> GraphResult<&'v [Value]> {
    match value {
        None | Some(Value::Null) => Ok(&[]),
        Some(Value::Array(items)) => Ok(items),
        Some(_) => Err(GraphError::MalformedPayload(format!(
            "`{label}` is not an array"
        ))),
    }
}
