//! Per-resource field resolution.
//!
//! Entry fields are interpreted through their content type's schema:
//! `RichText` fields become node trees, `Link` and link-array fields become
//! resource keys, everything else stays raw. Asset fields are always raw.

use cda_model::{ContentTypeField, FieldMap, FieldValue, LinkTarget, Resource, Services};
use cda_types::{LinkShapeError, ResourceKey, ResourceKind};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::warn;

use crate::{GraphError, GraphResult, ReferenceResolver, ResolveConfig, rich_text};

/// Builds a fresh field map for `resource` from its raw fields.
pub(crate) fn resolve_fields(
    resource: &Resource,
    services: Services<'_>,
    config: &ResolveConfig,
    resolver: &mut ReferenceResolver<'_>,
) -> GraphResult<FieldMap> {
    match resource.kind {
        ResourceKind::Entry => {
            let schema = resource
                .content_type_id
                .as_deref()
                .and_then(|ct| services.content_types.content_type_fields(ct))
                .ok_or_else(|| GraphError::UnknownContentType {
                    entry_id: resource.id.clone(),
                    content_type_id: resource.content_type_id.clone(),
                })?;
            resolve_entry_fields(resource, schema, config, resolver)
        }
        ResourceKind::Asset => Ok(raw_field_map(resource)),
        ResourceKind::DeletedAsset | ResourceKind::DeletedEntry => Ok(FieldMap::new()),
    }
}

fn resolve_entry_fields(
    resource: &Resource,
    schema: &[ContentTypeField],
    config: &ResolveConfig,
    resolver: &mut ReferenceResolver<'_>,
) -> GraphResult<FieldMap> {
    let mut fields = FieldMap::new();
    for (field_id, per_locale) in resource.raw_fields.iter() {
        let declared = schema.iter().find(|f| &f.id == field_id);
        let mut resolved = BTreeMap::new();
        for (locale, raw) in per_locale {
            let value = match declared {
                Some(field) if field.is_rich_text() && config.resolve_rich_text => {
                    resolve_rich_text(resource, field_id, locale, raw, resolver)?
                }
                Some(field) if field.is_link() => FieldValue::Link(
                    resolve_single_link(raw, resolver)
                        .map_err(|e| GraphError::illegal_link(field_id, locale, e))?,
                ),
                Some(field) if field.is_link_array() => FieldValue::Links(
                    resolve_link_array(raw, resolver)
                        .map_err(|e| GraphError::illegal_link(field_id, locale, e))?,
                ),
                _ => FieldValue::Raw(raw.clone()),
            };
            resolved.insert(locale.clone(), value);
        }
        fields.insert(field_id.clone(), resolved);
    }
    Ok(fields)
}

fn resolve_rich_text(
    resource: &Resource,
    field_id: &str,
    locale: &str,
    raw: &Value,
    resolver: &mut ReferenceResolver<'_>,
) -> GraphResult<FieldValue> {
    match rich_text::parse_document(raw) {
        Some(document) => Ok(FieldValue::RichText(rich_text::resolve_links(
            &document, resolver, field_id, locale,
        )?)),
        None => {
            if !raw.is_null() {
                warn!(
                    "Rich text field '{}' ({}) of entry {} is not an object; leaving it raw",
                    field_id, locale, resource.id
                );
            }
            Ok(FieldValue::Raw(raw.clone()))
        }
    }
}

fn resolve_single_link(
    raw: &Value,
    resolver: &mut ReferenceResolver<'_>,
) -> Result<LinkTarget, LinkShapeError> {
    if raw.is_null() {
        return Ok(LinkTarget::Missing);
    }
    resolver.resolve_value(raw)
}

/// Links that resolve to nothing are dropped; the rest keep their order.
fn resolve_link_array(
    raw: &Value,
    resolver: &mut ReferenceResolver<'_>,
) -> Result<Vec<ResourceKey>, LinkShapeError> {
    let items = match raw {
        Value::Null => return Ok(Vec::new()),
        Value::Array(items) => items,
        other => return Err(LinkShapeError::not_an_array(other)),
    };

    let mut keys = Vec::with_capacity(items.len());
    for item in items {
        if let LinkTarget::Resource(key) = resolver.resolve_value(item)? {
            keys.push(key);
        }
    }
    Ok(keys)
}

fn raw_field_map(resource: &Resource) -> FieldMap {
    resource
        .raw_fields
        .iter()
        .map(|(field_id, per_locale)| {
            let values = per_locale
                .iter()
                .map(|(locale, raw)| (locale.clone(), FieldValue::Raw(raw.clone())))
                .collect();
            (field_id.clone(), values)
        })
        .collect()
}
