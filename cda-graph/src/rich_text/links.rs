use cda_model::{LinkTarget, RichNode};
use cda_types::{Link, LinkShapeError};
use serde_json::Value;

use crate::{GraphError, GraphResult, ReferenceResolver};

/// Builds a copy of `document` with every link and embed target resolved.
///
/// Walks the whole tree, so hyperlinks nested in paragraphs, list items or
/// quotes are all reached. Targets that are already resolved are kept as
/// they are. `field_id` and `locale` only feed error diagnostics.
pub fn resolve_links(
    document: &RichNode,
    resolver: &mut ReferenceResolver<'_>,
    field_id: &str,
    locale: &str,
) -> GraphResult<RichNode> {
    document.try_map_targets(&mut |target: &LinkTarget| {
        resolve_target(target, resolver)
            .map_err(|source| GraphError::illegal_link(field_id, locale, source))
    })
}

fn resolve_target(
    target: &LinkTarget,
    resolver: &mut ReferenceResolver<'_>,
) -> Result<LinkTarget, LinkShapeError> {
    let LinkTarget::Unresolved(data) = target else {
        return Ok(target.clone());
    };
    let Some(data) = data.as_object() else {
        return Ok(LinkTarget::Missing);
    };

    let uri = data.get("uri").and_then(Value::as_str);
    match data.get("target") {
        None | Some(Value::Null) => Ok(uri.map_or(LinkTarget::Missing, |uri| {
            LinkTarget::Uri(uri.to_string())
        })),
        Some(raw) => {
            let link = Link::from_value(raw)?;
            Ok(resolver.resolve_link(&link, uri))
        }
    }
}
