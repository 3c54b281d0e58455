//! Error types for the resolution layer.

use cda_model::ModelError;
use cda_types::{LinkShapeError, ResourceId};
use thiserror::Error;

/// Result type for graph operations.
pub type GraphResult<T> = Result<T, GraphError>;

/// Errors that abort a build or resolution pass.
///
/// None of these leave a partially linked graph behind: the pass that
/// raised them returns nothing else.
#[derive(Debug, Error)]
pub enum GraphError {
    /// The response body does not have the expected top-level shape.
    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    /// A raw item has no usable `sys.id` or `sys.type`.
    #[error("malformed resource at index {index}: {reason}")]
    MalformedResource { index: usize, reason: String },

    /// A reference object is not `{"sys": {"type": "Link", "linkType", "id"}}`.
    #[error(
        "could not parse link in field '{field}' for locale '{locale}': {source}; check the content model"
    )]
    IllegalLinkShape {
        field: String,
        locale: String,
        #[source]
        source: LinkShapeError,
    },

    /// An entry's field schema was not supplied before resolution.
    #[error("no field schema for entry {entry_id} (content type {content_type_id:?})")]
    UnknownContentType {
        entry_id: ResourceId,
        content_type_id: Option<String>,
    },

    /// Merged resources violate a resource set invariant.
    #[error(transparent)]
    Model(#[from] ModelError),

    /// The response body is not valid JSON.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl GraphError {
    pub(crate) fn illegal_link(field: &str, locale: &str, source: LinkShapeError) -> Self {
        Self::IllegalLinkShape {
            field: field.to_string(),
            locale: locale.to_string(),
            source,
        }
    }
}
