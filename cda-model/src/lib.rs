//! Resource model for the content delivery graph resolver.
//!
//! Defines the types every resolution stage reads and produces:
//! - [`Resource`]: one asset or entry, with its [`RawFieldIndex`] and resolved [`FieldValue`]s
//! - [`ResourceSet`]: the ordered resources of one response plus id lookups
//! - [`ContentType`]: field schema used to find link and rich text fields
//! - [`RichNode`] / [`Mark`] / [`LinkTarget`]: the typed rich text tree
//! - [`ContentTypeSource`], [`AssetValidityChecker`], [`ContentTypeIdProvider`]:
//!   collaborator services supplied by the surrounding client
//!
//! Nothing here performs resolution; that lives in `cda-graph`.

mod resource;
mod rich;
mod schema;
mod services;
mod set;

pub use resource::{FieldMap, FieldValue, RawFieldIndex, Resource};
pub use rich::{LinkTarget, Mark, RichNode};
pub use schema::{ContentType, ContentTypeField, ContentTypeRegistry, FieldItems, FieldType};
pub use services::{
    AssetValidityChecker, ContentTypeIdProvider, ContentTypeSource, NoOracle, Services,
};
pub use set::ResourceSet;

use cda_types::{ResourceId, ResourceKind};

/// Result type for model operations.
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors that can occur while assembling model values.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// An id was inserted under one live kind while the other already holds it.
    #[error("id {id} is already used by an {existing}")]
    ConflictingId { id: ResourceId, existing: ResourceKind },
}
