//! Core type definitions for the content delivery graph resolver.
//!
//! This crate defines the small vocabulary shared by the
//! model and the resolution engine:
//! - Resource identifiers and kinds ([`ResourceId`], [`ResourceKind`], [`ResourceKey`])
//! - Link types and the link placeholder shape check ([`LinkType`], [`Link`])
//!
//! Anything that knows about fields, content types, or rich text belongs in
//! `cda-model`, not here.

mod ids;
mod link;

pub use ids::{LinkType, ResourceId, ResourceKey, ResourceKind};
pub use link::{Link, LinkShapeError};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unknown resource kind: {0}")]
    UnknownKind(String),

    #[error("unknown link type: {0}")]
    UnknownLinkType(String),
}
