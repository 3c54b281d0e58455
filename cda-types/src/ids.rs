//! Identifier types used throughout the resolver.
//!
//! Ids come from the delivery API verbatim; they are opaque strings and are
//! only unique within one kind's namespace.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use crate::Error;

/// Identifier of an asset or entry, stable across syncs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceId(String);

impl ResourceId {
    /// Creates an id from any string-like value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ResourceId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ResourceId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl Borrow<str> for ResourceId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// The `sys.type` of a raw payload item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ResourceKind {
    Asset,
    Entry,
    DeletedAsset,
    DeletedEntry,
}

impl ResourceKind {
    /// Wire name as it appears in `sys.type`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asset => "Asset",
            Self::Entry => "Entry",
            Self::DeletedAsset => "DeletedAsset",
            Self::DeletedEntry => "DeletedEntry",
        }
    }

    /// True for the deletion pseudo-kinds found in sync deltas.
    #[must_use]
    pub const fn is_deleted(self) -> bool {
        matches!(self, Self::DeletedAsset | Self::DeletedEntry)
    }

    /// The live kind a deletion refers to; live kinds map to themselves.
    #[must_use]
    pub const fn live(self) -> Self {
        match self {
            Self::Asset | Self::DeletedAsset => Self::Asset,
            Self::Entry | Self::DeletedEntry => Self::Entry,
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Asset" => Ok(Self::Asset),
            "Entry" => Ok(Self::Entry),
            "DeletedAsset" => Ok(Self::DeletedAsset),
            "DeletedEntry" => Ok(Self::DeletedEntry),
            other => Err(Error::UnknownKind(other.to_string())),
        }
    }
}

/// The `sys.linkType` of a link placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LinkType {
    Asset,
    Entry,
}

impl LinkType {
    /// The resource kind a link of this type points at.
    #[must_use]
    pub const fn kind(self) -> ResourceKind {
        match self {
            Self::Asset => ResourceKind::Asset,
            Self::Entry => ResourceKind::Entry,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asset => "Asset",
            Self::Entry => "Entry",
        }
    }
}

impl fmt::Display for LinkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LinkType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Asset" => Ok(Self::Asset),
            "Entry" => Ok(Self::Entry),
            other => Err(Error::UnknownLinkType(other.to_string())),
        }
    }
}

/// Identity of a resource: `(kind, id)`.
///
/// Asset and entry ids live in separate namespaces, so the kind is part of
/// the key. Equality and hashing cover both.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ResourceKey {
    pub kind: ResourceKind,
    pub id: ResourceId,
}

impl ResourceKey {
    #[must_use]
    pub fn new(kind: ResourceKind, id: impl Into<ResourceId>) -> Self {
        Self {
            kind,
            id: id.into(),
        }
    }

    /// Key of a live asset.
    #[must_use]
    pub fn asset(id: impl Into<ResourceId>) -> Self {
        Self::new(ResourceKind::Asset, id)
    }

    /// Key of a live entry.
    #[must_use]
    pub fn entry(id: impl Into<ResourceId>) -> Self {
        Self::new(ResourceKind::Entry, id)
    }
}

impl fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.id)
    }
}
