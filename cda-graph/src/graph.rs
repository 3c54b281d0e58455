use cda_model::{LinkTarget, Resource, ResourceSet};
use cda_types::ResourceKey;

use crate::PlaceholderCache;

/// The output of one resolution pass: resources with resolved fields, plus
/// the placeholders synthesized for links that left the payload.
///
/// Resolved references are keys. [`ResolvedGraph::resource`] maps a key to
/// its one canonical instance, so every reference to the same `(kind, id)`
/// reads the same resource wherever it appeared.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedGraph {
    resources: ResourceSet,
    placeholders: PlaceholderCache,
}

impl ResolvedGraph {
    pub(crate) fn new(resources: ResourceSet, placeholders: PlaceholderCache) -> Self {
        Self {
            resources,
            placeholders,
        }
    }

    pub fn resources(&self) -> &ResourceSet {
        &self.resources
    }

    pub fn placeholders(&self) -> &PlaceholderCache {
        &self.placeholders
    }

    /// Resources in order, deletion markers included.
    pub fn items(&self) -> &[Resource] {
        self.resources.items()
    }

    pub fn asset(&self, id: &str) -> Option<&Resource> {
        self.resources.asset(id)
    }

    pub fn entry(&self, id: &str) -> Option<&Resource> {
        self.resources.entry(id)
    }

    /// The canonical instance for `key`, live or synthesized.
    pub fn resource(&self, key: &ResourceKey) -> Option<&Resource> {
        self.resources
            .get(key)
            .or_else(|| self.placeholders.get(key))
    }

    /// Follows a resolved link target.
    pub fn target(&self, target: &LinkTarget) -> Option<&Resource> {
        target.resource_key().and_then(|key| self.resource(key))
    }

    pub fn into_resources(self) -> ResourceSet {
        self.resources
    }
}
