use cda_model::{LinkTarget, Resource, ResourceSet};
use cda_types::{ResourceId, ResourceKey};
use std::collections::BTreeSet;

use crate::{PlaceholderCache, ResolvedGraph};

/// One materialized point-in-time snapshot of a synced space.
///
/// Items are all surviving assets followed by all surviving entries. The
/// deletion sets hold what the delta that produced this snapshot deleted,
/// whether or not those ids were ever held locally.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SynchronizedSpace {
    pub(crate) graph: ResolvedGraph,
    pub(crate) deleted_asset_ids: BTreeSet<ResourceId>,
    pub(crate) deleted_entry_ids: BTreeSet<ResourceId>,
    pub(crate) next_sync_url: Option<String>,
    pub(crate) next_page_url: Option<String>,
}

impl SynchronizedSpace {
    pub fn graph(&self) -> &ResolvedGraph {
        &self.graph
    }

    pub fn resources(&self) -> &ResourceSet {
        self.graph.resources()
    }

    pub fn placeholders(&self) -> &PlaceholderCache {
        self.graph.placeholders()
    }

    pub fn items(&self) -> &[Resource] {
        self.graph.items()
    }

    pub fn assets(&self) -> impl Iterator<Item = &Resource> {
        self.resources().assets()
    }

    pub fn entries(&self) -> impl Iterator<Item = &Resource> {
        self.resources().entries()
    }

    pub fn asset(&self, id: &str) -> Option<&Resource> {
        self.graph.asset(id)
    }

    pub fn entry(&self, id: &str) -> Option<&Resource> {
        self.graph.entry(id)
    }

    pub fn resource(&self, key: &ResourceKey) -> Option<&Resource> {
        self.graph.resource(key)
    }

    pub fn target(&self, target: &LinkTarget) -> Option<&Resource> {
        self.graph.target(target)
    }

    pub fn deleted_asset_ids(&self) -> &BTreeSet<ResourceId> {
        &self.deleted_asset_ids
    }

    pub fn deleted_entry_ids(&self) -> &BTreeSet<ResourceId> {
        &self.deleted_entry_ids
    }

    /// `nextSyncUrl` of the delta, present once the delta is exhausted.
    pub fn next_sync_url(&self) -> Option<&str> {
        self.next_sync_url.as_deref()
    }

    /// `nextPageUrl` of the delta, present while more pages remain.
    pub fn next_page_url(&self) -> Option<&str> {
        self.next_page_url.as_deref()
    }

    pub fn into_graph(self) -> ResolvedGraph {
        self.graph
    }
}
