//! Sync merger - folds a delta response into the previous snapshot.
//!
//! The delta is authoritative: an upsert overwrites whatever the prior
//! snapshot held under the same id, and a deletion removes it. Resolution
//! runs only after merging, so links may cross from new resources to old
//! ones and back.

use cda_model::{Resource, ResourceSet};
use cda_types::{ResourceId, ResourceKind};
use indexmap::IndexMap;
use serde_json::Value;
use std::collections::BTreeSet;
use tracing::debug;

use crate::{GraphResult, ResolutionEngine, SynchronizedSpace};

/// Resources of a merged snapshot before resolution.
#[derive(Debug, Clone, Default)]
pub struct MergedResources {
    /// Surviving assets, then surviving entries.
    pub resources: ResourceSet,
    pub deleted_asset_ids: BTreeSet<ResourceId>,
    pub deleted_entry_ids: BTreeSet<ResourceId>,
}

/// Produces the next [`SynchronizedSpace`] from a prior one and a delta.
pub struct SyncMerger<'e, 'a> {
    engine: &'e ResolutionEngine<'a>,
}

impl<'e, 'a> SyncMerger<'e, 'a> {
    pub fn new(engine: &'e ResolutionEngine<'a>) -> Self {
        Self { engine }
    }

    /// Builds the delta, merges it over `prior` (or over nothing) and runs a
    /// full resolution pass on the result.
    ///
    /// `prior` is only read; callers that keep it keep an independent copy.
    pub fn merge(
        &self,
        prior: Option<&SynchronizedSpace>,
        delta: &Value,
    ) -> GraphResult<SynchronizedSpace> {
        let delta_resources = self.engine.build(delta)?;
        let merged = merge_resources(prior.map(SynchronizedSpace::resources), delta_resources)?;
        let graph = self.engine.resolve(merged.resources)?;

        Ok(SynchronizedSpace {
            graph,
            deleted_asset_ids: merged.deleted_asset_ids,
            deleted_entry_ids: merged.deleted_entry_ids,
            next_sync_url: string_field(delta, "nextSyncUrl"),
            next_page_url: string_field(delta, "nextPageUrl"),
        })
    }
}

/// Merges delta resources over prior ones without resolving anything.
///
/// Upserts are applied first and deletions last, so a deletion wins over
/// an upsert of the same id in one delta. Map order is prior order with new
/// ids appended; an overwritten id keeps its slot.
pub fn merge_resources(
    prior: Option<&ResourceSet>,
    delta: ResourceSet,
) -> GraphResult<MergedResources> {
    let mut assets: IndexMap<ResourceId, Resource> = IndexMap::new();
    let mut entries: IndexMap<ResourceId, Resource> = IndexMap::new();
    if let Some(prior) = prior {
        assets.extend(prior.assets().map(|r| (r.id.clone(), r.clone())));
        entries.extend(prior.entries().map(|r| (r.id.clone(), r.clone())));
    }

    let mut deletions = Vec::new();
    let mut upserts = 0usize;
    for resource in delta.into_items() {
        match resource.kind {
            ResourceKind::Asset => {
                assets.insert(resource.id.clone(), resource);
                upserts += 1;
            }
            ResourceKind::Entry => {
                entries.insert(resource.id.clone(), resource);
                upserts += 1;
            }
            ResourceKind::DeletedAsset | ResourceKind::DeletedEntry => deletions.push(resource),
        }
    }

    let mut deleted_asset_ids = BTreeSet::new();
    let mut deleted_entry_ids = BTreeSet::new();
    for deletion in &deletions {
        if deletion.kind == ResourceKind::DeletedAsset {
            assets.shift_remove(&deletion.id);
            deleted_asset_ids.insert(deletion.id.clone());
        } else {
            entries.shift_remove(&deletion.id);
            deleted_entry_ids.insert(deletion.id.clone());
        }
    }

    debug!(
        "Merged sync delta: {} upserts, {} deletions, {} assets and {} entries survive",
        upserts,
        deletions.len(),
        assets.len(),
        entries.len()
    );

    let resources = ResourceSet::from_resources(assets.into_values().chain(entries.into_values()))?;
    Ok(MergedResources {
        resources,
        deleted_asset_ids,
        deleted_entry_ids,
    })
}

fn string_field(payload: &Value, key: &str) -> Option<String> {
    payload.get(key).and_then(Value::as_str).map(str::to_string)
}
