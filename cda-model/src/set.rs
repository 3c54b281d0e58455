use cda_types::{ResourceId, ResourceKey, ResourceKind};
use std::collections::HashMap;

use crate::{FieldMap, ModelError, ModelResult, Resource};

/// The resources of one response, in response order, with id lookups.
///
/// Each `(kind, id)` appears at most once. An id held by the asset map can
/// never also be held by the entry map, and vice versa. Deletion markers
/// keep their place in the ordered sequence but are not reachable through
/// [`ResourceSet::asset`] or [`ResourceSet::entry`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceSet {
    items: Vec<Resource>,
    assets_by_id: HashMap<ResourceId, usize>,
    entries_by_id: HashMap<ResourceId, usize>,
    deleted_by_key: HashMap<ResourceKey, usize>,
}

impl ResourceSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from resources in order, keeping the first of any duplicates.
    pub fn from_resources(resources: impl IntoIterator<Item = Resource>) -> ModelResult<Self> {
        let mut set = Self::new();
        for resource in resources {
            set.insert(resource)?;
        }
        Ok(set)
    }

    /// Appends a resource.
    ///
    /// Returns `false` and discards `resource` when its `(kind, id)` is
    /// already present. Fails if the id is held by the other live kind.
    pub fn insert(&mut self, resource: Resource) -> ModelResult<bool> {
        let index = self.items.len();
        let (own, other, other_kind) = match resource.kind {
            ResourceKind::Asset => (
                &mut self.assets_by_id,
                &self.entries_by_id,
                ResourceKind::Entry,
            ),
            ResourceKind::Entry => (
                &mut self.entries_by_id,
                &self.assets_by_id,
                ResourceKind::Asset,
            ),
            ResourceKind::DeletedAsset | ResourceKind::DeletedEntry => {
                let key = resource.key();
                if self.deleted_by_key.contains_key(&key) {
                    return Ok(false);
                }
                self.deleted_by_key.insert(key, index);
                self.items.push(resource);
                return Ok(true);
            }
        };

        if own.contains_key(&resource.id) {
            return Ok(false);
        }
        if other.contains_key(&resource.id) {
            return Err(ModelError::ConflictingId {
                id: resource.id,
                existing: other_kind,
            });
        }
        own.insert(resource.id.clone(), index);
        self.items.push(resource);
        Ok(true)
    }

    /// Every resource in insertion order, deletion markers included.
    pub fn items(&self) -> &[Resource] {
        &self.items
    }

    pub fn into_items(self) -> Vec<Resource> {
        self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn asset(&self, id: &str) -> Option<&Resource> {
        self.assets_by_id.get(id).map(|&i| &self.items[i])
    }

    pub fn entry(&self, id: &str) -> Option<&Resource> {
        self.entries_by_id.get(id).map(|&i| &self.items[i])
    }

    /// Looks up any resource, deletion markers included, by key.
    pub fn get(&self, key: &ResourceKey) -> Option<&Resource> {
        match key.kind {
            ResourceKind::Asset => self.asset(key.id.as_str()),
            ResourceKind::Entry => self.entry(key.id.as_str()),
            ResourceKind::DeletedAsset | ResourceKind::DeletedEntry => {
                self.deleted_by_key.get(key).map(|&i| &self.items[i])
            }
        }
    }

    pub fn contains(&self, key: &ResourceKey) -> bool {
        self.get(key).is_some()
    }

    /// Live assets in insertion order.
    pub fn assets(&self) -> impl Iterator<Item = &Resource> {
        self.items.iter().filter(|r| r.kind == ResourceKind::Asset)
    }

    /// Live entries in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = &Resource> {
        self.items.iter().filter(|r| r.kind == ResourceKind::Entry)
    }

    /// Deletion markers in insertion order.
    pub fn deleted(&self) -> impl Iterator<Item = &Resource> {
        self.items.iter().filter(|r| r.kind.is_deleted())
    }

    pub fn asset_count(&self) -> usize {
        self.assets_by_id.len()
    }

    pub fn entry_count(&self) -> usize {
        self.entries_by_id.len()
    }

    /// Replaces every resource's resolved fields, in item order.
    ///
    /// `fields` must hold exactly one map per item. Debug builds panic on a
    /// length mismatch.
    pub fn replace_fields(&mut self, fields: Vec<FieldMap>) {
        debug_assert_eq!(
            fields.len(),
            self.items.len(),
            "replace_fields needs one field map per resource"
        );
        for (resource, fields) in self.items.iter_mut().zip(fields) {
            resource.fields = fields;
        }
    }
}
