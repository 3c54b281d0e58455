//! Reference resolution.
//!
//! A [`ReferenceResolver`] lives for exactly one resolution pass. It looks
//! links up in the pass's [`ResourceSet`] and, when the target is absent but
//! the collaborator oracles vouch for it, synthesizes a placeholder. The
//! placeholder cache guarantees one canonical instance per `(kind, id)`, and
//! oracle misses are remembered so each absent id is asked about once.

use cda_model::{LinkTarget, Resource, ResourceSet, Services};
use cda_types::{Link, LinkShapeError, LinkType, ResourceId, ResourceKey};
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use tracing::debug;

use crate::ResolveConfig;

/// Placeholders synthesized during one resolution pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaceholderCache {
    placeholders: HashMap<ResourceKey, Resource>,
}

impl PlaceholderCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &ResourceKey) -> Option<&Resource> {
        self.placeholders.get(key)
    }

    pub fn contains(&self, key: &ResourceKey) -> bool {
        self.placeholders.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.placeholders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placeholders.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Resource> {
        self.placeholders.values()
    }

    fn insert(&mut self, resource: Resource) {
        self.placeholders.insert(resource.key(), resource);
    }
}

/// Resolves link placeholders against one pass's resources.
pub struct ReferenceResolver<'a> {
    resources: &'a ResourceSet,
    services: Services<'a>,
    config: &'a ResolveConfig,
    cache: PlaceholderCache,
    /// Absent ids the oracles already turned down in this pass.
    misses: HashSet<ResourceKey>,
}

impl<'a> ReferenceResolver<'a> {
    pub fn new(resources: &'a ResourceSet, services: Services<'a>, config: &'a ResolveConfig) -> Self {
        Self {
            resources,
            services,
            config,
            cache: PlaceholderCache::new(),
            misses: HashSet::new(),
        }
    }

    /// Resolves a well-formed link.
    ///
    /// `uri` is a literal uri carried next to the link. For entry links it
    /// takes precedence over asking the content type id provider, but not
    /// over a placeholder this pass already synthesized for the same id.
    pub fn resolve_link(&mut self, link: &Link, uri: Option<&str>) -> LinkTarget {
        let id = link.id.as_str();
        match link.link_type {
            LinkType::Asset => {
                if self.resources.asset(id).is_some() {
                    return LinkTarget::Resource(link.key());
                }
                self.synthesize_asset(&link.id)
            }
            LinkType::Entry => {
                let key = link.key();
                if self.resources.entry(id).is_some() || self.cache.contains(&key) {
                    return LinkTarget::Resource(key);
                }
                if let Some(uri) = uri {
                    return LinkTarget::Uri(uri.to_string());
                }
                self.synthesize_entry(&link.id)
            }
        }
    }

    /// Validates a raw link value and resolves it.
    pub fn resolve_value(&mut self, value: &Value) -> Result<LinkTarget, LinkShapeError> {
        let link = Link::from_value(value)?;
        Ok(self.resolve_link(&link, None))
    }

    /// The canonical instance for `key`: the pass's resources first, then
    /// placeholders synthesized so far.
    pub fn resource(&self, key: &ResourceKey) -> Option<&Resource> {
        self.resources.get(key).or_else(|| self.cache.get(key))
    }

    pub fn placeholders(&self) -> &PlaceholderCache {
        &self.cache
    }

    pub fn into_placeholders(self) -> PlaceholderCache {
        self.cache
    }

    fn synthesize_asset(&mut self, id: &ResourceId) -> LinkTarget {
        let key = ResourceKey::asset(id.clone());
        if self.cache.contains(&key) {
            return LinkTarget::Resource(key);
        }
        if !self.config.synthesize_placeholders || self.misses.contains(&key) {
            return LinkTarget::Missing;
        }
        if !self.services.assets.is_valid_asset(id.as_str()) {
            self.misses.insert(key);
            return LinkTarget::Missing;
        }
        debug!("Synthesized placeholder for asset {}", id);
        self.cache.insert(Resource::placeholder_asset(id.clone()));
        LinkTarget::Resource(key)
    }

    fn synthesize_entry(&mut self, id: &ResourceId) -> LinkTarget {
        let key = ResourceKey::entry(id.clone());
        if self.cache.contains(&key) {
            return LinkTarget::Resource(key);
        }
        if !self.config.synthesize_placeholders || self.misses.contains(&key) {
            return LinkTarget::Missing;
        }
        match self.services.content_type_ids.content_type_id(id.as_str()) {
            Some(content_type_id) => {
                debug!("Synthesized placeholder for entry {} ({})", id, content_type_id);
                self.cache
                    .insert(Resource::placeholder_entry(id.clone(), content_type_id));
                LinkTarget::Resource(key)
            }
            None => {
                self.misses.insert(key);
                LinkTarget::Missing
            }
        }
    }
}
