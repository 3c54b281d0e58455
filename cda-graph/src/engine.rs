//! Resolution engine - the entry point tying the stages together.
//!
//! The engine holds no mutable state. Each call runs a complete pass
//! (build, rich text, links) with its own placeholder cache and returns
//! either a fully linked result or an error; nothing in between.

use cda_model::{ResourceSet, Services};
use serde_json::Value;
use tracing::{debug, info};

use crate::fields::resolve_fields;
use crate::{
    GraphBuilder, GraphResult, ReferenceResolver, ResolveConfig, ResolvedGraph, SyncMerger,
    SynchronizedSpace,
};

/// Resolves collection responses and sync deltas into linked graphs.
pub struct ResolutionEngine<'a> {
    services: Services<'a>,
    config: ResolveConfig,
    builder: GraphBuilder,
}

impl<'a> ResolutionEngine<'a> {
    /// Creates an engine with the default configuration.
    pub fn new(services: Services<'a>) -> Self {
        Self::with_config(services, ResolveConfig::default())
    }

    pub fn with_config(services: Services<'a>, config: ResolveConfig) -> Self {
        Self {
            services,
            config,
            builder: GraphBuilder::new(),
        }
    }

    pub fn config(&self) -> &ResolveConfig {
        &self.config
    }

    pub fn services(&self) -> Services<'a> {
        self.services
    }

    /// Builds the resource set of one response body without resolving it.
    pub fn build(&self, payload: &Value) -> GraphResult<ResourceSet> {
        self.builder.build(payload)
    }

    /// Builds and resolves a collection response.
    pub fn resolve_array(&self, payload: &Value) -> GraphResult<ResolvedGraph> {
        let resources = self.build(payload)?;
        self.resolve(resources)
    }

    /// Same as [`ResolutionEngine::resolve_array`] for an undecoded body.
    pub fn resolve_array_str(&self, body: &str) -> GraphResult<ResolvedGraph> {
        let payload: Value = serde_json::from_str(body)?;
        self.resolve_array(&payload)
    }

    /// Folds a sync delta into `prior` and resolves the merged snapshot.
    pub fn sync(
        &self,
        prior: Option<&SynchronizedSpace>,
        delta: &Value,
    ) -> GraphResult<SynchronizedSpace> {
        SyncMerger::new(self).merge(prior, delta)
    }

    /// Same as [`ResolutionEngine::sync`] for an undecoded body.
    pub fn sync_str(
        &self,
        prior: Option<&SynchronizedSpace>,
        body: &str,
    ) -> GraphResult<SynchronizedSpace> {
        let delta: Value = serde_json::from_str(body)?;
        self.sync(prior, &delta)
    }

    /// Runs one full resolution pass over `resources`.
    ///
    /// Every resource's fields are rebuilt from its raw fields, so running
    /// the pass again over its own output yields an equal graph.
    pub fn resolve(&self, mut resources: ResourceSet) -> GraphResult<ResolvedGraph> {
        let mut resolver = ReferenceResolver::new(&resources, self.services, &self.config);
        let mut staged = Vec::with_capacity(resources.len());
        for resource in resources.items() {
            staged.push(resolve_fields(
                resource,
                self.services,
                &self.config,
                &mut resolver,
            )?);
        }
        let placeholders = resolver.into_placeholders();

        resources.replace_fields(staged);
        debug!("Resolved {} resources", resources.len());
        if !placeholders.is_empty() {
            info!(
                "Synthesized {} placeholders for links outside the payload",
                placeholders.len()
            );
        }
        Ok(ResolvedGraph::new(resources, placeholders))
    }
}
