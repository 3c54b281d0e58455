//! Object graph resolution for content delivery payloads.
//!
//! Turns raw, loosely typed response bodies into linked resource graphs.
//!
//! # Architecture
//!
//! Every reference, whether it sits in a plain link field or deep inside a
//! rich text tree, must end up at the same canonical resource for a given
//! `(kind, id)`. References are therefore stored as keys and looked up
//! through the graph, never copied.
//!
//! ## Components
//!
//! - **GraphBuilder**: instantiates resources from one body and captures raw fields
//! - **ReferenceResolver**: resolves links, synthesizing placeholders for known but absent targets
//! - **rich_text**: parses rich text trees, then resolves the links inside them
//! - **SyncMerger**: folds a delta into the previous snapshot
//! - **ResolutionEngine**: runs the stages as one atomic pass
//!
//! ## Resolution pass
//!
//! 1. **Build**: raw items (primary, then included) become a `ResourceSet`
//! 2. **Merge** (sync only): delta upserts and deletions are applied to the prior snapshot
//! 3. **Fields**: each entry's raw fields are read through its content type;
//!    rich text is parsed and its links resolved, then plain links are resolved
//!
//! # Example
//!
//! ```
//! use cda_graph::ResolutionEngine;
//! use cda_model::{ContentType, ContentTypeField, ContentTypeRegistry, Services};
//! use cda_types::LinkType;
//! use serde_json::json;
//!
//! let registry = ContentTypeRegistry::new().with(ContentType::new(
//!     "post",
//!     vec![ContentTypeField::link("author", LinkType::Entry)],
//! ));
//! let engine = ResolutionEngine::new(Services::new(&registry));
//!
//! let graph = engine
//!     .resolve_array(&json!({
//!         "items": [{
//!             "sys": {"id": "p1", "type": "Entry", "contentType": {"sys": {"id": "post"}}},
//!             "fields": {"author": {"en-US": {"sys": {"type": "Link", "linkType": "Entry", "id": "p1"}}}}
//!         }]
//!     }))
//!     .unwrap();
//!
//! let post = graph.entry("p1").unwrap();
//! let author = post.field("en-US", "author").and_then(|v| v.as_link()).unwrap();
//! assert_eq!(graph.target(author).unwrap().id.as_str(), "p1");
//! ```

mod builder;
mod config;
mod engine;
mod error;
mod fields;
mod graph;
pub mod merger;
pub mod resolver;
pub mod rich_text;
mod space;

pub use builder::{GraphBuilder, parse_resource};
pub use config::ResolveConfig;
pub use engine::ResolutionEngine;
pub use error::{GraphError, GraphResult};
pub use graph::ResolvedGraph;
pub use merger::{MergedResources, SyncMerger, merge_resources};
pub use resolver::{PlaceholderCache, ReferenceResolver};
pub use space::SynchronizedSpace;
