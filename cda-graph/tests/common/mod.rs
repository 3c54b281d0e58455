//! Shared fixtures for graph tests.

#![allow(dead_code)]

use cda_model::{ContentType, ContentTypeField, ContentTypeRegistry};
use cda_types::LinkType;
use serde_json::{Value, json};
use tracing_subscriber::EnvFilter;

/// Installs a test-friendly subscriber once; honours `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// `post` (title, body, author, hero, related) and `author` (name, avatar).
pub fn blog_registry() -> ContentTypeRegistry {
    ContentTypeRegistry::new()
        .with(ContentType::new(
            "post",
            vec![
                ContentTypeField::symbol("title"),
                ContentTypeField::rich_text("body"),
                ContentTypeField::link("author", LinkType::Entry),
                ContentTypeField::link("hero", LinkType::Asset),
                ContentTypeField::link_array("related", LinkType::Entry),
            ],
        ))
        .with(ContentType::new(
            "author",
            vec![
                ContentTypeField::symbol("name"),
                ContentTypeField::link("avatar", LinkType::Asset),
            ],
        ))
}

pub fn link(link_type: &str, id: &str) -> Value {
    json!({"sys": {"type": "Link", "linkType": link_type, "id": id}})
}

pub fn entry(id: &str, content_type: &str, fields: Value) -> Value {
    json!({
        "sys": {
            "id": id,
            "type": "Entry",
            "revision": 1,
            "contentType": {"sys": {"type": "Link", "linkType": "ContentType", "id": content_type}}
        },
        "fields": fields
    })
}

pub fn author(id: &str, name: &str) -> Value {
    entry(id, "author", json!({"name": {"en-US": name}}))
}

pub fn asset(id: &str) -> Value {
    json!({
        "sys": {"id": id, "type": "Asset", "revision": 1},
        "fields": {"title": {"en-US": format!("asset {id}")}}
    })
}

pub fn deleted_entry(id: &str) -> Value {
    json!({"sys": {"id": id, "type": "DeletedEntry"}})
}

pub fn deleted_asset(id: &str) -> Value {
    json!({"sys": {"id": id, "type": "DeletedAsset"}})
}

pub fn document(content: Value) -> Value {
    json!({"nodeType": "document", "data": {}, "content": content})
}

pub fn paragraph(content: Value) -> Value {
    json!({"nodeType": "paragraph", "data": {}, "content": content})
}

pub fn text(value: &str) -> Value {
    json!({"nodeType": "text", "value": value, "marks": [], "data": {}})
}

/// An `entry-hyperlink` node pointing at entry `id`.
pub fn entry_hyperlink(id: &str) -> Value {
    json!({
        "nodeType": "entry-hyperlink",
        "data": {"target": link("Entry", id)},
        "content": [text("link")]
    })
}

/// An `embedded-asset-block` node pointing at asset `id`.
pub fn embedded_asset(id: &str) -> Value {
    json!({
        "nodeType": "embedded-asset-block",
        "data": {"target": link("Asset", id)},
        "content": []
    })
}
