mod common;

use cda_graph::rich_text::{parse_document, parse_marks, parse_node, resolve_links};
use cda_graph::{GraphBuilder, GraphError, ReferenceResolver, ResolveConfig};
use cda_model::{ContentTypeRegistry, LinkTarget, Mark, ResourceSet, RichNode, Services};
use cda_types::{LinkShapeError, ResourceKey};
use common::{author, document, embedded_asset, entry_hyperlink, link, paragraph, text};
use pretty_assertions::assert_eq;
use serde_json::json;

// ── Parsing ──────────────────────────────────────────────────────

#[test]
fn parses_paragraph_with_bold_text() {
    let raw = json!({
        "nodeType": "document",
        "content": [{
            "nodeType": "paragraph",
            "content": [{"nodeType": "text", "value": "hi", "marks": [{"type": "bold"}]}]
        }]
    });

    assert_eq!(
        parse_document(&raw).unwrap(),
        RichNode::Document {
            content: vec![RichNode::Paragraph {
                content: vec![RichNode::text("hi", vec![Mark::Bold])],
            }],
        }
    );
}

#[test]
fn root_is_always_a_document() {
    let raw = json!({"nodeType": "paragraph", "content": [text("x")]});
    assert!(matches!(
        parse_document(&raw),
        Some(RichNode::Document { content }) if content.len() == 1
    ));
}

#[test]
fn non_object_root_is_not_parsed() {
    assert!(parse_document(&json!(null)).is_none());
    assert!(parse_document(&json!("plain text")).is_none());
}

#[test]
fn unknown_nodes_are_dropped_and_siblings_kept_in_order() {
    let raw = document(json!([paragraph(json!([
        text("a"),
        {"nodeType": "table", "content": [text("ignored")]},
        text("b"),
        "not a node",
        {"value": "no node type"},
        text("c")
    ]))]));

    let doc = parse_document(&raw).unwrap();
    let para = &doc.content()[0];
    assert_eq!(
        para.content(),
        &[
            RichNode::text("a", vec![]),
            RichNode::text("b", vec![]),
            RichNode::text("c", vec![]),
        ]
    );
}

#[test]
fn headings_take_level_from_node_type() {
    for level in 1..=6u8 {
        let raw = json!({"nodeType": format!("heading-{level}"), "content": [text("h")]});
        assert_eq!(
            parse_node(&raw),
            RichNode::heading(level, vec![RichNode::text("h", vec![])])
        );
    }
    assert_eq!(parse_node(&json!({"nodeType": "heading-7", "content": []})), None);
    assert_eq!(parse_node(&json!({"nodeType": "heading-", "content": []})), None);
}

#[test]
fn near_miss_heading_tags_are_dropped_and_siblings_kept() {
    let raw = document(json!([
        {"nodeType": "heading-2", "content": [text("kept")]},
        {"nodeType": "heading-03", "content": [text("zero padded")]},
        {"nodeType": "heading-+3", "content": [text("signed")]},
        {"nodeType": "heading-7", "content": [text("too deep")]},
        {"nodeType": "heading-0", "content": [text("too shallow")]},
        paragraph(json!([text("after")]))
    ]));

    let doc = parse_document(&raw).unwrap();
    assert_eq!(
        doc.content(),
        &[
            RichNode::heading(2, vec![RichNode::text("kept", vec![])]).unwrap(),
            RichNode::Paragraph {
                content: vec![RichNode::text("after", vec![])],
            },
        ]
    );
    assert_eq!(parse_node(&json!({"nodeType": "heading-03", "content": []})), None);
    assert_eq!(parse_node(&json!({"nodeType": "heading-+3", "content": []})), None);
}

#[test]
fn parses_block_and_leaf_variants() {
    let raw = document(json!([
        {"nodeType": "blockquote", "content": [paragraph(json!([text("q")]))]},
        {"nodeType": "hr", "content": []},
        {"nodeType": "unordered-list", "content": [
            {"nodeType": "list-item", "content": [paragraph(json!([text("one")]))]}
        ]},
        {"nodeType": "ordered-list", "content": []}
    ]));
    let doc = parse_document(&raw).unwrap();
    let content = doc.content();

    assert!(matches!(content[0], RichNode::Quote { .. }));
    assert_eq!(content[1], RichNode::HorizontalRule);
    assert!(matches!(&content[2], RichNode::UnorderedList { content } if matches!(content[0], RichNode::ListItem { .. })));
    assert_eq!(content[3], RichNode::OrderedList { content: vec![] });
    assert_eq!(doc.plain_text(), "qone");
}

#[test]
fn link_nodes_keep_raw_data_verbatim() {
    let data = json!({"target": link("Entry", "E1"), "extra": true});
    let node = parse_node(&json!({"nodeType": "embedded-entry-inline", "data": data, "content": []}))
        .unwrap();
    assert_eq!(
        node,
        RichNode::EmbeddedInline {
            target: LinkTarget::Unresolved(data),
            content: vec![],
        }
    );
}

#[test]
fn link_node_variants_by_node_type() {
    let kinds = [
        ("hyperlink", "HyperLink"),
        ("entry-hyperlink", "EntryHyperLink"),
        ("asset-hyperlink", "AssetHyperLink"),
        ("embedded-entry-block", "EmbeddedBlock"),
        ("embedded-asset-block", "EmbeddedBlock"),
        ("embedded-entry-inline", "EmbeddedInline"),
    ];
    for (node_type, variant) in kinds {
        let node = parse_node(&json!({"nodeType": node_type, "data": {}, "content": []})).unwrap();
        assert!(format!("{node:?}").starts_with(variant), "{node_type} -> {node:?}");
        assert!(node.target().is_some());
    }
}

#[test]
fn text_without_value_or_marks_is_empty() {
    assert_eq!(
        parse_node(&json!({"nodeType": "text"})),
        Some(RichNode::text("", vec![]))
    );
}

#[test]
fn marks_keep_order_duplicates_and_unknown_types() {
    let marks = parse_marks(Some(&json!([
        {"type": "italic"},
        {"type": "superscript"},
        {"type": "italic"},
        {"nope": 1},
        {"type": "code"}
    ])));
    assert_eq!(
        marks,
        vec![
            Mark::Italic,
            Mark::Custom("superscript".into()),
            Mark::Italic,
            Mark::Code,
        ]
    );
    assert!(parse_marks(None).is_empty());
}

// ── Link resolution ──────────────────────────────────────────────

fn resources() -> ResourceSet {
    GraphBuilder::new()
        .build(&json!({"items": [author("E1", "Ada")]}))
        .unwrap()
}

fn resolve(raw: serde_json::Value, services: Services<'_>) -> Result<RichNode, GraphError> {
    let set = resources();
    let config = ResolveConfig::default();
    let mut resolver = ReferenceResolver::new(&set, services, &config);
    let doc = parse_document(&raw).unwrap();
    resolve_links(&doc, &mut resolver, "body", "en-US")
}

fn only_target(node: &RichNode) -> LinkTarget {
    let targets = node.link_targets();
    assert_eq!(targets.len(), 1);
    targets[0].clone()
}

#[test]
fn hyperlink_to_present_entry_resolves_to_it() {
    let registry = ContentTypeRegistry::new();
    let raw = document(json!([paragraph(json!([entry_hyperlink("E1")]))]));
    let doc = resolve(raw, Services::new(&registry)).unwrap();
    assert_eq!(only_target(&doc), LinkTarget::Resource(ResourceKey::entry("E1")));
}

#[test]
fn hyperlink_to_absent_entry_uses_content_type_provider() {
    let registry = ContentTypeRegistry::new();
    let provider = |id: &str| (id == "E2").then(|| "post".to_string());
    let services = Services::new(&registry).with_content_type_ids(&provider);

    let raw = document(json!([paragraph(json!([entry_hyperlink("E2")]))]));
    let doc = resolve(raw, services).unwrap();
    assert_eq!(only_target(&doc), LinkTarget::Resource(ResourceKey::entry("E2")));

    let raw = document(json!([paragraph(json!([entry_hyperlink("E3")]))]));
    let doc = resolve(raw, services).unwrap();
    assert_eq!(only_target(&doc), LinkTarget::Missing);
}

#[test]
fn uri_hyperlink_resolves_to_string() {
    let registry = ContentTypeRegistry::new();
    let raw = document(json!([paragraph(json!([{
        "nodeType": "hyperlink",
        "data": {"target": null, "uri": "https://example.com"},
        "content": [text("example")]
    }]))]));
    let doc = resolve(raw, Services::new(&registry)).unwrap();
    assert_eq!(only_target(&doc), LinkTarget::Uri("https://example.com".into()));
}

#[test]
fn hyperlink_without_target_or_uri_is_missing() {
    let registry = ContentTypeRegistry::new();
    let raw = document(json!([{"nodeType": "hyperlink", "content": []}]));
    let doc = resolve(raw, Services::new(&registry)).unwrap();
    assert_eq!(only_target(&doc), LinkTarget::Missing);
}

#[test]
fn links_nested_below_lists_and_quotes_are_resolved() {
    let registry = ContentTypeRegistry::new();
    let checker = |id: &str| id == "A9";
    let services = Services::new(&registry).with_asset_checker(&checker);
    let raw = document(json!([
        {"nodeType": "unordered-list", "content": [
            {"nodeType": "list-item", "content": [paragraph(json!([entry_hyperlink("E1")]))]}
        ]},
        {"nodeType": "blockquote", "content": [embedded_asset("A9")]}
    ]));

    let doc = resolve(raw, services).unwrap();
    let targets: Vec<_> = doc.link_targets().into_iter().cloned().collect();
    assert_eq!(
        targets,
        vec![
            LinkTarget::Resource(ResourceKey::entry("E1")),
            LinkTarget::Resource(ResourceKey::asset("A9")),
        ]
    );
}

#[test]
fn malformed_link_reports_field_and_locale() {
    let registry = ContentTypeRegistry::new();
    let raw = document(json!([paragraph(json!([{
        "nodeType": "entry-hyperlink",
        "data": {"target": {"sys": {"type": "Entry", "linkType": "Entry", "id": "E1"}}},
        "content": []
    }]))]));

    let err = resolve(raw, Services::new(&registry)).unwrap_err();
    match err {
        GraphError::IllegalLinkShape {
            field,
            locale,
            source,
        } => {
            assert_eq!(field, "body");
            assert_eq!(locale, "en-US");
            assert_eq!(source, LinkShapeError::NotALink(Some("Entry".into())));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn target_without_sys_is_malformed() {
    let registry = ContentTypeRegistry::new();
    let raw = document(json!([{
        "nodeType": "embedded-entry-block",
        "data": {"target": {"id": "E1"}},
        "content": []
    }]));
    let err = resolve(raw, Services::new(&registry)).unwrap_err();
    assert!(matches!(
        err,
        GraphError::IllegalLinkShape { source: LinkShapeError::MissingSys, .. }
    ));
}

#[test]
fn resolving_a_resolved_tree_changes_nothing() {
    let registry = ContentTypeRegistry::new();
    let raw = document(json!([paragraph(json!([entry_hyperlink("E1")]))]));
    let once = resolve(raw, Services::new(&registry)).unwrap();

    let set = resources();
    let config = ResolveConfig::default();
    let mut resolver = ReferenceResolver::new(&set, Services::new(&registry), &config);
    let twice = resolve_links(&once, &mut resolver, "body", "en-US").unwrap();
    assert_eq!(once, twice);
}
