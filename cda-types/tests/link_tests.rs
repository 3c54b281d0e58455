use cda_types::{Link, LinkShapeError, LinkType, ResourceKey};
use proptest::prelude::*;
use serde_json::json;

// ── Well-formed links ────────────────────────────────────────────

#[test]
fn parses_entry_link() {
    let raw = json!({"sys": {"type": "Link", "linkType": "Entry", "id": "E1"}});
    let link = Link::from_value(&raw).unwrap();
    assert_eq!(link.link_type, LinkType::Entry);
    assert_eq!(link.id.as_str(), "E1");
    assert_eq!(link.key(), ResourceKey::entry("E1"));
}

#[test]
fn parses_asset_link_ignoring_extra_keys() {
    let raw = json!({"sys": {"type": "Link", "linkType": "Asset", "id": "A1", "extra": 1}});
    let link = Link::from_value(&raw).unwrap();
    assert_eq!(link.key(), ResourceKey::asset("A1"));
}

// ── Malformed links ──────────────────────────────────────────────

#[test]
fn rejects_non_object() {
    assert_eq!(
        Link::from_value(&json!("E1")),
        Err(LinkShapeError::NotAnObject("a string"))
    );
}

#[test]
fn rejects_missing_sys() {
    assert_eq!(
        Link::from_value(&json!({"id": "E1"})),
        Err(LinkShapeError::MissingSys)
    );
}

#[test]
fn rejects_wrong_sys_type() {
    let raw = json!({"sys": {"type": "Entry", "linkType": "Entry", "id": "E1"}});
    assert_eq!(
        Link::from_value(&raw),
        Err(LinkShapeError::NotALink(Some("Entry".into())))
    );
}

#[test]
fn rejects_unknown_link_type() {
    let raw = json!({"sys": {"type": "Link", "linkType": "Space", "id": "S1"}});
    assert_eq!(
        Link::from_value(&raw),
        Err(LinkShapeError::UnknownLinkType(Some("Space".into())))
    );
}

#[test]
fn entry_link_without_id_is_malformed() {
    let raw = json!({"sys": {"type": "Link", "linkType": "Entry"}});
    assert_eq!(Link::from_value(&raw), Err(LinkShapeError::MissingId));
    assert!(!Link::is_link(&raw));
}

#[test]
fn asset_link_with_numeric_id_is_malformed() {
    let raw = json!({"sys": {"type": "Link", "linkType": "Asset", "id": 7}});
    assert_eq!(Link::from_value(&raw), Err(LinkShapeError::MissingId));
}

// ── Properties ───────────────────────────────────────────────────

proptest! {
    #[test]
    fn rendered_links_parse_back(id in "[A-Za-z0-9]{1,24}", is_asset in any::<bool>()) {
        let link_type = if is_asset { LinkType::Asset } else { LinkType::Entry };
        let link = Link::new(link_type, id.as_str());
        prop_assert_eq!(Link::from_value(&link.to_value()).unwrap(), link);
    }
}

#[test]
fn not_an_array_names_the_found_type() {
    let err = LinkShapeError::not_an_array(&json!({"sys": {}}));
    assert_eq!(err, LinkShapeError::NotAnArray("an object"));
    assert_eq!(err.to_string(), "expected an array of links, found an object");
}
