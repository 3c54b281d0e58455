//! Typed rich text tree.
//!
//! Block variants own their children exclusively; there are no parent
//! pointers. Link and embed variants carry a [`LinkTarget`] that starts out
//! [`LinkTarget::Unresolved`] and is replaced by a resolution pass, which
//! builds a new tree rather than editing this one.

use cda_types::ResourceKey;
use serde_json::Value;

/// Where a link or embed node points.
#[derive(Debug, Clone, PartialEq)]
pub enum LinkTarget {
    /// The node's raw `data` map, as parsed.
    Unresolved(Value),
    /// A live resource or a synthesized placeholder; look it up by key.
    Resource(ResourceKey),
    /// A plain hyperlink that never pointed at a resource.
    Uri(String),
    /// Resolved to nothing.
    Missing,
}

impl LinkTarget {
    pub fn is_resolved(&self) -> bool {
        !matches!(self, Self::Unresolved(_))
    }

    pub fn resource_key(&self) -> Option<&ResourceKey> {
        match self {
            Self::Resource(key) => Some(key),
            _ => None,
        }
    }

    pub fn uri(&self) -> Option<&str> {
        match self {
            Self::Uri(uri) => Some(uri),
            _ => None,
        }
    }
}

/// A formatting hint on a text node. Unknown mark types are kept as `Custom`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Mark {
    Bold,
    Italic,
    Underline,
    Code,
    Custom(String),
}

impl Mark {
    /// Maps a raw mark `type` to a mark.
    pub fn from_type(mark_type: &str) -> Self {
        match mark_type {
            "bold" => Self::Bold,
            "italic" => Self::Italic,
            "underline" => Self::Underline,
            "code" => Self::Code,
            other => Self::Custom(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Bold => "bold",
            Self::Italic => "italic",
            Self::Underline => "underline",
            Self::Code => "code",
            Self::Custom(name) => name,
        }
    }
}

/// One node of a rich text document.
#[derive(Debug, Clone, PartialEq)]
pub enum RichNode {
    Document { content: Vec<RichNode> },
    Paragraph { content: Vec<RichNode> },
    /// `level` is always within 1..=6.
    Heading { level: u8, content: Vec<RichNode> },
    Quote { content: Vec<RichNode> },
    OrderedList { content: Vec<RichNode> },
    UnorderedList { content: Vec<RichNode> },
    ListItem { content: Vec<RichNode> },
    HorizontalRule,
    Text { value: String, marks: Vec<Mark> },
    HyperLink { target: LinkTarget, content: Vec<RichNode> },
    EntryHyperLink { target: LinkTarget, content: Vec<RichNode> },
    AssetHyperLink { target: LinkTarget, content: Vec<RichNode> },
    EmbeddedBlock { target: LinkTarget, content: Vec<RichNode> },
    EmbeddedInline { target: LinkTarget, content: Vec<RichNode> },
}

impl RichNode {
    /// A heading node, or `None` if `level` is outside 1..=6.
    pub fn heading(level: u8, content: Vec<RichNode>) -> Option<Self> {
        (1..=6)
            .contains(&level)
            .then_some(Self::Heading { level, content })
    }

    /// A text node.
    pub fn text(value: impl Into<String>, marks: Vec<Mark>) -> Self {
        Self::Text {
            value: value.into(),
            marks,
        }
    }

    /// Children of a block node; empty for leaves.
    pub fn content(&self) -> &[RichNode] {
        match self {
            Self::Document { content }
            | Self::Paragraph { content }
            | Self::Heading { content, .. }
            | Self::Quote { content }
            | Self::OrderedList { content }
            | Self::UnorderedList { content }
            | Self::ListItem { content }
            | Self::HyperLink { content, .. }
            | Self::EntryHyperLink { content, .. }
            | Self::AssetHyperLink { content, .. }
            | Self::EmbeddedBlock { content, .. }
            | Self::EmbeddedInline { content, .. } => content,
            Self::HorizontalRule | Self::Text { .. } => &[],
        }
    }

    /// Target of a link or embed node.
    pub fn target(&self) -> Option<&LinkTarget> {
        match self {
            Self::HyperLink { target, .. }
            | Self::EntryHyperLink { target, .. }
            | Self::AssetHyperLink { target, .. }
            | Self::EmbeddedBlock { target, .. }
            | Self::EmbeddedInline { target, .. } => Some(target),
            _ => None,
        }
    }

    /// Every link target in the tree, depth-first, parents before children.
    pub fn link_targets(&self) -> Vec<&LinkTarget> {
        let mut out = Vec::new();
        self.collect_targets(&mut out);
        out
    }

    fn collect_targets<'a>(&'a self, out: &mut Vec<&'a LinkTarget>) {
        if let Some(target) = self.target() {
            out.push(target);
        }
        for child in self.content() {
            child.collect_targets(out);
        }
    }

    /// Concatenated text of every text node, in document order.
    pub fn plain_text(&self) -> String {
        match self {
            Self::Text { value, .. } => value.clone(),
            _ => self.content().iter().map(Self::plain_text).collect(),
        }
    }

    /// Builds a copy of the tree with every link target replaced by `f`.
    ///
    /// Targets are visited in the same order as [`RichNode::link_targets`];
    /// the first error stops the walk.
    pub fn try_map_targets<E, F>(&self, f: &mut F) -> Result<RichNode, E>
    where
        F: FnMut(&LinkTarget) -> Result<LinkTarget, E>,
    {
        Ok(match self {
            Self::Document { content } => Self::Document {
                content: map_children(content, f)?,
            },
            Self::Paragraph { content } => Self::Paragraph {
                content: map_children(content, f)?,
            },
            Self::Heading { level, content } => Self::Heading {
                level: *level,
                content: map_children(content, f)?,
            },
            Self::Quote { content } => Self::Quote {
                content: map_children(content, f)?,
            },
            Self::OrderedList { content } => Self::OrderedList {
                content: map_children(content, f)?,
            },
            Self::UnorderedList { content } => Self::UnorderedList {
                content: map_children(content, f)?,
            },
            Self::ListItem { content } => Self::ListItem {
                content: map_children(content, f)?,
            },
            Self::HorizontalRule => Self::HorizontalRule,
            Self::Text { value, marks } => Self::Text {
                value: value.clone(),
                marks: marks.clone(),
            },
            Self::HyperLink { target, content } => {
                let target = f(target)?;
                Self::HyperLink {
                    target,
                    content: map_children(content, f)?,
                }
            }
            Self::EntryHyperLink { target, content } => {
                let target = f(target)?;
                Self::EntryHyperLink {
                    target,
                    content: map_children(content, f)?,
                }
            }
            Self::AssetHyperLink { target, content } => {
                let target = f(target)?;
                Self::AssetHyperLink {
                    target,
                    content: map_children(content, f)?,
                }
            }
            Self::EmbeddedBlock { target, content } => {
                let target = f(target)?;
                Self::EmbeddedBlock {
                    target,
                    content: map_children(content, f)?,
                }
            }
            Self::EmbeddedInline { target, content } => {
                let target = f(target)?;
                Self::EmbeddedInline {
                    target,
                    content: map_children(content, f)?,
                }
            }
        })
    }
}

fn map_children<E, F>(content: &[RichNode], f: &mut F) -> Result<Vec<RichNode>, E>
where
    F: FnMut(&LinkTarget) -> Result<LinkTarget, E>,
{
    content
        .iter()
        .map(|child| child.try_map_targets(&mut *f))
        .collect()
}
