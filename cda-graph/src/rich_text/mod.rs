//! Rich text fields.
//!
//! Two passes: [`parse_document`] turns a raw field value into a
//! [`RichNode`](cda_model::RichNode) tree with unresolved link targets, and
//! [`resolve_links`] builds a copy of that tree with every target resolved.
//! They are separate because resolution needs every resource of the response
//! (and, for sync, of the prior snapshot), which the parser never sees.

mod links;
mod parser;

pub use links::resolve_links;
pub use parser::{parse_document, parse_marks, parse_node};
