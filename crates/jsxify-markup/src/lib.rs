//! HTML document loading, sanitizing and tree building.
//!
//! This crate turns a static HTML file into a [`Document`] (raw markup plus the
//! style rules and asset references pulled out of it) and parses the sanitized
//! markup into a [`Node`] tree for the framework adapters.

pub mod document;
pub mod sanitize;
pub mod tree;

pub use document::{to_component_name, Document, LoadError};
pub use sanitize::{classify_asset, sanitize, AssetKind};
pub use tree::{build_tree, Attribute, Element, Node, ParseError, MAX_DEPTH};
