//! Framework adapters for transforming HTML trees into React components.
//!
//! This crate provides the core conversion logic: attribute rewriting to React
//! conventions, JSX serialization, and the raw-HTML fallback component used when
//! a document cannot be converted reliably.

pub mod generator;
pub mod props;
pub mod react;
pub mod serializer;
pub mod traits;

pub use generator::{generate_component, generate_fallback, FALLBACK_WARNING};
pub use props::{rewrite, JsxElement, JsxNode, Prop, PropValue, StyleMap};
pub use react::ReactAdapter;
pub use serializer::{discarded_root_props, serialize, serialize_root, SerializeError, INDENT};
pub use traits::{FrameworkAdapter, TransformContext, TransformError, TransformedComponent};
