//! React adapter for transforming HTML documents into function components.

use jsxify_markup::{build_tree, Document};

use crate::generator::{generate_component, generate_fallback};
use crate::props::{rewrite, JsxNode};
use crate::serializer::{discarded_root_props, serialize_root};
use crate::traits::{FrameworkAdapter, TransformContext, TransformError, TransformedComponent};

/// Indent level of the component body inside `return (`.
const BODY_INDENT: usize = 2;

/// HTML to React function component adapter.
#[derive(Debug, Default)]
pub struct ReactAdapter;

impl ReactAdapter {
    /// Create a new React adapter.
    pub fn new() -> Self {
        Self
    }
}

impl FrameworkAdapter for ReactAdapter {
    fn name(&self) -> &'static str {
        "react"
    }

    fn extension(&self) -> &'static str {
        "jsx"
    }

    fn transform(
        &self,
        doc: &Document,
        ctx: &TransformContext,
    ) -> Result<TransformedComponent, TransformError> {
        let tree = rewrite(build_tree(&doc.structural)?);

        let classes_used = rendered_classes(&tree);

        let literal_classes: Vec<String> = classes_used
            .iter()
            .filter(|class| !doc.defines_class(class))
            .cloned()
            .collect();

        let body = serialize_root(&tree, BODY_INDENT, &literal_classes)?;

        Ok(TransformedComponent {
            name: ctx.component_name.clone(),
            source: generate_component(ctx, &body),
            classes_used,
            literal_classes,
            discarded_props: discarded_root_props(&tree),
            fallback: false,
        })
    }

    fn fallback(&self, doc: &Document, ctx: &TransformContext) -> TransformedComponent {
        TransformedComponent {
            name: ctx.component_name.clone(),
            source: generate_fallback(ctx, &doc.structural),
            classes_used: Vec::new(),
            literal_classes: Vec::new(),
            discarded_props: Vec::new(),
            fallback: true,
        }
    }
}

/// Class keys used inside `<body>`, in first-use order.
fn rendered_classes(tree: &JsxNode) -> Vec<String> {
    let JsxNode::Element(root) = tree else {
        return Vec::new();
    };
    let body = root.find("body").unwrap_or(root);

    let mut classes: Vec<String> = Vec::new();
    for child in body.children.iter().filter_map(JsxNode::as_element) {
        for class in child.classes_used() {
            if !classes.contains(&class) {
                classes.push(class);
            }
        }
    }
    classes
}
