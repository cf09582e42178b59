//! Trait definitions for framework adapters.

use jsxify_markup::{Document, ParseError};

use crate::serializer::SerializeError;

/// Context for transforming a document.
#[derive(Debug, Clone)]
pub struct TransformContext {
    /// Component name (e.g., "LandingPage")
    pub component_name: String,

    /// Import path of the generated style module: "./LandingPage.module.css"
    pub styles_import: String,

    /// Import path of the global stylesheet used by the fallback: "./LandingPage.css"
    pub global_styles_import: String,
}

impl TransformContext {
    /// Create a context for the given component name.
    pub fn new(component_name: impl Into<String>) -> Self {
        let component_name = component_name.into();
        let styles_import = format!("./{}.module.css", component_name);
        let global_styles_import = format!("./{}.css", component_name);
        Self {
            component_name,
            styles_import,
            global_styles_import,
        }
    }
}

/// Result of transforming a document into a component.
#[derive(Debug, Clone)]
pub struct TransformedComponent {
    /// Component name
    pub name: String,

    /// Component module source
    pub source: String,

    /// Class-module keys referenced by the component, in first-use order
    pub classes_used: Vec<String>,

    /// Keys from `classes_used` with no rule in the document's style blocks
    pub literal_classes: Vec<String>,

    /// Props on `<html>`/`<body>` that the component does not render
    pub discarded_props: Vec<String>,

    /// Whether this is the raw-markup fallback, which imports the style rules
    /// as a global stylesheet instead of a CSS module
    pub fallback: bool,
}

/// Errors that can occur during transformation.
///
/// Both variants are recoverable: the caller answers them with
/// [`FrameworkAdapter::fallback`].
#[derive(Debug, thiserror::Error)]
pub enum TransformError {
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Serialization error: {0}")]
    Serialize(#[from] SerializeError),
}

/// Trait for framework-specific adapters.
pub trait FrameworkAdapter: Send + Sync {
    /// Framework identifier (e.g., "react")
    fn name(&self) -> &'static str;

    /// File extension of generated component modules
    fn extension(&self) -> &'static str;

    /// Transform a sanitized document into a component.
    fn transform(
        &self,
        doc: &Document,
        ctx: &TransformContext,
    ) -> Result<TransformedComponent, TransformError>;

    /// Produce a component that embeds the document markup verbatim.
    ///
    /// Must never fail.
    fn fallback(&self, doc: &Document, ctx: &TransformContext) -> TransformedComponent;
}
