//! Markup tree construction on top of html5ever.

use html5ever::tendril::TendrilSink;
use html5ever::tree_builder::TreeBuilderOpts;
use html5ever::{parse_document, ParseOpts, QualName};
use markup5ever_rcdom::{Handle, NodeData, RcDom};

/// Tokenizer error reported when input ends inside a tag or comment.
const UNEXPECTED_EOF: &str = "Unexpected EOF";

/// Deepest element nesting accepted by the tree builder and later stages.
pub const MAX_DEPTH: usize = 512;

/// A markup attribute in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// An element with its attributes and owned children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Tag name (lowercase for HTML elements)
    pub tag: String,

    /// Attributes in source encounter order
    pub attrs: Vec<Attribute>,

    /// Child nodes in document order
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Get an attribute value by name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Find the first descendant element with the given tag, depth-first.
    pub fn find(&self, tag: &str) -> Option<&Element> {
        self.children.iter().find_map(|child| match child {
            Node::Element(el) if el.tag == tag => Some(el),
            Node::Element(el) => el.find(tag),
            Node::Text(_) => None,
        })
    }
}

/// A node of the markup tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

impl Node {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        }
    }
}

/// Errors that can occur when building the markup tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Markup ended unexpectedly: {0}")]
    Truncated(String),

    #[error("Parsed document has no <html> root element")]
    NoRoot,

    #[error("Maximum nesting depth ({0}) exceeded")]
    TooDeep(usize),
}

/// Parse markup into a tree rooted at the `<html>` element.
///
/// Comments, doctypes and processing instructions are dropped. The parser
/// repairs most malformed markup on its own, so only input that ends inside a
/// tag, attribute value or comment is reported as [`ParseError::Truncated`].
pub fn build_tree(markup: &str) -> Result<Node, ParseError> {
    let opts = ParseOpts {
        tree_builder: TreeBuilderOpts {
            drop_doctype: true,
            ..Default::default()
        },
        ..Default::default()
    };

    let dom: RcDom = parse_document(RcDom::default(), opts)
        .from_utf8()
        .one(markup.as_bytes());

    if let Some(error) = dom.errors.iter().find(|e| e.contains(UNEXPECTED_EOF)) {
        return Err(ParseError::Truncated(error.to_string()));
    }

    let html = dom
        .document
        .children
        .borrow()
        .iter()
        .find(|child| is_element(child, "html"))
        .cloned()
        .ok_or(ParseError::NoRoot)?;

    convert(&html, 0)?.ok_or(ParseError::NoRoot)
}

fn is_element(handle: &Handle, tag: &str) -> bool {
    matches!(&handle.data, NodeData::Element { name, .. } if &*name.local == tag)
}

fn convert(handle: &Handle, depth: usize) -> Result<Option<Node>, ParseError> {
    if depth > MAX_DEPTH {
        return Err(ParseError::TooDeep(MAX_DEPTH));
    }

    match &handle.data {
        NodeData::Element { name, attrs, .. } => {
            let attrs = attrs
                .borrow()
                .iter()
                .map(|a| Attribute::new(qualified_name(&a.name), a.value.to_string()))
                .collect();

            let mut children = Vec::new();
            for child in handle.children.borrow().iter() {
                if let Some(node) = convert(child, depth + 1)? {
                    children.push(node);
                }
            }

            Ok(Some(Node::Element(Element {
                tag: name.local.to_string(),
                attrs,
                children,
            })))
        }
        NodeData::Text { contents } => Ok(Some(Node::Text(contents.borrow().to_string()))),
        _ => Ok(None),
    }
}

/// Attribute name including its namespace prefix (`xlink:href`).
fn qualified_name(name: &QualName) -> String {
    match &name.prefix {
        Some(prefix) => format!("{}:{}", prefix, name.local),
        None => name.local.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn root(markup: &str) -> Element {
        match build_tree(markup).unwrap() {
            Node::Element(el) => el,
            Node::Text(t) => panic!("expected element, got text {:?}", t),
        }
    }

    #[test]
    fn builds_element_tree() {
        let html = root(r#"<html><body><div class="card" id="main"><p>Hi</p></div></body></html>"#);

        assert_eq!(html.tag, "html");
        let div = html.find("div").unwrap();
        assert_eq!(
            div.attrs,
            vec![Attribute::new("class", "card"), Attribute::new("id", "main")]
        );
        assert_eq!(
            div.children,
            vec![Node::Element(Element {
                tag: "p".to_string(),
                attrs: vec![],
                children: vec![Node::Text("Hi".to_string())],
            })]
        );
    }

    #[test]
    fn inserts_implied_head_and_body() {
        let html = root("<html><p>Text</p></html>");

        assert!(html.find("head").is_some());
        assert!(html.find("body").unwrap().find("p").is_some());
    }

    #[test]
    fn drops_comments_and_doctype() {
        let html = root("<!DOCTYPE html><html><body><!-- note --><span>a</span></body></html>");
        let body = html.find("body").unwrap();

        assert_eq!(body.children.len(), 1);
        assert_eq!(body.children[0].as_element().unwrap().tag, "span");
    }

    #[test]
    fn keeps_boolean_attribute_with_empty_value() {
        let html = root("<html><body><input disabled></body></html>");

        assert_eq!(html.find("input").unwrap().attr("disabled"), Some(""));
    }

    #[test]
    fn decodes_entities_in_text() {
        let html = root("<html><body><p>a &amp; b</p></body></html>");

        assert_eq!(
            html.find("p").unwrap().children,
            vec![Node::Text("a & b".to_string())]
        );
    }

    #[test]
    fn repairs_unclosed_elements() {
        let html = root("<html><body><div><p>open</body></html>");

        assert!(html.find("div").unwrap().find("p").is_some());
    }

    #[test]
    fn fails_on_unterminated_tag() {
        let result = build_tree(r#"<html><body><div class="card""#);

        assert!(matches!(result, Err(ParseError::Truncated(_))));
    }

    #[test]
    fn fails_on_unterminated_tag_with_quoted_bracket() {
        let result = build_tree(r#"<html><body><p>Hi</p><a href="x>y"#);

        assert!(matches!(result, Err(ParseError::Truncated(_))));
    }

    #[test]
    fn trailing_less_than_in_text_is_not_truncation() {
        let html = root("<html><body>1 < 2");

        let body = html.find("body").unwrap();
        assert_eq!(body.children, vec![Node::Text("1 < 2".to_string())]);
    }

    #[test]
    fn fails_on_unterminated_comment() {
        let result = build_tree("<html><body><!-- never closed");

        assert!(matches!(result, Err(ParseError::Truncated(_))));
    }

    #[test]
    fn fails_on_excessive_nesting() {
        let depth = MAX_DEPTH + 10;
        let markup = format!(
            "<html><body>{}{}</body></html>",
            "<div>".repeat(depth),
            "</div>".repeat(depth)
        );

        assert_eq!(build_tree(&markup), Err(ParseError::TooDeep(MAX_DEPTH)));
    }
}
