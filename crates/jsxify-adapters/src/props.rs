//! Attribute rewriting from HTML to React conventions.
//!
//! Turns a markup [`Node`] tree into a [`JsxNode`] tree with typed props:
//! `class` becomes a list of CSS-module keys, `style` becomes a structured
//! style map, boolean attributes become bare props, and everything else is
//! passed through as a string. Rewriting is total and never fails.

use jsxify_markup::{Attribute, Node};

/// Attributes whose empty value means `true`.
const BOOLEAN_ATTRIBUTES: &[&str] = &[
    "allowfullscreen",
    "async",
    "autofocus",
    "autoplay",
    "checked",
    "controls",
    "default",
    "defer",
    "disabled",
    "formnovalidate",
    "hidden",
    "inert",
    "ismap",
    "itemscope",
    "loop",
    "multiple",
    "muted",
    "nomodule",
    "novalidate",
    "open",
    "playsinline",
    "readonly",
    "required",
    "reversed",
    "selected",
];

/// Ordered camelCase style declarations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleMap {
    pub entries: Vec<(String, String)>,
}

impl StyleMap {
    /// Get a declaration value by camelCase key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// A rewritten prop value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropValue {
    /// Passed-through attribute value: href="/about"
    String(String),
    /// Bare prop: disabled
    Boolean(bool),
    /// Structured style object: style={{ color: 'red' }}
    Style(StyleMap),
    /// CSS-module class keys: className={styles.card}
    ClassRefs(Vec<String>),
}

impl PropValue {
    /// Get as string if it's a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropValue::String(s) => Some(s),
            _ => None,
        }
    }
}

/// A named prop on a JSX element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prop {
    pub name: String,
    pub value: PropValue,
}

/// A JSX element with rewritten props.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsxElement {
    pub tag: String,

    /// Props in source encounter order
    pub props: Vec<Prop>,

    pub children: Vec<JsxNode>,
}

impl JsxElement {
    /// Get a prop by name.
    pub fn prop(&self, name: &str) -> Option<&PropValue> {
        self.props.iter().find(|p| p.name == name).map(|p| &p.value)
    }

    /// Props in output order: `className`, `style`, then the rest in source order.
    pub fn ordered_props(&self) -> impl Iterator<Item = &Prop> {
        let rank = |p: &&Prop| match p.name.as_str() {
            "className" => 0,
            "style" => 1,
            _ => 2,
        };
        let mut props: Vec<&Prop> = self.props.iter().collect();
        props.sort_by_key(rank);
        props.into_iter()
    }

    /// Find the first descendant element with the given tag, depth-first.
    pub fn find(&self, tag: &str) -> Option<&JsxElement> {
        self.children.iter().find_map(|child| match child {
            JsxNode::Element(el) if el.tag == tag => Some(el),
            JsxNode::Element(el) => el.find(tag),
            JsxNode::Text(_) => None,
        })
    }

    /// Class-module keys used in this subtree, deduplicated in first-use order.
    pub fn classes_used(&self) -> Vec<String> {
        let mut classes = Vec::new();
        self.collect_classes(&mut classes);
        classes
    }

    fn collect_classes(&self, classes: &mut Vec<String>) {
        if let Some(PropValue::ClassRefs(keys)) = self.prop("className") {
            for key in keys {
                if !classes.contains(key) {
                    classes.push(key.clone());
                }
            }
        }
        for child in &self.children {
            if let JsxNode::Element(el) = child {
                el.collect_classes(classes);
            }
        }
    }
}

/// A node of the rewritten tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JsxNode {
    Element(JsxElement),
    Text(String),
}

impl JsxNode {
    pub fn as_element(&self) -> Option<&JsxElement> {
        match self {
            JsxNode::Element(el) => Some(el),
            JsxNode::Text(_) => None,
        }
    }
}

/// Rewrite a markup tree into a JSX tree. Structure is unchanged.
pub fn rewrite(node: Node) -> JsxNode {
    match node {
        Node::Text(text) => JsxNode::Text(text),
        Node::Element(el) => JsxNode::Element(JsxElement {
            tag: el.tag,
            props: el.attrs.into_iter().filter_map(rewrite_attribute).collect(),
            children: el.children.into_iter().map(rewrite).collect(),
        }),
    }
}

/// Rewrite one attribute. Returns `None` only for a class list with no tokens.
pub fn rewrite_attribute(attr: Attribute) -> Option<Prop> {
    if attr.name == "class" {
        let keys = class_keys(&attr.value);
        if keys.is_empty() {
            return None;
        }
        return Some(Prop {
            name: "className".to_string(),
            value: PropValue::ClassRefs(keys),
        });
    }

    let value = if attr.name == "style" {
        PropValue::Style(parse_style(&attr.value))
    } else if is_boolean(&attr) {
        PropValue::Boolean(true)
    } else {
        PropValue::String(attr.value)
    };

    Some(Prop {
        name: attr.name,
        value,
    })
}

/// Split a class attribute into its whitespace-separated keys.
pub fn class_keys(value: &str) -> Vec<String> {
    value.split_whitespace().map(str::to_string).collect()
}

fn is_boolean(attr: &Attribute) -> bool {
    let value = attr.value.trim();
    value.eq_ignore_ascii_case(&attr.name)
        || (value.is_empty() && BOOLEAN_ATTRIBUTES.contains(&attr.name.as_str()))
}

/// Parse an inline style string into a style map.
///
/// Declarations without a colon, with an empty property or with an empty value
/// are skipped.
pub fn parse_style(style: &str) -> StyleMap {
    let mut entries = Vec::new();

    for declaration in split_declarations(style) {
        let Some((property, value)) = declaration.split_once(':') else {
            continue;
        };
        let property = property.trim();
        let value = value.trim();
        if property.is_empty() || value.is_empty() {
            continue;
        }
        entries.push((to_camel_case(property), value.to_string()));
    }

    StyleMap { entries }
}

/// Split on `;` outside of parentheses and quotes.
fn split_declarations(style: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0;

    for (i, c) in style.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '(') => depth += 1,
            (None, ')') => depth = depth.saturating_sub(1),
            (None, ';') if depth == 0 => {
                parts.push(&style[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&style[start..]);

    parts
}

/// Convert a kebab-case CSS property to camelCase (`margin-top` -> `marginTop`).
///
/// Custom properties (`--brand-color`) are kept as written.
pub fn to_camel_case(property: &str) -> String {
    if property.starts_with("--") {
        return property.to_string();
    }

    let mut out = String::with_capacity(property.len());
    let mut upper = false;
    for c in property.chars() {
        if c == '-' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsxify_markup::Element;
    use pretty_assertions::assert_eq;

    fn attr(name: &str, value: &str) -> Attribute {
        Attribute::new(name, value)
    }

    fn rewrite_one(name: &str, value: &str) -> Option<Prop> {
        rewrite_attribute(attr(name, value))
    }

    #[test]
    fn class_becomes_composed_refs() {
        let prop = rewrite_one("class", "x y").unwrap();

        assert_eq!(prop.name, "className");
        assert_eq!(
            prop.value,
            PropValue::ClassRefs(vec!["x".to_string(), "y".to_string()])
        );
    }

    #[test]
    fn class_tokens_split_on_any_whitespace() {
        let prop = rewrite_one("class", "  card\n\tcard--active ").unwrap();

        assert_eq!(
            prop.value,
            PropValue::ClassRefs(vec!["card".to_string(), "card--active".to_string()])
        );
    }

    #[test]
    fn empty_class_yields_no_prop() {
        assert_eq!(rewrite_one("class", "   "), None);
    }

    #[test]
    fn style_becomes_map() {
        let prop = rewrite_one("style", "color: red; margin:8px").unwrap();

        assert_eq!(prop.name, "style");
        assert_eq!(
            prop.value,
            PropValue::Style(StyleMap {
                entries: vec![
                    ("color".to_string(), "red".to_string()),
                    ("margin".to_string(), "8px".to_string()),
                ]
            })
        );
    }

    #[test]
    fn style_keys_are_camel_cased() {
        let map = parse_style("background-color: #fff; border-top-left-radius: 4px; -webkit-transition: none");

        assert_eq!(map.get("backgroundColor"), Some("#fff"));
        assert_eq!(map.get("borderTopLeftRadius"), Some("4px"));
        assert_eq!(map.get("WebkitTransition"), Some("none"));
    }

    #[test]
    fn malformed_declarations_are_dropped() {
        let map = parse_style("color red; : 1px; padding: ; margin: 0;;");

        assert_eq!(map.entries, vec![("margin".to_string(), "0".to_string())]);
    }

    #[test]
    fn style_without_valid_pairs_is_present_but_empty() {
        let prop = rewrite_one("style", "nonsense").unwrap();

        assert_eq!(prop.value, PropValue::Style(StyleMap::default()));
    }

    #[test]
    fn semicolons_inside_urls_do_not_split() {
        let map = parse_style("background: url(data:image/png;base64,AAAA) no-repeat; font-family: 'a;b'");

        assert_eq!(map.len(), 2);
        assert_eq!(map.get("background"), Some("url(data:image/png;base64,AAAA) no-repeat"));
        assert_eq!(map.get("fontFamily"), Some("'a;b'"));
    }

    #[test]
    fn custom_properties_keep_their_name() {
        let map = parse_style("--brand-color: teal");

        assert_eq!(map.get("--brand-color"), Some("teal"));
    }

    #[test]
    fn boolean_attributes() {
        assert_eq!(
            rewrite_one("disabled", "").unwrap().value,
            PropValue::Boolean(true)
        );
        assert_eq!(
            rewrite_one("checked", "checked").unwrap().value,
            PropValue::Boolean(true)
        );
        assert_eq!(
            rewrite_one("data-x", "DATA-X").unwrap().value,
            PropValue::Boolean(true)
        );
    }

    #[test]
    fn empty_value_on_ordinary_attribute_stays_string() {
        assert_eq!(
            rewrite_one("alt", "").unwrap().value,
            PropValue::String(String::new())
        );
    }

    #[test]
    fn other_attributes_pass_through_unchanged() {
        let prop = rewrite_one("for", "email").unwrap();

        assert_eq!(prop.name, "for");
        assert_eq!(prop.value, PropValue::String("email".to_string()));
    }

    #[test]
    fn rewrite_preserves_structure_and_order() {
        let tree = Node::Element(Element {
            tag: "a".to_string(),
            attrs: vec![
                attr("href", "/x"),
                attr("class", "link"),
                attr("title", "go"),
            ],
            children: vec![Node::Text("Go".to_string())],
        });

        let JsxNode::Element(el) = rewrite(tree) else {
            panic!("expected element");
        };

        let names: Vec<&str> = el.props.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["href", "className", "title"]);
        assert_eq!(el.children, vec![JsxNode::Text("Go".to_string())]);
    }

    #[test]
    fn ordered_props_put_class_and_style_first() {
        let el = JsxElement {
            tag: "div".to_string(),
            props: vec![
                Prop { name: "id".to_string(), value: PropValue::String("a".to_string()) },
                Prop { name: "style".to_string(), value: PropValue::Style(StyleMap::default()) },
                Prop { name: "title".to_string(), value: PropValue::String("t".to_string()) },
                Prop { name: "className".to_string(), value: PropValue::ClassRefs(vec!["c".to_string()]) },
            ],
            children: vec![],
        };

        let names: Vec<&str> = el.ordered_props().map(|p| p.name.as_str()).collect();

        assert_eq!(names, vec!["className", "style", "id", "title"]);
    }

    #[test]
    fn collects_classes_in_first_use_order() {
        let tree = Node::Element(Element {
            tag: "div".to_string(),
            attrs: vec![attr("class", "b a")],
            children: vec![Node::Element(Element {
                tag: "span".to_string(),
                attrs: vec![attr("class", "a c")],
                children: vec![],
            })],
        });

        let JsxNode::Element(el) = rewrite(tree) else {
            panic!("expected element");
        };

        assert_eq!(el.classes_used(), vec!["b", "a", "c"]);
    }
}
