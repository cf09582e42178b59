//! JSX serialization of rewritten trees.

use std::sync::LazyLock;

use jsxify_markup::MAX_DEPTH;
use regex::Regex;

use crate::props::{JsxElement, JsxNode, Prop, PropValue, StyleMap};

/// Columns added per nesting level.
pub const INDENT: usize = 2;

static JSX_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    // Match: div, font-face, xlink:href, aria-label
    Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$-]*(?::[A-Za-z_$][A-Za-z0-9_$-]*)?$")
        .expect("Invalid JSX name regex")
});

static IDENTIFIER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").expect("Invalid identifier regex")
});

static ENTITY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(?:#[0-9]+|#[xX][0-9a-fA-F]+|[A-Za-z][A-Za-z0-9]*);")
        .expect("Invalid entity regex")
});

/// Errors that can occur during serialization.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SerializeError {
    #[error("Invalid JSX tag name: <{0}>")]
    InvalidTag(String),

    #[error("Invalid JSX prop name '{name}' on <{tag}>")]
    InvalidProp { tag: String, name: String },

    #[error("Maximum nesting depth ({0}) exceeded")]
    TooDeep(usize),
}

/// HTML inter-element whitespace. Other Unicode spaces such as U+00A0 are content.
const HTML_WHITESPACE: &[char] = &[' ', '\t', '\n', '\r', '\x0C'];

/// Elements whose text keeps its whitespace when rendered.
const PREFORMATTED_TAGS: &[&str] = &["pre", "textarea", "listing"];

/// Rendering state inherited by a subtree.
#[derive(Debug, Clone, Copy)]
struct Scope<'a> {
    /// Class keys with no rule in the CSS module; rendered with their literal name as fallback
    literal_classes: &'a [String],
    preformatted: bool,
}

/// Serialize a node as JSX starting at `indent_level`.
///
/// All-or-nothing: any invalid tag or prop name anywhere in the subtree fails
/// the whole call.
pub fn serialize(node: &JsxNode, indent_level: usize) -> Result<String, SerializeError> {
    let scope = Scope {
        literal_classes: &[],
        preformatted: false,
    };
    let mut lines = Vec::new();
    write_node(node, indent_level, 0, scope, &mut lines)?;
    Ok(lines.join("\n"))
}

/// Serialize the `<body>` content of a document tree as a component body.
///
/// A single element child is emitted as is, several children are wrapped in
/// a fragment, and an empty body becomes `null`. Class keys listed in
/// `literal_classes` render as `styles.key ?? 'key'` so rules from linked
/// stylesheets still match.
pub fn serialize_root(
    root: &JsxNode,
    indent_level: usize,
    literal_classes: &[String],
) -> Result<String, SerializeError> {
    let scope = Scope {
        literal_classes,
        preformatted: false,
    };

    let children = match body_of(root) {
        Some(body) => &body.children,
        None => {
            let mut lines = Vec::new();
            write_node(root, indent_level, 0, scope, &mut lines)?;
            return Ok(lines.join("\n"));
        }
    };

    let mut rendered: Vec<(&JsxNode, Vec<String>)> = Vec::new();
    for child in children {
        let mut lines = Vec::new();
        write_node(child, indent_level + 1, 1, scope, &mut lines)?;
        if !lines.is_empty() {
            rendered.push((child, lines));
        }
    }

    match rendered.as_slice() {
        [] => Ok(format!("{}null", pad(indent_level))),
        [(child, _)] if matches!(child, JsxNode::Element(_)) => {
            let mut lines = Vec::new();
            write_node(child, indent_level, 1, scope, &mut lines)?;
            Ok(lines.join("\n"))
        }
        _ => {
            let mut lines = vec![format!("{}<>", pad(indent_level))];
            for (_, child_lines) in rendered {
                lines.extend(child_lines);
            }
            lines.push(format!("{}</>", pad(indent_level)));
            Ok(lines.join("\n"))
        }
    }
}

/// Props on `<html>` and `<body>` that [`serialize_root`] does not render,
/// as `<tag> name` labels.
pub fn discarded_root_props(root: &JsxNode) -> Vec<String> {
    let JsxNode::Element(html) = root else {
        return Vec::new();
    };

    let mut discarded: Vec<String> = html
        .props
        .iter()
        .map(|p| format!("<{}> {}", html.tag, p.name))
        .collect();

    if let Some(body) = html.find("body") {
        discarded.extend(body.props.iter().map(|p| format!("<{}> {}", body.tag, p.name)));
    }

    discarded
}

/// The `<body>` element of a document tree, or the root element when it has none.
fn body_of(root: &JsxNode) -> Option<&JsxElement> {
    match root {
        JsxNode::Element(el) if el.tag == "body" => Some(el),
        JsxNode::Element(el) => Some(el.find("body").unwrap_or(el)),
        JsxNode::Text(_) => None,
    }
}

fn pad(level: usize) -> String {
    " ".repeat(level * INDENT)
}

fn write_node(
    node: &JsxNode,
    level: usize,
    depth: usize,
    scope: Scope<'_>,
    lines: &mut Vec<String>,
) -> Result<(), SerializeError> {
    if depth > MAX_DEPTH {
        return Err(SerializeError::TooDeep(MAX_DEPTH));
    }

    match node {
        JsxNode::Text(text) => {
            if let Some(line) = text_line(text, scope.preformatted) {
                lines.push(format!("{}{}", pad(level), line));
            }
            Ok(())
        }
        JsxNode::Element(el) => write_element(el, level, depth, scope, lines),
    }
}

fn write_element(
    el: &JsxElement,
    level: usize,
    depth: usize,
    scope: Scope<'_>,
    lines: &mut Vec<String>,
) -> Result<(), SerializeError> {
    if !JSX_NAME_RE.is_match(&el.tag) {
        return Err(SerializeError::InvalidTag(el.tag.clone()));
    }

    let mut open = format!("{}<{}", pad(level), el.tag);
    for prop in el.ordered_props() {
        if let Some(rendered) = render_prop(&el.tag, prop, scope.literal_classes)? {
            open.push(' ');
            open.push_str(&rendered);
        }
    }

    let child_scope = Scope {
        preformatted: scope.preformatted || PREFORMATTED_TAGS.contains(&el.tag.as_str()),
        ..scope
    };

    let mut body = Vec::new();
    for child in &el.children {
        write_node(child, level + 1, depth + 1, child_scope, &mut body)?;
    }

    if body.is_empty() {
        open.push_str(" />");
        lines.push(open);
    } else {
        open.push('>');
        lines.push(open);
        lines.extend(body);
        lines.push(format!("{}</{}>", pad(level), el.tag));
    }

    Ok(())
}

/// Render one prop, or `None` when it has nothing to say.
fn render_prop(
    tag: &str,
    prop: &Prop,
    literal_classes: &[String],
) -> Result<Option<String>, SerializeError> {
    if !JSX_NAME_RE.is_match(&prop.name) {
        return Err(SerializeError::InvalidProp {
            tag: tag.to_string(),
            name: prop.name.clone(),
        });
    }

    let class_ref = |key: &String| {
        let lookup = module_lookup(key);
        if literal_classes.contains(key) {
            format!("{} ?? '{}'", lookup, escape_string(key))
        } else {
            lookup
        }
    };

    let rendered = match &prop.value {
        PropValue::ClassRefs(keys) => match keys.as_slice() {
            [] => return Ok(None),
            [key] => format!("{}={{{}}}", prop.name, class_ref(key)),
            _ => {
                let refs: Vec<String> = keys.iter().map(|k| format!("${{{}}}", class_ref(k))).collect();
                format!("{}={{`{}`}}", prop.name, refs.join(" "))
            }
        },
        PropValue::Style(map) => format!("{}={{{}}}", prop.name, style_object(map)),
        PropValue::Boolean(true) => prop.name.clone(),
        PropValue::Boolean(false) => format!("{}={{false}}", prop.name),
        PropValue::String(value) => {
            if value.contains('"') || ENTITY_RE.is_match(value) {
                format!("{}={{'{}'}}", prop.name, escape_string(value))
            } else {
                format!("{}=\"{}\"", prop.name, value)
            }
        }
    };

    Ok(Some(rendered))
}

/// CSS-module lookup for a class key: `styles.card` or `styles['card--active']`.
fn module_lookup(key: &str) -> String {
    if IDENTIFIER_RE.is_match(key) {
        format!("styles.{}", key)
    } else {
        format!("styles['{}']", escape_string(key))
    }
}

/// Render a style map as a JS object literal.
fn style_object(map: &StyleMap) -> String {
    if map.is_empty() {
        return "{}".to_string();
    }

    let entries: Vec<String> = map
        .entries
        .iter()
        .map(|(key, value)| {
            let key = if IDENTIFIER_RE.is_match(key) {
                key.clone()
            } else {
                format!("'{}'", escape_string(key))
            };
            format!("{}: '{}'", key, escape_string(value))
        })
        .collect();

    format!("{{ {} }}", entries.join(", "))
}

/// Render a text node as one JSX line.
///
/// Whitespace-only text that spans lines is indentation and yields nothing.
/// Leading or trailing spaces within a line are kept as `{' '}`. Text with
/// inner line breaks, and any text under a preformatted element, becomes a
/// string expression so JSX does not fold its whitespace.
fn text_line(text: &str, preformatted: bool) -> Option<String> {
    if preformatted {
        return if text.is_empty() {
            None
        } else {
            Some(string_expression(text))
        };
    }

    let trimmed = text.trim_matches(HTML_WHITESPACE);
    if trimmed.is_empty() {
        return if text.is_empty() || text.contains('\n') {
            None
        } else {
            Some("{' '}".to_string())
        };
    }

    let leading = &text[..text.len() - text.trim_start_matches(HTML_WHITESPACE).len()];
    let trailing = &text[text.trim_end_matches(HTML_WHITESPACE).len()..];
    let inline_leading = !leading.is_empty() && !leading.contains('\n');
    let inline_trailing = !trailing.is_empty() && !trailing.contains('\n');

    if trimmed.contains(['\n', '\r']) {
        let mut literal = String::new();
        if inline_leading {
            literal.push_str(leading);
        }
        literal.push_str(trimmed);
        if inline_trailing {
            literal.push_str(trailing);
        }
        return Some(string_expression(&literal));
    }

    let mut line = String::new();
    if inline_leading {
        line.push_str("{' '}");
    }
    line.push_str(&escape_text(trimmed));
    if inline_trailing {
        line.push_str("{' '}");
    }

    Some(line)
}

/// Text as a JSX string expression: `{'a\nb'}`.
fn string_expression(text: &str) -> String {
    format!("{{'{}'}}", escape_string(text))
}

/// Neutralize characters JSX would read as markup or expressions.
fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '{' | '}' | '<' | '>' | '&' => {
                out.push_str("{'");
                out.push(c);
                out.push_str("'}");
            }
            _ => out.push(c),
        }
    }
    out
}

/// Escape a string for a single-quoted JavaScript literal.
fn escape_string(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('\'', "\\'")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
}
