//! Style block extraction and asset collection.

use std::path::{Component, Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::document::Document;

static STYLE_BLOCK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<style\b[^>]*>(.*?)</style\s*>").expect("Invalid style block regex")
});

static COMMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").expect("Invalid comment regex"));

static ASSET_TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<(img|script|link)\b([^>]*)>").expect("Invalid asset tag regex")
});

static ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
    // Match: name="value", name='value' or name=value
    Regex::new(r#"([a-zA-Z_:][-a-zA-Z0-9_:.]*)\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+))"#)
        .expect("Invalid attribute regex")
});

static SCHEME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z][a-zA-Z0-9+.-]*:").expect("Invalid URL scheme regex")
});

/// Separate style rules and asset references from the structural markup.
///
/// Returns a new document; `doc` is left untouched. Comments are removed
/// first so commented-out style blocks and references stay inactive. Inline
/// `style` attributes stay in the markup so the attribute rewriter can
/// translate them.
pub fn sanitize(doc: &Document) -> Document {
    let visible = COMMENT_RE.replace_all(&doc.structural, "");

    let mut blocks = Vec::new();
    for cap in STYLE_BLOCK_RE.captures_iter(&visible) {
        let content = cap.get(1).map(|m| m.as_str()).unwrap_or("");
        blocks.push(content.trim_matches('\n').to_string());
    }

    let structural = STYLE_BLOCK_RE.replace_all(&visible, "").into_owned();
    let references = collect_assets(&structural);

    let mut style_rules = doc.style_rules.clone();
    for block in blocks {
        if !style_rules.is_empty() {
            style_rules.push('\n');
        }
        style_rules.push_str(&block);
    }

    let mut assets = doc.assets.clone();
    let mut stylesheets = doc.stylesheets.clone();
    for reference in references {
        if reference.stylesheet {
            stylesheets.push(reference.path.clone());
        }
        assets.push(reference.path);
    }

    Document {
        path: doc.path.clone(),
        source: doc.source.clone(),
        structural,
        style_rules,
        assets,
        stylesheets,
    }
}

/// An asset reference found in the markup.
struct AssetRef {
    path: String,
    stylesheet: bool,
}

/// Collect `src`/`href` references from images, scripts and stylesheet links.
fn collect_assets(markup: &str) -> Vec<AssetRef> {
    let mut assets = Vec::new();

    for cap in ASSET_TAG_RE.captures_iter(markup) {
        let tag = cap.get(1).map(|m| m.as_str().to_ascii_lowercase()).unwrap_or_default();
        let attrs = cap.get(2).map(|m| m.as_str()).unwrap_or("");

        let reference = match tag.as_str() {
            "img" | "script" => attr_value(attrs, "src"),
            "link" => {
                let is_stylesheet = attr_value(attrs, "rel")
                    .map(|rel| {
                        rel.split_whitespace()
                            .any(|r| r.eq_ignore_ascii_case("stylesheet"))
                    })
                    .unwrap_or(false);
                if is_stylesheet {
                    attr_value(attrs, "href")
                } else {
                    None
                }
            }
            _ => None,
        };

        if let Some(reference) = reference {
            let reference = reference.trim();
            if !reference.is_empty() {
                assets.push(AssetRef {
                    path: reference.to_string(),
                    stylesheet: tag == "link",
                });
            }
        }
    }

    assets
}

/// Find an attribute value inside the raw attribute text of a tag.
fn attr_value(attrs: &str, name: &str) -> Option<String> {
    ATTR_RE.captures_iter(attrs).find_map(|cap| {
        let attr_name = cap.get(1)?.as_str();
        if !attr_name.eq_ignore_ascii_case(name) {
            return None;
        }
        cap.get(2)
            .or_else(|| cap.get(3))
            .or_else(|| cap.get(4))
            .map(|m| m.as_str().to_string())
    })
}

/// Where an asset reference points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetKind {
    /// A file next to the document, as a path relative to the document directory
    Local(PathBuf),
    /// A URL with a scheme or a protocol-relative URL
    Remote,
    /// A path that escapes the document directory
    Rejected,
}

/// Classify an asset reference for copying into the generated project.
pub fn classify_asset(reference: &str) -> AssetKind {
    let reference = reference.trim();

    if reference.starts_with("//") || SCHEME_RE.is_match(reference) {
        return AssetKind::Remote;
    }

    // Drop query strings and fragments
    let end = reference.find(['?', '#']).unwrap_or(reference.len());
    let relative = reference[..end].trim_start_matches('/');

    if relative.is_empty() {
        return AssetKind::Rejected;
    }

    let path = Path::new(relative);
    let mut clean = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Normal(part) => clean.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return AssetKind::Rejected;
            }
        }
    }

    if clean.as_os_str().is_empty() {
        AssetKind::Rejected
    } else {
        AssetKind::Local(clean)
    }
}
