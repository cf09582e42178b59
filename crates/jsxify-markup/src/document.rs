//! Source document loading.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

static ROOT_MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<html(?:\s|>|/)").expect("Invalid root marker regex"));

static TITLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<title\b[^>]*>(.*?)</title\s*>").expect("Invalid title regex")
});

/// An HTML document being converted.
///
/// `structural`, `style_rules`, `assets` and `stylesheets` are filled in by
/// [`sanitize`](crate::sanitize::sanitize); a freshly loaded document carries the
/// raw markup as its structural content.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Path the document was read from, if any
    pub path: Option<PathBuf>,

    /// Raw markup exactly as read
    pub source: String,

    /// Markup with embedded style blocks removed
    pub structural: String,

    /// Contents of every `<style>` block, newline-joined in document order
    pub style_rules: String,

    /// Referenced asset paths in order of first occurrence
    pub assets: Vec<String>,

    /// The subset of `assets` referenced by `<link rel="stylesheet">`
    pub stylesheets: Vec<String>,
}

impl Document {
    /// Read and validate a document from disk.
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let source = fs::read_to_string(path).map_err(|e| LoadError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        Self::from_source(source, Some(path.to_path_buf()))
    }

    /// Validate in-memory markup as a document.
    ///
    /// Fails when the markup has no `<html>` root marker.
    pub fn from_source(source: String, path: Option<PathBuf>) -> Result<Self, LoadError> {
        if !ROOT_MARKER_RE.is_match(&source) {
            return Err(LoadError::InvalidMarkup(
                path.as_deref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "<input>".to_string()),
            ));
        }

        Ok(Self {
            path,
            structural: source.clone(),
            source,
            style_rules: String::new(),
            assets: Vec::new(),
            stylesheets: Vec::new(),
        })
    }

    /// Directory that relative asset references resolve against.
    pub fn base_dir(&self) -> PathBuf {
        self.path
            .as_deref()
            .and_then(Path::parent)
            .map(Path::to_path_buf)
            .unwrap_or_default()
    }

    /// Text of the first `<title>` element, whitespace-collapsed.
    pub fn title(&self) -> Option<String> {
        let raw = TITLE_RE.captures(&self.source)?.get(1)?.as_str();
        let title = raw.split_whitespace().collect::<Vec<_>>().join(" ");
        if title.is_empty() {
            None
        } else {
            Some(title)
        }
    }

    /// Whether the extracted style rules contain a selector for `.class`.
    pub fn defines_class(&self, class: &str) -> bool {
        let pattern = format!(r"\.{}(?:[^-_a-zA-Z0-9]|$)", regex::escape(class));
        Regex::new(&pattern)
            .map(|re| re.is_match(&self.style_rules))
            .unwrap_or(false)
    }

    /// Component name derived from the file stem (`about-us.html` -> `AboutUs`).
    pub fn component_name(&self) -> String {
        let stem = self
            .path
            .as_deref()
            .and_then(Path::file_stem)
            .and_then(|s| s.to_str())
            .unwrap_or("");

        to_component_name(stem)
    }
}

/// Convert an arbitrary name into a PascalCase component identifier.
pub fn to_component_name(raw: &str) -> String {
    let name: String = raw
        .split(|c: char| !c.is_ascii_alphanumeric())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(c) => c.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect();

    match name.chars().next() {
        None => "Page".to_string(),
        Some(c) if c.is_ascii_digit() => format!("Page{}", name),
        Some(_) => name,
    }
}

/// Errors that can occur when loading a document.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Failed to read {path}: {message}")]
    Read { path: String, message: String },

    #[error("Invalid markup in {0}: no <html> root element found")]
    InvalidMarkup(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn accepts_document_with_root_marker() {
        let doc = Document::from_source("<html><body></body></html>".to_string(), None).unwrap();

        assert_eq!(doc.structural, doc.source);
        assert!(doc.style_rules.is_empty());
        assert!(doc.assets.is_empty());
    }

    #[test]
    fn root_marker_is_case_insensitive() {
        let doc = Document::from_source("<!DOCTYPE html>\n<HTML lang=\"en\"></HTML>".to_string(), None);

        assert!(doc.is_ok());
    }

    #[test]
    fn rejects_missing_root_marker() {
        let result = Document::from_source("<div>fragment</div>".to_string(), None);

        assert!(matches!(result, Err(LoadError::InvalidMarkup(_))));
    }

    #[test]
    fn doctype_alone_is_not_a_root() {
        let result = Document::from_source("<!DOCTYPE html><body></body>".to_string(), None);

        assert!(matches!(result, Err(LoadError::InvalidMarkup(_))));
    }

    #[test]
    fn loads_from_disk() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("landing-page.html");
        fs::write(&path, "<html><body><p>Hi</p></body></html>").unwrap();

        let doc = Document::load(&path).unwrap();

        assert_eq!(doc.path.as_deref(), Some(path.as_path()));
        assert_eq!(doc.component_name(), "LandingPage");
        assert_eq!(doc.base_dir(), temp.path());
    }

    #[test]
    fn load_reports_missing_file() {
        let temp = tempdir().unwrap();

        let result = Document::load(&temp.path().join("missing.html"));

        assert!(matches!(result, Err(LoadError::Read { .. })));
    }

    #[test]
    fn extracts_title() {
        let doc = Document::from_source(
            "<html><head><TITLE>\n  Acme   Home\n</TITLE></head></html>".to_string(),
            None,
        )
        .unwrap();

        assert_eq!(doc.title(), Some("Acme Home".to_string()));
    }

    #[test]
    fn missing_or_blank_title_is_none() {
        let doc = Document::from_source("<html><title> </title></html>".to_string(), None).unwrap();

        assert_eq!(doc.title(), None);
    }

    #[test]
    fn finds_class_selectors_in_style_rules() {
        let mut doc = Document::from_source("<html></html>".to_string(), None).unwrap();
        doc.style_rules = ".card { padding: 1rem; }\n.card-title:hover { color: red; }".to_string();

        assert!(doc.defines_class("card"));
        assert!(doc.defines_class("card-title"));
        assert!(!doc.defines_class("cardx"));
        assert!(!doc.defines_class("hero"));
    }

    #[test]
    fn component_names() {
        assert_eq!(to_component_name("index"), "Index");
        assert_eq!(to_component_name("about_us.v2"), "AboutUsV2");
        assert_eq!(to_component_name("404"), "Page404");
        assert_eq!(to_component_name(""), "Page");
    }
}
