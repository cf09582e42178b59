//! Asset pipeline for style definitions and referenced files.

use std::fs;
use std::path::{Path, PathBuf};

use jsxify_markup::{classify_asset, AssetKind, Document};

/// Asset pipeline utilities.
pub struct AssetPipeline;

impl AssetPipeline {
    /// Minify CSS using lightningcss.
    pub fn minify_css(css: &str) -> Result<String, String> {
        use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};

        let stylesheet = StyleSheet::parse(css, ParserOptions::default())
            .map_err(|e| format!("CSS parse error: {}", e))?;

        let minified = stylesheet
            .to_css(PrinterOptions {
                minify: true,
                ..Default::default()
            })
            .map_err(|e| format!("CSS minify error: {}", e))?;

        Ok(minified.code)
    }

    /// Copy local assets referenced by the document into `public_dir`.
    ///
    /// Remote references are left alone. References that escape the document
    /// directory or point at missing files are skipped with a warning.
    /// Returns the written paths.
    pub fn copy_assets(doc: &Document, public_dir: &Path) -> std::io::Result<Vec<PathBuf>> {
        let base_dir = doc.base_dir();
        let mut copied: Vec<PathBuf> = Vec::new();

        for reference in &doc.assets {
            match classify_asset(reference) {
                AssetKind::Local(relative) => {
                    let dest = public_dir.join(&relative);
                    if copied.contains(&dest) {
                        continue;
                    }

                    let source = base_dir.join(&relative);
                    if !source.is_file() {
                        tracing::warn!("Asset not found: {}", source.display());
                        continue;
                    }

                    if let Some(parent) = dest.parent() {
                        fs::create_dir_all(parent)?;
                    }
                    fs::copy(&source, &dest)?;
                    tracing::debug!("Copied asset {}", relative.display());
                    copied.push(dest);
                }
                AssetKind::Remote => {
                    tracing::debug!("Leaving remote asset {}", reference);
                }
                AssetKind::Rejected => {
                    tracing::warn!("Skipping asset outside the document directory: {}", reference);
                }
            }
        }

        Ok(copied)
    }

    /// URLs for the document's stylesheet links as served by the generated project.
    pub fn stylesheet_urls(doc: &Document) -> Vec<String> {
        let mut urls: Vec<String> = Vec::new();

        for reference in &doc.stylesheets {
            let url = match classify_asset(reference) {
                AssetKind::Local(relative) => {
                    let parts: Vec<String> = relative
                        .components()
                        .map(|c| c.as_os_str().to_string_lossy().into_owned())
                        .collect();
                    format!("/{}", parts.join("/"))
                }
                AssetKind::Remote => reference.trim().to_string(),
                AssetKind::Rejected => continue,
            };

            if !urls.contains(&url) {
                urls.push(url);
            }
        }

        urls
    }
}
