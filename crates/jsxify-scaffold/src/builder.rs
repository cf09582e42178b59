//! Project builder.

use std::fs;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::time::Instant;

use jsxify_adapters::{FrameworkAdapter, ReactAdapter, TransformContext, TransformedComponent};
use jsxify_markup::{sanitize, to_component_name, Document, LoadError};

use crate::assets::AssetPipeline;
use crate::templates::{ProjectContext, TemplateEngine};

/// Configuration for converting one document into a project.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Source HTML document
    pub input: PathBuf,

    /// Project output directory
    pub output_dir: PathBuf,

    /// Component name override (derived from the input file name otherwise)
    pub component_name: Option<String>,

    /// `name` field of package.json (derived from the component name otherwise)
    pub project_name: Option<String>,

    /// Minify the generated CSS module
    pub minify_css: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("index.html"),
            output_dir: PathBuf::from("app"),
            component_name: None,
            project_name: None,
            minify_css: false,
        }
    }
}

/// Result of a build operation.
#[derive(Debug)]
pub struct BuildResult {
    /// Generated component name
    pub component: String,

    /// Files written, in write order
    pub artifacts: Vec<PathBuf>,

    /// Number of assets copied into `public/`
    pub assets_copied: usize,

    /// Whether the component embeds the raw markup instead of JSX
    pub fallback: bool,

    /// Total build time in milliseconds
    pub duration_ms: u64,

    /// Output directory
    pub output_dir: PathBuf,
}

/// Errors that can occur during build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("Failed to write output: {0}")]
    WriteError(String),

    #[error("Failed to render template: {0}")]
    TemplateError(String),
}

/// Converts one HTML document into a runnable React project.
pub struct ProjectBuilder {
    config: BuildConfig,
    adapter: ReactAdapter,
    templates: TemplateEngine,
}

impl ProjectBuilder {
    /// Create a new project builder.
    pub fn new(config: BuildConfig) -> Self {
        Self {
            config,
            adapter: ReactAdapter::new(),
            templates: TemplateEngine::new(),
        }
    }

    /// Build the project.
    ///
    /// Only a load failure is fatal; it is reported before anything is written.
    pub async fn build(&self) -> Result<BuildResult, BuildError> {
        let start = Instant::now();

        let doc = sanitize(&Document::load(&self.config.input)?);
        tracing::debug!(
            "Loaded {} ({} style bytes, {} assets)",
            self.config.input.display(),
            doc.style_rules.len(),
            doc.assets.len()
        );

        let name = match &self.config.component_name {
            Some(name) => to_component_name(name),
            None => doc.component_name(),
        };
        let ctx = TransformContext::new(&name);
        let component = self.convert(&doc, &ctx);

        let out = &self.config.output_dir;
        let src_dir = out.join("src");
        let mut artifacts = Vec::new();

        self.write_artifact(&out.join("package.json"), &self.package_json(&name)?, &mut artifacts)?;

        let project = ProjectContext {
            title: doc.title().unwrap_or_else(|| name.clone()),
            component: name.clone(),
            component_file: format!("{}.{}", name, self.adapter.extension()),
            stylesheets: AssetPipeline::stylesheet_urls(&doc),
        };

        for (template, path) in [
            ("index.html", out.join("index.html")),
            ("vite.config.js", out.join("vite.config.js")),
            ("main.jsx", src_dir.join("main.jsx")),
        ] {
            let rendered = self
                .templates
                .render_file(template, &project)
                .map_err(|e: minijinja::Error| BuildError::TemplateError(e.to_string()))?;
            self.write_artifact(&path, &rendered, &mut artifacts)?;
        }

        self.write_artifact(
            &src_dir.join(&project.component_file),
            &component.source,
            &mut artifacts,
        )?;

        // The fallback keeps literal class names, so its rules must stay global
        let css_file = if component.fallback {
            format!("{}.css", name)
        } else {
            format!("{}.module.css", name)
        };
        let css = self.stylesheet(&doc.style_rules);
        self.write_artifact(&src_dir.join(css_file), &css, &mut artifacts)?;

        for class in &component.literal_classes {
            tracing::warn!(
                "Class '{}' has no rule in the extracted styles; keeping the literal class name",
                class
            );
        }
        for prop in &component.discarded_props {
            tracing::warn!("Dropped {} from the document root", prop);
        }

        let copied = AssetPipeline::copy_assets(&doc, &out.join("public"))
            .map_err(|e| BuildError::WriteError(e.to_string()))?;
        for path in &copied {
            tracing::info!("Copied {}", path.display());
        }

        let duration = start.elapsed();

        Ok(BuildResult {
            component: name,
            assets_copied: copied.len(),
            artifacts: artifacts.into_iter().chain(copied).collect(),
            fallback: component.fallback,
            duration_ms: duration.as_millis() as u64,
            output_dir: out.clone(),
        })
    }

    /// Run the adapter, answering any conversion failure with the fallback component.
    fn convert(&self, doc: &Document, ctx: &TransformContext) -> TransformedComponent {
        let attempt = panic::catch_unwind(AssertUnwindSafe(|| self.adapter.transform(doc, ctx)));

        match attempt {
            Ok(Ok(component)) => component,
            Ok(Err(e)) => {
                tracing::warn!("Falling back to raw markup for {}: {}", ctx.component_name, e);
                self.adapter.fallback(doc, ctx)
            }
            Err(_) => {
                tracing::warn!(
                    "Conversion of {} aborted unexpectedly, falling back to raw markup",
                    ctx.component_name
                );
                self.adapter.fallback(doc, ctx)
            }
        }
    }

    /// Render package.json for the generated project.
    fn package_json(&self, component: &str) -> Result<String, BuildError> {
        let name = self
            .config
            .project_name
            .clone()
            .unwrap_or_else(|| to_package_name(component));

        let manifest = serde_json::json!({
            "name": name,
            "private": true,
            "version": "0.0.0",
            "type": "module",
            "scripts": {
                "dev": "vite",
                "build": "vite build",
                "preview": "vite preview"
            },
            "dependencies": {
                "react": "^18.3.1",
                "react-dom": "^18.3.1"
            },
            "devDependencies": {
                "@vitejs/plugin-react": "^4.3.1",
                "vite": "^5.4.0"
            }
        });

        let mut json = serde_json::to_string_pretty(&manifest)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;
        json.push('\n');
        Ok(json)
    }

    /// Contents of the generated stylesheet, minified when configured.
    fn stylesheet(&self, style_rules: &str) -> String {
        let mut css = style_rules.to_string();
        if !css.is_empty() && !css.ends_with('\n') {
            css.push('\n');
        }

        if self.config.minify_css && !css.is_empty() {
            match AssetPipeline::minify_css(&css) {
                Ok(minified) => return minified,
                Err(e) => tracing::warn!("Keeping unminified CSS: {}", e),
            }
        }

        css
    }

    fn write_artifact(
        &self,
        path: &Path,
        contents: &str,
        artifacts: &mut Vec<PathBuf>,
    ) -> Result<(), BuildError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| BuildError::WriteError(e.to_string()))?;
        }
        fs::write(path, contents)
            .map_err(|e| BuildError::WriteError(format!("{}: {}", path.display(), e)))?;

        tracing::info!("Wrote {}", path.display());
        artifacts.push(path.to_path_buf());
        Ok(())
    }
}

/// Convert a component name to an npm package name (`LandingPage` -> `landing-page`).
fn to_package_name(component: &str) -> String {
    let mut name = String::new();
    for (i, c) in component.chars().enumerate() {
        if c.is_ascii_uppercase() {
            if i > 0 {
                name.push('-');
            }
            name.push(c.to_ascii_lowercase());
        } else {
            name.push(c);
        }
    }
    name
}
