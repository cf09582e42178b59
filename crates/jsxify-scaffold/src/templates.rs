//! Template engine for rendering project files.

use minijinja::{context, AutoEscape, Environment};

/// Context for rendering project templates.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ProjectContext {
    /// Page title for index.html, as HTML text
    pub title: String,
    /// Generated component name
    pub component: String,
    /// Component module file name (e.g., "Landing.jsx")
    pub component_file: String,
    /// Stylesheet URLs linked from the original document
    pub stylesheets: Vec<String>,
}

/// Template engine using minijinja.
pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    /// Create a new template engine with the project templates.
    pub fn new() -> Self {
        let mut env = Environment::new();

        // Titles come from the source document and are already HTML-encoded
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.add_filter("quote_attr", quote_attr);

        env.add_template_owned("index.html".to_string(), INDEX_TEMPLATE.to_string())
            .expect("Failed to add index template");

        env.add_template_owned("main.jsx".to_string(), MAIN_TEMPLATE.to_string())
            .expect("Failed to add main template");

        env.add_template_owned("vite.config.js".to_string(), VITE_CONFIG_TEMPLATE.to_string())
            .expect("Failed to add vite config template");

        Self { env }
    }

    /// Render a project file using the specified template.
    pub fn render_file(
        &self,
        template: &str,
        context: &ProjectContext,
    ) -> Result<String, minijinja::Error> {
        let tmpl = self.env.get_template(template)?;

        tmpl.render(context! {
            title => &context.title,
            component => &context.component,
            component_file => &context.component_file,
            stylesheets => &context.stylesheets,
        })
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Make a raw attribute value safe inside double quotes.
///
/// Values are copied from the source markup, so existing entities stay as written.
fn quote_attr(value: String) -> String {
    value.replace('"', "&quot;")
}

const INDEX_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="UTF-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1.0" />
    <title>{{ title }}</title>
    {% for href in stylesheets %}<link rel="stylesheet" href="{{ href|quote_attr }}" />
    {% endfor %}
  </head>
  <body>
    <div id="root"></div>
    <script type="module" src="/src/main.jsx"></script>
  </body>
</html>
"##;

const MAIN_TEMPLATE: &str = r##"import React from 'react';
import ReactDOM from 'react-dom/client';
import {{ component }} from './{{ component_file }}';

ReactDOM.createRoot(document.getElementById('root')).render(
  <React.StrictMode>
    <{{ component }} />
  </React.StrictMode>
);
"##;

const VITE_CONFIG_TEMPLATE: &str = r##"import { defineConfig } from 'vite';
import react from '@vitejs/plugin-react';

export default defineConfig({
  plugins: [react()],
});
"##;

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> ProjectContext {
        ProjectContext {
            title: "Acme &amp; Co".to_string(),
            component: "Landing".to_string(),
            component_file: "Landing.jsx".to_string(),
            stylesheets: vec!["/css/site.css".to_string()],
        }
    }

    #[test]
    fn renders_index_html() {
        let engine = TemplateEngine::new();

        let html = engine.render_file("index.html", &context()).unwrap();

        assert!(html.contains("<title>Acme &amp; Co</title>"));
        assert!(html.contains(r#"<link rel="stylesheet" href="/css/site.css" />"#));
        assert!(html.contains(r#"<div id="root"></div>"#));
        assert!(html.contains(r#"src="/src/main.jsx""#));
    }

    #[test]
    fn quotes_in_stylesheet_urls_cannot_break_out() {
        let engine = TemplateEngine::new();
        let ctx = ProjectContext {
            stylesheets: vec![r#"/a.css" onload="alert(1)"#.to_string()],
            ..context()
        };

        let html = engine.render_file("index.html", &ctx).unwrap();

        assert!(html.contains(r#"href="/a.css&quot; onload=&quot;alert(1)" />"#));
        assert!(!html.contains(r#"onload="alert"#));
    }

    #[test]
    fn renders_entry_referencing_component() {
        let engine = TemplateEngine::new();

        let js = engine.render_file("main.jsx", &context()).unwrap();

        assert!(js.contains("import Landing from './Landing.jsx';"));
        assert!(js.contains("<Landing />"));
    }

    #[test]
    fn renders_vite_config() {
        let engine = TemplateEngine::new();

        let js = engine.render_file("vite.config.js", &context()).unwrap();

        assert!(js.contains("plugins: [react()]"));
    }
}
