//! React component module generator.

use crate::traits::TransformContext;

/// Visible marker rendered by fallback components.
pub const FALLBACK_WARNING: &str =
    "Automatic conversion failed: original markup is embedded as raw HTML.";

/// Wrap a serialized JSX body in a component module.
///
/// `body` is expected at an indent level of 2 (inside `return (`).
pub fn generate_component(ctx: &TransformContext, body: &str) -> String {
    let name = &ctx.component_name;
    let styles_import = &ctx.styles_import;

    if body.trim() == "null" {
        return format!(
            r#"import styles from '{styles_import}';

export default function {name}() {{
  return null;
}}
"#
        );
    }

    format!(
        r#"import styles from '{styles_import}';

export default function {name}() {{
  return (
{body}
  );
}}
"#
    )
}

/// Generate a component that renders `markup` through `dangerouslySetInnerHTML`.
///
/// The markup keeps its literal class names, so the style rules are imported
/// as a global stylesheet.
pub fn generate_fallback(ctx: &TransformContext, markup: &str) -> String {
    let name = &ctx.component_name;
    let styles_import = &ctx.global_styles_import;
    let raw = escape_template_literal(markup);

    format!(
        r#"// jsxify could not convert this document into JSX automatically.
// The markup below is rendered as-is; review it before shipping.
import '{styles_import}';

const RAW_MARKUP = `{raw}`;

export default function {name}() {{
  return (
    <>
      <div role="alert" style={{{{ padding: '8px 12px', background: '#fff3cd', color: '#664d03' }}}}>
        {warning}
      </div>
      <div dangerouslySetInnerHTML={{{{ __html: RAW_MARKUP }}}} />
    </>
  );
}}
"#,
        warning = FALLBACK_WARNING,
    )
}

/// Escape text for a JavaScript template literal.
fn escape_template_literal(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('`', "\\`")
        .replace("${", "\\${")
}
