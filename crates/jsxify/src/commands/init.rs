//! Write a default configuration file.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Run the init command.
pub async fn run(config_path: &Path, yes: bool) -> Result<()> {
    if config_path.exists() && !yes {
        tracing::warn!(
            "{} already exists. Use --yes to overwrite.",
            config_path.display()
        );
        return Ok(());
    }

    fs::write(config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    tracing::info!("Created {}", config_path.display());
    tracing::info!("Run 'jsxify convert <INPUT> <OUTPUT>' to convert a page.");

    Ok(())
}

pub(crate) const DEFAULT_CONFIG: &str = r#"# jsxify configuration

[project]
# package.json name for generated projects (derived from the component name when unset)
# name = "my-site"

[styles]
# Minify the generated CSS module
minify = false

[scripts]
# Package manager used by --install, --start and `jsxify dev`: npm, pnpm or yarn
package_manager = "npm"

# Install dependencies after every conversion
install = false

# Start the dev server after every conversion
start = false
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn writes_default_config() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("jsxify.toml");

        run(&path, false).await.unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), DEFAULT_CONFIG);
    }

    #[tokio::test]
    async fn keeps_existing_config_without_yes() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("jsxify.toml");
        fs::write(&path, "[styles]\nminify = true\n").unwrap();

        run(&path, false).await.unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "[styles]\nminify = true\n");

        run(&path, true).await.unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), DEFAULT_CONFIG);
    }
}
