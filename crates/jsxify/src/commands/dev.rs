//! Development server command.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use jsxify_scaffold::PackageManager;

use crate::config::load_config;

/// Run the generated project's dev server.
pub async fn run(
    config_path: &Path,
    dir: PathBuf,
    package_manager: Option<PackageManager>,
) -> Result<()> {
    let file_config = load_config(config_path)?;
    let manager = package_manager.unwrap_or(file_config.scripts.package_manager);

    if !dir.join("package.json").exists() {
        anyhow::bail!("{} has no package.json; run `jsxify convert` first", dir.display());
    }

    tracing::info!("Starting development server with {}", manager);

    manager
        .start(&dir)
        .await
        .with_context(|| format!("Dev server for {} failed", dir.display()))?;

    Ok(())
}
