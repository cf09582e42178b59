//! HTML to React project conversion command.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use jsxify_scaffold::{BuildConfig, PackageManager, ProjectBuilder};

use crate::config::{load_config, ConfigFile};

/// Command-line options for `jsxify convert`.
#[derive(Debug, Default)]
pub struct ConvertOptions {
    pub input: PathBuf,
    pub output: PathBuf,
    pub name: Option<String>,
    pub install: bool,
    pub start: bool,
    pub package_manager: Option<PackageManager>,
    pub minify_css: bool,
}

/// Post-build steps after merging flags with the config file.
#[derive(Debug, PartialEq)]
struct Scripts {
    package_manager: PackageManager,
    install: bool,
    start: bool,
}

/// Merge command-line flags over file configuration.
fn resolve(options: &ConvertOptions, file_config: ConfigFile) -> (BuildConfig, Scripts) {
    let config = BuildConfig {
        input: options.input.clone(),
        output_dir: options.output.clone(),
        component_name: options.name.clone(),
        project_name: file_config.project.name,
        minify_css: options.minify_css || file_config.styles.minify,
    };

    let scripts = Scripts {
        package_manager: options
            .package_manager
            .unwrap_or(file_config.scripts.package_manager),
        install: options.install || file_config.scripts.install,
        start: options.start || file_config.scripts.start,
    };

    (config, scripts)
}

/// Run the convert command.
pub async fn run(config_path: &Path, options: ConvertOptions) -> Result<()> {
    tracing::info!("Converting {}...", options.input.display());

    let file_config = load_config(config_path)?;
    let (config, scripts) = resolve(&options, file_config);

    let result = ProjectBuilder::new(config)
        .build()
        .await
        .with_context(|| format!("Failed to convert {}", options.input.display()))?;

    if result.fallback {
        tracing::warn!(
            "{} embeds the original markup; review src/{}.jsx",
            result.component,
            result.component
        );
    }

    tracing::info!(
        "Generated {} ({} files, {} assets) in {}ms",
        result.component,
        result.artifacts.len(),
        result.assets_copied,
        result.duration_ms
    );
    tracing::info!("Output: {}", result.output_dir.display());

    // Package-manager failures never change the conversion result
    if scripts.install || scripts.start {
        if let Err(e) = scripts.package_manager.install(&result.output_dir).await {
            tracing::warn!("Dependency install failed: {}", e);
            return Ok(());
        }
    }

    if scripts.start {
        if let Err(e) = scripts.package_manager.start(&result.output_dir).await {
            tracing::warn!("Dev server failed: {}", e);
        }
    }

    Ok(())
}
