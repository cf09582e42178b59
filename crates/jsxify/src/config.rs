//! Optional `jsxify.toml` configuration.

use std::fs;
use std::path::Path;

use anyhow::Result;
use jsxify_scaffold::PackageManager;
use serde::Deserialize;

/// Configuration file structure (jsxify.toml).
#[derive(Debug, Deserialize, Default, PartialEq)]
pub struct ConfigFile {
    #[serde(default)]
    pub project: ProjectConfig,
    #[serde(default)]
    pub styles: StylesConfig,
    #[serde(default)]
    pub scripts: ScriptsConfig,
}

#[derive(Debug, Deserialize, Default, PartialEq)]
pub struct ProjectConfig {
    /// `name` field of the generated package.json
    pub name: Option<String>,
}

#[derive(Debug, Deserialize, Default, PartialEq)]
pub struct StylesConfig {
    #[serde(default)]
    pub minify: bool,
}

#[derive(Debug, Deserialize, Default, PartialEq)]
pub struct ScriptsConfig {
    #[serde(default)]
    pub package_manager: PackageManager,
    #[serde(default)]
    pub install: bool,
    #[serde(default)]
    pub start: bool,
}

/// Load configuration from `path` if it exists.
/// Returns an error if the config file exists but is malformed.
pub fn load_config(path: &Path) -> Result<ConfigFile> {
    if path.exists() {
        let content = fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;
        let config: ConfigFile = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", path.display(), e))?;
        tracing::info!("Loaded config from {}", path.display());
        return Ok(config);
    }
    Ok(ConfigFile::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_means_defaults() {
        let temp = tempdir().unwrap();

        let config = load_config(&temp.path().join("jsxify.toml")).unwrap();

        assert_eq!(config, ConfigFile::default());
        assert_eq!(config.scripts.package_manager, PackageManager::Npm);
    }

    #[test]
    fn reads_all_sections() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("jsxify.toml");
        fs::write(
            &path,
            r#"
[project]
name = "acme-site"

[styles]
minify = true

[scripts]
package_manager = "pnpm"
install = true
"#,
        )
        .unwrap();

        let config = load_config(&path).unwrap();

        assert_eq!(config.project.name.as_deref(), Some("acme-site"));
        assert!(config.styles.minify);
        assert_eq!(config.scripts.package_manager, PackageManager::Pnpm);
        assert!(config.scripts.install);
        assert!(!config.scripts.start);
    }

    #[test]
    fn default_config_parses() {
        let config: ConfigFile = toml::from_str(crate::commands::init::DEFAULT_CONFIG).unwrap();

        assert_eq!(config, ConfigFile::default());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("jsxify.toml");
        fs::write(&path, "[scripts]\npackage_manager = \"bun\"\n").unwrap();

        assert!(load_config(&path).is_err());
    }
}
