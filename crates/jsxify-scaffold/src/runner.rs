//! Package-manager invocation for generated projects.

use std::fmt;
use std::path::Path;
use std::process::Stdio;
use std::str::FromStr;

use serde::Deserialize;
use tokio::process::Command;

/// Supported JavaScript package managers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    #[default]
    Npm,
    Pnpm,
    Yarn,
}

impl PackageManager {
    /// Executable name, with the `.cmd` shim on Windows.
    pub fn program(&self) -> String {
        let base = match self {
            Self::Npm => "npm",
            Self::Pnpm => "pnpm",
            Self::Yarn => "yarn",
        };

        if cfg!(windows) {
            format!("{}.cmd", base)
        } else {
            base.to_string()
        }
    }

    /// Arguments that start the dev server.
    pub fn dev_args(&self) -> &'static [&'static str] {
        match self {
            Self::Npm => &["run", "dev"],
            Self::Pnpm | Self::Yarn => &["dev"],
        }
    }

    /// Install the project's dependencies.
    pub async fn install(&self, dir: &Path) -> Result<(), RunError> {
        self.run(dir, &["install"]).await
    }

    /// Start the project's dev server and wait for it to exit.
    pub async fn start(&self, dir: &Path) -> Result<(), RunError> {
        self.run(dir, self.dev_args()).await
    }

    async fn run(&self, dir: &Path, args: &[&str]) -> Result<(), RunError> {
        let program = self.program();
        let command = format!("{} {}", program, args.join(" "));
        tracing::info!("Running `{}` in {}", command, dir.display());

        let status = Command::new(&program)
            .args(args)
            .current_dir(dir)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|e| RunError::Spawn {
                program: program.clone(),
                message: e.to_string(),
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(RunError::Failed {
                command,
                status: status.to_string(),
            })
        }
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Npm => "npm",
            Self::Pnpm => "pnpm",
            Self::Yarn => "yarn",
        };
        f.write_str(name)
    }
}

impl FromStr for PackageManager {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "npm" => Ok(Self::Npm),
            "pnpm" => Ok(Self::Pnpm),
            "yarn" => Ok(Self::Yarn),
            other => Err(format!(
                "unknown package manager '{}' (expected npm, pnpm or yarn)",
                other
            )),
        }
    }
}

/// Errors from running the package manager.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("Failed to start {program}: {message}")]
    Spawn { program: String, message: String },

    #[error("`{command}` failed: {status}")]
    Failed { command: String, status: String },
}
