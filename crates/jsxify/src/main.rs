//! jsxify CLI - convert static HTML pages into React projects.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use jsxify_scaffold::PackageManager;
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "jsxify")]
#[command(about = "Convert static HTML pages into runnable React projects")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to jsxify.toml config file
    #[arg(short, long, default_value = "jsxify.toml", global = true)]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert an HTML document into a React project
    Convert {
        /// HTML document to convert
        input: PathBuf,

        /// Directory for the generated project
        output: PathBuf,

        /// Component name (defaults to the input file name)
        #[arg(short, long)]
        name: Option<String>,

        /// Install dependencies after generating the project
        #[arg(long)]
        install: bool,

        /// Start the dev server after generating the project
        #[arg(long)]
        start: bool,

        /// Package manager used for install and start
        #[arg(long)]
        package_manager: Option<PackageManager>,

        /// Minify the generated CSS module
        #[arg(long)]
        minify_css: bool,
    },

    /// Write a default jsxify.toml in the current directory
    Init {
        /// Overwrite an existing config file
        #[arg(short, long)]
        yes: bool,
    },

    /// Start the dev server of a generated project
    Dev {
        /// Generated project directory
        #[arg(default_value = ".")]
        dir: PathBuf,

        /// Package manager to run
        #[arg(long)]
        package_manager: Option<PackageManager>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt().with_env_filter(filter).with_target(false).init();

    // Execute command
    match cli.command {
        Commands::Convert {
            input,
            output,
            name,
            install,
            start,
            package_manager,
            minify_css,
        } => {
            let options = commands::convert::ConvertOptions {
                input,
                output,
                name,
                install,
                start,
                package_manager,
                minify_css,
            };
            commands::convert::run(&cli.config, options).await?;
        }
        Commands::Init { yes } => {
            commands::init::run(&cli.config, yes).await?;
        }
        Commands::Dev {
            dir,
            package_manager,
        } => {
            commands::dev::run(&cli.config, dir, package_manager).await?;
        }
    }

    Ok(())
}
