//! React project generation for converted HTML documents.
//!
//! Runs the conversion pipeline for one document and writes a Vite + React
//! project around the generated component.

pub mod assets;
pub mod builder;
pub mod runner;
pub mod templates;

pub use builder::{BuildConfig, BuildError, BuildResult, ProjectBuilder};
pub use runner::{PackageManager, RunError};
