//! Shared utilities for CLI commands

use anyhow::{Context, Result};
use mp_core::Config;
use mp_jinja::Previewer;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::cli::GlobalArgs;

/// Error type representing a non-zero process exit code.
///
/// Use `return Err(ExitCode(N).into())` instead of `std::process::exit(N)`
/// so that RAII destructors run and cleanup happens properly.
#[derive(Debug)]
pub(crate) struct ExitCode(pub(crate) i32);

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Intentionally empty: ExitCode is a control-flow mechanism, not a
        // user-facing error.
        write!(f, "")
    }
}

impl std::error::Error for ExitCode {}

/// Load the project configuration.
///
/// An explicit `--config` must exist; otherwise `mailpeek.yml` in the
/// project directory is used when present, and built-in defaults when not.
pub(crate) fn load_config(global: &GlobalArgs) -> Result<(Config, PathBuf)> {
    let root = project_root(global)?;
    let config = match &global.config {
        Some(path) => Config::load(Path::new(path))
            .with_context(|| format!("Failed to load config from {}", path))?,
        None => Config::load_or_default(&root).context("Failed to load project config")?,
    };
    Ok((config, root))
}

/// Build a previewer for the project selected by the global arguments
pub(crate) fn load_previewer(global: &GlobalArgs) -> Result<Previewer> {
    let (config, root) = load_config(global)?;
    Ok(Previewer::new(config, root))
}

fn project_root(global: &GlobalArgs) -> Result<PathBuf> {
    let path = Path::new(&global.project_dir);
    let root = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .context("Failed to read current directory")?
            .join(path)
    };
    if !root.is_dir() {
        anyhow::bail!("Project directory not found: {}", root.display());
    }
    Ok(root)
}
