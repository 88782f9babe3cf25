use anyhow::{bail, Context, Result};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::{debug, error};

static STAGING_DIR: OnceLock<PathBuf> = OnceLock::new();

/// Resolves the staging directory (the process working directory) once.
///
/// This is the entry point binaries should call from `main`, exiting on error.
/// A failed resolution is never cached.
pub fn init() -> Result<&'static Path> {
    if let Some(dir) = STAGING_DIR.get() {
        return Ok(dir);
    }
    let dir = resolve_with(std::env::current_dir)?;
    // Another thread may have won the race; both resolved the same cwd.
    let dir = STAGING_DIR.get_or_init(|| dir);
    debug!("staging dir resolved to {}", dir.display());
    Ok(dir)
}

/// Resolves on first use if [`init`] was not called. If the working directory
/// cannot be determined the process exits with status 1.
pub fn staging_dir() -> &'static Path {
    match init() {
        Ok(dir) => dir,
        Err(e) => {
            error!("cannot resolve staging dir: {e:#}");
            eprintln!("fatal: cannot resolve staging dir: {e:#}");
            std::process::exit(1);
        }
    }
}

fn resolve_with(query: impl FnOnce() -> io::Result<PathBuf>) -> Result<PathBuf> {
    let dir = query().context("query current working directory")?;
    if !dir.is_absolute() {
        bail!("working directory {} is not absolute", dir.display());
    }
    Ok(dir)
}
