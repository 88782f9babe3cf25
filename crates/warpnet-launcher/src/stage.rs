use anyhow::{bail, Context, Result};
use sha2::{Digest, Sha256};
use std::ffi::OsString;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};
use tracing::{debug, info};

#[derive(Clone, Copy)]
pub struct Payload<'a> {
    pub bytes: &'a [u8],
    pub sha256: &'a str,
}

impl Payload<'static> {
    pub fn embedded() -> Self {
        Self {
            bytes: warpnet_embedded::desktop_embedded(),
            sha256: warpnet_embedded::desktop_sha256(),
        }
    }
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

pub fn verify(bytes: &[u8], want: &str) -> Result<()> {
    let got = sha256_hex(bytes);
    let want = want.trim().to_lowercase();
    if got != want {
        bail!("sha256 mismatch: got {got}, want {want}");
    }
    Ok(())
}

/// Writes `payload` to `dir/name` and marks it executable.
///
/// The bytes land in a temp file first and are renamed into place, so a
/// half-written binary is never visible under `name`. An existing file with the
/// right digest is kept unless `force` is set.
pub fn stage(dir: &Path, name: &str, payload: Payload<'_>, force: bool) -> Result<PathBuf> {
    validate_file_name(name)?;
    verify(payload.bytes, payload.sha256).context("embedded payload")?;

    let target = dir.join(name);
    if !force && is_current(&target, payload.sha256) {
        ensure_executable(&target)?;
        info!("reusing staged binary {}", target.display());
        return Ok(target);
    }

    // Dropped (and deleted) on any error before persist.
    let mut tmp = tempfile::Builder::new()
        .prefix(&format!(".tmp-{name}-"))
        .tempfile_in(dir)
        .with_context(|| format!("create temp file in {}", dir.display()))?;
    tmp.write_all(payload.bytes)
        .and_then(|()| tmp.as_file().sync_all())
        .with_context(|| format!("write {}", tmp.path().display()))?;
    set_executable(tmp.path())?;
    tmp.persist(&target)
        .map_err(|e| e.error)
        .with_context(|| format!("move {} into place", target.display()))?;

    let staged = fs::read(&target).with_context(|| format!("read back {}", target.display()))?;
    verify(&staged, payload.sha256).with_context(|| format!("staged {}", target.display()))?;
    info!("staged {} ({} bytes)", target.display(), staged.len());
    Ok(target)
}

pub fn launch(binary: &Path, workdir: &Path, args: &[OsString]) -> Result<ExitStatus> {
    debug!("spawning {} with {} args", binary.display(), args.len());
    Command::new(binary)
        .args(args)
        .current_dir(workdir)
        .status()
        .with_context(|| format!("launch {}", binary.display()))
}

fn validate_file_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        bail!("staged file name is empty");
    }
    if Path::new(name).file_name().and_then(|n| n.to_str()) != Some(name) {
        bail!("staged file name {name:?} must not contain path separators");
    }
    Ok(())
}

fn is_current(path: &Path, sha256: &str) -> bool {
    let Ok(bytes) = fs::read(path) else {
        return false;
    };
    verify(&bytes, sha256).is_ok()
}

#[cfg(unix)]
fn set_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o755))
        .with_context(|| format!("chmod {}", path.display()))
}

#[cfg(not(unix))]
fn set_executable(_path: &Path) -> Result<()> {
    Ok(())
}

// A reused file may belong to someone else; only chmod when execute bits are missing.
#[cfg(unix)]
fn ensure_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    let mode = fs::metadata(path)
        .with_context(|| format!("stat {}", path.display()))?
        .permissions()
        .mode();
    if mode & 0o111 == 0o111 {
        return Ok(());
    }
    set_executable(path)
}

#[cfg(not(unix))]
fn ensure_executable(_path: &Path) -> Result<()> {
    Ok(())
}
