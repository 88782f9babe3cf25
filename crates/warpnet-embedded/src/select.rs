// Shared with build.rs through `#[path]`, so std only.
use std::fs;
use std::path::{Path, PathBuf};

const STEM: &str = "warpnet-desktop";

pub struct Selected {
    pub path: PathBuf,
    pub label: String,
    pub bytes: Vec<u8>,
}

// Release pipelines name binaries after Go's GOOS values.
pub fn product_os_name(target_os: &str) -> String {
    match target_os {
        "macos" => "darwin".to_string(),
        other => other.to_string(),
    }
}

pub fn candidate_paths(
    workspace_root: &Path,
    override_path: Option<PathBuf>,
    os: &str,
    arch: &str,
) -> Vec<(PathBuf, String)> {
    if let Some(p) = override_path {
        let p = if p.is_absolute() { p } else { workspace_root.join(p) };
        // An explicit override is the only candidate: never fall through to bin/.
        return vec![(p, format!("{os}-{arch}"))];
    }
    let bin_dir = workspace_root.join("bin");
    vec![
        (bin_dir.join(format!("{STEM}-{os}-{arch}")), format!("{os}-{arch}")),
        (bin_dir.join(format!("{STEM}-{os}")), os.to_string()),
    ]
}

pub fn select(
    workspace_root: &Path,
    override_path: Option<PathBuf>,
    os: &str,
    arch: &str,
) -> Result<Selected, String> {
    let candidates = candidate_paths(workspace_root, override_path, os, arch);
    let Some((source, label)) = candidates.iter().find(|(p, _)| p.is_file()) else {
        let tried = candidates
            .iter()
            .map(|(p, _)| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        return Err(format!("no platform binary for {os}-{arch} (tried: {tried})"));
    };

    let bytes = fs::read(source).map_err(|e| format!("read {}: {e}", source.display()))?;
    if bytes.is_empty() {
        return Err(format!("{} is empty", source.display()));
    }
    let path = source
        .canonicalize()
        .map_err(|e| format!("canonicalize {}: {e}", source.display()))?;
    Ok(Selected { path, label: label.clone(), bytes })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn workspace() -> tempfile::TempDir {
        let root = tempfile::tempdir().expect("tempdir");
        fs::create_dir(root.path().join("bin")).expect("mkdir bin");
        root
    }

    #[test]
    fn missing_binary_lists_every_path_tried() {
        let root = workspace();
        let err = select(root.path(), None, "linux", "x86_64").err().expect("must fail");
        assert!(err.contains("no platform binary for linux-x86_64"), "{err}");
        assert!(err.contains("warpnet-desktop-linux-x86_64"), "{err}");
        assert!(err.contains(&root.path().join("bin").join("warpnet-desktop-linux").display().to_string()), "{err}");
    }

    #[test]
    fn empty_binary_is_rejected() {
        let root = workspace();
        fs::write(root.path().join("bin/warpnet-desktop-linux"), b"").expect("write");
        let err = select(root.path(), None, "linux", "x86_64").err().expect("must fail");
        assert!(err.ends_with("is empty"), "{err}");
    }

    #[test]
    fn os_only_binary_is_selected() {
        let root = workspace();
        fs::write(root.path().join("bin/warpnet-desktop-linux"), b"linux").expect("write");
        let got = select(root.path(), None, "linux", "x86_64").expect("select");
        assert_eq!(got.label, "linux");
        assert_eq!(got.bytes, b"linux");
    }

    #[test]
    fn arch_binary_wins_over_os_binary() {
        let root = workspace();
        fs::write(root.path().join("bin/warpnet-desktop-linux"), b"generic").expect("write");
        fs::write(root.path().join("bin/warpnet-desktop-linux-aarch64"), b"arm").expect("write");
        let got = select(root.path(), None, "linux", "aarch64").expect("select");
        assert_eq!(got.label, "linux-aarch64");
        assert_eq!(got.bytes, b"arm");
    }

    #[test]
    fn missing_override_does_not_fall_back_to_bin() {
        let root = workspace();
        fs::write(root.path().join("bin/warpnet-desktop-linux"), b"linux").expect("write");
        let missing = root.path().join("nowhere/desktop");
        let err = select(root.path(), Some(missing.clone()), "linux", "x86_64")
            .err()
            .expect("must fail");
        assert!(err.contains(&missing.display().to_string()), "{err}");
        assert!(!err.contains("warpnet-desktop-linux"), "{err}");
    }

    #[test]
    fn relative_override_resolves_against_workspace_root() {
        let root = workspace();
        fs::write(root.path().join("custom-desktop"), b"custom").expect("write");
        let got = select(root.path(), Some(PathBuf::from("custom-desktop")), "linux", "x86_64")
            .expect("select");
        assert_eq!(got.bytes, b"custom");
        assert_eq!(got.label, "linux-x86_64");
    }

    #[test]
    fn selected_path_is_canonical() {
        let root = workspace();
        fs::create_dir(root.path().join("crates")).expect("mkdir");
        fs::write(root.path().join("bin/warpnet-desktop-linux"), b"linux").expect("write");
        let indirect = root.path().join("crates").join("..");
        let got = select(&indirect, None, "linux", "x86_64").expect("select");
        assert!(got.path.is_absolute());
        assert!(!got.path.components().any(|c| c == std::path::Component::ParentDir));
        assert_eq!(
            got.path,
            root.path().join("bin/warpnet-desktop-linux").canonicalize().expect("canonicalize")
        );
    }

    #[test]
    fn macos_maps_to_darwin() {
        assert_eq!(product_os_name("macos"), "darwin");
        assert_eq!(product_os_name("linux"), "linux");
        assert_eq!(product_os_name("windows"), "windows");
    }
}
