// Selects the prebuilt desktop binary for the target being compiled and hands its
// location and digest to the crate as compile-time env vars. Exactly one file is
// chosen per build; a missing or empty binary fails the build.
use sha2::{Digest, Sha256};
use std::path::PathBuf;

#[path = "src/select.rs"]
mod select;

const OVERRIDE_ENV: &str = "WARPNET_DESKTOP_BIN";

fn main() {
    if let Err(e) = embed_desktop_binary() {
        panic!("cannot embed warpnet-desktop: {e}");
    }
}

fn embed_desktop_binary() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-env-changed={OVERRIDE_ENV}");

    let manifest_dir = PathBuf::from(std::env::var("CARGO_MANIFEST_DIR")?);
    let workspace_root = manifest_dir.join("../..");
    println!("cargo:rerun-if-changed={}", workspace_root.join("bin").display());

    let os = select::product_os_name(&std::env::var("CARGO_CFG_TARGET_OS")?);
    let arch = std::env::var("CARGO_CFG_TARGET_ARCH")?;
    let override_path = std::env::var_os(OVERRIDE_ENV).map(PathBuf::from);

    let selected = select::select(&workspace_root, override_path, &os, &arch)?;
    println!("cargo:rerun-if-changed={}", selected.path.display());

    let digest = hex::encode(Sha256::digest(&selected.bytes));
    println!("cargo:rustc-env=WARPNET_DESKTOP_BINARY={}", selected.path.display());
    println!("cargo:rustc-env=WARPNET_DESKTOP_SHA256={digest}");
    println!("cargo:rustc-env=WARPNET_DESKTOP_TARGET={}", selected.label);
    Ok(())
}
