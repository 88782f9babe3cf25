use std::path::Path;

// Set by build.rs; compilation stops there if no platform binary exists.
static DESKTOP_BINARY: &[u8] = include_bytes!(env!("WARPNET_DESKTOP_BINARY"));

pub fn desktop_embedded() -> &'static [u8] {
    DESKTOP_BINARY
}

pub fn desktop_sha256() -> &'static str {
    env!("WARPNET_DESKTOP_SHA256")
}

pub fn desktop_source() -> &'static Path {
    Path::new(env!("WARPNET_DESKTOP_BINARY"))
}

// `<os>` or `<os>-<arch>`, whichever binary the build selected.
pub fn desktop_target() -> &'static str {
    env!("WARPNET_DESKTOP_TARGET")
}
