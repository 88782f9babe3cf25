mod payload;
mod platform;
#[cfg(test)]
mod select;
mod staging;

pub use payload::{desktop_embedded, desktop_sha256, desktop_source, desktop_target};
pub use platform::Platform;
pub use staging::{init, staging_dir};

pub const PRODUCT: &str = "warpnet-desktop";
