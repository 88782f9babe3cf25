use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::info;
use warpnet_embedded::{Platform, PRODUCT};

mod stage;

use stage::Payload;

#[derive(Debug, Parser)]
#[command(
    name = "warpnet-launcher",
    about = "Stages the embedded Warpnet desktop binary in the working directory and runs it."
)]
struct Cli {
    #[command(subcommand)]
    cmd: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Describe the embedded binary and where it would be staged.
    Info {
        #[arg(long)]
        json: bool,
    },
    /// Write the embedded binary to the staging dir without running it.
    Extract {
        #[arg(long)]
        force: bool,
        #[arg(long)]
        name: Option<String>,
    },
    /// Stage the binary (if needed) and run it, forwarding everything after `--`.
    Run {
        #[arg(long)]
        force: bool,
        #[arg(last = true)]
        args: Vec<OsString>,
    },
}

#[derive(Debug, Serialize)]
struct Info {
    target: &'static str,
    os: &'static str,
    arch: &'static str,
    size: usize,
    sha256: &'static str,
    source: PathBuf,
    staging_dir: PathBuf,
    staged_name: String,
}

impl Info {
    fn collect(staging_dir: &Path) -> Self {
        let platform = Platform::current();
        Self {
            target: warpnet_embedded::desktop_target(),
            os: platform.os,
            arch: platform.arch,
            size: warpnet_embedded::desktop_embedded().len(),
            sha256: warpnet_embedded::desktop_sha256(),
            source: warpnet_embedded::desktop_source().to_path_buf(),
            staging_dir: staging_dir.to_path_buf(),
            staged_name: default_name(),
        }
    }
}

fn default_name() -> String {
    Platform::current().executable_name(PRODUCT)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    // Nothing below runs without a known staging dir.
    let staging_dir = warpnet_embedded::init().context("resolve staging dir")?;

    match cli.cmd.unwrap_or(Command::Run { force: false, args: vec![] }) {
        Command::Info { json } => {
            let info = Info::collect(staging_dir);
            if json {
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("target:      {}", info.target);
                println!("platform:    {}-{}", info.os, info.arch);
                println!("size:        {} bytes", info.size);
                println!("sha256:      {}", info.sha256);
                println!("source:      {}", info.source.display());
                println!("staging dir: {}", info.staging_dir.display());
                println!("staged name: {}", info.staged_name);
            }
        }
        Command::Extract { force, name } => {
            let name = name.unwrap_or_else(default_name);
            let path = stage::stage(staging_dir, &name, Payload::embedded(), force)?;
            println!("{}", path.display());
        }
        Command::Run { force, args } => {
            let path = stage::stage(staging_dir, &default_name(), Payload::embedded(), force)?;
            info!("Launching {}", path.display());
            let status = stage::launch(&path, staging_dir, &args)?;
            if !status.success() {
                bail!("{PRODUCT} exited with {status}");
            }
        }
    }

    Ok(())
}
