//! Music Renamer - identifies audio files by fingerprint and renames them
//! to `Artist_-_Title.ext`.

pub mod batch;
pub mod cli;
pub mod config;
pub mod error;
pub mod model;
pub mod organizer;
pub mod recognition;
pub mod scanner;
#[cfg(test)]
pub mod test_utils;

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Log filter used when `RUST_LOG` is unset. Events keep their module path
/// as target so this prefix covers every module.
pub(crate) const DEFAULT_LOG_FILTER: &str = "music_renamer=warn";

fn main() -> anyhow::Result<ExitCode> {
    let args = cli::Cli::parse();

    // Logs go to stderr so they never interleave with the status lines
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(filter)
        .init();

    cli::run_command(&args)
}
