//! Command-line interface for music-renamer.

mod output;
mod rename;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use tokio::runtime::Runtime;

use crate::config::{self, Config};
use crate::error::Error;
use crate::model::Extension;

/// Rename music files using audio fingerprint recognition.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the directory containing music files
    #[arg(default_value = ".")]
    pub directory: PathBuf,

    /// File extension to search for
    #[arg(short, long, value_enum, default_value_t = Extension::Mp3)]
    pub extension: Extension,

    /// AcoustID API key (or set ACOUSTID_API_KEY env var)
    #[arg(long, env = "ACOUSTID_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Show what would be renamed without renaming anything
    #[arg(long)]
    pub dry_run: bool,

    /// Use this config file instead of the default location
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Run the CLI. The directory is validated before anything else happens.
pub fn run_command(cli: &Cli) -> anyhow::Result<ExitCode> {
    let directory = match resolve_directory(&cli.directory) {
        Ok(dir) => dir,
        Err(e) => {
            output::error(&e).print();
            return Ok(ExitCode::FAILURE);
        }
    };

    let config = config::load(cli.config.as_deref())?;

    let rt = Runtime::new()?;
    rt.block_on(rename::cmd_rename(cli, &config, directory))
}

// ============================================================================
// Shared helper functions
// ============================================================================

/// Absolute path of an existing directory.
pub(crate) fn resolve_directory(directory: &Path) -> Result<PathBuf, Error> {
    std::fs::canonicalize(directory)
        .ok()
        .filter(|p| p.is_dir())
        .ok_or_else(|| Error::DirectoryNotFound(directory.to_path_buf()))
}

/// API key from the command line/env, falling back to the config file.
/// A blank value counts as unset at either level.
pub(crate) fn resolve_api_key(cli_key: Option<&str>, config: &Config) -> Option<String> {
    fn non_blank(key: &str) -> Option<&str> {
        Some(key.trim()).filter(|k| !k.is_empty())
    }

    cli_key
        .and_then(non_blank)
        .or_else(|| config.credentials.acoustid_api_key.as_deref().and_then(non_blank))
        .map(String::from)
}

/// Print installation instructions for fpcalc
pub(crate) fn print_fpcalc_install_instructions() {
    eprintln!("Error: fpcalc not found.");
    eprintln!("Install Chromaprint:");
    eprintln!("  Windows: winget install AcoustID.Chromaprint");
    eprintln!("  macOS:   brew install chromaprint");
    eprintln!("  Linux:   apt install libchromaprint-tools");
    eprintln!("Or set recognition.fpcalc_path in the config file.");
}

/// Print how to obtain and pass an AcoustID key
pub(crate) fn print_api_key_instructions() {
    eprintln!("Error: AcoustID API key required.");
    eprintln!("Get one at: https://acoustid.org/new-application");
    eprintln!("Then use: --api-key YOUR_KEY, set ACOUSTID_API_KEY, or add it to the config file");
}
