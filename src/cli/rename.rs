//! The scan, recognize and rename command.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use tracing::info;

use super::{
    Cli, output, print_api_key_instructions, print_fpcalc_install_instructions, resolve_api_key,
};
use crate::batch::{self, BatchOptions};
use crate::config::Config;
use crate::recognition::{AcoustIdClient, FingerprintRecognizer, fingerprint};
use crate::scanner;

/// Scan `directory`, recognize every match concurrently, then rename.
///
/// Nothing touches the network until at least one file was found.
pub async fn cmd_rename(cli: &Cli, config: &Config, directory: PathBuf) -> anyhow::Result<ExitCode> {
    let files = scanner::find_music_files(directory.clone(), cli.extension).await?;

    if files.is_empty() {
        output::no_files(cli.extension, &directory).print();
        return Ok(ExitCode::SUCCESS);
    }
    info!(count = files.len(), directory = %directory.display(), "Found music files");

    let Some(api_key) = resolve_api_key(cli.api_key.as_deref(), config) else {
        print_api_key_instructions();
        return Ok(ExitCode::FAILURE);
    };

    let Some(fpcalc) = fingerprint::locate_fpcalc(config.recognition.fpcalc_path.as_deref()) else {
        print_fpcalc_install_instructions();
        return Ok(ExitCode::FAILURE);
    };

    let client = AcoustIdClient::new(
        api_key,
        config.retry.to_policy(),
        Duration::from_secs(config.recognition.request_timeout_secs),
    )?;
    let recognizer = FingerprintRecognizer::new(fpcalc, client);

    if cli.dry_run {
        println!("DRY RUN - no files will be renamed\n");
    }

    let options = BatchOptions {
        dry_run: cli.dry_run,
    };
    let report = batch::process_files(&recognizer, files, options, |event| {
        if let Some(line) = output::event_line(&event) {
            line.print();
        }
    })
    .await;

    output::summary(&report, cli.dry_run).print();
    Ok(ExitCode::SUCCESS)
}
