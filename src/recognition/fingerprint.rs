//! Audio fingerprint generation using Chromaprint/fpcalc
//!
//! Shells out to the `fpcalc` command-line tool (part of Chromaprint).
//!
//! Install fpcalc:
//! - Windows: `winget install AcoustID.Chromaprint`
//! - macOS: `brew install chromaprint`
//! - Linux: `apt install libchromaprint-tools` or equivalent

use std::path::{Path, PathBuf};
use std::process::Command;

use super::domain::{AudioFingerprint, RecognitionError};

/// Common installation paths for fpcalc on Windows
#[cfg(windows)]
const FPCALC_PATHS: &[&str] = &[
    "fpcalc", // In PATH
    r"C:\Program Files\Chromaprint\fpcalc.exe",
    r"C:\Program Files\MusicBrainz Picard\fpcalc.exe",
    r"C:\Program Files (x86)\Chromaprint\fpcalc.exe",
];

#[cfg(not(windows))]
const FPCALC_PATHS: &[&str] = &[
    "fpcalc", // In PATH
    "/usr/bin/fpcalc",
    "/usr/local/bin/fpcalc",
    "/opt/homebrew/bin/fpcalc",
];

fn runs(fpcalc: &Path) -> bool {
    Command::new(fpcalc)
        .arg("-version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// Find a working fpcalc executable.
///
/// A configured path is used as-is when it runs; otherwise the common
/// installation paths are probed.
pub fn locate_fpcalc(configured: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = configured {
        return runs(path).then(|| path.to_path_buf());
    }

    FPCALC_PATHS
        .iter()
        .map(|p| PathBuf::from(*p))
        .find(|path| runs(path))
}

/// Generate an audio fingerprint for the given file. Blocking.
pub fn generate_fingerprint(fpcalc: &Path, path: &Path) -> Result<AudioFingerprint, RecognitionError> {
    let output = Command::new(fpcalc)
        .arg("-json")
        .arg(path)
        .output()
        .map_err(|e| RecognitionError::Fingerprint(format!("Failed to run fpcalc: {}", e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(RecognitionError::Fingerprint(format!(
            "fpcalc failed: {}",
            stderr.trim()
        )));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    parse_fpcalc_json(&stdout)
}

/// Runs [`generate_fingerprint`] on the blocking pool.
pub async fn fingerprint_file(
    fpcalc: PathBuf,
    path: PathBuf,
) -> Result<AudioFingerprint, RecognitionError> {
    tokio::task::spawn_blocking(move || generate_fingerprint(&fpcalc, &path))
        .await
        .map_err(|e| RecognitionError::Fingerprint(format!("fingerprint task failed: {e}")))?
}

fn parse_fpcalc_json(json: &str) -> Result<AudioFingerprint, RecognitionError> {
    let parsed: FpcalcOutput = serde_json::from_str(json).map_err(|e| {
        RecognitionError::Fingerprint(format!("Failed to parse fpcalc output: {}", e))
    })?;

    if parsed.fingerprint.is_empty() {
        return Err(RecognitionError::Fingerprint("empty fingerprint".to_string()));
    }

    Ok(AudioFingerprint {
        fingerprint: parsed.fingerprint,
        duration_secs: parsed.duration.round() as u32,
    })
}

/// fpcalc JSON output structure
#[derive(serde::Deserialize)]
struct FpcalcOutput {
    fingerprint: String,
    duration: f64,
}
