//! Renaming recognized files in place.
//!
//! A recognized track becomes `"{artist} - {title}.{ext}"`, reduced to a
//! safe character set by [`sanitize_filename`], and the file is renamed
//! inside its own directory.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Result, ResultExt};
use crate::model::Extension;
use crate::recognition::RecognizedTrack;

pub const UNKNOWN_TITLE: &str = "Unknown Title";
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";

/// What happened to one discovered file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// Renamed to `to`
    Renamed { to: PathBuf },
    /// Dry run: would have been renamed to `to`
    WouldRename { to: PathBuf },
    /// Already carries the target name
    Unchanged,
    /// The service could not identify the audio
    NoMatch,
    /// Source vanished before the rename
    SourceMissing,
    /// Another file already holds the target name
    TargetExists { to: PathBuf },
    /// Recognition or rename failed
    Failed(String),
}

/// Keeps alphanumerics, spaces, hyphens, underscores and dots, then turns
/// every run of spaces into a single underscore. Idempotent.
pub fn sanitize_filename(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut after_space = false;

    for c in name
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '-' | '_' | '.'))
    {
        if c == ' ' {
            if !after_space {
                out.push('_');
            }
            after_space = true;
        } else {
            out.push(c);
            after_space = false;
        }
    }

    out
}

/// Sanitized `"{artist} - {title}.{ext}"` for a recognized track.
pub fn target_file_name(track: &RecognizedTrack, extension: Extension) -> String {
    let title = track.title.as_deref().unwrap_or(UNKNOWN_TITLE);
    let artist = track.artist.as_deref().unwrap_or(UNKNOWN_ARTIST);
    sanitize_filename(&format!("{artist} - {title}.{extension}"))
}

/// Renames `source` to `file_name` within the same directory.
///
/// Missing sources and occupied targets are skipped, not errors. Only a
/// failing rename call itself returns `Err`.
pub fn rename_in_place(source: &Path, file_name: &str, dry_run: bool) -> Result<FileOutcome> {
    let target = match source.parent() {
        Some(dir) => dir.join(file_name),
        None => PathBuf::from(file_name),
    };

    if !source.exists() {
        debug!(source = %source.display(), "Source gone, skipping");
        return Ok(FileOutcome::SourceMissing);
    }

    if target == source {
        return Ok(FileOutcome::Unchanged);
    }

    if target.exists() && !is_case_variant(source, &target) {
        debug!(path = %target.display(), "Target exists, skipping");
        return Ok(FileOutcome::TargetExists { to: target });
    }

    if dry_run {
        return Ok(FileOutcome::WouldRename { to: target });
    }

    fs::rename(source, &target).with_context(format!(
        "Failed to rename {} to {}",
        source.display(),
        target.display()
    ))?;

    Ok(FileOutcome::Renamed { to: target })
}

/// True when `target` only differs from `source` in letter case and resolves
/// to the same file, as on case-insensitive filesystems.
fn is_case_variant(source: &Path, target: &Path) -> bool {
    let (Some(a), Some(b)) = (source.file_name(), target.file_name()) else {
        return false;
    };
    if a == b || a.to_string_lossy().to_lowercase() != b.to_string_lossy().to_lowercase() {
        return false;
    }
    same_file(source, target)
}

#[cfg(unix)]
fn same_file(a: &Path, b: &Path) -> bool {
    use std::os::unix::fs::MetadataExt;

    match (fs::metadata(a), fs::metadata(b)) {
        (Ok(a), Ok(b)) => a.dev() == b.dev() && a.ino() == b.ino(),
        _ => false,
    }
}

// Windows volumes are case-insensitive, so a case variant that exists is the
// source itself.
#[cfg(not(unix))]
fn same_file(_a: &Path, b: &Path) -> bool {
    b.exists()
}

/// Renames a file according to its recognized track.
pub fn rename_recognized(
    source: &Path,
    track: &RecognizedTrack,
    extension: Extension,
    dry_run: bool,
) -> FileOutcome {
    let file_name = target_file_name(track, extension);
    rename_in_place(source, &file_name, dry_run).unwrap_or_else(|e| FileOutcome::Failed(e.to_string()))
}
