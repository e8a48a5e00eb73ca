//! Directory scanning for audio files.

use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::model::{Extension, MusicFile};

/// Walks `root` recursively and returns every regular file whose extension
/// matches `extension` (case-insensitive).
///
/// Unreadable entries are skipped. Results are sorted by path so the rename
/// phase reports files in a stable order.
///
/// Caution: blocking. Use [`find_music_files`] from async code.
pub fn find_music_files_sync(root: &Path, extension: Extension) -> Vec<MusicFile> {
    let mut files: Vec<MusicFile> = WalkDir::new(root)
        .into_iter()
        .filter_map(|e| match e {
            Ok(entry) => Some(entry),
            Err(err) => {
                debug!(error = %err, "Skipping unreadable entry");
                None
            }
        })
        .filter(|e| e.file_type().is_file())
        .filter(|e| extension.matches(e.path()))
        .map(|e| MusicFile::new(e.into_path(), extension))
        .collect();

    files.sort_by(|a, b| a.path.cmp(&b.path));
    files
}

/// Scans `root` on the blocking pool so in-flight async work is not stalled.
pub async fn find_music_files(root: PathBuf, extension: Extension) -> Result<Vec<MusicFile>> {
    let files = tokio::task::spawn_blocking(move || find_music_files_sync(&root, extension))
        .await
        .map_err(|e| Error::TaskJoin(e.to_string()))?;

    debug!(count = files.len(), %extension, "Scan complete");
    Ok(files)
}
