//! Concurrent batch recognition followed by in-place renames.
//!
//! Every discovered file gets one recognition call; all calls are in flight
//! together and joined before any rename happens. A failed call only
//! affects its own file.

use futures::future::join_all;
use tracing::{info, warn};

use crate::model::MusicFile;
use crate::organizer::{self, FileOutcome};
use crate::recognition::{Recognition, RecognitionError, Recognizer};

/// Options for the rename phase.
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchOptions {
    /// Report targets without touching the filesystem
    pub dry_run: bool,
}

/// Progress notifications emitted while a batch runs.
#[derive(Debug)]
pub enum BatchEvent<'a> {
    /// Recognition is about to start for `count` files
    Recognizing { count: usize },
    /// A file has been handled
    Finished {
        file: &'a MusicFile,
        outcome: &'a FileOutcome,
    },
}

/// Per-file outcomes in enumeration order.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub entries: Vec<(MusicFile, FileOutcome)>,
}

impl BatchReport {
    fn count(&self, pred: impl Fn(&FileOutcome) -> bool) -> usize {
        self.entries.iter().filter(|(_, o)| pred(o)).count()
    }

    pub fn renamed(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Renamed { .. } | FileOutcome::WouldRename { .. }))
    }

    pub fn unmatched(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::NoMatch))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Failed(_)))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| {
            matches!(
                o,
                FileOutcome::Unchanged | FileOutcome::SourceMissing | FileOutcome::TargetExists { .. }
            )
        })
    }
}

/// Recognizes every file concurrently and waits for all of them.
///
/// Results line up with `files` by index.
pub async fn recognize_all<R>(
    recognizer: &R,
    files: &[MusicFile],
) -> Vec<Result<Recognition, RecognitionError>>
where
    R: Recognizer + ?Sized,
{
    join_all(files.iter().map(|file| recognizer.recognize(&file.path))).await
}

/// Runs the whole batch: recognition barrier, then renames in order.
pub async fn process_files<R>(
    recognizer: &R,
    files: Vec<MusicFile>,
    options: BatchOptions,
    mut on_event: impl FnMut(BatchEvent<'_>),
) -> BatchReport
where
    R: Recognizer + ?Sized,
{
    on_event(BatchEvent::Recognizing { count: files.len() });
    let results = recognize_all(recognizer, &files).await;

    let mut report = BatchReport::default();
    for (file, result) in files.into_iter().zip(results) {
        let outcome = match result {
            Ok(Recognition { track: Some(track) }) => {
                organizer::rename_recognized(&file.path, &track, file.extension, options.dry_run)
            }
            Ok(Recognition { track: None }) => FileOutcome::NoMatch,
            Err(e) => {
                warn!(file = %file.display_name(), error = %e, "Recognition failed");
                FileOutcome::Failed(e.to_string())
            }
        };

        on_event(BatchEvent::Finished {
            file: &file,
            outcome: &outcome,
        });
        report.entries.push((file, outcome));
    }

    info!(
        renamed = report.renamed(),
        unmatched = report.unmatched(),
        failed = report.failed(),
        skipped = report.skipped(),
        "Batch complete"
    );
    report
}
