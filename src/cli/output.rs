//! Colored status lines for the console.
//!
//! Human-readable only; there is no machine-readable output format.

use std::path::Path;

use colored::{Color, Colorize};

use crate::batch::{BatchEvent, BatchReport};
use crate::model::Extension;
use crate::organizer::FileOutcome;

/// One line of console output and its color.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusLine {
    pub text: String,
    pub color: Color,
}

impl StatusLine {
    fn new(text: String, color: Color) -> Self {
        Self { text, color }
    }

    pub fn print(&self) {
        println!("{}", self.text.as_str().color(self.color));
    }
}

pub fn no_files(extension: Extension, directory: &Path) -> StatusLine {
    StatusLine::new(
        format!(
            "[X] No music files with the extension {} found in {}.",
            extension,
            directory.display()
        ),
        Color::Red,
    )
}

pub fn error(message: impl std::fmt::Display) -> StatusLine {
    StatusLine::new(format!("[X] {message}"), Color::Red)
}

/// Line for a batch event. Silent skips produce nothing.
pub fn event_line(event: &BatchEvent<'_>) -> Option<StatusLine> {
    match event {
        BatchEvent::Recognizing { count } => Some(StatusLine::new(
            format!("[*] Recognizing {count} file(s)..."),
            Color::Cyan,
        )),
        BatchEvent::Finished { file, outcome } => {
            let source = file.path.display();
            match outcome {
                FileOutcome::NoMatch => Some(StatusLine::new(
                    format!("[X] No song information found for: {source}. Keeping the original name."),
                    Color::Yellow,
                )),
                FileOutcome::Renamed { to } => Some(StatusLine::new(
                    format!("[X] Renaming {source} to: {}", file_name(to)),
                    Color::Magenta,
                )),
                FileOutcome::WouldRename { to } => Some(StatusLine::new(
                    format!("[dry run] Would rename {source} to: {}", file_name(to)),
                    Color::Magenta,
                )),
                FileOutcome::Failed(message) => Some(StatusLine::new(
                    format!("[X] Could not process {source}: {message}. Keeping the original name."),
                    Color::Red,
                )),
                FileOutcome::Unchanged
                | FileOutcome::SourceMissing
                | FileOutcome::TargetExists { .. } => None,
            }
        }
    }
}

pub fn summary(report: &BatchReport, dry_run: bool) -> StatusLine {
    let verb = if dry_run { "would be renamed" } else { "renamed" };
    StatusLine::new(
        format!(
            "Done! {} {}, {} no match, {} errors, {} skipped",
            report.renamed(),
            verb,
            report.unmatched(),
            report.failed(),
            report.skipped()
        ),
        Color::Green,
    )
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
