//! Core data models shared by the scanner, recognizer and renamer.
//!
//! Everything here is ephemeral: discovered per run and dropped once the
//! file has been renamed or skipped.

use std::fmt;
use std::path::{Path, PathBuf};

/// Audio container formats the tool knows how to look for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, clap::ValueEnum)]
pub enum Extension {
    #[default]
    Mp3,
    Flac,
    Ogg,
    Wav,
}

impl Extension {
    /// Lowercase suffix without the leading dot.
    pub fn as_str(self) -> &'static str {
        match self {
            Extension::Mp3 => "mp3",
            Extension::Flac => "flac",
            Extension::Ogg => "ogg",
            Extension::Wav => "wav",
        }
    }

    /// Case-insensitive check against a path's extension.
    pub fn matches(self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case(self.as_str()))
    }
}

impl fmt::Display for Extension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An audio file discovered during a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MusicFile {
    /// Location on disk at discovery time
    pub path: PathBuf,
    /// Extension the file was matched by
    pub extension: Extension,
}

impl MusicFile {
    pub fn new(path: impl Into<PathBuf>, extension: Extension) -> Self {
        Self {
            path: path.into(),
            extension,
        }
    }

    /// File name for display, falling back to the full path.
    pub fn display_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_matches_case_insensitive() {
        assert!(Extension::Mp3.matches(Path::new("/music/song.mp3")));
        assert!(Extension::Mp3.matches(Path::new("/music/SONG.MP3")));
        assert!(!Extension::Mp3.matches(Path::new("/music/song.flac")));
        assert!(!Extension::Flac.matches(Path::new("/music/flac")));
    }

    #[test]
    fn test_extension_display() {
        assert_eq!(Extension::Ogg.to_string(), "ogg");
        assert_eq!(Extension::default(), Extension::Mp3);
    }

    #[test]
    fn test_display_name() {
        let file = MusicFile::new("/music/sub/track.wav", Extension::Wav);
        assert_eq!(file.display_name(), "track.wav");
    }
}
