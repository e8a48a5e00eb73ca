//! Internal domain models for track recognition.
//!
//! These types are OUR types - they don't change when the lookup service
//! changes. Service responses get converted into these via adapters.

/// Outcome of asking the recognition service about one file.
///
/// `track` is `None` when the service could not identify the audio.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Recognition {
    pub track: Option<RecognizedTrack>,
}

impl Recognition {
    /// The service found nothing.
    pub fn no_match() -> Self {
        Self { track: None }
    }

    /// The service identified the track.
    pub fn matched(track: RecognizedTrack) -> Self {
        Self { track: Some(track) }
    }

    pub fn is_match(&self) -> bool {
        self.track.is_some()
    }
}

/// Track record returned for a match. Either field may be missing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecognizedTrack {
    /// Song title
    pub title: Option<String>,
    /// Performing artist credit (the record's "subtitle")
    pub artist: Option<String>,
}

impl RecognizedTrack {
    #[cfg(test)]
    pub fn new(title: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            artist: Some(artist.into()),
        }
    }
}

/// Audio fingerprint for a file
#[derive(Debug, Clone)]
pub struct AudioFingerprint {
    /// The fingerprint string (Chromaprint format)
    pub fingerprint: String,
    /// Duration of the audio in seconds (required by AcoustID)
    pub duration_secs: u32,
}

/// Errors that can occur while recognizing a file
#[derive(Debug, Clone, thiserror::Error)]
pub enum RecognitionError {
    #[error("Failed to generate fingerprint: {0}")]
    Fingerprint(String),

    #[error("API request failed: {0}")]
    Api(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Rate limited - retries exhausted")]
    RateLimited,

    #[error("Failed to parse response: {0}")]
    Parse(String),
}
