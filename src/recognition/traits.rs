//! Trait definitions for the recognition seam.
//!
//! The batch dispatcher only sees [`Recognizer`], so tests can swap the
//! real fingerprint + network pipeline for a stub.

use std::path::Path;

use async_trait::async_trait;

use super::domain::{AudioFingerprint, Recognition, RecognitionError};

/// Identifies the song contained in an audio file.
#[async_trait]
pub trait Recognizer: Send + Sync {
    /// Recognize one file. `Ok` with no track means "no match".
    async fn recognize(&self, path: &Path) -> Result<Recognition, RecognitionError>;
}

/// Looks a fingerprint up on a remote service.
#[async_trait]
pub trait FingerprintLookup: Send + Sync {
    async fn lookup(
        &self,
        fingerprint: &AudioFingerprint,
    ) -> Result<Recognition, RecognitionError>;
}

#[async_trait]
impl FingerprintLookup for super::acoustid::AcoustIdClient {
    async fn lookup(
        &self,
        fingerprint: &AudioFingerprint,
    ) -> Result<Recognition, RecognitionError> {
        self.lookup(fingerprint).await
    }
}
