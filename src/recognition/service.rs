//! Production recognizer: fingerprint locally, then look up remotely.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use super::acoustid::AcoustIdClient;
use super::domain::{Recognition, RecognitionError};
use super::fingerprint;
use super::traits::{FingerprintLookup, Recognizer};

/// Recognizes files by running `fpcalc` and querying a lookup service.
pub struct FingerprintRecognizer<L = AcoustIdClient> {
    fpcalc: PathBuf,
    lookup: L,
}

impl<L: FingerprintLookup> FingerprintRecognizer<L> {
    /// `fpcalc` should come from [`fingerprint::locate_fpcalc`].
    pub fn new(fpcalc: PathBuf, lookup: L) -> Self {
        Self { fpcalc, lookup }
    }
}

#[async_trait]
impl<L: FingerprintLookup> Recognizer for FingerprintRecognizer<L> {
    async fn recognize(&self, path: &Path) -> Result<Recognition, RecognitionError> {
        let fp = fingerprint::fingerprint_file(self.fpcalc.clone(), path.to_path_buf()).await?;
        debug!(
            path = %path.display(),
            duration = fp.duration_secs,
            "Fingerprint generated"
        );

        let recognition = self.lookup.lookup(&fp).await?;
        debug!(
            path = %path.display(),
            matched = recognition.is_match(),
            "Lookup finished"
        );
        Ok(recognition)
    }
}
