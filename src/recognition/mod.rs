//! Song recognition - identifies audio files via an external service.
//!
//! - **Domain models** (`domain.rs`) - what the rest of the crate sees
//! - **AcoustID** (`acoustid/`) - DTOs, adapter and HTTP client
//! - **Fingerprint** - Chromaprint fingerprints via `fpcalc`
//! - **Retry** - exponential backoff for the HTTP transport
//! - **Service** - [`FingerprintRecognizer`], the production [`Recognizer`]
//!
//! # Usage
//!
//! ```ignore
//! let client = AcoustIdClient::new(api_key, RetryPolicy::default(), timeout)?;
//! let recognizer = FingerprintRecognizer::new(fpcalc, client);
//! let recognition = recognizer.recognize(Path::new("song.mp3")).await?;
//! ```

pub mod acoustid;
pub mod domain;
pub mod fingerprint;
pub mod retry;
pub mod service;
pub mod traits;

pub use acoustid::AcoustIdClient;
pub use domain::{Recognition, RecognitionError, RecognizedTrack};
pub use retry::RetryPolicy;
pub use service::FingerprintRecognizer;
pub use traits::Recognizer;
