//! Adapter layer: Convert AcoustID DTOs to domain models
//!
//! This is the ONLY place where DTO types are converted to domain types.

use super::dto;
use crate::recognition::domain::{Recognition, RecognitionError, RecognizedTrack};

/// Convert an AcoustID lookup response into a recognition.
///
/// The highest-scoring result that carries at least one recording wins;
/// its first titled recording supplies title and artist credit. Results
/// without recordings are fingerprints AcoustID knows but cannot name,
/// which we treat as no match.
pub fn to_recognition(response: dto::LookupResponse) -> Result<Recognition, RecognitionError> {
    if response.status != "ok" {
        let error = response.error.unwrap_or(dto::ApiError {
            code: -1,
            message: "Unknown error".to_string(),
        });
        return Err(RecognitionError::Api(format!(
            "{} (code {})",
            error.message, error.code
        )));
    }

    let best = response
        .results
        .into_iter()
        .filter(|r| !r.recordings.is_empty())
        .max_by(|a, b| a.score.total_cmp(&b.score));

    let Some(best) = best else {
        return Ok(Recognition::no_match());
    };

    let recording = best
        .recordings
        .iter()
        .find(|r| r.title.is_some())
        .or_else(|| best.recordings.first());

    Ok(recording
        .map(|r| {
            Recognition::matched(RecognizedTrack {
                title: r.title.clone(),
                artist: artist_credit(&r.artists),
            })
        })
        .unwrap_or_default())
}

/// Join an artist list into a single credit, honouring join phrases.
fn artist_credit(artists: &[dto::Artist]) -> Option<String> {
    if artists.is_empty() {
        return None;
    }

    let mut credit = String::new();
    for (i, artist) in artists.iter().enumerate() {
        credit.push_str(&artist.name);
        match &artist.joinphrase {
            Some(phrase) => credit.push_str(phrase),
            None if i + 1 < artists.len() => credit.push_str(", "),
            None => {}
        }
    }
    Some(credit.trim().to_string())
}
