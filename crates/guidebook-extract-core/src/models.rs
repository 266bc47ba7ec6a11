//! Aggregate extraction result.

use serde::Serialize;

use crate::key::extract_key;
use crate::progression::extract_chord_progression;
use crate::tempo::extract_tempo;
use crate::title::extract_suggested_title;
use crate::vocabulary::ScaleVocabulary;

/// Every musical parameter the engine knows how to mine from a guidebook.
///
/// Each field is extracted independently; a `None` means the document did
/// not phrase that field in a recognizable way and the consumer should use
/// its own default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GuidebookParameters {
    pub title: Option<String>,
    pub tempo_bpm: Option<u32>,
    pub key: Option<String>,
    pub chord_progression: Option<String>,
}

impl GuidebookParameters {
    pub fn extract(document: &str, vocabulary: &ScaleVocabulary) -> Self {
        Self {
            title: extract_suggested_title(document),
            tempo_bpm: extract_tempo(document),
            key: extract_key(document, vocabulary),
            chord_progression: extract_chord_progression(document),
        }
    }

    /// Number of fields that were recognized, out of four.
    pub fn recognized_fields(&self) -> usize {
        [
            self.title.is_some(),
            self.tempo_bpm.is_some(),
            self.key.is_some(),
            self.chord_progression.is_some(),
        ]
        .into_iter()
        .filter(|found| *found)
        .count()
    }

    /// True when no field was recognized.
    pub fn is_empty(&self) -> bool {
        self.recognized_fields() == 0
    }
}
