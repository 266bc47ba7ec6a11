//! Caller-supplied scale vocabulary.
//!
//! The key extractor never owns a list of scale names. Callers build a
//! [`ScaleVocabulary`] from whatever canonical names their downstream
//! consumer understands (`"C Major"`, `"A Minor"`, `"D Dorian"`, ...) and
//! pass it explicitly.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use thiserror::Error;

/// `<Root> <Mode>` where root is a note letter with an optional accidental.
static SCALE_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-G][#b]?)\s+([A-Za-z][A-Za-z ]*[A-Za-z]|[A-Za-z])$").unwrap());

/// Major/minor quality of a scale name. Named modes have none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Quality {
    Major,
    Minor,
}

impl Quality {
    /// Stated or implied quality of a free-form key phrase: minor when the
    /// word "minor" appears anywhere, otherwise major.
    pub fn implied_by(phrase: &str) -> Self {
        if phrase.to_ascii_lowercase().contains("minor") {
            Quality::Minor
        } else {
            Quality::Major
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Quality::Major => "Major",
            Quality::Minor => "Minor",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum VocabularyError {
    #[error("invalid scale name '{0}': expected \"<Root> <Major|Minor>\" or \"<Root> <Mode>\"")]
    InvalidScaleName(String),
}

/// One canonical scale name, split into root and mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScaleEntry {
    pub name: String,
    pub root: String,
    pub mode: String,
    pub quality: Option<Quality>,
}

impl ScaleEntry {
    pub fn parse(name: &str) -> Result<Self, VocabularyError> {
        let trimmed = name.trim();
        let caps = SCALE_NAME
            .captures(trimmed)
            .ok_or_else(|| VocabularyError::InvalidScaleName(name.to_string()))?;
        let mode = caps[2].to_string();
        let quality = match mode.to_ascii_lowercase().as_str() {
            "major" => Some(Quality::Major),
            "minor" => Some(Quality::Minor),
            _ => None,
        };
        Ok(ScaleEntry {
            name: trimmed.to_string(),
            root: caps[1].to_string(),
            mode,
            quality,
        })
    }
}

/// Ordered, immutable list of canonical scale names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScaleVocabulary {
    entries: Vec<ScaleEntry>,
}

impl ScaleVocabulary {
    /// Build a vocabulary, rejecting any entry that is not a scale name.
    pub fn new<I, S>(names: I) -> Result<Self, VocabularyError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let entries = names
            .into_iter()
            .map(|n| ScaleEntry::parse(n.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { entries })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[ScaleEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Exact (case-sensitive) lookup of a canonical name.
    pub fn find(&self, name: &str) -> Option<&ScaleEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    /// First entry with the given root and Major/Minor quality.
    pub fn first_compatible(&self, root: &str, quality: Quality) -> Option<&ScaleEntry> {
        self.entries
            .iter()
            .find(|e| e.root.eq_ignore_ascii_case(root) && e.quality == Some(quality))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_entries() {
        let entry = ScaleEntry::parse("F# Minor").unwrap();
        assert_eq!(entry.root, "F#");
        assert_eq!(entry.quality, Some(Quality::Minor));

        let entry = ScaleEntry::parse("D Dorian").unwrap();
        assert_eq!(entry.mode, "Dorian");
        assert_eq!(entry.quality, None);

        let entry = ScaleEntry::parse("C Harmonic Minor").unwrap();
        assert_eq!(entry.mode, "Harmonic Minor");
        assert_eq!(entry.quality, None);
    }

    #[test]
    fn test_rejects_malformed_names() {
        for bad in ["", "Major", "H Major", "c major", "C", "C#  "] {
            assert_eq!(
                ScaleVocabulary::new([bad]),
                Err(VocabularyError::InvalidScaleName(bad.to_string())),
                "{:?} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_lookup_preserves_order() {
        let vocab = ScaleVocabulary::new(["C Major", "C Minor", "C Phrygian"]).unwrap();
        assert_eq!(vocab.len(), 3);
        assert!(vocab.contains("C Minor"));
        assert!(!vocab.contains("c minor"));
        assert_eq!(
            vocab.first_compatible("c", Quality::Minor).map(|e| e.name.as_str()),
            Some("C Minor")
        );
        assert!(vocab.first_compatible("D", Quality::Major).is_none());
    }

    #[test]
    fn test_implied_quality() {
        assert_eq!(Quality::implied_by("A minor"), Quality::Minor);
        assert_eq!(Quality::implied_by("A"), Quality::Major);
        assert_eq!(Quality::implied_by("Eb MAJOR"), Quality::Major);
    }
}
