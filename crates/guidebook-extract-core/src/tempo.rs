//! Tempo extraction.
//!
//! Rules are tried in priority order; labeled ranges beat bare ranges, and
//! any range beats a single value:
//!
//! 1. `Tempo: 120-130 BPM`
//! 2. `BPM: 120-130`
//! 3. `120-130 BPM`
//! 4. `Tempo: 120 BPM`
//! 5. `BPM: 120`
//! 6. `120 BPM`
//!
//! Ranges resolve to their mean, rounded half up.

use once_cell::sync::Lazy;
use regex::Captures;

use crate::cascade::Cascade;

const TEMPO_RULES: &[(&str, &str)] = &[
    (
        "labeled_range",
        r"(?i)\btempo\b[^\d\n]*(\d+)\s*[-–—]\s*(\d+)\s*bpm\b",
    ),
    ("bpm_label_range", r"(?i)\bbpm\b[^\d\n]*(\d+)\s*[-–—]\s*(\d+)"),
    ("bare_range", r"(?i)\b(\d+)\s*[-–—]\s*(\d+)\s*bpm\b"),
    ("labeled_single", r"(?i)\btempo\b[^\d\n]*(\d+)\s*bpm\b"),
    ("bpm_label_single", r"(?i)\bbpm\b[^\d\n]*(\d+)"),
    ("bare_single", r"(?i)\b(\d+)\s*bpm\b"),
];

static TEMPO: Lazy<Cascade> = Lazy::new(|| Cascade::compile("tempo", TEMPO_RULES));

/// Extract a tempo in BPM from a guidebook.
///
/// Returns `None` when no rule matches. No plausibility check is applied:
/// `"Tempo: 7 BPM"` yields `Some(7)`.
pub fn extract_tempo(document: &str) -> Option<u32> {
    TEMPO.first(document, resolve)
}

fn resolve(caps: &Captures<'_>) -> Option<u32> {
    let low: u32 = caps.get(1)?.as_str().parse().ok()?;
    match caps.get(2) {
        Some(high) => {
            let high: u32 = high.as_str().parse().ok()?;
            Some(rounded_mean(low, high))
        }
        None => Some(low),
    }
}

fn rounded_mean(a: u32, b: u32) -> u32 {
    ((u64::from(a) + u64::from(b) + 1) / 2) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_labeled_range_mean() {
        assert_eq!(extract_tempo("Tempo: 120-130 BPM"), Some(125));
        assert_eq!(extract_tempo("**Tempo:** 90 – 95 bpm"), Some(93));
    }

    #[test]
    fn test_labeled_single() {
        assert_eq!(extract_tempo("Tempo: 120 BPM"), Some(120));
        assert_eq!(extract_tempo("- Tempo (feel): around 84 BPM, laid back"), Some(84));
    }

    #[test]
    fn test_bpm_label_forms() {
        assert_eq!(extract_tempo("BPM: 100-110"), Some(105));
        assert_eq!(extract_tempo("Target BPM: 128"), Some(128));
    }

    #[test]
    fn test_bare_forms() {
        assert_eq!(extract_tempo("Keep it near 70-80 BPM overall."), Some(75));
        assert_eq!(extract_tempo("A driving 140bpm groove"), Some(140));
    }

    #[test]
    fn test_range_beats_earlier_single() {
        // A bare range outranks a labeled single even when it appears later.
        let doc = "Tempo: 100 BPM\nVerse sits at 96-106 BPM.";
        assert_eq!(extract_tempo(doc), Some(101));
    }

    #[test]
    fn test_priority_is_by_rule_not_position() {
        let doc = "Groove at 90 BPM.\nTempo: 120-124 BPM";
        assert_eq!(extract_tempo(doc), Some(122));
    }

    #[test]
    fn test_no_tempo() {
        assert_eq!(extract_tempo(""), None);
        assert_eq!(extract_tempo("Tempo: moderate, no number given"), None);
        assert_eq!(extract_tempo("Track 12 of 14"), None);
    }

    #[test]
    fn test_overflowing_number_falls_through() {
        assert_eq!(extract_tempo("Tempo: 99999999999 BPM\nBPM: 128"), Some(128));
    }

    #[test]
    fn test_prior_output_is_not_a_tempo() {
        let first = extract_tempo("Tempo: 120-130 BPM").unwrap();
        assert_eq!(extract_tempo(&first.to_string()), None);
    }

    #[test]
    fn test_rounded_mean() {
        assert_eq!(rounded_mean(120, 130), 125);
        assert_eq!(rounded_mean(120, 121), 121);
        assert_eq!(rounded_mean(u32::MAX, u32::MAX), u32::MAX);
    }

    proptest! {
        #[test]
        fn prop_text_without_bpm_has_no_tempo(doc in "[a-zA-Z0-9 ,.:\n-]{0,200}") {
            prop_assume!(!doc.to_ascii_lowercase().contains("bpm"));
            prop_assert_eq!(extract_tempo(&doc), None);
        }

        #[test]
        fn prop_labeled_single_roundtrips(bpm in 1u32..400) {
            prop_assert_eq!(extract_tempo(&format!("Tempo: {} BPM", bpm)), Some(bpm));
        }
    }
}
