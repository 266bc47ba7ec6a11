//! Chord progression extraction and token cleanup.
//!
//! Labels are tried first (`Chord Progression(s):`, `Progression(s):`,
//! `Chord(s):`), then a bare hyphenated run of at least three roman-numeral
//! tokens anywhere in the document. Whatever matched is cut down to its
//! leading run of progression characters, so prose appended on the same line
//! is dropped, and only the first listed progression is returned.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::cascade::Cascade;
use crate::markup::strip_emphasis;

const PROGRESSION_RULES: &[(&str, &str)] = &[
    (
        "chord_progression_label",
        r"(?m)(?i:\bchord\s+progressions?)(?:\s*\([^)\n]*\))?\s*:[*\s]*(.+)$",
    ),
    (
        "progression_label",
        r"(?m)(?i:\bprogressions?)(?:\s*\([^)\n]*\))?\s*:[*\s]*(.+)$",
    ),
    (
        "chords_label",
        r"(?m)(?i:\bchords?)(?:\s*\([^)\n]*\))?\s*:[*\s]*([IViv#b♭♯1-7].*)$",
    ),
    (
        "bare_numerals",
        r"(?m)(?:^|[\s(:])([b#♭♯]?[IViv]{1,4}(?:[°ø+0-9m]|dim|aug|maj|sus|add)*(?:/[b#♭♯]?[IViv0-9]+)?(?:\s*[-–—]\s*[b#♭♯]?[IViv]{1,4}(?:[°ø+0-9m]|dim|aug|maj|sus|add)*(?:/[b#♭♯]?[IViv0-9]+)?){2,})(?:[^\p{L}]|$)",
    ),
];

static PROGRESSION: Lazy<Cascade> =
    Lazy::new(|| Cascade::compile("chord_progression", PROGRESSION_RULES));

/// Leading run of progression characters: roman numerals, accidentals,
/// quality markers, slash chords, digits, dashes, and list punctuation.
static LEADING_RUN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:sus|dim|aug|maj|add|[IViv#b♭♯°ø+/0-9m ,.;\-–—])+").unwrap()
});

const SENTENCE_SEPARATORS: [&str; 3] = [", ", ". ", "; "];

/// Extract the first chord progression named in a guidebook.
pub fn extract_chord_progression(document: &str) -> Option<String> {
    PROGRESSION.first(document, |caps: &Captures<'_>| {
        clean_progression(caps.get(1)?.as_str())
    })
}

/// Reduce a matched value to a single progression string.
///
/// Returns `None` when nothing progression-like is left.
pub fn clean_progression(value: &str) -> Option<String> {
    let value = strip_emphasis(value);
    let run = leading_run(&value).trim();
    let run = run.strip_suffix('.').unwrap_or(run);

    let first = SENTENCE_SEPARATORS
        .iter()
        .filter_map(|sep| run.find(sep))
        .min()
        .map_or(run, |cut| &run[..cut]);

    let cleaned = first
        .trim()
        .trim_end_matches([',', ';', '-', '–', '—', '/'])
        .trim();
    (!cleaned.is_empty()).then(|| cleaned.to_string())
}

/// The leading run of progression characters in `value`. A run that stops
/// inside a prose word ("vi-IV-I-V in the verse" would stop at "i|n") backs
/// off to the last non-letter.
fn leading_run(value: &str) -> &str {
    let Some(m) = LEADING_RUN.find(value) else {
        return "";
    };
    let run = m.as_str();
    let cut_mid_word = run.chars().last().is_some_and(char::is_alphabetic)
        && value[m.end()..].chars().next().is_some_and(char::is_alphabetic);
    if !cut_mid_word {
        return run;
    }
    match run.rfind(|c: char| !c.is_alphabetic()) {
        Some(i) => &run[..i],
        None => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_with_trailing_prose() {
        assert_eq!(
            extract_chord_progression("Chord Progression(s): vi-IV-I-V, nice and simple.")
                .as_deref(),
            Some("vi-IV-I-V")
        );
    }

    #[test]
    fn test_no_progression() {
        assert_eq!(extract_chord_progression("no progression info here"), None);
        assert_eq!(extract_chord_progression(""), None);
    }

    #[test]
    fn test_parenthetical_label_and_markup() {
        let doc = "- **Chord Progression (Chorus):** **I–V–vi–IV**";
        assert_eq!(extract_chord_progression(doc).as_deref(), Some("I–V–vi–IV"));
    }

    #[test]
    fn test_only_first_progression() {
        let doc = "Progressions: I-V-vi-IV, vi-IV-I-V";
        assert_eq!(extract_chord_progression(doc).as_deref(), Some("I-V-vi-IV"));
    }

    #[test]
    fn test_trailing_period_and_semicolon() {
        assert_eq!(
            extract_chord_progression("Progression: ii7-V7-Imaj7.").as_deref(),
            Some("ii7-V7-Imaj7")
        );
        assert_eq!(
            extract_chord_progression("Progression: ii-V-I; classic").as_deref(),
            Some("ii-V-I")
        );
    }

    #[test]
    fn test_prose_word_after_numerals() {
        assert_eq!(
            extract_chord_progression("Chord Progression: vi-IV-I-V in the verse").as_deref(),
            Some("vi-IV-I-V")
        );
    }

    #[test]
    fn test_chords_label_requires_numeral_value() {
        assert_eq!(
            extract_chord_progression("Chords: i-bVI-bIII-bVII").as_deref(),
            Some("i-bVI-bIII-bVII")
        );
        // "warm pads" does not start like a progression, so the label is skipped.
        assert_eq!(extract_chord_progression("Chords: warm pads"), None);
    }

    #[test]
    fn test_bare_numerals_anywhere() {
        let doc = "The verse loops I - V - vi - IV before lifting.";
        assert_eq!(
            extract_chord_progression(doc).as_deref(),
            Some("I - V - vi - IV")
        );
        // Two tokens are not enough.
        assert_eq!(extract_chord_progression("Go from I-V and stop"), None);
    }

    #[test]
    fn test_unusable_label_falls_through() {
        let doc = "Chord Progression(s): Verse: I-V-vi-IV";
        assert_eq!(extract_chord_progression(doc).as_deref(), Some("I-V-vi-IV"));
    }

    #[test]
    fn test_prior_output_is_a_fixed_point() {
        let first = extract_chord_progression("Progression: vi-IV-I-V.").unwrap();
        assert_eq!(extract_chord_progression(&first), Some(first));
    }

    #[test]
    fn test_em_dash_output_is_a_fixed_point() {
        let first = extract_chord_progression("Chord Progression: I—V—vi—IV").unwrap();
        assert_eq!(first, "I—V—vi—IV");
        assert_eq!(extract_chord_progression(&first), Some(first));
        assert_eq!(
            extract_chord_progression("Loop ii — V — I (turnaround)").as_deref(),
            Some("ii — V — I")
        );
    }

    #[test]
    fn test_bare_numerals_stop_at_word_boundary() {
        assert_eq!(extract_chord_progression("Try I-V-Vibrant textures"), None);
        assert_eq!(
            extract_chord_progression("Try I-V-vi-IV-Vibrant textures").as_deref(),
            Some("I-V-vi-IV")
        );
        assert_eq!(
            extract_chord_progression("It cycles I-V-vi.").as_deref(),
            Some("I-V-vi")
        );
    }

    #[test]
    fn test_clean_progression() {
        assert_eq!(clean_progression("I-V/vi-IV").as_deref(), Some("I-V/vi-IV"));
        assert_eq!(clean_progression("Vsus4-V7-I. Then end").as_deref(), Some("Vsus4-V7-I"));
        assert_eq!(clean_progression("I-V-Vibrant").as_deref(), Some("I-V"));
        assert_eq!(clean_progression("see below"), None);
    }
}
