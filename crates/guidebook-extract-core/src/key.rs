//! Key/scale extraction and normalization.
//!
//! Extraction is a three-rule cascade (explicit "Suggested Key(s)/Scale(s)"
//! label, any "Key...:" label followed by a note and quality, a bare note
//! and quality anywhere). The matched value is split into candidates, and
//! candidates are resolved against the caller's [`ScaleVocabulary`]:
//!
//! 1. Each candidate in order, literally and then in normalized form
//!    (`"<Root> Minor"` / `"<Root> Major"`).
//! 2. For the first candidate only, the first vocabulary entry with the same
//!    root and quality.
//! 3. The first candidate verbatim.
//!
//! Step 3 returns an unvalidated string. The key is a display field, so a
//! plausible phrase from the document is preferred over no key at all.
//!
//! Step 2 never looks past the first candidate, so a document whose first
//! candidate is unusable but whose second is valid ends up in step 3.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use tracing::trace;

use crate::cascade::Cascade;
use crate::markup::strip_emphasis;
use crate::vocabulary::{Quality, ScaleVocabulary};

const KEY_RULES: &[(&str, &str)] = &[
    (
        "suggested_key_label",
        r"(?i)suggested\s+keys?(?:\s*\(s\))?(?:\s*/\s*scales?(?:\s*\(s\))?)?\s*:[*\s]*([^(\n]+)",
    ),
    (
        "key_label",
        r"(?i:\bkeys?\b)[^:\n]*:[*\s]*([A-G][#b♯♭]?\s+(?i:major|minor))\b",
    ),
    ("bare_key", r"\b([A-G][#b♯♭]?\s+(?i:major|minor))\b"),
];

static KEY: Lazy<Cascade> = Lazy::new(|| Cascade::compile("key", KEY_RULES));

/// Candidate separators: comma, slash, or the word "or".
static CANDIDATE_SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\s*(?:,|/|\bor\b)\s*").unwrap());

/// Leading root note of a candidate, e.g. `C#` in `"c# minor"`.
static ROOT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([A-Ga-g])([#b♯♭]?)").unwrap());

/// Extract the song key and resolve it against `vocabulary`.
///
/// Returns `None` only when no key phrasing is found at all. See the module
/// docs for the resolution order.
pub fn extract_key(document: &str, vocabulary: &ScaleVocabulary) -> Option<String> {
    let candidates = KEY.first(document, candidates_from)?;
    Some(resolve_candidates(&candidates, vocabulary))
}

fn candidates_from(caps: &Captures<'_>) -> Option<Vec<String>> {
    let candidates = split_candidates(caps.get(1)?.as_str());
    (!candidates.is_empty()).then_some(candidates)
}

/// Split a matched key value into trimmed candidates, dropping markup and
/// a trailing period from each.
pub fn split_candidates(value: &str) -> Vec<String> {
    CANDIDATE_SEPARATOR
        .split(value)
        .map(|part| {
            let cleaned = strip_emphasis(part);
            let cleaned = cleaned.strip_suffix('.').unwrap_or(&cleaned);
            cleaned.trim().to_string()
        })
        .filter(|c| !c.is_empty())
        .collect()
}

/// Resolve non-empty candidates to a vocabulary name, or fall back to the
/// first candidate verbatim.
pub fn resolve_candidates(candidates: &[String], vocabulary: &ScaleVocabulary) -> String {
    for candidate in candidates {
        if let Some(entry) = vocabulary.find(candidate) {
            return entry.name.clone();
        }
        if let Some(normalized) = normalize_candidate(candidate) {
            if let Some(entry) = vocabulary.find(&normalized) {
                return entry.name.clone();
            }
        }
        trace!(candidate = %candidate, "no exact vocabulary match");
    }

    let Some(first) = candidates.first() else {
        return String::new();
    };
    if let Some(root) = candidate_root(first) {
        if let Some(entry) = vocabulary.first_compatible(&root, Quality::implied_by(first)) {
            return entry.name.clone();
        }
    }
    trace!(candidate = %first, "falling back to verbatim candidate");
    first.clone()
}

/// Canonical `"<Root> Minor"` / `"<Root> Major"` form of a candidate.
pub fn normalize_candidate(candidate: &str) -> Option<String> {
    let root = candidate_root(candidate)?;
    Some(format!("{} {}", root, Quality::implied_by(candidate).as_str()))
}

/// Root note of a candidate with the letter upper-cased and the accidental
/// spelled `#`/`b`, if its leading token is a note name.
///
/// A spelled-out accidental in the next word ("C sharp minor") is folded
/// into the root. Any accidental that cannot be represented (double sharps,
/// "E♭♭") makes the candidate rootless rather than silently dropping it.
fn candidate_root(candidate: &str) -> Option<String> {
    let mut words = candidate.split_whitespace();
    let token = words.next()?;
    let caps = ROOT.captures(token)?;
    // "Bbm" is fine; "Blues" and "F𝄪" are not notes.
    let rest = &token[caps[0].len()..];
    if rest
        .chars()
        .next()
        .is_some_and(|c| c != 'm' && (c.is_alphabetic() || !c.is_ascii()))
    {
        return None;
    }

    let mut accidental = match &caps[2] {
        "♯" => "#",
        "♭" => "b",
        other => other,
    };
    if rest.is_empty() {
        if let Some(word) = words.next() {
            let spelled = match word.to_ascii_lowercase().as_str() {
                "sharp" => Some("#"),
                "flat" => Some("b"),
                _ => None,
            };
            if let Some(spelled) = spelled {
                if !accidental.is_empty() {
                    return None;
                }
                accidental = spelled;
            }
        }
    }
    Some(format!("{}{}", caps[1].to_ascii_uppercase(), accidental))
}
