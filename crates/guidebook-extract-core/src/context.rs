//! Essential-context summary.
//!
//! Downstream prompts do not need the whole guidebook; the overview and the
//! harmony/melody/rhythm sections carry what a follow-up generation step
//! needs. The heading numbers and wording are fixed by the generator's
//! output format.

use once_cell::sync::Lazy;

use crate::section::{locate_section, HeadingPattern};

/// Returned instead of an empty string when neither section is present.
pub const ESSENTIAL_CONTEXT_FALLBACK: &str =
    "Could not parse essential context from the guidebook. Refer to the full guidebook for details.";

static OVERVIEW_HEADING: Lazy<HeadingPattern> = Lazy::new(|| {
    HeadingPattern::new(r"##\s*1\.\s*Song\s+Overview").unwrap()
});

static HARMONY_HEADING: Lazy<HeadingPattern> = Lazy::new(|| {
    HeadingPattern::new(r"##\s*4\.\s*Harmony,?\s*Melody\s*(?:&|and)\s*Rhythmic\s+Core").unwrap()
});

/// Overview and harmony sections joined by a blank line, or
/// [`ESSENTIAL_CONTEXT_FALLBACK`]. Never empty.
pub fn summarize_essential_context(document: &str) -> String {
    let overview = locate_section(document, &OVERVIEW_HEADING);
    let harmony = locate_section(document, &HARMONY_HEADING);

    let combined = format!("{}\n\n{}", overview.text, harmony.text);
    let combined = combined.trim();
    if combined.is_empty() {
        ESSENTIAL_CONTEXT_FALLBACK.to_string()
    } else {
        combined.to_string()
    }
}
