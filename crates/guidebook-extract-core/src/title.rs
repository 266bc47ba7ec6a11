//! Suggested title extraction.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::markup::strip_emphasis;

/// `- **Suggested Title:** <value>` as a list item at line start.
static SUGGESTED_TITLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?im)^[ \t]*[-*][ \t]+\*\*suggested[ \t]+title[ \t]*:?[ \t]*\*\*[ \t]*:?[ \t]*(.+)$")
        .unwrap()
});

/// Extract the suggested song title, with emphasis markup removed.
pub fn extract_suggested_title(document: &str) -> Option<String> {
    let caps = SUGGESTED_TITLE.captures(document)?;
    let title = strip_emphasis(caps.get(1)?.as_str());
    (!title.is_empty()).then_some(title)
}
