//! Markdown emphasis cleanup shared by the field cleaners.

use once_cell::sync::Lazy;
use regex::Regex;

static BOLD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*(.+?)\*\*").unwrap());
static ITALIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*(.+?)\*").unwrap());

/// Remove paired `**bold**` and `*italic*` delimiters, then any asterisks
/// left dangling at either end, and trim.
pub(crate) fn strip_emphasis(text: &str) -> String {
    let unbolded = BOLD.replace_all(text, "$1");
    let plain = ITALIC.replace_all(&unbolded, "$1");
    plain.trim().trim_matches('*').trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_bold_and_italic() {
        assert_eq!(strip_emphasis("**Neon** *Rain*"), "Neon Rain");
        assert_eq!(strip_emphasis("  *Midnight Drive*  "), "Midnight Drive");
    }

    #[test]
    fn test_dangling_asterisks() {
        assert_eq!(strip_emphasis("** Echoes"), "Echoes");
        assert_eq!(strip_emphasis("plain"), "plain");
        assert_eq!(strip_emphasis(""), "");
    }
}
