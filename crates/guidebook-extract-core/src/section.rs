//! Top-level section location for `##`-headed guidebooks.
//!
//! A section starts at a heading line and runs up to (but excluding) the
//! next line that opens with two hash marks followed by whitespace, or to
//! the end of the document. Deeper headings (`###`) do not end a section.
//!
//! # Example
//!
//! ```rust
//! use guidebook_extract_core::section::{locate_section, HeadingPattern};
//!
//! let doc = "## 1. Song Overview\nfoo\n## 2. Next\nbar";
//! let section = locate_section(doc, &HeadingPattern::literal("## 1.").unwrap());
//! assert_eq!(section.text, "## 1. Song Overview\nfoo");
//! ```

use once_cell::sync::Lazy;
use regex::Regex;

/// Generic top-level heading: `##` plus whitespace at line start.
static TOP_LEVEL_HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^##\s").unwrap());

/// A heading matcher, case-insensitive and anchored to the start of a line.
#[derive(Debug, Clone)]
pub struct HeadingPattern {
    regex: Regex,
}

impl HeadingPattern {
    /// Compile a heading from a regex fragment, e.g. `r"##\s*1\.\s*Song Overview"`.
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        let regex = Regex::new(&format!(r"(?im)^(?:{})", pattern))?;
        Ok(Self { regex })
    }

    /// Match `text` literally (no regex metacharacters).
    ///
    /// Fails only when the heading is too long to compile.
    pub fn literal(text: &str) -> Result<Self, regex::Error> {
        Self::new(&regex::escape(text))
    }
}

/// A view into a document: raw byte span plus the trimmed text it covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section<'a> {
    /// Byte offset of the heading start.
    pub start: usize,
    /// Byte offset of the next top-level heading, or the document length.
    pub end: usize,
    /// Section text with surrounding whitespace trimmed.
    pub text: &'a str,
}

impl<'a> Section<'a> {
    /// The "heading not found" section: no span, no text.
    pub fn empty() -> Self {
        Section {
            start: 0,
            end: 0,
            text: "",
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// First line of the section (the heading itself).
    pub fn heading(&self) -> &'a str {
        self.text.lines().next().unwrap_or("").trim_end()
    }
}

/// Find the first heading matching `heading` and return its section.
///
/// Returns [`Section::empty`] when the heading is absent; callers treat that
/// as "no content for this section".
pub fn locate_section<'a>(document: &'a str, heading: &HeadingPattern) -> Section<'a> {
    match heading.regex.find(document) {
        Some(m) => section_from(document, m.start(), m.end()),
        None => Section::empty(),
    }
}

/// Every top-level (`## `) section in document order.
pub fn list_sections(document: &str) -> Vec<Section<'_>> {
    TOP_LEVEL_HEADING
        .find_iter(document)
        .map(|m| section_from(document, m.start(), m.end()))
        .collect()
}

fn section_from(document: &str, start: usize, heading_end: usize) -> Section<'_> {
    // Search from the end of the heading match so the heading itself never
    // counts as the boundary. `^` still only matches at real line starts.
    let end = TOP_LEVEL_HEADING
        .find_at(document, heading_end)
        .map(|m| m.start())
        .unwrap_or(document.len());
    Section {
        start,
        end,
        text: document[start..end].trim(),
    }
}
