//! Ordered pattern cascades.
//!
//! A [`Cascade`] is a named list of regex rules compiled from a static
//! `(name, pattern)` table. Rules are tried in declaration order and the
//! first one whose handler produces a value wins; later rules never run.

use regex::{Captures, Regex};
use tracing::{debug, trace};

struct Rule {
    name: &'static str,
    regex: Regex,
}

pub(crate) struct Cascade {
    field: &'static str,
    rules: Vec<Rule>,
}

impl Cascade {
    /// Compile a rule table. Tables are compile-time constants, so an
    /// invalid pattern is a programming error.
    pub(crate) fn compile(field: &'static str, table: &[(&'static str, &str)]) -> Self {
        let rules = table
            .iter()
            .map(|&(name, pattern)| Rule {
                name,
                regex: Regex::new(pattern)
                    .unwrap_or_else(|e| panic!("invalid {} rule '{}': {}", field, name, e)),
            })
            .collect();
        Self { field, rules }
    }

    /// Run the cascade against `document`.
    ///
    /// For each rule in order, the first match in the document is passed to
    /// `handler`. A handler returning `None` (e.g. the captured value cleaned
    /// down to nothing) lets the next rule try.
    pub(crate) fn first<T, F>(&self, document: &str, mut handler: F) -> Option<T>
    where
        F: FnMut(&Captures<'_>) -> Option<T>,
    {
        for rule in &self.rules {
            let Some(caps) = rule.regex.captures(document) else {
                continue;
            };
            match handler(&caps) {
                Some(value) => {
                    debug!(field = self.field, rule = rule.name, "cascade rule matched");
                    return Some(value);
                }
                None => {
                    trace!(
                        field = self.field,
                        rule = rule.name,
                        "rule matched but produced no value"
                    );
                }
            }
        }
        None
    }

    #[cfg(test)]
    pub(crate) fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name).collect()
    }
}
