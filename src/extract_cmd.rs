//! Single-guidebook commands: `gbx extract`, `gbx context`, `gbx section`,
//! and `gbx sections`.

use anyhow::Result;
use guidebook_extract_core::{
    extract_chord_progression, extract_key, extract_suggested_title, extract_tempo,
    list_sections, locate_section, summarize_essential_context, HeadingPattern,
};
use std::path::Path;

use crate::config::Config;
use crate::document::read_guidebook;
use crate::report::ExtractionReport;

/// A single field selectable with `gbx extract --field`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, clap::ValueEnum)]
pub enum Field {
    Tempo,
    Key,
    Progression,
    Title,
}

/// Extract one field as a bare string, or `None` when absent.
pub fn extract_field(body: &str, field: Field, config: &Config) -> Result<Option<String>> {
    Ok(match field {
        Field::Tempo => extract_tempo(body).map(|bpm| bpm.to_string()),
        Field::Key => extract_key(body, &config.vocabulary()?),
        Field::Progression => extract_chord_progression(body),
        Field::Title => extract_suggested_title(body),
    })
}

/// CLI entry point for `gbx extract`.
///
/// Returns `false` when a single `--field` was requested and absent, so the
/// caller can exit non-zero.
pub fn run_extract(
    config: &Config,
    input: &Path,
    field: Option<Field>,
    json: bool,
    with_defaults: bool,
) -> Result<bool> {
    let guidebook = read_guidebook(input)?;

    if let Some(field) = field {
        return match extract_field(&guidebook.body, field, config)? {
            Some(value) => {
                println!("{}", value);
                Ok(true)
            }
            None => Ok(false),
        };
    }

    let mut report = ExtractionReport::build(&guidebook, &config.vocabulary()?);
    if with_defaults {
        report = report.with_defaults(&config.defaults);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report.render_text());
    }
    Ok(true)
}

/// CLI entry point for `gbx context`.
pub fn run_context(input: &Path) -> Result<()> {
    let guidebook = read_guidebook(input)?;
    println!("{}", summarize_essential_context(&guidebook.body));
    Ok(())
}

/// CLI entry point for `gbx section`. Returns `false` when the heading is
/// absent.
pub fn run_section(input: &Path, heading: &str, regex: bool) -> Result<bool> {
    let guidebook = read_guidebook(input)?;
    let pattern = if regex {
        HeadingPattern::new(heading)?
    } else {
        HeadingPattern::literal(heading)?
    };

    let section = locate_section(&guidebook.body, &pattern);
    if section.is_empty() {
        return Ok(false);
    }
    println!("{}", section.text);
    Ok(true)
}

/// CLI entry point for `gbx sections`.
pub fn run_sections(input: &Path) -> Result<()> {
    let guidebook = read_guidebook(input)?;
    println!("{:<8} {:<8} HEADING", "START", "END");
    for section in list_sections(&guidebook.body) {
        println!("{:<8} {:<8} {}", section.start, section.end, section.heading());
    }
    Ok(())
}
