//! Extraction reports: the engine's parameters plus provenance, with
//! optional default substitution for absent fields.

use chrono::{DateTime, Utc};
use guidebook_extract_core::{GuidebookParameters, ScaleVocabulary};
use serde::Serialize;

use crate::config::DefaultsConfig;
use crate::document::Guidebook;

/// One guidebook's extracted parameters, as printed by `gbx extract --json`
/// and collected by `gbx scan`.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionReport {
    pub source: String,
    pub sha256: String,
    pub extracted_at: DateTime<Utc>,
    #[serde(flatten)]
    pub parameters: GuidebookParameters,
    /// Fields that were absent from the guidebook and filled from config.
    pub defaults_applied: Vec<&'static str>,
}

impl ExtractionReport {
    pub fn build(guidebook: &Guidebook, vocabulary: &ScaleVocabulary) -> Self {
        Self {
            source: guidebook.source.clone(),
            sha256: guidebook.sha256(),
            extracted_at: Utc::now(),
            parameters: GuidebookParameters::extract(&guidebook.body, vocabulary),
            defaults_applied: Vec::new(),
        }
    }

    /// Fill absent tempo, key, and chord progression from `defaults`,
    /// recording which fields were substituted. The title has no default.
    pub fn with_defaults(mut self, defaults: &DefaultsConfig) -> Self {
        let params = &mut self.parameters;
        if params.tempo_bpm.is_none() {
            params.tempo_bpm = Some(defaults.tempo_bpm);
            self.defaults_applied.push("tempo_bpm");
        }
        if params.key.is_none() {
            params.key = Some(defaults.key.clone());
            self.defaults_applied.push("key");
        }
        if params.chord_progression.is_none() {
            params.chord_progression = Some(defaults.chord_progression.clone());
            self.defaults_applied.push("chord_progression");
        }
        self
    }

    /// Human-readable block for terminal output.
    pub fn render_text(&self) -> String {
        let p = &self.parameters;
        let mut out = String::new();
        out.push_str(&format!("source:            {}\n", self.source));
        out.push_str(&format!(
            "title:             {}\n",
            p.title.as_deref().unwrap_or(NOT_FOUND)
        ));
        out.push_str(&format!(
            "tempo:             {}\n",
            p.tempo_bpm
                .map(|bpm| format!("{} BPM", bpm))
                .unwrap_or_else(|| NOT_FOUND.to_string())
        ));
        out.push_str(&format!(
            "key:               {}\n",
            p.key.as_deref().unwrap_or(NOT_FOUND)
        ));
        out.push_str(&format!(
            "chord_progression: {}\n",
            p.chord_progression.as_deref().unwrap_or(NOT_FOUND)
        ));
        if !self.defaults_applied.is_empty() {
            out.push_str(&format!(
                "defaults_applied:  {}\n",
                self.defaults_applied.join(", ")
            ));
        }
        out
    }
}

const NOT_FOUND: &str = "(not found)";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn vocab() -> ScaleVocabulary {
        Config::default().vocabulary().unwrap()
    }

    #[test]
    fn test_build_and_json_shape() {
        let guidebook = Guidebook::new("song.md", "Tempo: 100-110 BPM\nKey: E Minor");
        let report = ExtractionReport::build(&guidebook, &vocab());
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["source"], "song.md");
        assert_eq!(json["tempo_bpm"], 105);
        assert_eq!(json["key"], "E Minor");
        assert!(json["title"].is_null());
        assert_eq!(json["defaults_applied"], serde_json::json!([]));
        assert_eq!(json["sha256"].as_str().unwrap().len(), 64);
    }

    #[test]
    fn test_defaults_fill_only_absent_fields() {
        let guidebook = Guidebook::new("song.md", "Tempo: 72 BPM");
        let report =
            ExtractionReport::build(&guidebook, &vocab()).with_defaults(&DefaultsConfig::default());
        assert_eq!(report.parameters.tempo_bpm, Some(72));
        assert_eq!(report.parameters.key.as_deref(), Some("C Major"));
        assert_eq!(report.parameters.chord_progression.as_deref(), Some("I-V-vi-IV"));
        assert_eq!(report.parameters.title, None);
        assert_eq!(report.defaults_applied, vec!["key", "chord_progression"]);
    }

    #[test]
    fn test_render_text() {
        let guidebook = Guidebook::new("song.md", "- **Suggested Title:** Dust");
        let text = ExtractionReport::build(&guidebook, &vocab()).render_text();
        assert!(text.contains("title:             Dust\n"));
        assert!(text.contains("tempo:             (not found)\n"));
        assert!(!text.contains("defaults_applied"));
    }
}
