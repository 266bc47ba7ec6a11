//! TOML configuration for the `gbx` CLI.
//!
//! The extraction engine never owns a scale vocabulary or fallback values;
//! both live here, on the caller side. Every section is optional and a
//! missing config file at the default location means "all defaults".
//!
//! ```toml
//! [vocabulary]
//! scales = ["C Major", "A Minor", "D Dorian"]
//!
//! [defaults]
//! tempo_bpm = 120
//! key = "C Major"
//! chord_progression = "I-V-vi-IV"
//!
//! [scan]
//! include_globs = ["**/*.md"]
//! exclude_globs = ["drafts/**"]
//! follow_symlinks = false
//! ```

use anyhow::{Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use guidebook_extract_core::ScaleVocabulary;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Config file used when `--config` is not given.
pub const DEFAULT_CONFIG_PATH: &str = "./config/gbx.toml";

/// Roots used for the built-in vocabulary, spelled the way the upstream
/// generator spells them.
const DEFAULT_ROOTS: [&str; 12] = [
    "C", "C#", "D", "Eb", "E", "F", "F#", "G", "Ab", "A", "Bb", "B",
];

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub vocabulary: VocabularyConfig,
    #[serde(default)]
    pub defaults: DefaultsConfig,
    #[serde(default)]
    pub scan: ScanConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct VocabularyConfig {
    #[serde(default = "default_scales")]
    pub scales: Vec<String>,
}

impl Default for VocabularyConfig {
    fn default() -> Self {
        Self {
            scales: default_scales(),
        }
    }
}

/// Every root in both qualities: `C Major`, `C Minor`, `C# Major`, ...
pub fn default_scales() -> Vec<String> {
    DEFAULT_ROOTS
        .iter()
        .flat_map(|root| [format!("{} Major", root), format!("{} Minor", root)])
        .collect()
}

/// Values substituted for absent fields when `--with-defaults` is given.
#[derive(Debug, Deserialize, Clone)]
pub struct DefaultsConfig {
    #[serde(default = "default_tempo_bpm")]
    pub tempo_bpm: u32,
    #[serde(default = "default_key")]
    pub key: String,
    #[serde(default = "default_chord_progression")]
    pub chord_progression: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            tempo_bpm: default_tempo_bpm(),
            key: default_key(),
            chord_progression: default_chord_progression(),
        }
    }
}

fn default_tempo_bpm() -> u32 {
    120
}
fn default_key() -> String {
    "C Major".to_string()
}
fn default_chord_progression() -> String {
    "I-V-vi-IV".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct ScanConfig {
    #[serde(default = "default_include_globs")]
    pub include_globs: Vec<String>,
    #[serde(default)]
    pub exclude_globs: Vec<String>,
    #[serde(default)]
    pub follow_symlinks: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            include_globs: default_include_globs(),
            exclude_globs: Vec::new(),
            follow_symlinks: false,
        }
    }
}

fn default_include_globs() -> Vec<String> {
    vec!["**/*.md".to_string(), "**/*.txt".to_string()]
}

impl Config {
    /// The configured scale names as a validated vocabulary.
    pub fn vocabulary(&self) -> Result<ScaleVocabulary> {
        ScaleVocabulary::new(&self.vocabulary.scales).context("Invalid [vocabulary] scales")
    }
}

pub fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern)?);
    }
    Ok(builder.build()?)
}

/// Resolve the `--config` flag: an explicit path must exist, while a missing
/// file at [`DEFAULT_CONFIG_PATH`] silently falls back to defaults.
pub fn resolve_config(explicit: Option<&Path>) -> Result<Config> {
    match explicit {
        Some(path) => load_config(path),
        None => {
            let default_path = PathBuf::from(DEFAULT_CONFIG_PATH);
            if default_path.exists() {
                load_config(&default_path)
            } else {
                tracing::debug!("no config file at {}, using defaults", DEFAULT_CONFIG_PATH);
                let config = Config::default();
                validate(&config)?;
                Ok(config)
            }
        }
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;
    validate(&config)?;
    Ok(config)
}

fn validate(config: &Config) -> Result<()> {
    let vocabulary = config.vocabulary()?;

    if config.defaults.tempo_bpm == 0 {
        anyhow::bail!("defaults.tempo_bpm must be > 0");
    }

    if !vocabulary.is_empty() && !vocabulary.contains(&config.defaults.key) {
        anyhow::bail!(
            "defaults.key '{}' is not in [vocabulary] scales",
            config.defaults.key
        );
    }

    if config.defaults.chord_progression.trim().is_empty() {
        anyhow::bail!("defaults.chord_progression must not be empty");
    }

    if config.scan.include_globs.is_empty() {
        anyhow::bail!("scan.include_globs must contain at least one pattern");
    }
    build_globset(&config.scan.include_globs).context("Invalid scan.include_globs")?;
    build_globset(&config.scan.exclude_globs).context("Invalid scan.exclude_globs")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(content: &str) -> (TempDir, PathBuf) {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("gbx.toml");
        std::fs::write(&path, content).unwrap();
        (tmp, path)
    }

    #[test]
    fn test_empty_file_is_all_defaults() {
        let (_tmp, path) = write_config("");
        let config = load_config(&path).unwrap();
        assert_eq!(config.vocabulary.scales.len(), 24);
        assert_eq!(config.defaults.tempo_bpm, 120);
        assert_eq!(config.defaults.key, "C Major");
        assert_eq!(config.scan.include_globs, vec!["**/*.md", "**/*.txt"]);
        assert!(config.vocabulary().unwrap().contains("Bb Minor"));
    }

    #[test]
    fn test_custom_sections() {
        let (_tmp, path) = write_config(
            r#"
[vocabulary]
scales = ["A Minor", "D Dorian"]

[defaults]
tempo_bpm = 90
key = "A Minor"

[scan]
include_globs = ["**/*.guide.md"]
follow_symlinks = true
"#,
        );
        let config = load_config(&path).unwrap();
        assert_eq!(config.vocabulary().unwrap().len(), 2);
        assert_eq!(config.defaults.tempo_bpm, 90);
        assert_eq!(config.defaults.chord_progression, "I-V-vi-IV");
        assert!(config.scan.follow_symlinks);
    }

    #[test]
    fn test_rejects_bad_scale_name() {
        let (_tmp, path) = write_config("[vocabulary]\nscales = [\"C Major\", \"Lydian\"]\n");
        let err = load_config(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("Lydian"));
    }

    #[test]
    fn test_rejects_default_key_outside_vocabulary() {
        let (_tmp, path) = write_config("[vocabulary]\nscales = [\"A Minor\"]\n");
        let err = load_config(&path).unwrap_err();
        assert!(err.to_string().contains("defaults.key"));
    }

    #[test]
    fn test_empty_vocabulary_allows_any_default_key() {
        let (_tmp, path) = write_config("[vocabulary]\nscales = []\n[defaults]\nkey = \"Whatever\"\n");
        assert!(load_config(&path).is_ok());
    }

    #[test]
    fn test_rejects_zero_tempo_and_bad_globs() {
        let (_tmp, path) = write_config("[defaults]\ntempo_bpm = 0\n");
        assert!(load_config(&path).is_err());

        let (_tmp, path) = write_config("[scan]\ninclude_globs = [\"[\"]\n");
        assert!(load_config(&path).is_err());
    }

    #[test]
    fn test_explicit_missing_path_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("nope.toml");
        assert!(resolve_config(Some(&missing)).is_err());
    }

    #[test]
    fn test_example_config_loads() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("config/gbx.example.toml");
        let config = load_config(&path).unwrap();
        assert_eq!(config.vocabulary().unwrap().len(), 24);
        assert_eq!(config.defaults.key, "C Major");
    }
}
