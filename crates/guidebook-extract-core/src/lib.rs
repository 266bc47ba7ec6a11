//! # Guidebook Extract Core
//!
//! Pure extraction engine for generated song guidebooks: section location,
//! per-field pattern cascades (tempo, key, chord progression, title), key
//! normalization against a caller-supplied scale vocabulary, and the
//! essential-context summary used as compact prompt context.
//!
//! This crate performs no I/O and holds no mutable state. Every operation is
//! a function from a document (and, for keys, a [`vocabulary::ScaleVocabulary`])
//! to a possibly-absent typed value. Absence is the only failure mode: an
//! unrecognized document yields `None`, never an error.
//!
//! ```rust
//! use guidebook_extract_core::tempo::extract_tempo;
//!
//! assert_eq!(extract_tempo("Tempo: 120-130 BPM"), Some(125));
//! assert_eq!(extract_tempo("no tempo here"), None);
//! ```

pub mod context;
pub mod key;
pub mod models;
pub mod progression;
pub mod section;
pub mod tempo;
pub mod title;
pub mod vocabulary;

mod cascade;
mod markup;

pub use context::{summarize_essential_context, ESSENTIAL_CONTEXT_FALLBACK};
pub use key::extract_key;
pub use models::GuidebookParameters;
pub use progression::extract_chord_progression;
pub use section::{list_sections, locate_section, HeadingPattern, Section};
pub use tempo::extract_tempo;
pub use title::extract_suggested_title;
pub use vocabulary::{Quality, ScaleEntry, ScaleVocabulary, VocabularyError};
