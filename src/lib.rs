//! # Guidebook Extract
//!
//! Mines structured musical parameters out of generated song guidebooks.
//!
//! A guidebook is a Markdown document produced by a text model: numbered
//! `##` sections, bold list labels, and free prose. Downstream tools (an
//! arrangement/MIDI generator, a UI) need typed values out of it: a tempo,
//! a key from a known scale vocabulary, a chord progression, a title, and a
//! compact context string for follow-up prompts.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐   ┌──────────────────────┐   ┌──────────────┐
//! │  Guidebook  │──▶│  guidebook-extract-  │──▶│   Report     │
//! │ file/stdin  │   │  core (cascades,     │   │ text / JSON  │
//! │  or a dir   │   │  sections, keys)     │   │              │
//! └─────────────┘   └──────────────────────┘   └──────────────┘
//!        ▲                     ▲
//!        │                     │
//!   [scan] globs      [vocabulary] + [defaults]
//!        └──────── gbx.toml ───┘
//! ```
//!
//! The engine itself lives in [`guidebook_extract_core`] and is pure; this
//! crate adds configuration, file handling, batch scanning, and the `gbx`
//! CLI.
//!
//! ## Quick Start
//!
//! ```bash
//! gbx extract song.md                 # all fields, human-readable
//! gbx extract song.md --json          # all fields as JSON
//! gbx extract song.md --field tempo   # one bare value
//! gbx context song.md                 # overview + harmony sections
//! gbx scan ./guidebooks --output reports.json
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`document`] | Guidebook input (file or stdin) |
//! | [`report`] | Extraction reports and default substitution |
//! | [`extract_cmd`] | Single-guidebook commands |
//! | [`scan`] | Directory scanning |
//! | [`progress`] | Scan progress on stderr |
//! | [`scales`] | Vocabulary listing |
//! | [`logging`] | Tracing subscriber setup |

pub mod config;
pub mod document;
pub mod extract_cmd;
pub mod logging;
pub mod progress;
pub mod report;
pub mod scales;
pub mod scan;

pub use guidebook_extract_core as core;
