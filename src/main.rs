//! # Guidebook Extract CLI (`gbx`)
//!
//! Mines tempo, key, chord progression, title, and essential context from
//! generated song guidebooks.
//!
//! ## Usage
//!
//! ```bash
//! gbx [--config ./config/gbx.toml] [-v] <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `gbx extract <file>` | Extract every field (or one with `--field`) |
//! | `gbx context <file>` | Print the overview + harmony context summary |
//! | `gbx section <file> <heading>` | Print one `##` section |
//! | `gbx sections <file>` | List every top-level section |
//! | `gbx scan <dir>` | Extract every guidebook under a directory as JSON |
//! | `gbx scales` | List the configured scale vocabulary |
//! | `gbx completions <shell>` | Generate shell completions |
//!
//! `<file>` may be `-` to read from stdin.

use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

use guidebook_extract::progress::ProgressMode;
use guidebook_extract::{config, extract_cmd, logging, scales, scan};

/// Guidebook Extract — mine musical parameters from generated guidebooks.
#[derive(Parser)]
#[command(
    name = "gbx",
    about = "Guidebook Extract — mine tempo, key, chord progression, and context from generated song guidebooks",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Defaults to `./config/gbx.toml`; when that file does not exist the
    /// built-in vocabulary and defaults are used.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace). `RUST_LOG`
    /// takes precedence.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Extract parameters from one guidebook.
    ///
    /// Prints title, tempo, key, and chord progression. Absent fields are
    /// shown as "(not found)" unless `--with-defaults` fills them from the
    /// `[defaults]` config section.
    Extract {
        /// Guidebook path, or `-` for stdin.
        input: PathBuf,

        /// Print only this field's bare value. Exits with status 1 when absent.
        #[arg(long, value_enum, conflicts_with_all = ["json", "with_defaults"])]
        field: Option<extract_cmd::Field>,

        /// Emit the report as JSON.
        #[arg(long)]
        json: bool,

        /// Fill absent tempo, key, and chord progression from `[defaults]`.
        #[arg(long)]
        with_defaults: bool,
    },

    /// Print the essential context (song overview + harmony core sections).
    Context {
        /// Guidebook path, or `-` for stdin.
        input: PathBuf,
    },

    /// Print a single section, from its heading up to the next `## ` heading.
    ///
    /// Exits with status 1 when the heading is not found.
    Section {
        /// Guidebook path, or `-` for stdin.
        input: PathBuf,

        /// Heading text, matched case-insensitively at the start of a line
        /// (e.g. `"## 3."`).
        heading: String,

        /// Treat the heading as a regular expression.
        #[arg(long)]
        regex: bool,
    },

    /// List every top-level section with byte offsets.
    Sections {
        /// Guidebook path, or `-` for stdin.
        input: PathBuf,
    },

    /// Extract every guidebook under a directory.
    ///
    /// Files are selected with `[scan].include_globs` / `exclude_globs`.
    /// Reports are written as a JSON array.
    Scan {
        /// Directory to scan.
        root: PathBuf,

        /// Write the JSON report here instead of stdout.
        #[arg(long)]
        output: Option<PathBuf>,

        /// Fill absent fields from `[defaults]`.
        #[arg(long)]
        with_defaults: bool,

        /// Progress on stderr. Defaults to `human` on a TTY, otherwise `off`.
        #[arg(long, value_enum)]
        progress: Option<ProgressMode>,
    },

    /// List the configured scale vocabulary.
    Scales,

    /// Generate shell completions.
    Completions {
        /// Target shell.
        shell: clap_complete::Shell,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    // Commands that don't require config
    if let Commands::Completions { shell } = &cli.command {
        clap_complete::generate(*shell, &mut Cli::command(), "gbx", &mut std::io::stdout());
        return Ok(());
    }

    let cfg = config::resolve_config(cli.config.as_deref())?;

    let found = match cli.command {
        Commands::Extract {
            input,
            field,
            json,
            with_defaults,
        } => extract_cmd::run_extract(&cfg, &input, field, json, with_defaults)?,
        Commands::Context { input } => {
            extract_cmd::run_context(&input)?;
            true
        }
        Commands::Section {
            input,
            heading,
            regex,
        } => extract_cmd::run_section(&input, &heading, regex)?,
        Commands::Sections { input } => {
            extract_cmd::run_sections(&input)?;
            true
        }
        Commands::Scan {
            root,
            output,
            with_defaults,
            progress,
        } => {
            let mode = progress.unwrap_or_else(ProgressMode::default_for_tty);
            let reporter = mode.reporter();
            scan::run_scan(&cfg, &root, output.as_deref(), with_defaults, reporter.as_ref())?;
            true
        }
        Commands::Scales => {
            scales::list_scales(&cfg)?;
            true
        }
        Commands::Completions { .. } => {
            // Handled above (before config loading)
            unreachable!()
        }
    };

    if !found {
        std::process::exit(1);
    }
    Ok(())
}
