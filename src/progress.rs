//! Scan progress reporting.
//!
//! `gbx scan` reports how many guidebooks it found, each file as it is
//! extracted (with how many of the four fields were recognized), every file
//! it had to skip, and a closing summary. Everything goes to **stderr** so
//! the JSON report on stdout stays parseable for scripts.

use serde::Serialize;
use std::fmt;
use std::io::Write;

/// Totals for one finished scan.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ScanSummary {
    pub root: String,
    /// Guidebooks matched by the include/exclude globs.
    pub found: u64,
    /// Reports produced.
    pub extracted: u64,
    /// Unreadable files and directories.
    pub skipped: u64,
    /// Reports in which no field was recognized.
    pub empty: u64,
    /// Where the JSON report was written; `None` for stdout.
    pub output: Option<String>,
}

impl fmt::Display for ScanSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Extracted {} guidebooks", self.extracted)?;
        if let Some(output) = &self.output {
            write!(f, " to {}", output)?;
        }
        write!(
            f,
            " ({} found, {} skipped, {} with no recognized fields)",
            self.found, self.skipped, self.empty
        )
    }
}

/// A single progress event for a scan. Serialized as one JSON object tagged
/// by `"event"`.
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ScanProgressEvent {
    /// The directory walk finished.
    Discovered { root: String, found: u64 },
    /// One guidebook was extracted.
    Extracted {
        path: String,
        n: u64,
        total: u64,
        /// Recognized fields out of title, tempo, key, and progression.
        fields: usize,
    },
    /// A file or directory could not be read.
    Skipped { path: String, reason: String },
    /// The scan is done and the report written.
    Finished(ScanSummary),
}

pub trait ScanProgressReporter {
    fn report(&self, event: ScanProgressEvent);
}

/// Human-friendly progress on stderr:
/// `[ 3/12] albums/one/opener.md  3/4 fields`.
pub struct StderrProgress;

impl ScanProgressReporter for StderrProgress {
    fn report(&self, event: ScanProgressEvent) {
        let line = match &event {
            ScanProgressEvent::Discovered { root, found } => {
                format!("scan {}  {} guidebooks\n", root, found)
            }
            ScanProgressEvent::Extracted {
                path,
                n,
                total,
                fields,
            } => {
                let width = total.to_string().len();
                format!("[{:>width$}/{}] {}  {}/4 fields\n", n, total, path, fields)
            }
            ScanProgressEvent::Skipped { path, reason } => {
                format!("skipped {}: {}\n", path, reason)
            }
            ScanProgressEvent::Finished(summary) => format!("{}\n", summary),
        };
        let mut stderr = std::io::stderr().lock();
        let _ = stderr.write_all(line.as_bytes());
        let _ = stderr.flush();
    }
}

/// Machine-readable progress: one JSON object per line on stderr.
pub struct JsonProgress;

impl ScanProgressReporter for JsonProgress {
    fn report(&self, event: ScanProgressEvent) {
        if let Ok(line) = serde_json::to_string(&event) {
            let _ = writeln!(std::io::stderr().lock(), "{}", line);
        }
    }
}

/// Prints only the closing summary. Used when per-file progress is off.
pub struct SummaryOnly;

impl ScanProgressReporter for SummaryOnly {
    fn report(&self, event: ScanProgressEvent) {
        if let ScanProgressEvent::Finished(summary) = event {
            let _ = writeln!(std::io::stderr().lock(), "{}", summary);
        }
    }
}

/// Discards every event.
pub struct NoProgress;

impl ScanProgressReporter for NoProgress {
    fn report(&self, _event: ScanProgressEvent) {}
}

/// Progress mode for `gbx scan --progress`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, clap::ValueEnum)]
pub enum ProgressMode {
    /// Summary line only.
    Off,
    Human,
    Json,
}

impl ProgressMode {
    /// Human progress when stderr is a TTY, otherwise summary only.
    pub fn default_for_tty() -> Self {
        if atty::is(atty::Stream::Stderr) {
            ProgressMode::Human
        } else {
            ProgressMode::Off
        }
    }

    pub fn reporter(&self) -> Box<dyn ScanProgressReporter> {
        match self {
            ProgressMode::Off => Box::new(SummaryOnly),
            ProgressMode::Human => Box::new(StderrProgress),
            ProgressMode::Json => Box::new(JsonProgress),
        }
    }
}
