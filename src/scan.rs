//! Batch extraction over a directory of guidebooks.
//!
//! Walks a directory, keeps files matching `[scan].include_globs` and not
//! matching `[scan].exclude_globs`, and builds one [`ExtractionReport`] per
//! guidebook. Unreadable files and directories are reported and skipped;
//! one bad entry never aborts a scan.

use anyhow::{bail, Result};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use walkdir::WalkDir;

use crate::config::{build_globset, Config, ScanConfig};
use crate::document::read_guidebook;
use crate::progress::{ScanProgressEvent, ScanProgressReporter, ScanSummary};
use crate::report::ExtractionReport;

/// Result of walking a scan root.
#[derive(Debug, Default)]
pub struct Discovery {
    /// Guidebook paths relative to the root, sorted.
    pub paths: Vec<PathBuf>,
    /// Entries the walk could not read, with the reason.
    pub unreadable: Vec<(PathBuf, String)>,
}

/// Find every guidebook under `root`.
pub fn discover_guidebooks(root: &Path, scan: &ScanConfig) -> Result<Discovery> {
    if !root.is_dir() {
        bail!("Scan root is not a directory: {}", root.display());
    }

    let include_set = build_globset(&scan.include_globs)?;

    let mut default_excludes = vec![
        "**/.git/**".to_string(),
        "**/target/**".to_string(),
        "**/node_modules/**".to_string(),
    ];
    default_excludes.extend(scan.exclude_globs.clone());
    let exclude_set = build_globset(&default_excludes)?;

    let mut discovery = Discovery::default();
    let walker = WalkDir::new(root).follow_links(scan.follow_symlinks);
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                let path = e.path().unwrap_or(root);
                let relative = path.strip_prefix(root).unwrap_or(path).to_path_buf();
                warn!("cannot read {}: {}", relative.display(), e);
                discovery.unreadable.push((relative, e.to_string()));
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }

        let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
        let rel_str = relative.to_string_lossy().to_string();

        if exclude_set.is_match(&rel_str) {
            continue;
        }
        if !include_set.is_match(&rel_str) {
            continue;
        }
        discovery.paths.push(relative.to_path_buf());
    }

    discovery.paths.sort();
    Ok(discovery)
}

/// Reports from one scan plus its totals.
#[derive(Debug)]
pub struct ScanOutcome {
    pub reports: Vec<ExtractionReport>,
    pub summary: ScanSummary,
}

/// Extract every guidebook under `root`.
///
/// Report sources are paths relative to `root` so output is stable across
/// machines. The summary's `output` is left unset for the caller.
pub fn scan_directory(
    config: &Config,
    root: &Path,
    with_defaults: bool,
    progress: &dyn ScanProgressReporter,
) -> Result<ScanOutcome> {
    let vocabulary = config.vocabulary()?;
    let root_label = root.display().to_string();

    let discovery = discover_guidebooks(root, &config.scan)?;
    let total = discovery.paths.len() as u64;
    let mut summary = ScanSummary {
        root: root_label.clone(),
        found: total,
        ..ScanSummary::default()
    };

    progress.report(ScanProgressEvent::Discovered {
        root: root_label.clone(),
        found: total,
    });
    for (path, reason) in &discovery.unreadable {
        summary.skipped += 1;
        progress.report(ScanProgressEvent::Skipped {
            path: path.to_string_lossy().to_string(),
            reason: reason.clone(),
        });
    }

    let mut reports = Vec::with_capacity(discovery.paths.len());
    for (i, relative) in discovery.paths.iter().enumerate() {
        let source = relative.to_string_lossy().to_string();
        let mut guidebook = match read_guidebook(&root.join(relative)) {
            Ok(guidebook) => guidebook,
            Err(e) => {
                warn!("skipping {}: {:#}", source, e);
                summary.skipped += 1;
                progress.report(ScanProgressEvent::Skipped {
                    path: source,
                    reason: format!("{:#}", e),
                });
                continue;
            }
        };
        guidebook.source = source.clone();

        let report = ExtractionReport::build(&guidebook, &vocabulary);
        let fields = report.parameters.recognized_fields();
        if report.parameters.is_empty() {
            summary.empty += 1;
        }
        progress.report(ScanProgressEvent::Extracted {
            path: source,
            n: i as u64 + 1,
            total,
            fields,
        });
        reports.push(if with_defaults {
            report.with_defaults(&config.defaults)
        } else {
            report
        });
    }
    summary.extracted = reports.len() as u64;

    info!(
        root = %root_label,
        found = summary.found,
        extracted = summary.extracted,
        skipped = summary.skipped,
        empty = summary.empty,
        "scan complete"
    );
    Ok(ScanOutcome { reports, summary })
}

/// CLI entry point: scan `root` and write the reports as a JSON array to
/// `output`, or stdout when `output` is `None`. The summary goes to the
/// progress reporter last.
pub fn run_scan(
    config: &Config,
    root: &Path,
    output: Option<&Path>,
    with_defaults: bool,
    progress: &dyn ScanProgressReporter,
) -> Result<()> {
    let ScanOutcome {
        reports,
        mut summary,
    } = scan_directory(config, root, with_defaults, progress)?;
    let json = serde_json::to_string_pretty(&reports)?;

    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, &json)?;
            summary.output = Some(path.display().to_string());
        }
        None => {
            println!("{}", json);
        }
    }
    progress.report(ScanProgressEvent::Finished(summary));
    Ok(())
}
