use crate::entropy::{Base, Entropy};
use crate::report::{BatchEntry, Metrics, Report};
use crate::source::Source;
use rayon::prelude::*;
use std::path::PathBuf;
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Expand the given paths into regular files, walking directories recursively.
/// Paths that cannot be walked come back as `Err((path, message))`.
pub fn collect_files(paths: &[PathBuf]) -> Vec<Result<PathBuf, (PathBuf, String)>> {
    let mut out = Vec::new();
    for root in paths {
        for entry in WalkDir::new(root).follow_links(true).sort_by_file_name() {
            match entry {
                Ok(e) if e.file_type().is_file() => out.push(Ok(e.into_path())),
                Ok(_) => {}
                Err(e) => {
                    let p = e.path().map(|p| p.to_path_buf()).unwrap_or_else(|| root.clone());
                    out.push(Err((p, e.to_string())));
                }
            }
        }
    }
    out
}

/// Measure every file with its own accumulator, in parallel. Output is sorted by path.
pub fn measure_files(paths: &[PathBuf], base: Base, metrics: Metrics) -> Vec<BatchEntry> {
    let files = collect_files(paths);
    debug!(files = files.len(), "measuring batch");
    let mut entries: Vec<BatchEntry> = files
        .into_par_iter()
        .map(|item| match item {
            Ok(path) => measure_one(path, base, metrics),
            Err((path, msg)) => BatchEntry {
                path: path.display().to_string(),
                report: None,
                error: Some(msg),
            },
        })
        .collect();
    entries.sort_by(|a, b| a.path.cmp(&b.path));
    for e in entries.iter().filter(|e| e.is_err()) {
        warn!(path = %e.path, "skipped");
    }
    entries
}

fn measure_one(path: PathBuf, base: Base, metrics: Metrics) -> BatchEntry {
    let label = path.display().to_string();
    let result = Source::File(path).read().and_then(|bytes| {
        let entropy = Entropy::with_bytes(bytes, base);
        Report::measure(label.clone(), &entropy, metrics)
    });
    match result {
        Ok(r) => BatchEntry { path: label, report: Some(r), error: None },
        Err(e) => BatchEntry { path: label, report: None, error: Some(e.to_string()) },
    }
}
