//! Reading caller-provided source files and analysis-stage inputs.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::warn;

/// Read the source file a task is centered on.
///
/// Failure is terminal for the caller; there is no degraded output for a
/// task whose whole input is missing.
pub fn read_source(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("read source {}", path.display()))
}

/// Read a sample file for an analysis stage, degrading to a placeholder.
///
/// A missing or unreadable sample must not abort the workflow; the
/// placeholder records the failure in the stage input instead.
pub fn read_excerpt_or_placeholder(path: &Path) -> String {
    match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) => {
            warn!(path = %path.display(), err = %err, "sample unreadable, using placeholder");
            format!("[unable to read {}]", path.display())
        }
    }
}

/// Deterministic one-level listing of `root`, used as the
/// structure-analysis input. Directories are suffixed with `/`.
pub fn summarize_root(root: &Path) -> String {
    let entries = match fs::read_dir(root) {
        Ok(entries) => entries,
        Err(err) => {
            warn!(root = %root.display(), err = %err, "root unreadable, using placeholder");
            return format!("[unable to read {}]", root.display());
        }
    };

    let mut lines = Vec::new();
    for entry in entries.flatten() {
        let name = entry.file_name().to_string_lossy().into_owned();
        let is_dir = entry.file_type().map(|kind| kind.is_dir()).unwrap_or(false);
        lines.push(if is_dir { format!("{name}/") } else { name });
    }
    lines.sort();

    let mut summary = format!("{}/", root.display());
    for line in &lines {
        summary.push_str("\n  ");
        summary.push_str(line);
    }
    summary
}
