//! Artifact persistence with deterministic output paths.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, Utc};
use tracing::info;

/// Filename of the fixed, well-known analysis report.
const REPORT_FILENAME: &str = "PROJECT_ANALYSIS.md";

/// Map a target language name to a script file extension.
pub fn extension_for(language: &str) -> &'static str {
    match language.to_ascii_lowercase().as_str() {
        "python" | "python3" => "py",
        "bash" | "shell" | "sh" => "sh",
        "rust" => "rs",
        "javascript" | "node" => "js",
        _ => "txt",
    }
}

/// Filename for a generated script: sortable timestamp plus language extension.
pub fn generated_filename(now: DateTime<Utc>, language: &str) -> String {
    format!(
        "generated_{}.{}",
        now.format("%Y%m%d_%H%M%S"),
        extension_for(language)
    )
}

/// Derive the improved-artifact path: `_improved` inserted before the
/// source's extension, so repeated improve calls overwrite the same file.
pub fn improved_path(source: &Path) -> PathBuf {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match source.extension() {
        Some(ext) => format!("{stem}_improved.{}", ext.to_string_lossy()),
        None => format!("{stem}_improved"),
    };
    source.with_file_name(name)
}

/// Fixed report location under the output directory.
pub fn report_path(out_dir: &Path) -> PathBuf {
    out_dir.join(REPORT_FILENAME)
}

/// Write a generated script under `out_dir`, returning the new path.
///
/// The timestamped filename keeps successive generations from colliding.
pub fn write_generated(out_dir: &Path, language: &str, code: &str) -> Result<PathBuf> {
    let path = out_dir.join(generated_filename(Utc::now(), language));
    write_atomic(&path, code)?;
    info!(path = %path.display(), "generated script written");
    Ok(path)
}

/// Write the improved version of `source` next to it (last write wins).
pub fn write_improved(source: &Path, code: &str) -> Result<PathBuf> {
    let path = improved_path(source);
    write_atomic(&path, code)?;
    info!(path = %path.display(), "improved script written");
    Ok(path)
}

/// Write the analysis report to its fixed path, replacing any previous one.
pub fn write_report(out_dir: &Path, contents: &str) -> Result<PathBuf> {
    let path = report_path(out_dir);
    write_atomic(&path, contents)?;
    info!(path = %path.display(), "analysis report written");
    Ok(path)
}

/// Write `contents` via temp file + rename so a partially-written artifact
/// is never visible at the target path.
pub(crate) fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).with_context(|| format!("create directory {}", parent.display()))?;
    let mut tmp_name = path
        .file_name()
        .ok_or_else(|| anyhow!("artifact path {} has no file name", path.display()))?
        .to_os_string();
    tmp_name.push(".tmp");
    let tmp_path = path.with_file_name(tmp_name);
    fs::write(&tmp_path, contents)
        .with_context(|| format!("write temp artifact {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| format!("replace {}", path.display()))?;
    Ok(())
}
