//! Loading review inputs from files, stdin and the command line.

use anyhow::{Context, Result};
use prlint_core::{parse_changed_files, ChangeSet, FileStatus, ManifestDiff};
use std::fs;
use std::io::Read;
use std::path::Path;

/// Read the changed-file list.
///
/// `source` is a path or `-` for stdin. With no source and no extra paths the
/// list is read from stdin; extra paths are appended with unknown status.
pub fn read_change_list(
    source: Option<&str>,
    extra_paths: &[String],
) -> Result<Vec<(FileStatus, String)>> {
    let text = match source {
        Some("-") => read_stdin()?,
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read changed-file list {path}"))?,
        None if extra_paths.is_empty() => read_stdin()?,
        None => String::new(),
    };

    let mut entries = parse_changed_files(&text)?;
    entries.extend(
        extra_paths
            .iter()
            .map(|path| (FileStatus::Unknown, path.clone())),
    );
    Ok(entries)
}

fn read_stdin() -> Result<String> {
    let mut text = String::new();
    std::io::stdin()
        .read_to_string(&mut text)
        .context("failed to read changed-file list from stdin")?;
    Ok(text)
}

/// Where the manifest diff comes from
#[derive(Debug, Clone, Default)]
pub struct ManifestSources<'a> {
    pub before: Option<&'a str>,
    pub after: Option<&'a str>,
    pub diff: Option<&'a str>,
}

/// Load the manifest diff, but only when the manifest is part of the change
/// set. A pre-computed diff wins over a before/after document pair; with
/// neither available there is no diff.
pub fn load_manifest_diff(
    changes: &ChangeSet,
    sources: &ManifestSources<'_>,
) -> Result<Option<ManifestDiff>> {
    if !changes.manifest_changed() {
        tracing::debug!("manifest not modified, no version diff");
        return Ok(None);
    }

    if let Some(path) = sources.diff {
        let value = read_json(path)?;
        return Ok(Some(ManifestDiff::from_json(&value)));
    }

    match (sources.before, sources.after) {
        (Some(before), Some(after)) => {
            let before_text = fs::read_to_string(before)
                .with_context(|| format!("failed to read manifest {before}"))?;
            let after_text = fs::read_to_string(after)
                .with_context(|| format!("failed to read manifest {after}"))?;
            let diff = ManifestDiff::from_documents(&before_text, &after_text, Path::new(after))?;
            Ok(Some(diff))
        }
        _ => {
            tracing::debug!("manifest modified but no before/after documents given");
            Ok(None)
        }
    }
}

fn read_json(path: &str) -> Result<serde_json::Value> {
    let text = fs::read_to_string(path).with_context(|| format!("failed to read {path}"))?;
    serde_json::from_str(&text).with_context(|| format!("invalid JSON in {path}"))
}
