//! Changed-file list parsing.
//!
//! Accepts either one bare path per line or the records printed by
//! `git diff --name-status`:
//!
//! ```text
//! M	src/StyledComponent.js
//! A	src/test/basic.test.js
//! R087	src/old.js	src/new.js
//! ```

use crate::error::{PrlintError, Result};
use crate::types::FileStatus;

/// Parse a changed-file list into `(status, path)` pairs in input order.
/// Blank lines and `#` comments are ignored.
pub fn parse_changed_files(text: &str) -> Result<Vec<(FileStatus, String)>> {
    let mut entries = Vec::new();

    for (index, raw_line) in text.lines().enumerate() {
        let line = raw_line.trim_end_matches('\r');
        if line.trim().is_empty() || line.trim_start().starts_with('#') {
            continue;
        }

        if !line.contains('\t') {
            entries.push((FileStatus::Unknown, line.trim().to_string()));
            continue;
        }

        entries.push(parse_status_record(line, index + 1)?);
    }

    Ok(entries)
}

fn parse_status_record(line: &str, line_number: usize) -> Result<(FileStatus, String)> {
    let malformed = || PrlintError::ChangeRecord {
        line: line_number,
        record: line.to_string(),
    };

    let fields: Vec<&str> = line.split('\t').collect();
    let code = fields[0].trim();
    let status_letter = code.chars().next().ok_or_else(malformed)?;

    let non_empty = |position: usize| {
        fields
            .get(position)
            .map(|field| field.trim())
            .filter(|field| !field.is_empty())
            .map(str::to_string)
    };

    match status_letter {
        'R' | 'C' => {
            let from = non_empty(1).ok_or_else(malformed)?;
            let to = non_empty(2).ok_or_else(malformed)?;
            let status = if status_letter == 'R' {
                FileStatus::Renamed { from }
            } else {
                FileStatus::Copied { from }
            };
            Ok((status, to))
        }
        _ => {
            let path = non_empty(1).ok_or_else(malformed)?;
            let status = match status_letter {
                'A' => FileStatus::Added,
                'M' => FileStatus::Modified,
                'D' => FileStatus::Deleted,
                _ => FileStatus::Unknown,
            };
            Ok((status, path))
        }
    }
}
