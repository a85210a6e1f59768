//! Structured diffs of the package manifest and version comparison.

use crate::error::{PrlintError, Result};
use semver::Version;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;

/// Before/after values of one top-level manifest key
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValueChange {
    #[serde(default)]
    pub before: Option<Value>,
    #[serde(default)]
    pub after: Option<Value>,
}

/// The `version` field's before/after strings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionDiff {
    pub before: Option<String>,
    pub after: Option<String>,
}

impl VersionDiff {
    /// True only when both sides parse and `after` has higher precedence
    pub fn is_bump(&self) -> bool {
        match (self.before.as_deref(), self.after.as_deref()) {
            (Some(before), Some(after)) => is_version_bump(before, after),
            _ => false,
        }
    }
}

/// Key-level diff of a JSON manifest, keyed by the top-level keys that changed
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ManifestDiff {
    changes: BTreeMap<String, ValueChange>,
}

impl ManifestDiff {
    /// Compare two manifest documents. Keys whose values are equal on both
    /// sides are left out; non-object documents contribute no keys.
    pub fn between(before: &Value, after: &Value) -> Self {
        let empty = serde_json::Map::new();
        let before_map = before.as_object().unwrap_or(&empty);
        let after_map = after.as_object().unwrap_or(&empty);

        let mut changes = BTreeMap::new();
        for key in before_map.keys().chain(after_map.keys()) {
            if changes.contains_key(key) {
                continue;
            }
            let old = before_map.get(key);
            let new = after_map.get(key);
            if old != new {
                changes.insert(
                    key.clone(),
                    ValueChange {
                        before: old.cloned(),
                        after: new.cloned(),
                    },
                );
            }
        }

        Self { changes }
    }

    /// Accept an already computed diff of the form
    /// `{"version": {"before": "1.0.0", "after": "1.1.0"}}`.
    /// Entries that are not before/after objects are ignored.
    pub fn from_json(value: &Value) -> Self {
        let changes = value
            .as_object()
            .map(|map| {
                map.iter()
                    .filter_map(|(key, entry)| {
                        serde_json::from_value::<ValueChange>(entry.clone())
                            .ok()
                            .map(|change| (key.clone(), change))
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self { changes }
    }

    pub fn from_documents(before: &str, after: &str, origin: &Path) -> Result<Self> {
        let parse = |text: &str| {
            serde_json::from_str::<Value>(text).map_err(|source| PrlintError::Json {
                path: origin.to_path_buf(),
                source,
            })
        };
        Ok(Self::between(&parse(before)?, &parse(after)?))
    }

    pub fn get(&self, key: &str) -> Option<&ValueChange> {
        self.changes.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.changes.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// The version change, if the `version` key changed. Non-string values
    /// are treated as absent.
    pub fn version(&self) -> Option<VersionDiff> {
        let change = self.changes.get("version")?;
        let as_string = |value: &Option<Value>| {
            value
                .as_ref()
                .and_then(Value::as_str)
                .map(str::to_string)
        };
        Some(VersionDiff {
            before: as_string(&change.before),
            after: as_string(&change.after),
        })
    }
}

/// Parse a semantic version, tolerating surrounding whitespace and a leading
/// `v` or `=`.
pub fn parse_version(raw: &str) -> Option<Version> {
    let trimmed = raw.trim();
    let trimmed = trimmed
        .strip_prefix('v')
        .or_else(|| trimmed.strip_prefix('='))
        .unwrap_or(trimmed);
    Version::parse(trimmed).ok()
}

/// True if `after` has strictly higher SemVer precedence than `before`.
/// Unparseable input on either side is never a bump.
pub fn is_version_bump(before: &str, after: &str) -> bool {
    match (parse_version(before), parse_version(after)) {
        // Build metadata is ignored; an empty pre-release outranks any other
        (Some(old), Some(new)) => {
            (new.major, new.minor, new.patch, &new.pre) > (old.major, old.minor, old.patch, &old.pre)
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plain_semver_comparisons() {
        assert!(is_version_bump("1.0.0", "1.1.0"));
        assert!(is_version_bump("0.9.9", "1.0.0"));
        assert!(!is_version_bump("1.1.0", "1.0.0"));
        assert!(!is_version_bump("1.0.0", "1.0.0"));
    }

    #[test]
    fn test_prerelease_and_prefixes() {
        assert!(is_version_bump("2.0.0-beta.1", "2.0.0"));
        assert!(is_version_bump("2.0.0-beta.1", "2.0.0-beta.2"));
        assert!(!is_version_bump("2.0.0", "2.0.0-rc.1"));
        assert!(is_version_bump(" v1.2.3 ", "=1.2.4"));
        // Build metadata does not affect precedence
        assert!(!is_version_bump("1.0.0+build.1", "1.0.0+build.2"));
    }

    #[test]
    fn test_malformed_versions_never_bump() {
        assert!(!is_version_bump("not-a-version", "1.0.0"));
        assert!(!is_version_bump("1.0.0", "1.0"));
        assert!(!is_version_bump("", ""));
    }

    #[test]
    fn test_between_keeps_only_changed_keys() {
        let before = json!({"name": "styled-components", "version": "1.0.0", "private": true});
        let after = json!({"name": "styled-components", "version": "1.1.0", "main": "lib/index.js"});
        let diff = ManifestDiff::between(&before, &after);

        let keys: Vec<_> = diff.keys().collect();
        assert_eq!(keys, vec!["main", "private", "version"]);
        assert_eq!(diff.get("private").unwrap().after, None);
        assert_eq!(
            diff.version(),
            Some(VersionDiff {
                before: Some("1.0.0".to_string()),
                after: Some("1.1.0".to_string()),
            })
        );
    }

    #[test]
    fn test_unchanged_version_is_absent() {
        let doc = json!({"version": "3.0.0"});
        assert!(ManifestDiff::between(&doc, &doc).version().is_none());
        assert!(ManifestDiff::between(&json!([1, 2]), &json!("x")).is_empty());
    }

    #[test]
    fn test_from_json_diff() {
        let diff = ManifestDiff::from_json(&json!({
            "version": {"before": "1.0.0", "after": 7},
            "scripts": "not a change record"
        }));

        let version = diff.version().unwrap();
        assert_eq!(version.before.as_deref(), Some("1.0.0"));
        assert_eq!(version.after, None);
        assert!(!version.is_bump());
    }

    #[test]
    fn test_from_documents_reports_json_errors() {
        let err = ManifestDiff::from_documents("{}", "{", Path::new("package.json")).unwrap_err();
        assert!(matches!(err, PrlintError::Json { .. }));
    }
}
