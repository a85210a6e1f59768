use crate::classifier::FileClassifier;
use crate::config::ReviewConfig;
use crate::manifest::ManifestDiff;
use crate::reader::InMemoryContentReader;
use crate::types::{ChangeSet, ReviewContext};

/// Context over bare paths with the default layout and no file contents
pub fn context(paths: &[&str]) -> ReviewContext {
    context_with_reader(paths, InMemoryContentReader::new())
}

pub fn context_with_reader(paths: &[&str], reader: InMemoryContentReader) -> ReviewContext {
    let classifier = FileClassifier::new(&ReviewConfig::default().files);
    let changes = ChangeSet::from_paths(paths.iter().copied(), &classifier);
    ReviewContext::new(changes, Box::new(reader))
}

pub fn context_with_diff(paths: &[&str], diff: ManifestDiff) -> ReviewContext {
    context(paths).with_manifest_diff(Some(diff))
}
