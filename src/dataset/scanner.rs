// SPDX-License-Identifier: MPL-2.0
//! Filename-tag dataset scanning.
//!
//! Without a manifest, a dataset directory is scanned for supported image
//! files whose stems encode their tags as `key-value` segments joined by
//! underscores, e.g. `seed-42_step-500_cfg-3.png`. Files are sorted by name
//! before tag extraction, so dimension and value order is first-seen order
//! over the sorted listing.

use super::{Artifact, Dataset, Dimension, DimensionKind};
use crate::error::{Error, Result};
use std::collections::HashMap;
use std::path::Path;

const SUPPORTED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "bmp"];

const TAG_SEPARATOR: char = '_';
const KEY_VALUE_SEPARATOR: char = '-';

/// Scans `root` for tagged image files and assembles a dataset.
///
/// Files whose stems carry no `key-value` segments at all (sidecars,
/// thumbnails) are skipped with a warning. A tagged file missing a key that
/// other files carry is a data-integrity error, surfaced by the final
/// `Dataset::new` validation.
pub fn scan(root: &Path) -> Result<Dataset> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(root)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_file() && is_supported_image(&path) {
            files.push(path);
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    // First-seen orders for dimension names and their values.
    let mut dimension_order: Vec<String> = Vec::new();
    let mut value_orders: HashMap<String, Vec<String>> = HashMap::new();
    let mut artifacts = Vec::new();

    for path in &files {
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        let tags = parse_stem(stem);
        if tags.is_empty() {
            tracing::warn!(file = %path.display(), "skipping untagged file");
            continue;
        }

        for (key, value) in &tags {
            if !dimension_order.iter().any(|k| k == key) {
                dimension_order.push(key.clone());
            }
            let values = value_orders.entry(key.clone()).or_default();
            if !values.iter().any(|v| v == value) {
                values.push(value.clone());
            }
        }

        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| Error::Dataset(format!("non-UTF-8 file name: {}", path.display())))?;
        artifacts.push(Artifact::new(file_name, tags));
    }

    let dimensions = dimension_order
        .into_iter()
        .map(|name| {
            let values = value_orders.remove(&name).unwrap_or_default();
            let kind = infer_kind(&values);
            Dimension::new(name, kind, values)
        })
        .collect();

    let dataset = Dataset::new(root, dimensions, artifacts)?;
    tracing::info!(
        root = %root.display(),
        dimensions = dataset.dimensions().len(),
        artifacts = dataset.artifacts().len(),
        "scanned dataset directory"
    );
    Ok(dataset)
}

/// Splits a file stem into `(key, value)` tags. Segments without a
/// key-value separator are ignored.
fn parse_stem(stem: &str) -> Vec<(String, String)> {
    stem.split(TAG_SEPARATOR)
        .filter_map(|segment| {
            let (key, value) = segment.split_once(KEY_VALUE_SEPARATOR)?;
            if key.is_empty() || value.is_empty() {
                return None;
            }
            Some((key.to_string(), value.to_string()))
        })
        .collect()
}

fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|s| ext.eq_ignore_ascii_case(s))
        })
}

fn infer_kind(values: &[String]) -> DimensionKind {
    if !values.is_empty() && values.iter().all(|v| v.parse::<i64>().is_ok()) {
        DimensionKind::Int
    } else {
        DimensionKind::Str
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn create_file(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, b"fake image data").expect("failed to write test file");
        path
    }

    #[test]
    fn parse_stem_extracts_key_value_pairs() {
        let tags = parse_stem("seed-42_step-500_cfg-3");
        assert_eq!(
            tags,
            vec![
                ("seed".to_string(), "42".to_string()),
                ("step".to_string(), "500".to_string()),
                ("cfg".to_string(), "3".to_string()),
            ]
        );
    }

    #[test]
    fn parse_stem_ignores_separator_less_segments() {
        assert!(parse_stem("thumbnail").is_empty());
        assert_eq!(parse_stem("final_seed-42").len(), 1);
    }

    #[test]
    fn scan_builds_dimensions_in_first_seen_order() {
        let dir = tempdir().expect("failed to create temp dir");
        create_file(dir.path(), "seed-42_step-500.png");
        create_file(dir.path(), "seed-42_step-1000.png");
        create_file(dir.path(), "seed-123_step-500.png");
        create_file(dir.path(), "seed-123_step-1000.png");

        let dataset = scan(dir.path()).expect("scan should succeed");

        assert_eq!(dataset.dimensions().len(), 2);
        let seed = dataset.dimension("seed").expect("seed dimension");
        // Files sort alphabetically: seed-123_* before seed-42_*.
        assert_eq!(seed.values(), ["123", "42"]);
        assert_eq!(seed.kind(), DimensionKind::Int);
        assert_eq!(dataset.artifacts().len(), 4);
    }

    #[test]
    fn scan_skips_untagged_and_unsupported_files() {
        let dir = tempdir().expect("failed to create temp dir");
        create_file(dir.path(), "seed-42.png");
        create_file(dir.path(), "thumbnail.png");
        create_file(dir.path(), "notes.txt");

        let dataset = scan(dir.path()).expect("scan should succeed");
        assert_eq!(dataset.artifacts().len(), 1);
    }

    #[test]
    fn scan_rejects_file_missing_a_shared_key() {
        let dir = tempdir().expect("failed to create temp dir");
        create_file(dir.path(), "seed-42_step-500.png");
        create_file(dir.path(), "seed-123.png");

        assert!(matches!(scan(dir.path()), Err(Error::Dataset(_))));
    }

    #[test]
    fn scan_infers_string_kind_for_mixed_values() {
        let dir = tempdir().expect("failed to create temp dir");
        create_file(dir.path(), "sampler-euler_seed-42.png");
        create_file(dir.path(), "sampler-ddim_seed-123.png");

        let dataset = scan(dir.path()).expect("scan should succeed");
        let sampler = dataset.dimension("sampler").expect("sampler dimension");
        assert_eq!(sampler.kind(), DimensionKind::Str);
        let seed = dataset.dimension("seed").expect("seed dimension");
        assert_eq!(seed.kind(), DimensionKind::Int);
    }

    #[test]
    fn scan_of_empty_directory_yields_empty_dataset() {
        let dir = tempdir().expect("failed to create temp dir");
        let dataset = scan(dir.path()).expect("scan should succeed");
        assert!(dataset.is_empty());
        assert!(dataset.dimensions().is_empty());
    }
}
