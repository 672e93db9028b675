// SPDX-License-Identifier: MPL-2.0
//! Manifest-based dataset loading.
//!
//! A `manifest.json` at the dataset root declares the dimensions (with their
//! authoritative value order) and the artifact list explicitly. The manifest
//! wins over filename conventions whenever both are present.

use super::{Artifact, Dataset, Dimension, DimensionKind};
use crate::error::Result;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

pub const MANIFEST_FILE: &str = "manifest.json";

#[derive(Debug, Deserialize)]
struct ManifestFile {
    dimensions: Vec<ManifestDimension>,
    artifacts: Vec<ManifestArtifact>,
}

#[derive(Debug, Deserialize)]
struct ManifestDimension {
    name: String,
    #[serde(rename = "type", default)]
    kind: ManifestKind,
    values: Vec<String>,
}

#[derive(Debug, Clone, Copy, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
enum ManifestKind {
    Int,
    #[default]
    String,
}

impl From<ManifestKind> for DimensionKind {
    fn from(kind: ManifestKind) -> Self {
        match kind {
            ManifestKind::Int => DimensionKind::Int,
            ManifestKind::String => DimensionKind::Str,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ManifestArtifact {
    path: String,
    dimensions: HashMap<String, String>,
}

/// Loads and validates the manifest at `root`.
pub fn load(root: &Path) -> Result<Dataset> {
    let content = fs::read_to_string(root.join(MANIFEST_FILE))?;
    let manifest: ManifestFile = serde_json::from_str(&content)?;

    let dimensions = manifest
        .dimensions
        .into_iter()
        .map(|d| Dimension::new(d.name, d.kind.into(), d.values))
        .collect();

    let artifacts = manifest
        .artifacts
        .into_iter()
        .map(|a| Artifact::new(a.path, a.dimensions))
        .collect();

    let dataset = Dataset::new(root, dimensions, artifacts)?;
    tracing::info!(
        root = %root.display(),
        dimensions = dataset.dimensions().len(),
        artifacts = dataset.artifacts().len(),
        "loaded dataset manifest"
    );
    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use tempfile::tempdir;

    fn write_manifest(dir: &Path, content: &str) {
        fs::write(dir.join(MANIFEST_FILE), content).expect("failed to write manifest");
    }

    const VALID_MANIFEST: &str = r#"{
        "dimensions": [
            {"name": "seed", "type": "int", "values": ["42", "123"]},
            {"name": "sampler", "values": ["euler", "ddim"]}
        ],
        "artifacts": [
            {"path": "a.png", "dimensions": {"seed": "42", "sampler": "euler"}},
            {"path": "b.png", "dimensions": {"seed": "123", "sampler": "ddim"}}
        ]
    }"#;

    #[test]
    fn load_parses_dimensions_and_artifacts() {
        let dir = tempdir().expect("failed to create temp dir");
        write_manifest(dir.path(), VALID_MANIFEST);

        let dataset = load(dir.path()).expect("manifest should load");

        assert_eq!(dataset.dimensions().len(), 2);
        let seed = dataset.dimension("seed").expect("seed dimension");
        assert_eq!(seed.kind(), DimensionKind::Int);
        assert_eq!(seed.values(), ["42", "123"]);

        let sampler = dataset.dimension("sampler").expect("sampler dimension");
        assert_eq!(sampler.kind(), DimensionKind::Str);
        assert_eq!(dataset.artifacts().len(), 2);
    }

    #[test]
    fn load_preserves_declared_value_order() {
        let dir = tempdir().expect("failed to create temp dir");
        write_manifest(
            dir.path(),
            r#"{
                "dimensions": [{"name": "step", "type": "int", "values": ["1000", "250", "500"]}],
                "artifacts": [{"path": "a.png", "dimensions": {"step": "500"}}]
            }"#,
        );

        let dataset = load(dir.path()).expect("manifest should load");
        let step = dataset.dimension("step").expect("step dimension");
        assert_eq!(step.values(), ["1000", "250", "500"]);
    }

    #[test]
    fn load_rejects_artifact_with_undeclared_value() {
        let dir = tempdir().expect("failed to create temp dir");
        write_manifest(
            dir.path(),
            r#"{
                "dimensions": [{"name": "seed", "values": ["42"]}],
                "artifacts": [{"path": "a.png", "dimensions": {"seed": "7"}}]
            }"#,
        );

        assert!(matches!(load(dir.path()), Err(Error::Dataset(_))));
    }

    #[test]
    fn load_rejects_malformed_json() {
        let dir = tempdir().expect("failed to create temp dir");
        write_manifest(dir.path(), "{not json");

        assert!(matches!(load(dir.path()), Err(Error::Dataset(_))));
    }
}
