// SPDX-License-Identifier: MPL-2.0
//! Dataset model: parameter dimensions and the tagged artifacts they describe.
//!
//! A dataset is loaded once (from a manifest or a directory scan) and treated
//! as read-only afterwards; exploring it never mutates it. Loading a new
//! dataset resets all derived state (roles, filters, slider overrides).

pub mod manifest;
pub mod scanner;

use crate::error::{Error, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Display/sort hint for a dimension's values. All comparisons are
/// string-based regardless of kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DimensionKind {
    Int,
    #[default]
    Str,
}

/// A named axis of variation with an ordered domain of string values.
///
/// Value order is significant and preserved exactly as supplied; it drives
/// axis ordering, scrub order and filter display order.
#[derive(Debug, Clone, PartialEq)]
pub struct Dimension {
    name: String,
    kind: DimensionKind,
    values: Vec<String>,
}

impl Dimension {
    pub fn new(
        name: impl Into<String>,
        kind: DimensionKind,
        values: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn kind(&self) -> DimensionKind {
        self.kind
    }

    #[must_use]
    pub fn values(&self) -> &[String] {
        &self.values
    }

    #[must_use]
    pub fn contains(&self, value: &str) -> bool {
        self.values.iter().any(|v| v == value)
    }

    /// First value of the domain, the conventional fallback for slider
    /// defaults and single-mode filters.
    #[must_use]
    pub fn first_value(&self) -> Option<&str> {
        self.values.first().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A single generated image, identified by its path relative to the dataset
/// root and tagged with one value per dimension.
#[derive(Debug, Clone, PartialEq)]
pub struct Artifact {
    relative_path: String,
    dimensions: HashMap<String, String>,
}

impl Artifact {
    pub fn new(
        relative_path: impl Into<String>,
        dimensions: impl IntoIterator<Item = (impl Into<String>, impl Into<String>)>,
    ) -> Self {
        Self {
            relative_path: relative_path.into(),
            dimensions: dimensions
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    #[must_use]
    pub fn relative_path(&self) -> &str {
        &self.relative_path
    }

    /// Tag value for the named dimension, if present.
    #[must_use]
    pub fn value(&self, dimension: &str) -> Option<&str> {
        self.dimensions.get(dimension).map(String::as_str)
    }
}

/// A loaded, validated dataset: dimensions plus the artifact collection.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dataset {
    root: PathBuf,
    dimensions: Vec<Dimension>,
    artifacts: Vec<Artifact>,
}

impl Dataset {
    /// Assembles a dataset, validating integrity: every artifact must carry
    /// a value for every known dimension, and that value must belong to the
    /// dimension's declared domain.
    pub fn new(
        root: impl Into<PathBuf>,
        dimensions: Vec<Dimension>,
        artifacts: Vec<Artifact>,
    ) -> Result<Self> {
        for artifact in &artifacts {
            for dimension in &dimensions {
                match artifact.value(dimension.name()) {
                    None => {
                        return Err(Error::Dataset(format!(
                            "artifact '{}' has no value for dimension '{}'",
                            artifact.relative_path(),
                            dimension.name()
                        )))
                    }
                    Some(value) if !dimension.contains(value) => {
                        return Err(Error::Dataset(format!(
                            "artifact '{}' has value '{}' outside the domain of dimension '{}'",
                            artifact.relative_path(),
                            value,
                            dimension.name()
                        )))
                    }
                    Some(_) => {}
                }
            }
        }

        Ok(Self {
            root: root.into(),
            dimensions,
            artifacts,
        })
    }

    /// Loads a dataset directory: `manifest.json` when present, otherwise a
    /// filename-tag scan.
    pub fn load(root: &Path) -> Result<Self> {
        let manifest_path = root.join(manifest::MANIFEST_FILE);
        if manifest_path.exists() {
            manifest::load(root)
        } else {
            scanner::scan(root)
        }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn dimensions(&self) -> &[Dimension] {
        &self.dimensions
    }

    #[must_use]
    pub fn dimension(&self, name: &str) -> Option<&Dimension> {
        self.dimensions.iter().find(|d| d.name() == name)
    }

    #[must_use]
    pub fn artifacts(&self) -> &[Artifact] {
        &self.artifacts
    }

    #[must_use]
    pub fn artifact(&self, index: usize) -> Option<&Artifact> {
        self.artifacts.get(index)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }

    /// Absolute path of an artifact's image file.
    #[must_use]
    pub fn resolve_path(&self, artifact: &Artifact) -> PathBuf {
        self.root.join(artifact.relative_path())
    }
}
