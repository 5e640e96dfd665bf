//! # Package Manifests
//!
//! Encodes a [`TestPackage`] tree to JSON or YAML and back. Encoding is
//! lossless: path, sub-package order and the settings key set survive a
//! round trip, so a tree can be handed across a process boundary.
//!
//! Both decoders stop at [`MAX_MANIFEST_NESTING`] levels of object/array
//! nesting. Every package level costs two (the package object and its
//! `sub_packages` array), so [`TestPackage::to_manifest`] refuses trees
//! that would encode deeper than the decoders accept.
//!
//! Decoding through [`TestPackage::from_manifest`] re-normalizes every
//! path, which lets hand-written manifests use paths relative to the
//! working directory. Plain `serde` decoding keeps paths as written.

use std::path::Path;

use serde_json::Value;

use crate::error::PackageError;
use crate::package::TestPackage;

/// Deepest object/array nesting the JSON and YAML decoders accept.
pub const MAX_MANIFEST_NESTING: usize = 127;

/// Manifest text format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ManifestFormat {
    Json,
    Yaml,
}

impl ManifestFormat {
    /// Pick a format from a file extension (`.json`, `.yaml`, `.yml`).
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }
}

impl std::str::FromStr for ManifestFormat {
    type Err = PackageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            other => Err(PackageError::Serialization(format!(
                "unknown manifest format: {other:?}"
            ))),
        }
    }
}

impl TestPackage {
    /// Encode this package tree as manifest text.
    ///
    /// # Errors
    ///
    /// Returns `PackageError::Serialization` when the tree, including any
    /// structured setting values, nests deeper than
    /// [`MAX_MANIFEST_NESTING`] and so could not be decoded again.
    pub fn to_manifest(&self, format: ManifestFormat) -> Result<String, PackageError> {
        let depth = nesting_depth(&serde_json::to_value(self)?);
        if depth > MAX_MANIFEST_NESTING {
            return Err(PackageError::Serialization(format!(
                "package nests {depth} levels deep, manifests decode at most {MAX_MANIFEST_NESTING}"
            )));
        }
        Ok(match format {
            ManifestFormat::Json => serde_json::to_string_pretty(self)?,
            ManifestFormat::Yaml => serde_yaml::to_string(self)?,
        })
    }

    /// Decode a package tree from manifest text, normalizing its paths.
    pub fn from_manifest(text: &str, format: ManifestFormat) -> Result<Self, PackageError> {
        let mut package: TestPackage = match format {
            ManifestFormat::Json => serde_json::from_str(text)?,
            ManifestFormat::Yaml => serde_yaml::from_str(text)?,
        };
        package.normalize_paths()?;
        Ok(package)
    }

    /// Read and decode a manifest file, choosing the format by extension.
    pub fn load_manifest(path: impl AsRef<Path>) -> Result<Self, PackageError> {
        let path = path.as_ref();
        let format = ManifestFormat::from_path(path).ok_or_else(|| {
            PackageError::Serialization(format!(
                "cannot infer manifest format from {}",
                path.display()
            ))
        })?;
        let text = std::fs::read_to_string(path)?;
        Self::from_manifest(&text, format)
    }
}

/// Deepest object/array nesting in `value`.
fn nesting_depth(value: &Value) -> usize {
    let mut deepest = 0;
    let mut stack = vec![(value, 0usize)];
    while let Some((node, depth)) = stack.pop() {
        let depth = depth + 1;
        match node {
            Value::Array(items) => stack.extend(items.iter().map(|child| (child, depth))),
            Value::Object(map) => stack.extend(map.values().map(|child| (child, depth))),
            _ => continue,
        }
        deepest = deepest.max(depth);
    }
    deepest
}
