//! # Test Package: A Named Set of Tests to Run
//!
//! A [`TestPackage`] describes what a runner should load: either a single
//! test assembly or project file identified by path, or an anonymous
//! grouping of sub-packages. Every node also carries a map of settings
//! configuring how its assemblies are loaded and run.
//!
//! ## Shape
//!
//! ```text
//! <anonymous>                      settings: {ProcessModel: Separate}
//!   ├── /work/a.dll                (leaf)
//!   └── <anonymous>
//!         ├── /work/b.dll          (leaf)
//!         └── /work/c.dll          (leaf)
//! ```
//!
//! [`TestPackage::assemblies`] flattens this to `[a.dll, b.dll, c.dll]`.
//! Only leaves contribute. A container never contributes its own path,
//! even when it has one.
//!
//! ## Invariants
//!
//! - `file_path` is absolute and lexically normalized, set once at
//!   construction and never changed afterwards.
//! - `name` is derived from `file_path`, never stored.
//! - Children are append-only and settings are insert-or-overwrite; there
//!   is no removal.
//! - Children are owned, so a package tree cannot contain a cycle. Adding
//!   a clone of one package under two parents is allowed and yields its
//!   leaves twice when flattened.
//!
//! ## Concurrency
//!
//! `TestPackage` is a plain value with no interior synchronization. Build
//! it from a single owner; callers that share a tree mutably across
//! threads must serialize access themselves (e.g. behind a `Mutex`).

use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::PackageError;
use crate::setting::{FromSetting, SettingValue};

/// A test package: an optional assembly path, ordered sub-packages, and
/// named settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TestPackage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    file_path: Option<String>,
    #[serde(default, rename = "sub_packages", skip_serializing_if = "Vec::is_empty")]
    children: Vec<TestPackage>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    settings: BTreeMap<String, SettingValue>,
}

impl TestPackage {
    /// An anonymous package with no path, no children and no settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// A leaf package bound to a single assembly or project file.
    ///
    /// The path is resolved against the current working directory and
    /// lexically normalized. Existence is not checked.
    ///
    /// # Errors
    ///
    /// Returns `PackageError::InvalidPath` if the path is empty, contains
    /// a NUL byte, is not valid UTF-8, or cannot be made absolute.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, PackageError> {
        Ok(Self {
            file_path: Some(normalize_path(path.as_ref())?),
            ..Self::default()
        })
    }

    /// An anonymous package holding one leaf per path, in input order.
    ///
    /// Fails on the first path that cannot be normalized.
    pub fn from_paths<I, P>(paths: I) -> Result<Self, PackageError>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut package = Self::new();
        for path in paths {
            package.add_path(path)?;
        }
        Ok(package)
    }

    /// File-name component of the package path, if the package has one.
    pub fn name(&self) -> Option<&str> {
        self.file_path
            .as_deref()
            .and_then(|p| Path::new(p).file_name())
            .and_then(|n| n.to_str())
    }

    /// The normalized path this package was constructed with.
    pub fn file_path(&self) -> Option<&str> {
        self.file_path.as_deref()
    }

    /// Sub-packages in insertion order.
    pub fn children(&self) -> &[TestPackage] {
        &self.children
    }

    /// Whether this package groups sub-packages.
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Whether this package has no sub-packages.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Append a sub-package. A leaf becomes a container on its first child.
    pub fn add(&mut self, child: TestPackage) {
        self.children.push(child);
    }

    /// Append a leaf sub-package for `path` and return it for further
    /// configuration.
    pub fn add_path(&mut self, path: impl AsRef<Path>) -> Result<&mut TestPackage, PackageError> {
        let child = Self::from_path(path)?;
        let idx = self.children.len();
        self.children.push(child);
        Ok(&mut self.children[idx])
    }

    /// Leaf packages in depth-first, position order.
    pub fn leaves(&self) -> Leaves<'_> {
        Leaves { stack: vec![self] }
    }

    /// Assembly paths to load, one entry per leaf.
    ///
    /// A leaf with no path yields a `None` placeholder; packages built
    /// through [`TestPackage::from_path`] and [`TestPackage::from_paths`]
    /// never produce one. Use [`TestPackage::assembly_paths`] to skip
    /// placeholders.
    pub fn assemblies(&self) -> Vec<Option<&str>> {
        self.leaves().map(TestPackage::file_path).collect()
    }

    /// Assembly paths of all leaves that have one.
    pub fn assembly_paths(&self) -> Vec<&str> {
        self.leaves().filter_map(TestPackage::file_path).collect()
    }

    /// Settings attached to this package node.
    pub fn settings(&self) -> &BTreeMap<String, SettingValue> {
        &self.settings
    }

    /// Mutable access to the settings map for bulk edits.
    pub fn settings_mut(&mut self) -> &mut BTreeMap<String, SettingValue> {
        &mut self.settings
    }

    /// The raw stored value for `name`, if any.
    pub fn setting(&self, name: &str) -> Option<&SettingValue> {
        self.settings.get(name)
    }

    /// Insert or overwrite a setting, returning the previous value.
    pub fn set_setting(
        &mut self,
        name: impl Into<String>,
        value: impl Into<SettingValue>,
    ) -> Option<SettingValue> {
        self.settings.insert(name.into(), value.into())
    }

    /// Builder form of [`TestPackage::set_setting`].
    pub fn with_setting(mut self, name: impl Into<String>, value: impl Into<SettingValue>) -> Self {
        self.set_setting(name, value);
        self
    }

    /// Read setting `name` as `T`, or `default` when it was never set.
    ///
    /// # Errors
    ///
    /// Returns `PackageError::SettingTypeMismatch` when a value is stored
    /// under `name` but is not a `T`.
    pub fn get_setting<T: FromSetting>(&self, name: &str, default: T) -> Result<T, PackageError> {
        let Some(value) = self.settings.get(name) else {
            return Ok(default);
        };
        T::from_setting(value).ok_or_else(|| PackageError::SettingTypeMismatch {
            name: name.to_string(),
            expected: T::TYPE_NAME,
            actual: value.type_name(),
        })
    }

    /// Re-normalize every path in the tree. Used after decoding a
    /// hand-written manifest, where paths may be relative.
    pub(crate) fn normalize_paths(&mut self) -> Result<(), PackageError> {
        if let Some(path) = self.file_path.take() {
            self.file_path = Some(normalize_path(Path::new(&path))?);
        }
        for child in &mut self.children {
            child.normalize_paths()?;
        }
        Ok(())
    }
}

impl std::fmt::Display for TestPackage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name().unwrap_or("<anonymous>"))?;
        if self.has_children() {
            write!(f, " ({} sub-packages)", self.children.len())?;
        }
        Ok(())
    }
}

/// Depth-first iterator over the leaves of a package tree.
pub struct Leaves<'a> {
    stack: Vec<&'a TestPackage>,
}

impl<'a> Iterator for Leaves<'a> {
    type Item = &'a TestPackage;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            if node.is_leaf() {
                return Some(node);
            }
            self.stack.extend(node.children.iter().rev());
        }
        None
    }
}

/// Resolve `path` against the working directory and drop `.` / `..`
/// components lexically.
fn normalize_path(path: &Path) -> Result<String, PackageError> {
    let invalid = |reason: String| PackageError::InvalidPath {
        path: path.to_string_lossy().into_owned(),
        reason,
    };

    if path.as_os_str().is_empty() {
        return Err(invalid("path is empty".into()));
    }
    if path.as_os_str().as_encoded_bytes().contains(&0) {
        return Err(invalid("path contains a NUL byte".into()));
    }

    let absolute = std::path::absolute(path).map_err(|e| invalid(e.to_string()))?;

    let mut normalized = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }

    normalized
        .into_os_string()
        .into_string()
        .map_err(|_| invalid("path is not valid UTF-8".into()))
}
