//! # tpack-core: Test Package Descriptors
//!
//! Defines [`TestPackage`], the value handed to a test runner to say which
//! assemblies to load and how to configure them. A package is either bound
//! to a single assembly or project file, or is an anonymous grouping of
//! sub-packages; every node carries a map of typed settings.
//!
//! ## Modules
//!
//! - `package`: the package tree, flattening to assembly paths, and typed
//!   settings lookup with defaults.
//! - `setting`: the [`SettingValue`] sum type and the [`FromSetting`]
//!   extraction trait.
//! - `keys`: spellings of well-known setting keys and the enums stored
//!   under them.
//! - `manifest`: JSON/YAML encoding of package trees.
//!
//! ## Crate Policy
//!
//! - No logging. Every failure is returned to the caller as a
//!   [`PackageError`].
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - Out of scope: loading assemblies, parsing project files, running
//!   tests, reporting results.

pub mod error;
pub mod keys;
pub mod manifest;
pub mod package;
pub mod setting;

// Re-export primary types for ergonomic imports.
pub use error::PackageError;
pub use keys::{DomainUsage, ProcessModel};
pub use manifest::ManifestFormat;
pub use package::{Leaves, TestPackage};
pub use setting::{EnumConstant, FromSetting, SettingEnum, SettingValue};
