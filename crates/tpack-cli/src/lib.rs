//! # tpack-cli: Test Package Command-Line Interface
//!
//! Builds test packages from assembly paths or manifests and inspects
//! them the way a runner would see them.
//!
//! ## Subcommands
//!
//! - `assemblies`: list the assembly paths to load
//! - `show`: emit the package as a JSON or YAML manifest
//! - `get`: typed settings lookup with a default
//!
//! ## Crate Policy
//!
//! - Argument parsing lives beside each handler; package semantics live
//!   in `tpack-core`.
//! - Handlers write to a caller-supplied `Write` so stdout stays the only
//!   machine-readable stream; logs go to stderr.

pub mod assemblies;
pub mod get;
pub mod show;
pub mod source;
