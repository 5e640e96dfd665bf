//! # Package Source Arguments
//!
//! Shared flags for every subcommand that needs a package: assembly paths
//! on the command line, or a manifest file, plus `--setting KEY=VALUE`
//! overrides applied to the root package.

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Args;
use tpack_core::{SettingValue, TestPackage};

/// Where the package comes from.
#[derive(Args, Debug, Default)]
pub struct PackageSource {
    /// Test assemblies or project files to include.
    pub paths: Vec<PathBuf>,

    /// Load the package from a JSON or YAML manifest instead.
    #[arg(long, conflicts_with = "paths")]
    pub manifest: Option<PathBuf>,

    /// Root package setting as KEY=VALUE. Repeatable. VALUE is read as
    /// true/false, an integer, Kind::Name, or else a string.
    #[arg(long = "setting", value_name = "KEY=VALUE", value_parser = parse_setting)]
    pub settings: Vec<(String, SettingValue)>,
}

impl PackageSource {
    /// Build the package described by these flags.
    ///
    /// A single path produces a leaf package; several produce an anonymous
    /// container with one leaf per path.
    pub fn build(&self) -> anyhow::Result<TestPackage> {
        let mut package = match (&self.manifest, self.paths.as_slice()) {
            (Some(manifest), _) => {
                tracing::debug!(manifest = %manifest.display(), "loading package manifest");
                TestPackage::load_manifest(manifest)
                    .with_context(|| format!("loading manifest {}", manifest.display()))?
            }
            (None, []) => bail!("no test assemblies given; pass paths or --manifest"),
            (None, [single]) => TestPackage::from_path(single)?,
            (None, many) => TestPackage::from_paths(many)?,
        };

        for (key, value) in &self.settings {
            if let Some(previous) = package.set_setting(key.clone(), value.clone()) {
                tracing::debug!(%key, %previous, %value, "overriding package setting");
            }
        }

        Ok(package)
    }
}

/// Parse a `KEY=VALUE` setting flag.
pub fn parse_setting(s: &str) -> Result<(String, SettingValue), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got {s:?}"))?;
    if key.is_empty() {
        return Err(format!("empty setting key in {s:?}"));
    }
    Ok((key.to_string(), SettingValue::parse_cli(value)))
}
