//! # Get Subcommand
//!
//! Typed settings lookup on the root package. A missing key prints the
//! default; a key holding a different type fails with a non-zero exit.

use std::io::Write;

use anyhow::Context;
use clap::{Args, ValueEnum};
use tpack_core::{SettingValue, TestPackage};

use crate::source::PackageSource;

/// Requested setting type.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SettingType {
    #[default]
    String,
    Bool,
    Int,
    /// Accept whatever is stored.
    Any,
}

/// Arguments for the get subcommand.
#[derive(Args, Debug)]
pub struct GetArgs {
    /// Setting key to read.
    pub key: String,

    /// Type the value must have.
    #[arg(long = "type", value_enum, default_value_t = SettingType::String)]
    pub ty: SettingType,

    /// Value printed when the key is not set.
    #[arg(long)]
    pub default: Option<String>,

    #[command(flatten)]
    pub source: PackageSource,
}

pub fn run(args: &GetArgs, out: &mut impl Write) -> anyhow::Result<()> {
    let package = args.source.build()?;
    let value = lookup(&package, &args.key, args.ty, args.default.as_deref())?;
    writeln!(out, "{value}")?;
    Ok(())
}

fn lookup(
    package: &TestPackage,
    key: &str,
    ty: SettingType,
    default: Option<&str>,
) -> anyhow::Result<SettingValue> {
    let value = match ty {
        SettingType::String => {
            SettingValue::from(package.get_setting(key, default.unwrap_or_default().to_string())?)
        }
        SettingType::Bool => {
            let default: bool = match default {
                Some(d) => d.parse().with_context(|| format!("--default {d:?} is not a bool"))?,
                None => false,
            };
            SettingValue::from(package.get_setting(key, default)?)
        }
        SettingType::Int => {
            let default: i64 = match default {
                Some(d) => d.parse().with_context(|| format!("--default {d:?} is not an integer"))?,
                None => 0,
            };
            SettingValue::from(package.get_setting(key, default)?)
        }
        SettingType::Any => {
            let default = SettingValue::parse_cli(default.unwrap_or_default());
            package.get_setting(key, default)?
        }
    };
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tpack_core::keys::{self, ProcessModel};
    use tpack_core::PackageError;

    fn package() -> TestPackage {
        TestPackage::new()
            .with_setting(keys::SHADOW_COPY_FILES, true)
            .with_setting(keys::DEFAULT_TIMEOUT, 250i64)
            .with_setting(keys::PROCESS_MODEL, ProcessModel::Separate)
    }

    #[test]
    fn test_lookup_matching_types() {
        let pkg = package();
        assert_eq!(
            lookup(&pkg, keys::SHADOW_COPY_FILES, SettingType::Bool, None).unwrap(),
            SettingValue::Bool(true)
        );
        assert_eq!(
            lookup(&pkg, keys::DEFAULT_TIMEOUT, SettingType::Int, None).unwrap(),
            SettingValue::Int(250)
        );
        assert_eq!(
            lookup(&pkg, keys::PROCESS_MODEL, SettingType::Any, None)
                .unwrap()
                .to_string(),
            "ProcessModel::Separate"
        );
    }

    #[test]
    fn test_lookup_missing_uses_default() {
        let pkg = package();
        assert_eq!(
            lookup(&pkg, "Missing", SettingType::Int, Some("9")).unwrap(),
            SettingValue::Int(9)
        );
        assert_eq!(
            lookup(&pkg, "Missing", SettingType::String, None).unwrap(),
            SettingValue::String(String::new())
        );
    }

    #[test]
    fn test_lookup_mismatch_is_error() {
        let err = lookup(&package(), keys::SHADOW_COPY_FILES, SettingType::Int, None).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PackageError>(),
            Some(PackageError::SettingTypeMismatch { .. })
        ));
    }

    #[test]
    fn test_bad_default_is_error() {
        assert!(lookup(&package(), "Missing", SettingType::Bool, Some("yes")).is_err());
    }
}
