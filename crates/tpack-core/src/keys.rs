//! # Well-Known Setting Keys
//!
//! Spellings of the setting keys that test runners commonly read from a
//! package. The package itself attaches no behaviour to any key; these
//! constants only keep producers and consumers from drifting apart.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PackageError;
use crate::setting::{FromSetting, SettingEnum, SettingValue};

/// How test assemblies are distributed across processes ([`ProcessModel`]).
pub const PROCESS_MODEL: &str = "ProcessModel";

/// How application domains are created for the assemblies ([`DomainUsage`]).
pub const DOMAIN_USAGE: &str = "DomainUsage";

/// Target runtime framework, e.g. `net-4.5` (string).
pub const RUNTIME_FRAMEWORK: &str = "RuntimeFramework";

/// Default per-test timeout in milliseconds (int).
pub const DEFAULT_TIMEOUT: &str = "DefaultTimeout";

/// Copy assemblies to a cache directory before loading (bool).
pub const SHADOW_COPY_FILES: &str = "ShadowCopyFiles";

/// Directory the tests run in (string).
pub const WORK_DIRECTORY: &str = "WorkDirectory";

/// Configuration file the assemblies are loaded with (string).
pub const CONFIGURATION_FILE: &str = "ConfigurationFile";

/// Probing path for dependent assemblies (string).
pub const PRIVATE_BIN_PATH: &str = "PrivateBinPath";

/// Process placement for the assemblies of a package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProcessModel {
    /// Let the runner decide.
    Default,
    /// Run inside the runner's own process.
    InProcess,
    /// One separate process for all assemblies.
    Separate,
    /// One process per assembly.
    Multiple,
}

impl SettingEnum for ProcessModel {
    const KIND: &'static str = "ProcessModel";

    fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "Default",
            Self::InProcess => "InProcess",
            Self::Separate => "Separate",
            Self::Multiple => "Multiple",
        }
    }
}

impl FromStr for ProcessModel {
    type Err = PackageError;

    /// Parse from the name produced by [`SettingEnum::as_str`]. Case-sensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Default" => Ok(Self::Default),
            "InProcess" => Ok(Self::InProcess),
            "Separate" => Ok(Self::Separate),
            "Multiple" => Ok(Self::Multiple),
            other => Err(PackageError::UnknownConstant {
                kind: Self::KIND,
                name: other.to_string(),
            }),
        }
    }
}

impl FromSetting for ProcessModel {
    const TYPE_NAME: &'static str = "ProcessModel";

    fn from_setting(value: &SettingValue) -> Option<Self> {
        value.as_enum()
    }
}

impl From<ProcessModel> for SettingValue {
    fn from(m: ProcessModel) -> Self {
        Self::Enum(m.to_constant())
    }
}

/// Application domain isolation for the assemblies of a package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DomainUsage {
    /// Let the runner decide.
    Default,
    /// Load directly into the primary domain.
    None,
    /// One shared domain for all assemblies.
    Single,
    /// One domain per assembly.
    Multiple,
}

impl SettingEnum for DomainUsage {
    const KIND: &'static str = "DomainUsage";

    fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "Default",
            Self::None => "None",
            Self::Single => "Single",
            Self::Multiple => "Multiple",
        }
    }
}

impl FromStr for DomainUsage {
    type Err = PackageError;

    /// Parse from the name produced by [`SettingEnum::as_str`]. Case-sensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Default" => Ok(Self::Default),
            "None" => Ok(Self::None),
            "Single" => Ok(Self::Single),
            "Multiple" => Ok(Self::Multiple),
            other => Err(PackageError::UnknownConstant {
                kind: Self::KIND,
                name: other.to_string(),
            }),
        }
    }
}

impl FromSetting for DomainUsage {
    const TYPE_NAME: &'static str = "DomainUsage";

    fn from_setting(value: &SettingValue) -> Option<Self> {
        value.as_enum()
    }
}

impl From<DomainUsage> for SettingValue {
    fn from(d: DomainUsage) -> Self {
        Self::Enum(d.to_constant())
    }
}
