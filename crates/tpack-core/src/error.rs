//! # Error Types
//!
//! Errors raised while building, querying, or persisting a test package.
//! All errors use `thiserror` for derive-based `Display` and `Error`
//! implementations.
//!
//! ## Design
//!
//! - Every failure is local and synchronous: it is returned to the caller
//!   of the failing operation and nothing here retries or logs.
//! - A missing setting is never an error. A setting stored with a
//!   different type than the one requested always is.

use thiserror::Error;

/// Top-level error type for test package operations.
#[derive(Error, Debug)]
pub enum PackageError {
    /// A supplied file path could not be made absolute.
    #[error("invalid path {path:?}: {reason}")]
    InvalidPath {
        /// The path as supplied by the caller.
        path: String,
        /// Why normalization failed.
        reason: String,
    },

    /// A stored setting holds a different type than the one requested.
    #[error("setting {name:?} holds a {actual} value, requested {expected}")]
    SettingTypeMismatch {
        /// The setting key.
        name: String,
        /// The type the caller asked for.
        expected: &'static str,
        /// The type actually stored.
        actual: &'static str,
    },

    /// A name does not match any constant of an enumeration.
    #[error("unknown {kind} constant: {name:?}")]
    UnknownConstant {
        /// The enumeration name.
        kind: &'static str,
        /// The name that failed to parse.
        name: String,
    },

    /// Manifest encoding or decoding failed.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// IO error while reading or writing a manifest.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for PackageError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}

impl From<serde_yaml::Error> for PackageError {
    fn from(e: serde_yaml::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_path_display() {
        let err = PackageError::InvalidPath {
            path: String::new(),
            reason: "path is empty".into(),
        };
        assert_eq!(err.to_string(), "invalid path \"\": path is empty");
    }

    #[test]
    fn test_mismatch_display_names_both_types() {
        let err = PackageError::SettingTypeMismatch {
            name: "ShadowCopyFiles".into(),
            expected: "int",
            actual: "bool",
        };
        let msg = err.to_string();
        assert!(msg.contains("ShadowCopyFiles"));
        assert!(msg.contains("bool value"));
        assert!(msg.contains("requested int"));
    }

    #[test]
    fn test_json_error_converts() {
        let json_err = serde_json::from_str::<u32>("nope").unwrap_err();
        let err: PackageError = json_err.into();
        assert!(matches!(err, PackageError::Serialization(_)));
    }
}
