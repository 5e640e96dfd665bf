//! # Setting Values: Typed Package Configuration
//!
//! A test package carries an open-ended map of named settings that tell
//! the consuming runner how to load and run the referenced assemblies.
//! Values are heterogeneous, so each one is stored as a [`SettingValue`]
//! variant and read back through [`FromSetting`].
//!
//! ## Typed Lookup Contract
//!
//! Callers ask for a concrete type and get exactly that type, or a
//! `SettingTypeMismatch` error naming what was actually stored. There is
//! no coercion between variants: an `Int(1)` is not a `Bool`, and a
//! `String("42")` is not an `Int`.
//!
//! ## Serialized Form
//!
//! Values serialize adjacently tagged so the variant survives a round trip
//! through JSON or YAML:
//!
//! ```text
//! {"type": "bool", "value": true}
//! {"type": "enum", "value": {"kind": "ProcessModel", "name": "Separate"}}
//! ```

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A single setting value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum SettingValue {
    /// Free-form text (paths, framework names, file names).
    String(String),
    /// A flag.
    Bool(bool),
    /// A signed integer (timeouts, counts).
    Int(i64),
    /// A named constant of an enumeration known to the runner.
    Enum(EnumConstant),
    /// Anything else, kept as structured JSON.
    Other(serde_json::Value),
}

impl SettingValue {
    /// Short name of the stored variant, used in mismatch diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::String(_) => "string",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Enum(_) => "enum",
            Self::Other(_) => "other",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Read an enumerated constant as `E`.
    ///
    /// Returns `None` unless the stored constant belongs to `E::KIND` and
    /// names one of its variants.
    pub fn as_enum<E: SettingEnum>(&self) -> Option<E> {
        match self {
            Self::Enum(c) if c.kind == E::KIND => c.name.parse().ok(),
            _ => None,
        }
    }

    /// Infer a value from command-line text.
    ///
    /// `true`/`false` become `Bool`, anything `i64` parses becomes `Int`,
    /// `Kind::Name` becomes an `Enum` constant, and everything else is
    /// kept as a `String`.
    pub fn parse_cli(text: &str) -> Self {
        match text {
            "true" => return Self::Bool(true),
            "false" => return Self::Bool(false),
            _ => {}
        }
        if let Ok(i) = text.parse::<i64>() {
            return Self::Int(i);
        }
        if let Some((kind, name)) = text.split_once("::") {
            if is_identifier(kind) && is_identifier(name) {
                return Self::Enum(EnumConstant::new(kind, name));
            }
        }
        Self::String(text.to_string())
    }
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

impl std::fmt::Display for SettingValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::String(s) => f.write_str(s),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Enum(c) => write!(f, "{c}"),
            Self::Other(v) => write!(f, "{v}"),
        }
    }
}

// ─── Enumerated Constants ────────────────────────────────────────────

/// A named constant of some enumeration, e.g. `ProcessModel::Separate`.
///
/// The `kind` travels with the name so that a constant of one enumeration
/// is never mistaken for a same-named constant of another.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EnumConstant {
    /// Enumeration name.
    pub kind: String,
    /// Variant name within the enumeration.
    pub name: String,
}

impl EnumConstant {
    pub fn new(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            name: name.into(),
        }
    }
}

impl std::fmt::Display for EnumConstant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}::{}", self.kind, self.name)
    }
}

/// A Rust enum that is stored in settings as an [`EnumConstant`].
///
/// Parsing through [`FromStr`] must accept exactly the names produced by
/// [`SettingEnum::as_str`].
pub trait SettingEnum: FromStr {
    /// Enumeration name written into [`EnumConstant::kind`].
    const KIND: &'static str;

    /// Variant name written into [`EnumConstant::name`].
    fn as_str(&self) -> &'static str;

    fn to_constant(&self) -> EnumConstant {
        EnumConstant::new(Self::KIND, self.as_str())
    }
}

// ─── Typed Extraction ────────────────────────────────────────────────

/// A type that can be read back out of a [`SettingValue`].
///
/// Implementations return `None` when the stored variant is not
/// assignable to `Self`; the package turns that into a
/// `SettingTypeMismatch` error.
pub trait FromSetting: Sized {
    /// Name reported as the requested type in mismatch errors.
    const TYPE_NAME: &'static str;

    fn from_setting(value: &SettingValue) -> Option<Self>;
}

impl FromSetting for String {
    const TYPE_NAME: &'static str = "string";

    fn from_setting(value: &SettingValue) -> Option<Self> {
        value.as_str().map(str::to_string)
    }
}

impl FromSetting for bool {
    const TYPE_NAME: &'static str = "bool";

    fn from_setting(value: &SettingValue) -> Option<Self> {
        value.as_bool()
    }
}

impl FromSetting for i64 {
    const TYPE_NAME: &'static str = "int";

    fn from_setting(value: &SettingValue) -> Option<Self> {
        value.as_int()
    }
}

impl FromSetting for i32 {
    const TYPE_NAME: &'static str = "i32";

    fn from_setting(value: &SettingValue) -> Option<Self> {
        value.as_int().and_then(|i| i32::try_from(i).ok())
    }
}

impl FromSetting for u32 {
    const TYPE_NAME: &'static str = "u32";

    fn from_setting(value: &SettingValue) -> Option<Self> {
        value.as_int().and_then(|i| u32::try_from(i).ok())
    }
}

impl FromSetting for EnumConstant {
    const TYPE_NAME: &'static str = "enum";

    fn from_setting(value: &SettingValue) -> Option<Self> {
        match value {
            SettingValue::Enum(c) => Some(c.clone()),
            _ => None,
        }
    }
}

impl FromSetting for serde_json::Value {
    const TYPE_NAME: &'static str = "other";

    fn from_setting(value: &SettingValue) -> Option<Self> {
        match value {
            SettingValue::Other(v) => Some(v.clone()),
            _ => None,
        }
    }
}

/// Untyped fallback: any stored value matches.
impl FromSetting for SettingValue {
    const TYPE_NAME: &'static str = "any";

    fn from_setting(value: &SettingValue) -> Option<Self> {
        Some(value.clone())
    }
}

// ─── Conversions Into SettingValue ───────────────────────────────────

impl From<String> for SettingValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<&str> for SettingValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<bool> for SettingValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for SettingValue {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<i32> for SettingValue {
    fn from(i: i32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<u32> for SettingValue {
    fn from(i: u32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<EnumConstant> for SettingValue {
    fn from(c: EnumConstant) -> Self {
        Self::Enum(c)
    }
}

impl From<serde_json::Value> for SettingValue {
    fn from(v: serde_json::Value) -> Self {
        Self::Other(v)
    }
}
