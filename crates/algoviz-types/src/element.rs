//! The element model every sorting and searching algorithm operates on.
//!
//! Inputs arrive as heterogeneous JSON values. They are narrowed at the
//! boundary into a closed set of variants so algorithms never inspect
//! dynamic types.

use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A single comparable value in a sequence.
///
/// Serialized untagged: a JSON integer is [`Element::Int`], a JSON number
/// with a fractional part or exponent is [`Element::Float`], and a JSON
/// string is [`Element::Str`]. Booleans, null, arrays and objects are
/// rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(untagged)]
#[ts(export, export_to = "bindings/")]
pub enum Element {
    /// A signed integer.
    Int(i64),
    /// A double-precision floating point value.
    Float(f64),
    /// A text value compared lexicographically.
    Str(String),
}

/// The variant tag of an [`Element`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum ElementKind {
    /// [`Element::Int`].
    Int,
    /// [`Element::Float`].
    Float,
    /// [`Element::Str`].
    Str,
}

impl Element {
    /// Returns the variant tag.
    pub const fn kind(&self) -> ElementKind {
        match self {
            Self::Int(_) => ElementKind::Int,
            Self::Float(_) => ElementKind::Float,
            Self::Str(_) => ElementKind::Str,
        }
    }

    /// Whether the element is an integer or a float.
    pub const fn is_numeric(&self) -> bool {
        matches!(self, Self::Int(_) | Self::Float(_))
    }
}

impl ElementKind {
    /// Whether two kinds can be ordered against each other.
    ///
    /// Integers and floats are mutually comparable; strings only compare
    /// with strings.
    pub const fn is_compatible_with(self, other: Self) -> bool {
        matches!(
            (self, other),
            (Self::Str, Self::Str) | (Self::Int | Self::Float, Self::Int | Self::Float)
        )
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Str(v) => f.write_str(v),
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Int => "integer",
            Self::Float => "float",
            Self::Str => "string",
        };
        f.write_str(name)
    }
}

impl From<i64> for Element {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for Element {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Element {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<String> for Element {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}
