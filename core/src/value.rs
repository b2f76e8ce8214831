//! `ParamValue` — Type-erased values that flow between codecs and callers
//!
//! Codecs consume and produce `ParamValue`, which keeps the [`Codec`](crate::Codec)
//! trait non-generic: one codec table type serves heterogeneous fields
//! without structural generics. Paths and queries hand these to callers and
//! accept them back for building.
//!
//! Every value has a *canonical string form* (its `Display` output). The
//! one-of codec keys its options by canonical form, and codecs fall back to
//! it when encoding a variant they do not primarily target.

use std::fmt;

/// The erased value type that flows between codecs and the Path/Query layers.
///
/// # Variants
///
/// - `String` — Plain text (the most common case)
/// - `Number` — Floating-point number; integral values display without a
///   fractional part
/// - `Bool` — Boolean
/// - `Set` — An ordered collection of strings
/// - `Json` — An arbitrary JSON document
///
/// # Example
///
/// ```
/// use trail::ParamValue;
///
/// let value = ParamValue::from("hello");
/// assert_eq!(value.as_str(), Some("hello"));
/// assert_eq!(value.to_string(), "hello");
///
/// // canonical forms
/// assert_eq!(ParamValue::from(2.0).to_string(), "2");
/// assert_eq!(ParamValue::from(true).to_string(), "true");
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum ParamValue {
    /// Plain text.
    String(String),

    /// A floating-point number. Integral values display without a
    /// fractional part (`2.0` displays as `"2"`).
    Number(f64),

    /// A boolean. The canonical form is `"true"`/`"false"`; note that
    /// [`BoolCodec`](crate::BoolCodec) encodes as `"1"`/`"0"` instead.
    Bool(bool),

    /// An ordered collection of strings.
    Set(Vec<String>),

    /// An arbitrary JSON document.
    Json(serde_json::Value),
}

impl ParamValue {
    /// Returns the string content if this is a `String` value.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the numeric content if this is a `Number` value.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the boolean content if this is a `Bool` value.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the entries if this is a `Set` value.
    #[must_use]
    pub fn as_set(&self) -> Option<&[String]> {
        match self {
            Self::Set(entries) => Some(entries),
            _ => None,
        }
    }

    /// Returns the document if this is a `Json` value.
    #[must_use]
    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Json(doc) => Some(doc),
            _ => None,
        }
    }

    /// Returns a human-readable name for the variant.
    ///
    /// Used in codec diagnostics (e.g. [`Codec::value_type`](crate::Codec::value_type)).
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::String(_) => "string",
            Self::Number(_) => "number",
            Self::Bool(_) => "bool",
            Self::Set(_) => "set",
            Self::Json(_) => "json",
        }
    }
}

/// The canonical string form.
///
/// This is the keying form for [`OneOfCodec`](crate::OneOfCodec) options and
/// the fallback form codecs use for variants they do not primarily target.
impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => f.write_str(s),
            // f64 Display is the shortest representation that round-trips,
            // so integral values print without a fractional part.
            Self::Number(n) => write!(f, "{n}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Set(entries) => f.write_str(&entries.join(",")),
            // serde_json::Value displays as compact JSON.
            Self::Json(doc) => write!(f, "{doc}"),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<f64> for ParamValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i64> for ParamValue {
    fn from(n: i64) -> Self {
        Self::Number(n as f64)
    }
}

impl From<bool> for ParamValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(entries: Vec<String>) -> Self {
        Self::Set(entries)
    }
}

/// Total conversion from a JSON literal.
///
/// Scalars map onto their primitive variants, an all-string array becomes a
/// `Set`, and everything else (null, mixed arrays, objects) is carried as
/// `Json`. Used by the config layer for one-of option literals and by the
/// conformance fixtures for expected values.
impl From<serde_json::Value> for ParamValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::String(s) => Self::String(s),
            Value::Number(n) => match n.as_f64() {
                Some(f) => Self::Number(f),
                None => Self::Json(Value::Number(n)),
            },
            Value::Bool(b) => Self::Bool(b),
            Value::Array(items) if items.iter().all(Value::is_string) => Self::Set(
                items
                    .into_iter()
                    .filter_map(|item| match item {
                        Value::String(s) => Some(s),
                        _ => None,
                    })
                    .collect(),
            ),
            other => Self::Json(other),
        }
    }
}
