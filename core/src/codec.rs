//! `Codec` — Per-field translation between typed values and strings
//!
//! A codec is a stateless pair of total functions over the erased
//! [`ParamValue`]: `encode` renders a value as a string, `decode` reads one
//! back. The trait is intentionally **non-generic** — codecs operate on
//! erased values, so one table type holds heterogeneous fields and the same
//! codec instance can be shared across paths and queries.
//!
//! # Totality
//!
//! `decode` never fails: each codec documents a fallback for unrecognized
//! input (NaN for numbers, `false` for booleans, the first option for
//! one-of, JSON null for documents). `encode` handed a variant it does not
//! primarily target falls back to the value's canonical string form.
//!
//! # Available Codecs
//!
//! - [`StringCodec`] — Identity over plain text
//! - [`NumberCodec`] — Decimal round-trip
//! - [`BoolCodec`] — `"1"`/`"0"`
//! - [`OneOfCodec`] — Fixed enumerated options, keyed by canonical form
//! - [`SetCodec`] — Comma-joined string collections
//! - [`JsonCodec`] — Compact JSON documents
//! - [`FnCodec`] — Adapter over two closures for bespoke mappings

use crate::{ParamValue, TemplateError};
use std::fmt::Debug;
use std::sync::Arc;

/// Translates one field between its typed value and its string form.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`; codecs hold no mutable state, so
/// tables clone and share them freely via [`Arc`].
///
/// # Example
///
/// ```
/// use trail::{Codec, NumberCodec, ParamValue};
///
/// let codec = NumberCodec;
/// assert_eq!(codec.encode(&ParamValue::from(2.0)), "2");
/// assert_eq!(codec.decode("2"), ParamValue::from(2.0));
/// ```
pub trait Codec: Send + Sync + Debug {
    /// Render the value as a string.
    ///
    /// Total: variants the codec does not primarily target encode via their
    /// canonical string form.
    fn encode(&self, value: &ParamValue) -> String;

    /// Read a value back from its string form.
    ///
    /// Total: unrecognized input produces the codec's documented fallback,
    /// never an error.
    fn decode(&self, raw: &str) -> ParamValue;

    /// Returns the name of the [`ParamValue`] variant this codec primarily
    /// produces. Default is `"string"`.
    fn value_type(&self) -> &'static str {
        "string"
    }
}

// Blanket implementations so tables and callers can hold erased codecs.

impl Codec for Box<dyn Codec> {
    fn encode(&self, value: &ParamValue) -> String {
        (**self).encode(value)
    }

    fn decode(&self, raw: &str) -> ParamValue {
        (**self).decode(raw)
    }

    fn value_type(&self) -> &'static str {
        (**self).value_type()
    }
}

impl Codec for Arc<dyn Codec> {
    fn encode(&self, value: &ParamValue) -> String {
        (**self).encode(value)
    }

    fn decode(&self, raw: &str) -> ParamValue {
        (**self).decode(raw)
    }

    fn value_type(&self) -> &'static str {
        (**self).value_type()
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Primitive codecs
// ═══════════════════════════════════════════════════════════════════════════════

/// Identity codec over plain text.
///
/// Escaping is NOT this codec's concern — [`Path::encode`](crate::Path::encode)
/// percent-encodes after the codec runs, and the query layer form-encodes.
///
/// # Example
///
/// ```
/// use trail::{Codec, StringCodec, ParamValue};
///
/// let plain = r#"a string with "some"/"a few" non url-safe characters"#;
/// assert_eq!(StringCodec.encode(&ParamValue::from(plain)), plain);
/// assert_eq!(StringCodec.decode(plain), ParamValue::from(plain));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct StringCodec;

impl Codec for StringCodec {
    fn encode(&self, value: &ParamValue) -> String {
        value.to_string()
    }

    fn decode(&self, raw: &str) -> ParamValue {
        ParamValue::String(raw.to_string())
    }
}

/// Decimal number codec.
///
/// Encodes with the shortest decimal form that round-trips (`2.0` encodes
/// as `"2"`). Decodes with a strict parse; unparseable input falls back to
/// NaN.
///
/// # Example
///
/// ```
/// use trail::{Codec, NumberCodec, ParamValue};
///
/// assert_eq!(NumberCodec.encode(&ParamValue::from(124.125126512651)), "124.125126512651");
/// assert_eq!(NumberCodec.decode("124.125126512651"), ParamValue::from(124.125126512651));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct NumberCodec;

impl Codec for NumberCodec {
    fn encode(&self, value: &ParamValue) -> String {
        value.to_string()
    }

    fn decode(&self, raw: &str) -> ParamValue {
        ParamValue::Number(raw.parse().unwrap_or(f64::NAN))
    }

    fn value_type(&self) -> &'static str {
        "number"
    }
}

/// Boolean codec over `"1"`/`"0"`.
///
/// Decodes `"1"` as `true` and anything else as `false`.
///
/// # Example
///
/// ```
/// use trail::{Codec, BoolCodec, ParamValue};
///
/// assert_eq!(BoolCodec.encode(&ParamValue::from(true)), "1");
/// assert_eq!(BoolCodec.encode(&ParamValue::from(false)), "0");
/// assert_eq!(BoolCodec.decode("1"), ParamValue::from(true));
/// assert_eq!(BoolCodec.decode("0"), ParamValue::from(false));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct BoolCodec;

impl Codec for BoolCodec {
    fn encode(&self, value: &ParamValue) -> String {
        match value.as_bool() {
            Some(true) => "1".to_string(),
            Some(false) => "0".to_string(),
            None => value.to_string(),
        }
    }

    fn decode(&self, raw: &str) -> ParamValue {
        ParamValue::Bool(raw == "1")
    }

    fn value_type(&self) -> &'static str {
        "bool"
    }
}

/// Codec over a fixed enumerated set of options.
///
/// Options are keyed by their canonical string form. Decoding an
/// unrecognized string falls back to the **first** declared option, so the
/// option set must be non-empty and collision-free — both checked at
/// construction.
///
/// # Example
///
/// ```
/// use trail::{Codec, OneOfCodec, ParamValue};
///
/// let state = OneOfCodec::new([
///     ParamValue::from(1.0),
///     ParamValue::from(2.0),
///     ParamValue::from(3.0),
/// ])?;
///
/// assert_eq!(state.encode(&ParamValue::from(2.0)), "2");
/// assert_eq!(state.decode("2"), ParamValue::from(2.0));
/// assert_eq!(state.decode("miss"), ParamValue::from(1.0)); // first option
/// # Ok::<(), trail::TemplateError>(())
/// ```
#[derive(Debug, Clone)]
pub struct OneOfCodec {
    /// Options paired with their canonical string form, in declared order.
    options: Vec<(String, ParamValue)>,
    value_type: &'static str,
}

impl OneOfCodec {
    /// Create a one-of codec over the given options.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::EmptyOptions`] for a zero-length option set
    /// and [`TemplateError::DuplicateOptionKey`] when two options share a
    /// canonical string form, identifying the colliding form.
    pub fn new(options: impl IntoIterator<Item = ParamValue>) -> Result<Self, TemplateError> {
        let mut keyed: Vec<(String, ParamValue)> = Vec::new();
        for option in options {
            let key = option.to_string();
            if keyed.iter().any(|(existing, _)| *existing == key) {
                return Err(TemplateError::DuplicateOptionKey { key });
            }
            keyed.push((key, option));
        }
        let first = keyed.first().ok_or(TemplateError::EmptyOptions)?;
        let value_type = first.1.type_name();
        Ok(Self {
            options: keyed,
            value_type,
        })
    }

    /// Returns the options with their canonical forms, in declared order.
    #[must_use]
    pub fn options(&self) -> &[(String, ParamValue)] {
        &self.options
    }
}

impl Codec for OneOfCodec {
    fn encode(&self, value: &ParamValue) -> String {
        value.to_string()
    }

    fn decode(&self, raw: &str) -> ParamValue {
        self.options
            .iter()
            .find(|(key, _)| key == raw)
            .unwrap_or(&self.options[0])
            .1
            .clone()
    }

    fn value_type(&self) -> &'static str {
        self.value_type
    }
}

/// Codec over ordered string collections, comma-joined on the wire.
///
/// Decoding splits on commas and drops empty entries, so `""` decodes to an
/// empty set.
///
/// # Example
///
/// ```
/// use trail::{Codec, SetCodec, ParamValue};
///
/// let tags = ParamValue::Set(vec!["a".into(), "b".into()]);
/// assert_eq!(SetCodec.encode(&tags), "a,b");
/// assert_eq!(SetCodec.decode("a,b"), tags);
/// assert_eq!(SetCodec.decode(""), ParamValue::Set(vec![]));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SetCodec;

impl Codec for SetCodec {
    fn encode(&self, value: &ParamValue) -> String {
        value.to_string()
    }

    fn decode(&self, raw: &str) -> ParamValue {
        ParamValue::Set(
            raw.split(',')
                .filter(|entry| !entry.is_empty())
                .map(String::from)
                .collect(),
        )
    }

    fn value_type(&self) -> &'static str {
        "set"
    }
}

/// Codec over arbitrary JSON documents, compact on the wire.
///
/// Decoding invalid JSON falls back to JSON null.
///
/// # Example
///
/// ```
/// use trail::{Codec, JsonCodec, ParamValue};
/// use serde_json::json;
///
/// let doc = ParamValue::Json(json!({"a": 1}));
/// assert_eq!(JsonCodec.encode(&doc), r#"{"a":1}"#);
/// assert_eq!(JsonCodec.decode(r#"{"a":1}"#), doc);
/// assert_eq!(JsonCodec.decode("not json"), ParamValue::Json(json!(null)));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl Codec for JsonCodec {
    fn encode(&self, value: &ParamValue) -> String {
        value.to_string()
    }

    fn decode(&self, raw: &str) -> ParamValue {
        ParamValue::Json(serde_json::from_str(raw).unwrap_or(serde_json::Value::Null))
    }

    fn value_type(&self) -> &'static str {
        "json"
    }
}

/// Adapter building a codec from two closures.
///
/// For bespoke mappings that do not warrant a named type.
///
/// # Example
///
/// ```
/// use trail::{Codec, FnCodec, ParamValue};
///
/// // an uppercase-on-the-wire string codec
/// let shouty = FnCodec::new(
///     |value: &ParamValue| value.to_string().to_uppercase(),
///     |raw: &str| ParamValue::from(raw.to_lowercase()),
/// );
/// assert_eq!(shouty.encode(&ParamValue::from("hey")), "HEY");
/// assert_eq!(shouty.decode("HEY"), ParamValue::from("hey"));
/// ```
pub struct FnCodec {
    encode: Box<dyn Fn(&ParamValue) -> String + Send + Sync>,
    decode: Box<dyn Fn(&str) -> ParamValue + Send + Sync>,
}

impl FnCodec {
    /// Create a codec from an encode and a decode closure.
    ///
    /// Both closures must uphold the trait's totality contract.
    pub fn new(
        encode: impl Fn(&ParamValue) -> String + Send + Sync + 'static,
        decode: impl Fn(&str) -> ParamValue + Send + Sync + 'static,
    ) -> Self {
        Self {
            encode: Box::new(encode),
            decode: Box::new(decode),
        }
    }
}

impl Debug for FnCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("FnCodec")
    }
}

impl Codec for FnCodec {
    fn encode(&self, value: &ParamValue) -> String {
        (self.encode)(value)
    }

    fn decode(&self, raw: &str) -> ParamValue {
        (self.decode)(raw)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Codec tables
// ═══════════════════════════════════════════════════════════════════════════════

/// An insertion-ordered map from field name to codec.
///
/// Declaration order is observable: [`Query::build`](crate::Query::build)
/// emits keys in table order. Codecs are held behind [`Arc`], so cloning a
/// table (and [`Path::append`](crate::Path::append)'s merged tables) shares
/// the codecs instead of copying them.
///
/// # Example
///
/// ```
/// use trail::{CodecTable, StringCodec, NumberCodec};
///
/// let table = CodecTable::new()
///     .with("name", StringCodec)
///     .with("id", NumberCodec);
///
/// assert_eq!(table.len(), 2);
/// assert!(table.contains_key("name"));
/// assert_eq!(table.keys().collect::<Vec<_>>(), ["name", "id"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CodecTable {
    entries: Vec<(String, Arc<dyn Codec>)>,
}

impl CodecTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a codec under the given key (builder pattern).
    ///
    /// Re-using a key replaces the codec in place, keeping its position.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, codec: impl Codec + 'static) -> Self {
        self.insert(key, Arc::new(codec));
        self
    }

    /// Add an already-erased codec under the given key.
    ///
    /// Re-using a key replaces the codec in place, keeping its position.
    pub fn insert(&mut self, key: impl Into<String>, codec: Arc<dyn Codec>) {
        let key = key.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some(entry) => entry.1 = codec,
            None => self.entries.push((key, codec)),
        }
    }

    /// Get the codec registered under a key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Arc<dyn Codec>> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, codec)| codec)
    }

    /// Returns `true` if a codec is registered under the key.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Iterate keys in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    /// Iterate entries in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<dyn Codec>)> {
        self.entries.iter().map(|(key, codec)| (key.as_str(), codec))
    }

    /// Number of registered fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no fields are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Collision-checked union with another table.
    ///
    /// Produces a new table with `self`'s entries followed by `other`'s;
    /// neither input is touched. O(keys) check, Arc-shared codecs.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::CodecKeyCollision`] naming the first
    /// overlapping key; on error nothing is constructed and both inputs
    /// remain valid.
    pub fn merged(&self, other: &CodecTable) -> Result<CodecTable, TemplateError> {
        for key in other.keys() {
            if self.contains_key(key) {
                return Err(TemplateError::CodecKeyCollision {
                    key: key.to_string(),
                });
            }
        }
        let mut entries = self.entries.clone();
        entries.extend(other.entries.iter().cloned());
        Ok(Self { entries })
    }
}
