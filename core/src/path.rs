//! `Path` — A template composed with a codec table
//!
//! `Path` closes a [`SegmentParser`] over a [`CodecTable`]: typed values go
//! in and come out as path strings, path strings come back as typed values
//! or a structural no-match. Composition (`append`) is persistent — it
//! builds a new `Path` and never touches the receiver.

use crate::{
    escape_segment, normalize, split_segments, tokenize, unescape_segment, CodecTable, ParamValue,
    Segment, SegmentParser, TemplateError, SEPARATOR,
};
use std::collections::BTreeMap;

/// A successful match: the decoded values plus whether the candidate was an
/// exact-length match (`false` means it over-matched with extra trailing
/// segments).
#[derive(Debug, Clone, PartialEq)]
pub struct PathMatch {
    /// Decoded value per table key.
    pub values: BTreeMap<String, ParamValue>,

    /// `true` when the match distance was zero.
    pub exact: bool,
}

/// A path template with per-field codecs.
///
/// Immutable after construction; all operations are pure and callable
/// concurrently.
///
/// # Example
///
/// ```
/// use std::collections::BTreeMap;
/// use trail::prelude::*;
///
/// let path = Path::new(
///     "/:text/:number/:boolean",
///     CodecTable::new()
///         .with("text", StringCodec)
///         .with("number", NumberCodec)
///         .with("boolean", BoolCodec),
/// )?;
///
/// let mut values = BTreeMap::new();
/// values.insert("text".to_string(), ParamValue::from("fo o"));
/// values.insert("number".to_string(), ParamValue::from(2.0));
/// values.insert("boolean".to_string(), ParamValue::from(false));
///
/// assert_eq!(path.url(&values)?, "/fo%20o/2/0");
/// assert_eq!(path.parse("/fo%20o/2/0"), Some(values));
/// # Ok::<(), trail::TemplateError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Path {
    template: String,
    parser: SegmentParser,
    table: CodecTable,
}

impl Path {
    /// Create a path from a template string and a codec table.
    ///
    /// The template is normalized (whitespace trimmed, empty segments
    /// absorbed, leading separator forced) and tokenized; every table key
    /// must appear as a `:key` placeholder.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::MissingPlaceholder`] identifying the first
    /// table key with no placeholder in the template.
    pub fn new(template: &str, table: CodecTable) -> Result<Self, TemplateError> {
        let template = normalize(template);
        let parser = SegmentParser::new(tokenize(&template), table.keys().map(String::from))?;
        Ok(Self {
            template,
            parser,
            table,
        })
    }

    /// The normalized template.
    #[must_use]
    pub fn template(&self) -> &str {
        &self.template
    }

    /// The codec table.
    #[must_use]
    pub fn table(&self) -> &CodecTable {
        &self.table
    }

    /// Encode typed values into raw path-segment strings.
    ///
    /// Per table key: the codec's `encode`, then percent-encoding for safe
    /// segment placement. One output entry per table key; the input must
    /// carry exactly the table's key set.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::MissingValue`] for a table key absent from
    /// `values`, and [`TemplateError::UnknownKey`] for a `values` key with
    /// no codec — nothing is silently dropped in either direction.
    pub fn encode(
        &self,
        values: &BTreeMap<String, ParamValue>,
    ) -> Result<BTreeMap<String, String>, TemplateError> {
        self.check_key_set(values.keys())?;
        let mut encoded = BTreeMap::new();
        for (key, codec) in self.table.iter() {
            let value = values.get(key).ok_or_else(|| TemplateError::MissingValue {
                key: key.to_string(),
            })?;
            encoded.insert(key.to_string(), escape_segment(&codec.encode(value)));
        }
        Ok(encoded)
    }

    /// Reject keys that have no codec in the table.
    fn check_key_set<'a>(
        &self,
        keys: impl Iterator<Item = &'a String>,
    ) -> Result<(), TemplateError> {
        for key in keys {
            if !self.table.contains_key(key) {
                return Err(TemplateError::UnknownKey { key: key.clone() });
            }
        }
        Ok(())
    }

    /// Decode raw path-segment strings back into typed values.
    ///
    /// Per table key: percent-decoding, then the codec's `decode`. The
    /// codec layer never fails; only a key-set mismatch errors.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::MissingValue`] for a table key absent from
    /// `params`, and [`TemplateError::UnknownKey`] for a `params` key with
    /// no codec.
    pub fn decode(
        &self,
        params: &BTreeMap<String, String>,
    ) -> Result<BTreeMap<String, ParamValue>, TemplateError> {
        self.check_key_set(params.keys())?;
        let mut decoded = BTreeMap::new();
        for (key, codec) in self.table.iter() {
            let raw = params.get(key).ok_or_else(|| TemplateError::MissingValue {
                key: key.to_string(),
            })?;
            decoded.insert(key.to_string(), codec.decode(&unescape_segment(raw)));
        }
        Ok(decoded)
    }

    /// Build a concrete path string from typed values.
    ///
    /// Placeholders are substituted with their encoded values; literal
    /// segments pass through untouched. A placeholder with no table entry
    /// stays in template syntax.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::MissingValue`] as [`Path::encode`] does.
    pub fn build(&self, values: &BTreeMap<String, ParamValue>) -> Result<String, TemplateError> {
        let encoded = self.encode(values)?;
        let mut out = String::with_capacity(self.template.len());
        for segment in self.parser.segments() {
            out.push(SEPARATOR);
            match segment {
                Segment::Literal(literal) => out.push_str(literal),
                Segment::Param(name) => match encoded.get(name) {
                    Some(value) => out.push_str(value),
                    None => out.push_str(&segment.to_string()),
                },
            }
        }
        if out.is_empty() {
            out.push(SEPARATOR);
        }
        Ok(out)
    }

    /// Alias for [`Path::build`].
    ///
    /// # Errors
    ///
    /// As [`Path::build`].
    pub fn url(&self, values: &BTreeMap<String, ParamValue>) -> Result<String, TemplateError> {
        self.build(values)
    }

    /// The raw signed match distance for a candidate path string.
    ///
    /// Zero is exact, positive counts extra trailing candidate segments,
    /// negative is an under-match or literal mismatch (see
    /// [`SegmentParser::match_path`]). Retained as a diagnostic alongside
    /// the richer [`Path::match_path`].
    #[must_use]
    pub fn distance(&self, path: &str) -> isize {
        self.parser.match_path(&split_segments(path))
    }

    /// Match a candidate path string and decode its values.
    ///
    /// The candidate is normalized exactly like a template. A negative
    /// distance is a structural no-match (`None`, never an error); zero or
    /// positive yields the decoded values with `exact = (distance == 0)`.
    #[must_use]
    pub fn match_path(&self, path: &str) -> Option<PathMatch> {
        let candidate = split_segments(path);
        let distance = self.parser.match_path(&candidate);
        if distance < 0 {
            return None;
        }
        // distance >= 0 means the candidate covers every template position,
        // so every registered key is present
        let params = self
            .parser
            .parse_path(&candidate)
            .into_iter()
            .filter_map(|(key, raw)| raw.map(|raw| (key, raw)))
            .collect();
        let values = self.decode(&params).ok()?;
        Some(PathMatch {
            values,
            exact: distance == 0,
        })
    }

    /// Decode values from a candidate path string, if it matches.
    ///
    /// Over-matching candidates parse successfully; the extra trailing
    /// segments are ignored.
    #[must_use]
    pub fn parse(&self, path: &str) -> Option<BTreeMap<String, ParamValue>> {
        self.match_path(path).map(|hit| hit.values)
    }

    /// Extend this path with a template suffix and additional codecs,
    /// producing a new independent `Path`.
    ///
    /// The collision check runs first: on overlap nothing is constructed
    /// and both this path and `additional` remain valid and untouched.
    /// Codecs are Arc-shared with the parent, not copied.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::CodecKeyCollision`] on any key overlap, or
    /// [`TemplateError::MissingPlaceholder`] if the suffix lacks a
    /// placeholder for one of the additional keys.
    pub fn append(&self, suffix: &str, additional: &CodecTable) -> Result<Path, TemplateError> {
        let table = self.table.merged(additional)?;
        let template = format!("{}{SEPARATOR}{}", self.template, suffix);
        Path::new(&template, table)
    }
}
