//! `Query` — A codec table over the multi-valued query-string format
//!
//! Structurally parallel to [`Path`](crate::Path) but flat: no positional
//! template, and every key carries an ordered *sequence* of values. The wire
//! format is standard `key=value&key=value` form-encoding — space becomes
//! `+`, not `%20`; that distinction against the path layer is load-bearing.

use crate::{CodecTable, ParamValue};
use std::collections::BTreeMap;

/// Parse a raw query string into per-key value sequences.
///
/// Keys appear in first-appearance order; values keep input order and
/// duplicates. One leading `?` is tolerated. Values arrive form-decoded
/// (`+` and percent escapes resolved).
///
/// # Example
///
/// ```
/// use trail::parse_query;
///
/// assert_eq!(
///     parse_query("a=1&b=2&b=4"),
///     vec![
///         ("a".to_string(), vec!["1".to_string()]),
///         ("b".to_string(), vec!["2".to_string(), "4".to_string()]),
///     ]
/// );
/// ```
#[must_use]
pub fn parse_query(search: &str) -> Vec<(String, Vec<String>)> {
    let search = search.strip_prefix('?').unwrap_or(search);
    let mut grouped: Vec<(String, Vec<String>)> = Vec::new();
    for (key, value) in form_urlencoded::parse(search.as_bytes()) {
        match grouped.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, values)) => values.push(value.into_owned()),
            None => grouped.push((key.into_owned(), vec![value.into_owned()])),
        }
    }
    grouped
}

/// Serialize per-key value sequences into a query string.
///
/// Each value becomes one `key=value` pair, keys in slice order, values in
/// sequence order, form-encoded (space becomes `+`).
///
/// # Example
///
/// ```
/// use trail::build_query;
///
/// let params = vec![
///     ("a".to_string(), vec!["1".to_string()]),
///     ("b".to_string(), vec!["2".to_string(), "4".to_string()]),
/// ];
/// assert_eq!(build_query(&params), "a=1&b=2&b=4");
/// ```
#[must_use]
pub fn build_query(params: &[(String, Vec<String>)]) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, values) in params {
        for value in values {
            serializer.append_pair(key, value);
        }
    }
    serializer.finish()
}

/// A flat codec table over the query-string format.
///
/// Every declared key maps to an ordered sequence of typed values. Absent
/// keys are empty sequences — never an error on build, never a missing key
/// on parse.
///
/// # Example
///
/// ```
/// use std::collections::BTreeMap;
/// use trail::prelude::*;
///
/// let query = Query::new(CodecTable::new().with("a", NumberCodec));
///
/// let values = BTreeMap::from([(
///     "a".to_string(),
///     vec![ParamValue::from(1.0), ParamValue::from(2.0), ParamValue::from(3.0)],
/// )]);
///
/// assert_eq!(query.build(&values), "a=1&a=2&a=3");
/// assert_eq!(query.parse("a=1&a=2&a=3"), values);
/// ```
#[derive(Debug, Clone)]
pub struct Query {
    table: CodecTable,
}

impl Query {
    /// Create a query over the given codec table.
    ///
    /// No template exists to validate against, so construction cannot fail.
    #[must_use]
    pub fn new(table: CodecTable) -> Self {
        Self { table }
    }

    /// The codec table.
    #[must_use]
    pub fn table(&self) -> &CodecTable {
        &self.table
    }

    /// Encode each declared key's value sequence, elementwise.
    ///
    /// Keys absent from `values` encode to empty sequences. The output
    /// carries every declared key and ignores undeclared ones. No escaping
    /// here — that is [`Query::build`]'s job.
    #[must_use]
    pub fn encode(
        &self,
        values: &BTreeMap<String, Vec<ParamValue>>,
    ) -> BTreeMap<String, Vec<String>> {
        self.table
            .iter()
            .map(|(key, codec)| {
                let encoded = values
                    .get(key)
                    .map(|sequence| sequence.iter().map(|value| codec.encode(value)).collect())
                    .unwrap_or_default();
                (key.to_string(), encoded)
            })
            .collect()
    }

    /// Decode each declared key's raw sequence, elementwise.
    ///
    /// Keys absent from `params` decode to empty sequences; undeclared
    /// input keys are ignored.
    #[must_use]
    pub fn decode(
        &self,
        params: &BTreeMap<String, Vec<String>>,
    ) -> BTreeMap<String, Vec<ParamValue>> {
        self.table
            .iter()
            .map(|(key, codec)| {
                let decoded = params
                    .get(key)
                    .map(|sequence| sequence.iter().map(|raw| codec.decode(raw)).collect())
                    .unwrap_or_default();
                (key.to_string(), decoded)
            })
            .collect()
    }

    /// Build a query string from (possibly partial) typed values.
    ///
    /// Declared keys are emitted in table declaration order; keys absent
    /// from `values` (or with empty sequences) contribute zero pairs — the
    /// documented way to omit a field.
    #[must_use]
    pub fn build(&self, values: &BTreeMap<String, Vec<ParamValue>>) -> String {
        let mut pairs: Vec<(String, Vec<String>)> = Vec::new();
        for (key, codec) in self.table.iter() {
            if let Some(sequence) = values.get(key) {
                if !sequence.is_empty() {
                    pairs.push((
                        key.to_string(),
                        sequence.iter().map(|value| codec.encode(value)).collect(),
                    ));
                }
            }
        }
        build_query(&pairs)
    }

    /// Parse a query string into typed value sequences.
    ///
    /// Every declared key is present in the output, defaulting to an empty
    /// sequence; value order and duplicates are preserved.
    #[must_use]
    pub fn parse(&self, search: &str) -> BTreeMap<String, Vec<ParamValue>> {
        let raw = parse_query(search);
        self.table
            .iter()
            .map(|(key, codec)| {
                let decoded = raw
                    .iter()
                    .find(|(candidate, _)| candidate == key)
                    .map(|(_, sequence)| sequence.iter().map(|raw| codec.decode(raw)).collect())
                    .unwrap_or_default();
                (key.to_string(), decoded)
            })
            .collect()
    }
}
