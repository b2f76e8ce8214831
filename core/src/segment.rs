//! Template segments — tokenization and normalization
//!
//! A template string is an ordered sequence of `/`-separated segments. A
//! segment starting with `:` is a named placeholder; every other non-empty
//! segment is a literal. Normalization trims whitespace around segments and
//! absorbs empty ones, so repeated, leading, and trailing separators never
//! change meaning.

use crate::{PARAM_PREFIX, SEPARATOR};
use std::fmt;

/// One segment of a template: an exact literal or a named placeholder.
///
/// # Example
///
/// ```
/// use trail::Segment;
///
/// assert_eq!(Segment::from_raw("users"), Segment::Literal("users".into()));
/// assert_eq!(Segment::from_raw(":id"), Segment::Param("id".into()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// An exact string the candidate segment must equal.
    Literal(String),

    /// A named placeholder binding one value at this position.
    Param(String),
}

impl Segment {
    /// Classify a raw (already trimmed, non-empty) segment.
    #[must_use]
    pub fn from_raw(raw: &str) -> Self {
        match raw.strip_prefix(PARAM_PREFIX) {
            Some(name) => Self::Param(name.to_string()),
            None => Self::Literal(raw.to_string()),
        }
    }

    /// Returns `true` for placeholder segments.
    #[must_use]
    pub fn is_param(&self) -> bool {
        matches!(self, Self::Param(_))
    }

    /// Returns the placeholder name, if any.
    #[must_use]
    pub fn param_name(&self) -> Option<&str> {
        match self {
            Self::Param(name) => Some(name),
            Self::Literal(_) => None,
        }
    }
}

/// Renders the segment in template syntax (placeholders regain their `:`).
impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(text) => f.write_str(text),
            Self::Param(name) => write!(f, "{PARAM_PREFIX}{name}"),
        }
    }
}

/// Split a path or template string into its meaningful segments.
///
/// Each segment is trimmed of surrounding whitespace; empty segments are
/// dropped, which absorbs repeated, leading, and trailing separators.
/// Candidates and templates go through the same split, so they compare
/// position-by-position.
///
/// # Example
///
/// ```
/// use trail::split_segments;
///
/// assert_eq!(split_segments("//a/ b //c/"), ["a", "b", "c"]);
/// assert_eq!(split_segments("/"), Vec::<String>::new());
/// ```
#[must_use]
pub fn split_segments(path: &str) -> Vec<String> {
    path.split(SEPARATOR)
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(String::from)
        .collect()
}

/// Normalize a template or path string.
///
/// The result always starts with the separator, contains no empty segments,
/// and never ends with a separator — except the root, which is `/`.
/// Idempotent: normalizing twice equals normalizing once.
///
/// # Example
///
/// ```
/// use trail::normalize;
///
/// assert_eq!(normalize("a//b/"), "/a/b");
/// assert_eq!(normalize("  /a / :b "), "/a/:b");
/// assert_eq!(normalize(""), "/");
/// ```
#[must_use]
pub fn normalize(path: &str) -> String {
    let segments = split_segments(path);
    let mut out = String::with_capacity(path.len() + 1);
    for segment in &segments {
        out.push(SEPARATOR);
        out.push_str(segment);
    }
    if out.is_empty() {
        out.push(SEPARATOR);
    }
    out
}

/// Tokenize a template into its ordered segments.
#[must_use]
pub fn tokenize(template: &str) -> Vec<Segment> {
    split_segments(template)
        .iter()
        .map(|raw| Segment::from_raw(raw))
        .collect()
}
