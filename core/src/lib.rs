//! trail - Typed path and query templating
//!
//! Build, match, and parse URL paths against templates with named
//! placeholders, with a per-field codec table translating between typed
//! values and their string representations.
//!
//! # Architecture
//!
//! The type system uses erasure at the value level:
//!
//! - [`ParamValue`] — Erased value type flowing between codecs and callers
//! - [`Codec`] — Non-generic, shareable encode/decode pair over `ParamValue`
//! - [`CodecTable`] — Insertion-ordered `name -> codec` map with
//!   collision-checked merging
//! - [`SegmentParser`] — Positional template matching with signed-distance
//!   semantics
//! - [`Path`] — Template + codec table: build/match/parse/append
//! - [`Query`] — Codec table over the multi-valued query-string format
//!
//! # Key Design Insights
//!
//! 1. **Type erasure at value level**: `ParamValue` enables `Codec` to be
//!    non-generic. The same codec table type serves paths and queries, and
//!    heterogeneous tables need no structural generics.
//!
//! 2. **Construction validates, use never fails structurally**: missing
//!    placeholders, key collisions, and bad option sets are `Err` at
//!    construction; a path that merely fails to match is `None`, never an
//!    error.
//!
//! 3. **Two escaping routines**: path segments percent-encode (space is
//!    `%20`), query values form-encode (space is `+`). Conflating them
//!    corrupts round-trips, so they live in separate modules.
//!
//! # Example
//!
//! ```
//! use trail::prelude::*;
//!
//! let path = Path::new(
//!     "/text/:name/:id",
//!     CodecTable::new()
//!         .with("name", StringCodec)
//!         .with("id", NumberCodec),
//! )?;
//!
//! let mut values = std::collections::BTreeMap::new();
//! values.insert("name".to_string(), ParamValue::from("fo o"));
//! values.insert("id".to_string(), ParamValue::from(7.0));
//!
//! assert_eq!(path.build(&values)?, "/text/fo%20o/7");
//!
//! let hit = path.match_path("/text/fo%20o/7").expect("should match");
//! assert!(hit.exact);
//! assert_eq!(hit.values["name"], ParamValue::from("fo o"));
//! # Ok::<(), trail::TemplateError>(())
//! ```

// ═══════════════════════════════════════════════════════════════════════════════
// Modules
// ═══════════════════════════════════════════════════════════════════════════════

mod codec;
mod escape;
mod parser;
mod path;
mod query;
mod segment;
mod value;

#[cfg(feature = "config")]
mod config;

// ═══════════════════════════════════════════════════════════════════════════════
// Public API
// ═══════════════════════════════════════════════════════════════════════════════

// Core types
pub use codec::{Codec, CodecTable};
pub use parser::SegmentParser;
pub use path::{Path, PathMatch};
pub use query::{build_query, parse_query, Query};
pub use segment::{normalize, split_segments, tokenize, Segment};
pub use value::ParamValue;

// Concrete codecs
pub use codec::{BoolCodec, FnCodec, JsonCodec, NumberCodec, OneOfCodec, SetCodec, StringCodec};

// Escaping primitives (path-segment flavor; the query flavor lives in `query`)
pub use escape::{escape_segment, unescape_segment};

// Config layer (feature-gated)
#[cfg(feature = "config")]
pub use config::{CodecSpec, PathConfig, QueryConfig};

// ═══════════════════════════════════════════════════════════════════════════════
// Prelude
// ═══════════════════════════════════════════════════════════════════════════════

/// Prelude module for convenient imports.
///
/// ```
/// use trail::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        // Concrete codecs
        BoolCodec,
        // Traits
        Codec,
        CodecTable,
        FnCodec,
        JsonCodec,
        NumberCodec,
        OneOfCodec,
        // Core types
        ParamValue,
        Path,
        PathMatch,
        Query,
        Segment,
        SegmentParser,
        SetCodec,
        StringCodec,
        // Errors
        TemplateError,
    };
}

// ═══════════════════════════════════════════════════════════════════════════════
// Constants
// ═══════════════════════════════════════════════════════════════════════════════

/// The path segment separator.
pub const SEPARATOR: char = '/';

/// The prefix marking a template segment as a named placeholder.
pub const PARAM_PREFIX: char = ':';

// ═══════════════════════════════════════════════════════════════════════════════
// Errors
// ═══════════════════════════════════════════════════════════════════════════════

/// Errors from template, codec, and table construction.
///
/// These are caught at construction or call time, never retried internally.
/// Fix the template, table, or value map and reconstruct.
///
/// A candidate path that fails to match is NOT an error — `match_path` and
/// `parse` express structural mismatch as `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// A codec or requested key has no matching `:key` segment in the
    /// template. Raised at [`Path`]/[`SegmentParser`] construction; only the
    /// first missing key is reported.
    MissingPlaceholder {
        /// The key with no placeholder.
        key: String,
        /// The normalized template that was searched.
        template: String,
    },

    /// [`Path::append`] would introduce a key already present in the base
    /// table. Raised before any construction; both source tables are left
    /// untouched.
    CodecKeyCollision {
        /// The overlapping key.
        key: String,
    },

    /// Two options passed to [`OneOfCodec`] share a canonical string form.
    DuplicateOptionKey {
        /// The colliding string form.
        key: String,
    },

    /// [`OneOfCodec`] was given no options. The codec falls back to its
    /// first option on unrecognized input, so an empty option set cannot
    /// exist.
    EmptyOptions,

    /// A value or raw-param map handed to [`Path::encode`]/[`Path::decode`]
    /// is missing a table key. Callers must supply every table key.
    MissingValue {
        /// The absent key.
        key: String,
    },

    /// A value or raw-param map handed to [`Path::encode`]/[`Path::decode`]
    /// carries a key with no codec in the table. Extra keys are not
    /// silently dropped.
    UnknownKey {
        /// The unregistered key.
        key: String,
    },

    /// Configuration deserialization or compilation failed.
    InvalidConfig {
        /// The underlying error message.
        source: String,
    },
}

impl std::fmt::Display for TemplateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingPlaceholder { key, template } => {
                write!(f, "param :{key} not in path template \"{template}\"")
            }
            Self::CodecKeyCollision { key } => {
                write!(f, "append collides on key \"{key}\" already in the base table")
            }
            Self::DuplicateOptionKey { key } => {
                write!(f, "one-of option collision on key: {key}")
            }
            Self::EmptyOptions => {
                write!(f, "one-of codec requires at least one option")
            }
            Self::MissingValue { key } => {
                write!(f, "no value supplied for table key \"{key}\"")
            }
            Self::UnknownKey { key } => {
                write!(f, "value supplied for key \"{key}\" with no codec in the table")
            }
            Self::InvalidConfig { source } => {
                write!(f, "invalid config: {source}")
            }
        }
    }
}

impl std::error::Error for TemplateError {}
