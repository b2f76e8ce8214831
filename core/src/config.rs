//! Config types for codec-table construction.
//!
//! These types mirror the runtime types but are serde-deserializable,
//! enabling config-driven construction of paths and queries.
//!
//! # Relationship to runtime types
//!
//! | Config type | Runtime type | Loader method |
//! |-------------|--------------|---------------|
//! | [`CodecSpec`] | `Arc<dyn Codec>` | [`CodecSpec::to_codec`] |
//! | [`PathConfig`] | [`Path`](crate::Path) | [`PathConfig::to_path`] |
//! | [`QueryConfig`] | [`Query`](crate::Query) | [`QueryConfig::to_query`] |
//!
//! Config-built tables order their keys by name (the `params` map is
//! sorted); declaration order is a code-level notion.

use crate::{
    BoolCodec, Codec, CodecTable, JsonCodec, NumberCodec, OneOfCodec, ParamValue, Path, Query,
    SetCodec, StringCodec, TemplateError,
};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::sync::Arc;

/// A codec specification from user configuration.
///
/// Uses `#[serde(tag = "type")]` for discriminated union deserialization:
///
/// ```json
/// { "type": "string" }
/// { "type": "number" }
/// { "type": "boolean" }
/// { "type": "one_of", "options": [1, 2, 3] }
/// { "type": "set" }
/// { "type": "json" }
/// ```
///
/// Compiles to the corresponding runtime codec via [`CodecSpec::to_codec`].
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CodecSpec {
    /// [`StringCodec`].
    String,
    /// [`NumberCodec`].
    Number,
    /// [`BoolCodec`].
    Boolean,
    /// [`OneOfCodec`] over JSON option literals.
    OneOf {
        /// The enumerated options, converted through
        /// [`ParamValue::from`](ParamValue).
        options: Vec<serde_json::Value>,
    },
    /// [`SetCodec`].
    Set,
    /// [`JsonCodec`].
    Json,
}

impl CodecSpec {
    /// Compile this spec into a runtime codec.
    ///
    /// # Errors
    ///
    /// `one_of` propagates [`TemplateError::DuplicateOptionKey`] and
    /// [`TemplateError::EmptyOptions`] from the [`OneOfCodec`] constructor.
    pub fn to_codec(&self) -> Result<Arc<dyn Codec>, TemplateError> {
        match self {
            Self::String => Ok(Arc::new(StringCodec)),
            Self::Number => Ok(Arc::new(NumberCodec)),
            Self::Boolean => Ok(Arc::new(BoolCodec)),
            Self::OneOf { options } => {
                let options = options.iter().cloned().map(ParamValue::from);
                Ok(Arc::new(OneOfCodec::new(options)?))
            }
            Self::Set => Ok(Arc::new(SetCodec)),
            Self::Json => Ok(Arc::new(JsonCodec)),
        }
    }
}

/// Configuration for a [`Path`].
#[derive(Debug, Clone, Deserialize)]
pub struct PathConfig {
    /// The template string, normalized at compile time.
    pub template: String,

    /// Codec spec per placeholder name.
    #[serde(default)]
    pub params: BTreeMap<String, CodecSpec>,
}

impl PathConfig {
    /// Deserialize a config from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::InvalidConfig`] carrying the
    /// deserialization message.
    pub fn from_json(json: &str) -> Result<Self, TemplateError> {
        serde_json::from_str(json).map_err(|err| TemplateError::InvalidConfig {
            source: err.to_string(),
        })
    }

    /// Compile this config into a runtime [`Path`].
    ///
    /// # Errors
    ///
    /// Propagates codec compilation errors and
    /// [`TemplateError::MissingPlaceholder`] from [`Path::new`].
    pub fn to_path(&self) -> Result<Path, TemplateError> {
        let mut table = CodecTable::new();
        for (key, spec) in &self.params {
            table.insert(key.clone(), spec.to_codec()?);
        }
        Path::new(&self.template, table)
    }
}

/// Configuration for a [`Query`].
#[derive(Debug, Clone, Deserialize)]
pub struct QueryConfig {
    /// Codec spec per query key.
    #[serde(default)]
    pub params: BTreeMap<String, CodecSpec>,
}

impl QueryConfig {
    /// Deserialize a config from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::InvalidConfig`] carrying the
    /// deserialization message.
    pub fn from_json(json: &str) -> Result<Self, TemplateError> {
        serde_json::from_str(json).map_err(|err| TemplateError::InvalidConfig {
            source: err.to_string(),
        })
    }

    /// Compile this config into a runtime [`Query`].
    ///
    /// # Errors
    ///
    /// Propagates codec compilation errors.
    pub fn to_query(&self) -> Result<Query, TemplateError> {
        let mut table = CodecTable::new();
        for (key, spec) in &self.params {
            table.insert(key.clone(), spec.to_codec()?);
        }
        Ok(Query::new(table))
    }
}
