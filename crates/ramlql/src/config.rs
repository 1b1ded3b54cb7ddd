//! Configuration types for RamlQL schema generation.
//!
//! This module provides configuration structures that control how the
//! schema is assembled and printed. All types implement
//! [`serde::Deserialize`] for loading from external sources.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level application configuration combining schema and output settings.
//! - [`SchemaConfig`] - Names synthesized by the assembler (query type, lookup fields).
//! - [`OutputConfig`] - Controls the rendered SDL document and its file name.
//!
//! # Example
//!
//! ```
//! # use ramlql::config::AppConfig;
//! // Use default configuration
//! let config = AppConfig::default();
//! assert_eq!(config.schema().query_type(), "Query");
//! assert_eq!(config.output().file_name(), "schema.graphql");
//! ```

use serde::Deserialize;

/// Top-level application configuration combining schema and output settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Schema assembly section.
    #[serde(default)]
    schema: SchemaConfig,

    /// Output section.
    #[serde(default)]
    output: OutputConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified schema and output configurations.
    pub fn new(schema: SchemaConfig, output: OutputConfig) -> Self {
        Self { schema, output }
    }

    /// Returns the schema configuration.
    pub fn schema(&self) -> &SchemaConfig {
        &self.schema
    }

    /// Returns the output configuration.
    pub fn output(&self) -> &OutputConfig {
        &self.output
    }
}

/// Names of the synthesized query root and its lookup fields.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SchemaConfig {
    /// Name of the root query type.
    query_type: String,

    /// Suffix appended to a type name to form its query field.
    lookup_suffix: String,
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            query_type: "Query".to_string(),
            lookup_suffix: "ById".to_string(),
        }
    }
}

impl SchemaConfig {
    /// Creates a new [`SchemaConfig`].
    ///
    /// # Arguments
    ///
    /// * `query_type` - Name of the root query type.
    /// * `lookup_suffix` - Suffix of the per-type query fields (`Person` + suffix).
    pub fn new(query_type: impl Into<String>, lookup_suffix: impl Into<String>) -> Self {
        Self {
            query_type: query_type.into(),
            lookup_suffix: lookup_suffix.into(),
        }
    }

    pub fn query_type(&self) -> &str {
        &self.query_type
    }

    pub fn lookup_suffix(&self) -> &str {
        &self.lookup_suffix
    }
}

/// Options of the rendered schema document.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// File name of the artifact written for each input root.
    file_name: String,

    /// Number of spaces used to indent fields.
    indent: usize,

    /// Print RAML descriptions as GraphQL descriptions.
    descriptions: bool,

    /// Print `scalar String` and the other built-in scalars explicitly.
    builtin_scalars: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            file_name: "schema.graphql".to_string(),
            indent: 2,
            descriptions: true,
            builtin_scalars: false,
        }
    }
}

impl OutputConfig {
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn indent(&self) -> usize {
        self.indent
    }

    pub fn descriptions(&self) -> bool {
        self.descriptions
    }

    pub fn builtin_scalars(&self) -> bool {
        self.builtin_scalars
    }

    /// Returns a copy with description printing switched on or off.
    pub fn with_descriptions(mut self, descriptions: bool) -> Self {
        self.descriptions = descriptions;
        self
    }

    /// Returns a copy with explicit built-in scalar printing switched on or off.
    pub fn with_builtin_scalars(mut self, builtin_scalars: bool) -> Self {
        self.builtin_scalars = builtin_scalars;
        self
    }

    /// Returns a copy using `indent` spaces per level.
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }
}
