//! RamlQL - Translate RAML 1.0 type libraries into GraphQL schemas.
//!
//! Parsing, conversion and rendering of RAML type libraries. Declarations of
//! every library in an input tree are pooled into one conversion run, which
//! produces a single GraphQL schema document.

pub mod config;
pub mod convert;

mod error;
mod export;

pub use ramlql_core::{declaration, identifier, schema};
pub use ramlql_parser::{Library, LibraryUse, is_library_source};

pub use error::{ConversionError, RamlqlError};

use log::{debug, info, trace};

use config::AppConfig;
use declaration::Declaration;
use export::{Exporter, sdl::SdlExporter};
use schema::TypeGraph;

/// Builder for parsing, converting and rendering RAML libraries.
///
/// This provides an API for processing RAML libraries through the parsing,
/// conversion and rendering stages.
///
/// # Examples
///
/// ```rust
/// use ramlql::{SchemaBuilder, config::AppConfig};
///
/// let source = "#%RAML 1.0 Library\ntypes:\n  Person:\n    properties:\n      name: string\n";
///
/// let builder = SchemaBuilder::new(AppConfig::default());
///
/// // Parse source to declarations
/// let library = builder.parse(source, "person.raml")
///     .expect("Failed to parse");
///
/// // Convert declarations to a type graph
/// let graph = builder.convert(library.declarations())
///     .expect("Failed to convert");
///
/// // Render the type graph as GraphQL SDL
/// let sdl = builder.render(&graph)
///     .expect("Failed to render");
/// assert!(sdl.contains("PersonById: [Person]"));
/// ```
#[derive(Default)]
pub struct SchemaBuilder {
    config: AppConfig,
}

impl SchemaBuilder {
    /// Create a new schema builder with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Application configuration including schema and output settings
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration this builder was created with.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse one source file into a [`Library`].
    ///
    /// Files that are not RAML 1.0 libraries yield an empty library.
    ///
    /// # Arguments
    ///
    /// * `source` - File content
    /// * `origin` - Identifier of the source, usually its path
    ///
    /// # Errors
    ///
    /// Returns `RamlqlError::Parse` for a malformed library.
    pub fn parse(&self, source: &str, origin: &str) -> Result<Library, RamlqlError> {
        info!(origin; "Parsing source");

        let library = ramlql_parser::parse(source, origin)
            .map_err(|err| RamlqlError::new_parse_error(err, source, origin))?;

        debug!(origin, declarations_len = library.declarations().len(); "Source parsed");
        trace!(library:?; "Parsed library");

        Ok(library)
    }

    /// Convert the pooled declarations of one input tree into a [`TypeGraph`].
    ///
    /// # Errors
    ///
    /// Returns `RamlqlError::Conversion` for unresolved references, invalid
    /// parents, duplicate names or cyclic aliases.
    pub fn convert(&self, declarations: &[Declaration]) -> Result<TypeGraph, RamlqlError> {
        let graph = convert::convert(declarations, self.config.schema())?;
        trace!(graph:?; "Converted type graph");
        Ok(graph)
    }

    /// Render a type graph as a GraphQL SDL document.
    ///
    /// # Errors
    ///
    /// Returns `RamlqlError::Export` if the graph refers to interfaces or
    /// directives it does not contain.
    pub fn render(&self, graph: &TypeGraph) -> Result<String, RamlqlError> {
        info!(types_len = graph.len(); "Rendering schema");
        let exporter = SdlExporter::new(self.config.output());
        Ok(exporter.export_type_graph(graph)?)
    }

    /// Parse every source, pool the declarations and render one schema.
    ///
    /// `sources` yields `(origin, content)` pairs.
    ///
    /// # Errors
    ///
    /// Returns the first error of any stage.
    pub fn translate<'s>(
        &self,
        sources: impl IntoIterator<Item = (&'s str, &'s str)>,
    ) -> Result<String, RamlqlError> {
        let mut declarations = Vec::new();
        for (origin, source) in sources {
            declarations.extend(self.parse(source, origin)?.into_declarations());
        }

        let graph = self.convert(&declarations)?;
        self.render(&graph)
    }
}
