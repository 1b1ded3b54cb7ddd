//! Translation of RAML declarations into a GraphQL type graph.
//!
//! One call to [`convert`] is one conversion run. The run goes through
//! these steps, each in its own module:
//!
//! 1. **Index** - every declaration is indexed by name; duplicates are rejected
//! 2. **Infer** - the names used as parents become interfaces
//! 3. **Visit** - top-level declarations are converted in input order, with
//!    object types memoized in a per-run [`registry::TypeRegistry`]
//! 4. **Assemble** - the query type, directives and extended scalars are
//!    added and the result is frozen into a [`TypeGraph`]
//!
//! Each run owns its index, interface set and registry; converting the same
//! declarations twice yields equal graphs.
//!
//! The one piece of process-wide state is the [`Id`] interner: every name
//! interned by any run stays in a global `Mutex`-guarded table that never
//! shrinks, so a long batch keeps the names of all roots it converted.
//! Equal names intern to equal ids, so this cannot leak types from one run
//! into another.

mod assemble;
mod index;
mod interface;
mod registry;
mod scalar;
mod visitor;

pub use scalar::map_scalar;

use log::{info, trace};

use ramlql_core::{declaration::Declaration, identifier::Id, schema::TypeGraph};

use crate::{config::SchemaConfig, error::ConversionError};

/// Directive marking object and interface types as domain entities.
pub const DOMAIN_DIRECTIVE: &str = "domain";

/// Directive marking fields that refer to another entity by identity.
pub const LINK_DIRECTIVE: &str = "link";

/// Names that declarations cannot take because the schema uses them.
fn reserved_names(config: &SchemaConfig) -> Vec<Id> {
    let mut reserved = vec![Id::new(config.query_type())];
    reserved.extend(
        ["String", "Int", "Float", "Boolean", "ID"]
            .into_iter()
            .map(Id::new),
    );
    reserved.extend(
        scalar::EXTENDED_SCALARS
            .into_iter()
            .map(|kind| map_scalar(kind).name()),
    );
    reserved
}

/// Converts the declarations of one input tree into a [`TypeGraph`].
///
/// # Arguments
///
/// * `declarations` - Top-level declarations of every file of the tree, in
///   input order
/// * `config` - Names of the synthesized query type and its fields
///
/// # Errors
///
/// Returns the first [`ConversionError`] met; no partial graph is produced.
pub fn convert(
    declarations: &[Declaration],
    config: &SchemaConfig,
) -> Result<TypeGraph, ConversionError> {
    info!(declarations_len = declarations.len(); "Converting declarations");

    let index = index::DeclarationIndex::build(declarations, &reserved_names(config))?;
    let interfaces = interface::infer_interfaces(&index);
    info!(interfaces_len = interfaces.len(); "Interfaces inferred");

    let mut visitor = visitor::Visitor::new(&index, &interfaces);
    for declaration in declarations {
        let type_ref = visitor.visit(declaration)?;
        trace!(name:% = declaration.name(), type_ref:%; "Top-level declaration visited");
    }

    assemble::assemble(
        declarations,
        &index,
        &interfaces,
        visitor.into_registry(),
        config,
    )
}
