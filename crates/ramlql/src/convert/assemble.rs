//! Assembly of the finished [`TypeGraph`].

use indexmap::IndexSet;
use log::{debug, info};

use ramlql_core::{
    declaration::Declaration,
    identifier::Id,
    schema::{DirectiveDefinition, DirectiveLocation, FieldDefinition, ObjectType, TypeGraph, TypeRef},
};

use super::{
    DOMAIN_DIRECTIVE, LINK_DIRECTIVE,
    index::DeclarationIndex,
    registry::TypeRegistry,
    scalar::{EXTENDED_SCALARS, map_scalar},
};
use crate::{config::SchemaConfig, error::ConversionError};

/// Returns `true` if a top-level declaration gets a lookup field on the
/// query type.
///
/// Interfaces cannot be instantiated and aliases stand for another type, so
/// neither is listed.
pub fn is_queryable(
    declaration: &Declaration,
    index: &DeclarationIndex<'_>,
    interfaces: &IndexSet<Id>,
) -> bool {
    let name = declaration.name();
    declaration.is_object() && !index.is_alias(name) && !interfaces.contains(&name)
}

/// Builds the query type, adds the directive definitions and the extended
/// scalars, and freezes everything into a [`TypeGraph`].
///
/// Every declaration in `top_level` must have been visited already.
///
/// Each lookup field is a list of its type, `PersonById: [Person]`, even
/// though its name suggests a single result. Clients of the generated schema
/// rely on that shape.
///
/// # Errors
///
/// Returns a [`ConversionError`] if the registry still holds unfinished
/// types or an extended scalar name is taken by a declared type.
pub fn assemble(
    top_level: &[Declaration],
    index: &DeclarationIndex<'_>,
    interfaces: &IndexSet<Id>,
    mut registry: TypeRegistry,
    config: &SchemaConfig,
) -> Result<TypeGraph, ConversionError> {
    for kind in EXTENDED_SCALARS {
        registry.register_scalar(map_scalar(kind))?;
    }

    let query = top_level
        .iter()
        .filter(|declaration| is_queryable(declaration, index, interfaces))
        .fold(ObjectType::new(Id::new(config.query_type())), |query, declaration| {
            let name = declaration.name();
            debug!(type_name:% = name; "Adding query field");
            query.with_field(FieldDefinition::new(
                name.with_suffix(config.lookup_suffix()),
                TypeRef::list(TypeRef::Named(name)),
            ))
        });

    let directives = vec![
        DirectiveDefinition::new(
            Id::new(DOMAIN_DIRECTIVE),
            vec![DirectiveLocation::Object, DirectiveLocation::Interface],
        ),
        DirectiveDefinition::new(
            Id::new(LINK_DIRECTIVE),
            vec![DirectiveLocation::FieldDefinition],
        ),
    ];

    let types = registry.into_types()?;
    info!(
        types_len = types.len(),
        query_fields_len = query.fields().len();
        "Type graph assembled",
    );

    Ok(TypeGraph::new(types, directives, query))
}

#[cfg(test)]
mod tests {
    use ramlql_core::{declaration::ScalarKind, schema::TargetNode};

    use super::*;

    #[test]
    fn test_extended_scalars_are_registered_once() {
        let declarations = vec![Declaration::scalar(Id::new("Stamp"), ScalarKind::DateTime)];
        let index = DeclarationIndex::build(&declarations, &[]).unwrap();

        let mut registry = TypeRegistry::new();
        registry.register_scalar(map_scalar(ScalarKind::DateTime)).unwrap();

        let graph = assemble(
            &declarations,
            &index,
            &IndexSet::new(),
            registry,
            &SchemaConfig::default(),
        )
        .unwrap();

        let names: Vec<String> = graph.types().map(|t| t.name().to_text()).collect();
        assert_eq!(names, vec!["DateTime", "Date", "Time"]);
        // Scalars and aliases get no lookup field
        assert!(graph.query().fields().is_empty());
    }

    #[test]
    fn test_query_fields_follow_configuration() {
        let declarations = vec![
            Declaration::object(Id::new("Person"), Vec::new()),
            Declaration::object(Id::new("Animal"), Vec::new()),
        ];
        let index = DeclarationIndex::build(&declarations, &[]).unwrap();
        let interfaces: IndexSet<Id> = [Id::new("Animal")].into_iter().collect();

        let mut registry = TypeRegistry::new();
        for declaration in &declarations {
            registry
                .put(TargetNode::Object(ObjectType::new(declaration.name())))
                .unwrap();
        }

        let graph = assemble(
            &declarations,
            &index,
            &interfaces,
            registry,
            &SchemaConfig::new("Root", "Lookup"),
        )
        .unwrap();

        assert_eq!(graph.query().name(), "Root");
        assert_eq!(graph.query().fields().len(), 1);
        let lookup = &graph.query().fields()[0];
        assert_eq!(lookup.name(), "PersonLookup");
        assert_eq!(lookup.ty().to_string(), "[Person]");
    }

    #[test]
    fn test_directive_definitions() {
        let graph = assemble(
            &[],
            &DeclarationIndex::build(&[], &[]).unwrap(),
            &IndexSet::new(),
            TypeRegistry::new(),
            &SchemaConfig::default(),
        )
        .unwrap();

        let domain = graph.directive(DOMAIN_DIRECTIVE).unwrap();
        assert!(domain.allows(DirectiveLocation::Object));
        assert!(domain.allows(DirectiveLocation::Interface));

        let link = graph.directive(LINK_DIRECTIVE).unwrap();
        assert!(link.allows(DirectiveLocation::FieldDefinition));
        assert!(!link.allows(DirectiveLocation::Object));
    }

    #[test]
    fn test_unfinished_registry_is_an_error() {
        let mut registry = TypeRegistry::new();
        registry.reserve(Id::new("Person")).unwrap();

        let result = assemble(
            &[],
            &DeclarationIndex::build(&[], &[]).unwrap(),
            &IndexSet::new(),
            registry,
            &SchemaConfig::default(),
        );
        assert!(matches!(result, Err(ConversionError::IncompleteType { .. })));
    }
}
