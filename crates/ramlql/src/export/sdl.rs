//! GraphQL schema definition language renderer.
//!
//! Prints a [`TypeGraph`] as an SDL document: the directive definitions
//! first, then every type in registration order, then the query type.
//! Blocks are separated by one blank line and the document ends with a
//! single newline.

use std::fmt::Write as _;

use log::debug;

use ramlql_core::schema::{
    Directive, DirectiveDefinition, FieldDefinition, ObjectType, ScalarType, TargetNode, TypeGraph,
};

use super::{Error, Exporter};
use crate::config::OutputConfig;

/// Renders type graphs as GraphQL SDL.
#[derive(Debug, Clone)]
pub struct SdlExporter {
    indent: String,
    descriptions: bool,
    builtin_scalars: bool,
}

impl SdlExporter {
    pub fn new(config: &OutputConfig) -> Self {
        Self {
            indent: " ".repeat(config.indent()),
            descriptions: config.descriptions(),
            builtin_scalars: config.builtin_scalars(),
        }
    }

    fn description(&self, out: &mut String, description: Option<&str>, indent: &str) -> Result<(), Error> {
        let Some(description) = description.filter(|_| self.descriptions) else {
            return Ok(());
        };

        writeln!(out, "{indent}\"\"\"")?;
        for line in description.replace("\"\"\"", "\\\"\"\"").lines() {
            if line.is_empty() {
                writeln!(out)?;
            } else {
                writeln!(out, "{indent}{line}")?;
            }
        }
        writeln!(out, "{indent}\"\"\"")?;
        Ok(())
    }

    fn directive_definition(&self, definition: &DirectiveDefinition) -> Result<String, Error> {
        let locations: Vec<String> = definition
            .locations()
            .iter()
            .map(ToString::to_string)
            .collect();

        let mut out = String::new();
        write!(out, "directive @{} on {}", definition.name(), locations.join(" | "))?;
        Ok(out)
    }

    fn scalar(&self, scalar: &ScalarType) -> Result<Option<String>, Error> {
        if scalar.is_builtin() && !self.builtin_scalars {
            return Ok(None);
        }
        let mut out = String::new();
        write!(out, "scalar {}", scalar.name())?;
        Ok(Some(out))
    }

    fn object(&self, keyword: &str, object: &ObjectType) -> Result<String, Error> {
        let mut out = String::new();
        self.description(&mut out, object.description(), "")?;

        write!(out, "{keyword} {}", object.name())?;
        if !object.interfaces().is_empty() {
            let interfaces: Vec<String> =
                object.interfaces().iter().map(ToString::to_string).collect();
            write!(out, " implements {}", interfaces.join(" & "))?;
        }
        write_directives(&mut out, object.directives())?;

        if !object.fields().is_empty() {
            out.push_str(" {\n");
            for field in object.fields() {
                self.field(&mut out, field)?;
            }
            out.push('}');
        }
        Ok(out)
    }

    fn field(&self, out: &mut String, field: &FieldDefinition) -> Result<(), Error> {
        self.description(out, field.description(), &self.indent)?;
        write!(out, "{}{}: {}", self.indent, field.name(), field.ty())?;
        write_directives(out, field.directives())?;
        out.push('\n');
        Ok(())
    }
}

fn write_directives(out: &mut String, directives: &[Directive]) -> Result<(), Error> {
    for directive in directives {
        write!(out, " {directive}")?;
    }
    Ok(())
}

/// Every implemented interface and applied directive must be part of the graph.
fn check_references(graph: &TypeGraph) -> Result<(), Error> {
    for object in graph.types().filter_map(TargetNode::as_object) {
        for interface in object.interfaces() {
            if !graph.get(*interface).is_some_and(TargetNode::is_interface) {
                return Err(Error::Render(format!(
                    "`{}` implements `{interface}`, which is not an interface of the schema",
                    object.name()
                )));
            }
        }

        let applied = object
            .directives()
            .iter()
            .chain(object.fields().iter().flat_map(FieldDefinition::directives));
        for directive in applied {
            if graph.directive(&directive.name().to_text()).is_none() {
                return Err(Error::Render(format!(
                    "directive `{directive}` used by `{}` is not defined",
                    object.name()
                )));
            }
        }
    }
    Ok(())
}

impl Exporter for SdlExporter {
    fn export_type_graph(&self, graph: &TypeGraph) -> Result<String, Error> {
        check_references(graph)?;

        let mut blocks = Vec::new();
        for definition in graph.directives() {
            blocks.push(self.directive_definition(definition)?);
        }
        for node in graph.types() {
            match node {
                TargetNode::Object(object) => blocks.push(self.object("type", object)?),
                TargetNode::Interface(object) => blocks.push(self.object("interface", object)?),
                TargetNode::Scalar(scalar) => blocks.extend(self.scalar(scalar)?),
            }
        }
        blocks.push(self.object("type", graph.query())?);

        debug!(blocks_len = blocks.len(); "Schema rendered");

        let mut document = blocks.join("\n\n");
        document.push('\n');
        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use indexmap::IndexMap;
    use indoc::indoc;

    use ramlql_core::{
        identifier::Id,
        schema::{DirectiveLocation, TypeRef},
    };

    use super::*;

    fn graph(types: Vec<TargetNode>, query: ObjectType) -> TypeGraph {
        let types: IndexMap<Id, TargetNode> =
            types.into_iter().map(|node| (node.name(), node)).collect();
        let directives = vec![
            DirectiveDefinition::new(
                Id::new("domain"),
                vec![DirectiveLocation::Object, DirectiveLocation::Interface],
            ),
            DirectiveDefinition::new(Id::new("link"), vec![DirectiveLocation::FieldDefinition]),
        ];
        TypeGraph::new(types, directives, query)
    }

    fn render(graph: &TypeGraph, config: &OutputConfig) -> String {
        SdlExporter::new(config).export_type_graph(graph).unwrap()
    }

    fn domain() -> Directive {
        Directive::new(Id::new("domain"))
    }

    fn named(name: &str) -> TypeRef {
        TypeRef::Named(Id::new(name))
    }

    #[test]
    fn test_full_document() {
        let animal = ObjectType::new(Id::new("Animal"))
            .with_field(FieldDefinition::new(Id::new("name"), named("String")))
            .with_directive(domain());
        let dog = ObjectType::new(Id::new("Dog"))
            .with_interfaces(vec![Id::new("Animal")])
            .with_field(FieldDefinition::new(Id::new("name"), named("String")))
            .with_field(
                FieldDefinition::new(Id::new("owner"), named("Person"))
                    .with_directive(Directive::new(Id::new("link"))),
            )
            .with_directive(domain());
        let person = ObjectType::new(Id::new("Person"))
            .with_field(FieldDefinition::new(Id::new("born"), named("Date")))
            .with_directive(domain());
        let query = ObjectType::new(Id::new("Query"))
            .with_field(FieldDefinition::new(Id::new("DogById"), TypeRef::list(named("Dog"))))
            .with_field(FieldDefinition::new(
                Id::new("PersonById"),
                TypeRef::list(named("Person")),
            ));

        let graph = graph(
            vec![
                TargetNode::Interface(animal),
                TargetNode::Scalar(ScalarType::builtin(Id::new("String"))),
                TargetNode::Object(dog),
                TargetNode::Object(person),
                TargetNode::Scalar(ScalarType::custom(Id::new("Date"))),
            ],
            query,
        );

        let expected = indoc! {"
            directive @domain on OBJECT | INTERFACE

            directive @link on FIELD_DEFINITION

            interface Animal @domain {
              name: String
            }

            type Dog implements Animal @domain {
              name: String
              owner: Person @link
            }

            type Person @domain {
              born: Date
            }

            scalar Date

            type Query {
              DogById: [Dog]
              PersonById: [Person]
            }
        "};
        assert_eq!(render(&graph, &OutputConfig::default()), expected);
    }

    #[test]
    fn test_descriptions_and_options() {
        let person = ObjectType::new(Id::new("Person"))
            .with_description(Some("A person.\n\nKnown to the registry.".to_string()))
            .with_field(
                FieldDefinition::new(Id::new("name"), named("String"))
                    .with_description(Some("Full name".to_string())),
            );
        let graph = graph(
            vec![
                TargetNode::Object(person),
                TargetNode::Scalar(ScalarType::builtin(Id::new("String"))),
            ],
            ObjectType::new(Id::new("Query")),
        );

        let config = OutputConfig::default()
            .with_indent(4)
            .with_builtin_scalars(true);
        let rendered = render(&graph, &config);
        let expected = indoc! {r#"
            directive @domain on OBJECT | INTERFACE

            directive @link on FIELD_DEFINITION

            """
            A person.

            Known to the registry.
            """
            type Person {
                """
                Full name
                """
                name: String
            }

            scalar String

            type Query
        "#};
        assert_eq!(rendered, expected);

        let plain = render(&graph, &OutputConfig::default().with_descriptions(false));
        assert!(!plain.contains("\"\"\""));
        assert!(!plain.contains("scalar String"));
    }

    #[test]
    fn test_missing_interface_is_a_render_error() {
        let dog = ObjectType::new(Id::new("Dog")).with_interfaces(vec![Id::new("Animal")]);
        let graph = graph(vec![TargetNode::Object(dog)], ObjectType::new(Id::new("Query")));

        let err = SdlExporter::new(&OutputConfig::default())
            .export_type_graph(&graph)
            .unwrap_err();
        assert!(matches!(err, Error::Render(_)));
    }

    #[test]
    fn test_undefined_directive_is_a_render_error() {
        let person = ObjectType::new(Id::new("Person"))
            .with_directive(Directive::new(Id::new("deprecated")));
        let graph = graph(vec![TargetNode::Object(person)], ObjectType::new(Id::new("Query")));

        assert!(
            SdlExporter::new(&OutputConfig::default())
                .export_type_graph(&graph)
                .is_err()
        );
    }
}
