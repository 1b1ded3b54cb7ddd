//! Target type graph model.
//!
//! A [`TypeGraph`] is the finished, immutable result of one conversion run:
//! every named type in first-visit order, the directive definitions used by
//! those types, and the synthesized query root. Renderers consume it without
//! needing to know anything about the source declarations.

use std::fmt;

use indexmap::IndexMap;

use crate::identifier::Id;

/// Locations a directive may be applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirectiveLocation {
    Object,
    Interface,
    FieldDefinition,
}

impl fmt::Display for DirectiveLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DirectiveLocation::Object => f.write_str("OBJECT"),
            DirectiveLocation::Interface => f.write_str("INTERFACE"),
            DirectiveLocation::FieldDefinition => f.write_str("FIELD_DEFINITION"),
        }
    }
}

/// Declaration of a directive and the places it is valid on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectiveDefinition {
    name: Id,
    locations: Vec<DirectiveLocation>,
}

impl DirectiveDefinition {
    pub fn new(name: Id, locations: Vec<DirectiveLocation>) -> Self {
        Self { name, locations }
    }

    pub fn name(&self) -> Id {
        self.name
    }

    pub fn locations(&self) -> &[DirectiveLocation] {
        &self.locations
    }

    /// Returns `true` if the directive may be applied at `location`.
    pub fn allows(&self, location: DirectiveLocation) -> bool {
        self.locations.contains(&location)
    }
}

/// An applied directive without arguments, e.g. `@link`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Directive {
    name: Id,
}

impl Directive {
    pub fn new(name: Id) -> Self {
        Self { name }
    }

    pub fn name(&self) -> Id {
        self.name
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.name)
    }
}

/// A reference to a type at its point of use.
///
/// Lists are structural: they wrap another reference and never appear as
/// entries of the graph themselves.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
    Named(Id),
    List(Box<TypeRef>),
}

impl TypeRef {
    /// Wraps `inner` in a list.
    pub fn list(inner: TypeRef) -> Self {
        TypeRef::List(Box::new(inner))
    }

    /// Returns the named type at the bottom of any list wrapping.
    pub fn base_name(&self) -> Id {
        match self {
            TypeRef::Named(name) => *name,
            TypeRef::List(inner) => inner.base_name(),
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Named(name) => write!(f, "{name}"),
            TypeRef::List(inner) => write!(f, "[{inner}]"),
        }
    }
}

/// A field of an object or interface type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDefinition {
    name: Id,
    ty: TypeRef,
    directives: Vec<Directive>,
    description: Option<String>,
}

impl FieldDefinition {
    pub fn new(name: Id, ty: TypeRef) -> Self {
        Self {
            name,
            ty,
            directives: Vec::new(),
            description: None,
        }
    }

    pub fn with_directive(mut self, directive: Directive) -> Self {
        self.directives.push(directive);
        self
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    pub fn name(&self) -> Id {
        self.name
    }

    pub fn ty(&self) -> &TypeRef {
        &self.ty
    }

    pub fn directives(&self) -> &[Directive] {
        &self.directives
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns `true` if a directive with `name` is applied to this field.
    pub fn has_directive(&self, name: &str) -> bool {
        self.directives.iter().any(|d| d.name() == name)
    }
}

/// Shared body of object and interface types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectType {
    name: Id,
    interfaces: Vec<Id>,
    fields: Vec<FieldDefinition>,
    directives: Vec<Directive>,
    description: Option<String>,
}

impl ObjectType {
    pub fn new(name: Id) -> Self {
        Self {
            name,
            interfaces: Vec::new(),
            fields: Vec::new(),
            directives: Vec::new(),
            description: None,
        }
    }

    pub fn with_interfaces(mut self, interfaces: Vec<Id>) -> Self {
        self.interfaces = interfaces;
        self
    }

    pub fn with_fields(mut self, fields: Vec<FieldDefinition>) -> Self {
        self.fields = fields;
        self
    }

    pub fn with_field(mut self, field: FieldDefinition) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_directive(mut self, directive: Directive) -> Self {
        self.directives.push(directive);
        self
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    pub fn name(&self) -> Id {
        self.name
    }

    /// Interfaces this type implements, in declaration order.
    pub fn interfaces(&self) -> &[Id] {
        &self.interfaces
    }

    pub fn fields(&self) -> &[FieldDefinition] {
        &self.fields
    }

    /// Looks up a field by name.
    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.name() == name)
    }

    pub fn directives(&self) -> &[Directive] {
        &self.directives
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns `true` if a directive with `name` is applied to this type.
    pub fn has_directive(&self, name: &str) -> bool {
        self.directives.iter().any(|d| d.name() == name)
    }
}

/// A named scalar type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScalarType {
    name: Id,
    builtin: bool,
}

impl ScalarType {
    /// Creates a scalar that the target system knows natively
    /// (`String`, `Int`, `Float`, `Boolean`).
    pub fn builtin(name: Id) -> Self {
        Self {
            name,
            builtin: true,
        }
    }

    /// Creates a custom scalar that must be declared in the schema.
    pub fn custom(name: Id) -> Self {
        Self {
            name,
            builtin: false,
        }
    }

    pub fn name(&self) -> Id {
        self.name
    }

    pub fn is_builtin(&self) -> bool {
        self.builtin
    }
}

/// One named entry of a [`TypeGraph`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetNode {
    Object(ObjectType),
    Interface(ObjectType),
    Scalar(ScalarType),
}

impl TargetNode {
    pub fn name(&self) -> Id {
        match self {
            TargetNode::Object(object) | TargetNode::Interface(object) => object.name(),
            TargetNode::Scalar(scalar) => scalar.name(),
        }
    }

    pub fn is_interface(&self) -> bool {
        matches!(self, TargetNode::Interface(_))
    }

    /// Borrows the object body of an object or interface node.
    pub fn as_object(&self) -> Option<&ObjectType> {
        match self {
            TargetNode::Object(object) | TargetNode::Interface(object) => Some(object),
            TargetNode::Scalar(_) => None,
        }
    }
}

/// The complete output of one conversion run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeGraph {
    types: IndexMap<Id, TargetNode>,
    directives: Vec<DirectiveDefinition>,
    query: ObjectType,
}

impl TypeGraph {
    /// Creates a graph from its parts.
    ///
    /// `types` must already be keyed by node name and ordered by first visit.
    pub fn new(
        types: IndexMap<Id, TargetNode>,
        directives: Vec<DirectiveDefinition>,
        query: ObjectType,
    ) -> Self {
        Self {
            types,
            directives,
            query,
        }
    }

    /// Iterates the named types in registration order.
    pub fn types(&self) -> impl Iterator<Item = &TargetNode> {
        self.types.values()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn get(&self, name: Id) -> Option<&TargetNode> {
        self.types.get(&name)
    }

    pub fn directives(&self) -> &[DirectiveDefinition] {
        &self.directives
    }

    pub fn directive(&self, name: &str) -> Option<&DirectiveDefinition> {
        self.directives.iter().find(|d| d.name() == name)
    }

    /// The synthesized root query type.
    pub fn query(&self) -> &ObjectType {
        &self.query
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_ref_display() {
        let named = TypeRef::Named(Id::new("Person"));
        let list = TypeRef::list(named.clone());
        let nested = TypeRef::list(list.clone());

        assert_eq!(named.to_string(), "Person");
        assert_eq!(list.to_string(), "[Person]");
        assert_eq!(nested.to_string(), "[[Person]]");
        assert_eq!(nested.base_name(), "Person");
    }

    #[test]
    fn test_directive_definition_allows() {
        let link = DirectiveDefinition::new(
            Id::new("link"),
            vec![DirectiveLocation::FieldDefinition],
        );

        assert!(link.allows(DirectiveLocation::FieldDefinition));
        assert!(!link.allows(DirectiveLocation::Object));
    }

    #[test]
    fn test_graph_keeps_insertion_order() {
        let mut types = IndexMap::new();
        for name in ["Zebra", "Apple", "Mango"] {
            let id = Id::new(name);
            types.insert(id, TargetNode::Object(ObjectType::new(id)));
        }
        let graph = TypeGraph::new(types, Vec::new(), ObjectType::new(Id::new("Query")));

        let names: Vec<_> = graph.types().map(|t| t.name().to_text()).collect();
        assert_eq!(names, vec!["Zebra", "Apple", "Mango"]);
        assert_eq!(graph.len(), 3);
        assert!(graph.get(Id::new("Apple")).is_some());
    }

    #[test]
    fn test_object_field_lookup() {
        let object = ObjectType::new(Id::new("Person"))
            .with_field(
                FieldDefinition::new(Id::new("address"), TypeRef::Named(Id::new("Address")))
                    .with_directive(Directive::new(Id::new("link"))),
            )
            .with_directive(Directive::new(Id::new("domain")));

        let field = object.field("address").expect("field exists");
        assert!(field.has_directive("link"));
        assert!(object.has_directive("domain"));
        assert!(object.field("missing").is_none());
    }
}
