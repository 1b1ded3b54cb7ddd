//! Conversion of declarations into type graph nodes.
//!
//! [`Visitor::visit`] turns one declaration into a [`TypeRef`], registering
//! every named type it meets on the way. Object types are memoized by name
//! in the [`TypeRegistry`]: the name is reserved before the fields are
//! visited, so self-referencing and mutually referencing objects terminate.

use indexmap::IndexSet;
use log::{debug, trace};

use ramlql_core::{
    declaration::{Declaration, DeclarationKind, Field},
    identifier::Id,
    schema::{Directive, FieldDefinition, ObjectType, TargetNode, TypeRef},
};

use super::{
    DOMAIN_DIRECTIVE, LINK_DIRECTIVE, index::DeclarationIndex, registry::TypeRegistry,
    scalar::map_scalar,
};
use crate::error::ConversionError;

type Result<T> = std::result::Result<T, ConversionError>;

fn origin_of(declaration: &Declaration) -> Option<String> {
    declaration.origin().map(str::to_string)
}

pub struct Visitor<'a, 'r> {
    index: &'r DeclarationIndex<'a>,
    interfaces: &'r IndexSet<Id>,
    registry: TypeRegistry,
    /// Scalar and array declarations currently being followed by name.
    following: Vec<Id>,
}

impl<'a, 'r> Visitor<'a, 'r> {
    pub fn new(index: &'r DeclarationIndex<'a>, interfaces: &'r IndexSet<Id>) -> Self {
        Self {
            index,
            interfaces,
            registry: TypeRegistry::new(),
            following: Vec::new(),
        }
    }

    /// Gives up the registry holding every type visited so far.
    pub fn into_registry(self) -> TypeRegistry {
        self.registry
    }

    /// Converts `declaration`, returning a reference to its target type.
    pub fn visit(&mut self, declaration: &'a Declaration) -> Result<TypeRef> {
        match declaration.kind() {
            DeclarationKind::Scalar(kind) => {
                let scalar = map_scalar(*kind);
                self.registry.register_scalar(scalar)?;
                Ok(TypeRef::Named(scalar.name()))
            }
            DeclarationKind::ArrayOf(items) => Ok(TypeRef::list(self.visit(items)?)),
            DeclarationKind::Reference(target) => self.follow(*target, declaration),
            DeclarationKind::Object(_) => match declaration.parents() {
                [target] if self.index.is_alias(declaration.name()) => {
                    self.follow(*target, declaration)
                }
                _ => self.visit_object(declaration),
            },
        }
    }

    /// Converts the declaration named `target`, as used by `from`.
    fn follow(&mut self, target: Id, from: &'a Declaration) -> Result<TypeRef> {
        let Some(resolved) = self.index.get(target) else {
            return Err(ConversionError::UnresolvedTypeReference {
                name: target,
                referenced_by: from.name(),
                origin: origin_of(from),
            });
        };

        if resolved.is_object() && !self.index.is_alias(target) {
            return self.visit(resolved);
        }

        if self.following.contains(&target) {
            return Err(ConversionError::CyclicTypeAlias {
                name: target,
                origin: origin_of(resolved),
            });
        }
        self.following.push(target);
        let type_ref = self.visit(resolved);
        self.following.pop();
        type_ref
    }

    fn visit_object(&mut self, declaration: &'a Declaration) -> Result<TypeRef> {
        let name = declaration.name();
        if self.registry.contains(name) {
            trace!(name:%; "Object already visited");
            return Ok(TypeRef::Named(name));
        }

        // Aliases followed outside this object say nothing about its fields
        let outer = std::mem::take(&mut self.following);
        let node = self.convert_object(declaration);
        self.following = outer;

        self.registry.put(node?)?;
        Ok(TypeRef::Named(name))
    }

    fn convert_object(&mut self, declaration: &'a Declaration) -> Result<TargetNode> {
        let name = declaration.name();
        let is_interface = self.interfaces.contains(&name);
        debug!(name:%, is_interface; "Converting object type");

        self.registry.reserve(name)?;

        for parent in declaration.parents() {
            self.check_parent(declaration, *parent)?;
        }
        let interfaces = self.ancestors(declaration)?;
        for parent in declaration.parents() {
            self.follow(*parent, declaration)?;
        }

        let fields = self
            .field_declarations(declaration, &mut Vec::new())
            .into_iter()
            .map(|field| self.convert_field(field))
            .collect::<Result<Vec<_>>>()?;

        let object = ObjectType::new(name)
            .with_interfaces(interfaces)
            .with_fields(fields)
            .with_directive(Directive::new(Id::new(DOMAIN_DIRECTIVE)))
            .with_description(declaration.description().map(str::to_string));

        Ok(if is_interface {
            TargetNode::Interface(object)
        } else {
            TargetNode::Object(object)
        })
    }

    /// A parent must be a declared object type classified as an interface.
    fn check_parent(&self, declaration: &'a Declaration, parent: Id) -> Result<()> {
        let Some(resolved) = self.index.get(parent) else {
            return Err(ConversionError::UnresolvedTypeReference {
                name: parent,
                referenced_by: declaration.name(),
                origin: origin_of(declaration),
            });
        };

        let is_object = resolved.is_object() && !self.index.is_alias(parent);
        if !is_object || !self.interfaces.contains(&parent) {
            return Err(ConversionError::InvalidParentType {
                name: declaration.name(),
                parent,
                origin: origin_of(declaration),
            });
        }
        Ok(())
    }

    /// Direct parents followed by their own ancestors, without repeats.
    fn ancestors(&self, declaration: &'a Declaration) -> Result<Vec<Id>> {
        let mut ancestors: Vec<Id> = Vec::new();
        let mut pending: Vec<Id> = declaration.parents().to_vec();

        while !pending.is_empty() {
            let mut next = Vec::new();
            for parent in pending {
                if parent == declaration.name() {
                    return Err(ConversionError::CyclicTypeAlias {
                        name: parent,
                        origin: origin_of(declaration),
                    });
                }
                if ancestors.contains(&parent) {
                    continue;
                }
                ancestors.push(parent);
                if let Some(resolved) = self.index.get(parent) {
                    next.extend_from_slice(resolved.parents());
                }
            }
            pending = next;
        }

        Ok(ancestors)
    }

    /// Inherited fields, depth-first in parent order, followed by own fields.
    ///
    /// An own field replaces an inherited field of the same name in place.
    fn field_declarations(&self, declaration: &'a Declaration, seen: &mut Vec<Id>) -> Vec<&'a Field> {
        let mut fields: Vec<&'a Field> = Vec::new();

        for parent in declaration.parents() {
            if seen.contains(parent) {
                continue;
            }
            seen.push(*parent);
            let Some(resolved) = self.index.get(*parent) else {
                continue;
            };
            for field in self.field_declarations(resolved, seen) {
                if !fields.iter().any(|f| f.name() == field.name()) {
                    fields.push(field);
                }
            }
        }

        for field in declaration.fields() {
            match fields.iter_mut().find(|f| f.name() == field.name()) {
                Some(inherited) => *inherited = field,
                None => fields.push(field),
            }
        }

        fields
    }

    fn convert_field(&mut self, field: &'a Field) -> Result<FieldDefinition> {
        let ty = self.visit(field.declaration())?;
        let definition = FieldDefinition::new(field.name(), ty)
            .with_description(field.description().map(str::to_string));

        if self.is_link(field.declaration(), &mut Vec::new()) {
            trace!(field:% = field.name(); "Linked field");
            Ok(definition.with_directive(Directive::new(Id::new(LINK_DIRECTIVE))))
        } else {
            Ok(definition)
        }
    }

    /// Returns `true` if a field of this declaration refers to a separately
    /// declared object type.
    ///
    /// Arrays and aliases are looked through. Inline objects are embedded
    /// values and never linked.
    fn is_link(&self, declaration: &Declaration, seen: &mut Vec<Id>) -> bool {
        let target = match declaration.kind() {
            DeclarationKind::Scalar(_) => return false,
            DeclarationKind::ArrayOf(items) => return self.is_link(items, seen),
            DeclarationKind::Reference(target) => *target,
            DeclarationKind::Object(_) => match declaration.parents() {
                [target] if self.index.is_alias(declaration.name()) => *target,
                _ => return false,
            },
        };

        if seen.contains(&target) {
            return false;
        }
        seen.push(target);

        match self.index.get(target) {
            None => false,
            Some(resolved) if resolved.is_object() && !self.index.is_alias(target) => true,
            Some(resolved) => self.is_link(resolved, seen),
        }
    }
}
