//! Name index over every declaration of a conversion run.
//!
//! References and parent types name declarations that may appear anywhere in
//! the run, before or after the declaration using them. The index is built
//! once, before any conversion, and answers every later lookup. Building it
//! is also where duplicate names are rejected.

use indexmap::{IndexMap, IndexSet};
use log::debug;

use ramlql_core::{
    declaration::{Declaration, DeclarationKind},
    identifier::Id,
};

use crate::error::ConversionError;

/// Every named declaration of a run, keyed by name.
///
/// Top-level declarations of any kind are indexed, together with the inline
/// object types nested in their fields and array items.
#[derive(Debug)]
pub struct DeclarationIndex<'a> {
    declarations: IndexMap<Id, &'a Declaration>,
    aliases: IndexSet<Id>,
}

impl<'a> DeclarationIndex<'a> {
    /// Indexes `declarations`.
    ///
    /// Names in `reserved` belong to the schema itself (the query type and the
    /// scalars) and cannot be declared.
    ///
    /// # Errors
    ///
    /// Returns [`ConversionError::DuplicateNameConflict`] when two
    /// declarations share a name or a declaration uses a reserved name, and
    /// [`ConversionError::CyclicTypeAlias`] when aliases refer to each other in
    /// a loop.
    pub fn build(declarations: &'a [Declaration], reserved: &[Id]) -> Result<Self, ConversionError> {
        let mut index = Self {
            declarations: IndexMap::new(),
            aliases: IndexSet::new(),
        };

        for declaration in declarations {
            index.insert(declaration, reserved)?;
        }
        index.aliases = index.find_aliases()?;

        debug!(
            declarations_len = index.declarations.len(),
            aliases_len = index.aliases.len();
            "Declarations indexed",
        );
        Ok(index)
    }

    pub fn get(&self, name: Id) -> Option<&'a Declaration> {
        self.declarations.get(&name).copied()
    }

    /// Iterates the indexed declarations, top-level ones before their nested
    /// inline objects.
    pub fn declarations(&self) -> impl Iterator<Item = &'a Declaration> + '_ {
        self.declarations.values().copied()
    }

    /// Returns `true` if `name` is an object declaration that only renames a
    /// scalar or array type, e.g. `WorkEmail: Email` with `Email: string`.
    ///
    /// Such declarations carry no fields of their own and stand for the type
    /// they rename wherever they are used.
    pub fn is_alias(&self, name: Id) -> bool {
        self.aliases.contains(&name)
    }

    fn insert(&mut self, declaration: &'a Declaration, reserved: &[Id]) -> Result<(), ConversionError> {
        let name = declaration.name();

        if reserved.contains(&name) {
            return Err(ConversionError::DuplicateNameConflict {
                name,
                first_origin: None,
                second_origin: declaration.origin().map(str::to_string),
            });
        }
        if let Some(existing) = self.declarations.get(&name) {
            return Err(ConversionError::DuplicateNameConflict {
                name,
                first_origin: existing.origin().map(str::to_string),
                second_origin: declaration.origin().map(str::to_string),
            });
        }

        self.declarations.insert(name, declaration);
        self.insert_nested(declaration, reserved)
    }

    fn insert_nested(
        &mut self,
        declaration: &'a Declaration,
        reserved: &[Id],
    ) -> Result<(), ConversionError> {
        match declaration.kind() {
            DeclarationKind::Object(fields) => fields
                .iter()
                .try_for_each(|field| self.insert_inline(field.declaration(), reserved)),
            DeclarationKind::ArrayOf(items) => self.insert_inline(items, reserved),
            DeclarationKind::Scalar(_) | DeclarationKind::Reference(_) => Ok(()),
        }
    }

    /// Nested objects are named types of their own; other nested kinds are not.
    fn insert_inline(
        &mut self,
        declaration: &'a Declaration,
        reserved: &[Id],
    ) -> Result<(), ConversionError> {
        if declaration.is_object() {
            self.insert(declaration, reserved)
        } else {
            self.insert_nested(declaration, reserved)
        }
    }

    fn find_aliases(&self) -> Result<IndexSet<Id>, ConversionError> {
        let mut aliases = IndexSet::new();

        for declaration in self.declarations.values() {
            let [parent] = declaration.parents() else {
                continue;
            };
            if !declaration.is_object() || !declaration.fields().is_empty() {
                continue;
            }
            let mut chain = vec![declaration.name()];
            if self.denotes_value(*parent, &mut chain)? {
                debug!(alias:% = declaration.name(), target:% = parent; "Object declaration is an alias");
                aliases.insert(declaration.name());
            }
        }
        Ok(aliases)
    }

    /// Returns `true` if `name` ultimately denotes a scalar or array type.
    ///
    /// Unknown names are not values; they are reported when first used.
    fn denotes_value(&self, name: Id, chain: &mut Vec<Id>) -> Result<bool, ConversionError> {
        let Some(declaration) = self.get(name) else {
            return Ok(false);
        };
        if chain.contains(&name) {
            return Err(ConversionError::CyclicTypeAlias {
                name,
                origin: declaration.origin().map(str::to_string),
            });
        }

        let next = match declaration.kind() {
            DeclarationKind::Scalar(_) | DeclarationKind::ArrayOf(_) => return Ok(true),
            DeclarationKind::Reference(target) => *target,
            DeclarationKind::Object(fields) => match declaration.parents() {
                [parent] if fields.is_empty() => *parent,
                _ => return Ok(false),
            },
        };

        chain.push(name);
        let denotes_value = self.denotes_value(next, chain);
        chain.pop();
        denotes_value
    }
}
