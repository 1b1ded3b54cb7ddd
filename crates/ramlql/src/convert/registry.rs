//! Name-keyed registry of converted types.
//!
//! The registry is the memoization backbone of a conversion run. An object
//! type is reserved before its fields are converted and defined afterwards,
//! so a field referring back to a type still being converted finds the
//! reservation instead of starting the conversion again.

use indexmap::IndexMap;
use log::debug;

use ramlql_core::{
    identifier::Id,
    schema::{ScalarType, TargetNode},
};

use crate::error::ConversionError;

#[derive(Debug)]
enum Slot {
    Reserved,
    Defined(TargetNode),
}

/// Converted types of one run, in first-visit order.
#[derive(Debug, Default)]
pub struct TypeRegistry {
    slots: IndexMap<Id, Slot>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if `name` is reserved or defined.
    pub fn contains(&self, name: Id) -> bool {
        self.slots.contains_key(&name)
    }

    /// Claims `name` for a type whose conversion is in progress.
    ///
    /// # Errors
    ///
    /// Returns [`ConversionError::DuplicateNameConflict`] if the name is
    /// already taken.
    pub fn reserve(&mut self, name: Id) -> Result<(), ConversionError> {
        if self.slots.contains_key(&name) {
            return Err(duplicate(name));
        }
        self.slots.insert(name, Slot::Reserved);
        Ok(())
    }

    /// Stores `node` under its name.
    ///
    /// A reserved slot is filled in place, keeping its original position.
    ///
    /// # Errors
    ///
    /// Returns [`ConversionError::DuplicateNameConflict`] if a node with the
    /// same name is already defined.
    pub fn put(&mut self, node: TargetNode) -> Result<(), ConversionError> {
        let name = node.name();
        match self.slots.get_mut(&name) {
            Some(Slot::Defined(_)) => Err(duplicate(name)),
            Some(slot) => {
                *slot = Slot::Defined(node);
                Ok(())
            }
            None => {
                self.slots.insert(name, Slot::Defined(node));
                Ok(())
            }
        }
    }

    /// Registers a scalar. Registering the same scalar again is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`ConversionError::DuplicateNameConflict`] if the name is
    /// taken by a different type.
    pub fn register_scalar(&mut self, scalar: ScalarType) -> Result<(), ConversionError> {
        let name = scalar.name();
        match self.slots.get(&name) {
            Some(Slot::Defined(TargetNode::Scalar(existing))) if *existing == scalar => Ok(()),
            Some(_) => Err(duplicate(name)),
            None => {
                debug!(scalar:% = name; "Registering scalar");
                self.slots.insert(name, Slot::Defined(TargetNode::Scalar(scalar)));
                Ok(())
            }
        }
    }

    /// Consumes the registry, returning every node in first-visit order.
    ///
    /// # Errors
    ///
    /// Returns [`ConversionError::IncompleteType`] if a reservation was
    /// never filled.
    pub fn into_types(self) -> Result<IndexMap<Id, TargetNode>, ConversionError> {
        self.slots
            .into_iter()
            .map(|(name, slot)| match slot {
                Slot::Defined(node) => Ok((name, node)),
                Slot::Reserved => Err(ConversionError::IncompleteType { name }),
            })
            .collect()
    }
}

fn duplicate(name: Id) -> ConversionError {
    ConversionError::DuplicateNameConflict {
        name,
        first_origin: None,
        second_origin: None,
    }
}
