//! Interface inference.
//!
//! RAML has no interfaces; a type becomes one in the generated schema
//! because another object type extends it. The set is computed over the
//! whole run before anything is converted, since a subtype may be declared
//! before or after its parent.

use indexmap::IndexSet;
use log::debug;

use ramlql_core::identifier::Id;

use super::index::DeclarationIndex;

/// Returns the names used as a parent by at least one object declaration.
///
/// Only direct parents count; a grandparent is an interface because its own
/// child extends it, not because of the grandchild. Aliases such as
/// `WorkEmail: Email` rename a type rather than extend it and contribute
/// nothing.
pub fn infer_interfaces(index: &DeclarationIndex<'_>) -> IndexSet<Id> {
    let mut interfaces = IndexSet::new();

    for declaration in index.declarations() {
        if !declaration.is_object() || index.is_alias(declaration.name()) {
            continue;
        }
        for parent in declaration.parents() {
            if interfaces.insert(*parent) {
                debug!(interface:% = parent, child:% = declaration.name(); "Interface inferred");
            }
        }
    }

    interfaces
}

#[cfg(test)]
mod tests {
    use ramlql_core::declaration::{Declaration, Field, ScalarKind};

    use super::*;

    fn object(name: &str, parents: &[&str]) -> Declaration {
        Declaration::object(Id::new(name), Vec::new())
            .with_parents(parents.iter().map(|p| Id::new(p)).collect())
    }

    fn infer(declarations: &[Declaration]) -> Vec<String> {
        let index = DeclarationIndex::build(declarations, &[]).unwrap();
        infer_interfaces(&index).iter().map(Id::to_text).collect()
    }

    #[test]
    fn test_parents_become_interfaces() {
        let declarations = vec![
            object("Dog", &["Animal"]),
            object("Animal", &[]),
            object("Person", &[]),
        ];
        assert_eq!(infer(&declarations), vec!["Animal"]);
    }

    #[test]
    fn test_every_parent_of_multiple_inheritance() {
        let declarations = vec![
            object("Animal", &[]),
            object("Named", &[]),
            object("Pet", &["Animal", "Named"]),
            object("Cat", &["Animal"]),
        ];
        assert_eq!(infer(&declarations), vec!["Animal", "Named"]);
    }

    #[test]
    fn test_inference_is_not_transitive() {
        let declarations = vec![
            object("Puppy", &["Dog"]),
            object("Dog", &["Animal"]),
            object("Animal", &[]),
        ];
        let interfaces = infer(&declarations);

        assert!(interfaces.contains(&"Dog".to_string()));
        assert!(interfaces.contains(&"Animal".to_string()));
        assert!(!interfaces.contains(&"Puppy".to_string()));
    }

    #[test]
    fn test_inline_objects_are_scanned() {
        let declarations = vec![
            object("Animal", &[]),
            Declaration::object(
                Id::new("Person"),
                vec![Field::new(Id::new("pet"), object("PersonPet", &["Animal"]))],
            ),
        ];
        assert_eq!(infer(&declarations), vec!["Animal"]);
    }

    #[test]
    fn test_aliases_do_not_create_interfaces() {
        let declarations = vec![
            Declaration::scalar(Id::new("Email"), ScalarKind::String),
            object("WorkEmail", &["Email"]),
        ];
        assert!(infer(&declarations).is_empty());
    }
}
