//! Property tests over generated RAML libraries.

use std::fmt::Write as _;

use proptest::{prelude::*, sample::Index};

use ramlql::SchemaBuilder;

const SCALARS: [&str; 10] = [
    "string",
    "integer",
    "number",
    "boolean",
    "date-only",
    "datetime",
    "time-only",
    "file",
    "any",
    "nil",
];

#[derive(Debug, Clone)]
enum FieldType {
    Scalar(&'static str),
    Reference(Index),
}

#[derive(Debug, Clone)]
struct TypeSpec {
    parent: Option<Index>,
    fields: Vec<FieldType>,
}

// ===================
// Strategies
// ===================

fn field_strategy() -> impl Strategy<Value = FieldType> {
    prop_oneof![
        prop::sample::select(SCALARS.to_vec()).prop_map(FieldType::Scalar),
        any::<Index>().prop_map(FieldType::Reference),
    ]
}

fn library_strategy() -> impl Strategy<Value = Vec<TypeSpec>> {
    prop::collection::vec(
        (
            any::<Option<Index>>(),
            prop::collection::vec(field_strategy(), 1..5),
        )
            .prop_map(|(parent, fields)| TypeSpec { parent, fields }),
        1..8,
    )
}

/// Parent of type `i`, always an earlier type so inheritance stays acyclic.
fn parent_of(specs: &[TypeSpec], i: usize) -> Option<usize> {
    match specs[i].parent {
        Some(index) if i > 0 => Some(index.index(i)),
        _ => None,
    }
}

fn render_library(specs: &[TypeSpec]) -> String {
    let mut source = String::from("#%RAML 1.0 Library\ntypes:\n");
    for (i, spec) in specs.iter().enumerate() {
        writeln!(source, "  T{i}:").unwrap();
        if let Some(parent) = parent_of(specs, i) {
            writeln!(source, "    type: T{parent}").unwrap();
        }
        writeln!(source, "    properties:").unwrap();
        for (j, field) in spec.fields.iter().enumerate() {
            match field {
                FieldType::Scalar(kind) => writeln!(source, "      f{j}: {kind}").unwrap(),
                FieldType::Reference(target) => {
                    writeln!(source, "      f{j}: T{}", target.index(specs.len())).unwrap()
                }
            }
        }
    }
    source
}

// ===================
// Property Test Functions
// ===================

/// Translating the same library twice yields the same document.
fn check_translation_is_deterministic(specs: &[TypeSpec]) -> Result<(), TestCaseError> {
    let source = render_library(specs);
    let builder = SchemaBuilder::default();

    let first = builder.translate([("lib.raml", source.as_str())]);
    let second = builder.translate([("lib.raml", source.as_str())]);

    prop_assert!(first.is_ok(), "Failed to translate:\n{source}\n{:?}", first.as_ref().err());
    prop_assert_eq!(first.ok(), second.ok());
    Ok(())
}

/// Parents become interfaces without lookup fields; every other type gets one.
fn check_interfaces_are_not_queryable(specs: &[TypeSpec]) -> Result<(), TestCaseError> {
    let source = render_library(specs);
    let sdl = SchemaBuilder::default()
        .translate([("lib.raml", source.as_str())])
        .map_err(|err| TestCaseError::fail(format!("{err}\n{source}")))?;

    let parents: Vec<usize> = (0..specs.len()).filter_map(|i| parent_of(specs, i)).collect();
    for i in 0..specs.len() {
        let lookup = format!("T{i}ById: [T{i}]");
        if parents.contains(&i) {
            prop_assert!(sdl.contains(&format!("interface T{i} ")), "T{i} is not an interface:\n{sdl}");
            prop_assert!(!sdl.contains(&lookup), "interface T{i} is queryable:\n{sdl}");
        } else {
            prop_assert!(sdl.contains(&format!("type T{i} ")), "T{i} is not an object:\n{sdl}");
            prop_assert!(sdl.contains(&lookup), "T{i} has no lookup field:\n{sdl}");
        }
    }
    Ok(())
}

/// Extended scalars are declared exactly once however often they are used.
fn check_extended_scalars_declared_once(specs: &[TypeSpec]) -> Result<(), TestCaseError> {
    let source = render_library(specs);
    let sdl = SchemaBuilder::default()
        .translate([("lib.raml", source.as_str())])
        .map_err(|err| TestCaseError::fail(err.to_string()))?;

    for scalar in ["scalar Date\n", "scalar DateTime\n", "scalar Time\n"] {
        prop_assert_eq!(sdl.matches(scalar).count(), 1, "{} in\n{}", scalar, sdl);
    }
    Ok(())
}

// ===================
// Proptest Wrappers
// ===================

proptest! {
    #[test]
    fn translation_is_deterministic(specs in library_strategy()) {
        check_translation_is_deterministic(&specs)?;
    }

    #[test]
    fn interfaces_are_not_queryable(specs in library_strategy()) {
        check_interfaces_are_not_queryable(&specs)?;
    }

    #[test]
    fn extended_scalars_declared_once(specs in library_strategy()) {
        check_extended_scalars_declared_once(&specs)?;
    }
}
