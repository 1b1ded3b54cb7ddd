//! Integration tests for the SchemaBuilder API
//!
//! These tests run RAML sources through parsing, conversion and rendering.

use indoc::indoc;

use ramlql::{
    ConversionError, RamlqlError, SchemaBuilder,
    config::{AppConfig, OutputConfig, SchemaConfig},
    identifier::Id,
};

const PEOPLE: &str = indoc! {"
    #%RAML 1.0 Library
    types:
      Person:
        properties:
          name: string
          address: Address
      Address:
        properties:
          street: string
"};

#[test]
fn test_builder_api_exists() {
    let _builder = SchemaBuilder::default();
}

#[test]
fn test_person_and_address_schema() {
    let builder = SchemaBuilder::default();
    let sdl = builder
        .translate([("people.raml", PEOPLE)])
        .expect("Failed to translate");

    let expected = indoc! {"
        directive @domain on OBJECT | INTERFACE

        directive @link on FIELD_DEFINITION

        type Person @domain {
          name: String
          address: Address @link
        }

        type Address @domain {
          street: String
        }

        scalar DateTime

        scalar Date

        scalar Time

        type Query {
          PersonById: [Person]
          AddressById: [Address]
        }
    "};
    assert_eq!(sdl, expected);
}

#[test]
fn test_inheritance_across_files() {
    let dogs = indoc! {"
        #%RAML 1.0 Library
        types:
          Dog:
            type: Animal
            properties:
              breed: string
    "};
    let animals = indoc! {"
        #%RAML 1.0 Library
        types:
          Animal:
            description: Anything alive
            properties:
              name: string
    "};

    let builder = SchemaBuilder::default();
    let sdl = builder
        .translate([("dogs.raml", dogs), ("animals.raml", animals)])
        .expect("Failed to translate");

    assert!(sdl.contains(indoc! {r#"
        type Dog implements Animal @domain {
          name: String
          breed: String
        }
    "#}));
    assert!(sdl.contains(indoc! {r#"
        """
        Anything alive
        """
        interface Animal @domain {
          name: String
        }
    "#}));
    assert!(sdl.contains("DogById: [Dog]"));
    assert!(!sdl.contains("AnimalById"));
}

#[test]
fn test_inline_objects_are_embedded_and_arrays_are_lists() {
    let source = indoc! {"
        #%RAML 1.0 Library
        types:
          Person:
            properties:
              home:
                properties:
                  street: string
              friends: Person[]
              born: date-only
              seen:
                type: array
                items: datetime
    "};

    let builder = SchemaBuilder::default();
    let sdl = builder.translate([("person.raml", source)]).unwrap();

    assert!(sdl.contains(indoc! {"
        type Person @domain {
          home: PersonHome
          friends: [Person] @link
          born: Date
          seen: [DateTime]
        }
    "}));
    assert!(sdl.contains("type PersonHome @domain {"));
    // Inline objects are still top-level types but get no lookup field
    assert!(sdl.contains("PersonById: [Person]"));
    assert!(!sdl.contains("PersonHomeById"));
    assert_eq!(sdl.matches("scalar Date\n").count(), 1);
}

#[test]
fn test_parse_error_keeps_source_and_origin() {
    let builder = SchemaBuilder::default();
    let err = builder
        .parse("#%RAML 1.0 Library\ntypes:\n  A: x.B\n", "broken.raml")
        .unwrap_err();

    match err {
        RamlqlError::Parse { src, origin, .. } => {
            assert!(src.contains("x.B"));
            assert_eq!(origin, "broken.raml");
        }
        other => panic!("Expected a parse error, got {other:?}"),
    }
}

#[test]
fn test_non_library_files_contribute_nothing() {
    let builder = SchemaBuilder::default();
    let sdl = builder
        .translate([("people.raml", PEOPLE), ("README.md", "# People\n")])
        .unwrap();

    assert!(sdl.contains("PersonById"));
}

#[test]
fn test_unresolved_reference_aborts_the_run() {
    let source = indoc! {"
        #%RAML 1.0 Library
        types:
          Person:
            properties:
              address: Address
    "};

    let builder = SchemaBuilder::default();
    let err = builder.translate([("people.raml", source)]).unwrap_err();

    assert!(matches!(
        err,
        RamlqlError::Conversion(ConversionError::UnresolvedTypeReference { name, .. })
            if name == Id::new("Address")
    ));
}

#[test]
fn test_duplicate_declarations_across_files() {
    let builder = SchemaBuilder::default();
    let err = builder
        .translate([("a.raml", PEOPLE), ("b.raml", PEOPLE)])
        .unwrap_err();

    assert!(matches!(
        err,
        RamlqlError::Conversion(ConversionError::DuplicateNameConflict { .. })
    ));
    assert!(err.to_string().contains("a.raml and b.raml"));
}

#[test]
fn test_builder_with_config() {
    let config = AppConfig::new(
        SchemaConfig::new("Root", "Lookup"),
        OutputConfig::default().with_indent(4),
    );
    let builder = SchemaBuilder::new(config);
    let sdl = builder.translate([("people.raml", PEOPLE)]).unwrap();

    assert!(sdl.contains("type Root {\n    PersonLookup: [Person]\n"));
}

#[test]
fn test_builder_reusability() {
    let builder = SchemaBuilder::default();

    let first = builder.translate([("people.raml", PEOPLE)]).unwrap();
    let second = builder.translate([("people.raml", PEOPLE)]).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_inline_objects_with_clashing_names_are_a_parse_error() {
    let source = indoc! {"
        #%RAML 1.0 Library
        types:
          Person:
            properties:
              home_address:
                properties:
                  street: string
              homeAddress:
                properties:
                  city: string
    "};

    let builder = SchemaBuilder::default();
    let err = builder.translate([("a.raml", source)]).unwrap_err();

    match err {
        RamlqlError::Parse { err, origin, .. } => {
            assert_eq!(origin, "a.raml");
            assert!(err.to_string().contains("PersonHomeAddress"));
        }
        other => panic!("Expected a parse error, got {other:?}"),
    }
}
