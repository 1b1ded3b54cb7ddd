//! Mapping of RAML primitive kinds to GraphQL scalars.

use ramlql_core::{declaration::ScalarKind, identifier::Id, schema::ScalarType};

/// Temporal scalars that GraphQL lacks natively. Every schema declares them.
pub const EXTENDED_SCALARS: [ScalarKind; 3] =
    [ScalarKind::DateTime, ScalarKind::Date, ScalarKind::Time];

/// Maps a primitive kind to the GraphQL scalar representing it.
///
/// `file`, `any` and `nil` have no GraphQL counterpart and are carried as
/// `String`. This is lossy: a `file` field cannot be told apart from a plain
/// string in the generated schema.
pub fn map_scalar(kind: ScalarKind) -> ScalarType {
    match kind {
        ScalarKind::String | ScalarKind::File | ScalarKind::Any | ScalarKind::Nil => {
            ScalarType::builtin(Id::new("String"))
        }
        ScalarKind::Integer => ScalarType::builtin(Id::new("Int")),
        ScalarKind::Number => ScalarType::builtin(Id::new("Float")),
        ScalarKind::Boolean => ScalarType::builtin(Id::new("Boolean")),
        ScalarKind::Date => ScalarType::custom(Id::new("Date")),
        ScalarKind::DateTime => ScalarType::custom(Id::new("DateTime")),
        ScalarKind::Time => ScalarType::custom(Id::new("Time")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_kind_maps_to_a_scalar() {
        for kind in ScalarKind::ALL {
            let scalar = map_scalar(kind);
            assert!(!scalar.name().to_text().is_empty(), "{kind} has no scalar");
        }
    }

    #[test]
    fn test_native_scalars() {
        assert_eq!(map_scalar(ScalarKind::String).name(), "String");
        assert_eq!(map_scalar(ScalarKind::Integer).name(), "Int");
        assert_eq!(map_scalar(ScalarKind::Number).name(), "Float");
        assert_eq!(map_scalar(ScalarKind::Boolean).name(), "Boolean");
        assert!(map_scalar(ScalarKind::Boolean).is_builtin());
    }

    #[test]
    fn test_temporal_kinds_are_extended_scalars() {
        for kind in EXTENDED_SCALARS {
            assert!(!map_scalar(kind).is_builtin());
        }
        assert_eq!(map_scalar(ScalarKind::Date).name(), "Date");
        assert_eq!(map_scalar(ScalarKind::DateTime).name(), "DateTime");
        assert_eq!(map_scalar(ScalarKind::Time).name(), "Time");
    }

    #[test]
    fn test_lossy_kinds_fall_back_to_string() {
        for kind in [ScalarKind::File, ScalarKind::Any, ScalarKind::Nil] {
            assert_eq!(map_scalar(kind), ScalarType::builtin(Id::new("String")));
        }
    }
}
