//! Identifier management using string interning.
//!
//! Type names, field names and library aliases all flow through the pipeline
//! as [`Id`] values, so equality checks and map lookups never compare strings.

use std::{
    fmt,
    sync::{Mutex, MutexGuard, OnceLock},
};

use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Global string interner backing every [`Id`].
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn interner() -> MutexGuard<'static, DefaultStringInterner> {
    INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        .expect("Failed to acquire interner lock")
}

/// Interned identifier for a type, field or alias name.
///
/// # Examples
///
/// ```
/// use ramlql_core::identifier::Id;
///
/// let person = Id::new("Person");
/// assert_eq!(person, "Person");
/// assert_eq!(person.with_suffix("ById"), "PersonById");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    /// Creates an `Id` from a name, interning it on first use.
    pub fn new(name: &str) -> Self {
        Self(interner().get_or_intern(name))
    }

    /// Creates a new `Id` by appending `suffix` to this identifier.
    ///
    /// Used for synthesized names such as query lookup fields
    /// (`Person` + `ById`) and inline object types (`Person` + `Address`).
    pub fn with_suffix(&self, suffix: &str) -> Self {
        let mut interner = interner();
        let name = format!(
            "{}{}",
            interner
                .resolve(self.0)
                .expect("Symbol should exist in interner"),
            suffix
        );
        Self(interner.get_or_intern(name))
    }

    /// Returns an owned copy of the identifier text.
    pub fn to_text(&self) -> String {
        interner()
            .resolve(self.0)
            .expect("Symbol should exist in interner")
            .to_string()
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Resolve into an owned string first so the lock is not held while
        // the formatter runs.
        let text = self.to_text();
        f.write_str(&text)
    }
}

impl std::str::FromStr for Id {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for Id {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for Id {
    fn eq(&self, other: &str) -> bool {
        interner()
            .resolve(self.0)
            .is_some_and(|text| text == other)
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}
