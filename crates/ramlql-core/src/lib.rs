//! RamlQL Core Types
//!
//! This crate provides the shared model used on both sides of the RAML to
//! GraphQL translation:
//!
//! - **Identifiers**: String-interned names ([`identifier::Id`])
//! - **Declarations**: The source type tree produced by the parser ([`declaration`] module)
//! - **Schema**: The target type graph consumed by renderers ([`schema`] module)

pub mod declaration;
pub mod identifier;
pub mod schema;
