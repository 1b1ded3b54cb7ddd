//! Elaboration phase for the RAML syntax tree
//!
//! This module gives RAML meaning to the YAML tree produced by the parser:
//! it reads the `uses` and `types` sections of a library, resolves type
//! expressions and facets, names inline object types and builds the
//! [`Declaration`] model consumed by the converter.

use std::str::FromStr;

use log::{debug, info, trace};

use ramlql_core::{
    declaration::{Declaration, DeclarationKind, Field, ScalarKind},
    identifier::Id,
};

use crate::{
    error::{Diagnostic, ErrorCode, Result},
    parser_types::{Document, Entry, Mapping, Node},
    span::{Span, Spanned},
    type_expr::{TypeExpr, parse_type_expr},
};

/// A `uses` entry of a library: `alias: path/to/library.raml`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryUse {
    alias: String,
    path: String,
}

impl LibraryUse {
    pub fn alias(&self) -> &str {
        &self.alias
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

/// The elaborated content of one RAML library file.
#[derive(Debug, Clone, Default)]
pub struct Library {
    declarations: Vec<Declaration>,
    uses: Vec<LibraryUse>,
}

impl Library {
    /// Top-level type declarations in file order.
    pub fn declarations(&self) -> &[Declaration] {
        &self.declarations
    }

    pub fn uses(&self) -> &[LibraryUse] {
        &self.uses
    }

    pub fn into_declarations(self) -> Vec<Declaration> {
        self.declarations
    }
}

/// Where a declaration appears; decides how a bare user type name is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placement {
    /// Under `types:`; `Name: Other` declares a subtype of `Other`.
    TopLevel,
    /// A property or array item; a bare `Other` refers to `Other`.
    Nested,
}

/// Facets of a type declaration written as a mapping.
#[derive(Default)]
struct Facets<'a, 'src> {
    type_node: Option<&'a Node<'src>>,
    properties: Option<&'a Node<'src>>,
    items: Option<&'a Node<'src>>,
    description: Option<String>,
}

/// Returns `true` for names usable as GraphQL type and field names.
fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// `home_address` -> `HomeAddress`
fn pascal_case(name: &str) -> String {
    name.split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}

/// Returns `true` if `declaration` is an inline object, possibly as array items.
fn declares_inline_object(declaration: &Declaration) -> bool {
    match declaration.kind() {
        DeclarationKind::Object(_) => true,
        DeclarationKind::ArrayOf(items) => declares_inline_object(items),
        DeclarationKind::Scalar(_) | DeclarationKind::Reference(_) => false,
    }
}

/// Report the first key that appears twice in a mapping.
fn check_duplicate_keys(mapping: &Mapping<'_>, what: &str) -> Result<()> {
    for (index, entry) in mapping.entries.iter().enumerate() {
        let key = *entry.key.inner();
        if let Some(first) = mapping.entries[..index]
            .iter()
            .find(|earlier| *earlier.key.inner() == key)
        {
            return Err(Diagnostic::error(format!("{what} `{key}` is defined multiple times"))
                .with_code(ErrorCode::E301)
                .with_label(entry.key.span(), "duplicate key")
                .with_secondary_label(first.key.span(), "first defined here")
                .with_help("remove the duplicate or use a different name"));
        }
    }
    Ok(())
}

fn expect_mapping<'a, 'src>(node: &'a Node<'src>, facet: &str) -> Result<&'a Mapping<'src>> {
    node.as_mapping().ok_or_else(|| {
        Diagnostic::error(format!("`{facet}` must be a mapping, found {}", node.kind_name()))
            .with_code(ErrorCode::E302)
            .with_label(node.span(), "expected a mapping")
    })
}

fn expect_scalar<'a, 'src>(
    node: &'a Node<'src>,
    facet: &str,
) -> Result<&'a Spanned<&'src str>> {
    node.as_scalar().ok_or_else(|| {
        Diagnostic::error(format!("`{facet}` must be a scalar, found {}", node.kind_name()))
            .with_code(ErrorCode::E302)
            .with_label(node.span(), "expected a scalar")
    })
}

pub struct Builder<'a> {
    origin: &'a str,
    aliases: Vec<LibraryUse>,
}

impl<'a> Builder<'a> {
    pub fn new(origin: &'a str) -> Self {
        Self {
            origin,
            aliases: Vec::new(),
        }
    }

    // ============================================================================
    // Main Entry Methods
    // ============================================================================

    pub fn build(mut self, document: &Document<'_>) -> Result<Library> {
        let root = &document.root;
        check_duplicate_keys(root, "key")?;

        if let Some(uses) = root.get("uses") {
            self.read_uses(&uses.value)?;
        }

        let mut declarations = Vec::new();
        for section in ["types", "schemas"] {
            let Some(entry) = root.get(section) else {
                continue;
            };
            if matches!(entry.value, Node::Null(_)) {
                continue;
            }
            let types = expect_mapping(&entry.value, section)?;
            check_duplicate_keys(types, "type")?;

            for entry in &types.entries {
                let declaration = self.type_declaration(entry)?.with_origin(self.origin);
                trace!(declaration:?; "Elaborated declaration");
                declarations.push(declaration);
            }
        }

        info!(
            origin = self.origin,
            declarations_len = declarations.len();
            "Library elaborated",
        );

        Ok(Library {
            declarations,
            uses: self.aliases,
        })
    }

    fn read_uses(&mut self, node: &Node<'_>) -> Result<()> {
        if matches!(node, Node::Null(_)) {
            return Ok(());
        }
        let uses = expect_mapping(node, "uses")?;
        check_duplicate_keys(uses, "library alias")?;

        for entry in &uses.entries {
            let path = expect_scalar(&entry.value, "uses")?;
            debug!(alias = *entry.key.inner(), path = *path.inner(); "Library alias");
            self.aliases.push(LibraryUse {
                alias: entry.key.inner().to_string(),
                path: path.inner().to_string(),
            });
        }
        Ok(())
    }

    // ============================================================================
    // Declarations
    // ============================================================================

    fn type_declaration(&self, entry: &Entry<'_>) -> Result<Declaration> {
        let name = *entry.key.inner();
        if !is_valid_name(name) {
            return Err(Diagnostic::error(format!("invalid type name `{name}`"))
                .with_code(ErrorCode::E303)
                .with_label(entry.key.span(), "invalid name")
                .with_help("type names must match `[_A-Za-z][_0-9A-Za-z]*`"));
        }

        self.declaration(Id::new(name), &entry.value, Placement::TopLevel)
    }

    /// Build the declaration named `name` from a type node.
    fn declaration(&self, name: Id, node: &Node<'_>, placement: Placement) -> Result<Declaration> {
        match node {
            // RAML's default type is `string`
            Node::Null(_) => Ok(Declaration::scalar(name, ScalarKind::String)),
            Node::Scalar(text) => self.expression_declaration(name, text, placement),
            Node::Sequence(items) => Err(Diagnostic::error(format!(
                "declaration of `{name}` must be a type expression or a mapping of facets"
            ))
            .with_code(ErrorCode::E302)
            .with_label(items.span(), "unexpected sequence")
            .with_help("use `type: [A, B]` to inherit from several types")),
            Node::Mapping(mapping) => self.facet_declaration(name, mapping, placement),
        }
    }

    fn facet_declaration(
        &self,
        name: Id,
        mapping: &Mapping<'_>,
        placement: Placement,
    ) -> Result<Declaration> {
        check_duplicate_keys(mapping, "facet")?;
        let facets = self.facets(mapping)?;

        let declaration = if let Some(properties) = facets.properties {
            let parents = match facets.type_node {
                Some(type_node) => self.object_parents(name, type_node)?,
                None => Vec::new(),
            };
            let fields = self.fields(name, properties)?;
            Declaration::object(name, fields).with_parents(parents)
        } else if let Some(items) = facets.items {
            if let Some(type_node) = facets.type_node {
                let text = expect_scalar(type_node, "type")?;
                if *text.inner() != "array" {
                    return Err(Diagnostic::error(format!(
                        "`items` is only allowed on array types, `{name}` is `{}`",
                        text.inner()
                    ))
                    .with_code(ErrorCode::E306)
                    .with_label(text.span(), "not an array type"));
                }
            }
            let item = self.declaration(name.with_suffix("Item"), items, Placement::Nested)?;
            Declaration::array_of(name, item)
        } else {
            match facets.type_node {
                None => Declaration::scalar(name, ScalarKind::String),
                Some(type_node @ Node::Sequence(_)) => {
                    let parents = self.object_parents(name, type_node)?;
                    Declaration::object(name, Vec::new()).with_parents(parents)
                }
                Some(type_node) => self.declaration(name, type_node, placement)?,
            }
        };

        Ok(match facets.description {
            Some(description) => declaration.with_description(description),
            None => declaration,
        })
    }

    fn facets<'m, 'src>(&self, mapping: &'m Mapping<'src>) -> Result<Facets<'m, 'src>> {
        let mut facets = Facets::default();

        for entry in &mapping.entries {
            match *entry.key.inner() {
                "type" | "schema" => {
                    if facets.type_node.is_some() {
                        return Err(Diagnostic::error("both `type` and `schema` are given")
                            .with_code(ErrorCode::E301)
                            .with_label(entry.key.span(), "second type facet")
                            .with_help("`schema` is a deprecated synonym of `type`; keep one"));
                    }
                    facets.type_node = Some(&entry.value);
                }
                "properties" => facets.properties = Some(&entry.value),
                "items" => facets.items = Some(&entry.value),
                "description" => {
                    if !matches!(entry.value, Node::Null(_)) {
                        let text = expect_scalar(&entry.value, "description")?;
                        facets.description = Some(text.inner().trim_end().to_string());
                    }
                }
                other => trace!(facet = other; "Ignoring facet"),
            }
        }

        Ok(facets)
    }

    /// Read the parents of an object declaration from its `type` facet.
    ///
    /// `object` contributes no parent; built-in scalars and arrays cannot
    /// carry properties.
    fn object_parents(&self, name: Id, type_node: &Node<'_>) -> Result<Vec<Id>> {
        let expressions: Vec<&Spanned<&str>> = match type_node {
            Node::Null(_) => return Ok(Vec::new()),
            Node::Scalar(text) => vec![text],
            Node::Sequence(items) => items
                .iter()
                .map(|item| expect_scalar(item, "type"))
                .collect::<Result<_>>()?,
            Node::Mapping(mapping) => {
                return Err(Diagnostic::error(format!(
                    "inline type declarations are not supported in the `type` of `{name}`"
                ))
                .with_code(ErrorCode::E302)
                .with_label(mapping.span, "unexpected mapping")
                .with_help("declare the type under `types` and refer to it by name"));
            }
        };

        let mut parents = Vec::new();
        for text in expressions {
            match self.type_expr(text)? {
                TypeExpr::Named { name: "object", library: None } => {}
                TypeExpr::Named { library, name: parent } => {
                    if library.is_none() && ScalarKind::from_str(parent).is_ok() {
                        return Err(Diagnostic::error(format!(
                            "`{name}` has properties but extends the built-in type `{parent}`"
                        ))
                        .with_code(ErrorCode::E306)
                        .with_label(text.span(), "not an object type"));
                    }
                    parents.push(Id::new(parent));
                }
                TypeExpr::Array(_) | TypeExpr::Union(_) => {
                    return Err(Diagnostic::error(format!(
                        "`{name}` can only extend named object types"
                    ))
                    .with_code(ErrorCode::E306)
                    .with_label(text.span(), "not an object type"));
                }
            }
        }
        Ok(parents)
    }

    fn fields(&self, owner: Id, properties: &Node<'_>) -> Result<Vec<Field>> {
        if matches!(properties, Node::Null(_)) {
            return Ok(Vec::new());
        }
        let properties = expect_mapping(properties, "properties")?;
        check_duplicate_keys(properties, "property")?;

        let mut fields = Vec::new();
        let mut inline_names: Vec<(Id, &Entry<'_>)> = Vec::new();
        for entry in &properties.entries {
            let key = *entry.key.inner();
            if key.len() > 1 && key.starts_with('/') && key.ends_with('/') {
                debug!(owner:%, pattern = key; "Skipping pattern property");
                continue;
            }

            let name = key.strip_suffix('?').unwrap_or(key);
            if !is_valid_name(name) {
                return Err(Diagnostic::error(format!("invalid property name `{name}`"))
                    .with_code(ErrorCode::E303)
                    .with_label(entry.key.span(), "invalid name")
                    .with_help("property names must match `[_A-Za-z][_0-9A-Za-z]*`"));
            }

            let declaration_name = Id::new(&format!("{owner}{}", pascal_case(name)));
            let declaration =
                self.declaration(declaration_name, &entry.value, Placement::Nested)?;
            if declares_inline_object(&declaration) {
                if let Some((_, first)) = inline_names
                    .iter()
                    .find(|(earlier, _)| *earlier == declaration_name)
                {
                    return Err(Diagnostic::error(format!(
                        "properties `{}` and `{key}` both name their inline type `{declaration_name}`",
                        first.key.inner()
                    ))
                    .with_code(ErrorCode::E307)
                    .with_label(entry.key.span(), "second inline type")
                    .with_secondary_label(first.key.span(), "first inline type")
                    .with_help("declare one of the inline types as a named type under `types`"));
                }
                inline_names.push((declaration_name, entry));
            }
            let description = declaration.description().map(str::to_string);
            let field = Field::new(Id::new(name), declaration);
            fields.push(match description {
                Some(description) => field.with_description(description),
                None => field,
            });
        }
        Ok(fields)
    }

    // ============================================================================
    // Type Expressions
    // ============================================================================

    fn type_expr<'t>(&self, text: &Spanned<&'t str>) -> Result<TypeExpr<'t>> {
        let expr = parse_type_expr(*text.inner()).map_err(|err| {
            Diagnostic::error(format!("invalid type expression `{}`: {err}", text.inner()))
                .with_code(ErrorCode::E304)
                .with_label(text.span(), "invalid type expression")
        })?;
        self.check_libraries(&expr, text.span())?;
        Ok(expr)
    }

    /// Every library alias used in an expression must be declared in `uses`.
    fn check_libraries(&self, expr: &TypeExpr<'_>, span: Span) -> Result<()> {
        match expr {
            TypeExpr::Named {
                library: Some(alias),
                name,
            } => {
                if self.aliases.iter().any(|library| library.alias == *alias) {
                    Ok(())
                } else {
                    Err(Diagnostic::error(format!(
                        "unknown library `{alias}` in `{alias}.{name}`"
                    ))
                    .with_code(ErrorCode::E300)
                    .with_label(span, "undeclared library alias")
                    .with_help(format!("declare it under `uses`, e.g. `{alias}: {alias}.raml`")))
                }
            }
            TypeExpr::Named { library: None, .. } => Ok(()),
            TypeExpr::Array(inner) => self.check_libraries(inner, span),
            TypeExpr::Union(alternatives) => alternatives
                .iter()
                .try_for_each(|alternative| self.check_libraries(alternative, span)),
        }
    }

    fn expression_declaration(
        &self,
        name: Id,
        text: &Spanned<&str>,
        placement: Placement,
    ) -> Result<Declaration> {
        let expr = self.type_expr(text)?;
        self.declaration_from_expr(name, &expr, placement, text.span())
    }

    fn declaration_from_expr(
        &self,
        name: Id,
        expr: &TypeExpr<'_>,
        placement: Placement,
        span: Span,
    ) -> Result<Declaration> {
        match expr {
            TypeExpr::Named {
                library: None,
                name: "object",
            } => Ok(Declaration::object(name, Vec::new())),
            TypeExpr::Named {
                library: None,
                name: "array",
            } => Ok(Declaration::array_of(
                name,
                Declaration::scalar(name.with_suffix("Item"), ScalarKind::Any),
            )),
            TypeExpr::Named {
                library,
                name: target,
            } => {
                if library.is_none() {
                    if let Ok(kind) = ScalarKind::from_str(target) {
                        return Ok(Declaration::scalar(name, kind));
                    }
                }
                let target = Id::new(target);
                Ok(match placement {
                    Placement::TopLevel => {
                        debug!(name:%, parent:% = target; "Declaration extends a named type");
                        Declaration::object(name, Vec::new()).with_parents(vec![target])
                    }
                    Placement::Nested => Declaration::reference(name, target),
                })
            }
            TypeExpr::Array(inner) => {
                let item = self.declaration_from_expr(
                    name.with_suffix("Item"),
                    inner,
                    Placement::Nested,
                    span,
                )?;
                Ok(Declaration::array_of(name, item))
            }
            TypeExpr::Union(_) => Err(Diagnostic::error(format!(
                "union type in the declaration of `{name}` is not supported"
            ))
            .with_code(ErrorCode::E305)
            .with_label(span, "union type")
            .with_help("GraphQL object fields cannot hold unions of arbitrary types; declare a common supertype instead")),
        }
    }
}
