//! Parser tests.
//!
//! - `operators`: precedence, operator typing, `has`, conditionals
//! - `literals`: numeric and string literals, deferred literal typing
//! - `members`: identifiers, members, methods, aggregates, indexers, types
//! - `errors`: diagnostics and their positions
//! - `api`: `parse_lambda`, `parse_ordering` and option handling

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod errors;
mod members;

use dynq_ir::{Expr, Prim, Ty};
use dynq_types::{EnumDef, TypeKind, TypeRegistry};

use crate::{parse, ParseError, ParseOptions};

/// A small type universe:
///
/// ```text
/// class Person {
///     Name: String, Age: Int32, Score: Double?, Salary: Decimal,
///     Birth: DateTime, Ticket: Int64, Active: Boolean, Id: Guid,
///     Tags: String[], Friends: IEnumerable<Person>, Boss: Person,
///     Library: Catalog, Rights: Access, Favorite: Color,
///     Greet(String) -> String, Pick(Int64, Int32), Pick(Int32, Int64),
///     Reset() -> Void
/// }
/// class Catalog { Count: Int32, this[String] -> Person }
/// [Flags] enum Access : Int32 { None, Read, Write, Execute }
/// enum Color : Byte { Red, Green, Blue }
/// ```
pub(super) struct Fixture {
    pub registry: TypeRegistry,
    pub person: Ty,
    pub catalog: Ty,
    pub access: Ty,
    pub color: Ty,
}

pub(super) fn fixture() -> Fixture {
    let mut registry = TypeRegistry::new();
    let person = registry.declare("Person", TypeKind::Class);
    let catalog = registry.declare("Catalog", TypeKind::Class);
    let access = registry.declare(
        "Access",
        TypeKind::Enum(
            EnumDef::new(Prim::Int32)
                .flags()
                .value("None", 0)
                .value("Read", 1)
                .value("Write", 2)
                .value("Execute", 4),
        ),
    );
    let color = registry.declare(
        "Color",
        TypeKind::Enum(
            EnumDef::new(Prim::Byte)
                .value("Red", 0)
                .value("Green", 1)
                .value("Blue", 2),
        ),
    );
    let (person_ty, catalog_ty) = (Ty::Named(person), Ty::Named(catalog));

    registry
        .def_mut(person)
        .property("Name", Ty::STRING)
        .property("Age", Ty::INT32)
        .property("Score", Ty::DOUBLE.nullable())
        .property("Salary", Ty::DECIMAL)
        .property("Birth", Ty::DATE_TIME)
        .property("Ticket", Ty::INT64)
        .property("Active", Ty::BOOL)
        .property("Id", Ty::GUID)
        .property("Tags", Ty::array(Ty::STRING))
        .property("Friends", Ty::seq(person_ty.clone()))
        .property("Boss", person_ty.clone())
        .property("Library", catalog_ty.clone())
        .property("Rights", Ty::Named(access))
        .property("Favorite", Ty::Named(color))
        .method("Greet", &[Ty::STRING], Ty::STRING)
        .method("Pick", &[Ty::INT64, Ty::INT32], Ty::INT32)
        .method("Pick", &[Ty::INT32, Ty::INT64], Ty::INT32)
        .method("Reset", &[], Ty::VOID);
    registry
        .def_mut(catalog)
        .property("Count", Ty::INT32)
        .indexer(&[Ty::STRING], person_ty.clone());
    registry.def_mut(access).accessible();
    registry.def_mut(color).accessible();

    Fixture {
        registry,
        person: person_ty,
        catalog: catalog_ty,
        access: Ty::Named(access),
        color: Ty::Named(color),
    }
}

impl Fixture {
    /// Parse with `Person` as the implicit element.
    pub fn parse(&self, text: &str) -> Result<Expr, ParseError> {
        self.parse_with(text, &ParseOptions::new().implicit(self.person.clone()))
    }

    pub fn parse_with(&self, text: &str, options: &ParseOptions<'_>) -> Result<Expr, ParseError> {
        parse(&self.registry, text, options)
    }

    /// Parse with `Person` as the implicit element and render the tree.
    pub fn render(&self, text: &str) -> String {
        self.parse(text).unwrap().to_string()
    }

    pub fn error(&self, text: &str) -> ParseError {
        self.parse(text).unwrap_err()
    }
}
