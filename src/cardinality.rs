//! Relationship multiplicity inferred from key and nullability facts.

use crate::schema::Schema;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    One,        // 1
    ZeroOrOne,  // 0..1
    ZeroOrMany, // 0..N
}

impl Cardinality {
    pub fn label(self) -> &'static str {
        match self {
            Self::One => "1",
            Self::ZeroOrOne => "0..1",
            Self::ZeroOrMany => "0..N",
        }
    }
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Both ends of a foreign key relationship.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelationshipCardinality {
    /// How many child rows may reference one parent row
    pub child: Cardinality,
    /// How many parent rows one child row references
    pub parent: Cardinality,
}

/// Infer cardinality for `child.fk_column -> parent`.
///
/// The child side is bounded to one when the key column is primary or
/// unique in the child; the parent side is mandatory when the key column
/// is `NOT NULL`. A parent never requires a child, so the child side
/// always starts at zero.
pub fn infer_cardinality(
    schema: &Schema,
    child: &str,
    fk_column: &str,
    _parent: &str,
) -> RelationshipCardinality {
    let unique_key = schema
        .table(child)
        .is_some_and(|t| t.is_primary_key(fk_column) || t.is_unique(fk_column));
    let not_null = schema
        .column(child, fk_column)
        .is_some_and(|c| c.not_null);

    RelationshipCardinality {
        child: if unique_key {
            Cardinality::ZeroOrOne
        } else {
            Cardinality::ZeroOrMany
        },
        parent: if not_null {
            Cardinality::One
        } else {
            Cardinality::ZeroOrOne
        },
    }
}
