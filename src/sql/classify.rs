//! Statement shape recognition.
//!
//! A statement candidate is matched against the four shapes the converter
//! understands. Table definitions are matched on their own during the first
//! pass; the three constraint shapes are tried in a fixed priority order
//! during the second pass and the first match wins.

use super::patterns::{
    ALTER_FOREIGN_KEY_RE, ALTER_PRIMARY_KEY_RE, CREATE_TABLE_RE, UNIQUE_INDEX_RE,
};

/// The statement shapes the converter recognises.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementShape {
    CreateTable,
    PrimaryKey,
    ForeignKey,
    UniqueIndex,
}

/// A matched `CREATE TABLE` statement, not yet split into columns.
#[derive(Debug, Clone, PartialEq)]
pub struct TableDefinition<'a> {
    /// Raw table name as written, before normalization
    pub name: &'a str,
    pub body: &'a str,
}

/// A structural fact recovered from a constraint or index statement.
/// Names are raw; the schema normalizes them on insertion.
#[derive(Debug, Clone, PartialEq)]
pub enum ConstraintFact {
    PrimaryKey { table: String, columns: Vec<String> },
    ForeignKey { table: String, column: String, references: String },
    Unique { table: String, columns: Vec<String> },
}

impl ConstraintFact {
    pub fn shape(&self) -> StatementShape {
        match self {
            Self::PrimaryKey { .. } => StatementShape::PrimaryKey,
            Self::ForeignKey { .. } => StatementShape::ForeignKey,
            Self::Unique { .. } => StatementShape::UniqueIndex,
        }
    }

    pub fn table(&self) -> &str {
        match self {
            Self::PrimaryKey { table, .. }
            | Self::ForeignKey { table, .. }
            | Self::Unique { table, .. } => table,
        }
    }
}

type ConstraintMatcher = fn(&str) -> Option<ConstraintFact>;

/// Constraint shapes in priority order. A statement yields at most one fact.
pub const CONSTRAINT_MATCHERS: [(StatementShape, ConstraintMatcher); 3] = [
    (StatementShape::PrimaryKey, match_primary_key),
    (StatementShape::ForeignKey, match_foreign_key),
    (StatementShape::UniqueIndex, match_unique_index),
];

/// Match a `CREATE TABLE` statement.
pub fn match_table_definition(stmt: &str) -> Option<TableDefinition<'_>> {
    let caps = CREATE_TABLE_RE.captures(stmt)?;
    let name = caps.get(1)?.as_str().trim();
    let body = caps.get(2)?.as_str();
    Some(TableDefinition { name, body })
}

/// Collapse runs of whitespace (including newlines) to single spaces.
pub fn collapse_whitespace(stmt: &str) -> String {
    stmt.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Try each constraint shape in priority order and return the first match.
pub fn classify_constraint(stmt: &str) -> Option<ConstraintFact> {
    let clean = collapse_whitespace(stmt);
    CONSTRAINT_MATCHERS
        .iter()
        .find_map(|(_, matcher)| matcher(&clean))
}

/// Shape of a statement candidate, or `None` for anything unrecognised.
pub fn classify_statement(stmt: &str) -> Option<StatementShape> {
    if match_table_definition(stmt).is_some() {
        return Some(StatementShape::CreateTable);
    }
    classify_constraint(stmt).map(|fact| fact.shape())
}

fn split_column_list(list: &str) -> Vec<String> {
    list.split(',').map(|c| c.trim().to_string()).collect()
}

pub fn match_primary_key(stmt: &str) -> Option<ConstraintFact> {
    let caps = ALTER_PRIMARY_KEY_RE.captures(stmt)?;
    Some(ConstraintFact::PrimaryKey {
        table: caps[1].to_string(),
        columns: split_column_list(&caps[2]),
    })
}

/// Multi-column foreign keys are reduced to their first column.
pub fn match_foreign_key(stmt: &str) -> Option<ConstraintFact> {
    let caps = ALTER_FOREIGN_KEY_RE.captures(stmt)?;
    let column = caps[2].split(',').next()?.trim().to_string();
    Some(ConstraintFact::ForeignKey {
        table: caps[1].to_string(),
        column,
        references: caps[3].to_string(),
    })
}

/// Each index entry contributes its first token; `email DESC` and
/// `email text_pattern_ops` both yield `email`.
pub fn match_unique_index(stmt: &str) -> Option<ConstraintFact> {
    let caps = UNIQUE_INDEX_RE.captures(stmt)?;
    let columns = caps[2]
        .split(',')
        .filter_map(|entry| entry.split_whitespace().next())
        .map(str::to_string)
        .collect();
    Some(ConstraintFact::Unique {
        table: caps[1].to_string(),
        columns,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matcher_priority_order() {
        let shapes: Vec<StatementShape> = CONSTRAINT_MATCHERS.iter().map(|(s, _)| *s).collect();
        assert_eq!(
            shapes,
            vec![
                StatementShape::PrimaryKey,
                StatementShape::ForeignKey,
                StatementShape::UniqueIndex
            ]
        );
    }

    #[test]
    fn test_table_definition() {
        let def = match_table_definition("CREATE TABLE \"public\".\"users\" (\n  id integer\n)").unwrap();
        assert_eq!(def.name, "\"public\".\"users\"");
        assert_eq!(def.body.trim(), "id integer");
        assert!(match_table_definition("CREATE VIEW v AS SELECT 1").is_none());
    }

    #[test]
    fn test_primary_key_multiline() {
        let stmt = "ALTER TABLE ONLY public.order_items\n    ADD CONSTRAINT order_items_pkey\n    PRIMARY KEY (order_id, line_no)";
        let fact = classify_constraint(stmt).unwrap();
        assert_eq!(
            fact,
            ConstraintFact::PrimaryKey {
                table: "public.order_items".to_string(),
                columns: vec!["order_id".to_string(), "line_no".to_string()],
            }
        );
        assert_eq!(fact.shape(), StatementShape::PrimaryKey);
    }

    #[test]
    fn test_foreign_key_keeps_first_column() {
        let stmt = "ALTER TABLE ONLY public.shipments ADD CONSTRAINT fk_ship FOREIGN KEY (order_id, tenant_id) REFERENCES public.orders(id, tenant_id) ON DELETE CASCADE";
        let fact = classify_constraint(stmt).unwrap();
        assert_eq!(
            fact,
            ConstraintFact::ForeignKey {
                table: "public.shipments".to_string(),
                column: "order_id".to_string(),
                references: "public.orders".to_string(),
            }
        );
        assert_eq!(fact.table(), "public.shipments");
    }

    #[test]
    fn test_unique_index_first_tokens() {
        let stmt = "CREATE UNIQUE INDEX users_email_key ON public.users USING btree (email text_pattern_ops, tenant_id DESC)";
        let fact = classify_constraint(stmt).unwrap();
        assert_eq!(
            fact,
            ConstraintFact::Unique {
                table: "public.users".to_string(),
                columns: vec!["email".to_string(), "tenant_id".to_string()],
            }
        );
    }

    #[test]
    fn test_classify_statement() {
        assert_eq!(
            classify_statement("CREATE TABLE IF NOT EXISTS t (id int)"),
            Some(StatementShape::CreateTable)
        );
        assert_eq!(
            classify_statement("CREATE UNIQUE INDEX u ON t (a)"),
            Some(StatementShape::UniqueIndex)
        );
        assert_eq!(classify_statement("SET search_path = public"), None);
    }

    #[test]
    fn test_non_unique_index_ignored() {
        assert!(classify_constraint("CREATE INDEX idx ON users (email)").is_none());
        assert!(classify_constraint("CREATE TABLE t (id int)").is_none());
        assert!(classify_constraint("ALTER TABLE t ADD COLUMN x int").is_none());
    }

    #[test]
    fn test_primary_key_wins_over_later_shapes() {
        // Both a primary key and a foreign key clause: only the primary key is taken
        let stmt = "ALTER TABLE t ADD CONSTRAINT c PRIMARY KEY (id), ADD CONSTRAINT f FOREIGN KEY (p) REFERENCES p";
        let fact = classify_constraint(stmt).unwrap();
        assert_eq!(fact.shape(), StatementShape::PrimaryKey);
    }
}
