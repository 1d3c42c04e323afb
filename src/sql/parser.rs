//! Two-pass extraction of tables, columns and key constraints from a SQL dump.

use super::classify::{
    classify_constraint, classify_statement, match_table_definition, ConstraintFact,
    TableDefinition,
};
use super::patterns::{COLUMN_TYPE_RE, TYPE_TERMINATOR_RES};
use super::preprocess::preprocess;
use crate::schema::{Schema, UNKNOWN_TYPE};
use tracing::{debug, debug_span, trace};

/// One column definition line from a `CREATE TABLE` body.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnFact {
    /// Raw name token
    pub name: String,
    pub typ: String,
    pub not_null: bool,
    /// Inline `PRIMARY KEY` on the column itself
    pub primary_key: bool,
}

/// Parse SQL dump to Schema.
///
/// Never fails: statements that match none of the known shapes are skipped.
pub fn parse_sql(input: &str) -> Schema {
    let span = debug_span!("parse_sql", input_len = input.len());
    let _enter = span.enter();

    let statements = preprocess(input);
    debug!(statements = statements.len(), "Split input into statements");

    let mut schema = Schema::new();

    // Pass 1: table definitions
    for stmt in &statements {
        if let Some(def) = match_table_definition(stmt) {
            extract_table(&mut schema, &def);
        }
    }
    debug!(tables = schema.len(), "Table definitions extracted");

    // Pass 2: constraints over every statement, tables only enriched
    for stmt in &statements {
        match classify_constraint(stmt) {
            Some(fact) => apply_constraint(&mut schema, fact),
            None => trace!(shape = ?classify_statement(stmt), "No constraint fact"),
        }
    }

    schema
}

/// Register a table and its columns from a matched definition.
pub fn extract_table(schema: &mut Schema, def: &TableDefinition<'_>) {
    let table = schema.add_table(def.name);

    for line in def.body.lines() {
        let Some(col) = parse_column_line(line) else {
            continue;
        };
        trace!(table = %table, column = %col.name, typ = %col.typ, "Column");
        schema.add_column(&table, &col.name, &col.typ, col.not_null);
        if col.primary_key {
            schema.add_primary_key(&table, &[col.name.as_str()]);
        }
    }
}

/// Parse one body line into a column, or `None` for blank lines, table-level
/// constraint lines and lines with nothing after the name.
pub fn parse_column_line(line: &str) -> Option<ColumnFact> {
    let line = line.trim();
    let upper = line.to_uppercase();
    if line.is_empty() || upper.starts_with("CONSTRAINT") || upper.starts_with("PRIMARY KEY") {
        return None;
    }

    let (name, rest) = line.split_once(char::is_whitespace)?;
    let rest = rest.trim_start();
    if rest.is_empty() {
        return None;
    }

    Some(ColumnFact {
        name: name.to_string(),
        typ: clean_type(rest),
        not_null: upper.contains("NOT NULL"),
        primary_key: rest.to_uppercase().contains("PRIMARY KEY"),
    })
}

/// Extract the type expression from the text following a column name.
///
/// Trailing constraint clauses (`NOT NULL`, `DEFAULT ...`, `REFERENCES ...`)
/// are cut off. Falls back to [`UNKNOWN_TYPE`].
pub fn clean_type(rest: &str) -> String {
    let Some(m) = COLUMN_TYPE_RE.find(rest) else {
        return UNKNOWN_TYPE.to_string();
    };

    let mut typ = m.as_str().trim().to_string();
    for re in TYPE_TERMINATOR_RES.iter() {
        typ = re.replace(&typ, "").into_owned();
    }
    let typ = typ.trim_end_matches(',');
    typ.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn apply_constraint(schema: &mut Schema, fact: ConstraintFact) {
    if schema.table(fact.table()).is_none() {
        debug!(table = fact.table(), shape = ?fact.shape(), "Constraint on unknown table ignored");
        return;
    }
    trace!(?fact, "Constraint");

    match fact {
        ConstraintFact::PrimaryKey { table, columns } => schema.add_primary_key(&table, &columns),
        ConstraintFact::ForeignKey {
            table,
            column,
            references,
        } => schema.add_foreign_key(&table, &column, &references),
        ConstraintFact::Unique { table, columns } => schema.add_unique(&table, &columns),
    }
}
