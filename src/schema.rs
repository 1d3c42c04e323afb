//! In-memory schema model built by the two extraction passes.

use std::collections::HashMap;

/// Type recorded when a column line carries no recognisable type expression.
pub const UNKNOWN_TYPE: &str = "unknown";

/// Clean a table or column identifier.
///
/// Trims whitespace, drops `"` and `` ` `` quotes, and keeps only the last
/// segment of a qualified name (`public.users` -> `users`).
pub fn normalize_identifier(raw: &str) -> String {
    let unquoted: String = raw.trim().chars().filter(|c| *c != '"' && *c != '`').collect();
    let last = match unquoted.rsplit_once('.') {
        Some((_, last)) => last,
        None => unquoted.as_str(),
    };
    last.trim().to_string()
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub typ: String,
    pub not_null: bool,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    pub name: String,
    pub columns: Vec<Column>,
    /// Primary key columns in the order they were first recorded
    pub primary_key: Vec<String>,
    /// Column -> referenced table, in first-recorded order
    pub foreign_keys: Vec<(String, String)>,
    pub unique: Vec<String>,
}

impl Table {
    fn new(name: String) -> Self {
        Self {
            name,
            ..Self::default()
        }
    }

    /// First column with the given name. Duplicate names resolve to the earliest declaration.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn is_primary_key(&self, column: &str) -> bool {
        self.primary_key.iter().any(|c| c == column)
    }

    pub fn is_unique(&self, column: &str) -> bool {
        self.unique.iter().any(|c| c == column)
    }

    pub fn is_foreign_key(&self, column: &str) -> bool {
        self.foreign_keys.iter().any(|(c, _)| c == column)
    }

    pub fn referenced_table(&self, column: &str) -> Option<&str> {
        self.foreign_keys
            .iter()
            .find(|(c, _)| c == column)
            .map(|(_, t)| t.as_str())
    }
}

#[derive(Debug, Clone, Default)]
pub struct Schema {
    tables: Vec<Table>,
    index: HashMap<String, usize>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a table, returning its normalized name. Re-adding an existing name is a no-op.
    pub fn add_table(&mut self, raw_name: &str) -> String {
        let name = normalize_identifier(raw_name);
        if !self.index.contains_key(&name) {
            self.index.insert(name.clone(), self.tables.len());
            self.tables.push(Table::new(name.clone()));
        }
        name
    }

    pub fn table(&self, raw_name: &str) -> Option<&Table> {
        let name = normalize_identifier(raw_name);
        self.index.get(&name).map(|&i| &self.tables[i])
    }

    fn table_mut(&mut self, raw_name: &str) -> Option<&mut Table> {
        let name = normalize_identifier(raw_name);
        match self.index.get(&name) {
            Some(&i) => Some(&mut self.tables[i]),
            None => None,
        }
    }

    /// Tables in insertion order.
    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn add_column(&mut self, table: &str, name: &str, typ: &str, not_null: bool) {
        if let Some(t) = self.table_mut(table) {
            t.columns.push(Column {
                name: normalize_identifier(name),
                typ: typ.split_whitespace().collect::<Vec<_>>().join(" "),
                not_null,
            });
        }
    }

    /// First-wins column lookup across normalized names.
    pub fn column(&self, table: &str, column: &str) -> Option<&Column> {
        self.table(table)?.column(&normalize_identifier(column))
    }

    pub fn add_primary_key<S: AsRef<str>>(&mut self, table: &str, columns: &[S]) {
        if let Some(t) = self.table_mut(table) {
            for c in columns {
                let c = normalize_identifier(c.as_ref());
                if !t.primary_key.contains(&c) {
                    t.primary_key.push(c);
                }
            }
        }
    }

    /// Map a column to its referenced table. A later call for the same column replaces the target.
    pub fn add_foreign_key(&mut self, table: &str, column: &str, referenced: &str) {
        if let Some(t) = self.table_mut(table) {
            let column = normalize_identifier(column);
            let referenced = normalize_identifier(referenced);
            match t.foreign_keys.iter_mut().find(|(c, _)| *c == column) {
                Some(entry) => entry.1 = referenced,
                None => t.foreign_keys.push((column, referenced)),
            }
        }
    }

    pub fn add_unique<S: AsRef<str>>(&mut self, table: &str, columns: &[S]) {
        if let Some(t) = self.table_mut(table) {
            for c in columns {
                let c = normalize_identifier(c.as_ref());
                if !t.unique.contains(&c) {
                    t.unique.push(c);
                }
            }
        }
    }
}
