//! Compiled lexical patterns for the recognised statement shapes.

use regex::Regex;
use std::sync::LazyLock;

/// `CREATE TABLE [IF NOT EXISTS] name ( body )`, body runs to the last `)`.
pub static CREATE_TABLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)CREATE\s+TABLE\s+(?:IF\s+NOT\s+EXISTS\s+)?([^(]+)\s*\(([\s\S]*)\)").unwrap()
});

/// `ALTER TABLE [ONLY] t ADD CONSTRAINT ... PRIMARY KEY (cols)`
pub static ALTER_PRIMARY_KEY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)ALTER\s+TABLE\s+(?:ONLY\s+)?(\S+)\s+ADD\s+CONSTRAINT\s+.*?\s+PRIMARY\s+KEY\s*\(([^)]+)\)",
    )
    .unwrap()
});

/// `ALTER TABLE [ONLY] t ADD CONSTRAINT ... FOREIGN KEY (cols) REFERENCES target`
pub static ALTER_FOREIGN_KEY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)ALTER\s+TABLE\s+(?:ONLY\s+)?(\S+)\s+ADD\s+CONSTRAINT\s+.*?\s+FOREIGN\s+KEY\s*\(([^)]+)\)\s+REFERENCES\s+([^\s(]+)",
    )
    .unwrap()
});

/// `CREATE UNIQUE INDEX ... ON [ONLY] t [USING method] (cols)`
pub static UNIQUE_INDEX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)CREATE\s+UNIQUE\s+INDEX\s+.*?\s+ON\s+(?:ONLY\s+)?(\S+?)\s*(?:USING\s+\w+\s*)?\(([^)]+)\)",
    )
    .unwrap()
});

/// Leading type expression of a column definition remainder.
pub static COLUMN_TYPE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9_\[\]()\s]+").unwrap());

/// Keywords that end a column's type expression, tried in this order.
const TYPE_TERMINATORS: [&str; 7] = [
    "NOT NULL",
    "NULL",
    "DEFAULT",
    "PRIMARY",
    "REFERENCES",
    "CHECK",
    "UNIQUE",
];

/// One `\s+KEYWORD.*$` pattern per terminator keyword.
pub static TYPE_TERMINATOR_RES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    TYPE_TERMINATORS
        .iter()
        .map(|kw| Regex::new(&format!(r"(?is)\s+{}.*$", kw.replace(' ', r"\s+"))).unwrap())
        .collect()
});
