//! SQL dump to schema model conversion.

pub mod classify;
mod parser;
mod patterns;
pub mod preprocess;

pub use classify::{ConstraintFact, StatementShape};
pub use parser::{clean_type, parse_column_line, parse_sql, ColumnFact};
