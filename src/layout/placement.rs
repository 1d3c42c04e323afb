//! Grid placement of tables and ordering of their rows.

use crate::schema::{Column, Schema, Table};
use std::collections::HashMap;

use super::types::{LayoutConfig, RowLayout, TableLayout};

/// Columns in display order: primary key columns first, then the rest,
/// each group in declaration order.
pub fn order_columns(table: &Table) -> Vec<&Column> {
    let (mut keys, rest): (Vec<&Column>, Vec<&Column>) = table
        .columns
        .iter()
        .partition(|c| table.is_primary_key(&c.name));
    keys.extend(rest);
    keys
}

/// `PK`, `FK` and `UQ` tags for a column, joined by commas. `UQ` is
/// suppressed on primary key columns.
pub fn key_label(table: &Table, column: &str) -> String {
    let is_pk = table.is_primary_key(column);
    let mut tags = Vec::new();
    if is_pk {
        tags.push("PK");
    }
    if table.is_foreign_key(column) {
        tags.push("FK");
    }
    if table.is_unique(column) && !is_pk {
        tags.push("UQ");
    }
    tags.join(",")
}

/// Build the ordered rows of a table with their vertical offsets.
pub fn build_rows(table: &Table, config: &LayoutConfig) -> Vec<RowLayout> {
    let ordered = order_columns(table);
    let pk_count = ordered
        .iter()
        .take_while(|c| table.is_primary_key(&c.name))
        .count();

    let mut y = config.row_height;
    ordered
        .into_iter()
        .enumerate()
        .map(|(idx, col)| {
            let row = RowLayout {
                column: col.name.clone(),
                key_label: key_label(table, &col.name),
                display_name: if col.not_null {
                    format!("{}*", col.name)
                } else {
                    col.name.clone()
                },
                typ: col.typ.clone(),
                y,
                separator: pk_count > 0 && idx == pk_count - 1,
            };
            y += config.row_height;
            row
        })
        .collect()
}

/// Place every table on the grid in schema order, wrapping after
/// `tables_per_row` tables.
pub fn place_tables(schema: &Schema, config: &LayoutConfig) -> Vec<TableLayout> {
    let mut layout_tables = Vec::with_capacity(schema.len());
    let mut x = config.origin_x;
    let mut y = config.origin_y;
    let mut col_counter = 0;
    let mut max_height: f64 = 0.0;

    for table in schema.tables() {
        let height = config.table_height(table.columns.len());
        max_height = max_height.max(height);

        layout_tables.push(TableLayout {
            name: table.name.clone(),
            x,
            y,
            width: config.table_width(),
            height,
            rows: build_rows(table, config),
        });

        col_counter += 1;
        x += config.stride_x;
        if col_counter >= config.tables_per_row {
            col_counter = 0;
            x = config.origin_x;
            y += max_height + config.row_gap;
            max_height = 0.0;
        }
    }

    layout_tables
}

/// Build table name -> index lookup from placed tables.
pub fn build_table_positions(layout_tables: &[TableLayout]) -> HashMap<&str, usize> {
    let mut positions = HashMap::new();
    for (i, t) in layout_tables.iter().enumerate() {
        positions.entry(t.name.as_str()).or_insert(i);
    }
    positions
}
