//! Anchoring and side selection for relationship edges.

use crate::cardinality::infer_cardinality;
use crate::schema::Schema;
use tracing::debug;

use super::placement::build_table_positions;
use super::types::{Anchor, EdgeLayout, Side, TableLayout};

/// Pick exit and entry faces from the two tables' grid x.
///
/// A target strictly to the left is reached from the source's left face;
/// anything else leaves right and enters left.
pub fn choose_sides(source_x: f64, target_x: f64) -> (Side, Side) {
    if target_x < source_x {
        (Side::Left, Side::Right)
    } else {
        (Side::Right, Side::Left)
    }
}

/// Route every recorded foreign key between placed tables.
///
/// A relationship is dropped when its source column has no row or its
/// target table was never defined.
pub fn route_relationships(schema: &Schema, layout_tables: &[TableLayout]) -> Vec<EdgeLayout> {
    let positions = build_table_positions(layout_tables);
    let mut edges = Vec::new();

    for table in schema.tables() {
        let Some(&source_idx) = positions.get(table.name.as_str()) else {
            continue;
        };
        let source_table = &layout_tables[source_idx];

        for (column, target_name) in &table.foreign_keys {
            let Some(source_row) = source_table.row_index(column) else {
                debug!(table = %table.name, column = %column, "Foreign key column not declared, edge dropped");
                continue;
            };
            let Some(&target_idx) = positions.get(target_name.as_str()) else {
                debug!(table = %table.name, target = %target_name, "Referenced table not found, edge dropped");
                continue;
            };
            let target_table = &layout_tables[target_idx];

            let target = schema
                .table(target_name)
                .and_then(|t| t.primary_key.first())
                .and_then(|pk| target_table.row_index(pk))
                .map(|row| Anchor::Row {
                    table: target_idx,
                    row,
                })
                .unwrap_or(Anchor::Table(target_idx));

            let (exit, entry) = choose_sides(source_table.x, target_table.x);

            edges.push(EdgeLayout {
                source: Anchor::Row {
                    table: source_idx,
                    row: source_row,
                },
                target,
                exit,
                entry,
                cardinality: infer_cardinality(schema, &table.name, column, target_name),
            });
        }
    }

    edges
}
