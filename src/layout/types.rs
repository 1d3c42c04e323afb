//! Data structures for layout computation.

use crate::cardinality::RelationshipCardinality;

/// Fixed dimensions of the grid packer and the table shapes.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    /// Key marker cell width
    pub key_width: f64,
    pub name_width: f64,
    pub type_width: f64,
    /// Height of one column row; the header uses the same height
    pub row_height: f64,
    /// Horizontal distance between table origins in one layout row
    pub stride_x: f64,
    pub tables_per_row: usize,
    pub origin_x: f64,
    pub origin_y: f64,
    /// Vertical gap between layout rows
    pub row_gap: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            key_width: 40.0,
            name_width: 150.0,
            type_width: 110.0,
            row_height: 30.0,
            stride_x: 340.0,
            tables_per_row: 3,
            origin_x: 40.0,
            origin_y: 40.0,
            row_gap: 50.0,
        }
    }
}

impl LayoutConfig {
    pub fn table_width(&self) -> f64 {
        self.key_width + self.name_width + self.type_width
    }

    /// Rendered height of a table with `columns` rows plus its header.
    pub fn table_height(&self, columns: usize) -> f64 {
        (columns + 1) as f64 * self.row_height
    }
}

/// One column row inside a placed table.
#[derive(Debug, Clone, PartialEq)]
pub struct RowLayout {
    /// Normalized column name, used for anchoring
    pub column: String,
    /// `PK`, `FK`, `UQ` joined by commas
    pub key_label: String,
    /// Column name with `*` appended when `NOT NULL`
    pub display_name: String,
    pub typ: String,
    /// Offset from the table's top edge
    pub y: f64,
    /// Last primary key row, drawn with a bottom border
    pub separator: bool,
}

/// A positioned table.
#[derive(Debug, Clone, PartialEq)]
pub struct TableLayout {
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Primary key rows first, then the rest
    pub rows: Vec<RowLayout>,
}

impl TableLayout {
    /// Index of the first row for `column`.
    pub fn row_index(&self, column: &str) -> Option<usize> {
        self.rows.iter().position(|r| r.column == column)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }

    /// Relative x of this face on a shape (0 = left, 1 = right).
    pub fn relative_x(self) -> u8 {
        match self {
            Self::Left => 0,
            Self::Right => 1,
        }
    }
}

/// What an edge end attaches to. Indices point into `Layout::tables`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Row { table: usize, row: usize },
    Table(usize),
}

/// A routed foreign key relationship.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeLayout {
    pub source: Anchor,
    pub target: Anchor,
    /// Face of the source table the edge leaves from
    pub exit: Side,
    /// Face of the target table the edge enters
    pub entry: Side,
    pub cardinality: RelationshipCardinality,
}

impl EdgeLayout {
    /// Alignment of the child-side label, placed at the source end.
    pub fn child_label_align(&self) -> Side {
        self.entry
    }

    /// Alignment of the parent-side label, placed at the target end.
    pub fn parent_label_align(&self) -> Side {
        self.exit
    }
}

/// The complete layout result.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    /// Same order as the schema's tables
    pub tables: Vec<TableLayout>,
    pub edges: Vec<EdgeLayout>,
}
