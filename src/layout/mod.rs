//! Grid layout of tables and routing of relationship edges.

mod engine;
pub mod placement;
pub mod routing;
mod types;

pub use engine::LayoutEngine;
pub use types::{Anchor, EdgeLayout, Layout, LayoutConfig, RowLayout, Side, TableLayout};
