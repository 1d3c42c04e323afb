//! Layout engine core implementation.

use crate::schema::Schema;
use tracing::{debug, info_span};

use super::placement::place_tables;
use super::routing::route_relationships;
use super::types::{Layout, LayoutConfig};

/// Layout engine configuration and computation.
#[derive(Debug, Clone, Default)]
pub struct LayoutEngine {
    pub(crate) config: LayoutConfig,
}

impl LayoutEngine {
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Compute layout for the given schema.
    pub fn layout(&self, schema: &Schema) -> Layout {
        let span = info_span!("layout", tables = schema.len());
        let _enter = span.enter();

        // Phase 1: grid placement
        let tables = place_tables(schema, &self.config);

        // Phase 2: relationship anchoring and routing
        let edges = route_relationships(schema, &tables);

        let recorded: usize = schema.tables().iter().map(|t| t.foreign_keys.len()).sum();
        debug!(edges = edges.len(), dropped = recorded - edges.len(), "Relationships routed");

        Layout { tables, edges }
    }
}
