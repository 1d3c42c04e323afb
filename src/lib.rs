pub mod cardinality;
pub mod drawio;
pub mod error;
pub mod ids;
pub mod layout;
pub mod logging;
pub mod schema;
pub mod sql;

use wasm_bindgen::prelude::*;

use drawio::DrawioRenderer;
use error::ConvertError;
use ids::{IdGenerator, RandomIds};
use layout::{Layout, LayoutEngine};
use schema::Schema;

/// Everything produced from one input.
#[derive(Debug, Clone)]
pub struct Conversion {
    pub schema: Schema,
    pub layout: Layout,
    pub document: String,
}

/// Run the full pipeline: parse, lay out and render.
///
/// An input without tables still renders an empty diagram; callers decide
/// whether that is worth reporting.
pub fn convert(source: &str, ids: &mut dyn IdGenerator) -> Result<Conversion, ConvertError> {
    let schema = sql::parse_sql(source);
    let engine = LayoutEngine::default();
    let layout = engine.layout(&schema);
    let document = DrawioRenderer::new(engine.config().clone()).render(&layout, ids)?;

    Ok(Conversion {
        schema,
        layout,
        document,
    })
}

/// Initialize panic hook for better error messages in WASM
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();
}

/// Render a SQL schema dump to a draw.io document
#[wasm_bindgen(js_name = "sqlToDrawio")]
pub fn render_sql(source: &str) -> Result<String, String> {
    let conversion = convert(source, &mut RandomIds).map_err(|e| e.to_string())?;
    if conversion.schema.is_empty() {
        return Err(ConvertError::NoTables.to_string());
    }
    Ok(conversion.document)
}
