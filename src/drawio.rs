//! draw.io (mxGraph XML) document renderer.

use crate::error::ConvertError;
use crate::ids::IdGenerator;
use crate::layout::{Anchor, EdgeLayout, Layout, LayoutConfig, RowLayout, TableLayout};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use tracing::{debug, info_span};

const STYLE_TABLE: &str = "shape=table;startSize=30;container=1;collapsible=1;childLayout=tableLayout;\
fixedRows=1;rowLines=0;fontStyle=1;align=center;resizeLast=1;html=1;whiteSpace=wrap;";

const STYLE_ROW_NORMAL: &str = "shape=tableRow;horizontal=0;startSize=0;swimlaneHead=0;swimlaneBody=0;\
fillColor=none;collapsible=0;dropTarget=0;points=[[0,0.5],[1,0.5]];\
portConstraint=eastwest;top=0;left=0;right=0;bottom=0;html=1;";

const STYLE_ROW_SEPARATOR: &str = "shape=tableRow;horizontal=0;startSize=0;swimlaneHead=0;swimlaneBody=0;\
fillColor=none;collapsible=0;dropTarget=0;points=[[0,0.5],[1,0.5]];\
portConstraint=eastwest;top=0;left=0;right=0;bottom=1;html=1;";

const STYLE_CELL_KEY: &str = "shape=partialRectangle;connectable=0;fillColor=none;top=0;left=0;\
bottom=0;right=0;fontStyle=1;overflow=hidden;html=1;whiteSpace=wrap;align=center;";

const STYLE_CELL_NAME: &str = "shape=partialRectangle;connectable=0;fillColor=none;top=0;left=0;\
bottom=0;right=0;align=left;spacingLeft=6;overflow=hidden;html=1;whiteSpace=wrap;";

const STYLE_CELL_TYPE: &str = "shape=partialRectangle;connectable=0;fillColor=none;top=0;left=0;\
bottom=0;right=0;align=left;spacingLeft=6;overflow=hidden;html=1;whiteSpace=wrap;\
fontColor=#000080;fontStyle=2;";

const STYLE_EDGE_BASE: &str = "endArrow=none;html=1;rounded=0;edgeStyle=entityRelationEdgeStyle;";

const STYLE_LABEL_BASE: &str = "resizable=0;html=1;whiteSpace=wrap;verticalAlign=bottom;";

const GRAPH_MODEL_ATTRS: [(&str, &str); 15] = [
    ("dx", "1000"),
    ("dy", "1000"),
    ("grid", "1"),
    ("gridSize", "10"),
    ("guides", "1"),
    ("tooltips", "1"),
    ("connect", "1"),
    ("arrows", "1"),
    ("fold", "1"),
    ("page", "1"),
    ("pageScale", "1"),
    ("pageWidth", "827"),
    ("pageHeight", "1169"),
    ("math", "0"),
    ("shadow", "0"),
];

/// Renders a computed [`Layout`] as a draw.io document.
#[derive(Debug, Clone, Default)]
pub struct DrawioRenderer {
    config: LayoutConfig,
}

/// Ids assigned to a table and its rows, used to resolve edge anchors.
struct TableIds {
    table: String,
    rows: Vec<String>,
}

impl DrawioRenderer {
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    pub fn render(&self, layout: &Layout, ids: &mut dyn IdGenerator) -> Result<String, ConvertError> {
        let span = info_span!("render", tables = layout.tables.len(), edges = layout.edges.len());
        let _enter = span.enter();

        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

        let mut mxfile = BytesStart::new("mxfile");
        mxfile.push_attribute(("host", "Electron"));
        mxfile.push_attribute(("version", "21.0.0"));
        writer.write_event(Event::Start(mxfile))?;

        let diagram_id = ids.next_id();
        let mut diagram = BytesStart::new("diagram");
        diagram.push_attribute(("name", "Database Schema"));
        diagram.push_attribute(("id", diagram_id.as_str()));
        writer.write_event(Event::Start(diagram))?;

        let mut model = BytesStart::new("mxGraphModel");
        for attr in GRAPH_MODEL_ATTRS {
            model.push_attribute(attr);
        }
        writer.write_event(Event::Start(model))?;
        writer.write_event(Event::Start(BytesStart::new("root")))?;

        // Fixed root and default layer cells
        writer.write_event(Event::Empty(element("mxCell", &[("id", "0")])))?;
        writer.write_event(Event::Empty(element("mxCell", &[("id", "1"), ("parent", "0")])))?;

        let mut table_ids = Vec::with_capacity(layout.tables.len());
        for table in &layout.tables {
            table_ids.push(self.write_table(&mut writer, table, ids)?);
        }

        for edge in &layout.edges {
            self.write_edge(&mut writer, edge, &table_ids, ids)?;
        }

        writer.write_event(Event::End(BytesEnd::new("root")))?;
        writer.write_event(Event::End(BytesEnd::new("mxGraphModel")))?;
        writer.write_event(Event::End(BytesEnd::new("diagram")))?;
        writer.write_event(Event::End(BytesEnd::new("mxfile")))?;

        let xml = String::from_utf8(writer.into_inner())?;
        debug!(bytes = xml.len(), "Document rendered");
        Ok(xml)
    }

    fn write_table(
        &self,
        writer: &mut Writer<Vec<u8>>,
        table: &TableLayout,
        ids: &mut dyn IdGenerator,
    ) -> Result<TableIds, ConvertError> {
        let table_id = ids.next_id();
        let x = table.x.to_string();
        let y = table.y.to_string();
        let width = table.width.to_string();
        let height = table.height.to_string();

        write_cell(
            writer,
            &[
                ("id", table_id.as_str()),
                ("value", table.name.as_str()),
                ("style", STYLE_TABLE),
                ("vertex", "1"),
                ("parent", "1"),
            ],
            &[
                ("x", x.as_str()),
                ("y", y.as_str()),
                ("width", width.as_str()),
                ("height", height.as_str()),
                ("as", "geometry"),
            ],
        )?;

        let mut row_ids = Vec::with_capacity(table.rows.len());
        for row in &table.rows {
            row_ids.push(self.write_row(writer, row, &table_id, ids)?);
        }

        Ok(TableIds {
            table: table_id,
            rows: row_ids,
        })
    }

    fn write_row(
        &self,
        writer: &mut Writer<Vec<u8>>,
        row: &RowLayout,
        table_id: &str,
        ids: &mut dyn IdGenerator,
    ) -> Result<String, ConvertError> {
        let cfg = &self.config;
        let row_id = ids.next_id();
        let style = if row.separator {
            STYLE_ROW_SEPARATOR
        } else {
            STYLE_ROW_NORMAL
        };
        let y = row.y.to_string();
        let table_width = cfg.table_width().to_string();
        let row_height = cfg.row_height.to_string();

        write_cell(
            writer,
            &[
                ("id", row_id.as_str()),
                ("value", ""),
                ("style", style),
                ("vertex", "1"),
                ("parent", table_id),
            ],
            &[
                ("x", "0"),
                ("y", y.as_str()),
                ("width", table_width.as_str()),
                ("height", row_height.as_str()),
                ("as", "geometry"),
            ],
        )?;

        // Key marker | name | type
        let name_x = cfg.key_width.to_string();
        let type_x = (cfg.key_width + cfg.name_width).to_string();
        let cells = [
            (row.key_label.as_str(), STYLE_CELL_KEY, None, cfg.key_width),
            (row.display_name.as_str(), STYLE_CELL_NAME, Some(name_x.as_str()), cfg.name_width),
            (row.typ.as_str(), STYLE_CELL_TYPE, Some(type_x.as_str()), cfg.type_width),
        ];
        for (value, style, x, width) in cells {
            let cell_id = ids.next_id();
            let width = width.to_string();
            let mut geometry: Vec<(&str, &str)> = Vec::with_capacity(4);
            if let Some(x) = x {
                geometry.push(("x", x));
            }
            geometry.extend([("width", width.as_str()), ("height", row_height.as_str()), ("as", "geometry")]);

            write_cell(
                writer,
                &[
                    ("id", cell_id.as_str()),
                    ("value", value),
                    ("style", style),
                    ("vertex", "1"),
                    ("parent", row_id.as_str()),
                ],
                &geometry,
            )?;
        }

        Ok(row_id)
    }

    fn write_edge(
        &self,
        writer: &mut Writer<Vec<u8>>,
        edge: &EdgeLayout,
        table_ids: &[TableIds],
        ids: &mut dyn IdGenerator,
    ) -> Result<(), ConvertError> {
        let source = anchor_id(edge.source, table_ids);
        let target = anchor_id(edge.target, table_ids);
        let (Some(source), Some(target)) = (source, target) else {
            debug!("Edge anchor has no rendered cell, skipped");
            return Ok(());
        };

        let edge_id = ids.next_id();
        let style = format!(
            "{}exitX={};exitY=0.5;exitDx=0;exitDy=0;entryX={};entryY=0.5;entryDx=0;entryDy=0;",
            STYLE_EDGE_BASE,
            edge.exit.relative_x(),
            edge.entry.relative_x()
        );

        write_cell(
            writer,
            &[
                ("id", edge_id.as_str()),
                ("style", style.as_str()),
                ("edge", "1"),
                ("parent", "1"),
                ("source", source),
                ("target", target),
            ],
            &[("relative", "1"), ("as", "geometry")],
        )?;

        // Child side sits at the source end (x=-1), parent side at the target end (x=1)
        let labels = [
            (edge.cardinality.child.label(), edge.child_label_align().as_str(), "-1"),
            (edge.cardinality.parent.label(), edge.parent_label_align().as_str(), "1"),
        ];
        for (value, align, x) in labels {
            let label_id = ids.next_id();
            let style = format!("{}align={};", STYLE_LABEL_BASE, align);
            write_cell(
                writer,
                &[
                    ("id", label_id.as_str()),
                    ("value", value),
                    ("style", style.as_str()),
                    ("vertex", "1"),
                    ("connectable", "0"),
                    ("parent", edge_id.as_str()),
                ],
                &[("x", x), ("relative", "1"), ("as", "geometry")],
            )?;
        }

        Ok(())
    }
}

fn anchor_id(anchor: Anchor, table_ids: &[TableIds]) -> Option<&str> {
    match anchor {
        Anchor::Row { table, row } => table_ids.get(table)?.rows.get(row).map(String::as_str),
        Anchor::Table(table) => table_ids.get(table).map(|t| t.table.as_str()),
    }
}

fn element<'a>(name: &'a str, attrs: &[(&str, &str)]) -> BytesStart<'a> {
    let mut start = BytesStart::new(name);
    for &attr in attrs {
        start.push_attribute(attr);
    }
    start
}

/// Write an `mxCell` wrapping a single `mxGeometry`.
fn write_cell(
    writer: &mut Writer<Vec<u8>>,
    cell: &[(&str, &str)],
    geometry: &[(&str, &str)],
) -> Result<(), ConvertError> {
    writer.write_event(Event::Start(element("mxCell", cell)))?;
    writer.write_event(Event::Empty(element("mxGeometry", geometry)))?;
    writer.write_event(Event::End(BytesEnd::new("mxCell")))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::SequentialIds;
    use crate::layout::LayoutEngine;
    use crate::sql::parse_sql;

    fn render(sql: &str) -> String {
        let schema = parse_sql(sql);
        let layout = LayoutEngine::default().layout(&schema);
        DrawioRenderer::default()
            .render(&layout, &mut SequentialIds::new())
            .unwrap()
    }

    const SQL: &str = "CREATE TABLE users (\n id int NOT NULL,\n email text\n);\n\
        CREATE TABLE orders (\n id int NOT NULL,\n user_id int NOT NULL\n);\n\
        ALTER TABLE users ADD CONSTRAINT pk PRIMARY KEY (id);\n\
        ALTER TABLE orders ADD CONSTRAINT fk FOREIGN KEY (user_id) REFERENCES users(id);";

    #[test]
    fn test_document_skeleton() {
        let xml = render(SQL);
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains(r#"<mxfile host="Electron" version="21.0.0">"#));
        assert!(xml.contains(r#"<diagram name="Database Schema" id="id_1">"#));
        assert!(xml.contains(r#"pageWidth="827" pageHeight="1169""#));
        assert!(xml.contains(r#"<mxCell id="0"/>"#));
        assert!(xml.contains(r#"<mxCell id="1" parent="0"/>"#));
    }

    #[test]
    fn test_table_and_rows() {
        let xml = render(SQL);
        // users: table id_2, row id_3 with cells id_4..id_6
        assert!(xml.contains(r#"<mxCell id="id_2" value="users""#));
        assert!(xml.contains(r#"<mxGeometry x="40" y="40" width="300" height="90" as="geometry"/>"#));
        assert!(xml.contains(r#"<mxCell id="id_4" value="PK""#));
        assert!(xml.contains(r#"<mxCell id="id_5" value="id*""#));
        assert!(xml.contains(r#"<mxGeometry x="190" width="110" height="30" as="geometry"/>"#));
        assert!(xml.contains("bottom=1;"));
        // orders sits in the second grid slot
        assert!(xml.contains(r#"<mxGeometry x="380" y="40" width="300" height="90" as="geometry"/>"#));
    }

    #[test]
    fn test_edge_and_labels() {
        let xml = render(SQL);
        // users: 1 + 2 rows * 4 ids, orders likewise, so the edge is id_20
        assert!(xml.contains(r#"<mxCell id="id_20" style="endArrow=none;html=1;rounded=0;edgeStyle=entityRelationEdgeStyle;exitX=0;exitY=0.5;exitDx=0;exitDy=0;entryX=1;"#));
        assert!(xml.contains(r#"source="id_16" target="id_3""#));
        assert!(xml.contains(r#"value="0..N" style="resizable=0;html=1;whiteSpace=wrap;verticalAlign=bottom;align=right;""#));
        assert!(xml.contains(r#"value="1" style="resizable=0;html=1;whiteSpace=wrap;verticalAlign=bottom;align=left;""#));
        assert!(xml.contains(r#"<mxGeometry x="-1" relative="1" as="geometry"/>"#));
    }

    #[test]
    fn test_values_are_escaped() {
        let xml = render("CREATE TABLE \"a<b\" (\n \"x&y\" int\n);");
        assert!(xml.contains("a&lt;b"));
        assert!(xml.contains("x&amp;y"));
    }

    #[test]
    fn test_ids_unique_and_references_resolve() {
        let schema = parse_sql(SQL);
        let layout = LayoutEngine::default().layout(&schema);
        let xml = DrawioRenderer::default()
            .render(&layout, &mut crate::ids::RandomIds)
            .unwrap();

        let attr_values = |name: &str| -> Vec<String> {
            let re = regex::Regex::new(&format!(r#"\b{}="([^"]+)""#, name)).unwrap();
            re.captures_iter(&xml).map(|c| c[1].to_string()).collect()
        };

        let ids = attr_values("id");
        let unique: std::collections::HashSet<&String> = ids.iter().collect();
        assert_eq!(unique.len(), ids.len());
        // diagram + 2 fixed cells + 2 tables * (1 + 2 rows * 4) + edge with 2 labels
        assert_eq!(ids.len(), 24);

        for name in ["source", "target", "parent"] {
            let refs = attr_values(name);
            assert!(!refs.is_empty());
            for r in refs {
                assert!(unique.contains(&r), "{}={} points at no cell", name, r);
            }
        }
    }
}
