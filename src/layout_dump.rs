use crate::ir::NodeKind;
use crate::layout::{Layout, Position};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// JSON view of a layout, shaped for the consuming renderer.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutDump {
    pub width: f32,
    pub height: f32,
    pub nodes: Vec<NodeDump>,
    pub edges: Vec<EdgeDump>,
    pub security_groups: Vec<SecurityGroupDump>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDump {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    pub kind: NodeKind,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub absolute_position: Option<Position>,
}

#[derive(Debug, Serialize)]
pub struct EdgeDump {
    pub id: String,
    pub source: String,
    pub target: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityGroupDump {
    pub id: String,
    pub first_node: String,
    pub members: Vec<String>,
    pub top_left: [i32; 2],
    pub bottom_right: [i32; 2],
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl LayoutDump {
    pub fn from_layout(layout: &Layout) -> Self {
        let nodes = layout
            .nodes
            .iter()
            .map(|node| NodeDump {
                id: node.id.clone(),
                parent_id: node.parent_id.clone(),
                kind: node.kind,
                label: node.label.clone(),
                row: node.placement.map(|p| p.row),
                column: node.placement.map(|p| p.column),
                position: node.position,
                absolute_position: node.absolute,
            })
            .collect();

        let edges = layout
            .edges
            .iter()
            .map(|edge| EdgeDump {
                id: edge.id.clone(),
                source: edge.source.clone(),
                target: edge.target.clone(),
            })
            .collect();

        let security_groups = layout
            .security_groups
            .iter()
            .map(|group| SecurityGroupDump {
                id: group.id.clone(),
                first_node: group.first_node.clone(),
                members: group.members.clone(),
                top_left: [group.top_left.row, group.top_left.column],
                bottom_right: [group.bottom_right.row, group.bottom_right.column],
                x: group.x,
                y: group.y,
                width: group.width,
                height: group.height,
            })
            .collect();

        LayoutDump {
            width: layout.width,
            height: layout.height,
            nodes,
            edges,
            security_groups,
        }
    }
}

pub fn layout_to_json(layout: &Layout) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&LayoutDump::from_layout(layout))
}

/// Writes the dump to `path`, or to stdout when no path is given.
pub fn write_layout_dump(path: Option<&Path>, layout: &Layout) -> anyhow::Result<()> {
    let dump = LayoutDump::from_layout(layout);
    match path {
        Some(path) => {
            let file = File::create(path)?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, &dump)?;
            writer.flush()?;
        }
        None => {
            let stdout = std::io::stdout();
            let mut writer = stdout.lock();
            serde_json::to_writer_pretty(&mut writer, &dump)?;
            writeln!(writer)?;
        }
    }
    Ok(())
}
