use serde::Serialize;

use super::grid::Placement;
use crate::ir::NodeKind;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn relative_to(self, origin: Position) -> Self {
        Self {
            x: self.x - origin.x,
            y: self.y - origin.y,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NodeLayout {
    pub id: String,
    pub parent_id: Option<String>,
    pub kind: NodeKind,
    pub label: String,
    /// Absolute grid cell after compaction.
    pub placement: Option<Placement>,
    /// Pixel position relative to the parent node (absolute for the root).
    pub position: Option<Position>,
    pub absolute: Option<Position>,
}

#[derive(Debug, Clone)]
pub struct EdgeLayout {
    pub id: String,
    pub source: String,
    pub target: String,
}

#[derive(Debug, Clone)]
pub struct SecurityGroupLayout {
    pub id: String,
    pub first_node: String,
    pub members: Vec<String>,
    pub top_left: Placement,
    pub bottom_right: Placement,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl SecurityGroupLayout {
    pub fn contains(&self, placement: Placement) -> bool {
        placement.row >= self.top_left.row
            && placement.row <= self.bottom_right.row
            && placement.column >= self.top_left.column
            && placement.column <= self.bottom_right.column
    }
}

#[derive(Debug, Clone)]
pub struct Layout {
    pub nodes: Vec<NodeLayout>,
    pub edges: Vec<EdgeLayout>,
    pub security_groups: Vec<SecurityGroupLayout>,
    pub width: f32,
    pub height: f32,
}

impl Layout {
    pub fn node(&self, id: &str) -> Option<&NodeLayout> {
        self.nodes.iter().find(|node| node.id == id)
    }
}
