use super::*;

pub fn grid_to_pixels(placement: Placement, config: &LayoutConfig) -> Position {
    Position::new(
        placement.column as f32 * (config.node_width + config.width_spacing),
        placement.row as f32 * (config.node_height + config.height_spacing),
    )
}

/// Turns absolute grid cells into the renderer's parent-relative pixels.
///
/// Nodes come out in the order of `sequence`. Unplaced nodes keep no position
/// and produce no edge.
pub(super) fn finalize_layout(
    sequence: &[TreeNode],
    grid: &PlacementGrid,
    security_groups: Vec<SecurityGroupLayout>,
    config: &LayoutConfig,
) -> Layout {
    let mut nodes = Vec::with_capacity(sequence.len());
    let mut edges = Vec::new();
    let mut width = 0.0f32;
    let mut height = 0.0f32;

    for node in sequence {
        let placement = grid.placement(&node.id);
        let absolute = placement.map(|placement| grid_to_pixels(placement, config));
        let parent_absolute = node
            .parent_id
            .as_deref()
            .and_then(|parent| grid.placement(parent))
            .map(|placement| grid_to_pixels(placement, config));
        let position = absolute.map(|pos| match parent_absolute {
            Some(origin) => pos.relative_to(origin),
            None => pos,
        });

        if let Some(pos) = absolute {
            width = width.max(pos.x + config.node_width);
            height = height.max(pos.y + config.node_height);
            if let (Some(parent), Some(_)) = (node.parent_id.as_deref(), parent_absolute) {
                edges.push(EdgeLayout {
                    id: format!("{parent}-{}", node.id),
                    source: parent.to_string(),
                    target: node.id.clone(),
                });
            }
        }

        nodes.push(NodeLayout {
            id: node.id.clone(),
            parent_id: node.parent_id.clone(),
            kind: node.kind,
            label: node.display_label().to_string(),
            placement,
            position,
            absolute,
        });
    }

    Layout {
        nodes,
        edges,
        security_groups,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixels_scale_with_spacing() {
        let config = LayoutConfig::default();
        let pos = grid_to_pixels(Placement::new(2, 3), &config);
        assert_eq!(pos.x, 3.0 * (config.node_width + config.width_spacing));
        assert_eq!(pos.y, 2.0 * (config.node_height + config.height_spacing));
    }

    #[test]
    fn positions_are_parent_relative() {
        let nodes = vec![
            TreeNode::root("root"),
            TreeNode::modification("a", "root"),
            TreeNode::modification("b", "root"),
        ];
        let index = TreeIndex::new(&nodes);
        let config = LayoutConfig::default();
        let grid = assign_initial_placements(&index);
        let layout = finalize_layout(index.nodes(), &grid, Vec::new(), &config);

        let b = layout.node("b").unwrap();
        let absolute = b.absolute.unwrap();
        assert_eq!(b.position, Some(absolute));
        let root = layout.node("root").unwrap();
        assert_eq!(root.position, Some(Position::new(0.0, 0.0)));
        assert_eq!(layout.edges.len(), 2);
        assert_eq!(layout.edges[1].id, "root-b");
    }

    #[test]
    fn unplaced_nodes_have_no_position() {
        let nodes = vec![TreeNode::root("root"), TreeNode::modification("x", "ghost")];
        let index = TreeIndex::new(&nodes);
        let config = LayoutConfig::default();
        let grid = assign_initial_placements(&index);
        let layout = finalize_layout(index.nodes(), &grid, Vec::new(), &config);
        let x = layout.node("x").unwrap();
        assert!(x.placement.is_none());
        assert!(x.position.is_none());
        assert!(layout.edges.is_empty());
        assert_eq!(layout.width, config.node_width);
    }
}
