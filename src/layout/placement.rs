use super::*;

/// First, conservative placement of every node.
///
/// The root takes `(0, 0)`. A node goes straight below its parent when that
/// cell is free, otherwise into a brand new column to the right of every
/// column used so far. The result never overlaps but is usually far wider
/// than needed; compaction tightens it afterwards.
pub fn assign_initial_placements(index: &TreeIndex<'_>) -> PlacementGrid {
    let mut grid = PlacementGrid::new();
    let nodes = index.nodes();
    let Some(root) = nodes.first() else {
        return grid;
    };
    grid.set_placement(&root.id, Placement::new(0, 0));

    let mut max_column = 0;
    for node in nodes.iter().skip(1) {
        let Some(parent_placement) = node
            .parent_id
            .as_deref()
            .and_then(|parent| grid.placement(parent))
        else {
            trace!(node = %node.id, "no placed parent, leaving node unplaced");
            continue;
        };
        let below = Placement::new(parent_placement.row + 1, parent_placement.column);
        let placement = if grid.is_placement_taken(below) {
            max_column += 1;
            Placement::new(below.row, max_column)
        } else {
            below
        };
        trace!(node = %node.id, %placement, "initial placement");
        grid.set_placement(&node.id, placement);
    }
    grid
}
