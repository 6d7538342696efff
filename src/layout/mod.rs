mod compaction;
mod coordinates;
mod extremes;
pub mod grid;
mod index;
mod placement;
mod security;
pub(crate) mod types;
pub use compaction::{available_space, compact_placements, subtree_sizes};
pub use coordinates::grid_to_pixels;
use coordinates::finalize_layout;
pub use extremes::{
    ExtremeMode, column_extremes_by_row, maximum_column_by_rows, minimum_column_by_rows,
};
pub use grid::{Placement, PlacementGrid};
pub use index::{TreeIndex, in_preorder, preorder_positions};
pub use placement::assign_initial_placements;
pub use security::extract_security_groups;
pub use types::*;

use crate::config::LayoutConfig;
use crate::ir::TreeNode;
use std::collections::{BTreeMap, HashSet};
use tracing::{debug, trace};

/// Lays out a modification tree.
///
/// `nodes` must start with the root; any parent-before-child order works, the
/// sequence is walked in depth-first preorder internally. The input is not
/// validated: nodes that cannot be reached from the root are simply left
/// without a position. Output nodes keep the order of `nodes`.
pub fn compute_layout(nodes: &[TreeNode], config: &LayoutConfig) -> Layout {
    let ordered = in_preorder(nodes);
    let index = TreeIndex::new(&ordered);
    let mut grid = assign_initial_placements(&index);
    if config.compact {
        compact_placements(&index, &mut grid);
    }
    let security_groups = extract_security_groups(&index, &grid, config);
    let layout = finalize_layout(nodes, &grid, security_groups, config);
    debug!(
        nodes = layout.nodes.len(),
        placed = grid.len(),
        groups = layout.security_groups.len(),
        width = layout.width,
        height = layout.height,
        "computed tree layout"
    );
    layout
}
