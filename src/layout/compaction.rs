use super::*;

/// Largest uniform leftward shift for a branch.
///
/// `left_max` holds the rightmost occupied column per row of everything laid
/// out before the branch, `right_min` the leftmost column per row of the
/// branch itself. A branch node has to clear the left side both in its own
/// row and in the row just above it (`row - 1`, not `row + 1`), which keeps
/// the branch's incoming edges away from the left nodes. Checking the row
/// below instead would pin `f` in the root/a/b/c/d/e/f sample to column 2,
/// because `e` sits one row under it, and `f` would lose its (1, 1) offset
/// from `b`.
pub fn available_space(left_max: &BTreeMap<i32, i32>, right_min: &BTreeMap<i32, i32>) -> i32 {
    if left_max.is_empty() || right_min.is_empty() {
        return 0;
    }
    let mut space: Option<i32> = None;
    for (row, right_column) in right_min {
        let limit = match (left_max.get(row), left_max.get(&(row - 1))) {
            (Some(same), Some(above)) => (*same).max(*above),
            (Some(same), None) => *same,
            (None, Some(above)) => *above,
            (None, None) => continue,
        };
        let row_space = right_column - limit - 1;
        if row_space <= 0 {
            return 0;
        }
        space = Some(space.map_or(row_space, |current| current.min(row_space)));
    }
    space.unwrap_or(0)
}

/// Size of the subtree rooted at each position of the sequence.
///
/// Sizes are accumulated bottom-up, so the children of a node must come
/// after it. With a preorder sequence the subtree of `i` is exactly
/// `nodes[i..i + sizes[i]]`.
pub fn subtree_sizes(index: &TreeIndex<'_>) -> Vec<usize> {
    let nodes = index.nodes();
    let mut sizes = vec![1usize; nodes.len()];
    for idx in (0..nodes.len()).rev() {
        let Some(parent_idx) = nodes[idx]
            .parent_id
            .as_deref()
            .and_then(|parent| index.position(parent))
        else {
            continue;
        };
        if parent_idx < idx {
            sizes[parent_idx] += sizes[idx];
        }
    }
    sizes
}

/// Positions of nodes that are not the first child of their parent.
fn branch_starts(index: &TreeIndex<'_>) -> Vec<usize> {
    let mut parents_seen: HashSet<&str> = HashSet::new();
    let mut starts = Vec::new();
    for (idx, node) in index.nodes().iter().enumerate() {
        let Some(parent) = node.parent_id.as_deref() else {
            continue;
        };
        if !parents_seen.insert(parent) {
            starts.push(idx);
        }
    }
    starts
}

/// Pulls every secondary branch as far left as it can go.
///
/// Branches are handled once each, in sequence order, and always against
/// everything before them (not just their left sibling), so a deep branch
/// may tuck under a distant one. There is no second pass: the outcome is
/// deterministic, though not always the tightest possible.
///
/// `index` must cover a preorder sequence (see [`in_preorder`]); each branch
/// is taken as the contiguous run its subtree size spans.
pub fn compact_placements(index: &TreeIndex<'_>, grid: &mut PlacementGrid) {
    let nodes = index.nodes();
    let sizes = subtree_sizes(index);

    for start in branch_starts(index) {
        if grid.placement(&nodes[start].id).is_none() {
            continue;
        }
        let end = (start + sizes[start]).min(nodes.len());
        let left = &nodes[..start];
        let right = &nodes[start..end];

        let left_max = maximum_column_by_rows(left, index, grid);
        let right_min = minimum_column_by_rows(right, index, grid);
        let space = available_space(&left_max, &right_min);
        if space <= 0 {
            continue;
        }
        debug!(
            branch = %nodes[start].id,
            nodes = right.len(),
            space,
            "shifting branch left"
        );
        grid.shift_columns(right.iter().map(|node| node.id.as_str()), -space);
    }
}
