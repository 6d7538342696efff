use super::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtremeMode {
    Min,
    Max,
}

impl ExtremeMode {
    fn pick(self, a: i32, b: i32) -> i32 {
        match self {
            ExtremeMode::Min => a.min(b),
            ExtremeMode::Max => a.max(b),
        }
    }
}

/// Running state of the security group currently being walked.
#[derive(Debug, Default)]
struct GroupAccumulator {
    extreme: Option<i32>,
    rows: Vec<i32>,
}

impl GroupAccumulator {
    fn is_open(&self) -> bool {
        self.extreme.is_some()
    }

    fn reset(&mut self) {
        self.extreme = None;
        self.rows.clear();
    }

    /// Folds one member in and returns the group's extreme after it.
    fn absorb(&mut self, row: i32, column: i32, mode: ExtremeMode) -> i32 {
        let extreme = match self.extreme {
            Some(current) => mode.pick(current, column),
            None => column,
        };
        self.extreme = Some(extreme);
        if !self.rows.contains(&row) {
            self.rows.push(row);
        }
        extreme
    }
}

fn record(map: &mut BTreeMap<i32, i32>, row: i32, column: i32, mode: ExtremeMode) {
    map.entry(row)
        .and_modify(|current| *current = mode.pick(*current, column))
        .or_insert(column);
}

/// Extreme column of `nodes` for each row they occupy.
///
/// Members of a security group all report the group's extreme: its box is
/// treated as solid, so a row holding one member is as wide as the whole
/// group. Rows discovered earlier in the group are raised (or lowered) when
/// a later member moves the extreme.
pub fn column_extremes_by_row(
    nodes: &[TreeNode],
    index: &TreeIndex<'_>,
    grid: &PlacementGrid,
    mode: ExtremeMode,
) -> BTreeMap<i32, i32> {
    let mut extremes = BTreeMap::new();
    let mut group = GroupAccumulator::default();

    for node in nodes {
        let Some(placement) = grid.placement(&node.id) else {
            continue;
        };
        if !node.kind.is_security() {
            group.reset();
            record(&mut extremes, placement.row, placement.column, mode);
            continue;
        }
        if !(group.is_open() && index.continues_security_group(node)) {
            group.reset();
        }
        let extreme = group.absorb(placement.row, placement.column, mode);
        for row in &group.rows {
            record(&mut extremes, *row, extreme, mode);
        }
    }
    extremes
}

pub fn minimum_column_by_rows(
    nodes: &[TreeNode],
    index: &TreeIndex<'_>,
    grid: &PlacementGrid,
) -> BTreeMap<i32, i32> {
    column_extremes_by_row(nodes, index, grid, ExtremeMode::Min)
}

pub fn maximum_column_by_rows(
    nodes: &[TreeNode],
    index: &TreeIndex<'_>,
    grid: &PlacementGrid,
) -> BTreeMap<i32, i32> {
    column_extremes_by_row(nodes, index, grid, ExtremeMode::Max)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place(grid: &mut PlacementGrid, id: &str, row: i32, column: i32) {
        grid.set_placement(id, Placement::new(row, column));
    }

    #[test]
    fn plain_nodes_report_per_row_extremes() {
        let nodes = vec![
            TreeNode::root("root"),
            TreeNode::modification("a", "root"),
            TreeNode::modification("b", "root"),
            TreeNode::modification("c", "a"),
        ];
        let index = TreeIndex::new(&nodes);
        let mut grid = PlacementGrid::new();
        place(&mut grid, "root", 0, 0);
        place(&mut grid, "a", 1, 0);
        place(&mut grid, "b", 1, 3);
        place(&mut grid, "c", 2, 0);

        let max = maximum_column_by_rows(&nodes, &index, &grid);
        let min = minimum_column_by_rows(&nodes, &index, &grid);
        assert_eq!(max, BTreeMap::from([(0, 0), (1, 3), (2, 0)]));
        assert_eq!(min, BTreeMap::from([(0, 0), (1, 0), (2, 0)]));
    }

    #[test]
    fn nested_security_chain_shares_one_extreme() {
        // n -> s1 -> s2 -> s3, with s2 sticking out to the right and s3 to
        // the left of the chain.
        let nodes = vec![
            TreeNode::root("root"),
            TreeNode::modification("n", "root"),
            TreeNode::security("s1", "n"),
            TreeNode::security("s2", "s1"),
            TreeNode::security("s3", "s2"),
        ];
        let index = TreeIndex::new(&nodes);
        let mut grid = PlacementGrid::new();
        place(&mut grid, "root", 0, 0);
        place(&mut grid, "n", 1, 2);
        place(&mut grid, "s1", 2, 2);
        place(&mut grid, "s2", 3, 4);
        place(&mut grid, "s3", 4, 1);

        let chain = &nodes[2..];
        let max = maximum_column_by_rows(chain, &index, &grid);
        assert_eq!(max, BTreeMap::from([(2, 4), (3, 4), (4, 4)]));
        let min = minimum_column_by_rows(chain, &index, &grid);
        assert_eq!(min, BTreeMap::from([(2, 1), (3, 1), (4, 1)]));
    }

    #[test]
    fn group_extreme_does_not_hide_wider_plain_nodes() {
        let nodes = vec![
            TreeNode::root("root"),
            TreeNode::modification("wide", "root"),
            TreeNode::modification("n", "root"),
            TreeNode::security("s1", "n"),
        ];
        let index = TreeIndex::new(&nodes);
        let mut grid = PlacementGrid::new();
        place(&mut grid, "root", 0, 0);
        place(&mut grid, "wide", 1, 0);
        place(&mut grid, "n", 1, 5);
        place(&mut grid, "s1", 2, 5);

        let max = maximum_column_by_rows(&nodes, &index, &grid);
        assert_eq!(max.get(&1), Some(&5));
        assert_eq!(max.get(&2), Some(&5));
    }

    #[test]
    fn plain_node_resets_group_context() {
        // s1 -> m -> s2: s2 starts a new group, so s1's row keeps its own value.
        let nodes = vec![
            TreeNode::root("root"),
            TreeNode::security("s1", "root"),
            TreeNode::modification("m", "s1"),
            TreeNode::security("s2", "m"),
        ];
        let index = TreeIndex::new(&nodes);
        let mut grid = PlacementGrid::new();
        place(&mut grid, "root", 0, 0);
        place(&mut grid, "s1", 1, 0);
        place(&mut grid, "m", 2, 0);
        place(&mut grid, "s2", 3, 6);

        let max = maximum_column_by_rows(&nodes, &index, &grid);
        assert_eq!(max, BTreeMap::from([(0, 0), (1, 0), (2, 0), (3, 6)]));
    }

    #[test]
    fn unplaced_nodes_are_ignored() {
        let nodes = vec![TreeNode::root("root"), TreeNode::modification("a", "root")];
        let index = TreeIndex::new(&nodes);
        let mut grid = PlacementGrid::new();
        place(&mut grid, "root", 0, 0);
        let min = minimum_column_by_rows(&nodes, &index, &grid);
        assert_eq!(min, BTreeMap::from([(0, 0)]));
    }
}
