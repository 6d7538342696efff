use std::collections::{HashMap, HashSet};
use std::path::Path;

use modification_tree_layout::{
    Layout, LayoutConfig, ModificationTree, NodeKind, Placement, TreeNode, compute_layout,
    parse_tree,
};

fn load_fixture(rel: &str) -> ModificationTree {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(rel);
    let input = std::fs::read_to_string(&path).expect("fixture read failed");
    let nodes = parse_tree(&input).expect("parse failed");
    ModificationTree::from_nodes(nodes).expect("invalid tree")
}

fn placements(layout: &Layout) -> HashMap<String, Placement> {
    layout
        .nodes
        .iter()
        .map(|node| (node.id.clone(), node.placement.expect("node left unplaced")))
        .collect()
}

fn assert_no_overlap(layout: &Layout, context: &str) {
    let mut cells = HashSet::new();
    for node in &layout.nodes {
        let placement = node.placement.expect("node left unplaced");
        assert!(
            cells.insert(placement),
            "{context}: {} shares cell {placement}",
            node.id
        );
    }
}

fn assert_relative_positions(layout: &Layout, context: &str) {
    for node in &layout.nodes {
        let absolute = node.absolute.expect("missing absolute position");
        let position = node.position.expect("missing position");
        match node.parent_id.as_deref().and_then(|id| layout.node(id)) {
            Some(parent) => {
                let origin = parent.absolute.expect("parent without position");
                assert_eq!(position.x, absolute.x - origin.x, "{context}: {}", node.id);
                assert_eq!(position.y, absolute.y - origin.y, "{context}: {}", node.id);
            }
            None => {
                assert_eq!(node.kind, NodeKind::Root, "{context}: {}", node.id);
                assert_eq!((position.x, position.y), (0.0, 0.0), "{context}: root");
            }
        }
    }
}

fn assert_groups_cover_security_nodes(layout: &Layout, context: &str) {
    for node in layout.nodes.iter().filter(|node| node.kind == NodeKind::Security) {
        let placement = node.placement.expect("node left unplaced");
        let group = layout
            .security_groups
            .iter()
            .find(|group| group.members.contains(&node.id))
            .unwrap_or_else(|| panic!("{context}: {} outside any group", node.id));
        assert!(group.contains(placement), "{context}: {} outside its box", node.id);
    }
}

const FIXTURES: [&str; 4] = [
    "linear.json",
    "branching.json",
    "wide.json",
    "security.json5",
];

#[test]
fn fixtures_satisfy_layout_properties() {
    for rel in FIXTURES {
        let tree = load_fixture(rel);
        let mut config = LayoutConfig::default();

        config.compact = false;
        let initial = tree.layout(&config);
        assert_no_overlap(&initial, rel);

        config.compact = true;
        let compacted = tree.layout(&config);
        assert_no_overlap(&compacted, rel);
        assert_relative_positions(&compacted, rel);
        assert_groups_cover_security_nodes(&compacted, rel);

        let before = placements(&initial);
        for (id, after) in placements(&compacted) {
            let start = before[&id];
            assert_eq!(after.row, start.row, "{rel}: {id} changed row");
            assert!(after.column <= start.column, "{rel}: {id} moved right");
        }

        let again = tree.layout(&config);
        for (a, b) in compacted.nodes.iter().zip(&again.nodes) {
            assert_eq!(a.position, b.position, "{rel}: {} not stable", a.id);
        }
    }
}

#[test]
fn branching_fixture_offsets() {
    let layout = load_fixture("branching.json").layout(&LayoutConfig::default());
    let cells = placements(&layout);
    let offset = |id: &str, parent: &str| {
        let child = cells[id];
        let parent = cells[parent];
        (child.column - parent.column, child.row - parent.row)
    };
    assert_eq!(cells["root"], Placement::new(0, 0));
    assert_eq!(offset("a", "root"), (0, 1));
    assert_eq!(offset("b", "a"), (0, 1));
    assert_eq!(offset("c", "b"), (0, 1));
    assert_eq!(offset("d", "c"), (0, 1));
    assert_eq!(offset("e", "c"), (1, 1));
    assert_eq!(offset("f", "b"), (1, 1));
}

#[test]
fn wide_fixture_compacts_root_branches() {
    let tree = load_fixture("wide.json");
    let mut config = LayoutConfig::default();
    config.compact = false;
    let loose = tree.layout(&config);
    config.compact = true;
    let tight = tree.layout(&config);
    assert!(tight.width < loose.width);
    // b is a leaf right under the root: it only has to clear a.
    assert_eq!(tight.node("b").unwrap().placement, Some(Placement::new(1, 1)));
}

#[test]
fn security_fixture_groups() {
    let layout = load_fixture("security.json5").layout(&LayoutConfig::default());
    let groups: Vec<(&str, usize)> = layout
        .security_groups
        .iter()
        .map(|group| (group.first_node.as_str(), group.members.len()))
        .collect();
    assert_eq!(groups, vec![("s1", 4), ("t1", 2)]);
    let s1 = layout.node("s1").unwrap();
    assert_eq!(s1.label, "N-1 contingencies");
}

/// Small deterministic generator so the property checks cover shapes no
/// fixture spells out.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0 >> 33
    }

    fn below(&mut self, bound: usize) -> usize {
        (self.next() % bound as u64) as usize
    }
}

fn random_tree(seed: u64, size: usize) -> Vec<TreeNode> {
    let mut rng = Lcg(seed);
    let mut nodes = vec![TreeNode::root("n0")];
    for idx in 1..size {
        let parent = &nodes[rng.below(idx)];
        let parent_id = parent.id.clone();
        let security_parent = parent.kind == NodeKind::Security;
        let id = format!("n{idx}");
        let node = if security_parent || rng.below(4) == 0 {
            TreeNode::security(&id, &parent_id)
        } else {
            TreeNode::modification(&id, &parent_id)
        };
        nodes.push(node);
    }
    nodes
}

#[test]
fn generated_trees_never_overlap() {
    for seed in 1..40u64 {
        let tree = ModificationTree::from_nodes(random_tree(seed, 60)).expect("generated tree");
        let context = format!("seed {seed}");
        let layout = compute_layout(tree.nodes(), &LayoutConfig::default());
        assert_no_overlap(&layout, &context);
        assert_relative_positions(&layout, &context);
        assert_groups_cover_security_nodes(&layout, &context);
    }
}

#[test]
fn generated_trees_lay_out_in_any_topological_order() {
    let config = LayoutConfig::default();
    for seed in 1..40u64 {
        let nodes = random_tree(seed, 60);
        let context = format!("seed {seed} unordered");
        let layout = compute_layout(&nodes, &config);
        assert_eq!(layout.nodes.len(), nodes.len(), "{context}");
        for (input, placed) in nodes.iter().zip(&layout.nodes) {
            assert_eq!(input.id, placed.id, "{context}: output order");
            assert!(placed.placement.is_some(), "{context}: {} unplaced", placed.id);
        }
        assert_no_overlap(&layout, &context);
        assert_relative_positions(&layout, &context);
        assert_groups_cover_security_nodes(&layout, &context);

        let tree = ModificationTree::from_nodes(nodes).expect("generated tree");
        let reordered = placements(&tree.layout(&config));
        for (id, placement) in placements(&layout) {
            assert_eq!(reordered[&id], placement, "{context}: {id}");
        }
    }
}

#[test]
fn tree_edits_relayout_cleanly() {
    let mut tree = load_fixture("branching.json");
    tree.add_node(
        TreeNode::security("s", ""),
        "c",
        modification_tree_layout::InsertMode::After,
    )
    .expect("insert after c");
    tree.remove_nodes(&["b"]).expect("remove b");
    let layout = tree.layout(&LayoutConfig::default());
    assert_no_overlap(&layout, "edited");
    assert_relative_positions(&layout, "edited");
    assert_eq!(layout.node("c").unwrap().parent_id.as_deref(), Some("a"));
    assert_eq!(layout.node("d").unwrap().parent_id.as_deref(), Some("s"));
}
