use std::borrow::Cow;
use std::collections::HashMap;

use crate::ir::TreeNode;

/// Positions of `nodes` in depth-first preorder, walking down from the first
/// node.
///
/// Children keep their relative order. Nodes the walk never reaches follow in
/// their original order.
pub fn preorder_positions(nodes: &[TreeNode]) -> Vec<usize> {
    let mut children: HashMap<&str, Vec<usize>> = HashMap::new();
    for (idx, node) in nodes.iter().enumerate().skip(1) {
        if let Some(parent) = node.parent_id.as_deref() {
            children.entry(parent).or_default().push(idx);
        }
    }

    let mut visited = vec![false; nodes.len()];
    let mut order = Vec::with_capacity(nodes.len());
    let mut stack: Vec<usize> = if nodes.is_empty() { Vec::new() } else { vec![0] };
    while let Some(idx) = stack.pop() {
        if std::mem::replace(&mut visited[idx], true) {
            continue;
        }
        order.push(idx);
        if let Some(kids) = children.get(nodes[idx].id.as_str()) {
            stack.extend(kids.iter().rev());
        }
    }
    order.extend((0..nodes.len()).filter(|&idx| !visited[idx]));
    order
}

/// `nodes` in depth-first preorder, borrowed when already in that order.
pub fn in_preorder(nodes: &[TreeNode]) -> Cow<'_, [TreeNode]> {
    let order = preorder_positions(nodes);
    if order.iter().enumerate().all(|(pos, &idx)| pos == idx) {
        Cow::Borrowed(nodes)
    } else {
        Cow::Owned(order.into_iter().map(|idx| nodes[idx].clone()).collect())
    }
}

/// Read-only lookup over a preordered node sequence.
#[derive(Debug, Clone)]
pub struct TreeIndex<'a> {
    nodes: &'a [TreeNode],
    positions: HashMap<&'a str, usize>,
}

impl<'a> TreeIndex<'a> {
    pub fn new(nodes: &'a [TreeNode]) -> Self {
        let mut positions = HashMap::with_capacity(nodes.len());
        for (idx, node) in nodes.iter().enumerate() {
            positions.entry(node.id.as_str()).or_insert(idx);
        }
        Self { nodes, positions }
    }

    pub fn nodes(&self) -> &'a [TreeNode] {
        self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.positions.get(id).copied()
    }

    pub fn parent(&self, node: &TreeNode) -> Option<&'a TreeNode> {
        let parent_id = node.parent_id.as_deref()?;
        self.position(parent_id).map(|idx| &self.nodes[idx])
    }

    pub fn parent_is_security(&self, node: &TreeNode) -> bool {
        self.parent(node)
            .map(|parent| parent.kind.is_security())
            .unwrap_or(false)
    }

    /// A security node hanging below another security node belongs to the
    /// same group as its parent.
    pub fn continues_security_group(&self, node: &TreeNode) -> bool {
        node.kind.is_security() && self.parent_is_security(node)
    }
}
