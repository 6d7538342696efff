use std::collections::HashSet;

use crate::config::LayoutConfig;
use crate::error::TreeError;
use crate::ir::{NodeKind, TreeNode};
use crate::layout::{Layout, compute_layout, preorder_positions};

/// Where a new node goes relative to its reference node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertMode {
    /// Last child of the reference, opening a new branch when it already
    /// has children.
    NewBranch,
    /// Between the reference and its children.
    After,
    /// Between the reference and its parent.
    Before,
}

/// The modification tree of a study, kept in depth-first preorder.
///
/// Every edit preserves that order so the sequence can be handed to
/// [`compute_layout`] as is.
#[derive(Debug, Clone)]
pub struct ModificationTree {
    nodes: Vec<TreeNode>,
}

impl ModificationTree {
    pub fn new(root: TreeNode) -> Self {
        let mut root = root;
        root.parent_id = None;
        root.kind = NodeKind::Root;
        Self { nodes: vec![root] }
    }

    /// Validates a flat node list and reorders it into preorder.
    ///
    /// Children keep the relative order they had in `nodes`.
    pub fn from_nodes(nodes: Vec<TreeNode>) -> Result<Self, TreeError> {
        let Some(first) = nodes.first() else {
            return Err(TreeError::Empty);
        };
        if first.parent_id.is_some() || first.kind != NodeKind::Root {
            return Err(TreeError::RootNotFirst(first.id.clone()));
        }

        let mut seen: HashSet<&str> = HashSet::new();
        for node in &nodes {
            match node.parent_id.as_deref() {
                None if !seen.is_empty() => {
                    return Err(TreeError::MultipleRoots(node.id.clone()));
                }
                None => {}
                Some(parent) if !seen.contains(parent) => {
                    return Err(if nodes.iter().any(|other| other.id == parent) {
                        TreeError::ParentAfterChild {
                            node: node.id.clone(),
                            parent: parent.to_string(),
                        }
                    } else {
                        TreeError::UnknownParent {
                            node: node.id.clone(),
                            parent: parent.to_string(),
                        }
                    });
                }
                Some(_) => {}
            }
            if node.parent_id.is_some() && node.kind == NodeKind::Root {
                return Err(TreeError::MultipleRoots(node.id.clone()));
            }
            if !seen.insert(node.id.as_str()) {
                return Err(TreeError::DuplicateNode(node.id.clone()));
            }
        }

        let ordered = preorder(nodes);
        Ok(Self { nodes: ordered })
    }

    pub fn nodes(&self) -> &[TreeNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn root(&self) -> &TreeNode {
        &self.nodes[0]
    }

    pub fn node(&self, id: &str) -> Option<&TreeNode> {
        self.nodes.iter().find(|node| node.id == id)
    }

    pub fn children(&self, id: &str) -> Vec<&TreeNode> {
        self.nodes
            .iter()
            .filter(|node| node.parent_id.as_deref() == Some(id))
            .collect()
    }

    /// Parent/child pairs in sequence order.
    pub fn edges(&self) -> Vec<(&str, &str)> {
        self.nodes
            .iter()
            .filter_map(|node| {
                node.parent_id
                    .as_deref()
                    .map(|parent| (parent, node.id.as_str()))
            })
            .collect()
    }

    fn index_of(&self, id: &str) -> Result<usize, TreeError> {
        self.nodes
            .iter()
            .position(|node| node.id == id)
            .ok_or_else(|| TreeError::UnknownNode(id.to_string()))
    }

    /// Number of nodes in the subtree starting at `idx`, the node included.
    fn subtree_len(&self, idx: usize) -> usize {
        let mut members: HashSet<&str> = HashSet::new();
        members.insert(self.nodes[idx].id.as_str());
        let mut len = 1;
        for node in &self.nodes[idx + 1..] {
            match node.parent_id.as_deref() {
                Some(parent) if members.contains(parent) => {
                    members.insert(node.id.as_str());
                    len += 1;
                }
                _ => break,
            }
        }
        len
    }

    pub fn add_node(
        &mut self,
        node: TreeNode,
        reference_id: &str,
        mode: InsertMode,
    ) -> Result<(), TreeError> {
        if self.node(&node.id).is_some() {
            return Err(TreeError::DuplicateNode(node.id));
        }
        if node.kind == NodeKind::Root {
            return Err(TreeError::MultipleRoots(node.id));
        }
        let reference_idx = self.index_of(reference_id)?;
        let mut node = node;

        match mode {
            InsertMode::NewBranch => {
                node.parent_id = Some(reference_id.to_string());
                let at = reference_idx + self.subtree_len(reference_idx);
                self.nodes.insert(at, node);
            }
            InsertMode::After => {
                for child in self
                    .nodes
                    .iter_mut()
                    .filter(|child| child.parent_id.as_deref() == Some(reference_id))
                {
                    child.parent_id = Some(node.id.clone());
                }
                node.parent_id = Some(reference_id.to_string());
                self.nodes.insert(reference_idx + 1, node);
            }
            InsertMode::Before => {
                let Some(parent) = self.nodes[reference_idx].parent_id.clone() else {
                    return Err(TreeError::RootOperation("preceded by another node"));
                };
                self.nodes[reference_idx].parent_id = Some(node.id.clone());
                node.parent_id = Some(parent);
                self.nodes.insert(reference_idx, node);
            }
        }
        tracing::debug!(reference = reference_id, ?mode, nodes = self.nodes.len(), "node added");
        Ok(())
    }

    /// Removes nodes, handing their children over to the removed node's
    /// parent. Nothing is removed if any id is unknown or names the root.
    pub fn remove_nodes(&mut self, ids: &[&str]) -> Result<(), TreeError> {
        for id in ids {
            let idx = self.index_of(id)?;
            if idx == 0 {
                return Err(TreeError::RootOperation("removed"));
            }
        }
        for id in ids {
            let Ok(idx) = self.index_of(id) else {
                continue;
            };
            let removed = self.nodes.remove(idx);
            for child in self
                .nodes
                .iter_mut()
                .filter(|child| child.parent_id.as_deref() == Some(removed.id.as_str()))
            {
                child.parent_id = removed.parent_id.clone();
            }
        }
        tracing::debug!(removed = ids.len(), nodes = self.nodes.len(), "nodes removed");
        Ok(())
    }

    /// Replaces the kind and label of an existing node. Structure is left
    /// untouched.
    pub fn update_node(&mut self, node: TreeNode) -> Result<(), TreeError> {
        let idx = self.index_of(&node.id)?;
        if idx == 0 && node.kind != NodeKind::Root {
            return Err(TreeError::RootOperation("given another kind"));
        }
        if idx != 0 && node.kind == NodeKind::Root {
            return Err(TreeError::MultipleRoots(node.id));
        }
        let existing = &mut self.nodes[idx];
        existing.kind = node.kind;
        existing.label = node.label;
        Ok(())
    }

    pub fn layout(&self, config: &LayoutConfig) -> Layout {
        compute_layout(&self.nodes, config)
    }
}

/// Moves the nodes into depth-first preorder.
fn preorder(nodes: Vec<TreeNode>) -> Vec<TreeNode> {
    let order = preorder_positions(&nodes);
    let mut slots: Vec<Option<TreeNode>> = nodes.into_iter().map(Some).collect();
    order
        .into_iter()
        .filter_map(|idx| slots[idx].take())
        .collect()
}
