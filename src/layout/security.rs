use super::*;

#[derive(Debug)]
struct OpenGroup {
    members: Vec<String>,
    top_left: Placement,
    bottom_right: Placement,
}

impl OpenGroup {
    fn start(node: &TreeNode, placement: Placement) -> Self {
        Self {
            members: vec![node.id.clone()],
            top_left: placement,
            bottom_right: placement,
        }
    }

    fn extend(&mut self, node: &TreeNode, placement: Placement) {
        self.members.push(node.id.clone());
        self.top_left.row = self.top_left.row.min(placement.row);
        self.top_left.column = self.top_left.column.min(placement.column);
        self.bottom_right.row = self.bottom_right.row.max(placement.row);
        self.bottom_right.column = self.bottom_right.column.max(placement.column);
    }

    fn finish(self, config: &LayoutConfig) -> SecurityGroupLayout {
        let first_node = self.members[0].clone();
        let origin = grid_to_pixels(self.top_left, config);
        let far = grid_to_pixels(self.bottom_right, config);
        let pad = config.group_padding;
        let group = SecurityGroupLayout {
            id: format!("security-group-{first_node}"),
            first_node,
            members: self.members,
            top_left: self.top_left,
            bottom_right: self.bottom_right,
            x: origin.x - pad,
            y: origin.y - pad,
            width: far.x - origin.x + config.node_width + pad * 2.0,
            height: far.y - origin.y + config.node_height + pad * 2.0,
        };
        debug!(
            group = %group.id,
            members = group.members.len(),
            top_left = %group.top_left,
            bottom_right = %group.bottom_right,
            "security group"
        );
        group
    }
}

/// Bounding boxes of the security node groups, in sequence order.
///
/// A group opens on a security node and keeps growing while the following
/// nodes are security nodes under a security parent. Anything else closes it,
/// and the closing node is then considered as the possible start of the next
/// group.
pub fn extract_security_groups(
    index: &TreeIndex<'_>,
    grid: &PlacementGrid,
    config: &LayoutConfig,
) -> Vec<SecurityGroupLayout> {
    let mut groups = Vec::new();
    let mut open: Option<OpenGroup> = None;

    for node in index.nodes() {
        let Some(placement) = grid.placement(&node.id) else {
            continue;
        };
        if let Some(group) = open.as_mut() {
            if index.continues_security_group(node) {
                group.extend(node, placement);
                continue;
            }
            if let Some(done) = open.take() {
                groups.push(done.finish(config));
            }
        }
        if node.kind.is_security() {
            open = Some(OpenGroup::start(node, placement));
        }
    }
    if let Some(done) = open {
        groups.push(done.finish(config));
    }
    groups
}
