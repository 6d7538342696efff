use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeKind {
    Root,
    #[serde(alias = "NETWORK_MODIFICATION", alias = "CONSTRUCTION")]
    Modification,
    Security,
}

impl NodeKind {
    pub fn is_security(self) -> bool {
        matches!(self, NodeKind::Security)
    }
}

/// One node of the modification tree as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeNode {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(alias = "type", alias = "nodeType")]
    pub kind: NodeKind,
    #[serde(default, alias = "name", skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl TreeNode {
    pub fn root(id: &str) -> Self {
        Self {
            id: id.to_string(),
            parent_id: None,
            kind: NodeKind::Root,
            label: None,
        }
    }

    pub fn modification(id: &str, parent: &str) -> Self {
        Self {
            id: id.to_string(),
            parent_id: Some(parent.to_string()),
            kind: NodeKind::Modification,
            label: None,
        }
    }

    pub fn security(id: &str, parent: &str) -> Self {
        Self {
            id: id.to_string(),
            parent_id: Some(parent.to_string()),
            kind: NodeKind::Security,
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.id)
    }
}
