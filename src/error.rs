use thiserror::Error;

/// Errors raised while editing or validating a modification tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("tree has no nodes")]
    Empty,

    #[error("first node must be the root, found {0}")]
    RootNotFirst(String),

    #[error("more than one root node: {0}")]
    MultipleRoots(String),

    #[error("duplicate node id: {0}")]
    DuplicateNode(String),

    #[error("unknown node: {0}")]
    UnknownNode(String),

    #[error("node {node} references unknown parent {parent}")]
    UnknownParent { node: String, parent: String },

    #[error("node {node} appears before its parent {parent}")]
    ParentAfterChild { node: String, parent: String },

    #[error("the root node cannot be {0}")]
    RootOperation(&'static str),
}

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("invalid node list: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid node list: {0}")]
    Json5(#[from] json5::Error),

    #[error("input contains no nodes")]
    NoNodes,
}

#[derive(Error, Debug)]
pub enum LayoutJsonError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Tree(#[from] TreeError),

    #[error("failed to serialize layout: {0}")]
    Serialize(#[from] serde_json::Error),
}
