use crate::error::ParseError;
use crate::ir::TreeNode;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NodeListFile {
    List(Vec<TreeNode>),
    Wrapped { nodes: Vec<TreeNode> },
}

impl NodeListFile {
    fn into_nodes(self) -> Vec<TreeNode> {
        match self {
            NodeListFile::List(nodes) => nodes,
            NodeListFile::Wrapped { nodes } => nodes,
        }
    }
}

/// Reads a node list, either a bare array or `{ "nodes": [...] }`.
///
/// Strict JSON is tried first; JSON5 is accepted as a fallback so
/// hand-written trees can keep comments and trailing commas.
pub fn parse_tree(input: &str) -> Result<Vec<TreeNode>, ParseError> {
    let parsed = match serde_json::from_str::<NodeListFile>(input) {
        Ok(parsed) => parsed,
        Err(json_err) => match json5::from_str::<NodeListFile>(input) {
            Ok(parsed) => {
                tracing::debug!("node list parsed as JSON5");
                parsed
            }
            // A syntax error may just mean JSON5 input; report the JSON5
            // diagnostic then, the strict one otherwise.
            Err(json5_err) if json_err.is_syntax() => return Err(ParseError::Json5(json5_err)),
            Err(_) => return Err(ParseError::Json(json_err)),
        },
    };
    let nodes = parsed.into_nodes();
    if nodes.is_empty() {
        return Err(ParseError::NoNodes);
    }
    Ok(nodes)
}
