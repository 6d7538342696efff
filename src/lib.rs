#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod ir;
pub mod layout;
pub mod layout_dump;
pub mod parser;
pub mod render;
pub mod theme;
pub mod tree;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, LayoutConfig, RenderConfig, load_config};
pub use error::{LayoutJsonError, ParseError, TreeError};
pub use ir::{NodeKind, TreeNode};
pub use layout::{Layout, Placement, compute_layout};
pub use layout_dump::{LayoutDump, layout_to_json};
pub use parser::parse_tree;
pub use render::render_svg;
pub use theme::Theme;
pub use tree::{InsertMode, ModificationTree};

/// Parses a node list, lays it out and returns the layout as JSON.
pub fn layout_json(input: &str, config: &LayoutConfig) -> Result<String, LayoutJsonError> {
    let tree = ModificationTree::from_nodes(parse_tree(input)?)?;
    let layout = tree.layout(config);
    Ok(layout_to_json(&layout)?)
}
