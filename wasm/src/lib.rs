use modification_tree_layout::{LayoutConfig, layout_json};
use serde::Deserialize;
use wasm_bindgen::prelude::*;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TreeLayoutOptions {
    node_width: Option<f32>,
    node_height: Option<f32>,
    width_spacing: Option<f32>,
    height_spacing: Option<f32>,
    group_padding: Option<f32>,
    compact: Option<bool>,
}

fn build_layout_config(options: TreeLayoutOptions) -> LayoutConfig {
    let mut config = LayoutConfig::default();
    if let Some(v) = options.node_width {
        config.node_width = v;
    }
    if let Some(v) = options.node_height {
        config.node_height = v;
    }
    if let Some(v) = options.width_spacing {
        config.width_spacing = v;
    }
    if let Some(v) = options.height_spacing {
        config.height_spacing = v;
    }
    if let Some(v) = options.group_padding {
        config.group_padding = v;
    }
    if let Some(v) = options.compact {
        config.compact = v;
    }
    config
}

/// Lays out a JSON node list and returns the positioned nodes, edges and
/// security groups as JSON.
#[wasm_bindgen]
pub fn layout_modification_tree(nodes_json: &str, options_json: Option<String>) -> Result<String, JsValue> {
    let options = if let Some(raw_options) = options_json {
        serde_json::from_str::<TreeLayoutOptions>(&raw_options)
            .map_err(|error| JsValue::from_str(&error.to_string()))?
    } else {
        TreeLayoutOptions::default()
    };

    let config = build_layout_config(options);
    layout_json(nodes_json, &config).map_err(|error| JsValue::from_str(&error.to_string()))
}
