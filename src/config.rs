use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub node_width: f32,
    pub node_height: f32,
    pub width_spacing: f32,
    pub height_spacing: f32,
    pub group_padding: f32,
    pub compact: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            node_width: 180.0,
            node_height: 60.0,
            width_spacing: 70.0,
            height_spacing: 90.0,
            group_padding: 20.0,
            compact: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    pub width: f32,
    pub height: f32,
    pub padding: f32,
    pub background: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
            padding: 40.0,
            background: "#FFFFFF".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub theme: Theme,
    pub layout: LayoutConfig,
    pub render: RenderConfig,
}

impl Default for Config {
    fn default() -> Self {
        let theme = Theme::modern();
        let render = RenderConfig {
            background: theme.background.clone(),
            ..Default::default()
        };
        Self {
            theme,
            layout: LayoutConfig::default(),
            render,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ThemeVariables {
    font_family: Option<String>,
    font_size: Option<f32>,
    text_color: Option<String>,
    node_fill: Option<String>,
    node_border: Option<String>,
    root_fill: Option<String>,
    root_border: Option<String>,
    security_fill: Option<String>,
    security_border: Option<String>,
    group_background: Option<String>,
    group_border: Option<String>,
    line_color: Option<String>,
    background: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct LayoutConfigFile {
    node_width: Option<f32>,
    node_height: Option<f32>,
    width_spacing: Option<f32>,
    height_spacing: Option<f32>,
    group_padding: Option<f32>,
    compact: Option<bool>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct RenderConfigFile {
    width: Option<f32>,
    height: Option<f32>,
    padding: Option<f32>,
    background: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    theme_variables: Option<ThemeVariables>,
    layout: Option<LayoutConfigFile>,
    render: Option<RenderConfigFile>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path)?;
    parse_config(&contents)
}

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let parsed: ConfigFile = serde_json::from_str(contents)?;
    let mut config = Config::default();

    if let Some(theme_name) = parsed.theme.as_deref() {
        match Theme::from_name(theme_name) {
            Some(theme) => {
                config.render.background = theme.background.clone();
                config.theme = theme;
            }
            None => tracing::warn!(theme = theme_name, "unknown theme, keeping default"),
        }
    }

    if let Some(vars) = parsed.theme_variables {
        apply_theme_variables(&mut config.theme, vars);
    }

    if let Some(layout) = parsed.layout {
        if let Some(v) = layout.node_width {
            config.layout.node_width = v;
        }
        if let Some(v) = layout.node_height {
            config.layout.node_height = v;
        }
        if let Some(v) = layout.width_spacing {
            config.layout.width_spacing = v;
        }
        if let Some(v) = layout.height_spacing {
            config.layout.height_spacing = v;
        }
        if let Some(v) = layout.group_padding {
            config.layout.group_padding = v;
        }
        if let Some(v) = layout.compact {
            config.layout.compact = v;
        }
    }

    if let Some(render) = parsed.render {
        if let Some(v) = render.width {
            config.render.width = v;
        }
        if let Some(v) = render.height {
            config.render.height = v;
        }
        if let Some(v) = render.padding {
            config.render.padding = v;
        }
        if let Some(v) = render.background {
            config.render.background = v;
        }
    }

    Ok(config)
}

fn apply_theme_variables(theme: &mut Theme, vars: ThemeVariables) {
    if let Some(v) = vars.font_family {
        theme.font_family = v;
    }
    if let Some(v) = vars.font_size {
        theme.font_size = v;
    }
    if let Some(v) = vars.text_color {
        theme.text_color = v;
    }
    if let Some(v) = vars.node_fill {
        theme.node_fill = v;
    }
    if let Some(v) = vars.node_border {
        theme.node_border = v;
    }
    if let Some(v) = vars.root_fill {
        theme.root_fill = v;
    }
    if let Some(v) = vars.root_border {
        theme.root_border = v;
    }
    if let Some(v) = vars.security_fill {
        theme.security_fill = v;
    }
    if let Some(v) = vars.security_border {
        theme.security_border = v;
    }
    if let Some(v) = vars.group_background {
        theme.group_background = v;
    }
    if let Some(v) = vars.group_border {
        theme.group_border = v;
    }
    if let Some(v) = vars.line_color {
        theme.line_color = v;
    }
    if let Some(v) = vars.background {
        theme.background = v;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_path_gives_defaults() {
        let config = load_config(None).unwrap();
        assert_eq!(config.layout.node_width, 180.0);
        assert!(config.layout.compact);
    }

    #[test]
    fn partial_overrides() {
        let config = parse_config(
            r##"{
                "theme": "classic",
                "themeVariables": { "nodeFill": "#123456", "fontSize": 11 },
                "layout": { "nodeWidth": 200, "compact": false },
                "render": { "padding": 8 }
            }"##,
        )
        .unwrap();
        assert_eq!(config.theme.node_fill, "#123456");
        assert_eq!(config.theme.font_size, 11.0);
        assert_eq!(config.theme.group_border, Theme::classic().group_border);
        assert_eq!(config.layout.node_width, 200.0);
        assert_eq!(config.layout.node_height, 60.0);
        assert!(!config.layout.compact);
        assert_eq!(config.render.padding, 8.0);
    }

    #[test]
    fn unknown_theme_is_ignored() {
        let config = parse_config(r#"{ "theme": "neon" }"#).unwrap();
        assert_eq!(config.theme.node_fill, Theme::modern().node_fill);
    }

    #[test]
    fn malformed_config_is_an_error() {
        assert!(parse_config("{ layout: ").is_err());
    }
}
