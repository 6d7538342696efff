use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    pub font_size: f32,
    pub text_color: String,
    pub node_fill: String,
    pub node_border: String,
    pub root_fill: String,
    pub root_border: String,
    pub security_fill: String,
    pub security_border: String,
    pub group_background: String,
    pub group_border: String,
    pub line_color: String,
    pub background: String,
}

impl Theme {
    pub fn classic() -> Self {
        Self {
            font_family: "\"trebuchet ms\", verdana, arial, sans-serif".to_string(),
            font_size: 14.0,
            text_color: "#333333".to_string(),
            node_fill: "#ECECFF".to_string(),
            node_border: "#9370DB".to_string(),
            root_fill: "#9370DB".to_string(),
            root_border: "#6A4DB0".to_string(),
            security_fill: "#FFF4DE".to_string(),
            security_border: "#D39A2B".to_string(),
            group_background: "#FFFFDE".to_string(),
            group_border: "#AAAA33".to_string(),
            line_color: "#333333".to_string(),
            background: "#FFFFFF".to_string(),
        }
    }

    pub fn modern() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            font_size: 13.0,
            text_color: "#1C2430".to_string(),
            node_fill: "#F8FAFF".to_string(),
            node_border: "#C7D2E5".to_string(),
            root_fill: "#3B5BDB".to_string(),
            root_border: "#2F4AB8".to_string(),
            security_fill: "#FFF8EC".to_string(),
            security_border: "#E8B25C".to_string(),
            group_background: "#F7FAFF".to_string(),
            group_border: "#D7E0F0".to_string(),
            line_color: "#7A8AA6".to_string(),
            background: "#FFFFFF".to_string(),
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "modern" => Some(Self::modern()),
            "classic" | "default" | "base" => Some(Self::classic()),
            _ => None,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::modern()
    }
}
