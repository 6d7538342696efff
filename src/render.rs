use crate::config::{LayoutConfig, RenderConfig};
use crate::ir::NodeKind;
use crate::layout::{Layout, NodeLayout, Position};
use crate::theme::Theme;
use anyhow::Result;
use std::collections::HashMap;
use std::path::Path;

/// Debug preview of a layout as a standalone SVG document.
///
/// Draws security group boxes, stepped parent/child edges and one box per
/// placed node. It is meant for checking a layout by eye, not as a
/// replacement for the application's renderer.
pub fn render_svg(layout: &Layout, theme: &Theme, config: &LayoutConfig, render: &RenderConfig) -> String {
    let pad = render.padding.max(0.0);
    let (min_x, min_y, max_x, max_y) = content_bounds(layout);
    let offset_x = pad - min_x;
    let offset_y = pad - min_y;
    let width = (max_x - min_x + pad * 2.0).max(1.0);
    let height = (max_y - min_y + pad * 2.0).max(1.0);

    let mut svg = String::new();
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width:.2}\" height=\"{height:.2}\" viewBox=\"0 0 {width:.2} {height:.2}\">",
    ));
    svg.push_str(&format!(
        "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        render.background
    ));

    for group in &layout.security_groups {
        svg.push_str(&format!(
            "<rect class=\"security-group\" x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" rx=\"10\" ry=\"10\" fill=\"{}\" stroke=\"{}\" stroke-dasharray=\"6 4\" stroke-width=\"1.2\"/>",
            group.x + offset_x,
            group.y + offset_y,
            group.width,
            group.height,
            theme.group_background,
            theme.group_border
        ));
    }

    let absolute: HashMap<&str, Position> = layout
        .nodes
        .iter()
        .filter_map(|node| node.absolute.map(|pos| (node.id.as_str(), pos)))
        .collect();

    for edge in &layout.edges {
        let (Some(source), Some(target)) = (
            absolute.get(edge.source.as_str()),
            absolute.get(edge.target.as_str()),
        ) else {
            continue;
        };
        let points = step_points(*source, *target, config, offset_x, offset_y);
        svg.push_str(&format!(
            "<path d=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"1.4\"/>",
            points_to_path(&points),
            theme.line_color
        ));
    }

    for node in &layout.nodes {
        if let Some(pos) = node.absolute {
            svg.push_str(&node_svg(node, pos.x + offset_x, pos.y + offset_y, theme, config));
        }
    }

    svg.push_str("</svg>");
    svg
}

fn content_bounds(layout: &Layout) -> (f32, f32, f32, f32) {
    let mut min_x = 0.0f32;
    let mut min_y = 0.0f32;
    let mut max_x = layout.width;
    let mut max_y = layout.height;
    for group in &layout.security_groups {
        min_x = min_x.min(group.x);
        min_y = min_y.min(group.y);
        max_x = max_x.max(group.x + group.width);
        max_y = max_y.max(group.y + group.height);
    }
    (min_x, min_y, max_x, max_y)
}

/// Parent bottom centre, down to the gap between the rows, across, then
/// down into the child's top centre.
fn step_points(
    source: Position,
    target: Position,
    config: &LayoutConfig,
    offset_x: f32,
    offset_y: f32,
) -> Vec<(f32, f32)> {
    let sx = source.x + config.node_width / 2.0 + offset_x;
    let sy = source.y + config.node_height + offset_y;
    let tx = target.x + config.node_width / 2.0 + offset_x;
    let ty = target.y + offset_y;
    if (sx - tx).abs() < f32::EPSILON {
        return vec![(sx, sy), (tx, ty)];
    }
    let mid_y = ty - config.height_spacing / 2.0;
    vec![(sx, sy), (sx, mid_y), (tx, mid_y), (tx, ty)]
}

fn points_to_path(points: &[(f32, f32)]) -> String {
    if points.is_empty() {
        return String::new();
    }
    let mut d = String::new();
    d.push_str(&format!("M {:.2} {:.2}", points[0].0, points[0].1));
    for point in points.iter().skip(1) {
        d.push_str(&format!(" L {:.2} {:.2}", point.0, point.1));
    }
    d
}

fn node_svg(node: &NodeLayout, x: f32, y: f32, theme: &Theme, config: &LayoutConfig) -> String {
    let (fill, stroke) = match node.kind {
        NodeKind::Root => (&theme.root_fill, &theme.root_border),
        NodeKind::Security => (&theme.security_fill, &theme.security_border),
        NodeKind::Modification => (&theme.node_fill, &theme.node_border),
    };
    let text_fill = if node.kind == NodeKind::Root {
        theme.background.as_str()
    } else {
        theme.text_color.as_str()
    };
    let mut out = format!(
        "<rect x=\"{x:.2}\" y=\"{y:.2}\" width=\"{:.2}\" height=\"{:.2}\" rx=\"6\" ry=\"6\" fill=\"{fill}\" stroke=\"{stroke}\" stroke-width=\"1.2\"/>",
        config.node_width, config.node_height
    );
    out.push_str(&format!(
        "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"middle\" dominant-baseline=\"central\" font-family=\"{}\" font-size=\"{}\" fill=\"{text_fill}\">{}</text>",
        x + config.node_width / 2.0,
        y + config.node_height / 2.0,
        theme.font_family,
        theme.font_size,
        escape_xml(&node.label)
    ));
    out
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(svg: &str, output: &Path, render_cfg: &RenderConfig, theme: &Theme) -> Result<()> {
    let mut opt = usvg::Options::default();
    opt.font_family = theme
        .font_family
        .split(',')
        .next()
        .map(|family| family.trim().trim_matches('"').to_string())
        .unwrap_or_else(|| "Inter".to_string());
    if let Some(size) = usvg::Size::from_wh(render_cfg.width, render_cfg.height) {
        opt.default_size = size;
    }

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap_mut);
    pixmap.save_png(output)?;
    Ok(())
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
