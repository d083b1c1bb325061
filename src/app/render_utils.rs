use eframe::egui::{Color32, Painter, Pos2, Rect, Stroke};

use nest_analysis::network::NodeType;
use nest_analysis::viewport::Viewport;

pub(super) fn blend_color(base: Color32, overlay: Color32, amount: f32) -> Color32 {
    let amount = amount.clamp(0.0, 1.0);
    let inverse = 1.0 - amount;

    Color32::from_rgba_unmultiplied(
        ((base.r() as f32 * inverse) + (overlay.r() as f32 * amount)) as u8,
        ((base.g() as f32 * inverse) + (overlay.g() as f32 * amount)) as u8,
        ((base.b() as f32 * inverse) + (overlay.b() as f32 * amount)) as u8,
        ((base.a() as f32 * inverse) + (overlay.a() as f32 * amount)) as u8,
    )
}

pub(super) fn dim_color(color: Color32, factor: f32) -> Color32 {
    let factor = factor.clamp(0.0, 1.0);
    Color32::from_rgba_unmultiplied(
        (color.r() as f32 * factor) as u8,
        (color.g() as f32 * factor) as u8,
        (color.b() as f32 * factor) as u8,
        (color.a() as f32 * (0.45 + (factor * 0.55))) as u8,
    )
}

/// Grid that scrolls and scales with the viewport.
pub(super) fn draw_background(painter: &Painter, rect: Rect, viewport: Viewport) {
    painter.rect_filled(rect, 0.0, Color32::from_rgb(19, 23, 29));

    let step = (100.0 * viewport.scale).max(20.0);
    let origin = rect.min + viewport.offset() * viewport.scale;
    let stroke = Stroke::new(1.0, Color32::from_rgba_unmultiplied(60, 70, 80, 70));

    let mut x = rect.left() + (origin.x - rect.left()).rem_euclid(step);
    while x < rect.right() {
        painter.line_segment([Pos2::new(x, rect.top()), Pos2::new(x, rect.bottom())], stroke);
        x += step;
    }

    let mut y = rect.top() + (origin.y - rect.top()).rem_euclid(step);
    while y < rect.bottom() {
        painter.line_segment([Pos2::new(rect.left(), y), Pos2::new(rect.right(), y)], stroke);
        y += step;
    }
}

pub(super) fn node_type_color(node_type: NodeType) -> Color32 {
    match node_type {
        NodeType::Inbox => Color32::from_rgb(140, 150, 165),
        NodeType::Questions => Color32::from_rgb(103, 196, 255),
        NodeType::Insights => Color32::from_rgb(245, 206, 93),
        NodeType::Themes => Color32::from_rgb(190, 130, 240),
        NodeType::Actions => Color32::from_rgb(110, 210, 140),
    }
}

pub(super) fn cluster_color(rgb: [u8; 3]) -> Color32 {
    Color32::from_rgb(rgb[0], rgb[1], rgb[2])
}

/// Edge tint scales with relationship strength.
pub(super) fn edge_color(strength: f32) -> Color32 {
    let alpha = (70.0 + strength.clamp(0.0, 1.0) * 150.0) as u8;
    Color32::from_rgba_unmultiplied(120, 128, 140, alpha)
}
