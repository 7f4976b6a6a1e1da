use eframe::egui::{Color32, Painter, Rect};

use crate::dataset::NodeKind;

pub(super) const HOVER_BORDER: Color32 = Color32::from_rgb(255, 165, 0);
pub(super) const HOVER_BORDER_WIDTH: f32 = 3.0;
pub(super) const DEFAULT_BORDER_WIDTH: f32 = 1.5;
pub(super) const SEARCH_BORDER: Color32 = Color32::from_rgb(103, 196, 255);

pub(super) const LINK_DEFAULT: Color32 = Color32::from_rgb(176, 176, 181);
pub(super) const LINK_DEFAULT_OPACITY: f32 = 0.6;
pub(super) const LINK_ACCENT: Color32 = Color32::from_rgb(255, 140, 0);
pub(super) const LINK_DIMMED: Color32 = Color32::from_rgb(153, 153, 153);
pub(super) const LINK_DIMMED_OPACITY: f32 = 0.1;
pub(super) const NODE_DIMMED_OPACITY: f32 = 0.2;

pub(super) fn default_border(kind: NodeKind) -> Color32 {
    match kind {
        NodeKind::Cluster => Color32::from_rgb(0, 91, 181),
        NodeKind::Word => Color32::from_rgb(46, 175, 77),
    }
}

pub(super) fn node_fill(kind: NodeKind) -> Color32 {
    match kind {
        NodeKind::Cluster => Color32::from_rgb(222, 235, 252),
        NodeKind::Word => Color32::from_rgb(226, 246, 231),
    }
}

pub(super) fn node_text_color(kind: NodeKind) -> Color32 {
    match kind {
        NodeKind::Cluster => Color32::from_rgb(10, 42, 84),
        NodeKind::Word => Color32::from_rgb(24, 60, 33),
    }
}

pub(super) fn with_opacity(color: Color32, opacity: f32) -> Color32 {
    color.gamma_multiply(opacity.clamp(0.0, 1.0))
}

pub(super) fn draw_background(painter: &Painter, rect: Rect) {
    painter.rect_filled(rect, 0.0, Color32::from_rgb(245, 246, 248));
}

pub(super) fn rect_visible(viewport: Rect, rect: Rect) -> bool {
    viewport.intersects(rect)
}

pub(super) fn segment_visible(viewport: Rect, start: eframe::egui::Pos2, end: eframe::egui::Pos2) -> bool {
    let bounds = Rect::from_two_pos(start, end).expand(2.0);
    viewport.intersects(bounds)
}
