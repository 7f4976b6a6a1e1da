use std::collections::HashSet;

use eframe::egui::{Align2, FontId, Id, Rect, Sense, Stroke, StrokeKind, Ui, vec2};
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use super::super::ViewModel;
use super::super::render_utils::{
    SEARCH_BORDER, draw_background, node_fill, node_text_color, rect_visible, segment_visible,
    with_opacity,
};
use super::super::scene::PainterMeasure;

const STYLE_FADE_SECS: f32 = 0.15;

fn fuzzy_match_score(matcher: &SkimMatcherV2, text: &str, query: &str) -> Option<i64> {
    matcher
        .fuzzy_match(text, query)
        .or_else(|| matcher.fuzzy_match(&text.to_lowercase(), &query.to_lowercase()))
}

impl ViewModel {
    fn search_matches(&self) -> HashSet<usize> {
        let query = self.search.trim();
        if query.is_empty() || self.interaction.hovered().is_some() {
            return HashSet::new();
        }

        let matcher = SkimMatcherV2::default();
        self.scene
            .nodes()
            .iter()
            .enumerate()
            .filter(|(_, node)| {
                self.store
                    .node(&node.id)
                    .is_some_and(|record| fuzzy_match_score(&matcher, &record.text, query).is_some())
            })
            .map(|(index, _)| index)
            .collect()
    }

    pub(in crate::app) fn draw_graph(&mut self, ui: &mut Ui) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        let painter = ui.painter_at(rect);
        let measure = PainterMeasure::new(&painter);

        if self.layout.is_none() {
            self.initialize_layout(rect.size(), &measure);
        } else if self.filter_dirty {
            self.apply_active_subgraph(&measure);
        }

        self.handle_node_interaction(ui, rect, &response, &measure);
        self.handle_graph_pan(&response);
        self.handle_graph_zoom(ui, rect, &response);

        let now = ui.input(|input| input.time);
        if self.viewport.advance(now) {
            ui.ctx().request_repaint();
        }

        if let Some(layout) = self.layout.as_mut() {
            let (bodies, links) = self.scene.simulation_parts();
            if layout.tick(bodies, links) {
                ui.ctx().request_repaint();
            }
        }

        draw_background(&painter, rect);

        if self.scene.is_empty() {
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                "No clusters selected",
                FontId::proportional(16.0),
                ui.visuals().weak_text_color(),
            );
            return;
        }

        let transform = self.viewport.transform();
        let scale = transform.scale;
        let ctx = ui.ctx().clone();

        for link in self.scene.links() {
            let (Some(source), Some(target)) = (
                self.scene.position(link.source),
                self.scene.position(link.target),
            ) else {
                continue;
            };
            let start = transform.world_to_screen(rect.min, source);
            let end = transform.world_to_screen(rect.min, target);
            if !segment_visible(rect, start, end) {
                continue;
            }
            let opacity = ctx.animate_value_with_time(
                Id::new(link.handle),
                link.style.opacity,
                STYLE_FADE_SECS,
            );
            painter.line_segment(
                [start, end],
                Stroke::new(1.5 * scale, with_opacity(link.style.color, opacity)),
            );
        }

        let search_matches = self.search_matches();
        for (index, (node, body)) in self.scene.nodes().iter().zip(self.scene.bodies()).enumerate() {
            let center = transform.world_to_screen(rect.min, body.position);
            let node_rect = Rect::from_center_size(center, node.shape.size * scale);
            if !rect_visible(rect, node_rect) {
                continue;
            }

            let opacity =
                ctx.animate_value_with_time(Id::new(node.handle), node.style.opacity, STYLE_FADE_SECS);
            let border = if search_matches.contains(&index) {
                SEARCH_BORDER
            } else {
                node.style.border
            };
            painter.rect(
                node_rect,
                node.shape.corner_radius() * scale,
                with_opacity(node_fill(node.kind), opacity),
                Stroke::new(node.style.border_width * scale, with_opacity(border, opacity)),
                StrokeKind::Middle,
            );
            painter.text(
                center,
                Align2::CENTER_CENTER,
                &node.shape.label,
                FontId::proportional(node.shape.font_size * scale),
                with_opacity(node_text_color(node.kind), opacity),
            );
        }

        if let Some(id) = self.interaction.hovered()
            && let Some(record) = self.store.node(id)
            && let Some(index) = self.scene.node_index(id)
        {
            let degree = self
                .scene
                .link_pairs()
                .iter()
                .filter(|(source, target)| *source == index || *target == index)
                .count();
            painter.text(
                rect.left_top() + vec2(10.0, 10.0),
                Align2::LEFT_TOP,
                format!("{}  |  {}  |  links {degree}", record.text, record.kind.label()),
                FontId::proportional(13.0),
                ui.visuals().strong_text_color(),
            );
        }
    }
}
