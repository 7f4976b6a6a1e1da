use eframe::egui::{self, PointerButton, Pos2, Rect, Ui};

use super::super::ViewModel;
use super::super::scene::{Scene, TextMeasure};
use super::super::viewport::ViewTransform;

impl ViewModel {
    pub(in crate::app) fn handle_graph_zoom(
        &mut self,
        ui: &Ui,
        rect: Rect,
        response: &egui::Response,
    ) {
        if !response.hovered() {
            return;
        }

        let scroll = ui.input(|input| input.raw_scroll_delta.y);
        if scroll.abs() <= f32::EPSILON {
            return;
        }

        let pointer = ui
            .input(|input| input.pointer.hover_pos())
            .unwrap_or_else(|| rect.center());
        let zoom_factor = (1.0 + (scroll * 0.0018)).clamp(0.85, 1.15);
        self.viewport.zoom_about(pointer - rect.min, zoom_factor);
    }

    pub(in crate::app) fn handle_graph_pan(&mut self, response: &egui::Response) {
        if response.dragged_by(PointerButton::Secondary)
            || response.dragged_by(PointerButton::Middle)
            || (self.pan_active && response.dragged_by(PointerButton::Primary))
        {
            self.viewport.pan_by(response.drag_delta());
        }
        if response.drag_stopped() {
            self.pan_active = false;
        }
    }

    pub(in crate::app) fn handle_node_interaction(
        &mut self,
        ui: &Ui,
        rect: Rect,
        response: &egui::Response,
        measure: &dyn TextMeasure,
    ) {
        let Some(layout) = self.layout.as_mut() else {
            return;
        };
        let transform = self.viewport.transform();

        if response.drag_started_by(PointerButton::Primary) {
            let origin = ui
                .input(|input| input.pointer.press_origin())
                .or_else(|| response.interact_pointer_pos());
            let target = origin.and_then(|origin| node_at(&self.scene, transform, rect, origin));
            match target {
                Some(id) => self.interaction.drag_start(&mut self.scene, layout, &id),
                None => self.pan_active = true,
            }
        }

        if self.interaction.dragged().is_some() {
            if response.dragged_by(PointerButton::Primary)
                && let Some(pointer) = response.interact_pointer_pos()
            {
                let world = transform.screen_to_world(rect.min, pointer);
                self.interaction.drag_move(&mut self.scene, world);
            }
            if response.drag_stopped() {
                self.interaction.drag_end(&mut self.scene, layout);
            }
        }

        if response.clicked_by(PointerButton::Primary)
            && let Some(pointer) = response.interact_pointer_pos()
            && let Some(id) = node_at(&self.scene, transform, rect, pointer)
        {
            self.interaction
                .click(&mut self.store, &mut self.scene, &id, measure);
        }

        // Hover stays on the dragged node until release.
        if self.interaction.dragged().is_none() && !self.pan_active {
            let hovered = response
                .hover_pos()
                .and_then(|pointer| node_at(&self.scene, transform, rect, pointer));
            match hovered {
                Some(id) => self.interaction.hover_enter(&mut self.scene, &id),
                None => self.interaction.hover_exit(&mut self.scene),
            }
        }
    }
}

fn node_at(scene: &Scene, transform: ViewTransform, rect: Rect, pointer: Pos2) -> Option<String> {
    let world = transform.screen_to_world(rect.min, pointer);
    scene
        .nodes()
        .iter()
        .zip(scene.bodies())
        .rev()
        .find(|(node, body)| {
            let offset = (world - body.position).abs();
            let half = node.shape.half_size();
            offset.x <= half.x && offset.y <= half.y
        })
        .map(|(node, _)| node.id.clone())
}
