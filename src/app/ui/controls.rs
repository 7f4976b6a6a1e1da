use eframe::egui::{self, Ui};
use log::debug;

use super::super::ViewModel;

impl ViewModel {
    pub(in crate::app) fn draw_controls(&mut self, ui: &mut Ui) {
        ui.heading("Clusters");
        ui.add_space(4.0);

        ui.horizontal(|ui| {
            if ui.button("All").clicked() && self.selection.set_all(true) {
                self.filter_dirty = true;
            }
            if ui.button("None").clicked() && self.selection.set_all(false) {
                self.filter_dirty = true;
            }
        });

        let mut toggled = Vec::new();
        egui::ScrollArea::vertical()
            .id_salt("cluster_list")
            .max_height(ui.available_height() * 0.6)
            .show(ui, |ui| {
                for (id, checked) in self.selection.entries() {
                    let mut value = *checked;
                    if ui.checkbox(&mut value, id.as_str()).changed() {
                        toggled.push((id.clone(), value));
                    }
                }
            });
        for (id, checked) in toggled {
            if self.selection.set(&id, checked) {
                debug!("cluster {id} {}", if checked { "shown" } else { "hidden" });
                self.filter_dirty = true;
            }
        }
        if self.subgraph.is_empty() && !self.filter_dirty {
            ui.weak("No clusters selected.");
        }

        ui.separator();
        ui.heading("Search");
        ui.horizontal(|ui| {
            ui.add(
                egui::TextEdit::singleline(&mut self.search)
                    .hint_text("word or cluster")
                    .desired_width(ui.available_width() - 28.0),
            );
            if ui.small_button("x").clicked() {
                self.search.clear();
            }
        });

        ui.separator();
        ui.heading("Layout");
        match &self.layout {
            Some(layout) => {
                let status = if layout.is_running() {
                    "running"
                } else {
                    "settled"
                };
                ui.label(format!("simulation: {status}"));
                ui.add(egui::ProgressBar::new(layout.alpha()).text(format!("alpha {:.3}", layout.alpha())));
            }
            None => {
                ui.label("simulation: waiting for canvas");
            }
        }
        let config = self.layout_config;
        ui.label(format!("link distance: {:.0}", config.link_distance));
        ui.label(format!("link strength: {:.2}", config.link_strength));
        ui.label(format!("charge: {:.0}", config.charge_strength));

        if let Some(id) = self.interaction.expanded() {
            ui.separator();
            ui.label(format!("expanded: {id}"));
        }
    }
}
