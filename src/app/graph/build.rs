use eframe::egui::Vec2;
use log::{debug, info};

use super::super::ViewModel;
use super::super::filter::apply_filter;
use super::super::physics::LayoutEngine;
use super::super::scene::TextMeasure;

impl ViewModel {
    pub(in crate::app) fn initialize_layout(&mut self, size: Vec2, measure: &dyn TextMeasure) {
        let width = size.x.max(1.0);
        let height = size.y.max(1.0);
        info!("initializing layout for a {width:.0}x{height:.0} canvas");

        self.layout = Some(LayoutEngine::new(self.layout_config, width, height));
        if self.filter_dirty {
            self.apply_active_subgraph(measure);
        } else {
            self.sync_scene(measure);
        }
    }

    pub(in crate::app) fn apply_active_subgraph(&mut self, measure: &dyn TextMeasure) {
        self.filter_dirty = false;
        self.subgraph = apply_filter(&self.store, &self.selection);
        debug!(
            "active subgraph: {} nodes, {} links",
            self.subgraph.nodes.len(),
            self.subgraph.links.len()
        );
        self.sync_scene(measure);
    }

    fn sync_scene(&mut self, measure: &dyn TextMeasure) {
        let Some(layout) = self.layout.as_mut() else {
            return;
        };

        let report = self
            .scene
            .reconcile(&mut self.store, &self.subgraph, layout, measure);
        debug!("reconciled scene: {report:?}");

        let (bodies, links) = self.scene.simulation_parts();
        layout.bind(bodies, links);
        layout.restart();

        self.interaction
            .drop_hidden_expansion(&mut self.store, &self.scene);
        self.interaction.refresh_hover(&mut self.scene);
    }
}
