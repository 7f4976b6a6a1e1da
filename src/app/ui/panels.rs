use eframe::egui::{self, Align, Context, Id, Layout};

use crate::dataset::GraphStore;

use super::super::filter::{ActiveSubgraph, ClusterSelection};
use super::super::interaction::InteractionController;
use super::super::physics::LayoutConfig;
use super::super::scene::Scene;
use super::super::viewport::Viewport;
use super::super::ViewModel;

const HELP_TEXT: &[(&str, &str)] = &[
    ("Drag a node", "Pin it under the pointer; release to let the layout take it back."),
    ("Click a word", "Show its full text. Clicking again, or another word, collapses it."),
    ("Hover a node", "Highlight it and its direct neighbours."),
    ("Scroll", "Zoom around the pointer."),
    ("Drag the background", "Pan the view."),
    ("Cluster checkboxes", "Show or hide a cluster together with its words."),
];

impl ViewModel {
    pub(in crate::app) fn new(store: GraphStore, layout_config: LayoutConfig) -> Self {
        let selection = ClusterSelection::all_selected(&store);
        let subgraph = ActiveSubgraph::identity(&store);

        Self {
            store,
            selection,
            subgraph,
            scene: Scene::default(),
            layout: None,
            layout_config,
            interaction: InteractionController::default(),
            viewport: Viewport::default(),
            search: String::new(),
            help_open: false,
            filter_dirty: false,
            pan_active: false,
        }
    }

    pub(in crate::app) fn show(&mut self, ctx: &Context) {
        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("cluster-graph");
                    ui.separator();
                    ui.label(format!(
                        "clusters: {}/{}",
                        self.selection.active_ids().count(),
                        self.selection.entries().len()
                    ));
                    ui.label(format!(
                        "nodes: {}/{}",
                        self.scene.nodes().len(),
                        self.store.node_count()
                    ));
                    ui.label(format!(
                        "links: {}/{}",
                        self.scene.links().len(),
                        self.store.link_count()
                    ));
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if ui.button("Help").clicked() {
                            self.help_open = true;
                        }
                        let reset = ui.add_enabled(
                            !self.viewport.is_animating(),
                            egui::Button::new("Reset view"),
                        );
                        if reset.clicked() {
                            let now = ui.input(|input| input.time);
                            self.viewport.reset_view(now);
                            ui.ctx().request_repaint();
                        }
                    });
                });
            });

        egui::SidePanel::left("controls")
            .resizable(true)
            .default_width(240.0)
            .show(ctx, |ui| self.draw_controls(ui));

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| self.draw_graph(ui));

        if self.help_open {
            self.draw_help(ctx);
        }
    }

    fn draw_help(&mut self, ctx: &Context) {
        let modal = egui::Modal::new(Id::new("help_modal")).show(ctx, |ui| {
            ui.set_max_width(420.0);
            ui.heading("How to use the graph");
            ui.add_space(6.0);
            egui::Grid::new("help_grid")
                .num_columns(2)
                .spacing([12.0, 6.0])
                .show(ui, |ui| {
                    for (gesture, effect) in HELP_TEXT {
                        ui.strong(*gesture);
                        ui.label(*effect);
                        ui.end_row();
                    }
                });
            ui.add_space(10.0);
            ui.vertical_centered(|ui| ui.button("Close").clicked()).inner
        });

        if modal.inner || modal.should_close() {
            self.help_open = false;
        }
    }
}
