use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver};
use std::thread;

use eframe::egui::{self, Context};
use log::error;

use crate::dataset::{GraphStore, load_dataset};

mod filter;
mod graph;
mod highlight;
mod interaction;
mod physics;
mod render_utils;
mod scene;
mod ui;
mod viewport;

pub(crate) use physics::LayoutConfig;

use filter::{ActiveSubgraph, ClusterSelection};
use interaction::InteractionController;
use physics::LayoutEngine;
use scene::Scene;
use viewport::Viewport;

pub struct ClusterGraphApp {
    dataset_path: Option<PathBuf>,
    layout_config: LayoutConfig,
    state: AppState,
}

enum AppState {
    Loading {
        rx: Receiver<Result<GraphStore, String>>,
    },
    Ready(Box<ViewModel>),
    Error(String),
}

struct ViewModel {
    store: GraphStore,
    selection: ClusterSelection,
    subgraph: ActiveSubgraph,
    scene: Scene,
    layout: Option<LayoutEngine>,
    layout_config: LayoutConfig,
    interaction: InteractionController,
    viewport: Viewport,
    search: String,
    help_open: bool,
    filter_dirty: bool,
    pan_active: bool,
}

impl ClusterGraphApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        dataset_path: Option<PathBuf>,
        layout_config: LayoutConfig,
    ) -> Self {
        let state = Self::start_load(dataset_path.clone());
        Self {
            dataset_path,
            layout_config,
            state,
        }
    }

    fn spawn_load(dataset_path: Option<PathBuf>) -> Receiver<Result<GraphStore, String>> {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let result = load_dataset(dataset_path.as_deref()).map_err(|error| {
                error!("{error:#}");
                format!("{error:#}")
            });
            let _ = tx.send(result);
        });

        rx
    }

    fn start_load(dataset_path: Option<PathBuf>) -> AppState {
        AppState::Loading {
            rx: Self::spawn_load(dataset_path),
        }
    }
}

impl eframe::App for ClusterGraphApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut transition = None;

        match &mut self.state {
            AppState::Loading { rx } => {
                match rx.try_recv() {
                    Ok(result) => {
                        transition = Some(match result {
                            Ok(store) => AppState::Ready(Box::new(ViewModel::new(
                                store,
                                self.layout_config,
                            ))),
                            Err(error) => AppState::Error(error),
                        });
                    }
                    Err(mpsc::TryRecvError::Empty) => ctx.request_repaint(),
                    Err(mpsc::TryRecvError::Disconnected) => {
                        transition =
                            Some(AppState::Error("Background load worker disconnected".to_owned()));
                    }
                }

                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading("Loading word graph...");
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                });
            }
            AppState::Error(error) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Failed to load the word graph");
                    ui.add_space(6.0);
                    ui.label(error.as_str());
                    ui.add_space(10.0);
                    if ui.button("Retry").clicked() {
                        transition = Some(Self::start_load(self.dataset_path.clone()));
                    }
                });
            }
            AppState::Ready(model) => model.show(ctx),
        }

        if let Some(next_state) = transition {
            self.state = next_state;
        }
    }
}
