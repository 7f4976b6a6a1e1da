mod app;
mod dataset;
mod util;

use std::path::PathBuf;

use clap::Parser;

use app::LayoutConfig;

/// Force-directed viewer for clustered word graphs.
#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Dataset to load (JSON, or a `const graphData = ...;` script). Defaults to
    /// the bundled sample.
    dataset: Option<PathBuf>,

    /// Resting length of every link.
    #[arg(long, default_value_t = 100.0)]
    link_distance: f32,

    /// Link spring strength, before the per-endpoint degree bias.
    #[arg(long, default_value_t = 0.7)]
    link_strength: f32,

    /// Many-body strength; negative values repel.
    #[arg(long, default_value_t = -300.0, allow_negative_numbers = true)]
    charge: f32,
}

impl Args {
    fn layout_config(&self) -> LayoutConfig {
        LayoutConfig {
            link_distance: self.link_distance,
            link_strength: self.link_strength,
            charge_strength: self.charge,
            ..LayoutConfig::default()
        }
    }
}

fn main() -> eframe::Result<()> {
    env_logger::init();

    let args = Args::parse();
    let layout_config = args.layout_config();
    log::info!("starting with {layout_config:?}");

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1280.0, 820.0]),
        ..Default::default()
    };

    eframe::run_native(
        "cluster-graph",
        options,
        Box::new(move |cc| {
            Ok(Box::new(app::ClusterGraphApp::new(
                cc,
                args.dataset.clone(),
                layout_config,
            )))
        }),
    )
}
