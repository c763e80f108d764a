mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use anyhow::{anyhow, Context, Result};
use app::ExplorerApp;
use config::Config;
use eframe::egui;

fn main() -> Result<()> {
    env_logger::init();

    let config = Config::from_env().context("loading configuration")?;
    log::info!("Starting with dataset {}", config.dataset_path.display());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Nuclear Tests Analysis",
        options,
        Box::new(|_cc| Ok(Box::new(ExplorerApp::new(config)))),
    )
    .map_err(|e| anyhow!("running the UI: {e}"))
}
