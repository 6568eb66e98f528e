mod app;
mod ui;

use app::CordExplorerApp;
use clap::Parser;
use cord_explorer::config::DashboardConfig;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();
    let config = DashboardConfig::parse();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([700.0, 450.0]),
        ..Default::default()
    };

    eframe::run_native(
        "CORD-19 Data Explorer",
        options,
        Box::new(move |_cc| Ok(Box::new(CordExplorerApp::new(&config.table)))),
    )
}
