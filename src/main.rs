mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use std::path::Path;
use std::process::ExitCode;

use app::DashboardApp;
use config::{DashboardConfig, CONFIG_FILE};
use data::labels::ChartLabels;
use eframe::egui;
use state::AppState;

fn main() -> ExitCode {
    env_logger::init();

    let config = match DashboardConfig::load_or_default(Path::new(CONFIG_FILE)) {
        Ok(config) => config,
        Err(e) => {
            log::error!("Invalid configuration: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    // The dataset is read once; nothing is shown if that fails.
    let table = match data::loader::load_file(&config.dataset_path) {
        Ok(table) => table,
        Err(e) => {
            log::error!("Failed to load {}: {e}", config.dataset_path.display());
            return ExitCode::FAILURE;
        }
    };

    if table.is_empty() {
        log::warn!("{} contains no records", config.dataset_path.display());
    }

    let state = AppState::new(table, ChartLabels::default());
    let chart_height = config.chart_height;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    let result = eframe::run_native(
        "Bike Sharing Analysis Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(DashboardApp::new(state, chart_height)))),
    );

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("Window error: {e}");
            ExitCode::FAILURE
        }
    }
}
