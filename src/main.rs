mod aggregate;
mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use anyhow::{anyhow, Result};
use app::KarirDashboardApp;
use clap::Parser;
use eframe::egui;

use config::Args;
use state::AppState;

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    // A dataset that cannot be loaded at startup ends the session.
    let mut state = AppState::default();
    if let Err(e) = state.open(&args.data) {
        log::error!("Failed to load {}: {e:#}", args.data.display());
        return Err(e);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 820.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Karir.com Data Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(KarirDashboardApp::new(state)))),
    )
    .map_err(|e| anyhow!("{e}"))
}
