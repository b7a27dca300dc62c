mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use anyhow::Result;
use app::LedgerPandaApp;
use clap::Parser;
use config::Cli;
use eframe::egui;
use state::AppState;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let mut state = AppState::new(cli.load_options()?);
    if let Some(path) = &cli.csv {
        state.load_path(path);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Ledger Panda – Financial Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(LedgerPandaApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("running dashboard: {e}"))
}
