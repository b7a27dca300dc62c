use eframe::egui;

use crate::state::AppState;
use crate::ui::{charts, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct LedgerPandaApp {
    pub state: AppState,
}

impl LedgerPandaApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    /// Load files dropped onto the window. Web builds only get bytes, native
    /// builds usually only get a path.
    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        for file in dropped {
            if let Some(bytes) = &file.bytes {
                self.state.load_upload(&file.name, bytes);
            } else if let Some(path) = &file.path {
                self.state.load_path(path);
            }
        }
    }
}

impl eframe::App for LedgerPandaApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_dropped_files(ctx);

        // ---- Top panel: menu bar and quick ranges ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            charts::dashboard(ui, &self.state);
        });
    }
}
