use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::filter::DayPreset;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let dataset = match &state.dataset {
        Some(ds) => ds,
        None => {
            ui.label("No transactions loaded.");
            return;
        }
    };

    // Clone what we need so we can mutate state inside the loop.
    let bounds = dataset.day_range();
    let companies: Vec<String> = dataset.companies().iter().cloned().collect();
    let types: Vec<String> = dataset.types().iter().cloned().collect();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Day range ----
            if let Some((min, max)) = bounds {
                ui.strong("Days");
                let (mut from, mut to) = state.filter.days;
                let from_changed = ui
                    .add(egui::Slider::new(&mut from, min..=max).text("from"))
                    .changed();
                let to_changed = ui
                    .add(egui::Slider::new(&mut to, min..=max).text("to"))
                    .changed();
                if from_changed || to_changed {
                    state.set_day_range(from, to);
                }
                ui.separator();
            }

            // ---- Companies ----
            let header = format!(
                "Companies  ({}/{})",
                state.filter.companies.len(),
                companies.len()
            );
            egui::CollapsingHeader::new(RichText::new(header).strong())
                .id_salt("companies")
                .default_open(true)
                .show(ui, |ui: &mut Ui| {
                    ui.horizontal(|ui: &mut Ui| {
                        if ui.small_button("All").clicked() {
                            state.select_all_companies();
                        }
                        if ui.small_button("None").clicked() {
                            state.select_no_companies();
                        }
                    });
                    for company in &companies {
                        let mut checked = state.filter.companies.contains(company);
                        let text =
                            RichText::new(company).color(state.company_colors.color_for(company));
                        if ui.checkbox(&mut checked, text).changed() {
                            state.toggle_company(company);
                        }
                    }
                });

            // ---- Types ----
            let header = format!("Types  ({}/{})", state.filter.types.len(), types.len());
            egui::CollapsingHeader::new(RichText::new(header).strong())
                .id_salt("types")
                .default_open(true)
                .show(ui, |ui: &mut Ui| {
                    ui.horizontal(|ui: &mut Ui| {
                        if ui.small_button("All").clicked() {
                            state.select_all_types();
                        }
                        if ui.small_button("None").clicked() {
                            state.select_no_types();
                        }
                    });
                    for kind in &types {
                        let mut checked = state.filter.types.contains(kind);
                        let text = RichText::new(kind).color(state.type_colors.color_for(kind));
                        if ui.checkbox(&mut checked, text).changed() {
                            state.toggle_type(kind);
                        }
                    }
                });
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        let has_data = state.dataset.is_some();
        for preset in DayPreset::ALL {
            if ui
                .add_enabled(has_data, egui::Button::new(preset.label()))
                .clicked()
            {
                state.apply_preset(preset);
            }
        }

        ui.separator();

        if let Some(ds) = &state.dataset {
            let (income, expense) = state.summary.totals();
            ui.label(format!(
                "{} transactions, {} visible  ·  income {income:.0}  ·  expenses {expense:.0}",
                ds.len(),
                state.visible_indices.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open transaction export")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        state.load_path(&path);
    }
}
