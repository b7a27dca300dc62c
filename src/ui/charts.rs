use std::collections::{BTreeMap, BTreeSet};
use std::f32::consts::{FRAC_PI_2, TAU};

use eframe::egui::{self, Color32, Painter, Pos2, Sense, Shape, Stroke, Ui, Vec2};
use egui_plot::{Bar, BarChart, Legend, Plot};

use crate::color::ColorMap;
use crate::data::model::Polarity;
use crate::state::AppState;

const POLARITIES: [Polarity; 2] = [Polarity::Income, Polarity::Expense];

// ---------------------------------------------------------------------------
// Dashboard (central panel)
// ---------------------------------------------------------------------------

/// Render every chart for the visible transactions.
pub fn dashboard(ui: &mut Ui, state: &AppState) {
    if state.dataset.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a transaction export to begin  (File → Open…, or drop a .csv)");
        });
        return;
    }

    let summary = &state.summary;

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            stacked_bars(
                ui,
                "Income and Expenses by Type",
                &summary.by_type,
                &state.type_colors,
            );
            ui.separator();
            stacked_bars(
                ui,
                "Income and Expenses by Company",
                &summary.by_company,
                &state.company_colors,
            );
            ui.separator();

            ui.columns(4, |cols: &mut [Ui]| {
                pie_chart(
                    &mut cols[0],
                    "Expenses by Company",
                    &summary.expense_by_company,
                    &state.company_colors,
                );
                pie_chart(
                    &mut cols[1],
                    "Expenses by Type",
                    &summary.expense_by_type,
                    &state.type_colors,
                );
                pie_chart(
                    &mut cols[2],
                    "Income by Company",
                    &summary.income_by_company,
                    &state.company_colors,
                );
                pie_chart(
                    &mut cols[3],
                    "Income by Type",
                    &summary.income_by_type,
                    &state.type_colors,
                );
            });
        });
}

// ---------------------------------------------------------------------------
// Stacked bars: x = 0 for income, x = 1 for expense, one layer per label
// ---------------------------------------------------------------------------

fn stacked_bars(
    ui: &mut Ui,
    title: &str,
    sums: &BTreeMap<(Polarity, String), f64>,
    colors: &ColorMap,
) {
    ui.strong(title);

    let labels: BTreeSet<&str> = sums.keys().map(|(_, label)| label.as_str()).collect();

    let mut charts: Vec<BarChart> = Vec::with_capacity(labels.len());
    for label in labels {
        let bars: Vec<Bar> = POLARITIES
            .iter()
            .enumerate()
            .map(|(x, &polarity)| {
                let height = sums
                    .get(&(polarity, label.to_string()))
                    .copied()
                    .unwrap_or(0.0);
                Bar::new(x as f64, height).name(format!("{polarity}: {label}"))
            })
            .collect();

        let below: Vec<&BarChart> = charts.iter().collect();
        let chart = BarChart::new(bars)
            .name(label)
            .color(colors.color_for(label))
            .width(0.6)
            .stack_on(&below);
        charts.push(chart);
    }

    Plot::new(title)
        .legend(Legend::default())
        .height(280.0)
        .x_axis_label("Income (left)  ·  Expense (right)")
        .y_axis_label("Amount")
        .include_y(0.0)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            for chart in charts {
                plot_ui.bar_chart(chart);
            }
        });
}

// ---------------------------------------------------------------------------
// Pie charts
// ---------------------------------------------------------------------------

fn pie_chart(ui: &mut Ui, title: &str, sums: &BTreeMap<String, f64>, colors: &ColorMap) {
    ui.strong(title);

    let total: f64 = sums.values().sum();
    if total <= 0.0 {
        ui.label("No data");
        return;
    }

    let diameter = ui.available_width().clamp(60.0, 200.0);
    let (response, painter) = ui.allocate_painter(Vec2::splat(diameter), Sense::hover());
    let center = response.rect.center();
    let radius = diameter / 2.0 - 2.0;

    // Start at twelve o'clock, clockwise.
    let mut start = -FRAC_PI_2;
    for (label, value) in sums {
        let sweep = (*value / total) as f32 * TAU;
        draw_slice(&painter, center, radius, start, sweep, colors.color_for(label));
        start += sweep;
    }

    for (label, value) in sums {
        ui.horizontal(|ui: &mut Ui| {
            ui.colored_label(colors.color_for(label), "■");
            ui.label(format!("{label}: {value:.0} ({:.1}%)", value / total * 100.0));
        });
    }
}

/// Fill a circular sector as a fan of thin triangles, which stays convex
/// for any sweep.
fn draw_slice(painter: &Painter, center: Pos2, radius: f32, start: f32, sweep: f32, color: Color32) {
    if sweep <= 0.0 {
        return;
    }
    let steps = (sweep / 0.05).ceil().max(1.0) as usize;
    let point = |i: usize| center + radius * Vec2::angled(start + sweep * i as f32 / steps as f32);
    for i in 0..steps {
        painter.add(Shape::convex_polygon(
            vec![center, point(i), point(i + 1)],
            color,
            Stroke::NONE,
        ));
    }
}
