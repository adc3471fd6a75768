use std::time::Instant;

use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::projection::{ChartMode, Projection, ViewMode};
use crate::export::suggested_file_name;
use crate::format::year_label_with_status;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Nepal GVA Visualizer");
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            year_selector(ui, state);
            ui.separator();
            chart_type_selector(ui, state);
            ui.separator();
            category_selector(ui, state);
            ui.separator();
            playback_button(ui, state);
        });
}

fn year_selector(ui: &mut Ui, state: &mut AppState) {
    egui::CollapsingHeader::new(RichText::new("Select Year").strong())
        .default_open(true)
        .show(ui, |ui: &mut Ui| {
            let years = state.snapshot.years().to_vec();
            let (Some(first), Some(last)) = (years.first(), years.last()) else {
                ui.label("No years available for selection.");
                return;
            };

            ui.vertical_centered(|ui: &mut Ui| {
                ui.strong(year_label_with_status(&state.snapshot, &state.selection.year));
            });

            let mut index = state.year_index();
            let slider = egui::Slider::new(&mut index, 0..=years.len() - 1).show_value(false);
            if ui.add(slider).changed() {
                state.set_year_index(index);
            }

            ui.horizontal(|ui: &mut Ui| {
                ui.small(year_label_with_status(&state.snapshot, first));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui: &mut Ui| {
                    ui.small(year_label_with_status(&state.snapshot, last));
                });
            });
        });
}

fn chart_type_selector(ui: &mut Ui, state: &mut AppState) {
    ui.strong("Chart type");
    ui.horizontal(|ui: &mut Ui| {
        let current = state.selection.chart_mode;
        if ui.selectable_label(current == ChartMode::Bar, "Bar").clicked() {
            state.set_chart_mode(ChartMode::Bar);
        }
        if ui.selectable_label(current == ChartMode::Line, "Line").clicked() {
            state.set_chart_mode(ChartMode::Line);
        }
    });
}

fn category_selector(ui: &mut Ui, state: &mut AppState) {
    let names = state.snapshot.category_names().to_vec();
    let n_selected = state.selection.categories.len();
    let header_text = format!("Industrial Divisions  ({n_selected}/{})", names.len());

    // Swatches follow the colours of the chart currently on screen.
    let swatches: Vec<(String, Color32)> = match state.projection() {
        Projection::SingleYearChart(c) => c
            .bars
            .iter()
            .map(|b| (b.full_name.clone(), c.colors.color_for(&b.color_key)))
            .collect(),
        Projection::MultiYearChart(c) => c
            .series
            .iter()
            .map(|s| (s.full_name.clone(), c.colors.color_for(&s.key)))
            .collect(),
        Projection::Table(_) => Vec::new(),
    };

    egui::CollapsingHeader::new(RichText::new(header_text).strong())
        .default_open(true)
        .show(ui, |ui: &mut Ui| {
            let toggle_label = if state.all_selected() {
                "Deselect All"
            } else {
                "Select All"
            };
            if ui.small_button(toggle_label).clicked() {
                state.toggle_all();
            }

            ScrollArea::vertical()
                .id_salt("category_list")
                .max_height(280.0)
                .show(ui, |ui: &mut Ui| {
                    for name in &names {
                        let mut checked = state.selection.is_selected(name);
                        let mut text = RichText::new(name);
                        if let Some((_, c)) = swatches.iter().find(|(n, _)| n == name) {
                            text = text.color(*c);
                        }
                        if ui.checkbox(&mut checked, text).changed() {
                            state.toggle_category(name);
                        }
                    }
                });
        });
}

fn playback_button(ui: &mut Ui, state: &mut AppState) {
    let label = if state.animator.is_playing() {
        "⏸ Pause"
    } else {
        "▶ Play Animation"
    };
    if ui
        .add_sized([ui.available_width(), 24.0], egui::Button::new(label))
        .clicked()
    {
        state.toggle_playback(Instant::now());
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.heading("Dashboard");
        ui.separator();

        let view = state.selection.view_mode;
        if ui.selectable_label(view == ViewMode::Chart, "Chart").clicked() {
            state.set_view_mode(ViewMode::Chart);
        }
        if ui.selectable_label(view == ViewMode::Table, "Table").clicked() {
            state.set_view_mode(ViewMode::Table);
        }
        if ui.button("Export CSV").clicked() {
            save_csv_dialog(state);
        }

        ui.separator();
        ui.label(format!(
            "{} of {} divisions shown",
            state.records().len(),
            state.snapshot.len()
        ));

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn save_csv_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export GVA data")
        .set_file_name(suggested_file_name(&state.active_years()))
        .add_filter("CSV", &["csv"])
        .save_file();

    if let Some(path) = file {
        state.export_csv(&path);
    }
}
