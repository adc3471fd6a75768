use eframe::egui::{self, Color32, RichText, Ui};

use crate::state::AppState;

/// Text-generation summary card below the chart.
pub fn insights_section(ui: &mut Ui, state: &mut AppState) {
    ui.group(|ui: &mut Ui| {
        ui.horizontal(|ui: &mut Ui| {
            ui.heading("AI-Driven Insights");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui: &mut Ui| {
                let loading = state.insights.is_loading();
                let label = if loading { "Generating..." } else { "Generate Insights" };
                if ui.add_enabled(!loading, egui::Button::new(label)).clicked() {
                    // Refusals are reported through the status line.
                    let _ = state.request_insights();
                }
            });
        });
        ui.separator();

        if state.insights.is_loading() {
            ui.horizontal(|ui: &mut Ui| {
                ui.spinner();
                ui.label("Generating insights, please wait...");
            });
            return;
        }

        let Some(summary) = state.insights.summary() else {
            ui.weak(
                "Select divisions and a year, then press \"Generate Insights\" \
                 for a written analysis of the data on screen.",
            );
            return;
        };

        let years = state.insights.summary_years();
        if !years.is_empty() {
            ui.label(RichText::new(format!("Summary for {}", years.join(", "))).strong());
            ui.add_space(4.0);
        }
        for paragraph in summary.split("\n\n").map(str::trim).filter(|p| !p.is_empty()) {
            ui.label(paragraph);
            ui.add_space(4.0);
        }
        if let Some(err) = state.insights.last_error() {
            ui.label(RichText::new(err).small().color(Color32::GRAY));
        }
    });
}
