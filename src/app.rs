use std::time::{Duration, Instant};

use eframe::egui;

use crate::state::AppState;
use crate::ui::{insights, panels, plot};

/// Repaint cadence while an insight request is outstanding.
const LOADING_REPAINT: Duration = Duration::from_millis(100);

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct GvaDashboardApp {
    pub state: AppState,
}

impl GvaDashboardApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for GvaDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Background work: playback timer and insight job ----
        let now = Instant::now();
        self.state.tick(now);
        self.state.poll_insights();

        // ---- Top panel: view toggles and export ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: chart/table and insights ----
        egui::CentralPanel::default().show(ctx, |ui| {
            let plot_height = (ui.available_height() * 0.62).max(240.0);
            ui.allocate_ui(egui::vec2(ui.available_width(), plot_height), |ui| {
                plot::data_view(ui, &self.state);
            });
            ui.add_space(8.0);
            egui::ScrollArea::vertical()
                .id_salt("insights_scroll")
                .show(ui, |ui| {
                    insights::insights_section(ui, &mut self.state);
                });
        });

        // ---- Wake-ups ----
        if let Some(wait) = self.state.next_wakeup(Instant::now()) {
            ctx.request_repaint_after(wait);
        }
        if self.state.insights.is_loading() {
            ctx.request_repaint_after(LOADING_REPAINT);
        }
    }
}
