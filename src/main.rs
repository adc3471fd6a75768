use std::sync::Arc;

use anyhow::Context;
use eframe::egui;

use gva_dashboard::app::GvaDashboardApp;
use gva_dashboard::config::InsightConfig;
use gva_dashboard::data::model::DatasetSnapshot;
use gva_dashboard::data::source::gva_table;
use gva_dashboard::insight::service_from_config;
use gva_dashboard::state::AppState;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let snapshot = DatasetSnapshot::from_raw(&gva_table()).context("normalising embedded GVA table")?;
    log::info!(
        "Loaded {} industrial divisions over {} years",
        snapshot.len(),
        snapshot.years().len()
    );

    let service = service_from_config(&InsightConfig::from_env());
    let state = AppState::new(Arc::new(snapshot), service);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Nepal GVA Visualizer",
        options,
        Box::new(move |_cc| Ok(Box::new(GvaDashboardApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}
