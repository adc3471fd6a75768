use std::ops::RangeInclusive;

use eframe::egui::Ui;
use egui_plot::{Bar, BarChart, GridMark, Legend, Line, Plot, PlotPoints, Points};

use crate::data::projection::{MultiYearChart, Projection, SingleYearChart};
use crate::format::{display_year, format_axis_value};
use crate::state::AppState;

use super::table::gva_table;

// ---------------------------------------------------------------------------
// Central panel: chart or table
// ---------------------------------------------------------------------------

/// Render the visualisation card in the central panel.
pub fn data_view(ui: &mut Ui, state: &AppState) {
    ui.heading("Data Visualization");
    ui.add_space(4.0);

    if state.selection.categories.is_empty() {
        empty_notice(
            ui,
            "No Data Selected",
            "Please select industrial divisions from the sidebar to view data.",
        );
        return;
    }
    if state.projection().is_empty() {
        empty_notice(
            ui,
            "No Data for Current Filters",
            &format!(
                "There is no data available for the current combination of filters ({}).",
                display_year(&state.selection.year)
            ),
        );
        return;
    }

    match state.projection() {
        Projection::SingleYearChart(chart) => single_year_bars(ui, chart),
        Projection::MultiYearChart(chart) => time_series(ui, chart),
        Projection::Table(table) => gva_table(ui, &state.snapshot, table),
    }
}

fn empty_notice(ui: &mut Ui, title: &str, detail: &str) {
    ui.group(|ui: &mut Ui| {
        ui.strong(title);
        ui.label(detail);
    });
}

fn y_axis_label(mark: GridMark, _range: &RangeInclusive<f64>) -> String {
    format_axis_value(mark.value)
}

/// Label for integer grid positions, empty between them.
fn index_label(labels: &[String], value: f64) -> String {
    let rounded = value.round();
    if (value - rounded).abs() > 1e-6 || rounded < 0.0 {
        return String::new();
    }
    labels.get(rounded as usize).cloned().unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Single-year bar chart
// ---------------------------------------------------------------------------

fn single_year_bars(ui: &mut Ui, chart: &SingleYearChart) {
    let labels: Vec<String> = chart.bars.iter().map(|b| b.display_label.clone()).collect();

    Plot::new("gva_single_year")
        .legend(Legend::default())
        .x_axis_label(format!("Industrial division ({})", display_year(&chart.year)))
        .y_axis_label("GVA")
        .x_axis_formatter(move |mark, _range| index_label(&labels, mark.value))
        .y_axis_formatter(y_axis_label)
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for (i, entry) in chart.bars.iter().enumerate() {
                // Gaps draw nothing but keep their slot and legend entry.
                let bars: Vec<Bar> = entry
                    .value
                    .map(|v| Bar::new(i as f64, v).width(0.7).name(&entry.full_name))
                    .into_iter()
                    .collect();
                let color = chart.colors.color_for(&entry.color_key);
                plot_ui.bar_chart(BarChart::new(bars).name(&entry.full_name).color(color));
            }
        });
}

// ---------------------------------------------------------------------------
// Multi-year time series
// ---------------------------------------------------------------------------

/// Split a series into runs of consecutive values, breaking at gaps.
fn segments(values: &[Option<f64>]) -> Vec<Vec<[f64; 2]>> {
    let mut out: Vec<Vec<[f64; 2]>> = Vec::new();
    let mut current = Vec::new();
    for (i, v) in values.iter().enumerate() {
        match v {
            Some(v) => current.push([i as f64, *v]),
            None if !current.is_empty() => out.push(std::mem::take(&mut current)),
            None => {}
        }
    }
    if !current.is_empty() {
        out.push(current);
    }
    out
}

fn time_series(ui: &mut Ui, chart: &MultiYearChart) {
    let labels: Vec<String> = chart.points.iter().map(|p| display_year(&p.year)).collect();

    Plot::new("gva_time_series")
        .legend(Legend::default())
        .x_axis_label("Fiscal year")
        .y_axis_label("GVA")
        .x_axis_formatter(move |mark, _range| index_label(&labels, mark.value))
        .y_axis_formatter(y_axis_label)
        .show(ui, |plot_ui| {
            for series in &chart.series {
                let color = chart.colors.color_for(&series.key);
                let values = chart.series_values(&series.key);
                for run in segments(&values) {
                    if run.len() == 1 {
                        plot_ui.points(
                            Points::new(PlotPoints::new(run))
                                .name(&series.full_name)
                                .color(color)
                                .radius(3.0),
                        );
                    } else {
                        plot_ui.line(
                            Line::new(PlotPoints::new(run))
                                .name(&series.full_name)
                                .color(color)
                                .width(2.0),
                        );
                    }
                }
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segments_break_at_gaps() {
        let runs = segments(&[Some(1.0), Some(2.0), None, Some(4.0), None, None]);
        assert_eq!(runs, vec![vec![[0.0, 1.0], [1.0, 2.0]], vec![[3.0, 4.0]]]);
        assert!(segments(&[None, None]).is_empty());
    }

    #[test]
    fn index_labels_only_on_integers() {
        let labels = vec!["2020-21".to_string(), "2021-22".to_string()];
        assert_eq!(index_label(&labels, 1.0), "2021-22");
        assert_eq!(index_label(&labels, 0.5), "");
        assert_eq!(index_label(&labels, -1.0), "");
        assert_eq!(index_label(&labels, 7.0), "");
    }
}
