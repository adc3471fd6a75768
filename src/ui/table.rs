use eframe::egui::{self, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::model::DatasetSnapshot;
use crate::data::projection::TableProjection;
use crate::export::CATEGORY_HEADER;
use crate::format::year_label_with_status;

/// Categories down, years across; gaps show as "-".
pub fn gva_table(ui: &mut Ui, snapshot: &DatasetSnapshot, table: &TableProjection) {
    let text_height = egui::TextStyle::Body.resolve(ui.style()).size;

    egui::ScrollArea::horizontal().show(ui, |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .cell_layout(egui::Layout::right_to_left(egui::Align::Center))
            .column(Column::initial(280.0).at_least(160.0).clip(true))
            .columns(Column::auto().at_least(90.0), table.years.len())
            .header(24.0, |mut header| {
                header.col(|ui| {
                    ui.with_layout(egui::Layout::left_to_right(egui::Align::Center), |ui| {
                        ui.label(RichText::new(CATEGORY_HEADER).strong());
                    });
                });
                for year in &table.years {
                    header.col(|ui| {
                        ui.label(RichText::new(year_label_with_status(snapshot, year)).strong());
                    });
                }
            })
            .body(|body| {
                body.rows(text_height + 8.0, table.rows.len(), |mut row| {
                    let Some(data) = table.rows.get(row.index()) else {
                        return;
                    };
                    row.col(|ui| {
                        ui.with_layout(egui::Layout::left_to_right(egui::Align::Center), |ui| {
                            ui.label(&data.category).on_hover_text(&data.code);
                        });
                    });
                    for cell in &data.cells {
                        row.col(|ui| {
                            ui.label(RichText::new(cell.to_string()).monospace());
                        });
                    }
                });
            });
    });
}
