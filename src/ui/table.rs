use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use crate::data::aggregate::CountryCount;
use crate::data::model::Table;

const ROW_HEIGHT: f32 = 18.0;

/// The purpose summary: one row per country, as sorted.
pub fn country_counts(ui: &mut Ui, summary: &[CountryCount]) {
    ui.push_id("country_counts", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .column(Column::auto().at_least(200.0))
            .column(Column::remainder())
            .header(20.0, |mut header| {
                header.col(|ui| {
                    ui.strong("WEAPON SOURCE COUNTRY");
                });
                header.col(|ui| {
                    ui.strong("Count");
                });
            })
            .body(|body| {
                body.rows(ROW_HEIGHT, summary.len(), |mut row| {
                    let cc = &summary[row.index()];
                    row.col(|ui| {
                        ui.label(cc.country.as_str());
                    });
                    row.col(|ui| {
                        ui.label(cc.count.to_string());
                    });
                });
            });
    });
}

/// Every column of the matching records, source order.
pub fn records(ui: &mut Ui, table: &Table) {
    let columns = &table.schema().columns;

    ui.push_id("records", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .max_scroll_height(300.0)
            .columns(Column::auto().at_least(60.0).resizable(true), columns.len())
            .header(20.0, |mut header| {
                for name in columns {
                    header.col(|ui| {
                        ui.strong(name.as_str());
                    });
                }
            })
            .body(|body| {
                body.rows(ROW_HEIGHT, table.len(), |mut row| {
                    let record = &table.records()[row.index()];
                    for name in columns {
                        row.col(|ui| {
                            ui.label(record.field(name).to_string());
                        });
                    }
                });
            });
    });
}
