use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, Legend, Line, MarkerShape, Plot, PlotPoints, Points};

use crate::color::CountryColors;
use crate::data::aggregate::{CountryCount, YearCount};
use crate::data::model::Schema;
use crate::data::sites::TestSite;

const CHART_HEIGHT: f32 = 360.0;

// ---------------------------------------------------------------------------
// Tests per year (line chart)
// ---------------------------------------------------------------------------

pub fn timeline_plot(ui: &mut Ui, per_year: &[YearCount], country: &str, color: Color32) {
    if per_year.is_empty() {
        ui.label("No dated tests in this range.");
        return;
    }

    let points: Vec<[f64; 2]> = per_year
        .iter()
        .map(|yc| [yc.year as f64, yc.count as f64])
        .collect();
    let name = format!("Nuclear Tests Over Time ({country})");

    Plot::new("timeline_plot")
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .x_axis_label("Year")
        .y_axis_label("Number of Tests")
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(PlotPoints::from(points.clone()))
                    .name(&name)
                    .color(color)
                    .width(2.0),
            );
            plot_ui.points(
                Points::new(PlotPoints::from(points))
                    .name(&name)
                    .shape(MarkerShape::Circle)
                    .filled(true)
                    .radius(3.5)
                    .color(color),
            );
        });
}

// ---------------------------------------------------------------------------
// Test sites (longitude / latitude scatter)
// ---------------------------------------------------------------------------

/// One marker per site; hovering a marker shows its popup text.
pub fn site_map(ui: &mut Ui, sites: &[TestSite], schema: &Schema, color: Color32) {
    Plot::new("site_map")
        .data_aspect(1.0)
        .x_axis_label("Longitude")
        .y_axis_label("Latitude")
        .label_formatter(|name, value| {
            if name.is_empty() {
                format!("{:.3}, {:.3}", value.y, value.x)
            } else {
                format!("{name}\n{:.3}, {:.3}", value.y, value.x)
            }
        })
        .show(ui, |plot_ui| {
            for site in sites {
                plot_ui.points(
                    Points::new(PlotPoints::new(vec![[site.longitude, site.latitude]]))
                        .name(site.popup(schema))
                        .shape(MarkerShape::Circle)
                        .filled(true)
                        .radius(5.0)
                        .color(color),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Tests per country (bar chart)
// ---------------------------------------------------------------------------

pub fn purpose_bar_chart(ui: &mut Ui, summary: &[CountryCount], colors: &CountryColors) {
    let bars: Vec<Bar> = summary
        .iter()
        .enumerate()
        .map(|(i, cc)| {
            Bar::new(i as f64, cc.count as f64)
                .name(&cc.country)
                .fill(colors.color_for(&cc.country))
                .width(0.7)
        })
        .collect();

    Plot::new("purpose_bar_chart")
        .height(CHART_HEIGHT)
        .x_axis_label("WEAPON SOURCE COUNTRY")
        .y_axis_label("Count")
        .allow_scroll(false)
        .show_grid([false, true])
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name("Tests"));
        });
}
