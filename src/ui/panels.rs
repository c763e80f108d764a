use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::DatePickerButton;

use crate::data::aggregate::date_bounds;
use crate::data::model::OptionalField;
use crate::state::{AppState, Page};
use crate::ui::{plot, table};

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

        ui.label(format!(
            "{}: {} tests",
            state.source().display(),
            state.table.len()
        ));

        if let Some(msg) = &state.load_error {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Left side panel – page navigation
// ---------------------------------------------------------------------------

pub fn navigation(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Navigation");
    ui.separator();
    ui.label("Go to:");
    for page in Page::ALL {
        ui.radio_value(&mut state.page, page, page.title());
    }
}

// ---------------------------------------------------------------------------
// Pages
// ---------------------------------------------------------------------------

pub fn not_loaded(ui: &mut Ui, state: &AppState) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.add_space(40.0);
        ui.heading("The dataset could not be loaded. Please check the file and try again.");
        if let Some(msg) = &state.load_error {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
        ui.label("Use File → Open… to pick another file.");
    });
}

pub fn introduction(ui: &mut Ui, state: &AppState) {
    ui.heading("Nuclear Explosions Data Explorer");
    ui.label(
        "This application allows you to explore data on nuclear explosions from 1945 to 1998. \
         You can analyze the number of tests conducted by different countries, their locations, \
         and the purpose of the tests.",
    );
    ui.separator();

    ui.strong("Dataset");
    egui::Grid::new("dataset_summary")
        .num_columns(2)
        .striped(true)
        .show(ui, |ui: &mut Ui| {
            ui.label("Tests");
            ui.label(state.table.len().to_string());
            ui.end_row();

            ui.label("Countries");
            ui.label(state.countries.join(", "));
            ui.end_row();

            if let Some((first, last)) = date_bounds(&state.table) {
                ui.label("Date span");
                ui.label(format!("{first} to {last}"));
                ui.end_row();
            }

            ui.label("Columns");
            ui.label(state.table.schema().columns.len().to_string());
            ui.end_row();
        });
}

/// Query 1: tests per year for one country over a date range.
pub fn tests_over_time(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Total Number of Nuclear Tests Over Time");

    let countries = state.countries.clone();
    ui.horizontal(|ui: &mut Ui| {
        ui.label("Select a Country");
        if let Some(country) = country_selector(
            ui,
            "timeline_country",
            &countries,
            &state.timeline.filter.country,
        ) {
            state.set_timeline_country(country);
        }
    });

    let mut start = state.timeline.filter.start;
    let mut end = state.timeline.filter.end;
    ui.horizontal(|ui: &mut Ui| {
        ui.label("Select Date Range");
        let from = ui.add(DatePickerButton::new(&mut start).id_salt("timeline_start"));
        ui.label("to");
        let to = ui.add(DatePickerButton::new(&mut end).id_salt("timeline_end"));
        if from.changed() || to.changed() {
            state.set_timeline_range(start, end);
        }
    });

    let (years, counts) = &state.timeline.top_years;
    if !years.is_empty() {
        let ranking: Vec<String> = years
            .iter()
            .zip(counts)
            .map(|(year, count)| format!("{year} ({count})"))
            .collect();
        ui.label(format!("Busiest years: {}", ranking.join(", ")));
    }
    ui.separator();

    let color = state.colors.color_for(&state.timeline.filter.country);
    plot::timeline_plot(ui, &state.timeline.per_year, &state.timeline.filter.country, color);

    egui::CollapsingHeader::new(format!("Matching tests ({})", state.timeline.rows.len()))
        .id_salt("timeline_rows")
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            table::records(ui, &state.timeline.rows);
        });
}

/// Query 2: where one country tested.
pub fn test_locations(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Locations of Nuclear Tests");

    let countries = state.countries.clone();
    ui.horizontal(|ui: &mut Ui| {
        ui.label("Select a Country");
        if let Some(country) =
            country_selector(ui, "sites_country", &countries, &state.sites.country)
        {
            state.set_sites_country(country);
        }
    });

    if !state.has(OptionalField::Coordinates) {
        ui.label("This dataset has no test coordinates.");
        return;
    }

    let Some((lat, lon)) = state.sites.center else {
        ui.label(format!("No located tests for {}.", state.sites.country));
        return;
    };
    ui.label(format!(
        "{} located tests, centred on {lat:.3}, {lon:.3}",
        state.sites.sites.len()
    ));

    let color = state.colors.color_for(&state.sites.country);
    plot::site_map(ui, &state.sites.sites, state.table.schema(), color);
}

/// Query 3: test counts per country for a set of purposes.
pub fn tests_by_purpose(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Number of Tests by Purpose");

    if !state.has(OptionalField::Purpose) {
        ui.label("This dataset has no test purposes.");
        return;
    }

    ui.horizontal(|ui: &mut Ui| {
        ui.label("Select Test Purposes");
        if ui.small_button("All").clicked() {
            state.select_all_purposes();
        }
        if ui.small_button("None").clicked() {
            state.select_no_purposes();
        }
    });

    let all = state.purposes.all.clone();
    ui.horizontal_wrapped(|ui: &mut Ui| {
        for purpose in &all {
            let mut checked = state.purposes.selected.contains(purpose);
            if ui.checkbox(&mut checked, purpose.as_str()).changed() {
                state.toggle_purpose(purpose);
            }
        }
    });
    ui.separator();

    if state.purposes.summary.is_empty() {
        ui.label("No tests match the selected purposes.");
        return;
    }

    plot::purpose_bar_chart(ui, &state.purposes.summary, &state.colors);
    ui.separator();
    table::country_counts(ui, &state.purposes.summary);
}

// ---------------------------------------------------------------------------
// Widgets
// ---------------------------------------------------------------------------

/// Country drop-down; returns the newly picked country, if any.
fn country_selector(ui: &mut Ui, id: &str, countries: &[String], current: &str) -> Option<String> {
    let mut picked = None;
    egui::ComboBox::from_id_salt(id)
        .selected_text(current)
        .show_ui(ui, |ui: &mut Ui| {
            for country in countries {
                if ui
                    .selectable_label(country == current, country.as_str())
                    .clicked()
                {
                    picked = Some(country.clone());
                }
            }
        });
    picked.filter(|c| c != current)
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open nuclear explosions dataset")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        log::info!("Opening {}", path.display());
        state.open(path);
        state.page = Page::Introduction;
    }
}
