use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::NaiveDate;

use crate::color::CountryColors;
use crate::config::Config;
use crate::data::aggregate::{
    count_by_country_descending, date_bounds, tests_per_year, top_test_years, unique_countries,
    unique_purposes, CountryCount, YearCount,
};
use crate::data::cache::DatasetCache;
use crate::data::filter::{filter_by_country_and_date, filter_by_purpose_set, CountryDateFilter};
use crate::data::model::{OptionalField, Table};
use crate::data::sites::{map_center, test_sites, TestSite};

// ---------------------------------------------------------------------------
// Pages
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Introduction,
    TestsOverTime,
    TestLocations,
    TestsByPurpose,
}

impl Page {
    pub const ALL: [Page; 4] = [
        Page::Introduction,
        Page::TestsOverTime,
        Page::TestLocations,
        Page::TestsByPurpose,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Page::Introduction => "Introduction",
            Page::TestsOverTime => "Query 1: Total Tests Over Time",
            Page::TestLocations => "Query 2: Test Locations",
            Page::TestsByPurpose => "Query 3: Tests by Purpose",
        }
    }
}

// ---------------------------------------------------------------------------
// Derived views (recomputed when their selection changes)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct TimelineView {
    pub filter: CountryDateFilter,
    pub per_year: Vec<YearCount>,
    pub top_years: (Vec<i32>, Vec<usize>),
    pub rows: Table,
}

#[derive(Debug, Clone, Default)]
pub struct SitesView {
    pub country: String,
    pub sites: Vec<TestSite>,
    pub center: Option<(f64, f64)>,
}

#[derive(Debug, Clone, Default)]
pub struct PurposeView {
    pub all: Vec<String>,
    pub selected: BTreeSet<String>,
    pub summary: Vec<CountryCount>,
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: Config,
    cache: DatasetCache,

    /// Current dataset; empty when loading failed.
    pub table: Arc<Table>,

    /// Why the current dataset could not be loaded.
    pub load_error: Option<String>,

    pub page: Page,

    /// Countries in first-seen order, for the selectors.
    pub countries: Vec<String>,
    pub colors: CountryColors,

    pub timeline: TimelineView,
    pub sites: SitesView,
    pub purposes: PurposeView,
}

impl AppState {
    /// Build the state and load the configured dataset.
    pub fn new(config: Config) -> Self {
        let mut state = AppState::with_table(config, Arc::new(Table::empty()));
        state.reload();
        state
    }

    /// Build the state around an already loaded table.
    pub fn with_table(config: Config, table: Arc<Table>) -> Self {
        let cache = DatasetCache::new(config.dataset_path.clone());
        let mut state = AppState {
            config,
            cache,
            table: Arc::new(Table::empty()),
            load_error: None,
            page: Page::default(),
            countries: Vec::new(),
            colors: CountryColors::default(),
            timeline: TimelineView::default(),
            sites: SitesView::default(),
            purposes: PurposeView::default(),
        };
        state.set_table(table);
        state
    }

    /// Fetch the dataset through the cache. Once a load has succeeded this is
    /// a no-op and the current selections stay as they are.
    pub fn reload(&mut self) {
        if self.cache.is_loaded() {
            return;
        }
        let (table, error) = self.cache.get_or_load();
        log::debug!(
            "{} read {} time(s)",
            self.cache.source().display(),
            self.cache.load_count()
        );
        self.load_error = error.map(|e| format!("Error loading data: {e}"));
        self.set_table(table);
    }

    /// Switch to another dataset file.
    pub fn open(&mut self, path: PathBuf) {
        self.cache.set_source(path);
        self.reload();
    }

    pub fn source(&self) -> &std::path::Path {
        self.cache.source()
    }

    pub fn dataset_loaded(&self) -> bool {
        !self.table.is_empty()
    }

    pub fn has(&self, field: OptionalField) -> bool {
        self.table.schema().has(field)
    }

    /// Ingest a table and reset every selection to its default.
    fn set_table(&mut self, table: Arc<Table>) {
        self.table = table;
        self.countries = unique_countries(&self.table);
        self.colors = CountryColors::new(&self.countries);

        let country = self.initial_country();
        let (start, end) = date_bounds(&self.table).unwrap_or_else(|| {
            let d = CountryDateFilter::default();
            (d.start, d.end)
        });
        self.timeline.filter = CountryDateFilter::new(country.clone(), start, end);
        self.refresh_timeline();

        self.sites.country = country;
        self.refresh_sites();

        self.purposes.all = unique_purposes(&self.table);
        self.purposes.selected = self.purposes.all.iter().cloned().collect();
        self.refresh_purposes();
    }

    /// The configured default country if the data has it, else the first one.
    fn initial_country(&self) -> String {
        if self.countries.contains(&self.config.default_country) {
            return self.config.default_country.clone();
        }
        self.countries.first().cloned().unwrap_or_default()
    }

    // -- Query 1: tests over time --

    pub fn set_timeline_country(&mut self, country: String) {
        self.timeline.filter.country = country;
        self.refresh_timeline();
    }

    /// Set the date range; the earlier date always becomes the start.
    pub fn set_timeline_range(&mut self, a: NaiveDate, b: NaiveDate) {
        self.timeline.filter.start = a.min(b);
        self.timeline.filter.end = a.max(b);
        self.refresh_timeline();
    }

    pub fn refresh_timeline(&mut self) {
        let rows = filter_by_country_and_date(&self.table, &self.timeline.filter);
        self.timeline.per_year = tests_per_year(&rows);
        self.timeline.top_years = top_test_years(&rows, self.config.top_n);
        log::debug!(
            "timeline {:?}: {} tests over {} years",
            self.timeline.filter,
            rows.len(),
            self.timeline.per_year.len()
        );
        self.timeline.rows = rows;
    }

    // -- Query 2: test locations --

    pub fn set_sites_country(&mut self, country: String) {
        self.sites.country = country;
        self.refresh_sites();
    }

    pub fn refresh_sites(&mut self) {
        self.sites.sites = test_sites(&self.table, &self.sites.country);
        self.sites.center = map_center(&self.sites.sites);
        log::debug!(
            "{} located tests for {}",
            self.sites.sites.len(),
            self.sites.country
        );
    }

    // -- Query 3: tests by purpose --

    pub fn toggle_purpose(&mut self, purpose: &str) {
        if !self.purposes.selected.remove(purpose) {
            self.purposes.selected.insert(purpose.to_string());
        }
        self.refresh_purposes();
    }

    pub fn select_all_purposes(&mut self) {
        self.purposes.selected = self.purposes.all.iter().cloned().collect();
        self.refresh_purposes();
    }

    pub fn select_no_purposes(&mut self) {
        self.purposes.selected.clear();
        self.refresh_purposes();
    }

    pub fn refresh_purposes(&mut self) {
        let matching = filter_by_purpose_set(&self.table, &self.purposes.selected);
        self.purposes.summary = count_by_country_descending(&matching);
        log::debug!(
            "{} purposes selected, {} tests",
            self.purposes.selected.len(),
            matching.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::data::fixtures::sample;

    fn state() -> AppState {
        AppState::with_table(Config::default(), Arc::new(sample()))
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn defaults_follow_the_data() {
        let s = state();

        assert_eq!(s.page, Page::Introduction);
        assert_eq!(s.timeline.filter.country, "USA");
        assert_eq!(s.timeline.filter.start, ymd(1945, 7, 16));
        assert_eq!(s.timeline.filter.end, ymd(1964, 10, 16));
        assert_eq!(s.timeline.rows.len(), 5);
        assert_eq!(s.sites.country, "USA");
        assert_eq!(s.sites.sites.len(), 5);
        assert_eq!(s.purposes.selected.len(), 3);
        assert_eq!(s.purposes.summary[0].country, "USA");
    }

    #[test]
    fn missing_default_country_falls_back_to_first() {
        let config = Config {
            default_country: "INDIA".to_string(),
            ..Config::default()
        };
        let s = AppState::with_table(config, Arc::new(sample()));
        assert_eq!(s.timeline.filter.country, "USA");
    }

    #[test]
    fn timeline_follows_selection() {
        let mut s = state();
        s.set_timeline_country("USSR".to_string());
        assert_eq!(s.timeline.rows.len(), 3);

        s.set_timeline_range(ymd(1961, 12, 31), ymd(1956, 1, 1));
        assert_eq!(s.timeline.filter.start, ymd(1956, 1, 1));
        assert_eq!(s.timeline.rows.len(), 2);
        assert_eq!(
            s.timeline.per_year,
            vec![
                YearCount { year: 1957, count: 1 },
                YearCount { year: 1961, count: 1 }
            ]
        );
    }

    #[test]
    fn purpose_toggles_update_summary() {
        let mut s = state();
        s.toggle_purpose("Wr");
        s.toggle_purpose("Se");
        assert_eq!(
            s.purposes.summary,
            vec![CountryCount {
                country: "USSR".to_string(),
                count: 1
            }]
        );

        s.select_no_purposes();
        assert!(s.purposes.summary.is_empty());

        s.select_all_purposes();
        let total: usize = s.purposes.summary.iter().map(|c| c.count).sum();
        assert_eq!(total, 12);
    }

    #[test]
    fn failed_load_leaves_empty_dataset_and_message() {
        let config = Config {
            dataset_path: PathBuf::from("/no/such/nuclear_explosions.csv"),
            ..Config::default()
        };
        let s = AppState::new(config);

        assert!(!s.dataset_loaded());
        assert!(s.load_error.as_deref().unwrap().starts_with("Error loading data"));
        assert!(s.timeline.rows.is_empty());
        assert!(s.purposes.summary.is_empty());
    }

    #[test]
    fn opening_a_new_file_replaces_the_dataset() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "WEAPON SOURCE COUNTRY,Date.Year,Date.Month,Date.Day").unwrap();
        writeln!(file, "INDIA,1974,5,18").unwrap();

        let mut s = state();
        s.open(file.path().to_path_buf());

        assert!(s.load_error.is_none());
        assert_eq!(s.countries, vec!["INDIA"]);
        assert_eq!(s.timeline.filter.country, "INDIA");
        assert!(!s.has(OptionalField::Purpose));
        assert!(s.sites.sites.is_empty());
    }

    #[test]
    fn reload_after_success_keeps_selections() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "WEAPON SOURCE COUNTRY,Date.Year,Date.Month,Date.Day").unwrap();
        writeln!(file, "INDIA,1974,5,18").unwrap();
        writeln!(file, "PAKIST,1998,5,28").unwrap();

        let mut s = state();
        s.open(file.path().to_path_buf());
        s.set_timeline_country("PAKIST".to_string());
        s.reload();

        assert_eq!(s.cache.load_count(), 1);
        assert_eq!(s.timeline.filter.country, "PAKIST");
        assert_eq!(s.timeline.rows.len(), 1);
    }
}
