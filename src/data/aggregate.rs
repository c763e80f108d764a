use std::collections::{BTreeMap, HashSet};

use chrono::{Datelike, NaiveDate};

use super::model::Table;

/// How many years the "top test years" ranking shows unless configured.
pub const DEFAULT_TOP_N: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearCount {
    pub year: i32,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryCount {
    pub country: String,
    pub count: usize,
}

// ---------------------------------------------------------------------------
// Per-year counts
// ---------------------------------------------------------------------------

/// Number of dated tests per calendar year, ascending by year.
pub fn tests_per_year(table: &Table) -> Vec<YearCount> {
    let mut counts: BTreeMap<i32, usize> = BTreeMap::new();
    for date in table.iter().filter_map(|r| r.date) {
        *counts.entry(date.year()).or_default() += 1;
    }
    counts
        .into_iter()
        .map(|(year, count)| YearCount { year, count })
        .collect()
}

/// The `top_n` busiest years as parallel `(years, counts)` sequences.
///
/// Counts are non-increasing. Years with equal counts stay in ascending
/// year order.
pub fn top_test_years(table: &Table, top_n: usize) -> (Vec<i32>, Vec<usize>) {
    let mut per_year = tests_per_year(table);
    // Stable: ties keep the ascending-year grouping order.
    per_year.sort_by(|a, b| b.count.cmp(&a.count));
    per_year
        .into_iter()
        .take(top_n)
        .map(|yc| (yc.year, yc.count))
        .unzip()
}

// ---------------------------------------------------------------------------
// Per-country counts
// ---------------------------------------------------------------------------

/// Tests per weapon source country, most tests first, ties in ascending
/// country order. Rows without a country are not counted.
pub fn count_by_country_descending(table: &Table) -> Vec<CountryCount> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for country in table.iter().filter_map(|r| r.country.as_deref()) {
        *counts.entry(country).or_default() += 1;
    }
    let mut out: Vec<CountryCount> = counts
        .into_iter()
        .map(|(country, count)| CountryCount {
            country: country.to_string(),
            count,
        })
        .collect();
    out.sort_by(|a, b| b.count.cmp(&a.count));
    out
}

// ---------------------------------------------------------------------------
// Distinct values
// ---------------------------------------------------------------------------

/// Distinct non-null purposes in order of first appearance.
pub fn unique_purposes(table: &Table) -> Vec<String> {
    first_seen(table.iter().filter_map(|r| r.purpose.as_deref()))
}

/// Distinct non-null countries in order of first appearance.
pub fn unique_countries(table: &Table) -> Vec<String> {
    first_seen(table.iter().filter_map(|r| r.country.as_deref()))
}

fn first_seen<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .filter(|v| seen.insert(*v))
        .map(str::to_string)
        .collect()
}

/// Earliest and latest composite dates, or `None` if nothing is dated.
pub fn date_bounds(table: &Table) -> Option<(NaiveDate, NaiveDate)> {
    let mut dates = table.iter().filter_map(|r| r.date);
    let first = dates.next()?;
    Some(dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d))))
}
