use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;

use super::error::LoadError;
use super::model::{
    CellValue, OptionalField, Record, Schema, Table, COUNTRY, DATE, DAY, LATITUDE, LONGITUDE,
    MONTH, PURPOSE, YEAR, YIELD,
};

/// Cell texts treated as missing, matching what pandas reads as NaN.
const NA_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

// ---------------------------------------------------------------------------
// RawTable – format-independent reader output
// ---------------------------------------------------------------------------

/// Header row plus text cells exactly as read; `None` is an absent cell.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

// ---------------------------------------------------------------------------
// Cleaning
// ---------------------------------------------------------------------------

/// Turn raw cells into a typed [`Table`].
///
/// * column labels are trimmed (including a leading byte-order mark)
/// * country and the three date parts are required
/// * the composite date is derived per row; invalid combinations become `None`
/// * yield is parsed as a number when the column exists, otherwise all `None`
/// * rows are never dropped
pub fn clean(raw: RawTable) -> Result<Table, LoadError> {
    let headers: Vec<String> = raw
        .headers
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
        .collect();

    let position = |name: &str| headers.iter().position(|h| h == name);
    let require = |name: &str| position(name).ok_or_else(|| LoadError::MissingColumn(name.to_string()));

    let country_idx = require(COUNTRY)?;
    let year_idx = require(YEAR)?;
    let month_idx = require(MONTH)?;
    let day_idx = require(DAY)?;
    let yield_idx = position(YIELD);
    let purpose_idx = position(PURPOSE);
    let lat_idx = position(LATITUDE);
    let lon_idx = position(LONGITUDE);

    let mut present = BTreeSet::new();
    if yield_idx.is_some() {
        present.insert(OptionalField::Yield);
    } else {
        log::warn!("dataset has no '{YIELD}' column, yields will be empty");
    }
    if purpose_idx.is_some() {
        present.insert(OptionalField::Purpose);
    }
    if lat_idx.is_some() && lon_idx.is_some() {
        present.insert(OptionalField::Coordinates);
    }

    let interpreted = [
        Some(country_idx),
        Some(year_idx),
        Some(month_idx),
        Some(day_idx),
        yield_idx,
        purpose_idx,
        lat_idx,
        lon_idx,
    ];
    let passthrough: Vec<(usize, &String)> = headers
        .iter()
        .enumerate()
        .filter(|(i, _)| !interpreted.contains(&Some(*i)))
        .collect();

    let mut records = Vec::with_capacity(raw.rows.len());
    for row in &raw.rows {
        let cell = |idx: usize| row.get(idx).and_then(|c| non_missing(c.as_deref()));
        let opt_cell = |idx: Option<usize>| idx.and_then(cell);

        let year = cell(year_idx).and_then(parse_component::<i32>);
        let month = cell(month_idx).and_then(parse_component::<u32>);
        let day = cell(day_idx).and_then(parse_component::<u32>);

        let extra: BTreeMap<String, CellValue> = passthrough
            .iter()
            .map(|(i, name)| ((*name).clone(), CellValue::guess(cell(*i))))
            .collect();

        records.push(Record {
            country: cell(country_idx).map(str::to_string),
            year,
            month,
            day,
            date: composite_date(year, month, day),
            yield_kt: opt_cell(yield_idx).and_then(parse_number),
            purpose: opt_cell(purpose_idx).map(str::to_string),
            latitude: opt_cell(lat_idx).and_then(parse_number),
            longitude: opt_cell(lon_idx).and_then(parse_number),
            extra,
        });
    }

    let undated = records.iter().filter(|r| r.date.is_none()).count();
    if undated > 0 {
        log::warn!("{undated} of {} rows have no valid date", records.len());
    }

    let mut columns = headers;
    if !columns.iter().any(|c| c == DATE) {
        columns.push(DATE.to_string());
    }
    if yield_idx.is_none() {
        columns.push(YIELD.to_string());
    }

    Ok(Table::new(Schema::new(columns, present), records))
}

/// `None` for absent cells and NA tokens, the cell text otherwise.
fn non_missing(cell: Option<&str>) -> Option<&str> {
    cell.filter(|c| !NA_TOKENS.contains(&c.trim()))
}

fn parse_component<T: std::str::FromStr>(s: &str) -> Option<T> {
    s.trim().parse().ok()
}

/// Year-month-day to a calendar date; out-of-range parts give `None`.
pub fn composite_date(year: Option<i32>, month: Option<u32>, day: Option<u32>) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year?, month?, day?)
}

/// Numeric coercion; unparseable text and NaN become `None`.
pub fn parse_number(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|v| !v.is_nan())
}
