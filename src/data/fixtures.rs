//! Small hand-built datasets shared by the unit tests.

use super::clean::{clean, RawTable};
use super::model::{Table, COUNTRY, DAY, LATITUDE, LONGITUDE, MONTH, PURPOSE, YEAR, YIELD};

pub fn raw(headers: &[&str], rows: &[&[&str]]) -> RawTable {
    RawTable {
        headers: headers.iter().map(|h| h.to_string()).collect(),
        rows: rows
            .iter()
            .map(|r| r.iter().map(|c| Some(c.to_string())).collect())
            .collect(),
    }
}

/// Columns: country, year, month, day, yield, purpose, latitude, longitude.
pub fn table(rows: &[[&str; 8]]) -> Table {
    let rows: Vec<&[&str]> = rows.iter().map(|r| r.as_slice()).collect();
    clean(raw(
        &[COUNTRY, YEAR, MONTH, DAY, YIELD, PURPOSE, LATITUDE, LONGITUDE],
        &rows,
    ))
    .unwrap()
}

/// A dozen tests across five countries, including undated and unlocated rows.
pub fn sample() -> Table {
    table(&[
        ["USA", "1945", "7", "16", "21", "Wr", "32.54", "-105.57"],
        ["USA", "1955", "3", "1", "15", "Wr", "37.1", "-116.05"],
        ["USSR", "1955", "11", "22", "1600", "Wr", "50.0", "77.0"],
        ["USA", "1956", "5", "21", "3800", "Wr", "11.6", "165.3"],
        ["USA", "1956", "7", "11", "", "Se", "", ""],
        ["UK", "1957", "5", "15", "300", "Wr", "1.8", "-157.4"],
        ["USSR", "1957", "9", "24", "1.2", "Pne", "73.4", "54.9"],
        ["USA", "1957", "7", "19", "2", "Wr", "37.0", "-116.0"],
        ["USA", "1957", "13", "1", "abc", "Wr", "37.0", "-116.0"],
        ["FRANCE", "1960", "2", "13", "70", "Wr", "26.2", "-0.05"],
        ["USSR", "1961", "10", "30", "50000", "Wr", "73.8", "54.5"],
        ["CHINA", "1964", "10", "16", "22", "Wr", "41.5", "88.3"],
    ])
}
