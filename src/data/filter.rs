use std::collections::BTreeSet;

use chrono::NaiveDate;

use super::model::{Record, Table};

// ---------------------------------------------------------------------------
// Country + date-range filter
// ---------------------------------------------------------------------------

/// Which tests to keep: one weapon source country within an inclusive date range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryDateFilter {
    pub country: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Default for CountryDateFilter {
    /// USA, 1950-01-01 through 1998-12-31.
    fn default() -> Self {
        CountryDateFilter {
            country: "USA".to_string(),
            start: NaiveDate::from_ymd_opt(1950, 1, 1).unwrap_or(NaiveDate::MIN),
            end: NaiveDate::from_ymd_opt(1998, 12, 31).unwrap_or(NaiveDate::MAX),
        }
    }
}

impl CountryDateFilter {
    pub fn new(country: impl Into<String>, start: NaiveDate, end: NaiveDate) -> Self {
        CountryDateFilter {
            country: country.into(),
            start,
            end,
        }
    }

    /// A record passes when its country matches exactly and its date is
    /// within `[start, end]`. Undated records never pass.
    pub fn matches(&self, record: &Record) -> bool {
        record.country.as_deref() == Some(self.country.as_str())
            && record
                .date
                .is_some_and(|d| self.start <= d && d <= self.end)
    }
}

/// Tests from `filter.country` dated within `[filter.start, filter.end]`.
pub fn filter_by_country_and_date(table: &Table, filter: &CountryDateFilter) -> Table {
    table.filter(|r| filter.matches(r))
}

// ---------------------------------------------------------------------------
// Purpose filter
// ---------------------------------------------------------------------------

/// Tests whose purpose is one of `purposes`. Tests without a purpose never match.
pub fn filter_by_purpose_set(table: &Table, purposes: &BTreeSet<String>) -> Table {
    table.filter(|r| r.purpose.as_ref().is_some_and(|p| purposes.contains(p)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::sample;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn default_filter_is_usa_1950_to_1998() {
        let f = CountryDateFilter::default();
        assert_eq!(f.country, "USA");
        assert_eq!(f.start, ymd(1950, 1, 1));
        assert_eq!(f.end, ymd(1998, 12, 31));

        let usa = filter_by_country_and_date(&sample(), &f);
        // Trinity (1945) is before the range, the 13th-month row is undated.
        assert_eq!(usa.len(), 4);
    }

    #[test]
    fn bounds_are_inclusive() {
        let table = sample();
        let f = CountryDateFilter::new("USA", ymd(1955, 3, 1), ymd(1956, 5, 21));
        let out = filter_by_country_and_date(&table, &f);

        let dates: Vec<_> = out.iter().filter_map(|r| r.date).collect();
        assert_eq!(dates, vec![ymd(1955, 3, 1), ymd(1956, 5, 21)]);
    }

    #[test]
    fn result_is_subset_satisfying_predicate() {
        let table = sample();
        let f = CountryDateFilter::new("USSR", ymd(1900, 1, 1), ymd(2000, 1, 1));
        let out = filter_by_country_and_date(&table, &f);

        assert_eq!(out.len(), 3);
        for rec in &out {
            assert!(table.records().contains(rec));
            assert_eq!(rec.country.as_deref(), Some("USSR"));
            let d = rec.date.expect("filtered rows are dated");
            assert!(f.start <= d && d <= f.end);
        }
    }

    #[test]
    fn never_returns_undated_rows() {
        let f = CountryDateFilter::new("USA", NaiveDate::MIN, NaiveDate::MAX);
        let out = filter_by_country_and_date(&sample(), &f);

        assert_eq!(out.len(), 5);
        assert!(out.iter().all(|r| r.date.is_some()));
    }

    #[test]
    fn country_match_is_exact() {
        let f = CountryDateFilter::new("usa", NaiveDate::MIN, NaiveDate::MAX);
        assert!(filter_by_country_and_date(&sample(), &f).is_empty());
    }

    #[test]
    fn filtering_is_idempotent() {
        let f = CountryDateFilter::default();
        let once = filter_by_country_and_date(&sample(), &f);
        let twice = filter_by_country_and_date(&once, &f);
        assert_eq!(once, twice);
    }

    #[test]
    fn purpose_set_membership() {
        let table = sample();
        let only_pne: BTreeSet<String> = ["Pne".to_string()].into();
        let out = filter_by_purpose_set(&table, &only_pne);
        assert_eq!(out.len(), 1);
        assert_eq!(out.records()[0].country.as_deref(), Some("USSR"));

        let both: BTreeSet<String> = ["Wr".to_string(), "Se".to_string()].into();
        assert_eq!(filter_by_purpose_set(&table, &both).len(), 11);

        assert!(filter_by_purpose_set(&table, &BTreeSet::new()).is_empty());
    }
}
