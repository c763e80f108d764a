use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use chrono::NaiveDate;

// ---------------------------------------------------------------------------
// Column names (after whitespace trimming)
// ---------------------------------------------------------------------------

pub const COUNTRY: &str = "WEAPON SOURCE COUNTRY";
pub const YEAR: &str = "Date.Year";
pub const MONTH: &str = "Date.Month";
pub const DAY: &str = "Date.Day";
pub const YIELD: &str = "Yield";
pub const PURPOSE: &str = "Data.Purpose";
pub const LATITUDE: &str = "Location.Cordinates.Latitude";
pub const LONGITUDE: &str = "Location.Cordinates.Longitude";
/// Derived composite date column.
pub const DATE: &str = "Date";

// ---------------------------------------------------------------------------
// CellValue – a single untyped cell of a pass-through column
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value for columns the explorer does not interpret.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Date(NaiveDate),
    Null,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            CellValue::Null => write!(f, ""),
        }
    }
}

impl CellValue {
    /// Infer the narrowest type for a raw text cell.
    pub fn guess(raw: Option<&str>) -> Self {
        let Some(s) = raw else {
            return CellValue::Null;
        };
        if let Ok(i) = s.parse::<i64>() {
            return CellValue::Integer(i);
        }
        if let Ok(f) = s.parse::<f64>() {
            return CellValue::Float(f);
        }
        if s == "true" || s == "false" {
            return CellValue::Bool(s == "true");
        }
        CellValue::String(s.to_string())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }
}

impl From<Option<String>> for CellValue {
    fn from(value: Option<String>) -> Self {
        value.map_or(CellValue::Null, CellValue::String)
    }
}

impl From<Option<f64>> for CellValue {
    fn from(value: Option<f64>) -> Self {
        value.map_or(CellValue::Null, CellValue::Float)
    }
}

impl From<Option<i32>> for CellValue {
    fn from(value: Option<i32>) -> Self {
        value.map_or(CellValue::Null, |v| CellValue::Integer(v as i64))
    }
}

impl From<Option<u32>> for CellValue {
    fn from(value: Option<u32>) -> Self {
        value.map_or(CellValue::Null, |v| CellValue::Integer(v as i64))
    }
}

// ---------------------------------------------------------------------------
// Record – one cleaned row of the source table
// ---------------------------------------------------------------------------

/// One nuclear test, in source-file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    pub country: Option<String>,
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub day: Option<u32>,
    /// Composite date; `None` iff a component is missing or the combination is invalid.
    pub date: Option<NaiveDate>,
    /// Explosive yield; `None` when absent or not numeric.
    pub yield_kt: Option<f64>,
    pub purpose: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Every other source column, keyed by trimmed name.
    pub extra: BTreeMap<String, CellValue>,
}

impl Record {
    /// Look up a field by its exact (trimmed) column name.
    pub fn field(&self, name: &str) -> CellValue {
        match name {
            COUNTRY => self.country.clone().into(),
            YEAR => self.year.into(),
            MONTH => self.month.into(),
            DAY => self.day.into(),
            DATE => self.date.map_or(CellValue::Null, CellValue::Date),
            YIELD => self.yield_kt.into(),
            PURPOSE => self.purpose.clone().into(),
            LATITUDE => self.latitude.into(),
            LONGITUDE => self.longitude.into(),
            other => self.extra.get(other).cloned().unwrap_or(CellValue::Null),
        }
    }
}

// ---------------------------------------------------------------------------
// Schema – column list plus optional-field capabilities
// ---------------------------------------------------------------------------

/// Optional source fields whose presence changes what the explorer can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OptionalField {
    /// `Yield` was present in the source (the cleaned table always has it).
    Yield,
    Purpose,
    /// Both latitude and longitude columns.
    Coordinates,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    /// Trimmed source column names in file order, followed by the derived ones.
    pub columns: Vec<String>,
    present: BTreeSet<OptionalField>,
}

impl Schema {
    pub fn new(columns: Vec<String>, present: BTreeSet<OptionalField>) -> Self {
        Schema { columns, present }
    }

    pub fn has(&self, field: OptionalField) -> bool {
        self.present.contains(&field)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }
}

// ---------------------------------------------------------------------------
// Table – the cleaned dataset
// ---------------------------------------------------------------------------

/// Ordered, read-only collection of records. Queries derive new tables.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    schema: Schema,
    records: Vec<Record>,
}

impl Table {
    pub fn new(schema: Schema, records: Vec<Record>) -> Self {
        Table { schema, records }
    }

    /// The table handed out when loading fails.
    pub fn empty() -> Self {
        Table::default()
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// New table with the records matching `keep`, same schema, same order.
    pub fn filter<F>(&self, mut keep: F) -> Table
    where
        F: FnMut(&Record) -> bool,
    {
        Table {
            schema: self.schema.clone(),
            records: self.records.iter().filter(|r| keep(r)).cloned().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guess_infers_types() {
        assert_eq!(CellValue::guess(Some("42")), CellValue::Integer(42));
        assert_eq!(CellValue::guess(Some("4.5")), CellValue::Float(4.5));
        assert_eq!(CellValue::guess(Some("true")), CellValue::Bool(true));
        assert_eq!(
            CellValue::guess(Some("NEVADA")),
            CellValue::String("NEVADA".into())
        );
        assert_eq!(CellValue::guess(None), CellValue::Null);
    }

    #[test]
    fn field_lookup_is_exact() {
        let mut extra = BTreeMap::new();
        extra.insert("Data.Name".to_string(), CellValue::String("Trinity".into()));
        let rec = Record {
            country: Some("USA".into()),
            year: Some(1945),
            yield_kt: Some(21.0),
            extra,
            ..Default::default()
        };

        assert_eq!(rec.field(COUNTRY), CellValue::String("USA".into()));
        assert_eq!(rec.field(YEAR), CellValue::Integer(1945));
        assert_eq!(rec.field(YIELD), CellValue::Float(21.0));
        assert_eq!(rec.field("Data.Name"), CellValue::String("Trinity".into()));
        assert!(rec.field("data.name").is_null());
        assert!(rec.field(" Data.Name").is_null());
        assert!(rec.field(DATE).is_null());
    }

    #[test]
    fn filter_keeps_schema_and_order() {
        let schema = Schema::new(
            vec![COUNTRY.to_string()],
            BTreeSet::from([OptionalField::Purpose]),
        );
        let records = ["USA", "USSR", "USA"]
            .iter()
            .map(|c| Record {
                country: Some(c.to_string()),
                ..Default::default()
            })
            .collect();
        let table = Table::new(schema, records);

        let usa = table.filter(|r| r.country.as_deref() == Some("USA"));
        assert_eq!(usa.len(), 2);
        assert!(usa.schema().has(OptionalField::Purpose));
        assert!(!usa.schema().has(OptionalField::Coordinates));
        assert_eq!(table.len(), 3);
    }
}
