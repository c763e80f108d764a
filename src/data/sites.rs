use chrono::NaiveDate;

use super::model::{OptionalField, Schema, Table};

/// A located test, ready to be drawn as a map marker.
#[derive(Debug, Clone, PartialEq)]
pub struct TestSite {
    pub latitude: f64,
    pub longitude: f64,
    pub date: Option<NaiveDate>,
    pub purpose: Option<String>,
    pub yield_kt: Option<f64>,
}

impl TestSite {
    /// Marker popup text: date, purpose and yield, one per line.
    pub fn popup(&self, schema: &Schema) -> String {
        let date = self
            .date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "Unknown".to_string());
        let purpose = match &self.purpose {
            Some(p) if schema.has(OptionalField::Purpose) => p.clone(),
            _ => "Unknown".to_string(),
        };
        let yield_kt = match self.yield_kt {
            Some(y) if schema.has(OptionalField::Yield) => format!("{y:.1}"),
            _ => "N/A".to_string(),
        };
        format!("Date: {date}\nPurpose: {purpose}\nYield: {yield_kt}")
    }
}

/// Tests from `country` that have both coordinates. Empty when the dataset
/// carries no coordinate columns.
pub fn test_sites(table: &Table, country: &str) -> Vec<TestSite> {
    if !table.schema().has(OptionalField::Coordinates) {
        return Vec::new();
    }
    table
        .iter()
        .filter(|r| r.country.as_deref() == Some(country))
        .filter_map(|r| {
            Some(TestSite {
                latitude: r.latitude?,
                longitude: r.longitude?,
                date: r.date,
                purpose: r.purpose.clone(),
                yield_kt: r.yield_kt,
            })
        })
        .collect()
}

/// Mean latitude and longitude of the sites.
pub fn map_center(sites: &[TestSite]) -> Option<(f64, f64)> {
    if sites.is_empty() {
        return None;
    }
    let n = sites.len() as f64;
    let lat = sites.iter().map(|s| s.latitude).sum::<f64>() / n;
    let lon = sites.iter().map(|s| s.longitude).sum::<f64>() / n;
    Some((lat, lon))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::clean::clean;
    use crate::data::fixtures::{raw, sample};
    use crate::data::model::{COUNTRY, DAY, MONTH, YEAR};

    #[test]
    fn sites_skip_rows_without_coordinates() {
        let table = sample();
        let sites = test_sites(&table, "USA");

        // Six USA rows, one of them without coordinates.
        assert_eq!(sites.len(), 5);
        assert!(sites.iter().any(|s| s.date.is_none()));
    }

    #[test]
    fn center_is_mean() {
        let sites = test_sites(&sample(), "USSR");
        let (lat, lon) = map_center(&sites).unwrap();

        assert!((lat - (50.0 + 73.4 + 73.8) / 3.0).abs() < 1e-9);
        assert!((lon - (77.0 + 54.9 + 54.5) / 3.0).abs() < 1e-9);
        assert_eq!(map_center(&[]), None);
    }

    #[test]
    fn popup_text() {
        let table = sample();
        let sites = test_sites(&table, "CHINA");
        assert_eq!(
            sites[0].popup(table.schema()),
            "Date: 1964-10-16\nPurpose: Wr\nYield: 22.0"
        );

        let undated = test_sites(&table, "USA")
            .into_iter()
            .find(|s| s.date.is_none())
            .unwrap();
        assert_eq!(
            undated.popup(table.schema()),
            "Date: Unknown\nPurpose: Wr\nYield: N/A"
        );
    }

    #[test]
    fn no_coordinate_columns_means_no_sites() {
        let table = clean(raw(&[COUNTRY, YEAR, MONTH, DAY], &[&["USA", "1945", "7", "16"]])).unwrap();
        assert!(test_sites(&table, "USA").is_empty());
    }
}
