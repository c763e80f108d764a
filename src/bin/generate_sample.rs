//! Writes a synthetic nuclear test dataset as `sample_explosions.csv` and
//! `sample_explosions.parquet`, with the same columns as the real one.

use std::fs::File;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

/// Country, first year, last year, tests per active year, test sites (lat, lon).
const PROGRAMMES: &[(&str, i64, i64, u64, &[(f64, f64)])] = &[
    ("USA", 1945, 1992, 20, &[(37.1, -116.05), (11.6, 165.3), (32.5, -105.6)]),
    ("USSR", 1949, 1990, 15, &[(50.0, 77.0), (73.4, 54.9)]),
    ("UK", 1952, 1991, 2, &[(-29.0, 131.6), (1.8, -157.4)]),
    ("FRANCE", 1960, 1996, 5, &[(26.2, -0.05), (-21.9, -138.9)]),
    ("CHINA", 1964, 1996, 2, &[(41.5, 88.3)]),
    ("INDIA", 1974, 1998, 1, &[(27.1, 71.7)]),
    ("PAKIST", 1998, 1998, 2, &[(28.8, 64.9)]),
];

const PURPOSES: &[&str] = &["Wr", "We", "Se", "Pne", "Sam", "Wr/We"];

/// Minimal deterministic PRNG (splitmix64).
struct SplitMix(u64);

impl SplitMix {
    fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    fn below(&mut self, n: u64) -> u64 {
        self.next_u64() % n
    }

    fn unit(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}

#[derive(Default)]
struct Columns {
    country: Vec<String>,
    year: Vec<i64>,
    month: Vec<i64>,
    day: Vec<i64>,
    yield_kt: Vec<Option<f64>>,
    purpose: Vec<String>,
    latitude: Vec<f64>,
    longitude: Vec<f64>,
}

fn generate(rng: &mut SplitMix) -> Columns {
    let mut cols = Columns::default();
    for &(country, first, last, per_year, sites) in PROGRAMMES {
        for year in first..=last {
            let n = 1 + rng.below(per_year);
            for _ in 0..n {
                let (lat, lon) = sites[rng.below(sites.len() as u64) as usize];
                cols.country.push(country.to_string());
                cols.year.push(year);
                cols.month.push(1 + rng.below(12) as i64);
                cols.day.push(1 + rng.below(28) as i64);
                // Roughly one in ten yields is unknown.
                cols.yield_kt
                    .push((rng.below(10) != 0).then(|| (rng.unit() * 3.0).exp().round()));
                cols.purpose
                    .push(PURPOSES[rng.below(PURPOSES.len() as u64) as usize].to_string());
                cols.latitude.push(lat + (rng.unit() - 0.5) * 0.2);
                cols.longitude.push(lon + (rng.unit() - 0.5) * 0.2);
            }
        }
    }
    cols
}

const HEADERS: [&str; 8] = [
    "WEAPON SOURCE COUNTRY",
    "Date.Year",
    "Date.Month",
    "Date.Day",
    "Yield",
    "Data.Purpose",
    "Location.Cordinates.Latitude",
    "Location.Cordinates.Longitude",
];

fn write_csv(cols: &Columns, path: &str) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).with_context(|| format!("creating {path}"))?;
    writer.write_record(HEADERS)?;
    for i in 0..cols.country.len() {
        writer.write_record([
            cols.country[i].clone(),
            cols.year[i].to_string(),
            cols.month[i].to_string(),
            cols.day[i].to_string(),
            cols.yield_kt[i].map(|y| y.to_string()).unwrap_or_default(),
            cols.purpose[i].clone(),
            format!("{:.4}", cols.latitude[i]),
            format!("{:.4}", cols.longitude[i]),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn write_parquet(cols: &Columns, path: &str) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new(HEADERS[0], DataType::Utf8, false),
        Field::new(HEADERS[1], DataType::Int64, false),
        Field::new(HEADERS[2], DataType::Int64, false),
        Field::new(HEADERS[3], DataType::Int64, false),
        Field::new(HEADERS[4], DataType::Float64, true),
        Field::new(HEADERS[5], DataType::Utf8, false),
        Field::new(HEADERS[6], DataType::Float64, false),
        Field::new(HEADERS[7], DataType::Float64, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from(cols.country.clone())),
            Arc::new(Int64Array::from(cols.year.clone())),
            Arc::new(Int64Array::from(cols.month.clone())),
            Arc::new(Int64Array::from(cols.day.clone())),
            Arc::new(Float64Array::from(cols.yield_kt.clone())),
            Arc::new(StringArray::from(cols.purpose.clone())),
            Arc::new(Float64Array::from(cols.latitude.clone())),
            Arc::new(Float64Array::from(cols.longitude.clone())),
        ],
    )
    .context("building record batch")?;

    let file = File::create(path).with_context(|| format!("creating {path}"))?;
    let mut writer = ArrowWriter::try_new(file, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SplitMix(1945);
    let cols = generate(&mut rng);

    write_csv(&cols, "sample_explosions.csv")?;
    write_parquet(&cols, "sample_explosions.parquet")?;

    println!(
        "Wrote {} tests to sample_explosions.csv and sample_explosions.parquet",
        cols.country.len()
    );
    Ok(())
}
