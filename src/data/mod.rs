/// Data layer: loading, cleaning, and the preset queries.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → RawTable (text cells)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  clean    │  trim labels, derive Date, coerce Yield → Table
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  cache    │  load once per source file → Arc<Table>
///   └──────────┘
///        │
///        ▼
///   ┌─────────────────────────┐
///   │ filter / aggregate /    │  pure functions over &Table
///   │ sites                   │
///   └─────────────────────────┘
/// ```

pub mod aggregate;
pub mod cache;
pub mod clean;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
pub mod sites;

#[cfg(test)]
pub mod fixtures;
