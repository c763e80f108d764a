use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::error::LoadError;
use super::loader::load;
use super::model::Table;

// ---------------------------------------------------------------------------
// Load-once dataset cache
// ---------------------------------------------------------------------------

/// Holds the cleaned table for one source file.
///
/// The first successful load is kept for the rest of the session; failed
/// loads are not cached, so the next request retries. Pointing the cache at a
/// different file is the only thing that invalidates it.
#[derive(Debug)]
pub struct DatasetCache {
    source: PathBuf,
    table: Option<Arc<Table>>,
    loads: usize,
}

impl DatasetCache {
    pub fn new(source: impl Into<PathBuf>) -> Self {
        DatasetCache {
            source: source.into(),
            table: None,
            loads: 0,
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    /// The cached table, loading it first if needed. On failure the table is
    /// empty and the error explains why.
    pub fn get_or_load(&mut self) -> (Arc<Table>, Option<LoadError>) {
        if let Some(table) = &self.table {
            return (Arc::clone(table), None);
        }

        self.loads += 1;
        let outcome = load(&self.source);
        let table = Arc::new(outcome.table);
        if outcome.error.is_none() {
            self.table = Some(Arc::clone(&table));
        }
        (table, outcome.error)
    }

    /// Switch to another source file, dropping whatever was cached.
    pub fn set_source(&mut self, source: impl Into<PathBuf>) {
        self.source = source.into();
        self.table = None;
    }

    pub fn is_loaded(&self) -> bool {
        self.table.is_some()
    }

    /// How many times the source file has been read.
    pub fn load_count(&self) -> usize {
        self.loads
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn csv_file(body: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        write!(
            file,
            "WEAPON SOURCE COUNTRY,Date.Year,Date.Month,Date.Day\n{body}"
        )
        .unwrap();
        file
    }

    #[test]
    fn loads_once_after_success() {
        let file = csv_file("USA,1945,7,16\n");
        let mut cache = DatasetCache::new(file.path());

        let (first, err) = cache.get_or_load();
        assert!(err.is_none());
        let (second, _) = cache.get_or_load();

        assert_eq!(first.len(), 1);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.load_count(), 1);
        assert!(cache.is_loaded());
    }

    #[test]
    fn failures_are_retried() {
        let mut cache = DatasetCache::new("/no/such/dir/tests.csv");

        let (table, err) = cache.get_or_load();
        assert!(table.is_empty());
        assert!(err.is_some());
        let _ = cache.get_or_load();

        assert_eq!(cache.load_count(), 2);
        assert!(!cache.is_loaded());
    }

    #[test]
    fn changing_source_invalidates() {
        let a = csv_file("USA,1945,7,16\n");
        let b = csv_file("USSR,1949,8,29\nUK,1952,10,3\n");
        let mut cache = DatasetCache::new(a.path());
        let _ = cache.get_or_load();

        cache.set_source(b.path());
        assert!(!cache.is_loaded());
        let (table, _) = cache.get_or_load();

        assert_eq!(table.len(), 2);
        assert_eq!(cache.source(), b.path());
        assert_eq!(cache.load_count(), 2);
    }
}
