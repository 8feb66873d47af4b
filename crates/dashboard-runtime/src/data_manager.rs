//! Load-once data manager for the dashboard runtime.
//!
//! Wraps [`load_sales_records`] so the dataset is read from disk a single
//! time and then shared read-only behind an [`Arc`]. Callers use
//! [`DataManager::get_data`]; the first call loads, every later call returns
//! the same dataset.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use dashboard_core::error::Result;
use dashboard_core::models::SalesRecord;
use dashboard_data::analysis::DatasetOverview;
use dashboard_data::reader::load_sales_records;

// ── Dataset ───────────────────────────────────────────────────────────────────

/// The loaded sales records plus their selection-independent figures.
#[derive(Debug)]
pub struct Dataset {
    /// File the records were read from.
    pub source: PathBuf,
    /// Every record, in file order.
    pub records: Vec<SalesRecord>,
    /// Overall metrics, overall monthly series and category totals.
    pub overview: DatasetOverview,
    /// Wall-clock time spent reading and summarising the file.
    pub load_time: Duration,
}

impl Dataset {
    /// Build a dataset from records already in memory.
    pub fn from_records(source: impl Into<PathBuf>, records: Vec<SalesRecord>) -> Self {
        let start = Instant::now();
        let overview = DatasetOverview::compute(&records);
        Self {
            source: source.into(),
            records,
            overview,
            load_time: start.elapsed(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ── DataManager ───────────────────────────────────────────────────────────────

/// Load-once wrapper around the CSV data source.
///
/// # Example
/// ```no_run
/// use dashboard_runtime::data_manager::DataManager;
///
/// let mut mgr = DataManager::new("Superstore_Sales_utf8.csv");
/// if let Ok(dataset) = mgr.get_data() {
///     println!("records: {}", dataset.len());
/// }
/// ```
pub struct DataManager {
    /// CSV file to load.
    data_path: PathBuf,
    /// Dataset from the first successful load.
    cache: Option<Arc<Dataset>>,
    /// Human-readable description of the last load error.
    last_error: Option<String>,
}

impl DataManager {
    pub fn new(data_path: impl Into<PathBuf>) -> Self {
        Self {
            data_path: data_path.into(),
            cache: None,
            last_error: None,
        }
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Return the dataset, loading it on the first call.
    ///
    /// A failed load is not cached: the error is recorded in
    /// [`Self::last_error`] and returned, and the next call tries again.
    pub fn get_data(&mut self) -> Result<Arc<Dataset>> {
        if let Some(dataset) = &self.cache {
            tracing::debug!("returning cached dataset");
            return Ok(Arc::clone(dataset));
        }

        let start = Instant::now();
        match load_sales_records(&self.data_path) {
            Ok(records) => {
                let mut dataset = Dataset::from_records(&self.data_path, records);
                dataset.load_time = start.elapsed();
                tracing::info!(
                    records = dataset.len(),
                    path = %self.data_path.display(),
                    elapsed_ms = dataset.load_time.as_millis() as u64,
                    "dataset loaded"
                );
                let dataset = Arc::new(dataset);
                self.cache = Some(Arc::clone(&dataset));
                self.last_error = None;
                Ok(dataset)
            }
            Err(e) => {
                tracing::warn!(error = %e, path = %self.data_path.display(), "dataset load failed");
                self.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// `true` once a load has succeeded.
    pub fn is_loaded(&self) -> bool {
        self.cache.is_some()
    }

    pub fn data_path(&self) -> &Path {
        &self.data_path
    }

    /// Human-readable description of the last load error, or `None`.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
