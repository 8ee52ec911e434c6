//! Process-lifetime cache of the aggregated dataset.
//!
//! The dataset is computed at most once. Concurrent first callers of
//! [`DatasetCache::get_or_load`] wait on the same computation; a failed
//! load leaves the cache empty so the next caller retries.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use arrest_map_analytics::aggregate;
use arrest_map_arrest_models::Dataset;
use arrest_map_geocoder::{GeocodeError, GeocodeTable};
use arrest_map_source::{SourceError, load_records};
use tokio::sync::OnceCell;

/// Errors that can occur while building the dataset.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    /// The geocode table could not be loaded.
    #[error(transparent)]
    Geocode(#[from] GeocodeError),

    /// The arrest records could not be loaded.
    #[error("Failed to load arrest records: {0}")]
    Source(#[from] SourceError),

    /// The background load task panicked or was cancelled.
    #[error("Dataset load task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Loads both input files and aggregates them.
///
/// # Errors
///
/// Returns [`DataError`] if either file cannot be read or parsed.
pub fn load_dataset(geocode_path: &Path, records_path: &Path) -> Result<Dataset, DataError> {
    let geocodes = GeocodeTable::load(geocode_path)?;
    let records = load_records(records_path)?;
    Ok(aggregate(&records, &geocodes))
}

/// Single-flight holder of the aggregated [`Dataset`].
#[derive(Debug)]
pub struct DatasetCache {
    geocode_path: PathBuf,
    records_path: PathBuf,
    cell: OnceCell<Arc<Dataset>>,
}

impl DatasetCache {
    /// Creates an empty cache that loads from the given files on first use.
    #[must_use]
    pub fn new(geocode_path: impl Into<PathBuf>, records_path: impl Into<PathBuf>) -> Self {
        Self {
            geocode_path: geocode_path.into(),
            records_path: records_path.into(),
            cell: OnceCell::new(),
        }
    }

    /// Creates a cache already holding `dataset`.
    #[must_use]
    pub fn preloaded(dataset: Dataset) -> Self {
        Self {
            geocode_path: PathBuf::new(),
            records_path: PathBuf::new(),
            cell: OnceCell::from(Arc::new(dataset)),
        }
    }

    /// Whether the dataset has been computed.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.cell.initialized()
    }

    /// Returns the dataset, computing it on the first call.
    ///
    /// The load runs on the blocking thread pool.
    ///
    /// # Errors
    ///
    /// Returns [`DataError`] if the dataset cannot be built.
    pub async fn get_or_load(&self) -> Result<Arc<Dataset>, DataError> {
        self.cell
            .get_or_try_init(|| async {
                let geocode_path = self.geocode_path.clone();
                let records_path = self.records_path.clone();

                log::info!(
                    "Building dataset from {} and {}",
                    geocode_path.display(),
                    records_path.display()
                );

                let dataset = tokio::task::spawn_blocking(move || {
                    load_dataset(&geocode_path, &records_path)
                })
                .await??;

                Ok::<_, DataError>(Arc::new(dataset))
            })
            .await
            .cloned()
    }
}
