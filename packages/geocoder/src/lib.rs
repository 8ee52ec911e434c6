#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Geocode table loading and arrest location resolution.
//!
//! Arrest locations are resolved against a pre-geocoded lookup table
//! produced offline, one `✓ <location>: (<lat>, <lng>)` line per place.
//! Resolution tries, in order:
//!
//! 1. **Exact**: case-insensitive match of the whole location text.
//! 2. **Substring**: the first table entry (alphabetical by name) whose
//!    name contains the location text or is contained by it.
//! 3. **Default**: [`DEFAULT_COORDINATE`], the continental-US centroid.
//!
//! Resolution never fails; unresolvable locations land on the default.

pub mod resolve;
pub mod table;

use arrest_map_arrest_models::Coordinate;
use thiserror::Error;

pub use resolve::Resolution;
pub use table::GeocodeTable;

/// Coordinate used for locations that match nothing in the geocode table
/// (the geographic centroid of the contiguous United States).
pub const DEFAULT_COORDINATE: Coordinate = Coordinate::new(39.8283, -98.5795);

/// Errors from loading a geocode table.
#[derive(Debug, Error)]
pub enum GeocodeError {
    /// The geocode file could not be read.
    #[error("Failed to read geocode table {path}: {source}")]
    Io {
        /// Path that failed to load.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}
