#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Arrest record loading and field parsing.
//!
//! Records are read from a delimited table ([`csv_file`]) or from the
//! scraper's JSON dump ([`json_file`]) into [`RawRecord`] maps keyed by the
//! column names in [`columns`]. Semi-structured fields inside those records
//! are decoded by [`parsing`].

pub mod csv_file;
pub mod json_file;
pub mod parsing;

use std::collections::BTreeMap;
use std::path::Path;

/// One row of the source table: column name to raw string value.
pub type RawRecord = BTreeMap<String, String>;

/// Column names recognized in arrest record tables.
///
/// Nested demographic fields use dotted paths, the same names a flattened
/// `DEEPFACE` object produces.
pub mod columns {
    /// Record identifier.
    pub const ID: &str = "ID";
    /// Full name.
    pub const NAME: &str = "NAME";
    /// Country of citizenship.
    pub const COUNTRY: &str = "COUNTRY";
    /// Free-text arrest location.
    pub const ARRESTED: &str = "ARRESTED";
    /// Pseudo-list of crime categories.
    pub const CRIME_CATEGORIES: &str = "CRIME_CATEGORIES";
    /// Pseudo-list of convictions.
    pub const CONVICTED_OF: &str = "CONVICTED_OF";
    /// Gang affiliation.
    pub const GANG_AFFILIATION: &str = "GANG_AFFILIATION";
    /// Remote mugshot URL.
    pub const PICTURE: &str = "PICTURE";
    /// Local mugshot file path.
    pub const PICTURE_LOCAL: &str = "PICTURE_LOCAL";
    /// Estimated age.
    pub const AGE: &str = "DEEPFACE.age";
    /// Dominant gender label.
    pub const GENDER: &str = "DEEPFACE.gender.dominant";
    /// Dominant race label.
    pub const RACE: &str = "DEEPFACE.race.dominant";
    /// Dominant emotion label.
    pub const EMOTION: &str = "DEEPFACE.emotion.dominant";
}

/// Errors that can occur while loading arrest records.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// I/O error (file read).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The file parsed but does not have the expected shape.
    #[error("Format error: {message}")]
    Format {
        /// Description of what went wrong.
        message: String,
    },
}

/// Returns the value of `column` in `record`, or `""` when absent.
#[must_use]
pub fn field<'a>(record: &'a RawRecord, column: &str) -> &'a str {
    record.get(column).map_or("", String::as_str)
}

/// Loads arrest records from `path`, choosing the parser by extension.
///
/// `.json` files are read as a JSON array of objects, `.tsv` files as
/// tab-delimited text, and everything else as comma-delimited text.
///
/// # Errors
///
/// Returns [`SourceError`] if the file cannot be opened or parsed.
pub fn load_records(path: &Path) -> Result<Vec<RawRecord>, SourceError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    let file = std::fs::File::open(path)?;
    let reader = std::io::BufReader::new(file);

    let records = match extension.as_deref() {
        Some("json") => json_file::parse_json(reader)?,
        Some("tsv") => csv_file::parse_csv(reader, b'\t')?,
        _ => csv_file::parse_csv(reader, b',')?,
    };

    log::info!("Loaded {} records from {}", records.len(), path.display());

    Ok(records)
}
