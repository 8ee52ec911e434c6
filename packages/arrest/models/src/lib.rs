#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Person, location group, and summary statistics types for the arrest map.
//!
//! These are the derived shapes produced by aggregating raw arrest records
//! and served verbatim as JSON by the API. Field names serialize in
//! `camelCase` to match what the map front-end consumes.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Sentinel served in place of the average age when no record carried a
/// parseable age.
pub const AVG_AGE_UNAVAILABLE: &str = "N/A";

/// A WGS84 latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude in decimal degrees.
    pub lat: f64,
    /// Longitude in decimal degrees.
    pub lng: f64,
}

impl Coordinate {
    /// Creates a new coordinate.
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Returns the grouping key for this coordinate: both components
    /// formatted as fixed-point with four decimal places.
    ///
    /// Values that round to zero always format as `0.0000`, never
    /// `-0.0000`.
    #[must_use]
    pub fn group_key(&self) -> String {
        let rounded = self.rounded();
        format!("{:.4},{:.4}", rounded.lat, rounded.lng)
    }

    /// Returns this coordinate rounded to four decimal places.
    #[must_use]
    pub fn rounded(&self) -> Self {
        Self {
            lat: round4(self.lat),
            lng: round4(self.lng),
        }
    }
}

fn round4(value: f64) -> f64 {
    // Round-trips through the same fixed-point text as `group_key` so the
    // served coordinate always agrees with the key it was grouped under.
    let rounded: f64 = format!("{value:.4}").parse().unwrap_or(value);
    if rounded == 0.0 { 0.0 } else { rounded }
}

/// Gender labels that are tallied in [`Stats::genders`].
///
/// Any other value in the source data is carried on the [`Person`] but not
/// counted.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum Gender {
    /// Labelled `Man` in the source data.
    Man,
    /// Labelled `Woman` in the source data.
    Woman,
}

/// A single arrested person as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    /// Record identifier.
    pub id: String,
    /// Full name.
    pub name: String,
    /// Country of citizenship.
    pub country: String,
    /// Offenses the person was convicted of, in source order.
    pub convictions: Vec<String>,
    /// Crime categories, in source order.
    pub categories: Vec<String>,
    /// Gang affiliation, empty when none.
    pub gang: String,
    /// URL path of the mugshot image, empty when there is none.
    pub mugshot: String,
    /// Estimated age.
    pub age: Option<f64>,
    /// Estimated gender label, empty when unknown.
    pub gender: String,
    /// Estimated race label, empty when unknown.
    pub race: String,
    /// Estimated dominant emotion, empty when unknown.
    pub emotion: String,
}

impl Person {
    /// Whether this person carries exactly `category` among their categories.
    #[must_use]
    pub fn has_category(&self, category: &str) -> bool {
        self.categories.iter().any(|c| c == category)
    }
}

/// All people whose arrest location resolved to the same rounded coordinate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationGroup {
    /// Latitude rounded to four decimal places.
    pub lat: f64,
    /// Longitude rounded to four decimal places.
    pub lng: f64,
    /// Raw arrest-location text of the first record that created the group.
    pub location: String,
    /// People arrested at this location, in input order.
    pub people: Vec<Person>,
}

/// A label with its occurrence count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NameCount {
    /// The counted label (country, gang, category, race).
    pub name: String,
    /// Number of records carrying the label.
    pub count: u64,
}

/// Tally of the recognized gender labels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenderCounts {
    /// Records labelled `Man`.
    #[serde(rename = "Man")]
    pub man: u64,
    /// Records labelled `Woman`.
    #[serde(rename = "Woman")]
    pub woman: u64,
}

impl GenderCounts {
    /// Increments the tally for `gender`.
    pub const fn record(&mut self, gender: Gender) {
        match gender {
            Gender::Man => self.man += 1,
            Gender::Woman => self.woman += 1,
        }
    }
}

/// Global summary statistics over every loaded record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    /// Total number of records.
    pub total: u64,
    /// Counts of the recognized gender labels.
    pub genders: GenderCounts,
    /// Mean age to one decimal place, or [`AVG_AGE_UNAVAILABLE`].
    pub avg_age: String,
    /// Most frequent countries, count descending (at most 20).
    pub top_countries: Vec<NameCount>,
    /// Most frequent gang affiliations, count descending (at most 15).
    pub top_gangs: Vec<NameCount>,
    /// Every category with its count, count descending.
    pub category_counts: Vec<NameCount>,
    /// Every race label with its count, count descending.
    pub race_distribution: Vec<NameCount>,
}

/// The fully aggregated dataset served by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    /// Location groups in first-seen order.
    pub locations: Vec<LocationGroup>,
    /// Distinct categories, sorted lexicographically.
    pub categories: Vec<String>,
    /// Global statistics.
    pub stats: Stats,
}

impl Dataset {
    /// Total number of people across all location groups.
    #[must_use]
    pub fn people_count(&self) -> usize {
        self.locations.iter().map(|g| g.people.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_key_is_fixed_point() {
        let c = Coordinate::new(39.8, -89.6);
        assert_eq!(c.group_key(), "39.8000,-89.6000");

        let tiny = Coordinate::new(0.000_01, 1e-7);
        assert_eq!(tiny.group_key(), "0.0000,0.0000");
    }

    #[test]
    fn values_rounding_to_zero_share_a_key() {
        let positive = Coordinate::new(0.000_01, 10.0);
        let negative = Coordinate::new(-0.000_01, 10.0);
        assert_eq!(positive.group_key(), "0.0000,10.0000");
        assert_eq!(negative.group_key(), positive.group_key());
        assert!(negative.rounded().lat.is_sign_positive());
    }

    #[test]
    fn rounded_matches_group_key() {
        let c = Coordinate::new(40.712_84, -74.006_06).rounded();
        assert!((c.lat - 40.7128).abs() < f64::EPSILON);
        assert!((c.lng - -74.0061).abs() < f64::EPSILON);
    }

    #[test]
    fn gender_parses_exact_labels_only() {
        assert_eq!("Man".parse::<Gender>().ok(), Some(Gender::Man));
        assert_eq!("Woman".parse::<Gender>().ok(), Some(Gender::Woman));
        assert!("man".parse::<Gender>().is_err());
        assert!("".parse::<Gender>().is_err());
    }

    #[test]
    fn stats_serializes_camel_case() {
        let mut genders = GenderCounts::default();
        genders.record(Gender::Woman);
        let stats = Stats {
            total: 1,
            genders,
            avg_age: AVG_AGE_UNAVAILABLE.to_string(),
            top_countries: Vec::new(),
            top_gangs: Vec::new(),
            category_counts: Vec::new(),
            race_distribution: Vec::new(),
        };

        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["avgAge"], "N/A");
        assert_eq!(json["genders"]["Woman"], 1);
        assert_eq!(json["genders"]["Man"], 0);
        assert!(json["topCountries"].is_array());
        assert!(json["raceDistribution"].is_array());
    }
}
