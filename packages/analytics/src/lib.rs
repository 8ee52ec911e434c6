#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Aggregation of raw arrest records into map-ready location groups.
//!
//! [`aggregate`] walks the records in input order, resolves each arrest
//! location against the geocode table, groups people by their coordinate
//! rounded to four decimal places, and folds every record into the global
//! [`Stats`](arrest_map_arrest_models::Stats). [`filter`] then narrows the
//! groups to a single crime category on request.

pub mod filter;
pub mod stats;

use std::collections::BTreeMap;

use arrest_map_arrest_models::{Dataset, LocationGroup, Person};
use arrest_map_geocoder::GeocodeTable;
use arrest_map_source::parsing::{derive_record_id, mugshot_url, parse_age, parse_pseudo_list};
use arrest_map_source::{RawRecord, columns, field};

pub use filter::filter_by_category;

use crate::stats::{StatsAccumulator, StatsInput};

/// Builds a [`Person`] from one raw record.
///
/// `index` is the record's position in the input, used to derive an ID when
/// the record has none.
#[must_use]
pub fn person_from_record(record: &RawRecord, index: usize) -> Person {
    let id = match field(record, columns::ID).trim() {
        "" => derive_record_id(field(record, columns::PICTURE), index),
        id => id.to_owned(),
    };

    Person {
        id,
        name: field(record, columns::NAME).to_owned(),
        country: field(record, columns::COUNTRY).to_owned(),
        convictions: parse_pseudo_list(field(record, columns::CONVICTED_OF)),
        categories: parse_pseudo_list(field(record, columns::CRIME_CATEGORIES)),
        gang: field(record, columns::GANG_AFFILIATION).to_owned(),
        mugshot: mugshot_url(field(record, columns::PICTURE_LOCAL)),
        age: parse_age(field(record, columns::AGE)),
        gender: field(record, columns::GENDER).to_owned(),
        race: field(record, columns::RACE).to_owned(),
        emotion: field(record, columns::EMOTION).to_owned(),
    }
}

/// Aggregates records into location groups, sorted categories, and
/// statistics.
///
/// Groups appear in the order their first record was seen, and a group's
/// display name is that first record's raw arrest location.
#[must_use]
pub fn aggregate(records: &[RawRecord], geocodes: &GeocodeTable) -> Dataset {
    let mut group_index: BTreeMap<String, usize> = BTreeMap::new();
    let mut locations: Vec<LocationGroup> = Vec::new();
    let mut acc = StatsAccumulator::default();
    let mut defaulted = 0usize;

    for (i, record) in records.iter().enumerate() {
        let arrested = field(record, columns::ARRESTED);
        let resolution = geocodes.resolve(arrested);
        if resolution.is_default() {
            defaulted += 1;
        }

        let person = person_from_record(record, i);

        acc.record(&StatsInput {
            gender: &person.gender,
            age: person.age,
            country: &person.country,
            gang: &person.gang,
            race: &person.race,
            categories: &person.categories,
        });

        let coordinate = resolution.coordinate();
        let key = coordinate.group_key();

        if let Some(&idx) = group_index.get(&key) {
            locations[idx].people.push(person);
        } else {
            let rounded = coordinate.rounded();
            group_index.insert(key, locations.len());
            locations.push(LocationGroup {
                lat: rounded.lat,
                lng: rounded.lng,
                location: arrested.to_owned(),
                people: vec![person],
            });
        }
    }

    let (stats, categories) = acc.finish();

    log::info!(
        "Aggregated {} records into {} locations \
         ({defaulted} at the default coordinate, {} categories)",
        records.len(),
        locations.len(),
        categories.len()
    );

    Dataset {
        locations,
        categories,
        stats,
    }
}
