//! JSON record parser for the scraper's `mugshots.json` dump.
//!
//! The dump is an array of objects, some with a nested `DEEPFACE` object.
//! Each object is flattened into a [`RawRecord`] using dotted keys
//! (`DEEPFACE.gender.dominant`) so it can be consumed exactly like a row of
//! the delimited table.

use std::io::Read;

use serde_json::Value;

use crate::{RawRecord, SourceError};

/// Parses a JSON array of record objects.
///
/// Nested objects flatten to dotted keys, arrays are kept as their JSON list
/// text (readable by [`crate::parsing::parse_pseudo_list`]), `null` becomes
/// the empty string, and other scalars become their display text.
///
/// # Errors
///
/// Returns [`SourceError::Json`] if the input is not valid JSON, or
/// [`SourceError::Format`] if it is not an array of objects.
pub fn parse_json<R: Read>(reader: R) -> Result<Vec<RawRecord>, SourceError> {
    let value: Value = serde_json::from_reader(reader)?;

    let Value::Array(items) = value else {
        return Err(SourceError::Format {
            message: "expected a top-level JSON array of records".to_owned(),
        });
    };

    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| match item {
            Value::Object(map) => {
                let mut record = RawRecord::new();
                for (key, value) in map {
                    flatten_into(&mut record, key, value);
                }
                Ok(record)
            }
            other => Err(SourceError::Format {
                message: format!("record {i} is not a JSON object: {other}"),
            }),
        })
        .collect()
}

fn flatten_into(record: &mut RawRecord, key: String, value: Value) {
    match value {
        Value::Object(map) => {
            for (child, value) in map {
                flatten_into(record, format!("{key}.{child}"), value);
            }
        }
        Value::Null => {
            record.insert(key, String::new());
        }
        Value::String(s) => {
            record.insert(key, s);
        }
        other @ (Value::Array(_) | Value::Bool(_) | Value::Number(_)) => {
            record.insert(key, other.to_string());
        }
    }
}
