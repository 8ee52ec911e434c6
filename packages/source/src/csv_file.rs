//! Delimited-text record parser.
//!
//! The first row names the columns. Every following row becomes a
//! [`RawRecord`] keyed by those names, with an empty string for any column
//! the row is too short to reach.

use std::io::Read;

use crate::{RawRecord, SourceError};

/// Parses delimited text into records.
///
/// Header names and values are trimmed. Rows may be shorter or longer than
/// the header; extra fields are ignored.
///
/// # Errors
///
/// Returns [`SourceError::Csv`] if the text is not valid delimited data, or
/// [`SourceError::Format`] if there is no header row.
pub fn parse_csv<R: Read>(reader: R, delimiter: u8) -> Result<Vec<RawRecord>, SourceError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().trim_start_matches('\u{feff}').to_owned())
        .collect();

    if headers.iter().all(String::is_empty) {
        return Err(SourceError::Format {
            message: "records file contains no header row".to_owned(),
        });
    }

    let mut records = Vec::new();

    for result in reader.records() {
        let row = result?;

        let record: RawRecord = headers
            .iter()
            .enumerate()
            .map(|(i, header)| (header.clone(), row.get(i).unwrap_or("").trim().to_owned()))
            .collect();
        records.push(record);
    }

    log::debug!(
        "Parsed {} rows across {} columns",
        records.len(),
        headers.len()
    );

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_rows_by_header() {
        let text = "ID,NAME,COUNTRY\n1,Ana,Mexico\n2,Li,China\n";
        let records = parse_csv(text.as_bytes(), b',').unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1]["NAME"], "Li");
        assert_eq!(records[1]["COUNTRY"], "China");
    }

    #[test]
    fn short_rows_fill_with_empty_strings() {
        let text = "ID,NAME,COUNTRY\n1,Ana\n";
        let records = parse_csv(text.as_bytes(), b',').unwrap();
        assert_eq!(records[0]["COUNTRY"], "");
    }

    #[test]
    fn keeps_quoted_pseudo_lists_intact() {
        let text = "ID,CRIME_CATEGORIES\n1,\"['Theft', 'Assault']\"\n";
        let records = parse_csv(text.as_bytes(), b',').unwrap();
        assert_eq!(records[0]["CRIME_CATEGORIES"], "['Theft', 'Assault']");
    }

    #[test]
    fn strips_byte_order_mark() {
        let text = "\u{feff}ID,NAME\n1,Ana\n";
        let records = parse_csv(text.as_bytes(), b',').unwrap();
        assert_eq!(records[0]["ID"], "1");
    }

    #[test]
    fn header_only_yields_no_records() {
        let records = parse_csv("ID,NAME\n".as_bytes(), b',').unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn empty_input_is_a_format_error() {
        let err = parse_csv("".as_bytes(), b',').unwrap_err();
        assert!(matches!(err, SourceError::Format { .. }));
    }

    #[test]
    fn invalid_utf8_is_a_csv_error() {
        let bytes: &[u8] = b"ID,NAME\n1,\xff\xfe\n";
        let err = parse_csv(bytes, b',').unwrap_err();
        assert!(matches!(err, SourceError::Csv(_)));
    }
}
