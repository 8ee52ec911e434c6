//! Parsing of the `✓ <location>: (<lat>, <lng>)` geocode table format.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::LazyLock;

use arrest_map_arrest_models::Coordinate;
use regex::Regex;

use crate::GeocodeError;

/// Matches a successfully geocoded line. The name capture is greedy so a
/// location containing `:` splits at the last `: (`.
static GEOCODE_LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*✓\s*(.+):\s*\(\s*([^,()]+?)\s*,\s*([^,()]+?)\s*\)\s*$").expect("valid regex")
});

/// Case-insensitive mapping from location name to coordinate.
///
/// Keys are lowercased and trimmed. Iteration is alphabetical by key, which
/// fixes the order in which substring matches are tried.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeocodeTable {
    entries: BTreeMap<String, Coordinate>,
}

impl GeocodeTable {
    /// Parses geocode table text.
    ///
    /// Lines that do not match the `✓ <location>: (<lat>, <lng>)` shape, or
    /// whose numbers are not finite floats, are skipped. When a name occurs
    /// more than once the last occurrence wins.
    #[must_use]
    pub fn parse(content: &str) -> Self {
        let mut entries = BTreeMap::new();
        let mut skipped = 0usize;

        for line in content.lines() {
            let Some(caps) = GEOCODE_LINE_RE.captures(line) else {
                if !line.trim().is_empty() {
                    skipped += 1;
                }
                continue;
            };

            let name = caps[1].trim().to_lowercase();
            let lat = parse_finite(&caps[2]);
            let lng = parse_finite(&caps[3]);

            match (lat, lng) {
                (Some(lat), Some(lng)) if !name.is_empty() => {
                    entries.insert(name, Coordinate::new(lat, lng));
                }
                _ => {
                    log::debug!("Skipping geocode line with bad coordinates: {line}");
                    skipped += 1;
                }
            }
        }

        if entries.is_empty() {
            log::warn!("Geocode table contains no usable entries");
        } else {
            log::debug!(
                "Parsed {} geocode entries ({skipped} lines skipped)",
                entries.len()
            );
        }

        Self { entries }
    }

    /// Reads and parses the geocode table at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::Io`] if the file cannot be read.
    pub fn load(path: &Path) -> Result<Self, GeocodeError> {
        let content = std::fs::read_to_string(path).map_err(|source| GeocodeError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let table = Self::parse(&content);
        log::info!(
            "Loaded {} geocoded locations from {}",
            table.len(),
            path.display()
        );
        Ok(table)
    }

    /// Looks up `name` exactly, ignoring case and surrounding whitespace.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Coordinate> {
        self.entries.get(&name.trim().to_lowercase()).copied()
    }

    /// Number of distinct location names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates `(name, coordinate)` pairs in alphabetical name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Coordinate)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

fn parse_finite(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn parses_checkmark_lines() {
        let table = GeocodeTable::parse("✓ Springfield: (39.8, -89.6)\n");
        let c = table.get("springfield").unwrap();
        assert!((c.lat - 39.8).abs() < f64::EPSILON);
        assert!((c.lng - -89.6).abs() < f64::EPSILON);
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let table = GeocodeTable::parse("✓  New York, NY : (40.7128, -74.0060)");
        assert!(table.get("NEW YORK, NY").is_some());
        assert!(table.get("  new york, ny ").is_some());
    }

    #[test]
    fn ignores_non_matching_lines() {
        let content = "Geocoding 3 locations...\n\
                       ✗ Nowhere: not found\n\
                       ✓ Boston, MA: (42.3601, -71.0589)\n\
                       \n\
                       Done.";
        let table = GeocodeTable::parse(content);
        assert_eq!(table.len(), 1);
        assert!(table.get("boston, ma").is_some());
    }

    #[test]
    fn skips_unparseable_numbers() {
        let table = GeocodeTable::parse("✓ Atlantis: (abc, 12.0)\n✓ Mars: (NaN, 1.0)");
        assert!(table.is_empty());
    }

    #[test]
    fn name_may_contain_colon() {
        let table = GeocodeTable::parse("✓ Terminal: Gate 4: (33.94, -118.40)");
        assert!(table.get("terminal: gate 4").is_some());
    }

    #[test]
    fn last_duplicate_wins() {
        let table = GeocodeTable::parse("✓ Austin: (1.0, 2.0)\n✓ AUSTIN: (30.27, -97.74)");
        assert_eq!(table.len(), 1);
        let c = table.get("austin").unwrap();
        assert!((c.lat - 30.27).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_input_yields_empty_table() {
        assert!(GeocodeTable::parse("").is_empty());
        assert!(GeocodeTable::parse("no geocodes here").is_empty());
    }

    #[test]
    fn iterates_alphabetically() {
        let table = GeocodeTable::parse("✓ Zion: (1, 1)\n✓ Albany: (2, 2)\n✓ Miami: (3, 3)");
        let names: Vec<&str> = table.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["albany", "miami", "zion"]);
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "✓ Denver, CO: (39.7392, -104.9903)").unwrap();
        let table = GeocodeTable::load(file.path()).unwrap();
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = GeocodeTable::load(Path::new("/definitely/not/here.txt")).unwrap_err();
        assert!(matches!(err, GeocodeError::Io { .. }));
    }
}
