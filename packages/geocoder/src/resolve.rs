//! Resolution of free-text arrest locations to coordinates.

use arrest_map_arrest_models::Coordinate;

use crate::{DEFAULT_COORDINATE, GeocodeTable};

/// How an arrest location was resolved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolution {
    /// The whole location text matched a table entry.
    Exact(Coordinate),
    /// A table entry's name contained, or was contained by, the location.
    Substring(Coordinate),
    /// Nothing matched; [`DEFAULT_COORDINATE`] was used.
    Default(Coordinate),
}

impl Resolution {
    /// The resolved coordinate, regardless of how it was found.
    #[must_use]
    pub const fn coordinate(&self) -> Coordinate {
        match self {
            Self::Exact(c) | Self::Substring(c) | Self::Default(c) => *c,
        }
    }

    /// Whether the default fallback was used.
    #[must_use]
    pub const fn is_default(&self) -> bool {
        matches!(self, Self::Default(_))
    }
}

impl GeocodeTable {
    /// Resolves an arrest location to a coordinate.
    ///
    /// Empty location text skips the substring scan since it would trivially
    /// be contained in every entry.
    #[must_use]
    pub fn resolve(&self, arrested: &str) -> Resolution {
        let key = arrested.trim().to_lowercase();

        if let Some(c) = self.get(&key) {
            return Resolution::Exact(c);
        }

        if !key.is_empty() {
            let found = self
                .iter()
                .find(|&(name, _)| key.contains(name) || name.contains(key.as_str()));

            if let Some((name, c)) = found {
                log::debug!("Resolved '{arrested}' by substring match on '{name}'");
                return Resolution::Substring(c);
            }
        }

        log::debug!("No geocode for '{arrested}', using default coordinate");
        Resolution::Default(DEFAULT_COORDINATE)
    }
}
