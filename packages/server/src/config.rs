//! Server configuration read from the environment.

use std::path::PathBuf;

/// Default bind address.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1";
/// Default listening port.
pub const DEFAULT_PORT: u16 = 8080;
/// Default geocode table path.
pub const DEFAULT_GEOCODE_PATH: &str = "data/geocoded_locations.txt";
/// Default arrest records path.
pub const DEFAULT_RECORDS_PATH: &str = "data/mugshots.csv";
/// Default directory of mugshot images served under `/mugshots`.
pub const DEFAULT_MUGSHOTS_DIR: &str = "data/mugshots";
/// Default directory of client assets served under `/static`.
pub const DEFAULT_STATIC_DIR: &str = "app/static";

/// Runtime configuration for [`crate::run_server`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address to bind (`BIND_ADDR`).
    pub bind_addr: String,
    /// Port to listen on (`PORT`).
    pub port: u16,
    /// Geocode table file (`GEOCODE_PATH`).
    pub geocode_path: PathBuf,
    /// Arrest records file (`RECORDS_PATH`).
    pub records_path: PathBuf,
    /// Mugshot image directory (`MUGSHOTS_DIR`).
    pub mugshots_dir: PathBuf,
    /// Client asset directory (`STATIC_DIR`).
    pub static_dir: PathBuf,
}

impl ServerConfig {
    /// Reads the configuration from process environment variables, falling
    /// back to the defaults for anything unset.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    ///
    /// An unparseable `PORT` falls back to [`DEFAULT_PORT`].
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let path = |key: &str, default: &str| {
            lookup(key).map_or_else(|| PathBuf::from(default), PathBuf::from)
        };

        Self {
            bind_addr: lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            geocode_path: path("GEOCODE_PATH", DEFAULT_GEOCODE_PATH),
            records_path: path("RECORDS_PATH", DEFAULT_RECORDS_PATH),
            mugshots_dir: path("MUGSHOTS_DIR", DEFAULT_MUGSHOTS_DIR),
            static_dir: path("STATIC_DIR", DEFAULT_STATIC_DIR),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn defaults_when_unset() {
        let config = ServerConfig::from_lookup(|_| None);
        assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR);
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.records_path, PathBuf::from(DEFAULT_RECORDS_PATH));
        assert_eq!(config.static_dir, PathBuf::from(DEFAULT_STATIC_DIR));
    }

    #[test]
    fn reads_overrides() {
        let vars: BTreeMap<&str, &str> = [
            ("PORT", "9000"),
            ("RECORDS_PATH", "/srv/arrests.json"),
            ("MUGSHOTS_DIR", "/srv/img"),
        ]
        .into_iter()
        .collect();
        let config = ServerConfig::from_lookup(|k| vars.get(k).map(|v| (*v).to_string()));

        assert_eq!(config.port, 9000);
        assert_eq!(config.records_path, PathBuf::from("/srv/arrests.json"));
        assert_eq!(config.mugshots_dir, PathBuf::from("/srv/img"));
        assert_eq!(config.geocode_path, PathBuf::from(DEFAULT_GEOCODE_PATH));
    }

    #[test]
    fn bad_port_falls_back() {
        let config = ServerConfig::from_lookup(|k| (k == "PORT").then(|| "http".to_string()));
        assert_eq!(config.port, DEFAULT_PORT);
    }
}
