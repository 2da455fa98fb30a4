// ⚙️ Configuration - file locations and dispatch timings
//
// Read from the environment (and an optional .env file). Every value has a
// default so a bare `enavroom` run works out of the box.

use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::locations::RouteTable;

pub const DEFAULT_LEDGER_FILE: &str = "bookings.json";
pub const DEFAULT_LOG_FILE: &str = "booking_log.txt";
pub const DEFAULT_TRACE_FILE: &str = "enavroom.trace.log";
pub const DEFAULT_ASSETS_DIR: &str = "enavroom_assets";
pub const DEFAULT_DISPATCH_DELAY_MS: u64 = 3000;
pub const DEFAULT_DRIVER_FOUND_DELAY_MS: u64 = 5000;

#[derive(Debug, Clone)]
pub struct Config {
    pub ledger_file: PathBuf,
    pub log_file: PathBuf,
    pub trace_file: PathBuf,
    pub assets_dir: PathBuf,

    /// Custom route table; the standard table is used when unset
    pub routes_file: Option<PathBuf>,

    /// Loading page → driver found
    pub dispatch_delay: Duration,

    /// Driver found → done
    pub driver_found_delay: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            ledger_file: PathBuf::from(DEFAULT_LEDGER_FILE),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            trace_file: PathBuf::from(DEFAULT_TRACE_FILE),
            assets_dir: default_assets_dir(),
            routes_file: None,
            dispatch_delay: Duration::from_millis(DEFAULT_DISPATCH_DELAY_MS),
            driver_found_delay: Duration::from_millis(DEFAULT_DRIVER_FOUND_DELAY_MS),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key → value source (the environment, or a map in tests)
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();
        let path = |key: &str, default: PathBuf| lookup(key).map(PathBuf::from).unwrap_or(default);

        Ok(Config {
            ledger_file: path("ENAVROOM_LEDGER_FILE", defaults.ledger_file),
            log_file: path("ENAVROOM_LOG_FILE", defaults.log_file),
            trace_file: path("ENAVROOM_TRACE_FILE", defaults.trace_file),
            assets_dir: path("ENAVROOM_ASSETS_DIR", defaults.assets_dir),
            routes_file: lookup("ENAVROOM_ROUTES_FILE").map(PathBuf::from),
            dispatch_delay: millis(&lookup, "ENAVROOM_DISPATCH_DELAY_MS", defaults.dispatch_delay)?,
            driver_found_delay: millis(
                &lookup,
                "ENAVROOM_DRIVER_FOUND_DELAY_MS",
                defaults.driver_found_delay,
            )?,
        })
    }

    pub fn route_table(&self) -> Result<RouteTable> {
        match &self.routes_file {
            Some(path) => RouteTable::from_file(path),
            None => Ok(RouteTable::standard()),
        }
    }
}

fn millis<F>(lookup: &F, key: &str, default: Duration) -> Result<Duration>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => {
            let ms: u64 = raw
                .trim()
                .parse()
                .with_context(|| {
                    format!("{} must be a number of milliseconds, got {:?}", key, raw)
                })?;
            Ok(Duration::from_millis(ms))
        }
        None => Ok(default),
    }
}

/// ~/enavroom_assets, or ./enavroom_assets when HOME is not set
fn default_assets_dir() -> PathBuf {
    env::var_os("HOME")
        .or_else(|| env::var_os("USERPROFILE"))
        .map(|home| PathBuf::from(home).join(DEFAULT_ASSETS_DIR))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_ASSETS_DIR))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();

        assert_eq!(config.ledger_file, PathBuf::from("bookings.json"));
        assert_eq!(config.log_file, PathBuf::from("booking_log.txt"));
        assert!(config.assets_dir.ends_with("enavroom_assets"));
        assert!(config.routes_file.is_none());
        assert_eq!(config.dispatch_delay, Duration::from_secs(3));
        assert_eq!(config.driver_found_delay, Duration::from_secs(5));
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("ENAVROOM_LEDGER_FILE", "/tmp/b.json"),
            ("ENAVROOM_DISPATCH_DELAY_MS", "10"),
            ("ENAVROOM_ROUTES_FILE", "routes.json"),
        ]))
        .unwrap();

        assert_eq!(config.ledger_file, PathBuf::from("/tmp/b.json"));
        assert_eq!(config.dispatch_delay, Duration::from_millis(10));
        assert_eq!(config.routes_file, Some(PathBuf::from("routes.json")));
    }

    #[test]
    fn test_bad_delay_is_an_error() {
        let result =
            Config::from_lookup(lookup_from(&[("ENAVROOM_DRIVER_FOUND_DELAY_MS", "soon")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_standard_routes_without_file() {
        let config = Config::default();
        assert_eq!(config.route_table().unwrap().len(), 21);
    }
}
