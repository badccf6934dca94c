use chrono::Weekday;
use serde::de::{self, Deserializer};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use crate::error::{Error, ErrorKind, Result};
use crate::month;
use crate::selection::Years;

const CONFIG_PATH_ENV_VAR: &str = "DAYGRID_CONFIG_FILE";

pub(crate) fn find_configfile_locations() -> Vec<PathBuf> {
    let mut locations = Vec::new();

    if let Ok(path) = env::var(CONFIG_PATH_ENV_VAR) {
        locations.push(PathBuf::from(path));
    }

    if let Some(dir) = dirs::config_dir() {
        locations.push(dir.join("daygrid").join("config.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        locations.push(home.join(".daygrid.toml"));
    }

    locations
}

/// Loads the config from `path` if given, otherwise from the first existing
/// default location. Falls back to the defaults if there is none.
pub fn load_suitable_config(path: Option<&Path>) -> Result<Config> {
    if let Some(path) = path {
        return Config::from_file(path);
    }

    match find_configfile_locations()
        .into_iter()
        .find(|location| location.is_file())
    {
        Some(location) => Config::from_file(&location),
        None => {
            log::info!("No config file found, using defaults");
            Ok(Config::default())
        }
    }
}

fn deserialize_weekdays<'de, D>(deserializer: D) -> std::result::Result<Vec<Weekday>, D::Error>
where
    D: Deserializer<'de>,
{
    Vec::<String>::deserialize(deserializer)?
        .iter()
        .map(|name| {
            name.parse::<Weekday>()
                .map_err(|_| de::Error::custom(format!("'{}' is not a weekday", name)))
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Years offered by the year picker.
    pub years: Years,
    /// Days highlighted as weekend in the grid.
    #[serde(deserialize_with = "deserialize_weekdays")]
    pub weekend: Vec<Weekday>,
    /// Interval of the update tick in milliseconds.
    pub tick_rate: u64,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            years: Years::default(),
            weekend: vec![Weekday::Fri, Weekday::Sat],
            tick_rate: 500,
        }
    }
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Config> {
        log::info!("Loading config from '{}'", path.display());

        let content = fs::read_to_string(path).map_err(|e| {
            Error::from(e).with_msg(&format!("unable to read '{}'", path.display()))
        })?;
        content.parse()
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate)
    }

    fn validate(self) -> Result<Config> {
        if self.years.is_empty() {
            return Err(Error::new(
                ErrorKind::InvalidConfig,
                "'years' must list at least one year",
            ));
        }

        if let Some(year) = self.years.iter().find(|&year| !month::is_valid_year(year)) {
            return Err(Error::new(
                ErrorKind::InvalidConfig,
                &format!("{} is not a representable year", year),
            ));
        }

        if self.tick_rate == 0 {
            return Err(Error::new(
                ErrorKind::InvalidConfig,
                "'tick_rate' must be positive",
            ));
        }

        Ok(self)
    }
}

impl FromStr for Config {
    type Err = Error;

    fn from_str(s: &str) -> Result<Config> {
        toml::from_str::<Config>(s)?.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config: Config = "".parse().unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.years, Years::from(vec![2023, 2024, 2025]));
        assert_eq!(config.tick_rate(), Duration::from_millis(500));
    }

    #[test]
    fn full_config() {
        let config: Config = r#"
            years = [2024, 2025, 2026, 2027]
            weekend = ["Fri", "saturday"]
            tick_rate = 1000
        "#
        .parse()
        .unwrap();

        assert_eq!(config.years.len(), 4);
        assert_eq!(config.years.position(2026), Some(2));
        assert_eq!(config.weekend, vec![Weekday::Fri, Weekday::Sat]);
        assert_eq!(config.tick_rate(), Duration::from_secs(1));
    }

    #[test]
    fn bad_weekday() {
        let err = r#"weekend = ["Caturday"]"#.parse::<Config>().unwrap_err();
        assert!(matches!(err.kind, ErrorKind::ConfigParse));
    }

    #[test]
    fn unknown_key() {
        let err = "colour = true".parse::<Config>().unwrap_err();
        assert!(matches!(err.kind, ErrorKind::ConfigParse));
    }

    #[test]
    fn empty_years() {
        let err = "years = []".parse::<Config>().unwrap_err();
        assert!(matches!(err.kind, ErrorKind::InvalidConfig));
    }

    #[test]
    fn unrepresentable_year() {
        let err = "years = [2024, 999999]".parse::<Config>().unwrap_err();
        assert!(matches!(err.kind, ErrorKind::InvalidConfig));
    }

    #[test]
    fn missing_explicit_file() {
        let err = load_suitable_config(Some(Path::new("/nonexistent/daygrid.toml"))).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::IOError(_)));
    }
}
