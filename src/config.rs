//! # Configuration Management
//!
//! This module handles loading and parsing configuration from the surf-config.toml file.
//! It covers the upstream data source endpoints, the HTTP timeout, and the
//! reference timezone used to interpret spoken times like "06:30".

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::{info, warn};

/// Default config file name, looked up in the working directory
pub const CONFIG_FILE: &str = "surf-config.toml";

/// Application configuration loaded from surf-config.toml
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Upstream data source configuration
    pub sources: SourcesConfig,
    /// Report rendering configuration
    pub report: ReportConfig,
}

/// Which clock NOAA should report tide prediction times in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub enum TideClock {
    /// UTC
    #[serde(rename = "gmt")]
    Gmt,
    /// Station local standard/daylight time
    #[serde(rename = "lst_ldt")]
    StationLocal,
}

impl TideClock {
    /// Value of the NOAA `time_zone` query parameter
    pub fn as_param(self) -> &'static str {
        match self {
            TideClock::Gmt => "gmt",
            TideClock::StationLocal => "lst_ldt",
        }
    }
}

/// Upstream endpoints and HTTP behaviour
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct SourcesConfig {
    /// Directory holding NDBC realtime tables; `{station}.txt` is appended
    pub ndbc_base_url: String,
    /// NOAA CO-OPS data getter endpoint
    pub noaa_url: String,
    /// Application name NOAA asks clients to identify with
    pub noaa_application: String,
    /// Clock for tide prediction timestamps
    pub tide_clock: TideClock,
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
}

/// Report rendering configuration
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct ReportConfig {
    /// IANA timezone for "now" and for spoken clock times
    pub timezone: String,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        SourcesConfig {
            ndbc_base_url: "https://www.ndbc.noaa.gov/data/realtime2/".to_string(),
            noaa_url: "https://api.tidesandcurrents.noaa.gov/api/prod/datagetter".to_string(),
            noaa_application: "NOS.COOPS.TAC.WL".to_string(),
            tide_clock: TideClock::Gmt,
            request_timeout_secs: 20,
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        ReportConfig {
            timezone: "America/Los_Angeles".to_string(),
        }
    }
}

impl SourcesConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl ReportConfig {
    /// Parsed reference timezone. An unknown name falls back to Pacific time.
    pub fn tz(&self) -> Tz {
        self.timezone.parse::<Tz>().unwrap_or_else(|_| {
            warn!("Unknown timezone {:?}, using America/Los_Angeles", self.timezone);
            chrono_tz::America::Los_Angeles
        })
    }
}

impl Config {
    /// Load configuration from surf-config.toml file
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load() -> Self {
        Self::load_from_path(CONFIG_FILE)
    }

    /// Load configuration from specified path
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Self {
        match fs::read_to_string(&path) {
            Ok(contents) => match toml::from_str::<Config>(&contents) {
                Ok(config) => {
                    info!("Loaded configuration from {}", path.as_ref().display());
                    config
                }
                Err(e) => {
                    warn!("Invalid config file format: {}", e);
                    warn!("Using default configuration");
                    Self::default()
                }
            },
            Err(_) => {
                info!("No config file found, using default configuration");
                Self::default()
            }
        }
    }

    /// Save current configuration to the given path
    pub fn save_to_path<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(&path, contents)?;
        info!("Configuration saved to {}", path.as_ref().display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.sources.ndbc_base_url, "https://www.ndbc.noaa.gov/data/realtime2/");
        assert_eq!(config.sources.tide_clock, TideClock::Gmt);
        assert_eq!(config.sources.request_timeout(), Duration::from_secs(20));
        assert_eq!(config.report.tz(), chrono_tz::America::Los_Angeles);
    }

    #[test]
    fn test_config_roundtrip() {
        let file = NamedTempFile::new().unwrap();
        let mut config = Config::default();
        config.sources.tide_clock = TideClock::StationLocal;
        config.report.timezone = "Pacific/Honolulu".to_string();
        config.save_to_path(file.path()).unwrap();

        let parsed = Config::load_from_path(file.path());
        assert_eq!(parsed.sources.tide_clock, TideClock::StationLocal);
        assert_eq!(parsed.report.tz(), chrono_tz::Pacific::Honolulu);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let parsed: Config = toml::from_str("[sources]\nrequest_timeout_secs = 5\n").unwrap();
        assert_eq!(parsed.sources.request_timeout_secs, 5);
        assert_eq!(parsed.sources.noaa_application, "NOS.COOPS.TAC.WL");
        assert_eq!(parsed.report.timezone, "America/Los_Angeles");
    }

    #[test]
    fn test_load_nonexistent_file() {
        let config = Config::load_from_path("/nonexistent/path");
        // Should fallback to default
        assert_eq!(config.sources.request_timeout_secs, 20);
    }

    #[test]
    fn test_unknown_timezone_falls_back() {
        let report = ReportConfig {
            timezone: "Mars/Olympus_Mons".to_string(),
        };
        assert_eq!(report.tz(), chrono_tz::America::Los_Angeles);
    }
}
