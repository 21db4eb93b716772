//! # Surf Report Core Library
//!
//! This library turns raw buoy and tide data into a spoken surf report. It pulls
//! from two independent public sources, lines both up on the instant the caller
//! asked about, and renders the result as text for a voice assistant.
//!
//! ## Data Sources
//!
//! ### NDBC buoys
//! The National Data Buoy Center publishes a rolling 45-day window of
//! observations per station as whitespace-delimited text tables:
//! - **`{station}.txt`**: standard meteorological data (wind, pressure, temperature)
//! - **`{station}.spec`**: spectral wave summary (swell and wind-wave components)
//!
//! Rows are UTC and newest first. Missing values are written as `MM`.
//!
//! ### NOAA CO-OPS tide predictions
//! Hourly tide-height predictions for a coastal station, returned as JSON.
//!
//! ## Data Flow
//! 1. **Resolve**: spot name → buoy and tide station ids ([`spots`])
//! 2. **Fetch**: weather table, wave table and tide predictions concurrently ([`orchestrator`])
//! 3. **Parse**: tables → typed records ([`report`]), JSON → predictions ([`tide_data`])
//! 4. **Align**: nearest record per table ([`nearest`]), interpolated tide ([`tide_data`])
//! 5. **Assemble**: weather + wave records → one [`conditions::ConditionReport`]
//! 6. **Render**: spoken text with SSML breaks ([`renderer`])
//!
//! ## Core Types
//!
//! The library root exports [`Measurement`], the value-plus-unit pair every
//! parsed table cell becomes.

use serde::{Deserialize, Serialize};
use std::fmt;

// Module declarations
pub mod conditions;
pub mod config;
pub mod error;
pub mod fetch;
pub mod log_entry;
pub mod nearest;
pub mod orchestrator;
pub mod records;
pub mod renderer;
pub mod report;
pub mod spots;
pub mod tide_data;
pub mod time_input;

#[cfg(test)]
mod tests;

pub use error::{ErrorKind, SurfError};

/// Unit code → spoken description, as printed in the second header row of
/// NDBC tables.
///
/// Codes not listed here describe as an empty string.
const UNIT_DESCRIPTIONS: &[(&str, &str)] = &[
    ("yr", "year"),
    ("mo", "month"),
    ("dy", "day"),
    ("hr", "hour"),
    ("mn", "minute"),
    ("m", "meters"),
    ("sec", "seconds"),
    ("degT", "degrees true"),
    ("m/s", "meters per second"),
    // expanded to "knots" by the renderer
    ("kts", "kts"),
    ("hPa", "hPa"),
    ("degC", "degrees celcius"),
    ("nmi", "nautical miles"),
    ("ft", "feet"),
    ("-", ""),
];

/// Spoken description of a unit code. Unknown codes yield `""`.
///
/// # Example
/// ```
/// use surf_report::unit_description;
///
/// assert_eq!(unit_description("m/s"), "meters per second");
/// assert_eq!(unit_description("furlongs"), "");
/// ```
pub fn unit_description(unit: &str) -> &'static str {
    UNIT_DESCRIPTIONS
        .iter()
        .find(|(code, _)| *code == unit)
        .map(|(_, description)| *description)
        .unwrap_or("")
}

/// A single table cell: the value exactly as the source wrote it, plus the
/// unit code of its column.
///
/// Values are kept as text because several NDBC columns are not numeric
/// (compass points like `WNW`, steepness classes like `AVERAGE`). Use
/// [`Measurement::as_f64`] for numeric columns.
///
/// A missing reading is never a `Measurement`; record fields are
/// `Option<Measurement>` and stay `None` for the `MM` sentinel.
///
/// # Example
/// ```
/// use surf_report::Measurement;
///
/// let wind = Measurement::new("175", "degT");
/// assert_eq!(wind.to_string(), "175 degrees true");
/// assert_eq!(wind.as_f64(), Some(175.0));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    /// Raw token from the data row
    pub value: String,
    /// Unit code from the unit row (`m/s`, `degT`, `-`, ...)
    pub unit: String,
}

impl Measurement {
    pub fn new(value: impl Into<String>, unit: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            unit: unit.into(),
        }
    }

    /// Numeric value, if the token parses as one.
    pub fn as_f64(&self) -> Option<f64> {
        self.value.parse().ok()
    }

    pub fn unit_description(&self) -> &'static str {
        unit_description(&self.unit)
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.unit_description() {
            "" => write!(f, "{}", self.value),
            description => write!(f, "{} {}", self.value, description),
        }
    }
}

#[cfg(test)]
mod measurement_tests {
    use super::*;

    #[test]
    fn test_known_units_expand() {
        assert_eq!(Measurement::new("3.5", "m/s").to_string(), "3.5 meters per second");
        assert_eq!(Measurement::new("1013.5", "hPa").to_string(), "1013.5 hPa");
        assert_eq!(Measurement::new("9.1", "sec").to_string(), "9.1 seconds");
        assert_eq!(Measurement::new("12", "kts").to_string(), "12 kts");
    }

    #[test]
    fn test_unknown_and_dash_units_render_bare_value() {
        assert_eq!(unit_description("parsecs"), "");
        assert_eq!(Measurement::new("7", "parsecs").to_string(), "7");
        assert_eq!(Measurement::new("WNW", "-").to_string(), "WNW");
    }

    #[test]
    fn test_non_numeric_value() {
        assert_eq!(Measurement::new("AVERAGE", "-").as_f64(), None);
        assert_eq!(Measurement::new("1.5", "m").as_f64(), Some(1.5));
    }
}
