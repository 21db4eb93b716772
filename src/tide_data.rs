//! # NOAA Tide Predictions and Interpolation
//!
//! This module parses hourly tide-height predictions from NOAA's CO-OPS data
//! API and estimates the tide at an arbitrary instant.
//!
//! ## Data Source
//!
//! ### NOAA CO-OPS data getter
//! - **URL**: https://api.tidesandcurrents.noaa.gov/api/prod/datagetter
//! - **Product**: `predictions` at `interval=h` (hourly), MLLW datum, feet
//! - **Window**: one day either side of the target, so both bracketing hours exist
//!
//! The API answers with:
//! ```json
//! { "predictions": [
//!     {"t": "2022-08-06 00:00", "v": "0.804"},
//!     {"t": "2022-08-06 01:00", "v": "1.213"}
//! ]}
//! ```
//! or, for a bad request, `{"error": {"message": "..."}}`.
//!
//! ## Interpolation Algorithm
//! Linear interpolation inside the hour containing the target:
//! ```text
//! height = h(hour) + (h(hour + 1) - h(hour)) * minute / 60
//! rate   = h(hour + 1) - h(hour)          (feet per hour)
//! ```
//! The hourly spacing is assumed, not checked: the bracket is simply the next
//! prediction in the list.

use crate::config::TideClock;
use crate::error::SurfError;
use chrono::{Duration, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Timestamp format of the `t` field
pub const PREDICTION_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Date format of the `begin_date` / `end_date` query parameters
const QUERY_DATE_FORMAT: &str = "%Y%m%d";

/// Query parameters that never change between requests
const STATIC_PARAMS: &[(&str, &str)] = &[
    ("product", "predictions"),
    ("datum", "MLLW"),
    ("units", "english"),
    ("interval", "h"),
    ("format", "json"),
];

/// One hourly prediction, in the clock the request asked for.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TidePrediction {
    pub time: NaiveDateTime,
    /// Height above MLLW in feet
    pub level: f64,
}

/// Hourly predictions in increasing time order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TideReport {
    pub predictions: Vec<TidePrediction>,
}

/// Tide height and trend at one instant.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TideEstimate {
    /// Feet above MLLW
    pub height: f64,
    /// Feet per hour; negative while the tide drops
    pub rate_of_change: f64,
}

/// Spoken direction of the tide.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TideDirection {
    GoingOut,
    ComingIn,
}

impl fmt::Display for TideDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TideDirection::GoingOut => f.write_str("going out"),
            TideDirection::ComingIn => f.write_str("coming in"),
        }
    }
}

impl TideEstimate {
    /// A slack tide (zero rate) counts as going out.
    pub fn direction(&self) -> TideDirection {
        if self.rate_of_change <= 0.0 {
            TideDirection::GoingOut
        } else {
            TideDirection::ComingIn
        }
    }
}

// -- Wire format --

#[derive(Debug, Deserialize)]
struct NoaaResponse {
    predictions: Option<Vec<RawPrediction>>,
    error: Option<NoaaError>,
}

#[derive(Debug, Deserialize)]
struct RawPrediction {
    t: String,
    v: String,
}

#[derive(Debug, Deserialize)]
struct NoaaError {
    message: String,
}

fn parse_prediction(raw: &RawPrediction) -> Result<TidePrediction, SurfError> {
    let time = NaiveDateTime::parse_from_str(raw.t.trim(), PREDICTION_TIME_FORMAT)
        .map_err(|e| SurfError::Parse(format!("tide time {:?}: {}", raw.t, e)))?;
    let level = raw
        .v
        .trim()
        .parse::<f64>()
        .map_err(|e| SurfError::Parse(format!("tide level {:?}: {}", raw.v, e)))?;
    Ok(TidePrediction { time, level })
}

/// Query parameters for the predictions window around `target`.
///
/// `target` must already be in the clock named by `clock`.
pub fn tide_query(
    station: &str,
    target: NaiveDateTime,
    application: &str,
    clock: TideClock,
) -> Vec<(&'static str, String)> {
    let begin = target - Duration::days(1);
    let end = target + Duration::days(1);

    let mut params: Vec<(&'static str, String)> = STATIC_PARAMS
        .iter()
        .map(|(key, value)| (*key, value.to_string()))
        .collect();
    params.push(("application", application.to_string()));
    params.push(("time_zone", clock.as_param().to_string()));
    params.push(("station", station.to_string()));
    params.push(("begin_date", begin.format(QUERY_DATE_FORMAT).to_string()));
    params.push(("end_date", end.format(QUERY_DATE_FORMAT).to_string()));
    params
}

impl TideReport {
    /// Parse a NOAA JSON body. `url` is only used in error messages.
    pub fn from_json(url: &str, body: &str) -> Result<Self, SurfError> {
        let response: NoaaResponse = serde_json::from_str(body).map_err(|source| SurfError::Json {
            url: url.to_string(),
            source,
        })?;

        if let Some(error) = response.error {
            return Err(SurfError::Upstream {
                url: url.to_string(),
                message: error.message,
            });
        }

        let raw = response.predictions.ok_or_else(|| SurfError::Upstream {
            url: url.to_string(),
            message: "response has no predictions".to_string(),
        })?;

        let predictions = raw.iter().map(parse_prediction).collect::<Result<Vec<_>, _>>()?;
        Ok(TideReport { predictions })
    }

    /// Interpolate the tide at `target`, given in the same clock as the
    /// predictions.
    ///
    /// Fails with `NotFound` when no prediction falls exactly on the start of
    /// the target's hour, or when that prediction is the last one.
    pub fn estimate_at(&self, target: NaiveDateTime) -> Result<TideEstimate, SurfError> {
        let hour_start = target
            .with_minute(0)
            .and_then(|t| t.with_second(0))
            .and_then(|t| t.with_nanosecond(0))
            .ok_or_else(|| SurfError::Parse(format!("cannot truncate {target} to the hour")))?;

        let index = self
            .predictions
            .iter()
            .position(|p| p.time == hour_start)
            .ok_or_else(|| SurfError::NotFound(format!("no hourly interval containing {target}")))?;

        let start = &self.predictions[index];
        let end = self.predictions.get(index + 1).ok_or_else(|| {
            SurfError::NotFound(format!("no prediction after {} to bracket {target}", start.time))
        })?;

        let tide_interval = end.level - start.level;
        let fraction = f64::from(target.minute()) / 60.0;

        Ok(TideEstimate {
            height: start.level + tide_interval * fraction,
            rate_of_change: tide_interval,
        })
    }
}
