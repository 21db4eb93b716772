//! # Report Orchestration
//!
//! Drives one surf report end to end:
//!
//! 1. Resolve the spot to its buoy and tide station
//! 2. Fan out three independent fetches on one shared client:
//!    - weather table → parse → nearest record
//!    - wave table → parse → nearest record
//!    - tide predictions (target ± 1 day) → interpolate
//! 3. Fan in, merge weather and wave rows into a [`ConditionReport`]
//!
//! The first failing fetch aborts the report and drops its siblings; there is
//! no partial result.

use crate::conditions::ConditionReport;
use crate::config::{Config, SourcesConfig, TideClock};
use crate::error::SurfError;
use crate::fetch::{Fetch, HttpFetcher};
use crate::nearest::closest_record;
use crate::records::{Record, WaveRecord, WeatherRecord};
use crate::renderer::render_spot_report;
use crate::report::Report;
use crate::spots::resolve_spot;
use crate::tide_data::{tide_query, TideEstimate, TideReport};
use crate::time_input::now_in;
use chrono::{DateTime, NaiveDateTime, Utc};
use chrono_tz::Tz;
use rand::Rng;
use tracing::{debug, info, instrument};

/// URL of an NDBC realtime table for `station`.
pub fn table_url<R: Record>(sources: &SourcesConfig, station: &str) -> String {
    format!("{}{}.{}", sources.ndbc_base_url, station, R::EXTENSION)
}

/// Express `target` in the clock tide predictions were requested in.
///
/// Station-local predictions are assumed to share the reference timezone.
pub fn tide_clock_time(target: &DateTime<Tz>, clock: TideClock) -> NaiveDateTime {
    match clock {
        TideClock::Gmt => target.naive_utc(),
        TideClock::StationLocal => target.naive_local(),
    }
}

/// Fetch one NDBC table and return its row nearest to `target`.
#[instrument(skip(fetcher, sources), fields(kind = R::KIND))]
pub async fn fetch_nearest_record<R, F>(
    fetcher: &F,
    sources: &SourcesConfig,
    station: &str,
    target: DateTime<Utc>,
) -> Result<R, SurfError>
where
    R: Record + Clone,
    F: Fetch,
{
    let url = table_url::<R>(sources, station);
    info!("Fetching {} table: {}", R::KIND, url);
    let raw = fetcher.get_text(&url, &[]).await?;
    let report = Report::<R>::parse(&raw)?;
    let record = closest_record(&report.records, &target)?;
    debug!("Closest {} record is {}", R::KIND, record.time().instant());
    Ok(record.clone())
}

/// Fetch predictions around `target` and interpolate the tide at it.
#[instrument(skip(fetcher, sources))]
pub async fn fetch_tide_estimate<F: Fetch>(
    fetcher: &F,
    sources: &SourcesConfig,
    station: &str,
    target: NaiveDateTime,
) -> Result<TideEstimate, SurfError> {
    let query = tide_query(station, target, &sources.noaa_application, sources.tide_clock);
    info!("Sending request to NOAA for tide data");
    let body = fetcher.get_text(&sources.noaa_url, &query).await?;
    let report = TideReport::from_json(&sources.noaa_url, &body)?;
    debug!("Received {} tide predictions", report.predictions.len());
    report.estimate_at(target)
}

/// Conditions and tide for a spot at `target` (default: now in the
/// reference timezone), using the given fetcher.
#[instrument(skip(fetcher, config))]
pub async fn spot_conditions<F: Fetch>(
    fetcher: &F,
    config: &Config,
    spot_name: &str,
    target: Option<DateTime<Tz>>,
) -> Result<(ConditionReport, TideEstimate), SurfError> {
    let spot = resolve_spot(spot_name)?;
    let target = target.unwrap_or_else(|| now_in(config.report.tz()));
    let target_utc = target.with_timezone(&Utc);
    let tide_time = tide_clock_time(&target, config.sources.tide_clock);
    let sources = &config.sources;

    let (weather, waves, tide) = tokio::try_join!(
        fetch_nearest_record::<WeatherRecord, F>(
            fetcher,
            sources,
            spot.primary_buoy_id,
            target_utc,
        ),
        fetch_nearest_record::<WaveRecord, F>(fetcher, sources, spot.primary_buoy_id, target_utc),
        fetch_tide_estimate(fetcher, sources, spot.tide_station_id, tide_time),
    )?;

    Ok((ConditionReport::assemble(spot.primary_buoy_id, &weather, &waves), tide))
}

/// [`spot_conditions`] over a fresh HTTP client that lives only for this call.
pub async fn get_spot_data(
    config: &Config,
    spot_name: &str,
    target: Option<DateTime<Tz>>,
) -> Result<(ConditionReport, TideEstimate), SurfError> {
    let fetcher = HttpFetcher::new(config.sources.request_timeout())?;
    spot_conditions(&fetcher, config, spot_name, target).await
}

/// Spoken spot check for `spot_name` right now.
pub async fn prepare_spot_report<F: Fetch, R: Rng + ?Sized>(
    fetcher: &F,
    config: &Config,
    spot_name: &str,
    target: Option<DateTime<Tz>>,
    rng: &mut R,
) -> Result<String, SurfError> {
    let (conditions, tide) = spot_conditions(fetcher, config, spot_name, target).await?;
    Ok(render_spot_report(spot_name, &conditions, &tide, rng))
}
