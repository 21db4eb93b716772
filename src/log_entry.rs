//! # Surf Diary Entries
//!
//! A log entry is write-once: the voice front end creates it, the pipeline
//! attaches the conditions and tide at the entry's own timestamp, and the
//! flattened record goes to a [`DiaryStore`]. Storage itself lives outside
//! this crate.

use crate::conditions::ConditionReport;
use crate::config::Config;
use crate::error::SurfError;
use crate::fetch::Fetch;
use crate::orchestrator::spot_conditions;
use crate::tide_data::TideEstimate;
use chrono::DateTime;
use chrono_tz::Tz;
use serde_json::{Map, Value};
use tracing::{info, instrument};

/// Format of the `entry_date` key
pub const ENTRY_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Flat key-value record as handed to the store
pub type DiaryRecord = Map<String, Value>;

/// Persistence collaborator, keyed by spot name and entry date.
pub trait DiaryStore {
    type Error: std::error::Error + Send + Sync + 'static;

    fn put(&mut self, record: DiaryRecord) -> Result<(), Self::Error>;

    /// Most recent record for `spot_name`, if any.
    fn latest(&self, spot_name: &str) -> Result<Option<DiaryRecord>, Self::Error>;
}

/// One logged session.
#[derive(Clone, Debug, PartialEq)]
pub struct LogEntry {
    pub entry_date: DateTime<Tz>,
    pub spot_name: String,
    pub rating: String,
    pub notes: String,
    pub conditions: Option<ConditionReport>,
    pub tide: Option<TideEstimate>,
}

impl LogEntry {
    pub fn new(
        entry_date: DateTime<Tz>,
        spot_name: impl Into<String>,
        rating: impl Into<String>,
        notes: impl Into<String>,
    ) -> Self {
        LogEntry {
            entry_date,
            spot_name: spot_name.into(),
            rating: rating.into(),
            notes: notes.into(),
            conditions: None,
            tide: None,
        }
    }

    /// Flatten into the store's record shape. Every condition field is
    /// present; unset readings are `null`.
    pub fn to_record(&self) -> Result<DiaryRecord, SurfError> {
        let mut record = DiaryRecord::new();
        record.insert(
            "entry_date".to_string(),
            Value::String(self.entry_date.format(ENTRY_DATE_FORMAT).to_string()),
        );
        record.insert("spot_name".to_string(), Value::String(self.spot_name.clone()));
        record.insert("rating".to_string(), Value::String(self.rating.clone()));
        record.insert("notes".to_string(), Value::String(self.notes.clone()));

        if let Some(conditions) = &self.conditions {
            let value =
                serde_json::to_value(conditions).map_err(|e| SurfError::Store(Box::new(e)))?;
            if let Value::Object(fields) = value {
                record.extend(fields);
            }
        }
        if let Some(tide) = &self.tide {
            record.insert("tide_height".to_string(), Value::from(tide.height));
            record.insert("tide_rate_of_change".to_string(), Value::from(tide.rate_of_change));
        }
        Ok(record)
    }
}

/// Enrich `entry` with conditions at its timestamp and persist it.
#[instrument(skip_all, fields(spot = %entry.spot_name))]
pub async fn submit_entry<F: Fetch, S: DiaryStore>(
    fetcher: &F,
    config: &Config,
    store: &mut S,
    mut entry: LogEntry,
) -> Result<DiaryRecord, SurfError> {
    info!("Grabbing external data...");
    let (conditions, tide) =
        spot_conditions(fetcher, config, &entry.spot_name, Some(entry.entry_date)).await?;
    entry.conditions = Some(conditions);
    entry.tide = Some(tide);

    let record = entry.to_record()?;
    info!("Persisting entry to the diary...");
    store
        .put(record.clone())
        .map_err(|e| SurfError::Store(Box::new(e)))?;
    Ok(record)
}

/// Most recent diary record for a spot.
pub fn latest_entry<S: DiaryStore>(
    store: &S,
    spot_name: &str,
) -> Result<Option<DiaryRecord>, SurfError> {
    store.latest(spot_name).map_err(|e| SurfError::Store(Box::new(e)))
}
