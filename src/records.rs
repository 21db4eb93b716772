//! # NDBC Record Schemas
//!
//! Typed rows for the two NDBC realtime tables this crate reads:
//!
//! | Table   | Extension | Record            |
//! |---------|-----------|-------------------|
//! | weather | `.txt`    | [`WeatherRecord`] |
//! | waves   | `.spec`   | [`WaveRecord`]    |
//!
//! Column headers are mapped to [`Column`] tags once, and each schema decides
//! through an explicit `match` which tags it carries. Columns a schema does
//! not know are dropped by the parser.
//!
//! For column meanings see <https://www.ndbc.noaa.gov/measdes.shtml>.

use crate::Measurement;
use chrono::{DateTime, Datelike, NaiveDate, Timelike, Utc};
use serde::{Deserialize, Serialize};

/// One of the five leading timestamp columns (`YY MM DD hh mm`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimePart {
    Year,
    Month,
    Day,
    Hour,
    Minute,
}

/// A data column that carries a measurement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Column {
    /// Wind direction
    Wdir,
    /// Wind speed
    Wspd,
    /// Peak gust speed
    Gst,
    /// Significant wave height
    Wvht,
    /// Dominant wave period
    Dpd,
    /// Average wave period
    Apd,
    /// Mean wave direction at the dominant period
    Mwd,
    /// Sea level pressure
    Pres,
    /// Air temperature
    Atmp,
    /// Sea surface temperature
    Wtmp,
    /// Dewpoint temperature
    Dewp,
    /// Station visibility
    Vis,
    /// Pressure tendency
    Ptdy,
    /// Water level
    Tide,
    Wspd10m,
    Wspd20m,
    /// Swell height
    SwH,
    /// Swell period
    SwP,
    /// Wind wave height
    Wwh,
    /// Wind wave period
    Wwp,
    /// Swell direction
    SwD,
    /// Wind wave direction
    Wwd,
    /// Steepness class (`SWELL`, `AVERAGE`, `STEEP`, `VERY_STEEP`)
    Steepness,
}

impl Column {
    /// Header name as printed by NDBC.
    pub fn name(self) -> &'static str {
        match self {
            Column::Wdir => "WDIR",
            Column::Wspd => "WSPD",
            Column::Gst => "GST",
            Column::Wvht => "WVHT",
            Column::Dpd => "DPD",
            Column::Apd => "APD",
            Column::Mwd => "MWD",
            Column::Pres => "PRES",
            Column::Atmp => "ATMP",
            Column::Wtmp => "WTMP",
            Column::Dewp => "DEWP",
            Column::Vis => "VIS",
            Column::Ptdy => "PTDY",
            Column::Tide => "TIDE",
            Column::Wspd10m => "WSPD10M",
            Column::Wspd20m => "WSPD20M",
            Column::SwH => "SwH",
            Column::SwP => "SwP",
            Column::Wwh => "WWH",
            Column::Wwp => "WWP",
            Column::SwD => "SwD",
            Column::Wwd => "WWD",
            Column::Steepness => "STEEPNESS",
        }
    }

    /// Whether values must parse as a number. Directions in the wave table
    /// are compass points (`WNW`) even where the unit row says `degT`.
    pub fn is_numeric(self) -> bool {
        !matches!(self, Column::SwD | Column::Wwd | Column::Steepness)
    }
}

/// Classification of a single header token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeaderField {
    Time(TimePart),
    Data(Column),
}

impl HeaderField {
    /// Map a header token to a field. Returns `None` for names this crate
    /// does not know, which the parser ignores.
    pub fn from_name(name: &str) -> Option<Self> {
        let field = match name {
            "YY" | "YYYY" => HeaderField::Time(TimePart::Year),
            "MM" => HeaderField::Time(TimePart::Month),
            "DD" => HeaderField::Time(TimePart::Day),
            "hh" => HeaderField::Time(TimePart::Hour),
            "mm" => HeaderField::Time(TimePart::Minute),
            "WDIR" | "WD" => HeaderField::Data(Column::Wdir),
            "WSPD" => HeaderField::Data(Column::Wspd),
            "GST" => HeaderField::Data(Column::Gst),
            "WVHT" => HeaderField::Data(Column::Wvht),
            "DPD" => HeaderField::Data(Column::Dpd),
            "APD" => HeaderField::Data(Column::Apd),
            "MWD" => HeaderField::Data(Column::Mwd),
            "PRES" | "BAR" => HeaderField::Data(Column::Pres),
            "ATMP" => HeaderField::Data(Column::Atmp),
            "WTMP" => HeaderField::Data(Column::Wtmp),
            "DEWP" => HeaderField::Data(Column::Dewp),
            "VIS" => HeaderField::Data(Column::Vis),
            "PTDY" => HeaderField::Data(Column::Ptdy),
            "TIDE" => HeaderField::Data(Column::Tide),
            "WSPD10M" => HeaderField::Data(Column::Wspd10m),
            "WSPD20M" => HeaderField::Data(Column::Wspd20m),
            "SwH" => HeaderField::Data(Column::SwH),
            "SwP" => HeaderField::Data(Column::SwP),
            "WWH" => HeaderField::Data(Column::Wwh),
            "WWP" => HeaderField::Data(Column::Wwp),
            "SwD" => HeaderField::Data(Column::SwD),
            "WWD" => HeaderField::Data(Column::Wwd),
            "STEEPNESS" => HeaderField::Data(Column::Steepness),
            _ => return None,
        };
        Some(field)
    }
}

/// Observation time of a row. NDBC timestamps are always UTC.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RecordTime(DateTime<Utc>);

impl RecordTime {
    /// Build from calendar parts; `None` if they do not form a valid instant.
    /// Two-digit years (old NDBC files) are taken as 20xx.
    pub fn from_parts(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> Option<Self> {
        let year = if year < 100 { year + 2000 } else { year };
        let naive = NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(hour, minute, 0)?;
        Some(RecordTime(naive.and_utc()))
    }

    pub fn instant(&self) -> DateTime<Utc> {
        self.0
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    pub fn minute(&self) -> u32 {
        self.0.minute()
    }
}

/// Shared behaviour of the per-table row schemas.
pub trait Record: Sized {
    /// Short table name used in logs and URLs (`weather`, `waves`)
    const KIND: &'static str;

    /// File extension of the NDBC realtime table holding this schema
    const EXTENSION: &'static str;

    fn new(time: RecordTime) -> Self;

    fn time(&self) -> RecordTime;

    /// Slot for `column`, or `None` if this schema has no such column.
    fn slot_mut(&mut self, column: Column) -> Option<&mut Option<Measurement>>;

    /// Value of `column`, if the schema has it and the row had a reading.
    fn get(&self, column: Column) -> Option<&Measurement>;

    /// Store a reading. Returns `false` when the schema lacks the column.
    fn set(&mut self, column: Column, measurement: Measurement) -> bool {
        match self.slot_mut(column) {
            Some(slot) => {
                *slot = Some(measurement);
                true
            }
            None => false,
        }
    }
}

/// Row of a standard meteorological (`.txt`) table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WeatherRecord {
    pub time: RecordTime,
    pub wdir: Option<Measurement>,
    pub wspd: Option<Measurement>,
    pub gst: Option<Measurement>,
    pub wvht: Option<Measurement>,
    pub dpd: Option<Measurement>,
    pub apd: Option<Measurement>,
    pub mwd: Option<Measurement>,
    pub pres: Option<Measurement>,
    pub atmp: Option<Measurement>,
    pub wtmp: Option<Measurement>,
    pub dewp: Option<Measurement>,
    pub vis: Option<Measurement>,
    pub ptdy: Option<Measurement>,
    pub tide: Option<Measurement>,
}

impl Record for WeatherRecord {
    const KIND: &'static str = "weather";
    const EXTENSION: &'static str = "txt";

    fn new(time: RecordTime) -> Self {
        WeatherRecord {
            time,
            wdir: None,
            wspd: None,
            gst: None,
            wvht: None,
            dpd: None,
            apd: None,
            mwd: None,
            pres: None,
            atmp: None,
            wtmp: None,
            dewp: None,
            vis: None,
            ptdy: None,
            tide: None,
        }
    }

    fn time(&self) -> RecordTime {
        self.time
    }

    fn slot_mut(&mut self, column: Column) -> Option<&mut Option<Measurement>> {
        match column {
            Column::Wdir => Some(&mut self.wdir),
            Column::Wspd => Some(&mut self.wspd),
            Column::Gst => Some(&mut self.gst),
            Column::Wvht => Some(&mut self.wvht),
            Column::Dpd => Some(&mut self.dpd),
            Column::Apd => Some(&mut self.apd),
            Column::Mwd => Some(&mut self.mwd),
            Column::Pres => Some(&mut self.pres),
            Column::Atmp => Some(&mut self.atmp),
            Column::Wtmp => Some(&mut self.wtmp),
            Column::Dewp => Some(&mut self.dewp),
            Column::Vis => Some(&mut self.vis),
            Column::Ptdy => Some(&mut self.ptdy),
            Column::Tide => Some(&mut self.tide),
            _ => None,
        }
    }

    fn get(&self, column: Column) -> Option<&Measurement> {
        match column {
            Column::Wdir => self.wdir.as_ref(),
            Column::Wspd => self.wspd.as_ref(),
            Column::Gst => self.gst.as_ref(),
            Column::Wvht => self.wvht.as_ref(),
            Column::Dpd => self.dpd.as_ref(),
            Column::Apd => self.apd.as_ref(),
            Column::Mwd => self.mwd.as_ref(),
            Column::Pres => self.pres.as_ref(),
            Column::Atmp => self.atmp.as_ref(),
            Column::Wtmp => self.wtmp.as_ref(),
            Column::Dewp => self.dewp.as_ref(),
            Column::Vis => self.vis.as_ref(),
            Column::Ptdy => self.ptdy.as_ref(),
            Column::Tide => self.tide.as_ref(),
            _ => None,
        }
    }
}

/// Row of a spectral wave summary (`.spec`) table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WaveRecord {
    pub time: RecordTime,
    pub wvht: Option<Measurement>,
    pub swh: Option<Measurement>,
    pub swp: Option<Measurement>,
    pub wwh: Option<Measurement>,
    pub wwp: Option<Measurement>,
    pub swd: Option<Measurement>,
    pub wwd: Option<Measurement>,
    pub steepness: Option<Measurement>,
    pub apd: Option<Measurement>,
    pub mwd: Option<Measurement>,
}

impl Record for WaveRecord {
    const KIND: &'static str = "waves";
    const EXTENSION: &'static str = "spec";

    fn new(time: RecordTime) -> Self {
        WaveRecord {
            time,
            wvht: None,
            swh: None,
            swp: None,
            wwh: None,
            wwp: None,
            swd: None,
            wwd: None,
            steepness: None,
            apd: None,
            mwd: None,
        }
    }

    fn time(&self) -> RecordTime {
        self.time
    }

    fn slot_mut(&mut self, column: Column) -> Option<&mut Option<Measurement>> {
        match column {
            Column::Wvht => Some(&mut self.wvht),
            Column::SwH => Some(&mut self.swh),
            Column::SwP => Some(&mut self.swp),
            Column::Wwh => Some(&mut self.wwh),
            Column::Wwp => Some(&mut self.wwp),
            Column::SwD => Some(&mut self.swd),
            Column::Wwd => Some(&mut self.wwd),
            Column::Steepness => Some(&mut self.steepness),
            Column::Apd => Some(&mut self.apd),
            Column::Mwd => Some(&mut self.mwd),
            _ => None,
        }
    }

    fn get(&self, column: Column) -> Option<&Measurement> {
        match column {
            Column::Wvht => self.wvht.as_ref(),
            Column::SwH => self.swh.as_ref(),
            Column::SwP => self.swp.as_ref(),
            Column::Wwh => self.wwh.as_ref(),
            Column::Wwp => self.wwp.as_ref(),
            Column::SwD => self.swd.as_ref(),
            Column::Wwd => self.wwd.as_ref(),
            Column::Steepness => self.steepness.as_ref(),
            Column::Apd => self.apd.as_ref(),
            Column::Mwd => self.mwd.as_ref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noon() -> RecordTime {
        RecordTime::from_parts(2022, 9, 4, 12, 0).unwrap()
    }

    #[test]
    fn test_header_names_roundtrip_through_column() {
        for name in ["WDIR", "SwH", "STEEPNESS", "WSPD10M", "TIDE"] {
            match HeaderField::from_name(name) {
                Some(HeaderField::Data(column)) => assert_eq!(column.name(), name),
                other => panic!("{name} mapped to {other:?}"),
            }
        }
        assert_eq!(HeaderField::from_name("hh"), Some(HeaderField::Time(TimePart::Hour)));
        assert_eq!(HeaderField::from_name("NEWCOL"), None);
    }

    #[test]
    fn test_schema_rejects_foreign_columns() {
        let mut weather = WeatherRecord::new(noon());
        assert!(!weather.set(Column::SwH, Measurement::new("1.5", "m")));
        assert!(weather.set(Column::Wdir, Measurement::new("175", "degT")));
        assert_eq!(weather.get(Column::Wdir).unwrap().value, "175");

        let mut waves = WaveRecord::new(noon());
        assert!(!waves.set(Column::Pres, Measurement::new("1013.5", "hPa")));
        assert!(waves.get(Column::Pres).is_none());
    }

    #[test]
    fn test_record_time_validation() {
        assert!(RecordTime::from_parts(2022, 2, 30, 0, 0).is_none());
        assert!(RecordTime::from_parts(2022, 9, 4, 24, 0).is_none());
        let t = RecordTime::from_parts(22, 9, 4, 19, 40).unwrap();
        assert_eq!((t.year(), t.month(), t.day(), t.hour(), t.minute()), (2022, 9, 4, 19, 40));
    }
}
