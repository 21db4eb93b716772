//! # NDBC Table Parsing
//!
//! NDBC realtime files are plain text with two header rows:
//!
//! ```text
//! #YY  MM DD hh mm WDIR WSPD GST  WVHT   DPD ...
//! #yr  mo dy hr mn degT m/s  m/s     m   sec ...
//! 2022 09 04 19 00 175  3.5  4.5    MM    MM ...
//! ```
//!
//! Line 1 names the columns, line 2 gives each column's unit code, and every
//! following line is one observation. `MM` marks a missing reading.
//!
//! ## Parsing Rules
//! - Header tokens are split on runs of whitespace after stripping the `#` marker
//! - `MM` leaves the field unset; it never becomes a [`Measurement`]
//! - A row with more tokens than header columns is a parse error
//! - Readings must parse as numbers, except compass directions and steepness
//! - Unknown columns, and columns the chosen schema lacks, are skipped
//! - Blank lines are skipped

use crate::error::SurfError;
use crate::records::{HeaderField, Record, RecordTime, TimePart};
use crate::Measurement;
use tracing::{debug, instrument};

/// Token NDBC writes for a missing reading.
pub const MISSING: &str = "MM";

/// Marker at the start of both header rows.
const HEADER_MARKER: char = '#';

/// A fully parsed NDBC table for one station and one data type.
#[derive(Clone, Debug, PartialEq)]
pub struct Report<R> {
    /// Column names from the first header row
    pub columns: Vec<String>,
    /// Unit codes from the second header row, aligned with `columns`
    pub units: Vec<String>,
    /// Rows in source order (NDBC writes newest first)
    pub records: Vec<R>,
}

/// Split a header row into trimmed tokens.
pub fn parse_header(line: &str) -> Vec<String> {
    line.trim()
        .trim_start_matches(HEADER_MARKER)
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

impl<R: Record> Report<R> {
    /// Parse a raw table into typed records of schema `R`.
    ///
    /// # Example
    /// ```
    /// use surf_report::records::WeatherRecord;
    /// use surf_report::report::Report;
    ///
    /// let raw = "#YY  MM DD hh mm WDIR WSPD\n\
    ///            #yr  mo dy hr mn degT m/s\n\
    ///            2022 09 04 19 00 175  MM\n";
    /// let report = Report::<WeatherRecord>::parse(raw).unwrap();
    /// assert_eq!(report.records[0].wdir.as_ref().unwrap().to_string(), "175 degrees true");
    /// assert!(report.records[0].wspd.is_none());
    /// ```
    #[instrument(skip(raw), fields(kind = R::KIND, size = raw.len()))]
    pub fn parse(raw: &str) -> Result<Self, SurfError> {
        let mut lines = raw.lines().enumerate();

        let columns = match lines.next() {
            Some((_, line)) => parse_header(line),
            None => return Err(SurfError::table(1, "missing column header row")),
        };
        let units = match lines.next() {
            Some((_, line)) => parse_header(line),
            None => return Err(SurfError::table(2, "missing unit header row")),
        };
        if columns.is_empty() {
            return Err(SurfError::table(1, "column header row is empty"));
        }

        let fields: Vec<Option<HeaderField>> = columns
            .iter()
            .map(|name| {
                let field = HeaderField::from_name(name);
                if field.is_none() {
                    debug!("Ignoring unknown column {}", name);
                }
                field
            })
            .collect();

        let mut records = Vec::new();
        for (index, line) in lines {
            if line.trim().is_empty() {
                continue;
            }
            records.push(parse_row(index + 1, line, &fields, &units)?);
        }

        debug!("Parsed {} {} records", records.len(), R::KIND);
        Ok(Report {
            columns,
            units,
            records,
        })
    }
}

/// Parse one data row. `line_no` is 1-based, for error messages.
fn parse_row<R: Record>(
    line_no: usize,
    line: &str,
    fields: &[Option<HeaderField>],
    units: &[String],
) -> Result<R, SurfError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() > fields.len() {
        return Err(SurfError::table(
            line_no,
            format!("{} tokens but only {} columns", tokens.len(), fields.len()),
        ));
    }

    let mut parts: [Option<u32>; 5] = [None; 5];
    let mut readings = Vec::with_capacity(tokens.len());

    for (i, token) in tokens.iter().enumerate() {
        match fields[i] {
            Some(HeaderField::Time(part)) => {
                let value = token.parse::<u32>().map_err(|_| {
                    SurfError::table(
                        line_no,
                        format!("timestamp field {:?} is not a number: {}", part, token),
                    )
                })?;
                parts[time_slot(part)] = Some(value);
            }
            Some(HeaderField::Data(column)) if *token != MISSING => {
                if column.is_numeric() && token.parse::<f64>().is_err() {
                    return Err(SurfError::table(
                        line_no,
                        format!("{} value is not a number: {}", column.name(), token),
                    ));
                }
                let unit = units.get(i).map(String::as_str).unwrap_or("");
                readings.push((column, Measurement::new(*token, unit)));
            }
            _ => {}
        }
    }

    let time = match parts {
        [Some(year), Some(month), Some(day), Some(hour), Some(minute)] => i32::try_from(year)
            .ok()
            .and_then(|year| RecordTime::from_parts(year, month, day, hour, minute))
            .ok_or_else(|| {
                SurfError::table(
                    line_no,
                    format!("invalid timestamp {year}-{month}-{day} {hour}:{minute}"),
                )
            })?,
        _ => return Err(SurfError::table(line_no, "row is missing timestamp columns")),
    };

    let mut record = R::new(time);
    for (column, measurement) in readings {
        record.set(column, measurement);
    }
    Ok(record)
}

fn time_slot(part: TimePart) -> usize {
    match part {
        TimePart::Year => 0,
        TimePart::Month => 1,
        TimePart::Day => 2,
        TimePart::Hour => 3,
        TimePart::Minute => 4,
    }
}
