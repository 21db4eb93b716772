//! Nearest-time record selection.
//!
//! NDBC tables are newest first, but nothing here relies on that: the whole
//! series is scanned, so records in any order give the same answer. Stopping
//! at the first increase in distance is only correct when distance to the
//! target is monotone along the scan, which does not hold for arbitrary
//! targets.

use crate::error::SurfError;
use crate::records::Record;
use chrono::{DateTime, TimeZone, Utc};

/// Return the record whose timestamp is closest to `target`.
///
/// Ties go to the record that appears first.
pub fn closest_record<'a, R, Tz>(
    records: &'a [R],
    target: &DateTime<Tz>,
) -> Result<&'a R, SurfError>
where
    R: Record,
    Tz: TimeZone,
{
    let target = target.with_timezone(&Utc);
    let mut best: Option<(&R, i64)> = None;

    for record in records {
        let delta = (record.time().instant() - target).num_seconds().abs();
        match best {
            Some((_, best_delta)) if delta >= best_delta => {}
            _ => best = Some((record, delta)),
        }
    }

    best.map(|(record, _)| record)
        .ok_or_else(|| SurfError::NotFound(format!("no {} records to choose from", R::KIND)))
}
