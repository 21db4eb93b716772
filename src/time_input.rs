//! Spoken time slots.
//!
//! The voice front end hands over either an absolute clock time (`"05:00"`)
//! or a relative one (`"PT-3H"`, reference then offset). Only absolute times
//! are supported; relative ones fail instead of being guessed at.

use crate::error::SurfError;
use chrono::{DateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Current time in the reference timezone.
pub fn now_in(tz: Tz) -> DateTime<Tz> {
    Utc::now().with_timezone(&tz)
}

fn is_relative(value: &str) -> bool {
    match value.split_once('-') {
        Some((reference, diff)) => !reference.is_empty() && !diff.is_empty() && !diff.contains('-'),
        None => false,
    }
}

/// Resolve a time slot against `now`: `HH:MM` means that time today.
pub fn parse_time_slot(value: &str, now: DateTime<Tz>) -> Result<DateTime<Tz>, SurfError> {
    let value = value.trim();
    if is_relative(value) {
        return Err(SurfError::UnsupportedInput(format!(
            "relative time {value:?} is not supported yet"
        )));
    }

    let time = NaiveTime::parse_from_str(value, "%H:%M")
        .map_err(|e| SurfError::Parse(format!("time slot {value:?}: {e}")))?;
    let local = now.date_naive().and_time(time);

    now.timezone()
        .from_local_datetime(&local)
        .earliest()
        .ok_or_else(|| SurfError::Parse(format!("{local} does not exist in {}", now.timezone())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use chrono::Timelike;
    use chrono_tz::America::Los_Angeles;

    fn morning() -> DateTime<Tz> {
        Los_Angeles.with_ymd_and_hms(2022, 9, 10, 9, 41, 12).unwrap()
    }

    #[test]
    fn test_absolute_time_today() {
        let parsed = parse_time_slot("06:33", morning()).unwrap();
        assert_eq!(parsed.date_naive(), morning().date_naive());
        assert_eq!((parsed.hour(), parsed.minute(), parsed.second()), (6, 33, 0));
        assert_eq!(parsed.timezone(), Los_Angeles);
    }

    #[test]
    fn test_relative_time_unsupported() {
        let err = parse_time_slot("PT-3H", morning()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedInput);
    }

    #[test]
    fn test_garbage_is_parse_error() {
        assert_eq!(parse_time_slot("noonish", morning()).unwrap_err().kind(), ErrorKind::Parse);
        assert_eq!(parse_time_slot("25:00", morning()).unwrap_err().kind(), ErrorKind::Parse);
    }

    #[test]
    fn test_dst_gap_is_parse_error() {
        let spring_forward = Los_Angeles.with_ymd_and_hms(2023, 3, 12, 8, 0, 0).unwrap();
        assert!(parse_time_slot("02:30", spring_forward).is_err());
    }
}
