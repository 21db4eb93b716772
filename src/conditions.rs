//! Merging the nearest weather and wave rows into one condition report.

use crate::records::{Column, Record, WaveRecord, WeatherRecord};
use crate::Measurement;
use serde::{Deserialize, Serialize};

/// Columns copied into a [`ConditionReport`], in assembly order.
pub const CONDITION_COLUMNS: [Column; 17] = [
    Column::Wdir,
    Column::Wspd,
    Column::Gst,
    Column::Pres,
    Column::Atmp,
    Column::Wtmp,
    Column::Wspd10m,
    Column::Wspd20m,
    Column::Wvht,
    Column::SwH,
    Column::SwP,
    Column::SwD,
    Column::Wwh,
    Column::Wwp,
    Column::Wwd,
    Column::Steepness,
    Column::Apd,
];

/// Surf-relevant conditions at one buoy.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ConditionReport {
    pub station_id: String,
    pub wind_direction: Option<Measurement>,
    pub wind_speed: Option<Measurement>,
    pub wind_gust: Option<Measurement>,
    pub atmospheric_pressure: Option<Measurement>,
    pub air_temperature: Option<Measurement>,
    pub water_temperature: Option<Measurement>,
    pub wind_speed_at_10_meters: Option<Measurement>,
    pub wind_speed_at_20_meters: Option<Measurement>,
    pub significant_wave_height: Option<Measurement>,
    pub swell_height: Option<Measurement>,
    pub swell_period: Option<Measurement>,
    pub swell_direction: Option<Measurement>,
    pub wind_wave_height: Option<Measurement>,
    pub wind_wave_period: Option<Measurement>,
    pub wind_wave_direction: Option<Measurement>,
    pub wave_steepness: Option<Measurement>,
    pub average_wave_period: Option<Measurement>,
}

impl ConditionReport {
    pub fn new(station_id: impl Into<String>) -> Self {
        ConditionReport {
            station_id: station_id.into(),
            ..Default::default()
        }
    }

    /// Weather first, then waves: where both tables carry a column
    /// (`WVHT`, `APD`) the wave reading wins.
    pub fn assemble(
        station_id: impl Into<String>,
        weather: &WeatherRecord,
        waves: &WaveRecord,
    ) -> Self {
        let mut report = ConditionReport::new(station_id);
        report.absorb(weather);
        report.absorb(waves);
        report
    }

    /// Copy every mapped column the record has a reading for. Absent
    /// readings leave the current value alone.
    pub fn absorb<R: Record>(&mut self, record: &R) {
        for column in CONDITION_COLUMNS {
            if let (Some(measurement), Some(slot)) = (record.get(column), self.slot_mut(column)) {
                *slot = Some(measurement.clone());
            }
        }
    }

    fn slot_mut(&mut self, column: Column) -> Option<&mut Option<Measurement>> {
        match column {
            Column::Wdir => Some(&mut self.wind_direction),
            Column::Wspd => Some(&mut self.wind_speed),
            Column::Gst => Some(&mut self.wind_gust),
            Column::Pres => Some(&mut self.atmospheric_pressure),
            Column::Atmp => Some(&mut self.air_temperature),
            Column::Wtmp => Some(&mut self.water_temperature),
            Column::Wspd10m => Some(&mut self.wind_speed_at_10_meters),
            Column::Wspd20m => Some(&mut self.wind_speed_at_20_meters),
            Column::Wvht => Some(&mut self.significant_wave_height),
            Column::SwH => Some(&mut self.swell_height),
            Column::SwP => Some(&mut self.swell_period),
            Column::SwD => Some(&mut self.swell_direction),
            Column::Wwh => Some(&mut self.wind_wave_height),
            Column::Wwp => Some(&mut self.wind_wave_period),
            Column::Wwd => Some(&mut self.wind_wave_direction),
            Column::Steepness => Some(&mut self.wave_steepness),
            Column::Apd => Some(&mut self.average_wave_period),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::RecordTime;

    fn time() -> RecordTime {
        RecordTime::from_parts(2022, 9, 4, 19, 0).unwrap()
    }

    #[test]
    fn test_wave_record_wins_on_overlap() {
        let mut weather = WeatherRecord::new(time());
        weather.apd = Some(Measurement::new("5.0", "sec"));
        weather.wvht = Some(Measurement::new("1.1", "m"));
        let mut waves = WaveRecord::new(time());
        waves.apd = Some(Measurement::new("6.1", "sec"));

        let report = ConditionReport::assemble("46012", &weather, &waves);
        assert_eq!(report.average_wave_period.unwrap().value, "6.1");
        // Wave row had no WVHT, so the weather value survives
        assert_eq!(report.significant_wave_height.unwrap().value, "1.1");
    }

    #[test]
    fn test_fields_copied_and_absent_left_unset() {
        let mut weather = WeatherRecord::new(time());
        weather.wdir = Some(Measurement::new("175", "degT"));
        weather.pres = Some(Measurement::new("1013.5", "hPa"));
        weather.dewp = Some(Measurement::new("12.0", "degC"));
        let mut waves = WaveRecord::new(time());
        waves.swh = Some(Measurement::new("1.5", "m"));
        waves.steepness = Some(Measurement::new("AVERAGE", "-"));

        let report = ConditionReport::assemble("46012", &weather, &waves);
        assert_eq!(report.station_id, "46012");
        assert_eq!(report.wind_direction.as_ref().unwrap().value, "175");
        assert_eq!(report.atmospheric_pressure.as_ref().unwrap().unit, "hPa");
        assert_eq!(report.swell_height.as_ref().unwrap().value, "1.5");
        assert_eq!(report.wave_steepness.as_ref().unwrap().value, "AVERAGE");
        assert!(report.wind_speed.is_none());
        assert!(report.swell_period.is_none());
    }

    #[test]
    fn test_every_condition_column_has_a_slot() {
        let mut report = ConditionReport::new("x");
        for column in CONDITION_COLUMNS {
            assert!(report.slot_mut(column).is_some(), "{:?}", column);
        }
    }
}
