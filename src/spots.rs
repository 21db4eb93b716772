//! Surf spot → sensor station lookup.
//!
//! Several beaches share the same buoy and tide station; the table is keyed
//! by canonical spot name as the voice front end resolves it.

use crate::error::SurfError;
use std::fmt;

/// Station identifiers for one spot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpotDetails {
    /// NDBC buoy used for conditions
    pub primary_buoy_id: &'static str,
    /// Nearby NDBC buoy to use when the primary one stops reporting
    pub fallback_buoy_id: &'static str,
    /// NOAA CO-OPS tide station
    pub tide_station_id: &'static str,
    /// Surfline spot id, where one exists
    pub external_spot_id: Option<&'static str>,
}

/// Canonical spot names known to the voice model.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Spot {
    Pacifica,
    Montara,
    Rockaway,
    PrincetonJetty,
    OceanBeach,
    NorcalOffshore,
}

impl Spot {
    pub const ALL: [Spot; 6] = [
        Spot::Pacifica,
        Spot::Montara,
        Spot::Rockaway,
        Spot::PrincetonJetty,
        Spot::OceanBeach,
        Spot::NorcalOffshore,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Spot::Pacifica => "Pacifica State Beach",
            Spot::Montara => "Montara State Beach",
            Spot::Rockaway => "Rockaway State Beach",
            Spot::PrincetonJetty => "Princeton Jetty",
            Spot::OceanBeach => "Ocean Beach",
            Spot::NorcalOffshore => "Northern California Offshore Buoy",
        }
    }

    pub fn details(self) -> &'static SpotDetails {
        match self {
            Spot::Pacifica | Spot::Montara | Spot::Rockaway | Spot::PrincetonJetty => {
                &HALF_MOON_BAY
            }
            Spot::OceanBeach => &OCEAN_BEACH,
            Spot::NorcalOffshore => &NORCAL_OFFSHORE,
        }
    }
}

impl fmt::Display for Spot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// The Half Moon Bay buoy (46214) went quiet, so the coast south of the city
// reads from 46012.
static HALF_MOON_BAY: SpotDetails = SpotDetails {
    primary_buoy_id: "46012",
    fallback_buoy_id: "46026",
    tide_station_id: "9413450",
    external_spot_id: Some("5842041f4e65fad6a7708976"),
};

static OCEAN_BEACH: SpotDetails = SpotDetails {
    primary_buoy_id: "46237",
    fallback_buoy_id: "46026",
    tide_station_id: "9414290",
    external_spot_id: Some("5842041f4e65fad6a77087f8"),
};

// 357 nm west of San Francisco
static NORCAL_OFFSHORE: SpotDetails = SpotDetails {
    primary_buoy_id: "46059",
    fallback_buoy_id: "46214",
    tide_station_id: "9413450",
    external_spot_id: None,
};

/// Find the spot with this exact canonical name.
pub fn lookup_spot(name: &str) -> Result<Spot, SurfError> {
    Spot::ALL
        .into_iter()
        .find(|spot| spot.name() == name)
        .ok_or_else(|| SurfError::NotFound(format!("unknown surf spot {name:?}")))
}

/// Station identifiers for a canonical spot name.
pub fn resolve_spot(name: &str) -> Result<&'static SpotDetails, SurfError> {
    lookup_spot(name).map(Spot::details)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_known_spots() {
        let pacifica = resolve_spot("Pacifica State Beach").unwrap();
        assert_eq!(pacifica.primary_buoy_id, "46012");
        assert_eq!(pacifica.tide_station_id, "9413450");
        assert_eq!(resolve_spot("Montara State Beach").unwrap(), pacifica);

        let ob = resolve_spot("Ocean Beach").unwrap();
        assert_eq!(ob.primary_buoy_id, "46237");
        assert_eq!(ob.tide_station_id, "9414290");

        let offshore = resolve_spot("Northern California Offshore Buoy").unwrap();
        assert_eq!(offshore.external_spot_id, None);
    }

    #[test]
    fn test_every_spot_resolves_by_name() {
        for spot in Spot::ALL {
            assert_eq!(lookup_spot(spot.name()).unwrap(), spot);
        }
    }

    #[test]
    fn test_unknown_spot_not_found() {
        let err = resolve_spot("pacifica").unwrap_err();
        assert!(matches!(err, SurfError::NotFound(_)));
    }
}
