use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::chart::CelestialBody;

/// Errors that can occur during ephemeris calculations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EphemerisError {
    #[error("Ephemeris file not found at path: {path}. {message}")]
    FileNotFound { path: String, message: String },
    #[error("Invalid house system: {system}. Valid systems: {valid:?}")]
    InvalidHouseSystem { system: String, valid: Vec<String> },
    #[error("Failed to calculate position for {body} at JD {julian_day}: {message}")]
    CalculationFailed {
        body: String,
        julian_day: f64,
        message: String,
    },
    #[error("House calculation failed: {message}")]
    HouseCalculationFailed { message: String },
    #[error("Invalid ephemeris snapshot: {0}")]
    InvalidSnapshot(String),
}

/// House system mapping
const HOUSE_SYSTEMS: &[(&str, u8, HouseSystem)] = &[("placidus", b'P', HouseSystem::Placidus)];

/// House division convention understood by the gateway
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HouseSystem {
    #[default]
    Placidus,
}

impl HouseSystem {
    /// Single-byte house system code used by the Swiss Ephemeris
    pub fn code(self) -> u8 {
        HOUSE_SYSTEMS
            .iter()
            .find(|(_, _, system)| *system == self)
            .map(|(_, code, _)| *code)
            .unwrap_or(b'P')
    }

    pub fn name(self) -> &'static str {
        HOUSE_SYSTEMS
            .iter()
            .find(|(_, _, system)| *system == self)
            .map(|(name, _, _)| *name)
            .unwrap_or("placidus")
    }
}

impl fmt::Display for HouseSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HouseSystem {
    type Err = EphemerisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        HOUSE_SYSTEMS
            .iter()
            .find(|(name, _, _)| *name == wanted)
            .map(|(_, _, system)| *system)
            .ok_or_else(|| EphemerisError::InvalidHouseSystem {
                system: s.to_string(),
                valid: HOUSE_SYSTEMS.iter().map(|(name, _, _)| name.to_string()).collect(),
            })
    }
}

/// Geocentric position of a body at one instant
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyPosition {
    /// Ecliptic longitude in degrees (0-360)
    pub longitude: f64,
    /// Ecliptic latitude in degrees
    #[serde(default)]
    pub latitude: f64,
    /// Distance in AU
    #[serde(default)]
    pub distance: f64,
    /// Speed in longitude (degrees per day)
    pub speed_longitude: f64,
}

impl BodyPosition {
    pub fn new(longitude: f64, speed_longitude: f64) -> Self {
        Self {
            longitude,
            latitude: 0.0,
            distance: 0.0,
            speed_longitude,
        }
    }
}

/// House cusps and the reference points returned alongside them.
///
/// `cusps[0]` is unused; houses 1..12 live at indices 1..12.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HouseFrame {
    pub cusps: [f64; 13],
    pub ascendant: f64,
    pub midheaven: f64,
    /// Right ascension of the midheaven, degrees
    pub armc: f64,
    /// Obliquity of the ecliptic, degrees
    pub obliquity: f64,
}

impl HouseFrame {
    /// Cusp degree of house `number` (1..=12)
    pub fn cusp(&self, number: u8) -> Option<f64> {
        match number {
            1..=12 => Some(self.cusps[number as usize]),
            _ => None,
        }
    }
}

pub(crate) fn missing_body(body: CelestialBody, julian_day: f64) -> EphemerisError {
    EphemerisError::CalculationFailed {
        body: body.name().to_string(),
        julian_day,
        message: "no position available for this body".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_house_system_parse() {
        assert_eq!("Placidus".parse::<HouseSystem>().unwrap(), HouseSystem::Placidus);
        assert_eq!(HouseSystem::Placidus.code(), b'P');

        let err = "koch".parse::<HouseSystem>().unwrap_err();
        match err {
            EphemerisError::InvalidHouseSystem { system, valid } => {
                assert_eq!(system, "koch");
                assert_eq!(valid, vec!["placidus".to_string()]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_frame_cusp_bounds() {
        let mut cusps = [0.0; 13];
        cusps[1] = 15.0;
        cusps[12] = 345.0;
        let frame = HouseFrame {
            cusps,
            ascendant: 15.0,
            midheaven: 285.0,
            armc: 0.0,
            obliquity: 23.44,
        };
        assert_eq!(frame.cusp(1), Some(15.0));
        assert_eq!(frame.cusp(12), Some(345.0));
        assert_eq!(frame.cusp(0), None);
        assert_eq!(frame.cusp(13), None);
    }
}
