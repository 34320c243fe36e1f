use serde::{Deserialize, Serialize};
use std::fmt;

use crate::aspects::Aspect;

/// The ten bodies placed in every natal chart, in chart order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CelestialBody {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
}

impl CelestialBody {
    pub const ALL: [CelestialBody; 10] = [
        CelestialBody::Sun,
        CelestialBody::Moon,
        CelestialBody::Mercury,
        CelestialBody::Venus,
        CelestialBody::Mars,
        CelestialBody::Jupiter,
        CelestialBody::Saturn,
        CelestialBody::Uranus,
        CelestialBody::Neptune,
        CelestialBody::Pluto,
    ];

    /// Swiss Ephemeris body number (SE_SUN = 0 .. SE_PLUTO = 9)
    pub fn swiss_id(self) -> i32 {
        self as i32
    }

    pub fn name(self) -> &'static str {
        match self {
            CelestialBody::Sun => "Sun",
            CelestialBody::Moon => "Moon",
            CelestialBody::Mercury => "Mercury",
            CelestialBody::Venus => "Venus",
            CelestialBody::Mars => "Mars",
            CelestialBody::Jupiter => "Jupiter",
            CelestialBody::Saturn => "Saturn",
            CelestialBody::Uranus => "Uranus",
            CelestialBody::Neptune => "Neptune",
            CelestialBody::Pluto => "Pluto",
        }
    }
}

impl fmt::Display for CelestialBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Tropical zodiac signs, Aries first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ZodiacSign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

impl ZodiacSign {
    pub const ALL: [ZodiacSign; 12] = [
        ZodiacSign::Aries,
        ZodiacSign::Taurus,
        ZodiacSign::Gemini,
        ZodiacSign::Cancer,
        ZodiacSign::Leo,
        ZodiacSign::Virgo,
        ZodiacSign::Libra,
        ZodiacSign::Scorpio,
        ZodiacSign::Sagittarius,
        ZodiacSign::Capricorn,
        ZodiacSign::Aquarius,
        ZodiacSign::Pisces,
    ];

    /// Sign containing an ecliptic longitude. Any finite angle is accepted.
    pub fn from_longitude(longitude: f64) -> Self {
        let normalized = longitude.rem_euclid(360.0);
        let index = (normalized / 30.0).floor() as usize % 12;
        Self::ALL[index]
    }

    pub fn name(self) -> &'static str {
        match self {
            ZodiacSign::Aries => "Aries",
            ZodiacSign::Taurus => "Taurus",
            ZodiacSign::Gemini => "Gemini",
            ZodiacSign::Cancer => "Cancer",
            ZodiacSign::Leo => "Leo",
            ZodiacSign::Virgo => "Virgo",
            ZodiacSign::Libra => "Libra",
            ZodiacSign::Scorpio => "Scorpio",
            ZodiacSign::Sagittarius => "Sagittarius",
            ZodiacSign::Capricorn => "Capricorn",
            ZodiacSign::Aquarius => "Aquarius",
            ZodiacSign::Pisces => "Pisces",
        }
    }
}

impl fmt::Display for ZodiacSign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Get the zodiac sign for an ecliptic longitude
pub fn zodiac_sign_of(longitude: f64) -> ZodiacSign {
    ZodiacSign::from_longitude(longitude)
}

/// A body placed in the chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Planet {
    pub name: CelestialBody,
    pub sign: ZodiacSign,
    /// Ecliptic longitude in degrees (0-360)
    pub longitude: f64,
    /// House number (1-12)
    pub house: u8,
    pub is_retrograde: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct House {
    pub number: u8,
    /// Cusp longitude in degrees (0-360)
    pub degree: f64,
    pub sign: ZodiacSign,
}

/// Computed natal chart
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NatalChart {
    pub julian_day: Option<f64>,
    pub planets: Vec<Planet>,
    pub houses: Vec<House>,
    pub aspects: Vec<Aspect>,
}

impl NatalChart {
    pub fn planet(&self, body: CelestialBody) -> Option<&Planet> {
        self.planets.iter().find(|p| p.name == body)
    }

    pub fn house(&self, number: u8) -> Option<&House> {
        self.houses.iter().find(|h| h.number == number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_boundaries() {
        assert_eq!(zodiac_sign_of(0.0), ZodiacSign::Aries);
        assert_eq!(zodiac_sign_of(29.999), ZodiacSign::Aries);
        assert_eq!(zodiac_sign_of(30.0), ZodiacSign::Taurus);
        assert_eq!(zodiac_sign_of(135.0), ZodiacSign::Leo);
        assert_eq!(zodiac_sign_of(359.999), ZodiacSign::Pisces);
    }

    #[test]
    fn test_sign_matches_index_formula() {
        let mut lon: f64 = 0.0;
        while lon < 360.0 {
            let expected = ZodiacSign::ALL[(lon / 30.0).floor() as usize % 12];
            assert_eq!(zodiac_sign_of(lon), expected, "longitude {lon}");
            lon += 0.25;
        }
    }

    #[test]
    fn test_sign_normalizes_out_of_range() {
        assert_eq!(zodiac_sign_of(360.0), ZodiacSign::Aries);
        assert_eq!(zodiac_sign_of(-0.5), ZodiacSign::Pisces);
        assert_eq!(zodiac_sign_of(725.0), ZodiacSign::Aries);
    }

    #[test]
    fn test_swiss_ids_follow_chart_order() {
        let ids: Vec<i32> = CelestialBody::ALL.iter().map(|b| b.swiss_id()).collect();
        assert_eq!(ids, (0..10).collect::<Vec<_>>());
        assert_eq!(CelestialBody::Pluto.to_string(), "Pluto");
    }
}
