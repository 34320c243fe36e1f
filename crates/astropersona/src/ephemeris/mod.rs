//! Ephemeris gateway.
//!
//! The chart assembler only talks to the [`Ephemeris`] trait. Live positions
//! come from the Swiss Ephemeris (feature `swisseph`); [`SnapshotEphemeris`]
//! replays a fixed table of positions.

#[cfg(feature = "swisseph")]
pub mod adapter;
pub mod snapshot;
pub mod types;

#[cfg(feature = "swisseph")]
pub use adapter::SwissEphemerisAdapter;
pub use snapshot::SnapshotEphemeris;
pub use types::{BodyPosition, EphemerisError, HouseFrame, HouseSystem};

use crate::chart::CelestialBody;

/// Source of house cusps and body positions for a given instant.
pub trait Ephemeris {
    /// Julian day (UT) for a Gregorian calendar date and decimal hour.
    fn julian_day(&self, year: i32, month: u32, day: u32, hour: f64) -> f64 {
        gregorian_julian_day(year, month, day, hour)
    }

    /// House cusps for the instant and location.
    fn house_cusps(
        &self,
        julian_day: f64,
        latitude: f64,
        longitude: f64,
        system: HouseSystem,
    ) -> Result<HouseFrame, EphemerisError>;

    /// Geocentric ecliptic position of `body`.
    fn body_position(
        &self,
        julian_day: f64,
        body: CelestialBody,
    ) -> Result<BodyPosition, EphemerisError>;

    /// House position of an ecliptic point as `house + fraction`, in [1, 13).
    ///
    /// The default walks the cusp intervals of `frame`, which is exact for
    /// points on the ecliptic.
    fn house_of(
        &self,
        frame: &HouseFrame,
        _geo_latitude: f64,
        _system: HouseSystem,
        longitude: f64,
        _ecliptic_latitude: f64,
    ) -> Result<f64, EphemerisError> {
        house_from_cusps(&frame.cusps, longitude).ok_or_else(|| {
            EphemerisError::HouseCalculationFailed {
                message: format!("longitude {longitude} falls outside every house"),
            }
        })
    }
}

impl<E: Ephemeris + ?Sized> Ephemeris for &E {
    fn julian_day(&self, year: i32, month: u32, day: u32, hour: f64) -> f64 {
        (**self).julian_day(year, month, day, hour)
    }

    fn house_cusps(
        &self,
        julian_day: f64,
        latitude: f64,
        longitude: f64,
        system: HouseSystem,
    ) -> Result<HouseFrame, EphemerisError> {
        (**self).house_cusps(julian_day, latitude, longitude, system)
    }

    fn body_position(
        &self,
        julian_day: f64,
        body: CelestialBody,
    ) -> Result<BodyPosition, EphemerisError> {
        (**self).body_position(julian_day, body)
    }

    fn house_of(
        &self,
        frame: &HouseFrame,
        geo_latitude: f64,
        system: HouseSystem,
        longitude: f64,
        ecliptic_latitude: f64,
    ) -> Result<f64, EphemerisError> {
        (**self).house_of(frame, geo_latitude, system, longitude, ecliptic_latitude)
    }
}

impl<E: Ephemeris + ?Sized> Ephemeris for Box<E> {
    fn julian_day(&self, year: i32, month: u32, day: u32, hour: f64) -> f64 {
        (**self).julian_day(year, month, day, hour)
    }

    fn house_cusps(
        &self,
        julian_day: f64,
        latitude: f64,
        longitude: f64,
        system: HouseSystem,
    ) -> Result<HouseFrame, EphemerisError> {
        (**self).house_cusps(julian_day, latitude, longitude, system)
    }

    fn body_position(
        &self,
        julian_day: f64,
        body: CelestialBody,
    ) -> Result<BodyPosition, EphemerisError> {
        (**self).body_position(julian_day, body)
    }

    fn house_of(
        &self,
        frame: &HouseFrame,
        geo_latitude: f64,
        system: HouseSystem,
        longitude: f64,
        ecliptic_latitude: f64,
    ) -> Result<f64, EphemerisError> {
        (**self).house_of(frame, geo_latitude, system, longitude, ecliptic_latitude)
    }
}

/// Julian day for a Gregorian calendar date (Meeus, Astronomical Algorithms ch. 7)
pub fn gregorian_julian_day(year: i32, month: u32, day: u32, hour: f64) -> f64 {
    let (y, m) = if month <= 2 {
        (year - 1, month as i32 + 12)
    } else {
        (year, month as i32)
    };
    let a = (y as f64 / 100.0).floor();
    let b = 2.0 - a + (a / 4.0).floor();

    (365.25 * (y as f64 + 4716.0)).floor()
        + (30.6001 * (m as f64 + 1.0)).floor()
        + day as f64
        + hour / 24.0
        + b
        - 1524.5
}

/// Mean obliquity of the ecliptic in degrees (IAU 1980)
pub fn mean_obliquity(julian_day: f64) -> f64 {
    let t = (julian_day - 2_451_545.0) / 36_525.0;
    let seconds = 21.448 - t * (46.8150 + t * (0.00059 - t * 0.001813));
    23.0 + (26.0 + seconds / 60.0) / 60.0
}

/// Wrap an angle into [0, 360).
///
/// `rem_euclid` rounds tiny negative inputs up to exactly 360.0, which folds back to 0.
pub fn normalize_degrees(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Locate `longitude` among the cusps at indices 1..12.
///
/// Returns the house number plus the fraction of the way through that house.
pub fn house_from_cusps(cusps: &[f64; 13], longitude: f64) -> Option<f64> {
    let lon = normalize_degrees(longitude);
    for house in 1..=12usize {
        let start = normalize_degrees(cusps[house]);
        let end = normalize_degrees(cusps[if house == 12 { 1 } else { house + 1 }]);
        let span = (end - start).rem_euclid(360.0);
        if span == 0.0 {
            continue;
        }
        let offset = (lon - start).rem_euclid(360.0);
        if offset < span {
            return Some(house as f64 + offset / span);
        }
    }
    None
}
