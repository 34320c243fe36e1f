use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::chart::CelestialBody;
use crate::ephemeris::types::{missing_body, BodyPosition, EphemerisError, HouseFrame, HouseSystem};
use crate::ephemeris::Ephemeris;

/// Mean obliquity at J2000, degrees
const J2000_OBLIQUITY: f64 = 23.4392911;

/// Fixed ephemeris state, independent of the requested instant and location.
///
/// Snapshot files are JSON:
///
/// ```json
/// {
///   "frame": { "cusps": [0.0, 15.0, ...], "ascendant": 15.0, "midheaven": 285.0,
///              "armc": 283.0, "obliquity": 23.44 },
///   "bodies": { "Sun": { "longitude": 135.0, "speed_longitude": 0.96 } }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotEphemeris {
    pub frame: HouseFrame,
    #[serde(default)]
    pub bodies: BTreeMap<CelestialBody, BodyPosition>,
}

impl SnapshotEphemeris {
    pub fn new(frame: HouseFrame) -> Self {
        Self {
            frame,
            bodies: BTreeMap::new(),
        }
    }

    /// Snapshot whose twelve houses are 30 degrees wide starting at `ascendant`.
    pub fn equal_houses(ascendant: f64) -> Self {
        let mut cusps = [0.0; 13];
        for (i, cusp) in cusps.iter_mut().enumerate().skip(1) {
            *cusp = (ascendant + (i as f64 - 1.0) * 30.0).rem_euclid(360.0);
        }
        let midheaven = (ascendant + 270.0).rem_euclid(360.0);
        Self::new(HouseFrame {
            cusps,
            ascendant: ascendant.rem_euclid(360.0),
            midheaven,
            armc: midheaven,
            obliquity: J2000_OBLIQUITY,
        })
    }

    pub fn with_body(mut self, body: CelestialBody, position: BodyPosition) -> Self {
        self.bodies.insert(body, position);
        self
    }

    pub fn from_json_str(text: &str) -> Result<Self, EphemerisError> {
        serde_json::from_str(text).map_err(|e| EphemerisError::InvalidSnapshot(e.to_string()))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, EphemerisError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| EphemerisError::FileNotFound {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json_str(&text)
    }
}

impl Ephemeris for SnapshotEphemeris {
    fn house_cusps(
        &self,
        _julian_day: f64,
        _latitude: f64,
        _longitude: f64,
        _system: HouseSystem,
    ) -> Result<HouseFrame, EphemerisError> {
        Ok(self.frame.clone())
    }

    fn body_position(
        &self,
        julian_day: f64,
        body: CelestialBody,
    ) -> Result<BodyPosition, EphemerisError> {
        self.bodies
            .get(&body)
            .copied()
            .ok_or_else(|| missing_body(body, julian_day))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_body_is_calculation_failure() {
        let eph = SnapshotEphemeris::equal_houses(0.0);
        let err = eph.body_position(2_451_545.0, CelestialBody::Mars).unwrap_err();
        assert!(matches!(err, EphemerisError::CalculationFailed { ref body, .. } if body == "Mars"));
    }

    #[test]
    fn test_parse_snapshot_json() {
        let text = r#"{
            "frame": {
                "cusps": [0, 0, 30, 60, 90, 120, 150, 180, 210, 240, 270, 300, 330],
                "ascendant": 0, "midheaven": 270, "armc": 270, "obliquity": 23.44
            },
            "bodies": { "Sun": { "longitude": 135.0, "speed_longitude": 0.96 } }
        }"#;
        let eph = SnapshotEphemeris::from_json_str(text).unwrap();
        let sun = eph.body_position(0.0, CelestialBody::Sun).unwrap();
        assert_eq!(sun.longitude, 135.0);
        assert_eq!(sun.latitude, 0.0);
        assert_eq!(eph.frame.cusp(4), Some(90.0));
    }

    #[test]
    fn test_bad_json_is_invalid_snapshot() {
        let err = SnapshotEphemeris::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, EphemerisError::InvalidSnapshot(_)));
    }
}
