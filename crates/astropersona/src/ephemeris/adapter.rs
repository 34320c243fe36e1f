use std::env;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use swisseph::swe::{calc_ut, house_pos, houses_ex, julday, set_ephe_path};
use swisseph::{AscMc, Cusp};

use crate::chart::CelestialBody;
use crate::ephemeris::types::{BodyPosition, EphemerisError, HouseFrame, HouseSystem};
use crate::ephemeris::{mean_obliquity, normalize_degrees, Ephemeris};

const DEFAULT_EPHEMERIS_PATH: &str = "/usr/local/share/swisseph";

// FLG_SWIEPH = 2, FLG_SPEED = 256
const FLG_SWIEPH: i32 = 2;
const FLG_SPEED: i32 = 256;

// GREG_CAL = 1
const GREG_CAL: u32 = 1;

lazy_static::lazy_static! {
    // The C library keeps global state between calls
    static ref SWISS_LOCK: Mutex<()> = Mutex::new(());
}

/// Swiss Ephemeris adapter implementation
pub struct SwissEphemerisAdapter {
    ephemeris_path: PathBuf,
}

impl SwissEphemerisAdapter {
    /// Create a new adapter with optional ephemeris path.
    ///
    /// Falls back to `SWISS_EPHEMERIS_PATH`, then to the system default.
    pub fn new(ephemeris_path: Option<PathBuf>) -> Result<Self, EphemerisError> {
        let path = ephemeris_path.unwrap_or_else(|| {
            env::var("SWISS_EPHEMERIS_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_EPHEMERIS_PATH))
        });

        if !path.exists() {
            return Err(EphemerisError::FileNotFound {
                path: path.display().to_string(),
                message: "Ephemeris path does not exist. Please ensure Swiss Ephemeris data files are installed.".to_string(),
            });
        }

        {
            let _guard = SWISS_LOCK.lock().unwrap_or_else(|e| e.into_inner());
            set_ephe_path(&path.to_string_lossy());
        }

        Ok(Self {
            ephemeris_path: path,
        })
    }

    pub fn ephemeris_path(&self) -> &Path {
        &self.ephemeris_path
    }
}

impl Ephemeris for SwissEphemerisAdapter {
    fn julian_day(&self, year: i32, month: u32, day: u32, hour: f64) -> f64 {
        let _guard = SWISS_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        julday(year, month as i32, day as i32, hour, GREG_CAL)
    }

    fn house_cusps(
        &self,
        julian_day: f64,
        latitude: f64,
        longitude: f64,
        system: HouseSystem,
    ) -> Result<HouseFrame, EphemerisError> {
        let (c, a) = {
            let _guard = SWISS_LOCK.lock().unwrap_or_else(|e| e.into_inner());
            houses_ex(julian_day, FLG_SWIEPH, latitude, longitude, system.code() as i32)
        };

        // ascmc[2] is ARMC
        let armc = a[2];
        let cusps = Cusp::from_array(c);
        let ascmc = AscMc::from_array(a);

        let values = [
            cusps.first, cusps.second, cusps.third, cusps.fourth,
            cusps.fifth, cusps.sixth, cusps.seventh, cusps.eighth,
            cusps.ninth, cusps.tenth, cusps.eleventh, cusps.twelfth,
        ];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(EphemerisError::HouseCalculationFailed {
                message: format!(
                    "{} cusps undefined at latitude {latitude}",
                    system.name()
                ),
            });
        }

        let mut frame_cusps = [0.0; 13];
        for (i, cusp) in values.iter().enumerate() {
            frame_cusps[i + 1] = normalize_degrees(*cusp);
        }

        Ok(HouseFrame {
            cusps: frame_cusps,
            ascendant: normalize_degrees(ascmc.ascendant),
            midheaven: normalize_degrees(ascmc.mc),
            armc: normalize_degrees(armc),
            obliquity: mean_obliquity(julian_day),
        })
    }

    fn body_position(
        &self,
        julian_day: f64,
        body: CelestialBody,
    ) -> Result<BodyPosition, EphemerisError> {
        let result = {
            let _guard = SWISS_LOCK.lock().unwrap_or_else(|e| e.into_inner());
            calc_ut(julian_day, body.swiss_id() as u32, (FLG_SWIEPH | FLG_SPEED) as u32)
        }
        .map_err(|e| EphemerisError::CalculationFailed {
            body: body.name().to_string(),
            julian_day,
            message: format!("Swiss Ephemeris error: {}", e),
        })?;

        let out = result.out;
        Ok(BodyPosition {
            longitude: normalize_degrees(out[0]),
            latitude: out[1],
            distance: out[2],
            speed_longitude: out[3],
        })
    }

    /// Placidus house position from ARMC and obliquity, honouring the body's
    /// ecliptic latitude.
    fn house_of(
        &self,
        frame: &HouseFrame,
        geo_latitude: f64,
        system: HouseSystem,
        longitude: f64,
        ecliptic_latitude: f64,
    ) -> Result<f64, EphemerisError> {
        let _guard = SWISS_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        house_pos(
            frame.armc,
            geo_latitude,
            frame.obliquity,
            system.code() as i32,
            longitude,
            ecliptic_latitude,
        )
        .map_err(|e| EphemerisError::HouseCalculationFailed {
            message: format!("house position of longitude {longitude}: {e}"),
        })
    }
}
