use chrono::Datelike;

use crate::aspects::AspectCalculator;
use crate::chart::birth::{hour_fraction, BirthData};
use crate::chart::settings::ChartSettings;
use crate::chart::types::{zodiac_sign_of, CelestialBody, House, NatalChart, Planet};
use crate::ephemeris::{normalize_degrees, Ephemeris};
use crate::error::AstroError;

/// Builds natal charts from birth data using an ephemeris gateway
pub struct ChartAssembler<E> {
    ephemeris: E,
    settings: ChartSettings,
}

impl<E: Ephemeris> ChartAssembler<E> {
    pub fn new(ephemeris: E) -> Self {
        Self::with_settings(ephemeris, ChartSettings::default())
    }

    pub fn with_settings(ephemeris: E, settings: ChartSettings) -> Self {
        Self { ephemeris, settings }
    }

    pub fn settings(&self) -> &ChartSettings {
        &self.settings
    }

    pub fn ephemeris(&self) -> &E {
        &self.ephemeris
    }

    pub fn calculate_chart(&self, birth: &BirthData) -> Result<NatalChart, AstroError> {
        let instant = birth.local_datetime(self.settings.default_time);
        let jd = self.ephemeris.julian_day(
            instant.year(),
            instant.month(),
            instant.day(),
            hour_fraction(&instant),
        );

        let system = self.settings.house_system;
        let frame = self
            .ephemeris
            .house_cusps(jd, birth.latitude(), birth.longitude(), system)?;

        let houses: Vec<House> = (1..=12u8)
            .map(|number| {
                let degree = normalize_degrees(frame.cusps[number as usize]);
                House {
                    number,
                    degree,
                    sign: zodiac_sign_of(degree),
                }
            })
            .collect();

        let mut planets = Vec::with_capacity(CelestialBody::ALL.len());
        for body in CelestialBody::ALL {
            let position = self.ephemeris.body_position(jd, body)?;
            let longitude = normalize_degrees(position.longitude);

            let house_position = self.ephemeris.house_of(
                &frame,
                birth.latitude(),
                system,
                longitude,
                position.latitude,
            )?;
            let house = house_position.floor();
            if !(1.0..=12.0).contains(&house) {
                return Err(AstroError::calculation(format!(
                    "{body} house position {house_position} is outside houses 1-12"
                )));
            }

            planets.push(Planet {
                name: body,
                sign: zodiac_sign_of(longitude),
                longitude,
                house: house as u8,
                is_retrograde: position.speed_longitude < 0.0,
            });
        }

        let aspects = AspectCalculator::with_max_orb(self.settings.max_orb).compute_aspects(&planets);

        log::debug!(
            "Computed chart for {} at JD {jd}: {} planets, {} houses, {} aspects",
            instant,
            planets.len(),
            houses.len(),
            aspects.len()
        );

        Ok(NatalChart {
            julian_day: Some(jd),
            planets,
            houses,
            aspects,
        })
    }
}

/// Compute a natal chart with default settings
pub fn calculate_chart<E: Ephemeris>(
    ephemeris: &E,
    birth: &BirthData,
) -> Result<NatalChart, AstroError> {
    ChartAssembler::new(ephemeris).calculate_chart(birth)
}
