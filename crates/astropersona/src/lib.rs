//! Natal chart engine.
//!
//! Birth data flows one way: [`chart::ChartAssembler`] asks an
//! [`ephemeris::Ephemeris`] for cusps and positions and builds a
//! [`chart::NatalChart`]; [`interpretation::Interpreter`] turns the chart into
//! trait, strength and challenge tags; [`horoscope::HoroscopeGenerator`] adds
//! narrative text from a [`horoscope::NarrativeGenerator`].

pub mod aspects;
pub mod chart;
pub mod ephemeris;
pub mod error;
pub mod horoscope;
pub mod interpretation;
pub mod store;

pub use aspects::{Aspect, AspectCalculator, AspectType};
pub use chart::{
    calculate_chart, zodiac_sign_of, BirthData, CelestialBody, ChartAssembler, ChartSettings,
    House, NatalChart, Planet, ZodiacSign,
};
pub use ephemeris::{Ephemeris, EphemerisError, HouseSystem, SnapshotEphemeris};
pub use error::AstroError;
pub use horoscope::{
    generate_horoscope, HoroscopeGenerator, HoroscopeOutput, HoroscopeService, NarrativeError,
    NarrativeGenerator,
};
pub use interpretation::{interpret_chart, Interpretation, Interpreter, RuleBook};
pub use store::{InMemoryStore, KeyValueStore, ProfileRepository, StoreError, UserProfile};

#[cfg(feature = "swisseph")]
pub use ephemeris::SwissEphemerisAdapter;
