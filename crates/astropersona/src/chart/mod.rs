pub mod assembler;
pub mod birth;
pub mod settings;
pub mod types;

pub use assembler::{calculate_chart, ChartAssembler};
pub use birth::BirthData;
pub use settings::ChartSettings;
pub use types::{zodiac_sign_of, CelestialBody, House, NatalChart, Planet, ZodiacSign};
