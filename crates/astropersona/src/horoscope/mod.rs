pub mod generator;
pub mod narrative;
pub mod prompts;
pub mod service;

pub use generator::{generate_horoscope, HoroscopeGenerator, HoroscopeOutput};
pub use narrative::{MockNarrator, NarrativeError, NarrativeGenerator, TimeoutNarrator};
pub use prompts::{natal_horoscope_prompt, NATAL_HOROSCOPE_PROMPT};
pub use service::{HoroscopeService, PersonalHoroscope};
