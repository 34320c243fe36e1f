pub mod calculator;
pub mod types;

pub use calculator::{angular_separation, AspectCalculator, ASPECT_ANGLES, DEFAULT_MAX_ORB};
pub use types::{Aspect, AspectType};
