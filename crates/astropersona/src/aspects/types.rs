use serde::{Deserialize, Serialize};
use std::fmt;

use crate::chart::CelestialBody;

/// Major aspect kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AspectType {
    Conjunction,
    Sextile,
    Square,
    Trine,
    Opposition,
}

impl AspectType {
    pub fn name(self) -> &'static str {
        match self {
            AspectType::Conjunction => "Conjunction",
            AspectType::Sextile => "Sextile",
            AspectType::Square => "Square",
            AspectType::Trine => "Trine",
            AspectType::Opposition => "Opposition",
        }
    }

    /// Exact angle for this aspect in degrees
    pub fn angle(self) -> f64 {
        match self {
            AspectType::Conjunction => 0.0,
            AspectType::Sextile => 60.0,
            AspectType::Square => 90.0,
            AspectType::Trine => 120.0,
            AspectType::Opposition => 180.0,
        }
    }
}

impl fmt::Display for AspectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Aspect between two distinct bodies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aspect {
    pub planet1: CelestialBody,
    pub planet2: CelestialBody,
    #[serde(rename = "type")]
    pub aspect_type: AspectType,
    /// Deviation from the exact angle, degrees
    pub orb: f64,
}
