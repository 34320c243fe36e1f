use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::aspects::DEFAULT_MAX_ORB;
use crate::ephemeris::HouseSystem;

/// Parameters of chart assembly
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSettings {
    pub house_system: HouseSystem,
    /// Largest orb, in degrees, at which an aspect is still recorded
    pub max_orb: f64,
    /// Time of day assumed when the birth time is unknown
    pub default_time: NaiveTime,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            house_system: HouseSystem::Placidus,
            max_orb: DEFAULT_MAX_ORB,
            default_time: NaiveTime::from_hms_opt(12, 0, 0).unwrap_or_default(),
        }
    }
}
