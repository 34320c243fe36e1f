use crate::aspects::types::{Aspect, AspectType};
use crate::chart::{CelestialBody, Planet};

/// Aspect angles in the order they are tried
pub const ASPECT_ANGLES: [AspectType; 5] = [
    AspectType::Conjunction,
    AspectType::Sextile,
    AspectType::Square,
    AspectType::Trine,
    AspectType::Opposition,
];

pub const DEFAULT_MAX_ORB: f64 = 10.0;

/// Aspect calculator
#[derive(Debug, Clone, Copy)]
pub struct AspectCalculator {
    max_orb: f64,
}

impl AspectCalculator {
    /// Create a calculator with the default 10 degree orb
    pub fn new() -> Self {
        Self::with_max_orb(DEFAULT_MAX_ORB)
    }

    pub fn with_max_orb(max_orb: f64) -> Self {
        Self { max_orb }
    }

    pub fn max_orb(&self) -> f64 {
        self.max_orb
    }

    /// Classify the separation between two longitudes.
    ///
    /// Among the angles within `max_orb` the closest one wins; an exact tie
    /// keeps the angle tried first.
    pub fn calculate_aspect(&self, lon1: f64, lon2: f64) -> Option<(AspectType, f64)> {
        let separation = angular_separation(lon1, lon2);

        let mut best: Option<(AspectType, f64)> = None;
        for aspect_type in ASPECT_ANGLES {
            let orb = (separation - aspect_type.angle()).abs();
            if orb > self.max_orb {
                continue;
            }
            match best {
                Some((_, best_orb)) if best_orb <= orb => {}
                _ => best = Some((aspect_type, orb)),
            }
        }
        best
    }

    /// Aspects between every pair of planets, `i < j` in slice order.
    pub fn compute_aspects(&self, planets: &[Planet]) -> Vec<Aspect> {
        let positions: Vec<(CelestialBody, f64)> =
            planets.iter().map(|p| (p.name, p.longitude)).collect();
        self.compute_for_positions(&positions)
    }

    /// Same as [`compute_aspects`](Self::compute_aspects) over raw longitudes.
    pub fn compute_for_positions(&self, positions: &[(CelestialBody, f64)]) -> Vec<Aspect> {
        let mut aspects = Vec::new();
        for i in 0..positions.len() {
            for j in (i + 1)..positions.len() {
                let (body1, lon1) = positions[i];
                let (body2, lon2) = positions[j];

                // Skip if same body
                if body1 == body2 {
                    continue;
                }

                if let Some((aspect_type, orb)) = self.calculate_aspect(lon1, lon2) {
                    aspects.push(Aspect {
                        planet1: body1,
                        planet2: body2,
                        aspect_type,
                        orb,
                    });
                }
            }
        }
        aspects
    }
}

impl Default for AspectCalculator {
    fn default() -> Self {
        Self::new()
    }
}

/// Shortest arc between two longitudes, in [0, 180]
pub fn angular_separation(lon1: f64, lon2: f64) -> f64 {
    let raw_diff = (lon1 - lon2).rem_euclid(360.0);
    if raw_diff > 180.0 {
        360.0 - raw_diff
    } else {
        raw_diff
    }
}
