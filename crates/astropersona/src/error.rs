//! Domain error taxonomy.
//!
//! Every failure surfaced to callers carries a machine-readable code, a fixed
//! human message and a free-form detail string.

use thiserror::Error;

use crate::ephemeris::EphemerisError;
use crate::horoscope::NarrativeError;
use crate::store::StoreError;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AstroError {
    #[error("Latitude must be between -90 and 90, longitude between -180 and 180. {detail}")]
    InvalidCoordinates { detail: String },
    #[error("Invalid date format. Use YYYY-MM-DD. {detail}")]
    InvalidDate { detail: String },
    #[error("Error calculating astrological data. {detail}")]
    Calculation { detail: String },
    #[error("Error generating horoscope narrative. {detail}")]
    NarrativeGeneration { detail: String },
    #[error("Error accessing profile storage. {detail}")]
    Storage { detail: String },
}

impl AstroError {
    pub fn invalid_coordinates(detail: impl Into<String>) -> Self {
        AstroError::InvalidCoordinates { detail: detail.into() }
    }

    pub fn invalid_date(detail: impl Into<String>) -> Self {
        AstroError::InvalidDate { detail: detail.into() }
    }

    pub fn calculation(detail: impl Into<String>) -> Self {
        AstroError::Calculation { detail: detail.into() }
    }

    pub fn narrative(detail: impl Into<String>) -> Self {
        AstroError::NarrativeGeneration { detail: detail.into() }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AstroError::InvalidCoordinates { .. } => "INVALID_COORDINATES",
            AstroError::InvalidDate { .. } => "INVALID_DATE",
            AstroError::Calculation { .. } => "CALCULATION_ERROR",
            AstroError::NarrativeGeneration { .. } => "NARRATIVE_GENERATION_ERROR",
            AstroError::Storage { .. } => "STORAGE_ERROR",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            AstroError::InvalidCoordinates { .. } => {
                "Latitude must be between -90 and 90, longitude between -180 and 180."
            }
            AstroError::InvalidDate { .. } => "Invalid date format. Use YYYY-MM-DD.",
            AstroError::Calculation { .. } => "Error calculating astrological data.",
            AstroError::NarrativeGeneration { .. } => "Error generating horoscope narrative.",
            AstroError::Storage { .. } => "Error accessing profile storage.",
        }
    }

    pub fn detail(&self) -> &str {
        match self {
            AstroError::InvalidCoordinates { detail }
            | AstroError::InvalidDate { detail }
            | AstroError::Calculation { detail }
            | AstroError::NarrativeGeneration { detail }
            | AstroError::Storage { detail } => detail,
        }
    }
}

impl From<EphemerisError> for AstroError {
    fn from(err: EphemerisError) -> Self {
        AstroError::calculation(err.to_string())
    }
}

impl From<NarrativeError> for AstroError {
    fn from(err: NarrativeError) -> Self {
        AstroError::narrative(err.to_string())
    }
}

impl From<StoreError> for AstroError {
    fn from(err: StoreError) -> Self {
        AstroError::Storage { detail: err.to_string() }
    }
}
