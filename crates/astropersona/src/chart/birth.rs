use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::AstroError;

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMATS: &[&str] = &["%H:%M", "%H:%M:%S"];

/// Validated birth moment and place.
///
/// The timezone label is carried along but not applied: the date and time
/// are handed to the ephemeris as if they were already UT.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BirthDataRecord")]
pub struct BirthData {
    date: NaiveDate,
    time: Option<NaiveTime>,
    latitude: f64,
    longitude: f64,
    timezone: String,
}

#[derive(Deserialize)]
struct BirthDataRecord {
    date: NaiveDate,
    #[serde(default)]
    time: Option<NaiveTime>,
    latitude: f64,
    longitude: f64,
    #[serde(default = "default_timezone")]
    timezone: String,
}

fn default_timezone() -> String {
    "UTC".to_string()
}

impl TryFrom<BirthDataRecord> for BirthData {
    type Error = AstroError;

    fn try_from(record: BirthDataRecord) -> Result<Self, Self::Error> {
        BirthData::new(
            record.date,
            record.time,
            record.latitude,
            record.longitude,
            record.timezone,
        )
    }
}

impl BirthData {
    pub fn new(
        date: NaiveDate,
        time: Option<NaiveTime>,
        latitude: f64,
        longitude: f64,
        timezone: impl Into<String>,
    ) -> Result<Self, AstroError> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(AstroError::invalid_coordinates(format!(
                "latitude {latitude}, longitude {longitude}"
            )));
        }

        let timezone = timezone.into();
        if timezone.trim().is_empty() {
            return Err(AstroError::invalid_date("timezone must not be empty"));
        }

        Ok(Self {
            date,
            time,
            latitude,
            longitude,
            timezone,
        })
    }

    /// Build from `YYYY-MM-DD` and optional `HH:MM` (seconds allowed) strings.
    /// A blank time counts as absent.
    pub fn parse(
        date: &str,
        time: Option<&str>,
        latitude: f64,
        longitude: f64,
        timezone: &str,
    ) -> Result<Self, AstroError> {
        let parsed_date = NaiveDate::parse_from_str(date.trim(), DATE_FORMAT)
            .map_err(|e| AstroError::invalid_date(format!("'{date}': {e}")))?;

        let parsed_time = match time.map(str::trim).filter(|t| !t.is_empty()) {
            Some(t) => Some(parse_time(t)?),
            None => None,
        };

        Self::new(parsed_date, parsed_time, latitude, longitude, timezone)
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn time(&self) -> Option<NaiveTime> {
        self.time
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn timezone(&self) -> &str {
        &self.timezone
    }

    /// Civil timestamp, using `default_time` when no time was given.
    pub fn local_datetime(&self, default_time: NaiveTime) -> NaiveDateTime {
        self.date.and_time(self.time.unwrap_or(default_time))
    }
}

fn parse_time(text: &str) -> Result<NaiveTime, AstroError> {
    TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(text, fmt).ok())
        .ok_or_else(|| AstroError::invalid_date(format!("'{text}' is not a valid HH:MM time")))
}

/// Decimal hour of day for a timestamp
pub fn hour_fraction(datetime: &NaiveDateTime) -> f64 {
    datetime.hour() as f64 + datetime.minute() as f64 / 60.0 + datetime.second() as f64 / 3600.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full() {
        let birth = BirthData::parse("1990-05-17", Some("14:30"), 44.4, 26.1, "UTC").unwrap();
        assert_eq!(birth.date(), NaiveDate::from_ymd_opt(1990, 5, 17).unwrap());
        assert_eq!(birth.time(), NaiveTime::from_hms_opt(14, 30, 0));
        assert_eq!(birth.timezone(), "UTC");
    }

    #[test]
    fn test_parse_seconds_and_blank_time() {
        let with_seconds = BirthData::parse("1990-05-17", Some("06:15:30"), 0.0, 0.0, "UTC").unwrap();
        assert_eq!(with_seconds.time(), NaiveTime::from_hms_opt(6, 15, 30));

        let blank = BirthData::parse("1990-05-17", Some("  "), 0.0, 0.0, "UTC").unwrap();
        assert_eq!(blank.time(), None);
    }

    #[test]
    fn test_default_time_is_used_when_absent() {
        let birth = BirthData::parse("1990-05-17", None, 0.0, 0.0, "UTC").unwrap();
        let noon = NaiveTime::from_hms_opt(12, 0, 0).unwrap();
        let dt = birth.local_datetime(noon);
        assert_eq!(hour_fraction(&dt), 12.0);
    }

    #[test]
    fn test_hour_fraction() {
        let dt = NaiveDate::from_ymd_opt(2000, 1, 1)
            .unwrap()
            .and_hms_opt(18, 45, 36)
            .unwrap();
        assert!((hour_fraction(&dt) - 18.76).abs() < 1e-12);
    }

    #[test]
    fn test_invalid_date() {
        for bad in ["1990/05/17", "1990-13-01", "1990-02-30", ""] {
            let err = BirthData::parse(bad, None, 0.0, 0.0, "UTC").unwrap_err();
            assert_eq!(err.code(), "INVALID_DATE", "input {bad:?}");
        }
        let err = BirthData::parse("1990-05-17", Some("25:00"), 0.0, 0.0, "UTC").unwrap_err();
        assert_eq!(err.code(), "INVALID_DATE");
    }

    #[test]
    fn test_blank_timezone_rejected() {
        for tz in ["", "   "] {
            let err = BirthData::parse("1990-05-17", None, 0.0, 0.0, tz).unwrap_err();
            assert_eq!(err.code(), "INVALID_DATE");
            assert!(err.detail().contains("timezone"));
        }
    }

    #[test]
    fn test_invalid_coordinates() {
        for (lat, lon) in [(90.5, 0.0), (-91.0, 0.0), (0.0, 180.1), (0.0, -181.0), (f64::NAN, 0.0)] {
            let err = BirthData::parse("1990-05-17", None, lat, lon, "UTC").unwrap_err();
            assert_eq!(err.code(), "INVALID_COORDINATES");
        }
        assert!(BirthData::parse("1990-05-17", None, 90.0, -180.0, "UTC").is_ok());
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: BirthData = serde_json::from_str(
            r#"{"date":"1990-05-17","time":"12:00:00","latitude":44.4,"longitude":26.1}"#,
        )
        .unwrap();
        assert_eq!(ok.timezone(), "UTC");

        let bad = serde_json::from_str::<BirthData>(
            r#"{"date":"1990-05-17","latitude":120.0,"longitude":26.1}"#,
        );
        assert!(bad.is_err());
    }
}
