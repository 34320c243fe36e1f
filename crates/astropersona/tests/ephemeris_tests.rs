use astropersona::chart::{calculate_chart, BirthData, CelestialBody};
use astropersona::ephemeris::{BodyPosition, Ephemeris, EphemerisError, HouseSystem, SnapshotEphemeris};
use std::io::Write;

fn captured_snapshot() -> SnapshotEphemeris {
    CelestialBody::ALL
        .iter()
        .enumerate()
        .fold(SnapshotEphemeris::equal_houses(15.0), |eph, (i, body)| {
            eph.with_body(*body, BodyPosition::new(i as f64 * 29.0 + 3.0, 0.8))
        })
}

#[test]
fn test_snapshot_file_roundtrip() {
    let snapshot = captured_snapshot();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(serde_json::to_string_pretty(&snapshot).unwrap().as_bytes())
        .unwrap();

    let loaded = SnapshotEphemeris::from_path(file.path()).unwrap();
    assert_eq!(loaded, snapshot);

    let birth = BirthData::parse("2001-09-09", None, 51.5, -0.1, "Europe/London").unwrap();
    assert_eq!(
        calculate_chart(&loaded, &birth).unwrap(),
        calculate_chart(&snapshot, &birth).unwrap()
    );
}

#[test]
fn test_missing_snapshot_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = SnapshotEphemeris::from_path(dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, EphemerisError::FileNotFound { .. }));
}

#[test]
fn test_snapshot_ignores_instant_and_place() {
    let eph = captured_snapshot();
    let a = eph.house_cusps(2_451_545.0, 10.0, 10.0, HouseSystem::Placidus).unwrap();
    let b = eph.house_cusps(2_460_000.5, -33.9, 151.2, HouseSystem::Placidus).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.cusp(1), Some(15.0));
}

#[test]
fn test_default_julian_day() {
    let eph = captured_snapshot();
    assert_eq!(eph.julian_day(2000, 1, 1, 12.0), 2_451_545.0);
    assert_eq!(eph.julian_day(1990, 5, 17, 0.0), 2_448_028.5);
}

#[test]
fn test_boxed_gateway() {
    let boxed: Box<dyn Ephemeris> = Box::new(captured_snapshot());
    let birth = BirthData::parse("2001-09-09", Some("08:46"), 40.7, -74.0, "UTC").unwrap();
    let chart = calculate_chart(&boxed, &birth).unwrap();
    assert_eq!(chart.planets.len(), 10);
}

#[cfg(feature = "swisseph")]
mod swiss {
    use astropersona::chart::{BirthData, CelestialBody, ChartAssembler, ZodiacSign};
    use astropersona::ephemeris::SwissEphemerisAdapter;

    #[test]
    #[ignore] // Requires Swiss Ephemeris files
    fn test_swiss_chart_basic() {
        let adapter = SwissEphemerisAdapter::new(None).unwrap();
        let birth = BirthData::parse("1990-05-17", Some("12:00"), 44.4, 26.1, "UTC").unwrap();

        let chart = ChartAssembler::new(adapter).calculate_chart(&birth).unwrap();

        assert_eq!(chart.planets.len(), 10);
        assert_eq!(chart.houses.len(), 12);
        // Sun sits in late Taurus in mid May
        let sun = chart.planet(CelestialBody::Sun).unwrap();
        assert_eq!(sun.sign, ZodiacSign::Taurus);
        assert!(!sun.is_retrograde);
    }
}
