use astropersona::chart::{BirthData, CelestialBody, ZodiacSign};
use astropersona::ephemeris::{BodyPosition, SnapshotEphemeris};
use astropersona::horoscope::{
    generate_horoscope, HoroscopeGenerator, HoroscopeService, MockNarrator, NarrativeError,
};
use astropersona::store::{InMemoryStore, KeyValueStore, StoreError};
use std::sync::Arc;

fn snapshot() -> SnapshotEphemeris {
    CelestialBody::ALL
        .iter()
        .enumerate()
        .fold(SnapshotEphemeris::equal_houses(0.0), |eph, (i, body)| {
            let lon = if *body == CelestialBody::Sun { 135.0 } else { i as f64 * 37.0 };
            eph.with_body(*body, BodyPosition::new(lon, 1.0))
        })
}

fn birth() -> BirthData {
    BirthData::parse("1990-05-17", Some("12:00"), 44.4, 26.1, "UTC").unwrap()
}

#[tokio::test]
async fn test_generate_horoscope_combines_parts() {
    let narrator = MockNarrator::new("Your Leo sun shines.");
    let output = generate_horoscope(&snapshot(), &narrator, &birth()).await.unwrap();

    assert_eq!(output.narrative_text, "Your Leo sun shines.");
    assert_eq!(output.chart.planets.len(), 10);
    assert_eq!(output.chart.planet(CelestialBody::Sun).unwrap().sign, ZodiacSign::Leo);
    assert!(output.interpretation.strengths.contains(&"charisma".to_string()));
    assert_eq!(narrator.call_count(), 1);
}

#[tokio::test]
async fn test_prompt_embeds_chart_json() {
    let narrator = MockNarrator::default();
    let output = generate_horoscope(&snapshot(), &narrator, &birth()).await.unwrap();

    let prompt = narrator.last_prompt().unwrap();
    assert!(prompt.contains("You are a professional astrologer."));
    let expected = serde_json::to_string_pretty(&output.chart).unwrap();
    assert!(prompt.contains(&expected));
}

#[tokio::test]
async fn test_narrator_failure_is_fatal() {
    let narrator = MockNarrator::failing(NarrativeError::Communication("503".to_string()));
    let err = generate_horoscope(&snapshot(), &narrator, &birth()).await.unwrap_err();

    assert_eq!(err.code(), "NARRATIVE_GENERATION_ERROR");
    assert!(err.detail().contains("503"));
}

#[tokio::test]
async fn test_chart_failure_skips_narrator() {
    let narrator = MockNarrator::default();
    let empty = SnapshotEphemeris::equal_houses(0.0);
    let err = generate_horoscope(&empty, &narrator, &birth()).await.unwrap_err();

    assert_eq!(err.code(), "CALCULATION_ERROR");
    assert_eq!(narrator.call_count(), 0);
}

#[tokio::test]
async fn test_personal_horoscope_is_stored() {
    let store = Arc::new(InMemoryStore::new());
    let service = HoroscopeService::new(
        HoroscopeGenerator::new(snapshot(), MockNarrator::new("stored")),
        Arc::clone(&store),
    );

    let personal = service.generate_personal(birth()).await.unwrap();
    assert_eq!(personal.user_id.len(), 36);
    assert_eq!(personal.horoscope.narrative_text, "stored");

    let profile = service.profiles().get_profile(&personal.user_id).unwrap().unwrap();
    assert_eq!(profile.birth, birth());
    let chart = service.profiles().get_chart(&personal.user_id).unwrap().unwrap();
    assert_eq!(chart, personal.horoscope.chart);
    assert_eq!(store.len(), 2);
}

#[tokio::test]
async fn test_personal_ids_are_unique() {
    let service = HoroscopeService::new(
        HoroscopeGenerator::new(snapshot(), MockNarrator::default()),
        InMemoryStore::new(),
    );
    let a = service.generate_personal(birth()).await.unwrap();
    let b = service.generate_personal(birth()).await.unwrap();
    assert_ne!(a.user_id, b.user_id);
}

#[tokio::test]
async fn test_failed_generation_stores_nothing() {
    let store = Arc::new(InMemoryStore::new());
    let service = HoroscopeService::new(
        HoroscopeGenerator::new(
            snapshot(),
            MockNarrator::failing(NarrativeError::Other("quota".to_string())),
        ),
        Arc::clone(&store),
    );

    let err = service.generate_for("user-1", birth()).await.unwrap_err();
    assert_eq!(err.code(), "NARRATIVE_GENERATION_ERROR");
    assert!(store.is_empty());
    assert_eq!(store.get("profile:user-1").unwrap(), None);
}

/// Rejects writes whose key starts with `prefix`.
struct RejectingStore {
    inner: InMemoryStore,
    prefix: &'static str,
}

impl KeyValueStore for RejectingStore {
    fn save(&self, key: &str, value: String) -> Result<(), StoreError> {
        if key.starts_with(self.prefix) {
            return Err(StoreError::Backend(format!("write to {key} rejected")));
        }
        self.inner.save(key, value)
    }

    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.inner.get(key)
    }
}

#[tokio::test]
async fn test_chart_write_failure_leaves_no_profile() {
    let store = Arc::new(RejectingStore {
        inner: InMemoryStore::new(),
        prefix: "chart:",
    });
    let service = HoroscopeService::new(
        HoroscopeGenerator::new(snapshot(), MockNarrator::new("text")),
        Arc::clone(&store),
    );

    let err = service.generate_for("user-2", birth()).await.unwrap_err();
    assert_eq!(err.code(), "STORAGE_ERROR");
    assert_eq!(service.profiles().get_profile("user-2").unwrap(), None);
    assert!(store.inner.is_empty());
}
