use astropersona::aspects::AspectCalculator;
use astropersona::chart::{calculate_chart, BirthData, CelestialBody, Planet, ZodiacSign};
use astropersona::ephemeris::{BodyPosition, SnapshotEphemeris};
use astropersona::interpretation::interpret_chart;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn bench_calculate_aspect(c: &mut Criterion) {
    let calculator = AspectCalculator::new();

    c.bench_function("calculate_aspect", |b| {
        b.iter(|| calculator.calculate_aspect(black_box(100.0), black_box(102.0)))
    });
}

fn bench_compute_aspects(c: &mut Criterion) {
    let calculator = AspectCalculator::new();

    let planets: Vec<Planet> = CelestialBody::ALL
        .iter()
        .enumerate()
        .map(|(i, body)| {
            let longitude = (i as f64) * 30.0;
            Planet {
                name: *body,
                sign: ZodiacSign::from_longitude(longitude),
                longitude,
                house: 1,
                is_retrograde: false,
            }
        })
        .collect();

    c.bench_function("compute_aspects", |b| {
        b.iter(|| calculator.compute_aspects(black_box(&planets)))
    });
}

fn bench_chart_and_interpretation(c: &mut Criterion) {
    let eph = CelestialBody::ALL
        .iter()
        .enumerate()
        .fold(SnapshotEphemeris::equal_houses(12.0), |eph, (i, body)| {
            eph.with_body(*body, BodyPosition::new(i as f64 * 41.0, 1.0))
        });
    let birth = BirthData::parse("1990-05-17", Some("12:00"), 44.4, 26.1, "UTC").unwrap();

    c.bench_function("calculate_and_interpret", |b| {
        b.iter(|| {
            let chart = calculate_chart(black_box(&eph), black_box(&birth)).unwrap();
            interpret_chart(&chart)
        })
    });
}

criterion_group!(
    benches,
    bench_calculate_aspect,
    bench_compute_aspects,
    bench_chart_and_interpretation
);
criterion_main!(benches);
