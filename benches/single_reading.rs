use criterion::{black_box, criterion_group, criterion_main, Criterion};
use soil_scorer_rust::scorer::score_batch;
use soil_scorer_rust::{ParameterCatalog, SoilQualityEngine, SoilReading};

fn bench_single_reading(c: &mut Criterion) {
    let engine = SoilQualityEngine::standard();
    let reading = SoilReading::from_values([5.0, 25.0, 22.0, 15.0, 60.0, 90.0], "bench");

    c.bench_function("analyse_single_reading", |b| {
        b.iter(|| engine.analyse(black_box(reading.clone())))
    });
}

fn bench_batch(c: &mut Criterion) {
    let catalog = ParameterCatalog::standard();
    let readings: Vec<SoilReading> = (0..1000)
        .map(|i| {
            let t = i as f64;
            SoilReading::from_values(
                [3.0 + (t % 70.0) / 10.0, t % 100.0, t % 50.0, t % 200.0, t % 150.0, t % 600.0],
                "bench",
            )
        })
        .collect();

    c.bench_function("score_batch_1000", |b| {
        b.iter(|| score_batch(black_box(&readings), &catalog))
    });
}

criterion_group!(benches, bench_single_reading, bench_batch);
criterion_main!(benches);
