use criterion::{black_box, criterion_group, criterion_main, Criterion};
use synop::{filter_by_name, sort_records, Column, Measurement, StationRecord};

fn stations() -> Vec<StationRecord> {
    (0..500)
        .map(|i| {
            let mut record = StationRecord::named(format!("Stacja {:03}", (i * 37) % 500));
            record.temperature_c = match i % 50 {
                0 => None,
                1 => Some(Measurement::Unparsed("brak".into())),
                _ => Some(Measurement::Value(((i * 13) % 400) as f64 / 10.0 - 10.0)),
            };
            record.measurement_hour = Some(format!("{}", i % 24));
            record
        })
        .collect()
}

fn bench_pipeline(c: &mut Criterion) {
    let records = stations();
    c.bench_function("filter_by_name", |b| {
        b.iter(|| filter_by_name(black_box(&records), black_box("CJA 1")))
    });
    c.bench_function("sort_by_temperature", |b| {
        b.iter(|| sort_records(black_box(records.clone()), Column::Temperature, true))
    });
    c.bench_function("filter_then_sort", |b| {
        b.iter(|| {
            let filtered = filter_by_name(black_box(&records), black_box("stacja"));
            sort_records(filtered, Column::Hour, false)
        })
    });
}

criterion_group!(benches, bench_pipeline);
criterion_main!(benches);
