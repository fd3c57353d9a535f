use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

use distshare::reactor::derive_distance;
use distshare::{haversine_meters, Coordinates, LocationRecord, Role};

fn bench_haversine(c: &mut Criterion) {
    let london = Coordinates::new(51.5007, 0.1246).unwrap();
    let paris = Coordinates::new(48.8566, 2.3522).unwrap();

    c.bench_function("haversine_meters", |b| {
        b.iter(|| haversine_meters(black_box(london), black_box(paris)));
    });
}

fn bench_derive_distance(c: &mut Criterion) {
    // A realistic snapshot: the two participants plus a handful of records
    // the reduction must skip (unrecognized roles, malformed coordinates).
    let mut records = vec![
        LocationRecord::new(Role::A, 51.5007, 0.1246),
        LocationRecord::new(Role::B, 48.8566, 2.3522),
        LocationRecord::from_raw(Role::A, serde_json::json!("broken"), serde_json::json!(0.0)),
    ];
    for i in 0..13 {
        records.push(LocationRecord::new(
            Role::Other(format!("observer-{i}")),
            f64::from(i),
            f64::from(i),
        ));
    }

    let mut group = c.benchmark_group("derive_distance");
    group.throughput(Throughput::Elements(records.len() as u64));
    group.bench_function("snapshot_16", |b| {
        b.iter(|| derive_distance(black_box(&records)));
    });
    group.finish();
}

criterion_group!(benches, bench_haversine, bench_derive_distance);
criterion_main!(benches);
