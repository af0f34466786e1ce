use criterion::{black_box, criterion_group, criterion_main, Criterion};
use deco_planner::{Depth, Gas, GasInventory, GasMix, MultiLevelDiveParameters, Time};

fn air_inventory() -> GasInventory {
    GasInventory::new(Gas::new(GasMix::air()), Vec::new()).unwrap()
}

fn bench_multilevel_reef_profile(c: &mut Criterion) {
    let segments = vec![
        (Depth::from_meters(30.), Time::from_minutes(15.), GasMix::air()),
        (Depth::from_meters(20.), Time::from_minutes(15.), GasMix::air()),
        (Depth::from_meters(12.), Time::from_minutes(20.), GasMix::air()),
    ];
    let params = MultiLevelDiveParameters::new(segments, air_inventory());
    c.bench_function("compute_multilevel_profile 3-segment reef dive", |b| {
        b.iter(|| deco_planner::compute_multilevel_profile(black_box(&params)).unwrap())
    });
}

criterion_group!(benches, bench_multilevel_reef_profile);
criterion_main!(benches);
