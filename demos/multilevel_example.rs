use deco_planner::{compute_multilevel_profile, Depth, Gas, GasInventory, GasMix, MultiLevelDiveParameters, Time};

fn main() {
    let inventory = GasInventory::new(Gas::new(GasMix::air()), Vec::new()).unwrap();
    let segments = vec![
        (Depth::from_meters(28.), Time::from_minutes(20.), GasMix::air()),
        (Depth::from_meters(18.), Time::from_minutes(20.), GasMix::air()),
        (Depth::from_meters(10.), Time::from_minutes(25.), GasMix::air()),
    ];
    let params = MultiLevelDiveParameters::new(segments, inventory);

    let profile = compute_multilevel_profile(&params).unwrap();
    println!("max depth: {:.0} m", profile.max_depth.as_meters());
    println!("total dive time: {:.1} min", profile.total_dive_time.as_minutes());
    for warning in &profile.warnings {
        println!("[{:?}] {}", warning.level, warning.message);
    }
}
