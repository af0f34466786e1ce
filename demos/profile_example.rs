use deco_planner::{compute_profile, Depth, DiveParameters, Gas, GasInventory, GasMix, Time};

fn main() {
    let inventory = GasInventory::new(Gas::new(GasMix::air()), Vec::new()).unwrap();
    let params = DiveParameters::new(Depth::from_meters(30.), Time::from_minutes(25.), inventory)
        .with_gradient_factors(40, 85);

    let profile = compute_profile(&params).unwrap();

    println!("total dive time: {:.1} min", profile.total_dive_time.as_minutes());
    println!(
        "total decompression time: {:.1} min",
        profile.total_decompression_time.as_minutes()
    );
    for stop in &profile.decompression_stops {
        println!(
            "stop at {:.0} m for {:.1} min (runtime {:.1} min)",
            stop.depth.as_meters(),
            stop.duration.as_minutes(),
            stop.runtime.as_minutes()
        );
    }
    if let Some(ndl) = profile.no_decompression_limit {
        println!("NDL: {:.1} min", ndl.as_minutes());
    }
    for warning in &profile.warnings {
        println!("[{:?}] {}: {}", warning.level, warning.message, warning.details);
    }
}
