use deco_planner::{
    compute_air_consumption, compute_profile, no_fly_time, surface_interval_to_group, Cylinder,
    CylinderRole, Depth, DiveParameters, Gas, GasInventory, GasMix, Time,
};

fn main() {
    let inventory = GasInventory::new(Gas::new(GasMix::air()), Vec::new()).unwrap();
    let params = DiveParameters::new(Depth::from_meters(30.), Time::from_minutes(25.), inventory);
    let profile = compute_profile(&params).unwrap();

    let cylinders = [Cylinder {
        name: String::from("single 12L"),
        volume_liters: 12.,
        start_pressure_bar: 200.,
        role: CylinderRole::Bottom,
    }];
    let air = compute_air_consumption(&profile.segments, 18., 50., &cylinders);
    println!("{} bar remaining", air.cylinders[0].final_pressure_bar);

    let interval = surface_interval_to_group(&profile.tissue_compartments, params.surface_pressure, 'C', 60.);
    println!(
        "surface interval to reach group C: {:.0} min (recommended {:.0} min)",
        interval.minimum.as_minutes(),
        interval.recommended.as_minutes()
    );

    let no_fly = no_fly_time(&profile.tissue_compartments, params.surface_pressure, false);
    println!("no-fly time: {:.0} h", no_fly.no_fly_time.as_minutes() / 60.);
}
