mod fixtures;

use deco_planner::{
    analyze_stop, compute_air_consumption, compute_profile, no_fly_time, surface_interval_to_group,
    validate_sequence, Cylinder, CylinderRole, Depth, DiveParameters, SaturationStatus,
    SequenceEntry, SequenceRules, Time,
};
use fixtures::air_inventory;

#[test]
fn test_analyze_stop_over_a_real_profile_snapshot() {
    let params = DiveParameters::new(Depth::from_meters(32.), Time::from_minutes(28.), air_inventory());
    let profile = compute_profile(&params).unwrap();

    let result = analyze_stop(
        &profile.tissue_compartments,
        Depth::zero(),
        params.gradient_factors.low,
        params.gradient_factors.high,
        Depth::zero(),
        params.surface_pressure,
    );

    assert!(result.is_ascent_safe);
    assert!(result.compartments.iter().all(|c| c.status != SaturationStatus::Danger));
}

#[test]
fn test_air_consumption_over_a_real_profile() {
    let params = DiveParameters::new(Depth::from_meters(28.), Time::from_minutes(30.), air_inventory());
    let profile = compute_profile(&params).unwrap();

    let cylinders = [Cylinder {
        name: "back gas".into(),
        volume_liters: 24.,
        start_pressure_bar: 232.,
        role: CylinderRole::Bottom,
    }];
    let result = compute_air_consumption(&profile.segments, 18., 50., &cylinders);

    assert_eq!(result.cylinders.len(), 1);
    assert!(result.cylinders[0].liters_consumed > 0.);
}

#[test]
fn test_surface_interval_and_no_fly_sequence() {
    let params = DiveParameters::new(Depth::from_meters(30.), Time::from_minutes(25.), air_inventory());
    let profile = compute_profile(&params).unwrap();

    let interval = surface_interval_to_group(&profile.tissue_compartments, params.surface_pressure, 'C', 60.);
    assert!(interval.recommended >= Time::from_minutes(60.));

    let no_fly = no_fly_time(&profile.tissue_compartments, params.surface_pressure, false);
    assert!(no_fly.no_fly_time >= Time::from_minutes(12. * 60.));

    let sequence = [SequenceEntry {
        max_depth: profile.max_depth,
        surface_interval_before: Time::zero(),
        final_tissues: profile.tissue_compartments,
    }];
    let warnings = validate_sequence(&sequence, &SequenceRules::default(), params.surface_pressure);
    assert!(!warnings.iter().any(|w| w.message.contains("exceeds the configured daily maximum")));
}
