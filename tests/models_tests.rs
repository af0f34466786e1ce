mod fixtures;

use deco_planner::{
    compare_models, compute_profile, compute_profile_rgbm, compute_profile_vpmb,
    estimate_usnavy_decompression_time, Depth, DiveParameters, ModelKind, Time,
};
use fixtures::air_inventory;

#[test]
fn test_vpmb_is_never_less_conservative_than_buhlmann() {
    let params = DiveParameters::new(Depth::from_meters(42.), Time::from_minutes(28.), air_inventory());
    let baseline = compute_profile(&params).unwrap();
    let vpmb = compute_profile_vpmb(&params).unwrap();
    assert!(vpmb.total_decompression_time >= baseline.total_decompression_time);
}

#[test]
fn test_rgbm_repetitive_penalty_is_monotone_in_dive_count() {
    let params = DiveParameters::new(Depth::from_meters(28.), Time::from_minutes(25.), air_inventory());
    let first = compute_profile_rgbm(&params, 0).unwrap();
    let third = compute_profile_rgbm(&params, 2).unwrap();
    assert!(third.total_dive_time >= first.total_dive_time);
}

#[test]
fn test_usnavy_table_is_non_negative_and_monotone_ish() {
    let shallow = estimate_usnavy_decompression_time(Depth::from_meters(15.), Time::from_minutes(30.));
    let deep = estimate_usnavy_decompression_time(Depth::from_meters(46.), Time::from_minutes(40.));
    assert!(shallow.as_minutes() >= 0.);
    assert!(deep >= shallow);
}

#[test]
fn test_comparator_labels_alternative_models_as_approximations() {
    let params = DiveParameters::new(Depth::from_meters(35.), Time::from_minutes(28.), air_inventory());
    let result = compare_models(
        &params,
        &[ModelKind::Buhlmann, ModelKind::VpmBApprox, ModelKind::RgbmApprox, ModelKind::UsNavyApprox],
    )
    .unwrap();

    assert_eq!(result.entries.len(), 4);
    assert!(ModelKind::VpmBApprox.label().contains("approximation"));
    assert!(ModelKind::RgbmApprox.label().contains("approximation"));
    assert!(ModelKind::UsNavyApprox.label().contains("approximation"));
}
