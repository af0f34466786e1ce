use deco_planner::{compare_models, Depth, DiveParameters, Gas, GasInventory, GasMix, ModelKind, Time};

fn main() {
    let inventory = GasInventory::new(Gas::new(GasMix::air()), Vec::new()).unwrap();
    let params = DiveParameters::new(Depth::from_meters(40.), Time::from_minutes(25.), inventory);

    let result = compare_models(
        &params,
        &[
            ModelKind::Buhlmann,
            ModelKind::VpmBApprox,
            ModelKind::RgbmApprox,
            ModelKind::UsNavyApprox,
        ],
    )
    .unwrap();

    for entry in &result.entries {
        println!(
            "{}: {:.1} min total decompression",
            entry.model.label(),
            entry.total_decompression_time.as_minutes()
        );
    }
    for note in &result.significant_differences {
        println!("note: {note}");
    }
}
