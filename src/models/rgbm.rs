//! RGBM approximation (spec §4.10): a fixed conservative GF pair plus a
//! repetitive-dive bottom-time penalty, over the same C5 scheduler.

use crate::buhlmann::compute_profile;
use crate::common::error::InvalidInput;
use crate::common::profile::{DiveParameters, DiveProfile};
use crate::common::time::Time;

const RGBM_GF_LOW: u8 = 30;
const RGBM_GF_HIGH: u8 = 70;

/// Repetitive-dive penalty factor scaling effective bottom time, indexed by
/// how many prior dives already happened today (spec §4.10: 1.0/1.1/1.25/1.4).
fn penalty_factor(prior_dive_count: u32) -> f64 {
    match prior_dive_count {
        0 => 1.0,
        1 => 1.1,
        2 => 1.25,
        _ => 1.4,
    }
}

/// "Educational approximation, not validated" RGBM-flavored profile.
/// `prior_dive_count` is the number of dives already completed today before
/// this one (spec §4.10 repetitive-dive penalty).
pub fn compute_profile_rgbm(
    params: &DiveParameters,
    prior_dive_count: u32,
) -> Result<DiveProfile, InvalidInput> {
    let mut adjusted = params.clone();
    adjusted.gradient_factors.low = RGBM_GF_LOW;
    adjusted.gradient_factors.high = RGBM_GF_HIGH;
    adjusted.gradient_factors.validate()?;

    let factor = penalty_factor(prior_dive_count);
    adjusted.bottom_time = Time::from_minutes(adjusted.bottom_time.as_minutes() * factor);

    compute_profile(&adjusted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::depth::Depth;
    use crate::common::gas::{Gas, GasInventory, GasMix};

    fn air_inventory() -> GasInventory {
        GasInventory::new(Gas::new(GasMix::air()), alloc::vec::Vec::new()).unwrap()
    }

    #[test]
    fn test_repetitive_penalty_increases_effective_bottom_time() {
        let params = DiveParameters::new(Depth::from_meters(30.), Time::from_minutes(25.), air_inventory());
        let first_dive = compute_profile_rgbm(&params, 0).unwrap();
        let third_dive = compute_profile_rgbm(&params, 2).unwrap();
        assert!(third_dive.total_dive_time >= first_dive.total_dive_time);
    }

    #[test]
    fn test_rgbm_forces_its_own_gf_pair() {
        let params = DiveParameters::new(Depth::from_meters(20.), Time::from_minutes(20.), air_inventory())
            .with_gradient_factors(80, 95);
        let profile = compute_profile_rgbm(&params, 0);
        assert!(profile.is_ok());
    }
}
