//! VPM-B approximation (spec §4.10): not the published bubble-model
//! physics, only a parameter preset plus a post-processing adjustment over
//! the C5 scheduler — a model here is a named config variant, never a
//! distinct physics engine.

use crate::buhlmann::scheduler::compute_profile_with_stop_bias;
use crate::common::error::InvalidInput;
use crate::common::profile::{DiveParameters, DiveProfile};

/// Grid steps the first stop is biased deeper by, roughly emulating VPM-B's
/// tendency toward an earlier, deeper first stop (spec §4.10: "bias
/// first-stop rounding one grid step deeper").
const FIRST_STOP_BIAS_GRID_STEPS: u32 = 1;

/// "Educational approximation, not validated" VPM-B-flavored profile (spec
/// §4.10, §9 design note on alternative-model honesty).
pub fn compute_profile_vpmb(params: &DiveParameters) -> Result<DiveProfile, InvalidInput> {
    compute_profile_with_stop_bias(params, FIRST_STOP_BIAS_GRID_STEPS)
}
