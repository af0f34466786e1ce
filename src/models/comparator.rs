//! Model comparator (spec §4.10): aggregates per-model totals given the
//! same dive parameters and flags significant differences between them.

use alloc::string::String;
use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::rgbm::compute_profile_rgbm;
use super::usnavy::estimate_usnavy_decompression_time;
use super::vpmb::compute_profile_vpmb;
use crate::buhlmann::compute_profile;
use crate::common::error::InvalidInput;
use crate::common::profile::DiveParameters;
use crate::common::time::Time;

/// Which model to run for one comparator entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ModelKind {
    Buhlmann,
    VpmBApprox,
    RgbmApprox,
    UsNavyApprox,
}

impl ModelKind {
    /// Spec §9 design note: alternative models must be labeled as
    /// approximations so consumers don't mistake them for the real physics.
    pub fn label(&self) -> &'static str {
        match self {
            ModelKind::Buhlmann => "Bühlmann ZHL-16C (gradient factors)",
            ModelKind::VpmBApprox => "VPM-B (educational approximation, not validated)",
            ModelKind::RgbmApprox => "RGBM (educational approximation, not validated)",
            ModelKind::UsNavyApprox => "US Navy tables (educational approximation, not validated)",
        }
    }
}

/// One model's totals within a [`ComparisonResult`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ComparisonEntry {
    pub model: ModelKind,
    pub total_dive_time: Time,
    pub total_decompression_time: Time,
}

/// Result of [`compare_models`] (spec §6 item 7).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ComparisonResult {
    pub entries: Vec<ComparisonEntry>,
    /// Human-readable notes about entries whose decompression time differs
    /// from the Bühlmann baseline by more than 20%.
    pub significant_differences: Vec<String>,
}

const SIGNIFICANCE_THRESHOLD: f64 = 0.20;

/// Runs each of `models` over the same `parameters` and aggregates totals
/// plus significance-flagged differences against the Bühlmann baseline
/// (spec §4.10). US-Navy is table-estimated only, not a full schedule.
pub fn compare_models(
    parameters: &DiveParameters,
    models: &[ModelKind],
) -> Result<ComparisonResult, InvalidInput> {
    let mut entries = Vec::with_capacity(models.len());

    for &model in models {
        let entry = match model {
            ModelKind::Buhlmann => {
                let profile = compute_profile(parameters)?;
                ComparisonEntry {
                    model,
                    total_dive_time: profile.total_dive_time,
                    total_decompression_time: profile.total_decompression_time,
                }
            }
            ModelKind::VpmBApprox => {
                let profile = compute_profile_vpmb(parameters)?;
                ComparisonEntry {
                    model,
                    total_dive_time: profile.total_dive_time,
                    total_decompression_time: profile.total_decompression_time,
                }
            }
            ModelKind::RgbmApprox => {
                let profile = compute_profile_rgbm(parameters, 0)?;
                ComparisonEntry {
                    model,
                    total_dive_time: profile.total_dive_time,
                    total_decompression_time: profile.total_decompression_time,
                }
            }
            ModelKind::UsNavyApprox => {
                let deco_time =
                    estimate_usnavy_decompression_time(parameters.depth, parameters.bottom_time);
                ComparisonEntry {
                    model,
                    total_dive_time: parameters.bottom_time + deco_time,
                    total_decompression_time: deco_time,
                }
            }
        };
        entries.push(entry);
    }

    let baseline = entries.iter().find(|e| e.model == ModelKind::Buhlmann).cloned();
    let mut significant_differences = Vec::new();
    if let Some(baseline) = baseline {
        let baseline_minutes = baseline.total_decompression_time.as_minutes();
        for entry in &entries {
            if entry.model == ModelKind::Buhlmann {
                continue;
            }
            let delta = (entry.total_decompression_time.as_minutes() - baseline_minutes).abs();
            let relative = if baseline_minutes > 0. {
                delta / baseline_minutes
            } else if delta > 0. {
                1.0
            } else {
                0.0
            };
            if relative > SIGNIFICANCE_THRESHOLD {
                significant_differences.push(alloc::format!(
                    "{} differs from the Bühlmann baseline by {:.0} minutes of decompression time",
                    entry.model.label(),
                    delta
                ));
            }
        }
    }

    Ok(ComparisonResult {
        entries,
        significant_differences,
    })
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
    fn test_compares_all_models_and_labels_them_as_approximations() {
        let params = DiveParameters::new(Depth::from_meters(30.), Time::from_minutes(30.), air_inventory());
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
        assert_eq!(result.entries.len(), 4);
        for kind in [ModelKind::VpmBApprox, ModelKind::RgbmApprox, ModelKind::UsNavyApprox] {
            assert!(kind.label().contains("approximation"));
        }
    }
}
