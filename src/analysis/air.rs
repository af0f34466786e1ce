//! Air consumption (C9): SAC-rate-driven gas usage per segment and
//! per-cylinder allocation by role, accumulated the same way other
//! per-segment derived metrics are: fold over the segment list, track a
//! running total per cylinder, and flag reserve-pressure violations as
//! warnings rather than errors.

use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::common::profile::DiveSegment;
use crate::common::warning::Warning;

/// Which cylinder a segment's gas draw should be routed to (spec §4.9).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CylinderRole {
    Bottom,
    Deco,
    Bailout,
}

/// One gas cylinder in the loadout.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Cylinder {
    pub name: alloc::string::String,
    pub volume_liters: f64,
    pub start_pressure_bar: f64,
    pub role: CylinderRole,
}

/// Per-cylinder consumption outcome.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CylinderUsage {
    pub name: alloc::string::String,
    pub liters_consumed: f64,
    pub final_pressure_bar: f64,
    pub percent_used: f64,
    pub below_reserve: bool,
}

/// Result of [`compute_air_consumption`] (spec §6 item 6).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AirConsumptionResult {
    pub cylinders: Vec<CylinderUsage>,
    pub warnings: Vec<Warning>,
    pub insufficient: bool,
}

/// Litres needed for one segment at surface-equivalent SAC rate `sac`
/// (spec §4.9: `S · ((depth/10)+1) · duration`).
fn liters_for_segment(segment: &DiveSegment, sac: f64) -> f64 {
    sac * (segment.depth.as_meters() / 10. + 1.) * segment.duration.as_minutes()
}

fn role_for_segment(segment: &DiveSegment) -> CylinderRole {
    use crate::common::profile::SegmentKind;
    match segment.kind {
        SegmentKind::Deco => CylinderRole::Deco,
        _ => CylinderRole::Bottom,
    }
}

/// Computes per-cylinder gas usage over `segments` (spec §4.9). Each
/// segment's air need routes to the first cylinder matching its role,
/// falling back to a `Bottom` cylinder, and spills into the next matching
/// cylinder once the current one reaches `reserve_bar`.
pub fn compute_air_consumption(
    segments: &[DiveSegment],
    sac: f64,
    reserve_bar: f64,
    cylinders: &[Cylinder],
) -> AirConsumptionResult {
    let mut remaining_liters: Vec<f64> = cylinders
        .iter()
        .map(|c| (c.start_pressure_bar - reserve_bar).max(0.) * c.volume_liters)
        .collect();
    let mut spilled: Vec<f64> = alloc::vec![0.; cylinders.len()];

    for segment in segments {
        let mut need = liters_for_segment(segment, sac);
        let role = role_for_segment(segment);

        let mut order: Vec<usize> = (0..cylinders.len())
            .filter(|&i| cylinders[i].role == role)
            .collect();
        if order.is_empty() {
            order = (0..cylinders.len())
                .filter(|&i| cylinders[i].role == CylinderRole::Bottom)
                .collect();
        }

        for (pos, &i) in order.iter().enumerate() {
            if need <= 0. {
                break;
            }
            let is_last = pos == order.len() - 1;
            // every cylinder but the last caps its draw at its own reserve
            // and spills the remainder onward; the last absorbs whatever is
            // left even past reserve, so a shortfall surfaces as that
            // cylinder's `below_reserve` flag rather than vanishing silently.
            let draw = if is_last { need } else { need.min(remaining_liters[i]) };
            remaining_liters[i] -= draw;
            spilled[i] += draw;
            need -= draw;
        }
    }

    let mut warnings = Vec::new();
    let mut insufficient = false;
    let mut usages = Vec::with_capacity(cylinders.len());

    for (i, cylinder) in cylinders.iter().enumerate() {
        let total_usable = (cylinder.start_pressure_bar - reserve_bar).max(0.) * cylinder.volume_liters;
        let consumed = spilled[i];
        let final_pressure_bar = cylinder.start_pressure_bar
            - if cylinder.volume_liters > 0. {
                consumed / cylinder.volume_liters
            } else {
                0.
            };
        let percent_used = if total_usable > 0. { consumed / total_usable * 100. } else { 0. };
        let below_reserve = final_pressure_bar < reserve_bar;

        if percent_used > 90. {
            warnings.push(Warning::warning(
                "cylinder usage exceeds 90%",
                "little margin remains on this cylinder",
            ));
        }
        if below_reserve {
            warnings.push(Warning::danger(
                "cylinder projected below reserve pressure",
                "planned consumption exceeds the available usable gas",
            ));
            insufficient = true;
        }

        usages.push(CylinderUsage {
            name: cylinder.name.clone(),
            liters_consumed: consumed,
            final_pressure_bar,
            percent_used,
            below_reserve,
        });
    }

    AirConsumptionResult {
        cylinders: usages,
        warnings,
        insufficient,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::depth::Depth;
    use crate::common::gas::GasMix;
    use crate::common::profile::SegmentKind;
    use crate::common::time::Time;

    fn bottom_cylinder() -> Cylinder {
        Cylinder {
            name: alloc::string::String::from("back gas"),
            volume_liters: 24.,
            start_pressure_bar: 200.,
            role: CylinderRole::Bottom,
        }
    }

    #[test]
    fn test_simple_bottom_segment_consumes_expected_liters() {
        let segments = alloc::vec![DiveSegment {
            depth: Depth::from_meters(20.),
            duration: Time::from_minutes(20.),
            gas: GasMix::air(),
            kind: SegmentKind::Bottom,
        }];
        let result = compute_air_consumption(&segments, 20., 50., &[bottom_cylinder()]);
        assert!((result.cylinders[0].liters_consumed - 20. * 3. * 20.).abs() < 1e-6);
        assert!(!result.insufficient);
    }

    #[test]
    fn test_deco_segment_routes_to_deco_cylinder() {
        let segments = alloc::vec![DiveSegment {
            depth: Depth::from_meters(6.),
            duration: Time::from_minutes(10.),
            gas: GasMix::nitrox(1.0).unwrap(),
            kind: SegmentKind::Deco,
        }];
        let deco_cylinder = Cylinder {
            name: alloc::string::String::from("deco O2"),
            volume_liters: 11.,
            start_pressure_bar: 200.,
            role: CylinderRole::Deco,
        };
        let result = compute_air_consumption(&segments, 20., 50., &[bottom_cylinder(), deco_cylinder]);
        assert!(result.cylinders[0].liters_consumed == 0.);
        assert!(result.cylinders[1].liters_consumed > 0.);
    }

    #[test]
    fn test_insufficient_gas_flags_below_reserve() {
        let segments = alloc::vec![DiveSegment {
            depth: Depth::from_meters(40.),
            duration: Time::from_minutes(120.),
            gas: GasMix::air(),
            kind: SegmentKind::Bottom,
        }];
        let small_cylinder = Cylinder {
            name: alloc::string::String::from("pony"),
            volume_liters: 7.,
            start_pressure_bar: 200.,
            role: CylinderRole::Bottom,
        };
        let result = compute_air_consumption(&segments, 20., 50., &[small_cylinder]);
        assert!(result.insufficient);
        assert!(result.cylinders[0].below_reserve);
    }
}
