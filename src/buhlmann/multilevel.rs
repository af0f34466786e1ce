//! Multi-level extension (C6): composes the transition/hold step
//! primitives over a caller-supplied segment list instead of a single
//! bottom depth, then hands off to the C5 stop-loop machinery.

use alloc::vec::Vec;

use super::compartment::TissueCompartment;
use super::scheduler::{
    assemble_warnings_multilevel, controlling_ceiling, run_stop_phase, validate_multilevel_parameters,
};
use crate::common::depth::Depth;
use crate::common::error::InvalidInput;
use crate::common::gas::depth_to_pressure;
use crate::common::profile::{DiveProfile, DiveSegment, MultiLevelDiveParameters, SegmentKind};
use crate::common::time::Time;
use crate::common::warning::Warning;

/// Computes a profile over an ordered sequence of depth/time/gas legs (spec
/// §4.6), then runs the same ascent/stop logic C5 uses from the resulting
/// tissue state.
pub fn compute_multilevel_profile(
    params: &MultiLevelDiveParameters,
) -> Result<DiveProfile, InvalidInput> {
    validate_multilevel_parameters(params)?;

    let surface_pressure = params.surface_pressure;
    let gf = params.gradient_factors;

    let mut tissues = params
        .initial_tissues
        .unwrap_or_else(|| TissueCompartment::initial_surface_state(surface_pressure));

    let mut segments = Vec::new();
    let mut runtime = Time::zero();
    let mut depth_time = 0.;
    let mut time_weight = 0.;
    let mut warnings = Vec::new();
    let mut max_depth = Depth::zero();
    let mut current_depth = Depth::zero();
    let mut prev_segment_depth: Option<Depth> = None;

    for (depth, duration, gas) in params.segments.iter().copied() {
        if depth > max_depth {
            max_depth = depth;
        }
        if let Some(prev) = prev_segment_depth {
            if depth > prev {
                warnings.push(Warning::info(
                    "reverse profile",
                    "this segment is deeper than the previous one",
                ));
            }
        }
        prev_segment_depth = Some(depth);

        let rate = if depth >= current_depth {
            params.descent_rate
        } else {
            params.ascent_rate
        };
        let transition_duration = super::scheduler::transition(
            &mut tissues,
            current_depth,
            depth,
            rate,
            gas,
            surface_pressure,
        );
        if transition_duration.as_seconds() > 0. {
            runtime += transition_duration;
            super::scheduler::accumulate_depth_time(
                &mut depth_time,
                &mut time_weight,
                (current_depth.as_meters() + depth.as_meters()) / 2.,
                transition_duration,
            );
            segments.push(DiveSegment {
                depth,
                duration: transition_duration,
                gas,
                kind: if depth >= current_depth {
                    SegmentKind::Descent
                } else {
                    SegmentKind::Ascent
                },
            });
        }

        if duration.as_seconds() > 0. {
            let p_amb = depth_to_pressure(depth, surface_pressure);
            for t in tissues.iter_mut() {
                t.update_constant_depth(p_amb, gas.f_n2, gas.f_he, duration.as_minutes());
            }
            runtime += duration;
            super::scheduler::accumulate_depth_time(&mut depth_time, &mut time_weight, depth.as_meters(), duration);
            segments.push(DiveSegment {
                depth,
                duration,
                gas,
                kind: SegmentKind::Bottom,
            });
        }

        current_depth = depth;
    }

    let last_gas = params
        .segments
        .last()
        .map(|(_, _, gas)| *gas)
        .unwrap_or_else(|| params.gases.bottom_gas.mix);

    let gf_low_fraction = gf.low as f64 / 100.;
    let raw_ceiling = controlling_ceiling(&tissues, surface_pressure, gf_low_fraction);
    let mut first_stop_depth = raw_ceiling.ceil_to_grid(params.stop_grid);
    if first_stop_depth.as_meters() > 0. {
        let max_first_stop = Depth::from_meters((current_depth.as_meters() - params.stop_grid).max(0.));
        if first_stop_depth > max_first_stop {
            first_stop_depth = max_first_stop;
        }
    }

    let decompression_stops;
    let gas_switches;
    let final_tissues;
    let time_to_surface;
    let time_to_surface_in_5;
    let gf_99;
    let gf_surf;
    let diverged;

    if first_stop_depth.as_meters() <= 0. {
        let gf_99_snapshot = super::scheduler::supersaturation_percent(
            &tissues,
            depth_to_pressure(current_depth, surface_pressure),
        );
        let ascent = super::scheduler::transition(
            &mut tissues,
            current_depth,
            Depth::zero(),
            params.ascent_rate,
            last_gas,
            surface_pressure,
        );
        if ascent.as_seconds() > 0. {
            runtime += ascent;
            super::scheduler::accumulate_depth_time(
                &mut depth_time,
                &mut time_weight,
                current_depth.as_meters() / 2.,
                ascent,
            );
            segments.push(DiveSegment {
                depth: Depth::zero(),
                duration: ascent,
                gas: last_gas,
                kind: SegmentKind::Ascent,
            });
        }
        decompression_stops = Vec::new();
        gas_switches = Vec::new();
        final_tissues = tissues;
        time_to_surface = ascent;
        time_to_surface_in_5 = ascent;
        gf_99 = gf_99_snapshot;
        gf_surf = super::scheduler::supersaturation_percent(&final_tissues, surface_pressure);
        diverged = false;
    } else {
        let gf_99_snapshot = super::scheduler::supersaturation_percent(
            &tissues,
            depth_to_pressure(first_stop_depth, surface_pressure),
        );
        let outcome = run_stop_phase(
            tissues,
            current_depth,
            first_stop_depth,
            params.stop_grid,
            gf,
            &params.gases,
            last_gas,
            surface_pressure,
            params.ascent_rate,
            params.max_stop_iterations,
            max_depth,
            params.safety_stop_depth,
            params.safety_stop_time_min,
        );
        let outcome_at_5 = run_stop_phase(
            tissues,
            current_depth,
            first_stop_depth,
            5.0,
            gf,
            &params.gases,
            last_gas,
            surface_pressure,
            params.ascent_rate,
            params.max_stop_iterations,
            max_depth,
            params.safety_stop_depth,
            params.safety_stop_time_min,
        );

        runtime += outcome.elapsed;
        depth_time += outcome.depth_time;
        time_weight += outcome.time_weight;
        segments.extend(outcome.segments.iter().cloned());

        decompression_stops = outcome.stops;
        gas_switches = outcome.switches;
        final_tissues = outcome.tissues;
        time_to_surface = outcome.elapsed;
        time_to_surface_in_5 = outcome_at_5.elapsed;
        gf_99 = gf_99_snapshot;
        gf_surf = super::scheduler::supersaturation_percent(&final_tissues, surface_pressure);
        diverged = outcome.diverged;
    }

    let total_decompression_time = decompression_stops
        .iter()
        .fold(Time::zero(), |acc, s| acc + s.duration);

    let average_depth = if time_weight > 0. {
        Depth::from_meters(depth_time / time_weight)
    } else {
        Depth::zero()
    };

    warnings.extend(assemble_warnings_multilevel(
        &params.segments,
        &decompression_stops,
        surface_pressure,
        runtime,
        total_decompression_time,
    ));
    if diverged {
        warnings.push(Warning::danger(
            "decompression stop loop hit its iteration cap",
            "the schedule below is best-effort and did not fully converge",
        ));
    }

    Ok(DiveProfile {
        decompression_stops,
        segments,
        gas_switches,
        total_dive_time: runtime,
        total_decompression_time,
        no_decompression_limit: None,
        tissue_compartments: final_tissues,
        max_depth,
        average_depth,
        warnings,
        time_to_surface,
        time_to_surface_in_5,
        gf_99,
        gf_surf,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::gas::{Gas, GasInventory, GasMix};

    fn air_inventory() -> GasInventory {
        GasInventory::new(Gas::new(GasMix::air()), Vec::new()).unwrap()
    }

    #[test]
    fn test_monotone_descending_profile_reports_no_reverse_warning() {
        let segments = alloc::vec![
            (Depth::from_meters(40.), Time::from_minutes(15.), GasMix::air()),
            (Depth::from_meters(30.), Time::from_minutes(10.), GasMix::air()),
            (Depth::from_meters(20.), Time::from_minutes(8.), GasMix::air()),
        ];
        let params = MultiLevelDiveParameters::new(segments, air_inventory())
            .with_gradient_factors(30, 70);
        let profile = compute_multilevel_profile(&params).unwrap();
        assert_eq!(profile.max_depth, Depth::from_meters(40.));
        assert!(!profile
            .warnings
            .iter()
            .any(|w| w.message.contains("reverse profile")));
        assert!(!profile.decompression_stops.is_empty());
    }

    #[test]
    fn test_reverse_profile_emits_info_warning() {
        let segments = alloc::vec![
            (Depth::from_meters(15.), Time::from_minutes(10.), GasMix::air()),
            (Depth::from_meters(25.), Time::from_minutes(5.), GasMix::air()),
        ];
        let params = MultiLevelDiveParameters::new(segments, air_inventory());
        let profile = compute_multilevel_profile(&params).unwrap();
        assert!(profile
            .warnings
            .iter()
            .any(|w| w.message.contains("reverse profile")));
    }
}
