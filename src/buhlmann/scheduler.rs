//! Decompression scheduler (C5): the single-level entry point. One
//! deterministic function over an explicit parameter struct, covering the
//! full descent → bottom → stop-loop → ascent algorithm described in spec §4.5.

use alloc::vec::Vec;

use super::compartment::TissueCompartment;
use super::config::GradientFactors;
use super::gradient::{ceilings, controlling_compartment_index, interpolated_gf, is_ascent_safe, m_value};
use crate::common::constants::GAS_SWITCH_TIME_MIN;
use crate::common::depth::Depth;
use crate::common::error::InvalidInput;
use crate::common::gas::{
    best_gas_for_depth, depth_to_pressure, end, is_switch_worthwhile, ppo2, GasInventory, GasMix,
    GasRole,
};
use crate::common::profile::{
    DecompressionStop, DiveParameters, DiveProfile, DiveSegment, GasSwitch, SegmentKind,
    SwitchReason,
};
use crate::common::time::Time;
use crate::common::warning::Warning;

/// Upper bound on the exploratory NDL search, minutes (a day of bottom time
/// is already far beyond any plausible recreational/technical NDL).
const NDL_SEARCH_CAP_MINUTES: u32 = 24 * 60;

pub(crate) fn validate_multilevel_parameters(
    params: &crate::common::profile::MultiLevelDiveParameters,
) -> Result<(), InvalidInput> {
    if params.segments.is_empty() {
        return Err(InvalidInput::InvalidSegments {
            reason: alloc::string::String::from("segment list must not be empty"),
        });
    }
    if params.segments.len() > params.max_segments {
        return Err(InvalidInput::InvalidSegments {
            reason: alloc::string::String::from("too many segments"),
        });
    }
    for (depth, duration, _) in &params.segments {
        if depth.as_meters() < 0. {
            return Err(InvalidInput::InvalidDepth {
                reason: alloc::string::String::from("depth must be non-negative"),
            });
        }
        if duration.as_seconds() < 0. {
            return Err(InvalidInput::InvalidSegments {
                reason: alloc::string::String::from("segment duration must be non-negative"),
            });
        }
    }
    if params.descent_rate <= 0. || params.ascent_rate <= 0. {
        return Err(InvalidInput::InvalidRates {
            reason: alloc::string::String::from("ascent/descent rates must be positive"),
        });
    }
    params.gradient_factors.validate()
}

/// Warnings for the multi-level driver: per-segment ppO2/END checks (each
/// segment may carry a different gas, unlike the single-level bottom gas)
/// plus the shared deco-time-share check from [`assemble_warnings`].
pub(crate) fn assemble_warnings_multilevel(
    segments: &[(Depth, Time, GasMix)],
    stops: &[DecompressionStop],
    surface_pressure: f64,
    total_dive_time: Time,
    total_decompression_time: Time,
) -> Vec<Warning> {
    let mut warnings = Vec::new();

    for (depth, _, gas) in segments {
        let p = ppo2(*gas, *depth, surface_pressure);
        if p > 1.6 {
            warnings.push(Warning::danger(
                "ppO2 exceeds 1.6 on a dive segment",
                "oxygen toxicity risk at this depth on this gas",
            ));
        } else if p > 1.4 {
            warnings.push(Warning::warning(
                "ppO2 exceeds 1.4 on a dive segment",
                "above the recreational working-gas limit",
            ));
        }
        if end(*gas, *depth).as_meters() > 30. {
            warnings.push(Warning::warning(
                "equivalent narcotic depth exceeds 30 m",
                "narcosis risk on this segment's gas",
            ));
        }
    }
    for stop in stops {
        if ppo2(stop.gas, stop.depth, surface_pressure) > 1.6 {
            warnings.push(Warning::danger(
                "ppO2 exceeds 1.6 at a decompression stop",
                "oxygen toxicity risk on the deco gas in use",
            ));
            break;
        }
    }

    if total_dive_time.as_seconds() > 0.
        && total_decompression_time.as_seconds() / total_dive_time.as_seconds() > 0.5
    {
        warnings.push(Warning::info(
            "decompression time exceeds half the dive",
            "a significant share of the dive is spent decompressing",
        ));
    }

    warnings
}

fn validate_dive_parameters(params: &DiveParameters) -> Result<(), InvalidInput> {
    if params.depth.as_meters() < 0. {
        return Err(InvalidInput::InvalidDepth {
            reason: alloc::string::String::from("depth must be non-negative"),
        });
    }
    if params.bottom_time.as_seconds() < 0. {
        return Err(InvalidInput::InvalidSegments {
            reason: alloc::string::String::from("bottom time must be non-negative"),
        });
    }
    if params.descent_rate <= 0. || params.ascent_rate <= 0. {
        return Err(InvalidInput::InvalidRates {
            reason: alloc::string::String::from("ascent/descent rates must be positive"),
        });
    }
    params.gradient_factors.validate()
}

pub(crate) fn controlling_ceiling(
    tissues: &[TissueCompartment; 16],
    surface_pressure: f64,
    gf_fraction: f64,
) -> Depth {
    let table = ceilings(tissues, surface_pressure, gf_fraction);
    table[controlling_compartment_index(&table)]
}

/// Changing-depth transition over `|to - from|` at `rate` m/min on `gas`.
/// Returns the elapsed time; a no-op when `from == to`.
pub(crate) fn transition(
    tissues: &mut [TissueCompartment; 16],
    from: Depth,
    to: Depth,
    rate: f64,
    gas: GasMix,
    surface_pressure: f64,
) -> Time {
    let delta = (to.as_meters() - from.as_meters()).abs();
    if delta <= 0. {
        return Time::zero();
    }
    let duration_min = delta / rate;
    let p_start = depth_to_pressure(from, surface_pressure);
    let p_end = depth_to_pressure(to, surface_pressure);
    for t in tissues.iter_mut() {
        t.update_changing_depth(p_start, p_end, gas.f_n2, gas.f_he, duration_min);
    }
    Time::from_minutes(duration_min)
}

/// Accumulates a depth*time contribution for the running average-depth figure.
pub(crate) fn accumulate_depth_time(depth_time: &mut f64, total_time: &mut f64, avg_depth: f64, duration: Time) {
    let minutes = duration.as_minutes();
    *depth_time += avg_depth * minutes;
    *total_time += minutes;
}

pub(crate) struct StopPhaseOutcome {
    pub(crate) stops: Vec<DecompressionStop>,
    pub(crate) switches: Vec<GasSwitch>,
    pub(crate) segments: Vec<DiveSegment>,
    pub(crate) elapsed: Time,
    pub(crate) tissues: [TissueCompartment; 16],
    pub(crate) diverged: bool,
    pub(crate) depth_time: f64,
    pub(crate) time_weight: f64,
}

/// Runs the stop loop (spec §4.5 steps 5-7) from `first_stop_depth` down to
/// the surface, on the given grid size. Shared between the authoritative
/// 3 m-grid run and the 5 m-grid estimate used for `time_to_surface_in_5`.
#[allow(clippy::too_many_arguments)]
pub(crate) fn run_stop_phase(
    mut tissues: [TissueCompartment; 16],
    depth_before_ascent: Depth,
    first_stop_depth: Depth,
    grid: f64,
    gf: GradientFactors,
    inventory: &GasInventory,
    mut current_gas: GasMix,
    surface_pressure: f64,
    ascent_rate: f64,
    max_stop_iterations: u32,
    dive_max_depth: Depth,
    safety_stop_depth: f64,
    safety_stop_time_min: f64,
) -> StopPhaseOutcome {
    let mut stops = Vec::new();
    let mut switches = Vec::new();
    let mut segments = Vec::new();
    let mut elapsed = Time::zero();
    let mut depth_time = 0.;
    let mut time_weight = 0.;
    let mut diverged = false;

    // step 5: ascend to first stop
    let ascent_to_first_stop = transition(
        &mut tissues,
        depth_before_ascent,
        first_stop_depth,
        ascent_rate,
        current_gas,
        surface_pressure,
    );
    elapsed += ascent_to_first_stop;
    accumulate_depth_time(
        &mut depth_time,
        &mut time_weight,
        (depth_before_ascent.as_meters() + first_stop_depth.as_meters()) / 2.,
        ascent_to_first_stop,
    );
    if ascent_to_first_stop.as_seconds() > 0. {
        segments.push(DiveSegment {
            depth: first_stop_depth,
            duration: ascent_to_first_stop,
            gas: current_gas,
            kind: SegmentKind::Ascent,
        });
    }

    let mut current_depth = first_stop_depth;
    let mut iterations: u32 = 0;
    let mut safety_stop_satisfied = false;

    while current_depth.as_meters() > 0. {
        let gf_fraction = interpolated_gf(current_depth, first_stop_depth, gf);

        // a. gas-switch evaluation
        if let Some(best) = best_gas_for_depth(current_depth, inventory, GasRole::Decompression, surface_pressure)
        {
            if best.mix != current_gas && is_switch_worthwhile(current_gas, best.mix) {
                let p_amb = depth_to_pressure(current_depth, surface_pressure);
                for t in tissues.iter_mut() {
                    t.update_constant_depth(p_amb, best.mix.f_n2, best.mix.f_he, GAS_SWITCH_TIME_MIN);
                }
                let switch_time = Time::from_minutes(GAS_SWITCH_TIME_MIN);
                elapsed += switch_time;
                accumulate_depth_time(&mut depth_time, &mut time_weight, current_depth.as_meters(), switch_time);
                switches.push(GasSwitch {
                    depth: current_depth,
                    from_gas: current_gas,
                    to_gas: best.mix,
                    reason: SwitchReason::Optimal,
                });
                current_gas = best.mix;
            }
        }

        // b. hold until the next 3 m step up is safe
        let next_depth = Depth::from_meters((current_depth.as_meters() - grid).max(0.));
        let mut stop_duration = Time::zero();
        while !is_ascent_safe(&tissues, next_depth, surface_pressure, gf_fraction) {
            iterations += 1;
            if iterations > max_stop_iterations {
                diverged = true;
                break;
            }
            let p_amb = depth_to_pressure(current_depth, surface_pressure);
            for t in tissues.iter_mut() {
                t.update_constant_depth(p_amb, current_gas.f_n2, current_gas.f_he, 1.0);
            }
            let minute = Time::from_minutes(1.0);
            stop_duration += minute;
            elapsed += minute;
        }
        accumulate_depth_time(&mut depth_time, &mut time_weight, current_depth.as_meters(), stop_duration);

        // c. emit the stop if it actually took time
        if stop_duration.as_seconds() > 0. {
            if (current_depth.as_meters() - safety_stop_depth).abs() < grid / 2.
                && stop_duration.as_minutes() >= safety_stop_time_min
            {
                safety_stop_satisfied = true;
            }
            stops.push(DecompressionStop {
                depth: current_depth,
                duration: stop_duration,
                runtime: elapsed,
                gas: current_gas,
                gas_switch: switches.last().cloned(),
            });
            segments.push(DiveSegment {
                depth: current_depth,
                duration: stop_duration,
                gas: current_gas,
                kind: SegmentKind::Deco,
            });
        }

        if diverged {
            break;
        }

        // e. ascend one grid step
        let ascent_step = transition(&mut tissues, current_depth, next_depth, ascent_rate, current_gas, surface_pressure);
        elapsed += ascent_step;
        accumulate_depth_time(
            &mut depth_time,
            &mut time_weight,
            (current_depth.as_meters() + next_depth.as_meters()) / 2.,
            ascent_step,
        );
        if ascent_step.as_seconds() > 0. {
            segments.push(DiveSegment {
                depth: next_depth,
                duration: ascent_step,
                gas: current_gas,
                kind: SegmentKind::Ascent,
            });
        }
        current_depth = next_depth;
    }

    // d. safety stop, if the deco schedule above didn't already produce one
    if !diverged && !safety_stop_satisfied && dive_max_depth.as_meters() > 10. {
        let p_amb = depth_to_pressure(Depth::from_meters(safety_stop_depth), surface_pressure);
        for t in tissues.iter_mut() {
            t.update_constant_depth(p_amb, current_gas.f_n2, current_gas.f_he, safety_stop_time_min);
        }
        let duration = Time::from_minutes(safety_stop_time_min);
        elapsed += duration;
        accumulate_depth_time(&mut depth_time, &mut time_weight, safety_stop_depth, duration);
        stops.push(DecompressionStop {
            depth: Depth::from_meters(safety_stop_depth),
            duration,
            runtime: elapsed,
            gas: current_gas,
            gas_switch: None,
        });
        segments.push(DiveSegment {
            depth: Depth::from_meters(safety_stop_depth),
            duration,
            gas: current_gas,
            kind: SegmentKind::Deco,
        });
    }

    StopPhaseOutcome {
        stops,
        switches,
        segments,
        elapsed,
        tissues,
        diverged,
        depth_time,
        time_weight,
    }
}

fn compute_ndl(
    tissues_after_descent: &[TissueCompartment; 16],
    target_depth: Depth,
    bottom_gas: GasMix,
    surface_pressure: f64,
    gf_high_fraction: f64,
) -> Time {
    let p_amb = depth_to_pressure(target_depth, surface_pressure);
    if controlling_ceiling(tissues_after_descent, surface_pressure, gf_high_fraction).as_meters() > 0. {
        return Time::zero();
    }
    let mut sim = *tissues_after_descent;
    let mut elapsed_minutes: u32 = 0;
    loop {
        for t in sim.iter_mut() {
            t.update_constant_depth(p_amb, bottom_gas.f_n2, bottom_gas.f_he, 1.0);
        }
        elapsed_minutes += 1;
        if controlling_ceiling(&sim, surface_pressure, gf_high_fraction).as_meters() > 0. {
            return Time::from_minutes((elapsed_minutes - 1) as f64);
        }
        if elapsed_minutes >= NDL_SEARCH_CAP_MINUTES {
            return Time::from_minutes(elapsed_minutes as f64);
        }
    }
}

pub(crate) fn supersaturation_percent(tissues: &[TissueCompartment; 16], ambient_pressure: f64) -> f64 {
    let mut max_ratio = 0.;
    for compartment in tissues {
        let m = m_value(compartment, ambient_pressure);
        if m > 0. {
            let ratio = compartment.total_inert_pressure() / m * 100.;
            if ratio > max_ratio {
                max_ratio = ratio;
            }
        }
    }
    max_ratio
}

fn assemble_warnings(
    bottom_gas: GasMix,
    target_depth: Depth,
    stops: &[DecompressionStop],
    surface_pressure: f64,
    total_dive_time: Time,
    total_decompression_time: Time,
) -> Vec<Warning> {
    let mut warnings = Vec::new();

    let bottom_ppo2 = ppo2(bottom_gas, target_depth, surface_pressure);
    if bottom_ppo2 > 1.6 {
        warnings.push(Warning::danger(
            "ppO2 exceeds 1.6 at bottom",
            "oxygen toxicity risk at the planned bottom depth",
        ));
    } else if bottom_ppo2 > 1.4 {
        warnings.push(Warning::warning(
            "ppO2 exceeds 1.4 at bottom",
            "above the recreational working-gas limit",
        ));
    }
    for stop in stops {
        let stop_ppo2 = ppo2(stop.gas, stop.depth, surface_pressure);
        if stop_ppo2 > 1.6 {
            warnings.push(Warning::danger(
                "ppO2 exceeds 1.6 at a decompression stop",
                "oxygen toxicity risk on the deco gas in use",
            ));
            break;
        }
    }

    if end(bottom_gas, target_depth).as_meters() > 30. {
        warnings.push(Warning::warning(
            "equivalent narcotic depth exceeds 30 m",
            "narcosis risk on the bottom gas at this depth",
        ));
    }

    if total_dive_time.as_seconds() > 0.
        && total_decompression_time.as_seconds() / total_dive_time.as_seconds() > 0.5
    {
        warnings.push(Warning::info(
            "decompression time exceeds half the dive",
            "a significant share of the dive is spent decompressing",
        ));
    }

    warnings
}

/// Computes a full single-level dive profile (spec §4.5).
pub fn compute_profile(params: &DiveParameters) -> Result<DiveProfile, InvalidInput> {
    compute_profile_with_stop_bias(params, 0)
}

/// Same as [`compute_profile`], but rounds the computed first-stop depth an
/// extra `first_stop_bias_grid_steps` grid increments deeper before running
/// the stop loop (still clamped below the bottom depth). Used by the VPM-B
/// preset to bias toward an earlier, deeper first stop without touching
/// gradient factors.
pub(crate) fn compute_profile_with_stop_bias(
    params: &DiveParameters,
    first_stop_bias_grid_steps: u32,
) -> Result<DiveProfile, InvalidInput> {
    validate_dive_parameters(params)?;

    let gf = params.gradient_factors;
    let surface_pressure = params.surface_pressure;
    let bottom_gas = params.gases.bottom_gas.mix;
    let target_depth = params.depth;

    let mut tissues = params
        .initial_tissues
        .unwrap_or_else(|| TissueCompartment::initial_surface_state(surface_pressure));

    let mut segments = Vec::new();
    let mut runtime = Time::zero();
    let mut depth_time = 0.;
    let mut time_weight = 0.;

    // step 2: descent
    let descent_duration = transition(
        &mut tissues,
        Depth::zero(),
        target_depth,
        params.descent_rate,
        bottom_gas,
        surface_pressure,
    );
    if descent_duration.as_seconds() > 0. {
        runtime += descent_duration;
        accumulate_depth_time(&mut depth_time, &mut time_weight, target_depth.as_meters() / 2., descent_duration);
        segments.push(DiveSegment {
            depth: target_depth,
            duration: descent_duration,
            gas: bottom_gas,
            kind: SegmentKind::Descent,
        });
    }

    let tissues_after_descent = tissues;

    // step 3: bottom
    let bottom_time_min = params.bottom_time.as_minutes();
    if bottom_time_min > 0. {
        let p_amb = depth_to_pressure(target_depth, surface_pressure);
        for t in tissues.iter_mut() {
            t.update_constant_depth(p_amb, bottom_gas.f_n2, bottom_gas.f_he, bottom_time_min);
        }
        runtime += params.bottom_time;
        accumulate_depth_time(&mut depth_time, &mut time_weight, target_depth.as_meters(), params.bottom_time);
        segments.push(DiveSegment {
            depth: target_depth,
            duration: params.bottom_time,
            gas: bottom_gas,
            kind: SegmentKind::Bottom,
        });
    }

    // step 4: determine first stop, using the conservative (gfLow) ceiling
    let gf_low_fraction = gf.low as f64 / 100.;
    let raw_ceiling = controlling_ceiling(&tissues, surface_pressure, gf_low_fraction);
    let mut first_stop_depth = raw_ceiling.ceil_to_grid(params.stop_grid);
    if first_stop_depth.as_meters() > 0. {
        if first_stop_bias_grid_steps > 0 {
            first_stop_depth = Depth::from_meters(
                first_stop_depth.as_meters() + first_stop_bias_grid_steps as f64 * params.stop_grid,
            );
        }
        let max_first_stop = Depth::from_meters((target_depth.as_meters() - params.stop_grid).max(0.));
        if first_stop_depth > max_first_stop {
            first_stop_depth = max_first_stop;
        }
    }

    let max_stop_iterations = params.max_stop_iterations;

    let decompression_stops;
    let gas_switches;
    let final_tissues;
    let time_to_surface;
    let time_to_surface_in_5;
    let gf_99;
    let gf_surf;
    let diverged;

    if first_stop_depth.as_meters() <= 0. {
        // no decompression required: direct ascent to the surface, with a
        // conventional safety stop on dives deeper than 10 m
        let gf_99_snapshot = supersaturation_percent(
            &tissues,
            depth_to_pressure(target_depth, surface_pressure),
        );

        let mut stops = Vec::new();
        let mut time_to_surface_total = Time::zero();

        if target_depth.as_meters() > 10. {
            let safety_depth = Depth::from_meters(params.safety_stop_depth);

            let ascent_to_safety =
                transition(&mut tissues, target_depth, safety_depth, params.ascent_rate, bottom_gas, surface_pressure);
            runtime += ascent_to_safety;
            time_to_surface_total += ascent_to_safety;
            accumulate_depth_time(
                &mut depth_time,
                &mut time_weight,
                (target_depth.as_meters() + params.safety_stop_depth) / 2.,
                ascent_to_safety,
            );
            segments.push(DiveSegment {
                depth: safety_depth,
                duration: ascent_to_safety,
                gas: bottom_gas,
                kind: SegmentKind::Ascent,
            });

            let p_amb = depth_to_pressure(safety_depth, surface_pressure);
            for t in tissues.iter_mut() {
                t.update_constant_depth(p_amb, bottom_gas.f_n2, bottom_gas.f_he, params.safety_stop_time_min);
            }
            let duration = Time::from_minutes(params.safety_stop_time_min);
            runtime += duration;
            time_to_surface_total += duration;
            accumulate_depth_time(&mut depth_time, &mut time_weight, params.safety_stop_depth, duration);
            stops.push(DecompressionStop {
                depth: safety_depth,
                duration,
                runtime,
                gas: bottom_gas,
                gas_switch: None,
            });
            segments.push(DiveSegment {
                depth: safety_depth,
                duration,
                gas: bottom_gas,
                kind: SegmentKind::Deco,
            });

            let final_ascent =
                transition(&mut tissues, safety_depth, Depth::zero(), params.ascent_rate, bottom_gas, surface_pressure);
            runtime += final_ascent;
            time_to_surface_total += final_ascent;
            accumulate_depth_time(&mut depth_time, &mut time_weight, params.safety_stop_depth / 2., final_ascent);
            segments.push(DiveSegment {
                depth: Depth::zero(),
                duration: final_ascent,
                gas: bottom_gas,
                kind: SegmentKind::Ascent,
            });
        } else {
            let ascent_duration =
                transition(&mut tissues, target_depth, Depth::zero(), params.ascent_rate, bottom_gas, surface_pressure);
            runtime += ascent_duration;
            time_to_surface_total += ascent_duration;
            accumulate_depth_time(&mut depth_time, &mut time_weight, target_depth.as_meters() / 2., ascent_duration);
            if ascent_duration.as_seconds() > 0. {
                segments.push(DiveSegment {
                    depth: Depth::zero(),
                    duration: ascent_duration,
                    gas: bottom_gas,
                    kind: SegmentKind::Ascent,
                });
            }
        }

        decompression_stops = stops;
        gas_switches = Vec::new();
        final_tissues = tissues;
        time_to_surface = time_to_surface_total;
        time_to_surface_in_5 = time_to_surface_total;
        gf_99 = gf_99_snapshot;
        gf_surf = supersaturation_percent(&final_tissues, surface_pressure);
        diverged = false;
    } else {
        // gf_99 is read at the moment the controlling ceiling was established,
        // just before the ascent to the first stop begins.
        let gf_99_snapshot = supersaturation_percent(
            &tissues,
            depth_to_pressure(first_stop_depth, surface_pressure),
        );

        let outcome = run_stop_phase(
            tissues,
            target_depth,
            first_stop_depth,
            params.stop_grid,
            gf,
            &params.gases,
            bottom_gas,
            surface_pressure,
            params.ascent_rate,
            max_stop_iterations,
            target_depth,
            params.safety_stop_depth,
            params.safety_stop_time_min,
        );

        // estimate how much longer the ascent would take on a coarser 5 m
        // grid, from the same pre-ascent tissue state — an independent
        // what-if run, not part of the returned schedule.
        let outcome_at_5 = run_stop_phase(
            tissues,
            target_depth,
            first_stop_depth,
            5.0,
            gf,
            &params.gases,
            bottom_gas,
            surface_pressure,
            params.ascent_rate,
            max_stop_iterations,
            target_depth,
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
        gf_surf = supersaturation_percent(&final_tissues, surface_pressure);
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

    let no_decompression_limit = if decompression_stops.is_empty() {
        Some(compute_ndl(
            &tissues_after_descent,
            target_depth,
            bottom_gas,
            surface_pressure,
            gf.high as f64 / 100.,
        ))
    } else {
        Some(Time::zero())
    };

    let mut warnings = assemble_warnings(
        bottom_gas,
        target_depth,
        &decompression_stops,
        surface_pressure,
        runtime,
        total_decompression_time,
    );
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
        no_decompression_limit,
        tissue_compartments: final_tissues,
        max_depth: target_depth,
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
    fn test_idempotence_at_zero_depth_zero_time() {
        let params = DiveParameters::new(Depth::zero(), Time::zero(), air_inventory());
        let profile = compute_profile(&params).unwrap();
        assert!(profile.decompression_stops.is_empty());
        assert_eq!(profile.total_decompression_time, Time::zero());
        let surface = TissueCompartment::initial_surface_state(params.surface_pressure);
        for (a, b) in profile.tissue_compartments.iter().zip(surface.iter()) {
            assert!((a.p_n2 - b.p_n2).abs() < 1e-9);
            assert!((a.p_he - b.p_he).abs() < 1e-9);
        }
    }

    #[test]
    fn test_no_deco_shallow_dive_has_no_stops_and_reports_ndl() {
        let params = DiveParameters::new(Depth::from_meters(18.), Time::from_minutes(20.), air_inventory());
        let profile = compute_profile(&params).unwrap();
        assert!(profile.decompression_stops.is_empty());
        assert!(profile.no_decompression_limit.unwrap().as_minutes() > 0.);
    }

    #[test]
    fn test_safety_stop_present_past_ten_meters() {
        let params = DiveParameters::new(Depth::from_meters(18.), Time::from_minutes(20.), air_inventory());
        let profile = compute_profile(&params).unwrap();
        assert!(profile
            .decompression_stops
            .iter()
            .any(|s| (s.depth.as_meters() - params.safety_stop_depth).abs() < 1e-9));
    }

    #[test]
    fn test_deep_long_dive_requires_decompression_and_ndl_is_zero() {
        let params = DiveParameters::new(Depth::from_meters(30.), Time::from_minutes(30.), air_inventory());
        let profile = compute_profile(&params).unwrap();
        assert!(!profile.decompression_stops.is_empty());
        assert_eq!(profile.no_decompression_limit, Some(Time::zero()));
        for stop in &profile.decompression_stops {
            assert!((stop.depth.as_meters() / params.stop_grid).fract().abs() < 1e-9
                || stop.depth.as_meters() == params.safety_stop_depth);
        }
    }

    #[test]
    fn test_nitrox_reduces_or_matches_decompression_relative_to_air() {
        let air_params = DiveParameters::new(Depth::from_meters(25.), Time::from_minutes(45.), air_inventory());
        let air_profile = compute_profile(&air_params).unwrap();

        let ean32 = Gas::new(GasMix::nitrox(0.32).unwrap());
        let nitrox_inventory = GasInventory::new(ean32, Vec::new()).unwrap();
        let nitrox_params = DiveParameters::new(Depth::from_meters(25.), Time::from_minutes(45.), nitrox_inventory);
        let nitrox_profile = compute_profile(&nitrox_params).unwrap();

        assert!(nitrox_profile.total_decompression_time <= air_profile.total_decompression_time);
    }

    #[test]
    fn test_invalid_bottom_time_rejected() {
        let params = DiveParameters {
            bottom_time: Time::from_seconds(-1.),
            ..DiveParameters::new(Depth::from_meters(10.), Time::zero(), air_inventory())
        };
        assert!(compute_profile(&params).is_err());
    }

    #[test]
    fn test_runtime_non_decreasing_across_segments() {
        let params = DiveParameters::new(Depth::from_meters(30.), Time::from_minutes(30.), air_inventory());
        let profile = compute_profile(&params).unwrap();
        let mut last = Time::zero();
        for stop in &profile.decompression_stops {
            assert!(stop.runtime >= last);
            last = stop.runtime;
        }
    }

    #[test]
    fn test_multi_gas_switch_prefers_richer_deco_gas_shallower() {
        let air = Gas::new(GasMix::air());
        let ean50 = Gas::new(GasMix::nitrox(0.50).unwrap());
        let oxygen = Gas::new(GasMix::nitrox(1.0).unwrap());
        let inventory = GasInventory::new(air, alloc::vec![ean50.clone(), oxygen.clone()]).unwrap();
        let params = DiveParameters::new(Depth::from_meters(40.), Time::from_minutes(25.), inventory);
        let profile = compute_profile(&params).unwrap();
        assert!(profile
            .gas_switches
            .iter()
            .any(|s| s.to_gas == ean50.mix && s.depth.as_meters() >= 18. && s.depth.as_meters() <= 24.));
        assert!(profile.gas_switches.iter().any(|s| s.to_gas == oxygen.mix));
    }
}
