//! Repetitive-dive layer (C8): residual-tissue evolution during a surface
//! interval, pressure-group quantization, the surface-interval/no-fly
//! solvers, and dive-sequence validation. Built on the same constant-depth
//! tissue-update primitive used elsewhere (applied repeatedly at depth 0,
//! breathing air) plus a validation-rule record shape.

use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::buhlmann::compartment::TissueCompartment;
use crate::buhlmann::config::EngineConfig;
use crate::buhlmann::gradient::m_value;
use crate::common::constants::{
    NO_FLY_FLOOR_MULTI_DIVE_HOURS, NO_FLY_FLOOR_SINGLE_DIVE_HOURS, SURFACE_AIR_FN2,
    SURFACE_INTERVAL_MIN_FLOOR_MINUTES,
};
use crate::common::depth::Depth;
use crate::common::gas::depth_to_pressure;
use crate::common::time::Time;
use crate::common::warning::Warning;

const SEARCH_STEP_MINUTES: f64 = 5.;
const SEARCH_CAP_MINUTES: f64 = 24. * 60.;

const PRESSURE_GROUP_COUNT: usize = 26;

/// Letter A..Z quantizing residual nitrogen loading (`PressureGroup`).
/// Thresholds are evenly spaced over the loading-ratio range `[0, 1]` — an
/// educational approximation of the commercial dive-table group bands, not
/// a reproduction of any single published table.
fn pressure_group_thresholds() -> [f64; PRESSURE_GROUP_COUNT] {
    core::array::from_fn(|i| (i as f64 + 1.) / PRESSURE_GROUP_COUNT as f64)
}

/// Max loading ratio across all 16 compartments, `(pN2+pHe)/M(Pamb)`, at
/// `ambient_pressure`.
pub fn loading_ratio(tissues: &[TissueCompartment; 16], ambient_pressure: f64) -> f64 {
    tissues.iter().fold(0., |max_ratio, comp| {
        let m = m_value(comp, ambient_pressure);
        if m > 0. {
            let ratio = comp.total_inert_pressure() / m;
            if ratio > max_ratio {
                return ratio;
            }
        }
        max_ratio
    })
}

/// Pressure group letter for a given loading ratio: the largest letter whose
/// threshold is at or below `ratio`.
pub fn pressure_group(ratio: f64) -> char {
    let thresholds = pressure_group_thresholds();
    let mut group_index = 0usize;
    for (i, threshold) in thresholds.iter().enumerate() {
        if *threshold <= ratio {
            group_index = i;
        }
    }
    (b'A' + group_index as u8) as char
}

/// Evolves tissues at the surface (depth 0) breathing air for `minutes`
/// (spec §4.8 "residual tissues after surface interval").
pub fn evolve_surface_interval(
    tissues: &[TissueCompartment; 16],
    surface_pressure: f64,
    minutes: f64,
) -> [TissueCompartment; 16] {
    let mut out = *tissues;
    let p_amb = depth_to_pressure(Depth::zero(), surface_pressure);
    for t in out.iter_mut() {
        t.update_constant_depth(p_amb, SURFACE_AIR_FN2, 0., minutes);
    }
    out
}

/// Result of [`surface_interval_to_group`] (spec §6 item 4).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SurfaceIntervalResult {
    /// Shortest interval (bounded by `floor`) after which the pressure group
    /// is at or below the target.
    pub minimum: Time,
    /// Time for the slowest compartment to complete half of its desaturation
    /// journey back toward surface N2 — one N2 half-time, by construction.
    pub optimal: Time,
    /// `max(minimum, floor)`, the figure a planner should actually use.
    pub recommended: Time,
}

/// Surface-interval solver (spec §4.8): monotone 5-minute-step search up to
/// 24 h for the first time the evolved tissues reach `target_group` or
/// better, bounded below by `floor_minutes` (default 60).
pub fn surface_interval_to_group(
    tissues: &[TissueCompartment; 16],
    surface_pressure: f64,
    target_group: char,
    floor_minutes: f64,
) -> SurfaceIntervalResult {
    let mut minutes = 0.;
    let minimum_minutes = loop {
        let evolved = evolve_surface_interval(tissues, surface_pressure, minutes);
        let ratio = loading_ratio(&evolved, surface_pressure);
        if pressure_group(ratio) <= target_group || minutes >= SEARCH_CAP_MINUTES {
            break minutes;
        }
        minutes += SEARCH_STEP_MINUTES;
    };

    let slowest = &tissues[tissues.len() - 1];
    let optimal_minutes = slowest.half_time_n2;

    SurfaceIntervalResult {
        minimum: Time::from_minutes(minimum_minutes),
        optimal: Time::from_minutes(optimal_minutes),
        recommended: Time::from_minutes(minimum_minutes.max(floor_minutes)),
    }
}

/// Result of [`no_fly_time`] (spec §6 item 5).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NoFlyTimeResult {
    pub no_fly_time: Time,
}

/// No-fly time (spec §4.8): extend the surface-interval evolution until the
/// slowest compartment's N2 falls to within 1.2x the surface N2 pressure,
/// floored by `multi_dive`'s configured default.
pub fn no_fly_time(
    tissues: &[TissueCompartment; 16],
    surface_pressure: f64,
    multi_dive: bool,
) -> NoFlyTimeResult {
    let surface_p_n2 = (surface_pressure - crate::common::constants::WATER_VAPOR_PRESSURE) * SURFACE_AIR_FN2;
    let target = surface_p_n2 * 1.2;
    let floor_hours = if multi_dive {
        NO_FLY_FLOOR_MULTI_DIVE_HOURS
    } else {
        NO_FLY_FLOOR_SINGLE_DIVE_HOURS
    };

    let mut minutes = 0.;
    let minutes = loop {
        let evolved = evolve_surface_interval(tissues, surface_pressure, minutes);
        let slowest = evolved[evolved.len() - 1];
        if slowest.p_n2 <= target || minutes >= SEARCH_CAP_MINUTES {
            break minutes;
        }
        minutes += SEARCH_STEP_MINUTES;
    };

    NoFlyTimeResult {
        no_fly_time: Time::from_minutes(minutes.max(floor_hours * 60.)),
    }
}

/// Rules governing a dive sequence (spec §4.8 "sequence validation").
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SequenceRules {
    pub max_dives_per_day: u32,
    pub min_surface_interval: Time,
    pub cumulative_loading_threshold: f64,
}

impl Default for SequenceRules {
    fn default() -> Self {
        Self {
            max_dives_per_day: 3,
            min_surface_interval: Time::from_minutes(SURFACE_INTERVAL_MIN_FLOOR_MINUTES),
            cumulative_loading_threshold: 0.95,
        }
    }
}

impl SequenceRules {
    /// Pulls the max-dives-per-day and minimum-surface-interval policy off
    /// an [`EngineConfig`], leaving `cumulative_loading_threshold` at its
    /// default since the config doesn't carry one.
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            max_dives_per_day: config.max_dives_per_day,
            min_surface_interval: Time::from_minutes(config.min_surface_interval_minutes),
            ..Self::default()
        }
    }
}

/// One completed dive in a day's sequence, as needed for validation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SequenceEntry {
    pub max_depth: Depth,
    pub surface_interval_before: Time,
    pub final_tissues: [TissueCompartment; 16],
}

/// Validates a day's dive sequence against `rules`; returns warnings rather
/// than failing, matching the engine's "operational conditions are
/// warnings" policy (spec §7).
pub fn validate_sequence(
    entries: &[SequenceEntry],
    rules: &SequenceRules,
    surface_pressure: f64,
) -> Vec<Warning> {
    let mut warnings = Vec::new();

    if entries.len() as u32 > rules.max_dives_per_day {
        warnings.push(Warning::warning(
            "dive count exceeds the configured daily maximum",
            "too many dives scheduled for one day under the current rules",
        ));
    }

    for (i, entry) in entries.iter().enumerate() {
        if i > 0 && entry.surface_interval_before < rules.min_surface_interval {
            warnings.push(Warning::warning(
                "surface interval below the configured minimum",
                "insufficient time to off-gas before the next dive",
            ));
        }
        if i > 0 && entry.max_depth > entries[i - 1].max_depth {
            warnings.push(Warning::info(
                "dive sequence is not monotone-non-increasing in depth",
                "deeper-than-previous repetitive dives carry extra residual-nitrogen risk",
            ));
        }
        let ratio = loading_ratio(&entry.final_tissues, surface_pressure);
        if ratio >= rules.cumulative_loading_threshold {
            warnings.push(Warning::danger(
                "cumulative tissue loading exceeds the configured threshold",
                "residual nitrogen from the sequence is approaching the M-value boundary",
            ));
        }
    }

    warnings
}
