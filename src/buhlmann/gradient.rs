//! Gradient factors & ceilings (C4): GF interpolation between gfLow and
//! gfHigh, M-value inversion to a tolerated ambient pressure, and a full
//! per-compartment ceiling table (rather than leading-compartment-only).

use crate::buhlmann::compartment::TissueCompartment;
use crate::buhlmann::config::GradientFactors;
use crate::common::depth::Depth;
use crate::common::gas::{depth_to_pressure, pressure_to_depth};

/// M-value: maximum tolerated inert-gas pressure for this compartment at
/// ambient pressure `p_amb`.
pub fn m_value(compartment: &TissueCompartment, p_amb: f64) -> f64 {
    let (a, b) = compartment.combined_ab();
    a + p_amb / b
}

/// Tolerated ambient pressure for the compartment's current loading — the
/// inverse of [`m_value`].
pub fn tolerated_ambient_pressure(compartment: &TissueCompartment) -> f64 {
    let (a, b) = compartment.combined_ab();
    (compartment.total_inert_pressure() - a) * b
}

/// Linear GF interpolation: `gfHigh` at the surface, `gfLow` at
/// `first_stop_depth`; clamped to `gfLow` beyond it.
pub fn interpolated_gf(
    depth: Depth,
    first_stop_depth: Depth,
    gf: GradientFactors,
) -> f64 {
    if first_stop_depth.as_meters() <= 0. {
        return gf.high as f64 / 100.;
    }
    if depth >= first_stop_depth {
        return gf.low as f64 / 100.;
    }
    let fraction = depth.as_meters() / first_stop_depth.as_meters();
    let gf_high = gf.high as f64 / 100.;
    let gf_low = gf.low as f64 / 100.;
    gf_high + (gf_low - gf_high) * fraction
}

/// GF-adjusted tolerated ambient pressure, referenced to the surface (spec
/// §4.4): `Psurf + (Ptol_raw - Psurf) * gf`.
pub fn gf_adjusted_tolerated_pressure(
    compartment: &TissueCompartment,
    surface_pressure: f64,
    gf_fraction: f64,
) -> f64 {
    let raw = tolerated_ambient_pressure(compartment);
    surface_pressure + (raw - surface_pressure) * gf_fraction
}

/// Ceiling for one compartment: shallowest depth whose ambient pressure is
/// at least the GF-adjusted tolerated pressure, clamped at 0.
pub fn ceiling(
    compartment: &TissueCompartment,
    surface_pressure: f64,
    gf_fraction: f64,
) -> Depth {
    let tolerated = gf_adjusted_tolerated_pressure(compartment, surface_pressure, gf_fraction);
    pressure_to_depth(tolerated, surface_pressure)
}

/// Per-compartment ceilings at a fixed GF (no depth-dependent interpolation —
/// used by the stop-loop, which holds GF constant within a single
/// evaluation at a known current depth).
pub fn ceilings(
    compartments: &[TissueCompartment; 16],
    surface_pressure: f64,
    gf_fraction: f64,
) -> [Depth; 16] {
    core::array::from_fn(|i| ceiling(&compartments[i], surface_pressure, gf_fraction))
}

/// The compartment with the deepest ceiling; ties broken by lowest index.
pub fn controlling_compartment_index(ceilings: &[Depth; 16]) -> usize {
    let mut controlling = 0;
    for i in 1..16 {
        if ceilings[i].as_meters() > ceilings[controlling].as_meters() {
            controlling = i;
        }
    }
    controlling
}

/// `isAscentSafe`: the controlling compartment's ceiling is at or above
/// `depth`, within a small numerical tolerance.
pub fn is_ascent_safe(
    compartments: &[TissueCompartment; 16],
    depth: Depth,
    surface_pressure: f64,
    gf_fraction: f64,
) -> bool {
    const TOLERANCE_METERS: f64 = 0.01;
    let ceilings = ceilings(compartments, surface_pressure, gf_fraction);
    let controlling = controlling_compartment_index(&ceilings);
    ceilings[controlling].as_meters() <= depth.as_meters() + TOLERANCE_METERS
}

/// Re-derives the ambient pressure a given depth corresponds to — small
/// helper shared by callers that already have a `Depth` and need the
/// pressure consistently with this module's conventions.
pub fn ambient_pressure(depth: Depth, surface_pressure: f64) -> f64 {
    depth_to_pressure(depth, surface_pressure)
}
