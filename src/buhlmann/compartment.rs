//! Tissue loading (C3): Schreiner (constant depth) and Haldane-with-linear-rate
//! (changing depth) integration across N2 and He for one ZHL-16C compartment.
//!
//! Generalized from a single inert gas to N2+He with the combined a/b
//! weighting described in spec §3.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::zhl_values::{ZhlParams, ZHL_16C};
use crate::common::constants::{SURFACE_AIR_FN2, SURFACE_PRESSURE, WATER_VAPOR_PRESSURE};
use crate::common::math::{exp, LN_2};

/// One ZHL-16C compartment's live state plus its immutable kinetic constants.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TissueCompartment {
    pub index: u8,
    pub p_n2: f64,
    pub p_he: f64,
    pub half_time_n2: f64,
    pub half_time_he: f64,
    pub a_n2: f64,
    pub b_n2: f64,
    pub a_he: f64,
    pub b_he: f64,
}

impl TissueCompartment {
    fn from_zhl_params(index: u8, params: ZhlParams) -> Self {
        let (half_time_n2, a_n2, b_n2, half_time_he, a_he, b_he) = params;
        Self {
            index,
            p_n2: 0.,
            p_he: 0.,
            half_time_n2,
            half_time_he,
            a_n2,
            b_n2,
            a_he,
            b_he,
        }
    }

    /// 16 compartments equilibrated to surface air (spec §3 initial state).
    pub fn initial_surface_state(surface_pressure: f64) -> [Self; 16] {
        let p_n2_surface = (surface_pressure - WATER_VAPOR_PRESSURE) * SURFACE_AIR_FN2;
        let mut out: [Self; 16] = core::array::from_fn(|i| {
            Self::from_zhl_params((i + 1) as u8, ZHL_16C[i])
        });
        for comp in out.iter_mut() {
            comp.p_n2 = p_n2_surface;
            comp.p_he = 0.;
        }
        out
    }

    pub fn total_inert_pressure(&self) -> f64 {
        self.p_n2 + self.p_he
    }

    /// Combined a/b coefficients, gas-weighted by partial pressure (spec §3).
    /// Falls back to pure-N2 coefficients when both partial pressures are zero.
    pub fn combined_ab(&self) -> (f64, f64) {
        let total = self.total_inert_pressure();
        if total <= 0. {
            return (self.a_n2, self.b_n2);
        }
        let a = (self.a_n2 * self.p_n2 + self.a_he * self.p_he) / total;
        let b = (self.b_n2 * self.p_n2 + self.b_he * self.p_he) / total;
        (a, b)
    }

    /// Schreiner equation: update at constant ambient pressure `p_amb` for
    /// `duration_min` minutes, breathing `(f_n2, f_he)`.
    pub fn update_constant_depth(&mut self, p_amb: f64, f_n2: f64, f_he: f64, duration_min: f64) {
        self.p_n2 = schreiner(
            self.p_n2,
            inspired(p_amb, f_n2),
            self.half_time_n2,
            duration_min,
        );
        if f_he > 0. || self.p_he > 0. {
            self.p_he = schreiner(
                self.p_he,
                inspired(p_amb, f_he),
                self.half_time_he,
                duration_min,
            );
        }
    }

    /// Linear-rate (changing depth) update from `p_amb_start` to `p_amb_end`
    /// over `duration_min` minutes.
    pub fn update_changing_depth(
        &mut self,
        p_amb_start: f64,
        p_amb_end: f64,
        f_n2: f64,
        f_he: f64,
        duration_min: f64,
    ) {
        self.p_n2 = haldane_rate(
            self.p_n2,
            inspired(p_amb_start, f_n2),
            inspired(p_amb_end, f_n2),
            self.half_time_n2,
            duration_min,
        );
        if f_he > 0. || self.p_he > 0. {
            self.p_he = haldane_rate(
                self.p_he,
                inspired(p_amb_start, f_he),
                inspired(p_amb_end, f_he),
                self.half_time_he,
                duration_min,
            );
        }
    }
}

fn inspired(p_amb: f64, f_gas: f64) -> f64 {
    (p_amb - WATER_VAPOR_PRESSURE) * f_gas
}

fn rate_constant(half_time_min: f64) -> f64 {
    LN_2 / half_time_min
}

/// `p_new = Pinsp + (p_old - Pinsp) * exp(-k*t)`
fn schreiner(p_old: f64, p_insp: f64, half_time_min: f64, duration_min: f64) -> f64 {
    let k = rate_constant(half_time_min);
    p_insp + (p_old - p_insp) * exp(-k * duration_min)
}

/// `p_new = Pinsp0 + R*(t - 1/k) - (Pinsp0 - p_old - R/k) * exp(-k*t)`
fn haldane_rate(
    p_old: f64,
    p_insp_start: f64,
    p_insp_end: f64,
    half_time_min: f64,
    duration_min: f64,
) -> f64 {
    if duration_min <= 0. {
        return p_old;
    }
    let k = rate_constant(half_time_min);
    let r = (p_insp_end - p_insp_start) / duration_min;
    p_insp_start + r * (duration_min - 1. / k) - (p_insp_start - p_old - r / k) * exp(-k * duration_min)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_surface_state() {
        let tissues = TissueCompartment::initial_surface_state(SURFACE_PRESSURE);
        let expected_p_n2 = (SURFACE_PRESSURE - WATER_VAPOR_PRESSURE) * SURFACE_AIR_FN2;
        for (i, comp) in tissues.iter().enumerate() {
            assert_eq!(comp.index as usize, i + 1);
            assert!((comp.p_n2 - expected_p_n2).abs() < 1e-12);
            assert_eq!(comp.p_he, 0.);
        }
    }

    #[test]
    fn test_schreiner_approaches_inspired_pressure() {
        let mut comp = TissueCompartment::from_zhl_params(5, ZHL_16C[4]);
        comp.p_n2 = 0.79 * (SURFACE_PRESSURE - WATER_VAPOR_PRESSURE);
        let p_amb = 4.0; // 30m
        comp.update_constant_depth(p_amb, 0.79, 0., 10_000.);
        let expected = inspired(p_amb, 0.79);
        assert!((comp.p_n2 - expected).abs() < 1e-6);
    }

    #[test]
    fn test_he_skipped_when_fraction_and_pressure_zero() {
        let mut comp = TissueCompartment::from_zhl_params(1, ZHL_16C[0]);
        comp.update_constant_depth(4.0, 0.79, 0., 10.);
        assert_eq!(comp.p_he, 0.);
    }

    #[test]
    fn test_he_offgasses_independently_after_switch_to_nitrox() {
        // loaded on trimix then switched to air: He keeps decaying on its own
        // half-time even though inspired He is now zero (spec §9 note).
        let mut comp = TissueCompartment::from_zhl_params(5, ZHL_16C[4]);
        comp.update_constant_depth(4.0, 0.21, 0.35, 30.);
        assert!(comp.p_he > 0.);
        let p_he_before = comp.p_he;
        comp.update_constant_depth(4.0, 0.79, 0., 10.);
        assert!(comp.p_he < p_he_before);
        assert!(comp.p_he > 0.);
    }

    #[test]
    fn test_changing_depth_limit_matches_linear_rate_for_small_t() {
        let mut comp = TissueCompartment::from_zhl_params(1, ZHL_16C[0]);
        comp.p_n2 = 0.79 * (SURFACE_PRESSURE - WATER_VAPOR_PRESSURE);
        let p_start = SURFACE_PRESSURE;
        let p_end = SURFACE_PRESSURE + 1.0;
        let dt = 1e-4;
        comp.update_changing_depth(p_start, p_end, 0.79, 0., dt);
        let r = (inspired(p_end, 0.79) - inspired(p_start, 0.79)) / dt;
        let expected = comp_p_n2_before() + r * dt;
        assert!((comp.p_n2 - expected).abs() < 1e-6);
    }

    fn comp_p_n2_before() -> f64 {
        0.79 * (SURFACE_PRESSURE - WATER_VAPOR_PRESSURE)
    }

    #[test]
    fn test_combined_ab_falls_back_to_n2_when_empty() {
        let mut comp = TissueCompartment::from_zhl_params(1, ZHL_16C[0]);
        comp.p_n2 = 0.;
        comp.p_he = 0.;
        let (a, b) = comp.combined_ab();
        assert_eq!(a, comp.a_n2);
        assert_eq!(b, comp.b_n2);
    }

    #[test]
    fn test_combined_ab_weighted() {
        let mut comp = TissueCompartment::from_zhl_params(1, ZHL_16C[0]);
        comp.p_n2 = 1.0;
        comp.p_he = 1.0;
        let (a, b) = comp.combined_ab();
        assert!((a - (comp.a_n2 + comp.a_he) / 2.).abs() < 1e-9);
        assert!((b - (comp.b_n2 + comp.b_he) / 2.).abs() < 1e-9);
    }
}
