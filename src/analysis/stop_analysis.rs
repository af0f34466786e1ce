//! Stop analysis (C7): a read-only query over a tissue snapshot — a
//! separate module that inspects compartments without mutating them,
//! built on the M-value math in [`crate::buhlmann::gradient`].

use crate::buhlmann::compartment::TissueCompartment;
use crate::buhlmann::config::GradientFactors;
use crate::buhlmann::gradient::{
    ceiling, controlling_compartment_index, gf_adjusted_tolerated_pressure, interpolated_gf,
    is_ascent_safe, m_value,
};
use crate::common::depth::Depth;
use crate::common::gas::depth_to_pressure;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Saturation banding for one compartment (spec §4.7).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SaturationStatus {
    Safe,
    Caution,
    Danger,
}

impl SaturationStatus {
    fn from_percent(percent: f64) -> Self {
        if percent >= 90. {
            SaturationStatus::Danger
        } else if percent >= 70. {
            SaturationStatus::Caution
        } else {
            SaturationStatus::Safe
        }
    }
}

/// Per-compartment figures at the queried depth.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CompartmentAnalysis {
    pub index: u8,
    pub total_inert_pressure: f64,
    pub a: f64,
    pub b: f64,
    pub raw_m_value: f64,
    pub gf_adjusted_tolerated_pressure: f64,
    pub margin_bar: f64,
    pub margin_percent: f64,
    pub ceiling: Depth,
    pub saturation_percent: f64,
    pub status: SaturationStatus,
    pub is_limiting: bool,
}

/// Result of [`analyze_stop`] (spec §6 item 3).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StopAnalysisResult {
    pub target_depth: Depth,
    pub compartments: [CompartmentAnalysis; 16],
    pub limiting_compartment_index: usize,
    pub is_ascent_safe: bool,
    pub current_gf: f64,
}

/// Pure query over a tissue snapshot at `target_depth` (spec §4.7). `gf_low`
/// and `gf_high` are the dive's configured gradient factors; `first_stop_depth`
/// anchors the GF interpolation the same way the scheduler does.
pub fn analyze_stop(
    tissues: &[TissueCompartment; 16],
    target_depth: Depth,
    gf_low: u8,
    gf_high: u8,
    first_stop_depth: Depth,
    surface_pressure: f64,
) -> StopAnalysisResult {
    let gf = GradientFactors::new(gf_low, gf_high);
    let current_gf = interpolated_gf(target_depth, first_stop_depth, gf);
    let ambient = depth_to_pressure(target_depth, surface_pressure);

    let ceilings_for_limiting: [Depth; 16] =
        core::array::from_fn(|i| ceiling(&tissues[i], surface_pressure, current_gf));
    let limiting_index = controlling_compartment_index(&ceilings_for_limiting);

    let compartments = core::array::from_fn(|i| {
        let comp = &tissues[i];
        let (a, b) = comp.combined_ab();
        let raw_m_value = m_value(comp, ambient);
        let tolerated = gf_adjusted_tolerated_pressure(comp, surface_pressure, current_gf);
        let total = comp.total_inert_pressure();
        let margin_bar = raw_m_value - total;
        let margin_percent = if raw_m_value > 0. {
            margin_bar / raw_m_value * 100.
        } else {
            0.
        };
        let saturation_percent = if raw_m_value > 0. { total / raw_m_value * 100. } else { 0. };

        CompartmentAnalysis {
            index: comp.index,
            total_inert_pressure: total,
            a,
            b,
            raw_m_value,
            gf_adjusted_tolerated_pressure: tolerated,
            margin_bar,
            margin_percent,
            ceiling: ceilings_for_limiting[i],
            saturation_percent,
            status: SaturationStatus::from_percent(saturation_percent),
            is_limiting: i == limiting_index,
        }
    });

    StopAnalysisResult {
        target_depth,
        compartments,
        limiting_compartment_index: limiting_index,
        is_ascent_safe: is_ascent_safe(tissues, target_depth, surface_pressure, current_gf),
        current_gf,
    }
}
