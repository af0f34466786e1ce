//! Dive data model (spec §3): segments, stops, switches, and the assembled
//! `DiveProfile` returned by the scheduler (C5/C6).

use alloc::string::String;
use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::depth::Depth;
use super::gas::{Gas, GasInventory, GasMix};
use super::time::Time;
use super::warning::Warning;
use crate::buhlmann::compartment::TissueCompartment;
use crate::buhlmann::config::{EngineConfig, GradientFactors};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SegmentKind {
    Descent,
    Bottom,
    Ascent,
    Deco,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DiveSegment {
    pub depth: Depth,
    pub duration: Time,
    pub gas: GasMix,
    pub kind: SegmentKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SwitchReason {
    Optimal,
    ModLimit,
    Deco,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GasSwitch {
    pub depth: Depth,
    pub from_gas: GasMix,
    pub to_gas: GasMix,
    pub reason: SwitchReason,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DecompressionStop {
    pub depth: Depth,
    pub duration: Time,
    pub runtime: Time,
    pub gas: GasMix,
    pub gas_switch: Option<GasSwitch>,
}

/// Single-level dive input (spec §6 `compute_profile`).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DiveParameters {
    pub depth: Depth,
    pub bottom_time: Time,
    pub gases: GasInventory,
    pub gradient_factors: GradientFactors,
    pub surface_pressure: f64,
    pub descent_rate: f64,
    pub ascent_rate: f64,
    pub stop_grid: f64,
    pub max_stop_iterations: u32,
    pub safety_stop_depth: f64,
    pub safety_stop_time_min: f64,
    /// Tissue state to start from (surface-air equilibrium if `None`);
    /// used by the repetitive-dive layer (C8) to thread prior residuals.
    pub initial_tissues: Option<[TissueCompartment; 16]>,
}

impl DiveParameters {
    pub fn new(depth: Depth, bottom_time: Time, gases: GasInventory) -> Self {
        Self::from_config(depth, bottom_time, gases, &EngineConfig::default())
    }

    /// Builds from an [`EngineConfig`], pulling every tunable the scheduler
    /// reads (gradient factors, rates, stop grid, iteration cap, safety
    /// stop) from one source instead of repeating engine-wide defaults here.
    pub fn from_config(depth: Depth, bottom_time: Time, gases: GasInventory, config: &EngineConfig) -> Self {
        Self {
            depth,
            bottom_time,
            gases,
            gradient_factors: config.gradient_factors,
            surface_pressure: config.surface_pressure,
            descent_rate: config.descent_rate,
            ascent_rate: config.ascent_rate,
            stop_grid: config.stop_grid,
            max_stop_iterations: config.max_stop_iterations,
            safety_stop_depth: config.safety_stop_depth,
            safety_stop_time_min: config.safety_stop_time_min,
            initial_tissues: None,
        }
    }

    pub fn with_gradient_factors(mut self, gf_low: u8, gf_high: u8) -> Self {
        self.gradient_factors = GradientFactors::new(gf_low, gf_high);
        self
    }

    pub fn with_initial_tissues(mut self, tissues: [TissueCompartment; 16]) -> Self {
        self.initial_tissues = Some(tissues);
        self
    }
}

/// Multi-level dive input (spec §6 `compute_multilevel_profile`, C6).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MultiLevelDiveParameters {
    pub segments: Vec<(Depth, Time, GasMix)>,
    pub gases: GasInventory,
    pub gradient_factors: GradientFactors,
    pub surface_pressure: f64,
    pub descent_rate: f64,
    pub ascent_rate: f64,
    pub stop_grid: f64,
    pub max_stop_iterations: u32,
    pub safety_stop_depth: f64,
    pub safety_stop_time_min: f64,
    pub max_segments: usize,
    pub initial_tissues: Option<[TissueCompartment; 16]>,
}

impl MultiLevelDiveParameters {
    pub fn new(segments: Vec<(Depth, Time, GasMix)>, gases: GasInventory) -> Self {
        Self::from_config(segments, gases, &EngineConfig::default())
    }

    /// Builds from an [`EngineConfig`], the same way [`DiveParameters::from_config`] does.
    pub fn from_config(segments: Vec<(Depth, Time, GasMix)>, gases: GasInventory, config: &EngineConfig) -> Self {
        Self {
            segments,
            gases,
            gradient_factors: config.gradient_factors,
            surface_pressure: config.surface_pressure,
            descent_rate: config.descent_rate,
            ascent_rate: config.ascent_rate,
            stop_grid: config.stop_grid,
            max_stop_iterations: config.max_stop_iterations,
            safety_stop_depth: config.safety_stop_depth,
            safety_stop_time_min: config.safety_stop_time_min,
            max_segments: config.max_segments,
            initial_tissues: None,
        }
    }

    pub fn with_gradient_factors(mut self, gf_low: u8, gf_high: u8) -> Self {
        self.gradient_factors = GradientFactors::new(gf_low, gf_high);
        self
    }
}

/// Result of a dive computation (spec §3 `DiveProfile`).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DiveProfile {
    pub decompression_stops: Vec<DecompressionStop>,
    pub segments: Vec<DiveSegment>,
    pub gas_switches: Vec<GasSwitch>,
    pub total_dive_time: Time,
    pub total_decompression_time: Time,
    /// `Some` for single-level profiles, forced to `Some(Time::zero())`
    /// whenever the dive requires any decompression stops (spec §4.5 step 8
    /// / §8 invariant). `None` for multi-level profiles, where NDL is not a
    /// meaningful figure (spec §4.5 step 8 scopes it to single-level dives).
    pub no_decompression_limit: Option<Time>,
    pub tissue_compartments: [TissueCompartment; 16],
    pub max_depth: Depth,
    pub average_depth: Depth,
    pub warnings: Vec<Warning>,
    /// Time-to-surface at the end of the dive.
    pub time_to_surface: Time,
    /// Time-to-surface recomputed as if the stop grid were 5m instead of 3m —
    /// gives a sense of how sensitive the obligation is to the stop-grid choice.
    pub time_to_surface_in_5: Time,
    /// Percent of the controlling compartment's M-value occupied at the end
    /// of the dive, referenced to the current depth.
    pub gf_99: f64,
    /// Same, referenced to a full ascent to the surface.
    pub gf_surf: f64,
}

impl DiveProfile {
    pub fn model_label(&self) -> &'static str {
        "Bühlmann ZHL-16C (gradient factors) — educational implementation"
    }

    pub fn gas_label_for(gas: &Gas) -> String {
        gas.name.clone().unwrap_or_else(|| gas.mix.id())
    }
}
