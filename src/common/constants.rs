//! Physical constants and defaults (C1, spec §4.1).

use super::depth::DepthType;

/// Surface atmospheric pressure, bar absolute.
pub const SURFACE_PRESSURE: f64 = 1.01325;
/// Alveolar water vapor pressure at 37°C, bar (Bühlmann's value).
pub const WATER_VAPOR_PRESSURE: f64 = 0.0627;
/// Pressure increase per meter of depth, bar/m (10 m-per-bar simplification
/// rather than a salinity-specific constant).
pub const BAR_PER_METER_SALT: f64 = 0.1;

pub const DESCENT_RATE: f64 = 20.; // m/min
pub const ASCENT_RATE: f64 = 9.; // m/min
pub const SAFETY_STOP_DEPTH: DepthType = 5.; // m
pub const SAFETY_STOP_TIME_MIN: f64 = 3.; // min
pub const GAS_SWITCH_TIME_MIN: f64 = 1.; // min
pub const STOP_GRID: DepthType = 3.; // m
pub const MAX_SEGMENTS: usize = 10;

/// Sentinel depth returned by `mod_of` for gases whose MOD is effectively
/// unlimited within recreational range (fO2 <= 0.21).
pub const INFINITE_MOD_METERS: DepthType = 1000.;

/// Surfacing N2 fraction breathing air, used by the repetitive-dive layer.
pub const SURFACE_AIR_FN2: f64 = 0.79;

/// Scheduler stop-loop iteration cap (spec §4.5 "State machine").
pub const MAX_STOP_ITERATIONS: u32 = 10_000;

/// Default single-dive / multi-dive no-fly floors, hours.
pub const NO_FLY_FLOOR_SINGLE_DIVE_HOURS: f64 = 12.;
pub const NO_FLY_FLOOR_MULTI_DIVE_HOURS: f64 = 18.;

/// Default minimum surface interval solver floor, minutes.
pub const SURFACE_INTERVAL_MIN_FLOOR_MINUTES: f64 = 60.;

/// Default cap on dives per day for sequence validation.
pub const MAX_DIVES_PER_DAY_DEFAULT: u32 = 3;

/// Maximum configured dive depth, meters (spec §7 `InvalidDepth`).
pub const DEFAULT_MAX_DEPTH_METERS: DepthType = 100.;
