//! Analysis and planning utilities layered on top of the core scheduler:
//! stop-by-stop tissue analysis (C7), repetitive-dive bookkeeping (C8), and
//! air consumption (C9).

pub mod air;
pub mod repetitive;
pub mod stop_analysis;

pub use air::{compute_air_consumption, Cylinder, CylinderRole, CylinderUsage, AirConsumptionResult};
pub use repetitive::{
    evolve_surface_interval, loading_ratio, no_fly_time, pressure_group, surface_interval_to_group,
    validate_sequence, NoFlyTimeResult, SequenceEntry, SequenceRules, SurfaceIntervalResult,
};
pub use stop_analysis::{analyze_stop, CompartmentAnalysis, SaturationStatus, StopAnalysisResult};
