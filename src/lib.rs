#![cfg_attr(feature = "no-std", no_std)]
extern crate alloc;

pub mod analysis;
pub mod buhlmann;
pub mod common;
pub mod models;

pub use buhlmann::{compute_multilevel_profile, compute_profile, EngineConfig, GradientFactors, TissueCompartment};

pub use common::{
    ConfigValidationErr, DecompressionStop, Depth, DepthType, DiveParameters, DiveProfile,
    DiveSegment, Gas, GasInventory, GasMix, GasRole, GasSwitch, InvalidInput,
    MultiLevelDiveParameters, SegmentKind, SwitchReason, Time, Unit, Units, Warning, WarningLevel,
};

pub use analysis::{
    analyze_stop, compute_air_consumption, evolve_surface_interval, loading_ratio, no_fly_time,
    pressure_group, surface_interval_to_group, validate_sequence, AirConsumptionResult,
    CompartmentAnalysis, Cylinder, CylinderRole, CylinderUsage, NoFlyTimeResult,
    SaturationStatus, SequenceEntry, SequenceRules, StopAnalysisResult, SurfaceIntervalResult,
};

pub use models::{
    compare_models, compute_profile_rgbm, compute_profile_vpmb, estimate_usnavy_decompression_time,
    ComparisonEntry, ComparisonResult, ModelKind,
};

// Re-export Vec and vec macro from alloc for convenience under no_std.
pub use alloc::vec;
pub use alloc::vec::Vec;
