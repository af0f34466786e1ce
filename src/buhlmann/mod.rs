//! Bühlmann ZHL-16C engine: tissue kinetics (C3), gradient-factor ceilings
//! (C4), and the decompression scheduler for single-level (C5) and
//! multi-level (C6) dives.

pub mod compartment;
pub mod config;
pub mod gradient;
pub mod multilevel;
pub mod scheduler;
pub mod zhl_values;

pub use compartment::TissueCompartment;
pub use config::{EngineConfig, GradientFactors};
pub use multilevel::compute_multilevel_profile;
pub use scheduler::compute_profile;
