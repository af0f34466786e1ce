//! Alternative models (C10): educational approximations of VPM-B, RGBM, and
//! US-Navy tables, built as parameter presets and small post-processing
//! passes over the same C5 scheduler (spec §4.10), plus a comparator.

pub mod comparator;
pub mod rgbm;
pub mod usnavy;
pub mod vpmb;

pub use comparator::{compare_models, ComparisonEntry, ComparisonResult, ModelKind};
pub use rgbm::compute_profile_rgbm;
pub use usnavy::estimate_usnavy_decompression_time;
pub use vpmb::compute_profile_vpmb;
