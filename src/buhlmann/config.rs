//! Configuration (ambient stack + C4 parameters): a builder (`with_*`
//! methods, `Default`, `validate`) over the engine's tunable parameters.

use crate::common::constants::{
    ASCENT_RATE, DEFAULT_MAX_DEPTH_METERS, DESCENT_RATE, MAX_DIVES_PER_DAY_DEFAULT, MAX_SEGMENTS,
    MAX_STOP_ITERATIONS, NO_FLY_FLOOR_MULTI_DIVE_HOURS, NO_FLY_FLOOR_SINGLE_DIVE_HOURS,
    SAFETY_STOP_DEPTH, SAFETY_STOP_TIME_MIN, STOP_GRID, SURFACE_INTERVAL_MIN_FLOOR_MINUTES,
};
use crate::common::error::InvalidInput;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// `(gfLow, gfHigh)`, percentages stored as integers 10..100 (spec §4.5
/// "Numerical policies").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GradientFactors {
    pub low: u8,
    pub high: u8,
}

impl Default for GradientFactors {
    fn default() -> Self {
        Self { low: 30, high: 85 }
    }
}

impl GradientFactors {
    pub fn new(low: u8, high: u8) -> Self {
        Self { low, high }
    }

    pub fn validate(&self) -> Result<(), InvalidInput> {
        let range = 10..=100u8;
        if !range.contains(&self.low) || !range.contains(&self.high) {
            return Err(InvalidInput::InvalidGradientFactors {
                reason: alloc::string::String::from("gfLow/gfHigh must be within 10-100"),
            });
        }
        if self.low > self.high {
            return Err(InvalidInput::InvalidGradientFactors {
                reason: alloc::string::String::from("gfLow can't be higher than gfHigh"),
            });
        }
        Ok(())
    }
}

/// Engine-wide configuration: rates, stop grid, safety-stop and
/// repetitive-dive parameters. `DiveParameters`/`MultiLevelDiveParameters`
/// pull their defaults from this struct's `Default` impl and can be built
/// directly from a customized one via `from_config`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EngineConfig {
    pub gradient_factors: GradientFactors,
    pub surface_pressure: f64,
    pub descent_rate: f64,
    pub ascent_rate: f64,
    pub stop_grid: f64,
    pub max_depth: f64,
    pub max_stop_iterations: u32,
    pub max_segments: usize,
    pub safety_stop_depth: f64,
    pub safety_stop_time_min: f64,
    pub max_dives_per_day: u32,
    pub min_surface_interval_minutes: f64,
    pub no_fly_floor_single_dive_hours: f64,
    pub no_fly_floor_multi_dive_hours: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            gradient_factors: GradientFactors::default(),
            surface_pressure: crate::common::constants::SURFACE_PRESSURE,
            descent_rate: DESCENT_RATE,
            ascent_rate: ASCENT_RATE,
            stop_grid: STOP_GRID,
            max_depth: DEFAULT_MAX_DEPTH_METERS,
            max_stop_iterations: MAX_STOP_ITERATIONS,
            max_segments: MAX_SEGMENTS,
            safety_stop_depth: SAFETY_STOP_DEPTH,
            safety_stop_time_min: SAFETY_STOP_TIME_MIN,
            max_dives_per_day: MAX_DIVES_PER_DAY_DEFAULT,
            min_surface_interval_minutes: SURFACE_INTERVAL_MIN_FLOOR_MINUTES,
            no_fly_floor_single_dive_hours: NO_FLY_FLOOR_SINGLE_DIVE_HOURS,
            no_fly_floor_multi_dive_hours: NO_FLY_FLOOR_MULTI_DIVE_HOURS,
        }
    }
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_gradient_factors(mut self, low: u8, high: u8) -> Self {
        self.gradient_factors = GradientFactors::new(low, high);
        self
    }

    pub fn with_surface_pressure(mut self, surface_pressure: f64) -> Self {
        self.surface_pressure = surface_pressure;
        self
    }

    pub fn with_rates(mut self, descent_rate: f64, ascent_rate: f64) -> Self {
        self.descent_rate = descent_rate;
        self.ascent_rate = ascent_rate;
        self
    }

    pub fn with_stop_grid(mut self, stop_grid: f64) -> Self {
        self.stop_grid = stop_grid;
        self
    }

    pub fn with_safety_stop(mut self, depth: f64, time_min: f64) -> Self {
        self.safety_stop_depth = depth;
        self.safety_stop_time_min = time_min;
        self
    }

    pub fn with_max_segments(mut self, max_segments: usize) -> Self {
        self.max_segments = max_segments;
        self
    }

    pub fn with_repetitive_rules(
        mut self,
        max_dives_per_day: u32,
        min_surface_interval_minutes: f64,
        no_fly_floor_single_dive_hours: f64,
        no_fly_floor_multi_dive_hours: f64,
    ) -> Self {
        self.max_dives_per_day = max_dives_per_day;
        self.min_surface_interval_minutes = min_surface_interval_minutes;
        self.no_fly_floor_single_dive_hours = no_fly_floor_single_dive_hours;
        self.no_fly_floor_multi_dive_hours = no_fly_floor_multi_dive_hours;
        self
    }

    pub fn validate(&self) -> Result<(), InvalidInput> {
        self.gradient_factors.validate()?;
        if self.descent_rate <= 0. || self.ascent_rate <= 0. {
            return Err(InvalidInput::InvalidRates {
                reason: alloc::string::String::from("ascent/descent rates must be positive"),
            });
        }
        if self.stop_grid <= 0. {
            return Err(InvalidInput::InvalidRates {
                reason: alloc::string::String::from("stop grid must be positive"),
            });
        }
        if self.safety_stop_depth <= 0. || self.safety_stop_time_min <= 0. {
            return Err(InvalidInput::InvalidRates {
                reason: alloc::string::String::from("safety stop depth/time must be positive"),
            });
        }
        if self.max_segments == 0 {
            return Err(InvalidInput::InvalidSegments {
                reason: alloc::string::String::from("max segments must be positive"),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validates() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn test_gf_order_rejected() {
        let gf = GradientFactors::new(90, 80);
        assert!(gf.validate().is_err());
    }

    #[test]
    fn test_gf_range_rejected() {
        assert!(GradientFactors::new(5, 50).validate().is_err());
        assert!(GradientFactors::new(50, 150).validate().is_err());
    }

    #[test]
    fn test_invalid_rates_rejected() {
        let config = EngineConfig::default().with_rates(0., 9.);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_max_segments_rejected() {
        let config = EngineConfig::default().with_max_segments(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_repetitive_rules_builder_round_trips() {
        let config = EngineConfig::default().with_repetitive_rules(2, 90., 14., 20.);
        assert_eq!(config.max_dives_per_day, 2);
        assert_eq!(config.min_surface_interval_minutes, 90.);
        assert_eq!(config.no_fly_floor_single_dive_hours, 14.);
        assert_eq!(config.no_fly_floor_multi_dive_hours, 20.);
    }
}
