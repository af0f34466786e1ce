use core::{
    cmp::Ordering,
    ops::{Add, AddAssign, Div, Mul, Sub},
};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A duration stored internally in seconds; all public constructors/accessors
/// work in minutes or seconds, minutes being the unit the rest of the engine
/// expects.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Time {
    s: f64,
}

impl Add for Time {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self { s: self.s + rhs.s }
    }
}

impl Sub for Time {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self { s: self.s - rhs.s }
    }
}

impl AddAssign for Time {
    fn add_assign(&mut self, rhs: Self) {
        *self = Self { s: self.s + rhs.s };
    }
}

impl Mul<f64> for Time {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self::Output {
        Self { s: self.s * rhs }
    }
}

impl Div<f64> for Time {
    type Output = Self;
    fn div(self, rhs: f64) -> Self::Output {
        Self { s: self.s / rhs }
    }
}

impl PartialOrd for Time {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.s.partial_cmp(&other.s)
    }
}

impl Time {
    pub fn zero() -> Self {
        Self { s: 0. }
    }

    pub fn from_seconds<T: Into<f64>>(val: T) -> Self {
        Self { s: val.into() }
    }

    pub fn from_minutes<T: Into<f64>>(val: T) -> Self {
        Self {
            s: val.into() * 60.,
        }
    }

    pub fn as_seconds(&self) -> f64 {
        self.s
    }

    pub fn as_minutes(&self) -> f64 {
        self.s / 60.
    }

    /// Whole minutes, rounded up — the scheduler discretizes all stop
    /// durations to whole minutes (spec: "durations are integer minutes").
    pub fn as_whole_minutes_ceil(&self) -> u32 {
        super::math::ceil(self.as_minutes() - 1e-9).max(0.) as u32
    }
}
