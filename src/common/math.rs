//! std/no-std dispatch for the handful of float ops the engine needs.

#[cfg(feature = "no-std")]
use libm;

#[inline]
pub fn abs(val: f64) -> f64 {
    #[cfg(not(feature = "no-std"))]
    {
        val.abs()
    }
    #[cfg(feature = "no-std")]
    {
        libm::fabs(val)
    }
}

#[inline]
pub fn ceil(val: f64) -> f64 {
    #[cfg(not(feature = "no-std"))]
    {
        val.ceil()
    }
    #[cfg(feature = "no-std")]
    {
        libm::ceil(val)
    }
}

#[inline]
pub fn exp(val: f64) -> f64 {
    #[cfg(not(feature = "no-std"))]
    {
        val.exp()
    }
    #[cfg(feature = "no-std")]
    {
        libm::exp(val)
    }
}

#[inline]
pub fn round(val: f64) -> f64 {
    #[cfg(not(feature = "no-std"))]
    {
        val.round()
    }
    #[cfg(feature = "no-std")]
    {
        libm::round(val)
    }
}

pub const LN_2: f64 = core::f64::consts::LN_2;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_abs() {
        assert_eq!(abs(-3.5), 3.5);
        assert_eq!(abs(3.5), 3.5);
    }

    #[test]
    fn test_ceil() {
        assert_eq!(ceil(2.01), 3.);
        assert_eq!(ceil(3.), 3.);
    }

    #[test]
    fn test_round() {
        assert_eq!(round(2.4), 2.);
        assert_eq!(round(2.6), 3.);
    }
}
