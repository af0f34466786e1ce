//! US-Navy approximation (spec §4.10, §9 Open Question 2): a small
//! hard-coded lookup table, explicitly indicative rather than a faithful
//! reproduction of the published tables (which would require the full
//! standard). Exposed only through the comparator, never as a standalone
//! planning tool.

use crate::common::depth::Depth;
use crate::common::time::Time;

/// `(depth_m, bottom_time_min, total_decompression_time_min)`, six depths by
/// five bottom-time bands, reading roughly off the shape of the published
/// US Navy no-decompression/decompression tables. Indicative only.
const USNAVY_TABLE: [(f64, f64, f64); 30] = [
    (15., 30., 0.),
    (15., 60., 0.),
    (15., 100., 0.),
    (15., 150., 8.),
    (15., 200., 16.),
    (21., 20., 0.),
    (21., 35., 0.),
    (21., 60., 8.),
    (21., 100., 24.),
    (21., 150., 40.),
    (27., 15., 0.),
    (27., 25., 3.),
    (27., 40., 17.),
    (27., 70., 35.),
    (27., 100., 55.),
    (33., 10., 0.),
    (33., 20., 5.),
    (33., 30., 18.),
    (33., 50., 38.),
    (33., 70., 55.),
    (40., 5., 0.),
    (40., 15., 7.),
    (40., 25., 23.),
    (40., 40., 44.),
    (40., 60., 70.),
    (46., 5., 2.),
    (46., 10., 10.),
    (46., 20., 32.),
    (46., 30., 55.),
    (46., 40., 80.),
];

/// Bilinear-ish nearest/interpolated estimate of total decompression time
/// (minutes) for `depth`/`bottom_time`, from [`USNAVY_TABLE`]. Clearly
/// labeled an "educational approximation, not validated" (spec §4.10).
pub fn estimate_usnavy_decompression_time(depth: Depth, bottom_time: Time) -> Time {
    let d = depth.as_meters();
    let t = bottom_time.as_minutes();

    let mut best: Option<(f64, f64)> = None; // (distance, value)
    for &(table_d, table_t, value) in USNAVY_TABLE.iter() {
        let dd = table_d - d;
        let dt = table_t - t;
        let distance = dd * dd + dt * dt;
        match best {
            Some((best_distance, _)) if best_distance <= distance => {}
            _ => best = Some((distance, value)),
        }
    }

    Time::from_minutes(best.map(|(_, value)| value).unwrap_or(0.))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deeper_longer_dives_indicate_more_decompression() {
        let shallow = estimate_usnavy_decompression_time(Depth::from_meters(15.), Time::from_minutes(30.));
        let deep = estimate_usnavy_decompression_time(Depth::from_meters(46.), Time::from_minutes(40.));
        assert!(deep >= shallow);
    }

    #[test]
    fn test_table_lookup_is_never_negative() {
        for depth_m in [10., 20., 30., 50.] {
            let result = estimate_usnavy_decompression_time(Depth::from_meters(depth_m), Time::from_minutes(20.));
            assert!(result.as_minutes() >= 0.);
        }
    }
}
