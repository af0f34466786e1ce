use deco_planner::{Gas, GasInventory, GasMix};

pub fn air_inventory() -> GasInventory {
    GasInventory::new(Gas::new(GasMix::air()), Vec::new()).unwrap()
}

pub fn inventory_with_deco_gases(deco: Vec<GasMix>) -> GasInventory {
    let gases = deco.into_iter().map(Gas::new).collect();
    GasInventory::new(Gas::new(GasMix::air()), gases).unwrap()
}

#[macro_export]
macro_rules! assert_close_to_abs {
    ($a:expr, $b:expr, $tolerance:expr) => {
        if ($a - $b).abs() > $tolerance {
            panic!(
                "assertion failed: `{}` not within `{}` of `{}` (left: `{}`, right: `{}`)",
                stringify!($a),
                $tolerance,
                stringify!($b),
                $a,
                $b
            );
        }
    };
}

#[macro_export]
macro_rules! assert_close_to_percent {
    ($a:expr, $b:expr, $percent:expr) => {
        let tolerance = ($b).abs() * $percent / 100.;
        if ($a - $b).abs() > tolerance {
            panic!(
                "assertion failed: `{}` not within `{}`% of `{}` (left: `{}`, right: `{}`)",
                stringify!($a),
                $percent,
                stringify!($b),
                $a,
                $b
            );
        }
    };
}
