//! Pressure & gas-mix utilities (C2) and the `GasMix`/`GasInventory` data
//! model (spec §3): free pressure functions (spec's C2 operation list) plus
//! a `GasMix` value type generalized to carry an optional display name.

use alloc::string::String;
use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::constants::{INFINITE_MOD_METERS, SURFACE_PRESSURE, WATER_VAPOR_PRESSURE};
use super::depth::{Depth, DepthType};
use super::error::InvalidInput;
use super::math;

/// A breathing gas mix, `{fO2, fN2, fHe}`, always summing to 1 within 1e-6.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GasMix {
    pub f_o2: f64,
    pub f_n2: f64,
    pub f_he: f64,
}

const FRACTION_SUM_TOLERANCE: f64 = 1e-6;

impl GasMix {
    /// Constructs a mix from O2/He fractions, deriving N2 as the remainder.
    pub fn new(f_o2: f64, f_he: f64) -> Result<Self, InvalidInput> {
        let f_n2 = math::round((1. - (f_o2 + f_he)) * 1e6) / 1e6;
        Self::from_fractions(f_o2, f_n2, f_he)
    }

    /// Constructs a mix from all three fractions, validating the sum.
    pub fn from_fractions(f_o2: f64, f_n2: f64, f_he: f64) -> Result<Self, InvalidInput> {
        for (label, frac) in [("fO2", f_o2), ("fN2", f_n2), ("fHe", f_he)] {
            if !(0.0..=1.0).contains(&frac) {
                return Err(InvalidInput::InvalidGasMix {
                    reason: alloc::format!("{label} must be within [0, 1], got {frac}"),
                });
            }
        }
        let sum = f_o2 + f_n2 + f_he;
        if (sum - 1.).abs() > FRACTION_SUM_TOLERANCE {
            return Err(InvalidInput::InvalidGasMix {
                reason: alloc::format!("fractions must sum to 1, got {sum}"),
            });
        }
        Ok(Self { f_o2, f_n2, f_he })
    }

    pub fn air() -> Self {
        Self::new(0.21, 0.).expect("air is a valid mix")
    }

    /// Convenience constructor for nitrox, e.g. `GasMix::nitrox(0.32)`.
    pub fn nitrox(f_o2: f64) -> Result<Self, InvalidInput> {
        Self::new(f_o2, 0.)
    }

    pub fn trimix(f_o2: f64, f_he: f64) -> Result<Self, InvalidInput> {
        Self::new(f_o2, f_he)
    }

    pub fn id(&self) -> String {
        alloc::format!("{:.0}/{:.0}", self.f_o2 * 100., self.f_he * 100.)
    }
}

/// A named gas within a dive's inventory.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Gas {
    pub mix: GasMix,
    pub name: Option<String>,
}

impl Gas {
    pub fn new(mix: GasMix) -> Self {
        Self { mix, name: None }
    }

    pub fn named(mix: GasMix, name: &str) -> Self {
        Self {
            mix,
            name: Some(String::from(name)),
        }
    }
}

/// One bottom gas plus an ordered list of deco gases (spec §3 `GasInventory`).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GasInventory {
    pub bottom_gas: Gas,
    pub deco_gases: Vec<Gas>,
}

/// Which role a gas is being evaluated for (spec §4.2 `best_gas_for_depth`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GasRole {
    Working,
    Decompression,
}

impl GasInventory {
    pub fn new(bottom_gas: Gas, deco_gases: Vec<Gas>) -> Result<Self, InvalidInput> {
        let inventory = Self {
            bottom_gas,
            deco_gases,
        };
        inventory.validate()?;
        Ok(inventory)
    }

    fn validate(&self) -> Result<(), InvalidInput> {
        let mut seen_o2: Vec<f64> = Vec::with_capacity(self.deco_gases.len() + 1);
        seen_o2.push(self.bottom_gas.mix.f_o2);
        for deco_gas in &self.deco_gases {
            if deco_gas.mix.f_o2 <= self.bottom_gas.mix.f_o2 {
                return Err(InvalidInput::InvalidGasMix {
                    reason: String::from(
                        "deco gas must have strictly higher fO2 than the bottom gas",
                    ),
                });
            }
            if seen_o2
                .iter()
                .any(|o2| (o2 - deco_gas.mix.f_o2).abs() < 0.01)
            {
                return Err(InvalidInput::InvalidGasMix {
                    reason: String::from("duplicate gas (fO2 within 1%) in inventory"),
                });
            }
            seen_o2.push(deco_gas.mix.f_o2);
        }
        Ok(())
    }

    /// All gases in the inventory, bottom gas first.
    pub fn all(&self) -> Vec<&Gas> {
        let mut all = alloc::vec![&self.bottom_gas];
        all.extend(self.deco_gases.iter());
        all
    }
}

// --- C2: pressure & gas-mix utilities -------------------------------------

/// `depth_to_pressure`: ambient pressure (bar) at `depth` under `surface_pressure`.
pub fn depth_to_pressure(depth: Depth, surface_pressure: f64) -> f64 {
    surface_pressure + depth.as_meters() * super::constants::BAR_PER_METER_SALT
}

/// `pressure_to_depth`: inverse of [`depth_to_pressure`], clamped at 0.
pub fn pressure_to_depth(pressure: f64, surface_pressure: f64) -> Depth {
    let m = (pressure - surface_pressure) / super::constants::BAR_PER_METER_SALT;
    Depth::from_meters(m.max(0.))
}

/// `inspired_pressure`: partial pressure of `f_gas` after subtracting the
/// (global, not per-gas) alveolar water vapor pressure.
pub fn inspired_pressure(ambient_pressure: f64, f_gas: f64) -> f64 {
    (ambient_pressure - WATER_VAPOR_PRESSURE) * f_gas
}

/// `ppO2`: oxygen partial pressure at `depth`, using the *total-ambient*
/// convention (spec §9 Open Question 1 — no water-vapor subtraction here).
pub fn ppo2(mix: GasMix, depth: Depth, surface_pressure: f64) -> f64 {
    mix.f_o2 * depth_to_pressure(depth, surface_pressure)
}

/// `MOD`: maximum operating depth for a ppO2 ceiling. Gases with `fO2 <= 0.21`
/// return the documented "no limit within recreational range" sentinel.
pub fn mod_of(mix: GasMix, max_ppo2: f64, surface_pressure: f64) -> Depth {
    if mix.f_o2 <= 0.21 {
        return Depth::from_meters(INFINITE_MOD_METERS);
    }
    let pressure = max_ppo2 / mix.f_o2;
    pressure_to_depth(pressure, surface_pressure)
}

/// `min_safe_depth`: shallowest depth at which ppO2 >= 0.16 (hypoxia floor).
pub fn min_safe_depth(mix: GasMix, surface_pressure: f64) -> Depth {
    const HYPOXIA_FLOOR_PPO2: f64 = 0.16;
    if mix.f_o2 <= 0. {
        return Depth::from_meters(INFINITE_MOD_METERS);
    }
    let pressure = HYPOXIA_FLOOR_PPO2 / mix.f_o2;
    pressure_to_depth(pressure, surface_pressure)
}

/// `END`: equivalent narcotic depth, referenced to air; helium is non-narcotic.
pub fn end(mix: GasMix, depth: Depth) -> Depth {
    let narcotic_fraction = mix.f_o2 + mix.f_n2;
    let end_m = (depth.as_meters() + 10.) * narcotic_fraction - 10.;
    Depth::from_meters(end_m.max(0.))
}

/// `best_gas_for_depth`: of all gases eligible at `depth` for the given
/// `role`, pick the one with the highest fO2, tie-broken by lowest fHe.
pub fn best_gas_for_depth<'a>(
    depth: Depth,
    inventory: &'a GasInventory,
    role: GasRole,
    surface_pressure: f64,
) -> Option<&'a Gas> {
    let max_ppo2 = match role {
        GasRole::Working => 1.4,
        GasRole::Decompression => 1.6,
    };
    inventory
        .all()
        .into_iter()
        .filter(|gas| {
            mod_of(gas.mix, max_ppo2, surface_pressure) >= depth
                && min_safe_depth(gas.mix, surface_pressure) <= depth
        })
        .fold(None::<&Gas>, |best, candidate| match best {
            None => Some(candidate),
            Some(current) => {
                if candidate.mix.f_o2 > current.mix.f_o2
                    || (candidate.mix.f_o2 == current.mix.f_o2
                        && candidate.mix.f_he < current.mix.f_he)
                {
                    Some(candidate)
                } else {
                    Some(current)
                }
            }
        })
}

/// `gas_switch_depth`: MOD of `to` at the deco ppO2 limit (1.6).
pub fn gas_switch_depth(to: GasMix, surface_pressure: f64) -> Depth {
    mod_of(to, 1.6, surface_pressure)
}

/// A switch is only "worthwhile" if it meaningfully enriches oxygen.
pub fn is_switch_worthwhile(from: GasMix, to: GasMix) -> bool {
    to.f_o2 > from.f_o2 + 0.01
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gas_mix_validates_sum() {
        assert!(GasMix::from_fractions(0.21, 0.79, 0.).is_ok());
        assert!(GasMix::from_fractions(0.21, 0.5, 0.).is_err());
    }

    #[test]
    fn test_gas_mix_rejects_out_of_range() {
        assert!(GasMix::new(1.1, 0.).is_err());
        assert!(GasMix::new(-0.1, 0.).is_err());
    }

    #[test]
    fn test_trimix_n2_derivation() {
        let tmx = GasMix::new(0.18, 0.35).unwrap();
        assert!((tmx.f_n2 - 0.47).abs() < 1e-9);
    }

    #[test]
    fn test_pressure_round_trip() {
        for d in [0., 10., 30.5, 99.9] {
            let depth = Depth::from_meters(d);
            let p = depth_to_pressure(depth, SURFACE_PRESSURE);
            let back = pressure_to_depth(p, SURFACE_PRESSURE);
            assert!((back.as_meters() - d).abs() < 1e-9);
        }
    }

    #[test]
    fn test_mod_round_trip() {
        let air = GasMix::air();
        let ean32 = GasMix::nitrox(0.32).unwrap();
        for mix in [air, ean32] {
            let max_ppo2 = 1.4;
            let mod_depth = mod_of(mix, max_ppo2, SURFACE_PRESSURE);
            let round_trip_ppo2 = ppo2(mix, mod_depth, SURFACE_PRESSURE);
            assert!((round_trip_ppo2 - max_ppo2).abs() < 1e-6);
        }
    }

    #[test]
    fn test_mod_infinite_sentinel_for_low_o2() {
        let air = GasMix::air();
        assert_eq!(
            mod_of(air, 1.4, SURFACE_PRESSURE),
            Depth::from_meters(INFINITE_MOD_METERS)
        );
    }

    #[test]
    fn test_end_helium_non_narcotic() {
        let trimix = GasMix::trimix(0.21, 0.35).unwrap();
        let calculated = end(trimix, Depth::from_meters(60.));
        // narcotic fraction 0.21 + 0.44 = 0.65 -> (60+10)*0.65-10 = 35.5
        assert!((calculated.as_meters() - 35.5).abs() < 1e-6);
    }

    #[test]
    fn test_end_air_equals_depth() {
        let air = GasMix::air();
        let depth = Depth::from_meters(40.);
        assert!((end(air, depth).as_meters() - 40.).abs() < 1e-9);
    }

    #[test]
    fn test_best_gas_for_depth_prefers_richest_eligible() {
        let air = Gas::new(GasMix::air());
        let ean50 = Gas::new(GasMix::nitrox(0.50).unwrap());
        let oxygen = Gas::new(GasMix::nitrox(1.0).unwrap());
        let inventory = GasInventory::new(air.clone(), alloc::vec![ean50.clone(), oxygen.clone()])
            .unwrap();

        let best_at_5m = best_gas_for_depth(
            Depth::from_meters(5.),
            &inventory,
            GasRole::Decompression,
            SURFACE_PRESSURE,
        )
        .unwrap();
        assert_eq!(best_at_5m.mix, oxygen.mix);

        let best_at_21m = best_gas_for_depth(
            Depth::from_meters(21.),
            &inventory,
            GasRole::Decompression,
            SURFACE_PRESSURE,
        )
        .unwrap();
        assert_eq!(best_at_21m.mix, ean50.mix);
    }

    #[test]
    fn test_switch_worthwhile() {
        let air = GasMix::air();
        let ean22 = GasMix::nitrox(0.22).unwrap();
        let ean50 = GasMix::nitrox(0.50).unwrap();
        assert!(!is_switch_worthwhile(air, ean22));
        assert!(is_switch_worthwhile(air, ean50));
    }

    #[test]
    fn test_gas_inventory_rejects_weaker_deco_gas() {
        let ean32 = Gas::new(GasMix::nitrox(0.32).unwrap());
        let air = Gas::new(GasMix::air());
        assert!(GasInventory::new(ean32, alloc::vec![air]).is_err());
    }

    #[test]
    fn test_gas_inventory_rejects_duplicate_o2() {
        let air = Gas::new(GasMix::air());
        let ean22 = Gas::new(GasMix::nitrox(0.22).unwrap());
        assert!(GasInventory::new(air, alloc::vec![ean22.clone(), ean22]).is_err());
    }
}
