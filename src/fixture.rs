//! Fixtures for tests

use crate::finance::{FuelCost, Technology};
use crate::resource::{PowerCurve, WindTurbine};
use crate::units::{
    Dimensionless, EmissionsPerFuel, FuelPerEnergy, MoneyPerCapacity, MoneyPerEmissions,
    MoneyPerFuel,
};
use rstest::fixture;

/// Assert that an error with the given message occurs
macro_rules! assert_error {
    ($result:expr, $msg:expr) => {
        assert_eq!(
            $result.unwrap_err().chain().next().unwrap().to_string(),
            $msg
        );
    };
}
pub(crate) use assert_error;

/// A 600 kW reference turbine's power curve on a 1 m/s grid from 1 to 25 m/s,
/// with a 3 m/s cut-in and power capped at rated above 12 m/s.
#[fixture]
pub fn power_curve() -> PowerCurve {
    let speeds: Vec<f64> = (1..=25).map(f64::from).collect();
    let power = speeds
        .iter()
        .map(|&u| {
            if u < 3.0 {
                0.0
            } else {
                (600.0 * (u / 12.0).powi(3)).min(600.0)
            }
        })
        .collect();

    PowerCurve::new(speeds, power).unwrap()
}

#[fixture]
pub fn turbine(power_curve: PowerCurve) -> WindTurbine {
    WindTurbine {
        rated_power: 600.0,
        hub_height: 55.0,
        reference_height: 10.0,
        efficiency: 0.97,
        swept_area: 1.0,
        power_curve,
    }
}

#[fixture]
pub fn technology() -> Technology {
    Technology {
        id: "diesel".into(),
        lifetime: 20,
        om_cost_rate: Dimensionless(0.05),
        capital_cost: MoneyPerCapacity(1000.0),
        fuel_cost: FuelCost::Constant(MoneyPerFuel(2.0)),
        fuel_requirement: FuelPerEnergy(1.0),
        efficiency: Dimensionless(1.0),
        emission_factor: EmissionsPerFuel(0.5),
        environmental_cost: MoneyPerEmissions(10.0),
    }
}
