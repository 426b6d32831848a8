//! Conversion of raw meteorological resource data into capacity factors.
//!
//! The wind path corrects measured speeds to hub height with an empirical shear
//! exponent, then integrates a turbine power curve against a Rayleigh wind-speed
//! distribution fitted to the corrected mean speed. The solar path is a plain
//! unit conversion of surface irradiance; there is no geometry or shading model.
//!
//! Degenerate inputs (zero or negative wind speed) produce NaN capacity factors
//! rather than errors. Callers are expected to pre-filter such rows.
use crate::series::{Monthly, Periodic};
use crate::units::Dimensionless;
use anyhow::{Result, ensure};
use std::f64::consts::PI;

/// Seconds in a day; converts per-day irradiance to the per-second basis used
/// for capacity factors.
const SECONDS_PER_DAY: f64 = 60.0 * 60.0 * 24.0;

/// A turbine power characteristic sampled over discrete wind-speed bins.
///
/// The curve approximates the continuous power-vs-speed relationship with a
/// small set of representative speeds, so the Rayleigh integral in
/// [`wind_capacity_factor`] is a finite sum. The sample resolution is chosen by
/// the caller; a 1 m/s grid spanning cut-in to cut-out speed is typical.
#[derive(Debug, Clone, PartialEq)]
pub struct PowerCurve {
    speeds: Vec<f64>,
    power: Vec<f64>,
}

impl PowerCurve {
    /// Create a power curve from representative speeds (m/s) and the power
    /// output at each speed, in the same units as the turbine's rated power.
    ///
    /// Both sequences must be the same length and ordered by speed bin.
    pub fn new(speeds: Vec<f64>, power: Vec<f64>) -> Result<Self> {
        ensure!(!speeds.is_empty(), "Power curve cannot be empty");
        ensure!(
            speeds.len() == power.len(),
            "Power curve has {} speed bins but {} power samples",
            speeds.len(),
            power.len()
        );

        Ok(Self { speeds, power })
    }

    /// Iterate over `(speed, power)` sample pairs in speed-bin order.
    fn bins(&self) -> impl Iterator<Item = (f64, f64)> {
        self.speeds.iter().copied().zip(self.power.iter().copied())
    }
}

/// Turbine and site parameters for wind capacity-factor estimation.
#[derive(Debug, Clone, PartialEq)]
pub struct WindTurbine {
    /// Nameplate power of the turbine
    pub rated_power: f64,
    /// Hub height the wind speed is corrected to (m)
    pub hub_height: f64,
    /// Height at which the resource data was measured (m)
    pub reference_height: f64,
    /// Combined air-density and conversion-efficiency factor
    pub efficiency: f64,
    /// Swept-area scalar applied to the energy integral
    pub swept_area: f64,
    /// Power output per sampled wind speed
    pub power_curve: PowerCurve,
}

/// Rayleigh wind-speed probability density with mean speed `mean`, at `u`.
fn rayleigh(u: f64, mean: f64) -> f64 {
    (PI / 2.0) * (u / mean.powi(2)) * ((-PI / 4.0) * (u / mean).powi(2)).exp()
}

/// The capacity factor of `turbine` for one period with mean wind speed `u_zr`
/// at the reference height, where the period lasts `hours`.
///
/// A non-positive `u_zr` makes the shear correction take the logarithm of a
/// non-positive number and the result is NaN.
pub fn wind_capacity_factor(turbine: &WindTurbine, u_zr: f64, hours: f64) -> Dimensionless {
    // Empirical shear exponent, derived from the measured speed itself
    let alpha =
        (0.37 - 0.088 * u_zr.ln()) / (1.0 - 0.088 * (turbine.reference_height / 10.0).ln());
    let u_z = u_zr * (turbine.hub_height / turbine.reference_height).powf(alpha);

    let energy_produced: f64 = turbine
        .power_curve
        .bins()
        .map(|(u, p)| turbine.efficiency * turbine.swept_area * hours * p * rayleigh(u, u_z))
        .sum();

    Dimensionless(energy_produced / (turbine.rated_power * hours))
}

/// Wind capacity factors for rows of monthly mean wind speeds (m/s).
///
/// Returns one row of twelve monthly capacity factors per input row, in the
/// same row order.
pub fn monthly_wind_capacity_factors(
    rows: &[Monthly<f64>],
    turbine: &WindTurbine,
    hours: f64,
) -> Vec<Monthly<Dimensionless>> {
    rows.iter()
        .map(|row| row.map(|u_zr| wind_capacity_factor(turbine, u_zr, hours)))
        .collect()
}

/// Wind capacity factors for long-form (year, month) wind-speed observations.
pub fn periodic_wind_capacity_factors(
    rows: &[Periodic<f64>],
    turbine: &WindTurbine,
    hours: f64,
) -> Vec<Periodic<Dimensionless>> {
    rows.iter()
        .map(|obs| obs.map(|u_zr| wind_capacity_factor(turbine, u_zr, hours)))
        .collect()
}

/// The capacity factor for one period with mean surface irradiance `srad`, in
/// energy per unit area per day.
pub fn solar_capacity_factor(srad: f64) -> Dimensionless {
    Dimensionless(srad / SECONDS_PER_DAY)
}

/// Solar capacity factors for rows of monthly mean irradiance values.
pub fn monthly_solar_capacity_factors(rows: &[Monthly<f64>]) -> Vec<Monthly<Dimensionless>> {
    rows.iter().map(|row| row.map(solar_capacity_factor)).collect()
}

/// Solar capacity factors for long-form (year, month) irradiance observations.
pub fn periodic_solar_capacity_factors(rows: &[Periodic<f64>]) -> Vec<Periodic<Dimensionless>> {
    rows.iter().map(|obs| obs.map(solar_capacity_factor)).collect()
}
