//! The discounted lifecycle cost model.
//!
//! For each analysis row, the levelised cost of energy (LCOE) is the total
//! discounted cost of building and running a technology over the project
//! horizon, divided by the total discounted energy it delivers. Generation is
//! assumed flat from year 1 onwards (no ramp-up or degradation), with year 0 as
//! a construction year producing nothing. This matches the upstream nexus
//! model; see `DESIGN.md` before generalising it.
use crate::id::TechnologyID;
use crate::input::{deserialise_proportion, input_err_msg, read_csv};
use crate::units::{
    Capacity, Dimensionless, EmissionsPerFuel, Energy, FuelPerEnergy, Money, MoneyPerCapacity,
    MoneyPerEmissions, MoneyPerEnergy, MoneyPerFuel,
};
use anyhow::{Context, Result, ensure};
use indexmap::IndexMap;
use serde::Deserialize;
use std::path::Path;

const TECHNOLOGIES_FILE_NAME: &str = "technologies.csv";

/// Fuel cost of a technology: either constant over the project or an explicit
/// per-year series.
#[derive(Debug, Clone, PartialEq)]
pub enum FuelCost {
    /// The same fuel cost applies in every year
    Constant(MoneyPerFuel),
    /// One fuel cost per project year, aligned to the generation profile
    PerYear(Vec<MoneyPerFuel>),
}

impl FuelCost {
    /// The fuel cost in the given project year (0-indexed).
    fn for_year(&self, year: usize) -> MoneyPerFuel {
        match self {
            Self::Constant(cost) => *cost,
            Self::PerYear(costs) => costs[year],
        }
    }
}

/// Cost and performance parameters of one candidate technology.
#[derive(Debug, Clone, PartialEq)]
pub struct Technology {
    /// Unique identifier for the technology
    pub id: TechnologyID,
    /// Technical lifetime in years
    pub lifetime: u32,
    /// Yearly operation and maintenance cost, as a fraction of capital cost
    pub om_cost_rate: Dimensionless,
    /// Capital cost per unit of installed capacity
    pub capital_cost: MoneyPerCapacity,
    /// Cost of fuel per fuel unit
    pub fuel_cost: FuelCost,
    /// Fuel required per unit of energy generated
    pub fuel_requirement: FuelPerEnergy,
    /// Fuel-to-energy conversion efficiency
    pub efficiency: Dimensionless,
    /// Emissions per fuel unit consumed
    pub emission_factor: EmissionsPerFuel,
    /// Cost charged per emission unit
    pub environmental_cost: MoneyPerEmissions,
}

/// A raw record in `technologies.csv`. Fuel costs in CSV form are constant; a
/// per-year series must be supplied programmatically.
#[derive(Debug, Clone, Deserialize)]
struct TechnologyRaw {
    id: String,
    lifetime: u32,
    #[serde(deserialize_with = "deserialise_proportion")]
    om_cost_rate: Dimensionless,
    capital_cost: MoneyPerCapacity,
    fuel_cost: MoneyPerFuel,
    fuel_requirement: FuelPerEnergy,
    efficiency: Dimensionless,
    emission_factor: EmissionsPerFuel,
    environmental_cost: MoneyPerEmissions,
}

impl From<TechnologyRaw> for Technology {
    fn from(raw: TechnologyRaw) -> Self {
        Self {
            id: raw.id.into(),
            lifetime: raw.lifetime,
            om_cost_rate: raw.om_cost_rate,
            capital_cost: raw.capital_cost,
            fuel_cost: FuelCost::Constant(raw.fuel_cost),
            fuel_requirement: raw.fuel_requirement,
            efficiency: raw.efficiency,
            emission_factor: raw.emission_factor,
            environmental_cost: raw.environmental_cost,
        }
    }
}

/// Candidate technologies, keyed by ID in file order.
///
/// The iteration order of this map fixes the technology column order used for
/// least-cost tie-breaking, so it must stay stable.
pub type TechnologyMap = IndexMap<TechnologyID, Technology>;

/// Read technologies from an iterator of raw records.
fn read_technologies_from_iter<I>(iter: I) -> Result<TechnologyMap>
where
    I: Iterator<Item = TechnologyRaw>,
{
    let mut technologies = TechnologyMap::new();
    for raw in iter {
        let technology = Technology::from(raw);
        ensure!(
            technologies
                .insert(technology.id.clone(), technology.clone())
                .is_none(),
            "Duplicate technology ID {}",
            technology.id
        );
    }

    ensure!(!technologies.is_empty(), "No technologies provided");

    Ok(technologies)
}

/// Read the technologies.csv file from the specified model directory.
pub fn read_technologies(model_dir: &Path) -> Result<TechnologyMap> {
    let file_path = model_dir.join(TECHNOLOGIES_FILE_NAME);
    let technologies_csv = read_csv(&file_path)?;
    read_technologies_from_iter(technologies_csv).with_context(|| input_err_msg(&file_path))
}

/// The financial horizon of a single LCOE evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ProjectHorizon {
    /// Yearly discount rate, as a fraction
    pub discount_rate: Dimensionless,
    /// Project length in years
    pub project_life: u32,
}

impl ProjectHorizon {
    /// Create a project horizon. The project life must be at least one year.
    pub fn new(discount_rate: Dimensionless, project_life: u32) -> Result<Self> {
        ensure!(project_life >= 1, "Project life must be at least one year");
        Ok(Self {
            discount_rate,
            project_life,
        })
    }
}

/// The discount factor for the given project year (0-indexed): `(1 + r)^year`.
pub fn discount_factor(discount_rate: Dimensionless, year: usize) -> Dimensionless {
    (Dimensionless(1.0) + discount_rate).powi(year as i32)
}

/// The levelised cost of energy of `technology` for each row.
///
/// `sizing_capacity` holds each row's nameplate capacity and `annual_demand`
/// the energy the row must deliver in each operating year. Rows with zero
/// demand produce a non-finite LCOE; callers must exclude them before
/// least-cost selection.
pub fn lcoe(
    sizing_capacity: &[Capacity],
    annual_demand: &[Energy],
    technology: &Technology,
    horizon: &ProjectHorizon,
) -> Result<Vec<MoneyPerEnergy>> {
    ensure!(
        sizing_capacity.len() == annual_demand.len(),
        "Got {} capacity rows for {} demand rows",
        sizing_capacity.len(),
        annual_demand.len()
    );
    if let FuelCost::PerYear(costs) = &technology.fuel_cost {
        ensure!(
            costs.len() == horizon.project_life as usize,
            "Fuel cost series has {} entries for a {}-year project",
            costs.len(),
            horizon.project_life
        );
    }

    Ok(sizing_capacity
        .iter()
        .zip(annual_demand)
        .map(|(&capacity, &demand)| lcoe_for_row(capacity, demand, technology, horizon))
        .collect())
}

/// LCOE for a single row.
fn lcoe_for_row(
    capacity: Capacity,
    demand: Energy,
    technology: &Technology,
    horizon: &ProjectHorizon,
) -> MoneyPerEnergy {
    let project_life = horizon.project_life as usize;
    let capital_cost = technology.capital_cost * capacity;
    let om_cost = technology.om_cost_rate * capital_cost;

    // A technology outlived by the project must be bought a second time
    let reinvest_year = (technology.lifetime >= 1 && technology.lifetime < horizon.project_life)
        .then_some(technology.lifetime as usize);

    let mut total_cost = Money(0.0);
    let mut total_generation = Energy(0.0);
    for year in 0..project_life {
        // Year 0 is the construction year: full capital outlay, no operation
        let generation = if year == 0 { Energy(0.0) } else { demand };
        let investment = if year == 0 || Some(year) == reinvest_year {
            capital_cost
        } else {
            Money(0.0)
        };
        let om = if year == 0 { Money(0.0) } else { om_cost };

        let fuel_consumed = technology.fuel_requirement * generation;
        let fuel = technology.fuel_cost.for_year(year) * fuel_consumed / technology.efficiency;
        let emissions = technology.emission_factor * fuel_consumed / technology.efficiency;
        let emission_cost = technology.environmental_cost * emissions;

        let salvage = if year == project_life - 1 {
            salvage_value(capital_cost, technology, horizon, reinvest_year.is_some())
        } else {
            Money(0.0)
        };

        let factor = discount_factor(horizon.discount_rate, year);
        total_cost += (investment + om + fuel + emission_cost - salvage) / factor;
        total_generation += generation / factor;
    }

    total_cost / total_generation
}

/// Residual value of the not-yet-depreciated equipment at project end.
fn salvage_value(
    capital_cost: Money,
    technology: &Technology,
    horizon: &ProjectHorizon,
    reinvested: bool,
) -> Money {
    // After a re-investment only the replacement's remaining life counts
    let used_life = if reinvested {
        horizon.project_life - technology.lifetime
    } else {
        horizon.project_life
    };

    capital_cost * (Dimensionless(1.0) - Dimensionless(used_life as f64 / technology.lifetime as f64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::{assert_error, technology};
    use float_cmp::assert_approx_eq;
    use rstest::rstest;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_fuel_cost_for_year() {
        let constant = FuelCost::Constant(MoneyPerFuel(2.0));
        assert_eq!(constant.for_year(0), MoneyPerFuel(2.0));
        assert_eq!(constant.for_year(19), MoneyPerFuel(2.0));

        let series = FuelCost::PerYear(vec![MoneyPerFuel(1.0), MoneyPerFuel(3.0)]);
        assert_eq!(series.for_year(0), MoneyPerFuel(1.0));
        assert_eq!(series.for_year(1), MoneyPerFuel(3.0));
    }

    #[rstest]
    #[case(0.0, 0, 1.0)]
    #[case(0.05, 0, 1.0)]
    #[case(0.05, 1, 1.05)]
    #[case(0.1, 2, 1.2100000000000002)]
    fn test_discount_factor(#[case] rate: f64, #[case] year: usize, #[case] expected: f64) {
        let result = discount_factor(Dimensionless(rate), year);
        assert_approx_eq!(f64, result.value(), expected, epsilon = 1e-12);
    }

    #[test]
    fn test_project_horizon_rejects_zero_life() {
        assert_error!(
            ProjectHorizon::new(Dimensionless(0.05), 0),
            "Project life must be at least one year"
        );
    }

    /// With technology life equal to project life and zero discount rate, the
    /// LCOE is the plain average cost per unit of undiscounted energy.
    #[rstest]
    fn test_lcoe_undiscounted(technology: Technology) {
        let horizon = ProjectHorizon::new(Dimensionless(0.0), 20).unwrap();
        let result = lcoe(
            &[Capacity(1.0)],
            &[Energy(100.0)],
            &technology,
            &horizon,
        )
        .unwrap();

        // capex 1000, then 19 operating years of om 50, fuel 200, emissions 500:
        // (1000 + 19 * 750) / 1900
        assert_approx_eq!(f64, result[0].value(), 15250.0 / 1900.0, epsilon = 1e-9);
    }

    #[test]
    fn test_lcoe_discounted() {
        let technology = Technology {
            id: "grid".into(),
            lifetime: 3,
            om_cost_rate: Dimensionless(0.1),
            capital_cost: MoneyPerCapacity(1000.0),
            fuel_cost: FuelCost::Constant(MoneyPerFuel(0.0)),
            fuel_requirement: FuelPerEnergy(0.0),
            efficiency: Dimensionless(1.0),
            emission_factor: EmissionsPerFuel(0.0),
            environmental_cost: MoneyPerEmissions(0.0),
        };
        let horizon = ProjectHorizon::new(Dimensionless(0.1), 3).unwrap();
        let result = lcoe(&[Capacity(1.0)], &[Energy(100.0)], &technology, &horizon).unwrap();

        // costs: 1000 + 100/1.1 + 100/1.21; generation: 100/1.1 + 100/1.21
        let generation = 100.0 / 1.1 + 100.0 / 1.21;
        let expected = (1000.0 + generation) / generation;
        assert_approx_eq!(f64, result[0].value(), expected, epsilon = 1e-9);
    }

    /// A technology with a shorter life than the project incurs capex twice and
    /// the salvage credit only covers the replacement's remaining life.
    #[rstest]
    fn test_lcoe_with_reinvestment(technology: Technology) {
        let technology = Technology {
            lifetime: 3,
            om_cost_rate: Dimensionless(0.0),
            fuel_requirement: FuelPerEnergy(0.0),
            emission_factor: EmissionsPerFuel(0.0),
            ..technology
        };
        let horizon = ProjectHorizon::new(Dimensionless(0.0), 5).unwrap();
        let result = lcoe(&[Capacity(1.0)], &[Energy(100.0)], &technology, &horizon).unwrap();

        // Two investments of 1000 (years 0 and 3); salvage of
        // 1000 * (1 - 2/3) at year 4; generation 4 * 100
        let expected = (2000.0 - 1000.0 * (1.0 - 2.0 / 3.0)) / 400.0;
        assert_approx_eq!(f64, result[0].value(), expected, epsilon = 1e-9);
    }

    #[rstest]
    fn test_lcoe_per_year_fuel_cost(technology: Technology) {
        let technology = Technology {
            om_cost_rate: Dimensionless(0.0),
            emission_factor: EmissionsPerFuel(0.0),
            fuel_cost: FuelCost::PerYear(vec![
                MoneyPerFuel(0.0),
                MoneyPerFuel(1.0),
                MoneyPerFuel(2.0),
            ]),
            lifetime: 3,
            ..technology
        };
        let horizon = ProjectHorizon::new(Dimensionless(0.0), 3).unwrap();
        let result = lcoe(&[Capacity(1.0)], &[Energy(100.0)], &technology, &horizon).unwrap();

        // capex 1000; fuel 100 in year 1 and 200 in year 2; generation 200
        assert_approx_eq!(f64, result[0].value(), 1300.0 / 200.0, epsilon = 1e-9);
    }

    #[rstest]
    fn test_lcoe_fuel_series_must_match_project_life(technology: Technology) {
        let technology = Technology {
            fuel_cost: FuelCost::PerYear(vec![MoneyPerFuel(1.0); 3]),
            ..technology
        };
        let horizon = ProjectHorizon::new(Dimensionless(0.0), 5).unwrap();
        assert!(lcoe(&[Capacity(1.0)], &[Energy(100.0)], &technology, &horizon).is_err());
    }

    #[rstest]
    fn test_lcoe_misaligned_rows(technology: Technology) {
        let horizon = ProjectHorizon::new(Dimensionless(0.05), 20).unwrap();
        assert!(lcoe(&[Capacity(1.0)], &[], &technology, &horizon).is_err());
    }

    #[rstest]
    fn test_lcoe_zero_demand_is_not_finite(technology: Technology) {
        let horizon = ProjectHorizon::new(Dimensionless(0.05), 20).unwrap();
        let result = lcoe(&[Capacity(1.0)], &[Energy(0.0)], &technology, &horizon).unwrap();
        assert!(!result[0].value().is_finite());
    }

    #[test]
    fn test_read_technologies() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join(TECHNOLOGIES_FILE_NAME);
        let mut file = File::create(file_path).unwrap();
        writeln!(
            file,
            "id,lifetime,om_cost_rate,capital_cost,fuel_cost,fuel_requirement,efficiency,emission_factor,environmental_cost
wind,20,0.02,1370.0,0.0,0.0,1.0,0.0,0.0
diesel,10,0.05,938.0,0.6,0.095,0.28,3.2,0.01"
        )
        .unwrap();

        let technologies = read_technologies(dir.path()).unwrap();
        assert_eq!(technologies.len(), 2);
        // File order is preserved
        let ids: Vec<_> = technologies.keys().cloned().collect();
        assert_eq!(ids, vec!["wind".into(), "diesel".into()]);

        let diesel = &technologies["diesel"];
        assert_eq!(diesel.lifetime, 10);
        assert_eq!(diesel.fuel_cost, FuelCost::Constant(MoneyPerFuel(0.6)));
        assert_eq!(diesel.efficiency, Dimensionless(0.28));
    }

    #[test]
    fn test_read_technologies_rejects_duplicates() {
        let raw = TechnologyRaw {
            id: "wind".into(),
            lifetime: 20,
            om_cost_rate: Dimensionless(0.02),
            capital_cost: MoneyPerCapacity(1370.0),
            fuel_cost: MoneyPerFuel(0.0),
            fuel_requirement: FuelPerEnergy(0.0),
            efficiency: Dimensionless(1.0),
            emission_factor: EmissionsPerFuel(0.0),
            environmental_cost: MoneyPerEmissions(0.0),
        };
        let result = read_technologies_from_iter([raw.clone(), raw].into_iter());
        assert_error!(result, "Duplicate technology ID wind");
    }
}
