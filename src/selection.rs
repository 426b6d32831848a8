//! Least-cost technology selection and the pumping costs derived from it.
//!
//! A [`CostTable`] holds one LCOE value per technology per row. Selection
//! writes the cheapest technology and its cost onto each row, optionally
//! restricted to rows in one geographic zone. Ties go to the technology that
//! appears first in the table's column order, so callers must fix a canonical
//! technology order for reproducible output.
use crate::id::{TechnologyID, ZoneID};
use crate::units::{Energy, Money, MoneyPerEnergy, MoneyPerWater, Water};
use anyhow::{Result, ensure};
use indexmap::IndexMap;
use itertools::Itertools;

/// The least-cost technology chosen for a row and its LCOE.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    /// The technology with the minimum LCOE
    pub technology: TechnologyID,
    /// That technology's LCOE
    pub lcoe: MoneyPerEnergy,
}

/// One row of candidate costs, with the selection result once computed.
#[derive(Debug, Clone, PartialEq)]
pub struct CostRow {
    /// Geographic zone the row belongs to, if any
    pub zone: Option<ZoneID>,
    /// One LCOE per technology, in the table's column order
    pub costs: Vec<MoneyPerEnergy>,
    /// Filled in by [`CostTable::select_least_cost`]
    pub assignment: Option<Assignment>,
}

/// A table of competing technology costs, one column per technology.
#[derive(Debug, Clone, PartialEq)]
pub struct CostTable {
    technologies: Vec<TechnologyID>,
    rows: Vec<CostRow>,
}

impl CostTable {
    /// Create an empty table with the given technology column order.
    pub fn new(technologies: Vec<TechnologyID>) -> Self {
        Self {
            technologies,
            rows: Vec::new(),
        }
    }

    /// The technology column order.
    pub fn technologies(&self) -> &[TechnologyID] {
        &self.technologies
    }

    /// The table's rows, in insertion order.
    pub fn rows(&self) -> &[CostRow] {
        &self.rows
    }

    /// Append a row of costs. There must be one cost per technology column.
    pub fn push_row(&mut self, zone: Option<ZoneID>, costs: Vec<MoneyPerEnergy>) -> Result<()> {
        ensure!(
            costs.len() == self.technologies.len(),
            "Got {} costs for {} technologies",
            costs.len(),
            self.technologies.len()
        );
        self.rows.push(CostRow {
            zone,
            costs,
            assignment: None,
        });

        Ok(())
    }

    /// Select the minimum-cost technology for each row.
    ///
    /// With `zone` given, only rows in that zone are updated and all other rows
    /// are left untouched. Ties are broken towards the first technology in
    /// column order. Rows whose costs are all NaN keep whatever assignment they
    /// already had.
    pub fn select_least_cost(&mut self, zone: Option<&ZoneID>) {
        for row in &mut self.rows {
            if let Some(zone) = zone
                && row.zone.as_ref() != Some(zone)
            {
                continue;
            }

            let Some(index) = row
                .costs
                .iter()
                .position_min_by(|a, b| a.value().total_cmp(&b.value()))
            else {
                continue;
            };
            if row.costs[index].value().is_nan() {
                continue;
            }

            row.assignment = Some(Assignment {
                technology: self.technologies[index].clone(),
                lcoe: row.costs[index],
            });
        }
    }
}

/// A supply point with its demands and least-cost assignment, ready for the
/// downstream pumping-cost derivation.
#[derive(Debug, Clone, PartialEq)]
pub struct SupplyPoint {
    /// Annual electricity demand of the point
    pub energy_demand: Energy,
    /// Annual water demand of the point
    pub water_demand: Water,
    /// The technology chosen for the point
    pub assignment: Assignment,
}

/// The energy allocated to `technology` at each supply point: the point's full
/// energy demand where it is the chosen technology, nothing elsewhere.
pub fn generation_allocation(
    points: &[SupplyPoint],
    technology: &TechnologyID,
) -> Vec<Option<Energy>> {
    points
        .iter()
        .map(|point| (point.assignment.technology == *technology).then_some(point.energy_demand))
        .collect()
}

/// Generation allocations for every technology, keyed in the given order.
pub fn generation_by_technology(
    points: &[SupplyPoint],
    technologies: &[TechnologyID],
) -> IndexMap<TechnologyID, Vec<Option<Energy>>> {
    technologies
        .iter()
        .map(|technology| (technology.clone(), generation_allocation(points, technology)))
        .collect()
}

/// Yearly cost of pumping: energy demand priced at the chosen LCOE.
pub fn pumping_cost(energy_demand: Energy, lcoe: MoneyPerEnergy) -> Money {
    lcoe * energy_demand
}

/// Pumping cost per unit of water delivered. Infinite when the water demand is
/// zero; callers must exclude such rows.
pub fn unit_pumping_cost(pumping_cost: Money, water_demand: Water) -> MoneyPerWater {
    pumping_cost / water_demand
}
