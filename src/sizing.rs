//! Sizing of installed capacity from a demand series and capacity factors.
//!
//! Each period's required nameplate capacity is the power demand divided by the
//! capacity factor for that period. A zero capacity factor against nonzero
//! demand yields an infinite capacity; callers that cannot rule this out should
//! exclude zero-CF periods before sizing.
use crate::series::{Monthly, Periodic};
use crate::units::{Capacity, Dimensionless, Power};
use anyhow::{Result, ensure};
use itertools::Itertools;

/// Capacity factors to size against: a single value for every row and month, or
/// one row of monthly factors per demand row.
#[derive(Debug, Clone, Copy)]
pub enum CapacityFactors<'a> {
    /// The same capacity factor applies everywhere
    Uniform(Dimensionless),
    /// Row-aligned monthly capacity factors (e.g. from the resource estimator)
    PerRow(&'a [Monthly<Dimensionless>]),
}

/// Required installed capacity per month for rows of monthly power demand.
///
/// Fails if `PerRow` capacity factors are not aligned one-to-one with the
/// demand rows.
pub fn monthly_installed_capacity(
    demand: &[Monthly<Power>],
    capacity_factors: CapacityFactors,
) -> Result<Vec<Monthly<Capacity>>> {
    if let CapacityFactors::PerRow(rows) = capacity_factors {
        ensure!(
            rows.len() == demand.len(),
            "Got {} capacity factor rows for {} demand rows",
            rows.len(),
            demand.len()
        );
    }

    let installed = demand
        .iter()
        .enumerate()
        .map(|(i, row)| {
            Monthly(std::array::from_fn(|month| {
                let cf = match capacity_factors {
                    CapacityFactors::Uniform(cf) => cf,
                    CapacityFactors::PerRow(rows) => rows[i].0[month],
                };
                row.0[month] / cf
            }))
        })
        .collect();

    Ok(installed)
}

/// Required installed capacity for long-form (year, month) power demand with a
/// single capacity factor.
pub fn periodic_installed_capacity(
    demand: &[Periodic<Power>],
    capacity_factor: Dimensionless,
) -> Vec<Periodic<Capacity>> {
    demand
        .iter()
        .map(|obs| obs.map(|power| power / capacity_factor))
        .collect()
}

/// The nameplate sizing capacity for one row: the maximum monthly requirement,
/// since the installation must cover the worst-case period.
pub fn sizing_capacity(installed: &Monthly<Capacity>) -> Capacity {
    let mut max = installed.0[0];
    for capacity in &installed.0[1..] {
        if capacity.value() > max.value() {
            max = *capacity;
        }
    }
    max
}

/// Sizing capacities for a whole table of monthly installed-capacity rows.
pub fn sizing_capacities(installed: &[Monthly<Capacity>]) -> Vec<Capacity> {
    installed.iter().map(sizing_capacity).collect_vec()
}
