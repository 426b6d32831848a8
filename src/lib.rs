//! Least-cost energy technology evaluation for water-energy nexus models.
//!
//! Given meteorological resource data, per-row energy and water demands, and
//! the cost parameters of a set of competing technologies, this crate
//! estimates capacity factors, sizes installations, computes levelised costs
//! of energy over a discounted project horizon, and picks the cheapest
//! technology per row. All functions are stateless transforms over
//! caller-owned tables; presentation and storage belong to the embedding
//! application.
#![warn(missing_docs)]
pub mod finance;
pub mod id;
pub mod input;
pub mod log;
pub mod parameters;
pub mod resource;
pub mod selection;
pub mod series;
pub mod sizing;
pub mod units;

#[cfg(test)]
mod fixture;
