//! Row shapes for tabular data.
//!
//! Resource, demand and capacity tables come in two layouts: wide rows holding
//! one value per calendar month, and long rows holding a single value keyed by
//! year and month. Functions that accept one layout have a counterpart for the
//! other, rather than a mode flag switching output schemas at runtime.

/// One calendar year of monthly values for a single analysis row.
///
/// Index 0 is January.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Monthly<T>(pub [T; 12]);

impl<T> Monthly<T> {
    /// Apply `f` to each monthly value, preserving the month order.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Monthly<U> {
        Monthly(self.0.map(f))
    }

    /// Iterate over the monthly values in calendar order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.0.iter()
    }

    /// Iterate over `(month, value)` pairs, with months numbered 1 to 12.
    pub fn months(&self) -> impl Iterator<Item = (u32, &T)> {
        (1..=12).zip(self.0.iter())
    }
}

impl<T: Copy> Monthly<T> {
    /// The value for the given calendar month (1 to 12).
    pub fn month(&self, month: u32) -> T {
        self.0[month as usize - 1]
    }
}

/// A single observation for one (year, month) period of a long-form table.
#[derive(Debug, Clone, Copy, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Periodic<T> {
    /// Calendar year of the observation
    pub year: u32,
    /// Calendar month of the observation (1 to 12)
    pub month: u32,
    /// The observed value
    pub value: T,
}

impl<T> Periodic<T> {
    /// Apply `f` to the value, keeping the (year, month) key.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Periodic<U> {
        Periodic {
            year: self.year,
            month: self.month,
            value: f(self.value),
        }
    }
}
