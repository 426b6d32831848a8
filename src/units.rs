#![allow(missing_docs)]

//! Unit types for the quantities flowing through the evaluation.
//!
//! Every quantity is a newtype over `f64` and arithmetic is only defined where it
//! is dimensionally meaningful, so e.g. a fuel cost cannot be added to an energy
//! demand by accident. Multiplication and division rules are spelled out
//! explicitly at the bottom of this module.

/// Represents a dimensionless quantity (capacity factors, rates, fractions).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    derive_more::Add,
    derive_more::Sub,
    derive_more::AddAssign,
    serde::Deserialize,
    serde::Serialize,
)]
pub struct Dimensionless(pub f64);

impl std::ops::Mul for Dimensionless {
    type Output = Dimensionless;

    fn mul(self, rhs: Dimensionless) -> Self::Output {
        Dimensionless::from(self.0 * rhs.0)
    }
}

impl std::ops::Div for Dimensionless {
    type Output = Dimensionless;

    fn div(self, rhs: Dimensionless) -> Self::Output {
        Dimensionless::from(self.0 / rhs.0)
    }
}

impl Dimensionless {
    pub fn powi(self, rhs: i32) -> Self {
        Dimensionless::from(self.0.powi(rhs))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl From<f64> for Dimensionless {
    fn from(val: f64) -> Self {
        Self(val)
    }
}

impl From<Dimensionless> for f64 {
    fn from(val: Dimensionless) -> Self {
        val.0
    }
}

macro_rules! unit_struct {
    ($name:ident) => {
        /// Represents a type of quantity.
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            derive_more::Add,
            derive_more::Sub,
            derive_more::AddAssign,
            serde::Deserialize,
            serde::Serialize,
        )]
        pub struct $name(pub f64);

        impl $name {
            /// Creates a new instance of the unit type from a f64 value.
            pub fn from(val: f64) -> Self {
                Self(val)
            }

            /// Returns the value of the unit type as a f64.
            pub fn value(self) -> f64 {
                self.0
            }
        }
    };
}

macro_rules! impl_mul {
    ($Lhs:ty, $Rhs:ty, $Out:ty) => {
        impl std::ops::Mul<$Rhs> for $Lhs {
            type Output = $Out;
            fn mul(self, rhs: $Rhs) -> $Out {
                <$Out>::from(self.0 * rhs.0)
            }
        }
        impl std::ops::Mul<$Lhs> for $Rhs {
            type Output = $Out;
            fn mul(self, lhs: $Lhs) -> $Out {
                <$Out>::from(self.0 * lhs.0)
            }
        }
    };
}

macro_rules! impl_div {
    ($Lhs:ty, $Rhs:ty, $Out:ty) => {
        impl std::ops::Div<$Rhs> for $Lhs {
            type Output = $Out;
            fn div(self, rhs: $Rhs) -> $Out {
                <$Out>::from(self.0 / rhs.0)
            }
        }
    };
}

// Base quantities
unit_struct!(Money);
unit_struct!(Energy);
unit_struct!(Power);
unit_struct!(Capacity);
unit_struct!(Fuel);
unit_struct!(Emissions);
unit_struct!(Water);

// Derived quantities
unit_struct!(MoneyPerEnergy);
unit_struct!(MoneyPerCapacity);
unit_struct!(MoneyPerFuel);
unit_struct!(MoneyPerEmissions);
unit_struct!(MoneyPerWater);
unit_struct!(FuelPerEnergy);
unit_struct!(EmissionsPerFuel);

// Division rules
impl_div!(Money, Energy, MoneyPerEnergy);
impl_div!(Money, Capacity, MoneyPerCapacity);
impl_div!(Money, Water, MoneyPerWater);
impl_div!(Money, Dimensionless, Money);
impl_div!(Energy, Dimensionless, Energy);
impl_div!(Emissions, Dimensionless, Emissions);
// Sizing an installation: power demand over a capacity factor gives the
// nameplate capacity required to deliver that power.
impl_div!(Power, Dimensionless, Capacity);

// Multiplication rules
impl_mul!(MoneyPerCapacity, Capacity, Money);
impl_mul!(MoneyPerEnergy, Energy, Money);
impl_mul!(MoneyPerFuel, Fuel, Money);
impl_mul!(MoneyPerEmissions, Emissions, Money);
impl_mul!(FuelPerEnergy, Energy, Fuel);
impl_mul!(EmissionsPerFuel, Fuel, Emissions);
impl_mul!(Money, Dimensionless, Money);
