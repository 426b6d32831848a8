//! Defines the `EvaluationParameters` struct, the contents of `evaluation.toml`.
use crate::finance::ProjectHorizon;
use crate::input::{deserialise_proportion, input_err_msg, read_toml};
use crate::units::Dimensionless;
use anyhow::{Context, Result, ensure};
use log::warn;
use serde::Deserialize;
use std::path::Path;

const EVALUATION_PARAMETERS_FILE_NAME: &str = "evaluation.toml";

/// Discount rates above this level are implausible for infrastructure projects
/// and usually mean the file holds a percentage instead of a fraction.
const SUSPICIOUS_DISCOUNT_RATE: f64 = 0.5;

macro_rules! define_param_default {
    ($name:ident, $type: ty, $value: expr) => {
        fn $name() -> $type {
            $value
        }
    };
}

// One month of 730 hours is the default evaluation period
define_param_default!(default_period_hours, f64, 730.0);

/// Financial settings shared by every LCOE evaluation in a run.
#[derive(Debug, Deserialize, PartialEq)]
pub struct EvaluationParameters {
    /// Yearly discount rate, as a fraction
    #[serde(deserialize_with = "deserialise_proportion")]
    pub discount_rate: Dimensionless,
    /// Project length in years
    pub project_life: u32,
    /// Length of one capacity-factor evaluation period in hours
    #[serde(default = "default_period_hours")]
    pub period_hours: f64,
}

impl EvaluationParameters {
    /// Read the evaluation parameters file from the specified model directory.
    pub fn from_path(model_dir: &Path) -> Result<Self> {
        let file_path = model_dir.join(EVALUATION_PARAMETERS_FILE_NAME);
        let params: Self = read_toml(&file_path)?;
        params
            .validate()
            .with_context(|| input_err_msg(&file_path))?;

        Ok(params)
    }

    fn validate(&self) -> Result<()> {
        ensure!(
            self.project_life >= 1,
            "Project life must be at least one year"
        );
        ensure!(self.period_hours > 0.0, "Period length must be positive");
        if self.discount_rate.value() > SUSPICIOUS_DISCOUNT_RATE {
            warn!(
                "Discount rate of {} is suspiciously high; did you mean {}?",
                self.discount_rate.value(),
                self.discount_rate.value() / 100.0
            );
        }

        Ok(())
    }

    /// The project horizon these parameters describe.
    pub fn horizon(&self) -> ProjectHorizon {
        ProjectHorizon {
            discount_rate: self.discount_rate,
            project_life: self.project_life,
        }
    }
}
