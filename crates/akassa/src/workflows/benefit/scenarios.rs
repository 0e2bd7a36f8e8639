use serde::{Deserialize, Serialize};

use super::calculator::BenefitCalculator;
use super::domain::{BenefitError, BenefitInput, BenefitResult};

/// A what-if preset: concurrent income and absence applied over a base input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub label: String,
    pub current_monthly_income: f64,
    pub unavailable_days: u32,
}

impl Scenario {
    pub fn new(
        label: impl Into<String>,
        current_monthly_income: f64,
        unavailable_days: u32,
    ) -> Self {
        Self {
            label: label.into(),
            current_monthly_income,
            unavailable_days,
        }
    }

    /// Presets offered next to the calculator form.
    pub fn presets() -> Vec<Scenario> {
        vec![
            Scenario::new("Fully unemployed", 0.0, 0),
            Scenario::new("Part-time, 10 000 kr", 10_000.0, 0),
            Scenario::new("Part-time, 20 000 kr", 20_000.0, 0),
            Scenario::new("Unavailable one week", 0.0, 5),
            Scenario::new("Earning above the ceiling", 34_000.0, 0),
        ]
    }

    pub fn apply(&self, base: &BenefitInput) -> BenefitInput {
        BenefitInput {
            current_monthly_income: self.current_monthly_income,
            unavailable_days: self.unavailable_days,
            ..base.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioOutcome {
    pub label: String,
    pub input: BenefitInput,
    pub result: BenefitResult,
}

impl BenefitCalculator {
    /// Evaluates each scenario against the same prior income and rate.
    pub fn compare_scenarios(
        &self,
        base: &BenefitInput,
        scenarios: &[Scenario],
    ) -> Result<Vec<ScenarioOutcome>, BenefitError> {
        scenarios
            .iter()
            .map(|scenario| {
                let input = scenario.apply(base);
                let result = self.compute(&input)?;
                Ok(ScenarioOutcome {
                    label: scenario.label.clone(),
                    input,
                    result,
                })
            })
            .collect()
    }
}
