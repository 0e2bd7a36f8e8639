use super::domain::{
    BenefitError, BenefitInput, BenefitResult, BenefitRules, ReplacementRate, ValidationError,
};

/// How concurrent income offsets the base amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum IncomeOffset {
    /// Earnings at or above the ceiling remove the benefit entirely.
    AboveCeiling,
    Proportional,
    NoIncome,
}

impl IncomeOffset {
    fn classify(current_monthly_income: f64, rules: &BenefitRules) -> Self {
        if current_monthly_income >= rules.max_monthly_amount {
            IncomeOffset::AboveCeiling
        } else if current_monthly_income > 0.0 {
            IncomeOffset::Proportional
        } else {
            IncomeOffset::NoIncome
        }
    }
}

/// Stateless calculator applying [`BenefitRules`] to one benefit period.
#[derive(Debug, Clone, Default)]
pub struct BenefitCalculator {
    rules: BenefitRules,
}

impl BenefitCalculator {
    pub fn new(rules: BenefitRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &BenefitRules {
        &self.rules
    }

    pub fn compute(&self, input: &BenefitInput) -> Result<BenefitResult, BenefitError> {
        let rate = validate(input)?;
        if input.previous_monthly_income <= 0.0 {
            return Err(BenefitError::IncompleteRequest);
        }

        let base_amount = self.base_amount(input.previous_monthly_income, rate);

        let (income_reduction, amount) =
            match IncomeOffset::classify(input.current_monthly_income, &self.rules) {
                IncomeOffset::AboveCeiling => (base_amount, 0.0),
                IncomeOffset::Proportional => {
                    let reduction = input.current_monthly_income.min(base_amount);
                    (reduction, (base_amount - reduction).max(0.0))
                }
                IncomeOffset::NoIncome => (0.0, base_amount),
            };

        // Applied to the post-income amount, not the base.
        let availability_reduction =
            amount * f64::from(input.unavailable_days) * self.rules.daily_reduction_factor();
        let final_amount = (amount - availability_reduction).max(0.0);

        Ok(BenefitResult {
            base_amount,
            income_reduction,
            availability_reduction,
            final_amount,
            replacement_rate_percent: rate.percent(),
        })
    }

    /// Current income at which the income reduction absorbs the whole benefit.
    pub fn break_even_income(
        &self,
        previous_monthly_income: f64,
        replacement_rate_percent: u32,
    ) -> Result<f64, ValidationError> {
        let rate = ReplacementRate::new(replacement_rate_percent)?;
        let previous_monthly_income = amount("previous_monthly_income", previous_monthly_income)?;
        Ok(self.base_amount(previous_monthly_income, rate))
    }

    /// Sum of the final amounts across consecutive benefit periods.
    pub fn total_for_periods(&self, periods: &[BenefitInput]) -> Result<f64, BenefitError> {
        periods.iter().try_fold(0.0, |total, period| {
            self.compute(period).map(|result| total + result.final_amount)
        })
    }

    fn base_amount(&self, previous_monthly_income: f64, rate: ReplacementRate) -> f64 {
        let replaced = previous_monthly_income * f64::from(rate.percent()) / 100.0;
        replaced.min(self.rules.max_monthly_amount)
    }
}

/// Computes a benefit under the default rules.
pub fn compute_benefit(input: &BenefitInput) -> Result<BenefitResult, BenefitError> {
    BenefitCalculator::default().compute(input)
}

fn validate(input: &BenefitInput) -> Result<ReplacementRate, ValidationError> {
    amount("previous_monthly_income", input.previous_monthly_income)?;
    amount("current_monthly_income", input.current_monthly_income)?;
    ReplacementRate::new(input.replacement_rate_percent)
}

fn amount(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteAmount { field });
    }
    if value < 0.0 {
        return Err(ValidationError::NegativeAmount { field, value });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::benefit::domain::MAX_MONTHLY_AMOUNT;

    fn baseline() -> BenefitInput {
        BenefitInput::unemployed(30_000.0, 80)
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-6,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn fully_unemployed_receives_the_base_amount() {
        let result = compute_benefit(&baseline()).expect("valid input");

        assert_eq!(result.base_amount, 24_000.0);
        assert_eq!(result.income_reduction, 0.0);
        assert_eq!(result.availability_reduction, 0.0);
        assert_eq!(result.final_amount, 24_000.0);
        assert_eq!(result.replacement_rate_percent, 80);
    }

    #[test]
    fn income_at_the_ceiling_collapses_the_benefit() {
        let input = baseline().with_current_income(MAX_MONTHLY_AMOUNT);
        let result = compute_benefit(&input).expect("valid input");

        assert_eq!(result.income_reduction, 24_000.0);
        assert_eq!(result.final_amount, 0.0);
    }

    #[test]
    fn ceiling_binds_only_above_it() {
        let below = compute_benefit(&BenefitInput::unemployed(40_000.0, 80)).expect("valid");
        assert_eq!(below.base_amount, 32_000.0);

        let above = compute_benefit(&BenefitInput::unemployed(50_000.0, 80)).expect("valid");
        assert_eq!(above.base_amount, 34_000.0);
    }

    #[test]
    fn part_time_income_offsets_krona_for_krona() {
        let input = baseline().with_current_income(9_000.0);
        let result = compute_benefit(&input).expect("valid input");

        assert_eq!(result.income_reduction, 9_000.0);
        assert_eq!(result.final_amount, 15_000.0);
    }

    #[test]
    fn income_above_base_but_below_ceiling_is_capped_at_base() {
        let input = baseline().with_current_income(30_000.0);
        let result = compute_benefit(&input).expect("valid input");

        assert_eq!(result.income_reduction, 24_000.0);
        assert_eq!(result.final_amount, 0.0);
    }

    #[test]
    fn unavailable_days_reduce_the_post_income_amount() {
        let result = compute_benefit(&baseline().with_unavailable_days(11)).expect("valid");
        assert_close(result.availability_reduction, 12_000.0);
        assert_close(result.final_amount, 12_000.0);

        let input = baseline()
            .with_current_income(2_000.0)
            .with_unavailable_days(11);
        let result = compute_benefit(&input).expect("valid");
        assert_close(result.availability_reduction, 11_000.0);
        assert_close(result.final_amount, 11_000.0);
    }

    #[test]
    fn a_full_month_unavailable_drives_the_benefit_to_zero() {
        let result = compute_benefit(&baseline().with_unavailable_days(22)).expect("valid");
        assert!(result.final_amount.abs() < 1e-6);

        let result = compute_benefit(&baseline().with_unavailable_days(30)).expect("valid");
        assert_eq!(result.final_amount, 0.0);
    }

    #[test]
    fn zero_previous_income_is_an_incomplete_request() {
        let err = compute_benefit(&BenefitInput::unemployed(0.0, 80)).expect_err("incomplete");
        assert_eq!(err, BenefitError::IncompleteRequest);
    }

    #[test]
    fn rejects_rates_outside_percent_range() {
        for rate in [0, 101] {
            let err = compute_benefit(&BenefitInput::unemployed(30_000.0, rate))
                .expect_err("rate rejected");
            assert_eq!(
                err,
                BenefitError::Validation(ValidationError::ReplacementRateOutOfRange(rate))
            );
        }
    }

    #[test]
    fn rejects_negative_and_non_finite_amounts() {
        let err = compute_benefit(&BenefitInput::unemployed(-1.0, 80)).expect_err("negative");
        assert!(matches!(
            err,
            BenefitError::Validation(ValidationError::NegativeAmount {
                field: "previous_monthly_income",
                ..
            })
        ));

        let err = compute_benefit(&baseline().with_current_income(f64::NAN)).expect_err("nan");
        assert_eq!(
            err,
            BenefitError::Validation(ValidationError::NonFiniteAmount {
                field: "current_monthly_income"
            })
        );
    }

    #[test]
    fn custom_rules_change_the_ceiling_and_day_factor() {
        let calculator = BenefitCalculator::new(BenefitRules {
            max_monthly_amount: 20_000.0,
            working_days_per_month: 20,
        });
        let result = calculator
            .compute(&baseline().with_unavailable_days(5))
            .expect("valid");

        assert_eq!(result.base_amount, 20_000.0);
        assert_close(result.availability_reduction, 5_000.0);
    }

    #[test]
    fn break_even_matches_the_base_amount() {
        let calculator = BenefitCalculator::default();
        assert_eq!(calculator.break_even_income(30_000.0, 80), Ok(24_000.0));
        assert_eq!(calculator.break_even_income(60_000.0, 65), Ok(34_000.0));
        assert!(calculator.break_even_income(30_000.0, 0).is_err());
    }

    #[test]
    fn totals_accumulate_across_periods() {
        let calculator = BenefitCalculator::default();
        let periods = vec![
            baseline(),
            baseline().with_current_income(4_000.0),
            baseline().with_unavailable_days(11),
        ];

        let total = calculator.total_for_periods(&periods).expect("valid");
        assert_close(total, 24_000.0 + 20_000.0 + 12_000.0);

        let mut broken = periods;
        broken.push(BenefitInput::unemployed(0.0, 80));
        assert_eq!(
            calculator.total_for_periods(&broken),
            Err(BenefitError::IncompleteRequest)
        );
    }
}
