use akassa::workflows::benefit::{
    compute_benefit, BenefitInput, ReplacementRate, MAX_MONTHLY_AMOUNT,
};
use akassa::workflows::eligibility::{
    qualifying_months, rolling_window, summarize, MonthlyIncomeRecord, YearMonth,
};
use proptest::prelude::*;

fn rate() -> impl Strategy<Value = u32> {
    prop::sample::select(ReplacementRate::STANDARD.to_vec())
}

fn history(incomes: &[f64]) -> Vec<MonthlyIncomeRecord> {
    let end = YearMonth::new(2025, 9).expect("valid month");
    rolling_window(end)
        .into_iter()
        .zip(incomes)
        .map(|(record, income)| MonthlyIncomeRecord::new(record.month, *income))
        .collect()
}

proptest! {
    #[test]
    fn final_amount_stays_within_base_and_cap(
        previous in 1.0f64..200_000.0,
        percent in rate(),
        current in 0.0f64..60_000.0,
        days in 0u32..40,
    ) {
        let input = BenefitInput::unemployed(previous, percent)
            .with_current_income(current)
            .with_unavailable_days(days);
        let result = compute_benefit(&input).expect("valid input");

        prop_assert!(result.final_amount >= 0.0);
        prop_assert!(result.final_amount <= result.base_amount);
        prop_assert!(result.base_amount <= MAX_MONTHLY_AMOUNT);
        prop_assert!(result.income_reduction <= result.base_amount);
    }

    #[test]
    fn income_reduction_grows_with_income(
        previous in 1.0f64..100_000.0,
        percent in rate(),
        low in 0.0f64..50_000.0,
        extra in 0.0f64..50_000.0,
    ) {
        let base = BenefitInput::unemployed(previous, percent);
        let smaller = compute_benefit(&base.clone().with_current_income(low)).expect("valid");
        let larger = compute_benefit(&base.with_current_income(low + extra)).expect("valid");

        prop_assert!(smaller.income_reduction <= larger.income_reduction);
        prop_assert!(smaller.final_amount >= larger.final_amount);
    }

    #[test]
    fn more_unavailable_days_never_raise_the_benefit(
        previous in 1.0f64..100_000.0,
        percent in rate(),
        days in 0u32..30,
        extra in 0u32..10,
    ) {
        let base = BenefitInput::unemployed(previous, percent);
        let fewer = compute_benefit(&base.clone().with_unavailable_days(days)).expect("valid");
        let more = compute_benefit(&base.with_unavailable_days(days + extra)).expect("valid");

        prop_assert!(fewer.availability_reduction <= more.availability_reduction);
        prop_assert!(fewer.final_amount >= more.final_amount);
    }

    #[test]
    fn calculation_is_deterministic(
        previous in 1.0f64..100_000.0,
        percent in rate(),
        current in 0.0f64..40_000.0,
        days in 0u32..22,
    ) {
        let input = BenefitInput::unemployed(previous, percent)
            .with_current_income(current)
            .with_unavailable_days(days);

        prop_assert_eq!(compute_benefit(&input), compute_benefit(&input));
    }

    #[test]
    fn qualifying_count_ignores_order(
        incomes in prop::collection::vec(0.0f64..30_000.0, 0..=24),
        rotation in 0usize..24,
    ) {
        let ordered = history(&incomes);
        let mut shuffled = ordered.clone();
        shuffled.reverse();
        if !shuffled.is_empty() {
            let by = rotation % shuffled.len();
            shuffled.rotate_left(by);
        }

        prop_assert_eq!(qualifying_months(&ordered), qualifying_months(&shuffled));
        prop_assert!(qualifying_months(&ordered) <= ordered.len());
        prop_assert!(summarize(&ordered).average_income >= 0.0);
    }
}
