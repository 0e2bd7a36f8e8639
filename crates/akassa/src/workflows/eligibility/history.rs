use std::collections::BTreeMap;

use super::domain::{
    EligibilityRules, IncomeSummary, MonthlyIncomeRecord, Requirement, RequirementChecklist,
    YearMonth, HISTORY_WINDOW_MONTHS,
};

pub(crate) fn count_qualifying(
    history: &[MonthlyIncomeRecord],
    rules: &EligibilityRules,
) -> usize {
    history
        .iter()
        .filter(|record| record.income >= rules.min_qualifying_income)
        .count()
}

pub(crate) fn summarize_history(
    history: &[MonthlyIncomeRecord],
    rules: &EligibilityRules,
) -> IncomeSummary {
    let total_income: f64 = history.iter().map(|record| record.income).sum();
    let average_income = if history.is_empty() {
        0.0
    } else {
        total_income / history.len() as f64
    };

    IncomeSummary {
        qualifying_months: count_qualifying(history, rules),
        months_recorded: history.len(),
        total_income,
        average_income,
    }
}

pub(crate) fn auto_requirements(
    history: &[MonthlyIncomeRecord],
    rules: &EligibilityRules,
) -> RequirementChecklist {
    let income_months = count_qualifying(history, rules) >= rules.required_qualifying_months;
    let work_history = history.iter().any(|record| record.income > 0.0);

    RequirementChecklist::new()
        .with(Requirement::IncomeMonths, income_months)
        .with(Requirement::WorkHistory, work_history)
}

/// Empty records for the 24 months ending at `end`, oldest first.
pub fn rolling_window(end: YearMonth) -> Vec<MonthlyIncomeRecord> {
    let mut months = Vec::with_capacity(HISTORY_WINDOW_MONTHS);
    let mut cursor = end;
    for _ in 0..HISTORY_WINDOW_MONTHS {
        months.push(MonthlyIncomeRecord::new(cursor, 0.0));
        cursor = cursor.previous();
    }
    months.reverse();
    months
}

/// Places existing records into the window ending at `end`. Months outside the
/// window are dropped; gaps are filled with empty records.
pub fn fit_to_window(
    history: &[MonthlyIncomeRecord],
    end: YearMonth,
) -> Vec<MonthlyIncomeRecord> {
    let by_month: BTreeMap<YearMonth, &MonthlyIncomeRecord> = history
        .iter()
        .map(|record| (record.month, record))
        .collect();

    rolling_window(end)
        .into_iter()
        .map(|empty| {
            by_month
                .get(&empty.month)
                .map(|record| (*record).clone())
                .unwrap_or(empty)
        })
        .collect()
}
