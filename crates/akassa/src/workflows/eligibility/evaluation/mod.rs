mod policy;

use super::domain::{
    EligibilityDecision, EligibilityReport, EligibilityRules, IncomeSummary, MonthlyIncomeRecord,
    RequirementChecklist,
};
use super::duration::{DurationPolicy, DurationTier};
use super::history::{auto_requirements, count_qualifying, summarize_history};
use policy::decide_outcome;

#[cfg(test)]
pub(crate) use policy::{matching_tier, DecisionTier, DECISION_CASCADE};

/// Stateless evaluator applying [`EligibilityRules`] to an income history and checklist.
#[derive(Debug, Clone, Default)]
pub struct EligibilityEvaluator {
    rules: EligibilityRules,
    durations: DurationPolicy,
}

impl EligibilityEvaluator {
    pub fn new(rules: EligibilityRules) -> Self {
        Self {
            rules,
            durations: DurationPolicy::standard(),
        }
    }

    pub fn with_duration_policy(mut self, durations: DurationPolicy) -> Self {
        self.durations = durations;
        self
    }

    pub fn rules(&self) -> &EligibilityRules {
        &self.rules
    }

    pub fn qualifying_months(&self, history: &[MonthlyIncomeRecord]) -> usize {
        count_qualifying(history, &self.rules)
    }

    pub fn summarize(&self, history: &[MonthlyIncomeRecord]) -> IncomeSummary {
        summarize_history(history, &self.rules)
    }

    /// Requirement flags derived from the history; these cannot be attested.
    pub fn derive_auto_requirements(
        &self,
        history: &[MonthlyIncomeRecord],
    ) -> RequirementChecklist {
        auto_requirements(history, &self.rules)
    }

    pub fn decide(
        &self,
        checklist: &RequirementChecklist,
        qualifying_months: usize,
    ) -> EligibilityDecision {
        decide_outcome(checklist, qualifying_months, &self.rules)
    }

    pub fn duration_tier(&self, qualifying_months: usize) -> DurationTier {
        self.durations.tier_for(qualifying_months)
    }

    /// Recomputes the auto-derived flags over `checklist`, then decides.
    /// Requirements missing from `checklist` count as unchecked.
    pub fn evaluate(
        &self,
        history: &[MonthlyIncomeRecord],
        checklist: &RequirementChecklist,
    ) -> EligibilityReport {
        let summary = self.summarize(history);

        let mut full = RequirementChecklist::standard();
        full.merge(checklist);
        full.merge(&self.derive_auto_requirements(history));
        let checklist = full;

        let decision = self.decide(&checklist, summary.qualifying_months);
        let duration_tier = self.duration_tier(summary.qualifying_months);

        EligibilityReport {
            summary,
            decision,
            duration_tier,
            checklist,
        }
    }
}

pub fn qualifying_months(history: &[MonthlyIncomeRecord]) -> usize {
    EligibilityEvaluator::default().qualifying_months(history)
}

pub fn summarize(history: &[MonthlyIncomeRecord]) -> IncomeSummary {
    EligibilityEvaluator::default().summarize(history)
}

pub fn derive_auto_requirements(history: &[MonthlyIncomeRecord]) -> RequirementChecklist {
    EligibilityEvaluator::default().derive_auto_requirements(history)
}

pub fn decide(checklist: &RequirementChecklist, qualifying_months: usize) -> EligibilityDecision {
    EligibilityEvaluator::default().decide(checklist, qualifying_months)
}

/// Runs the full evaluation under the default rules.
pub fn evaluate_eligibility(
    history: &[MonthlyIncomeRecord],
    checklist: &RequirementChecklist,
) -> EligibilityReport {
    EligibilityEvaluator::default().evaluate(history, checklist)
}
