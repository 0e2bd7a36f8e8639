use std::collections::BTreeSet;

use super::super::domain::{
    DecisionStatus, EligibilityDecision, EligibilityRules, RecommendedAction,
    RequirementChecklist,
};

/// Named rung of the decision cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DecisionTier {
    Eligible,
    ReadyToPrepare,
    Partial,
    NotEligible,
}

/// One `(predicate, outcome)` pair of the cascade.
#[derive(Debug, Clone, Copy)]
pub(crate) struct TierRule {
    pub min_met: usize,
    pub requires_income_condition: bool,
    pub tier: DecisionTier,
}

impl TierRule {
    fn matches(&self, met: usize, income_condition: bool) -> bool {
        met >= self.min_met && (!self.requires_income_condition || income_condition)
    }
}

/// Evaluated top-down; the first matching rule decides. A checklist with
/// nothing met falls through to `Incomplete`.
pub(crate) const DECISION_CASCADE: [TierRule; 4] = [
    TierRule {
        min_met: 10,
        requires_income_condition: true,
        tier: DecisionTier::Eligible,
    },
    TierRule {
        min_met: 8,
        requires_income_condition: true,
        tier: DecisionTier::ReadyToPrepare,
    },
    TierRule {
        min_met: 6,
        requires_income_condition: false,
        tier: DecisionTier::Partial,
    },
    TierRule {
        min_met: 1,
        requires_income_condition: false,
        tier: DecisionTier::NotEligible,
    },
];

pub(crate) fn matching_tier(
    met: usize,
    qualifying_months: usize,
    rules: &EligibilityRules,
) -> Option<DecisionTier> {
    let income_condition = qualifying_months >= rules.required_qualifying_months;
    DECISION_CASCADE
        .iter()
        .find(|rule| rule.matches(met, income_condition))
        .map(|rule| rule.tier)
}

pub(crate) fn decide_outcome(
    checklist: &RequirementChecklist,
    qualifying_months: usize,
    rules: &EligibilityRules,
) -> EligibilityDecision {
    let met = checklist.met();
    let total = checklist.total();
    let counts = format!("{met}/{total} requirements");

    let (status, rationale, actions) = match matching_tier(met, qualifying_months, rules) {
        Some(DecisionTier::Eligible) => (
            DecisionStatus::Eligible,
            format!(
                "You meet {counts} and have {qualifying_months} qualifying months. \
                 You appear to qualify for income-related benefit and can apply."
            ),
            vec![RecommendedAction::Apply],
        ),
        Some(DecisionTier::ReadyToPrepare) => (
            DecisionStatus::Partial,
            format!(
                "You meet {counts} and have {qualifying_months} qualifying months. \
                 Complete the remaining requirements before applying."
            ),
            vec![RecommendedAction::Prepare],
        ),
        Some(DecisionTier::Partial) => (
            DecisionStatus::Partial,
            format!(
                "You meet {counts} with {qualifying_months} qualifying months. \
                 At least {} months with qualifying income are needed.",
                rules.required_qualifying_months
            ),
            vec![RecommendedAction::Prepare],
        ),
        Some(DecisionTier::NotEligible) => (
            DecisionStatus::NotEligible,
            format!(
                "You meet {counts} with {qualifying_months} qualifying months. \
                 You do not currently meet the conditions for benefit."
            ),
            Vec::new(),
        ),
        None => (
            DecisionStatus::Incomplete,
            format!(
                "No requirements checked yet ({counts}, {qualifying_months} qualifying months). \
                 Complete the checklist to see your eligibility."
            ),
            Vec::new(),
        ),
    };

    EligibilityDecision {
        status,
        met_requirements: met,
        total_requirements: total,
        qualifying_months,
        rationale,
        recommended_actions: actions.into_iter().collect::<BTreeSet<_>>(),
    }
}
