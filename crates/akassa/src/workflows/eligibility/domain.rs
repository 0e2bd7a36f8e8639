use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::duration::DurationTier;

/// Monthly income that counts a month toward eligibility, in SEK.
pub const MIN_QUALIFYING_INCOME: f64 = 11_000.0;

/// Qualifying months needed for the income condition.
pub const REQUIRED_QUALIFYING_MONTHS: usize = 4;

/// Length of the rolling income window.
pub const HISTORY_WINDOW_MONTHS: usize = 24;

/// Rule constants applied by the eligibility evaluator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityRules {
    pub min_qualifying_income: f64,
    pub required_qualifying_months: usize,
}

impl Default for EligibilityRules {
    fn default() -> Self {
        Self {
            min_qualifying_income: MIN_QUALIFYING_INCOME,
            required_qualifying_months: REQUIRED_QUALIFYING_MONTHS,
        }
    }
}

/// Calendar month identifier, rendered as `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn previous(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{0}' is not a YYYY-MM month")]
pub struct InvalidMonth(pub String);

impl FromStr for YearMonth {
    type Err = InvalidMonth;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidMonth(raw.to_string());
        let (year, month) = raw.trim().split_once('-').ok_or_else(invalid)?;
        let year = year.parse::<i32>().map_err(|_| invalid())?;
        let month = month.parse::<u32>().map_err(|_| invalid())?;
        YearMonth::new(year, month).ok_or_else(invalid)
    }
}

impl TryFrom<String> for YearMonth {
    type Error = InvalidMonth;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<YearMonth> for String {
    fn from(value: YearMonth) -> Self {
        value.to_string()
    }
}

/// One month of the income history as entered by the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyIncomeRecord {
    pub month: YearMonth,
    #[serde(default)]
    pub income: f64,
    #[serde(default)]
    pub notes: String,
}

impl MonthlyIncomeRecord {
    pub fn new(month: YearMonth, income: f64) -> Self {
        Self {
            month,
            income,
            notes: String::new(),
        }
    }
}

/// Named eligibility requirements shown on the checklist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Requirement {
    IncomeMonths,
    WorkHistory,
    FundMember,
    MembershipTwelveMonths,
    RegisteredWithEmploymentService,
    ResidentInSweden,
    AvailableForWork,
    ThreeHoursDaily,
    ActivelySeekingWork,
    AcceptsSuitableWork,
    ActionPlanAgreed,
    ClaimFiledOnTime,
}

impl Requirement {
    pub const ALL: [Requirement; 12] = [
        Requirement::IncomeMonths,
        Requirement::WorkHistory,
        Requirement::FundMember,
        Requirement::MembershipTwelveMonths,
        Requirement::RegisteredWithEmploymentService,
        Requirement::ResidentInSweden,
        Requirement::AvailableForWork,
        Requirement::ThreeHoursDaily,
        Requirement::ActivelySeekingWork,
        Requirement::AcceptsSuitableWork,
        Requirement::ActionPlanAgreed,
        Requirement::ClaimFiledOnTime,
    ];

    /// Requirements computed from the income history rather than attested.
    pub const AUTO_DERIVED: [Requirement; 2] =
        [Requirement::IncomeMonths, Requirement::WorkHistory];

    pub fn is_auto_derived(&self) -> bool {
        Self::AUTO_DERIVED.contains(self)
    }

    pub fn key(&self) -> &'static str {
        match self {
            Requirement::IncomeMonths => "income-months",
            Requirement::WorkHistory => "work-history",
            Requirement::FundMember => "fund-member",
            Requirement::MembershipTwelveMonths => "membership-twelve-months",
            Requirement::RegisteredWithEmploymentService => "registered-with-employment-service",
            Requirement::ResidentInSweden => "resident-in-sweden",
            Requirement::AvailableForWork => "available-for-work",
            Requirement::ThreeHoursDaily => "three-hours-daily",
            Requirement::ActivelySeekingWork => "actively-seeking-work",
            Requirement::AcceptsSuitableWork => "accepts-suitable-work",
            Requirement::ActionPlanAgreed => "action-plan-agreed",
            Requirement::ClaimFiledOnTime => "claim-filed-on-time",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Requirement::IncomeMonths => "At least four months with qualifying income",
            Requirement::WorkHistory => "Income recorded in the last 24 months",
            Requirement::FundMember => "Member of an unemployment insurance fund",
            Requirement::MembershipTwelveMonths => "Fund membership for twelve months",
            Requirement::RegisteredWithEmploymentService => {
                "Registered with the Public Employment Service"
            }
            Requirement::ResidentInSweden => "Resident in Sweden",
            Requirement::AvailableForWork => "Available to take a job",
            Requirement::ThreeHoursDaily => "Able to work at least three hours a day",
            Requirement::ActivelySeekingWork => "Actively seeking work",
            Requirement::AcceptsSuitableWork => "Willing to accept suitable work",
            Requirement::ActionPlanAgreed => "Action plan agreed with the employment service",
            Requirement::ClaimFiledOnTime => "Benefit claim filed on time",
        }
    }
}

impl FromStr for Requirement {
    type Err = UnknownRequirement;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let key = raw.trim();
        Requirement::ALL
            .into_iter()
            .find(|requirement| requirement.key().eq_ignore_ascii_case(key))
            .ok_or_else(|| UnknownRequirement(raw.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown requirement '{0}'")]
pub struct UnknownRequirement(pub String);

/// Checked state of each requirement on the checklist.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequirementChecklist(BTreeMap<Requirement, bool>);

impl RequirementChecklist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every known requirement, all unchecked.
    pub fn standard() -> Self {
        Self(
            Requirement::ALL
                .into_iter()
                .map(|requirement| (requirement, false))
                .collect(),
        )
    }

    pub fn with(mut self, requirement: Requirement, checked: bool) -> Self {
        self.set(requirement, checked);
        self
    }

    pub fn set(&mut self, requirement: Requirement, checked: bool) {
        self.0.insert(requirement, checked);
    }

    pub fn is_checked(&self, requirement: Requirement) -> bool {
        self.0.get(&requirement).copied().unwrap_or(false)
    }

    pub fn met(&self) -> usize {
        self.0.values().filter(|checked| **checked).count()
    }

    pub fn total(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Requirement, bool)> + '_ {
        self.0.iter().map(|(requirement, checked)| (*requirement, *checked))
    }

    /// Overwrites entries from `other`, leaving the rest untouched.
    pub fn merge(&mut self, other: &RequirementChecklist) {
        for (requirement, checked) in other.iter() {
            self.set(requirement, checked);
        }
    }
}

impl FromIterator<(Requirement, bool)> for RequirementChecklist {
    fn from_iter<I: IntoIterator<Item = (Requirement, bool)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Aggregate view of the income history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeSummary {
    pub qualifying_months: usize,
    pub months_recorded: usize,
    pub total_income: f64,
    pub average_income: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DecisionStatus {
    Incomplete,
    Eligible,
    Partial,
    NotEligible,
}

impl DecisionStatus {
    pub fn label(&self) -> &'static str {
        match self {
            DecisionStatus::Incomplete => "Incomplete",
            DecisionStatus::Eligible => "Eligible",
            DecisionStatus::Partial => "Partially eligible",
            DecisionStatus::NotEligible => "Not eligible",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendedAction {
    Apply,
    Prepare,
}

/// Tiered outcome of the requirement checklist and income condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityDecision {
    pub status: DecisionStatus,
    pub met_requirements: usize,
    pub total_requirements: usize,
    pub qualifying_months: usize,
    pub rationale: String,
    pub recommended_actions: BTreeSet<RecommendedAction>,
}

/// Everything a caller renders after an evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityReport {
    pub summary: IncomeSummary,
    pub decision: EligibilityDecision,
    pub duration_tier: DurationTier,
    pub checklist: RequirementChecklist,
}
