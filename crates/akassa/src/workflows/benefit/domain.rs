use serde::{Deserialize, Serialize};

/// Ceiling on the monthly benefit, in SEK.
pub const MAX_MONTHLY_AMOUNT: f64 = 34_000.0;

/// Working days in a benefit period; each unavailable day removes one share.
pub const WORKING_DAYS_PER_MONTH: u32 = 22;

/// Share of the monthly amount withdrawn per unavailable day.
pub const DAILY_REDUCTION_FACTOR: f64 = 1.0 / WORKING_DAYS_PER_MONTH as f64;

/// Rule constants applied by the benefit calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenefitRules {
    pub max_monthly_amount: f64,
    pub working_days_per_month: u32,
}

impl BenefitRules {
    pub fn daily_reduction_factor(&self) -> f64 {
        1.0 / self.working_days_per_month.max(1) as f64
    }
}

impl Default for BenefitRules {
    fn default() -> Self {
        Self {
            max_monthly_amount: MAX_MONTHLY_AMOUNT,
            working_days_per_month: WORKING_DAYS_PER_MONTH,
        }
    }
}

/// Percentage of prior income used as the benefit basis, set by membership tenure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct ReplacementRate(u32);

impl ReplacementRate {
    /// Rates offered for the membership tenure brackets, longest tenure first.
    pub const STANDARD: [u32; 3] = [80, 70, 65];

    pub fn new(percent: u32) -> Result<Self, ValidationError> {
        if percent == 0 || percent > 100 {
            return Err(ValidationError::ReplacementRateOutOfRange(percent));
        }
        Ok(Self(percent))
    }

    pub fn percent(self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for ReplacementRate {
    type Error = ValidationError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ReplacementRate> for u32 {
    fn from(value: ReplacementRate) -> Self {
        value.0
    }
}

/// Claimant's current employment situation, shown alongside results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WorkStatus {
    #[default]
    Unemployed,
    PartTime,
}

impl WorkStatus {
    pub fn label(&self) -> &'static str {
        match self {
            WorkStatus::Unemployed => "Unemployed",
            WorkStatus::PartTime => "Working part-time",
        }
    }
}

/// Typed inputs for a single benefit period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenefitInput {
    pub previous_monthly_income: f64,
    pub replacement_rate_percent: u32,
    #[serde(default)]
    pub current_monthly_income: f64,
    #[serde(default)]
    pub unavailable_days: u32,
}

impl BenefitInput {
    pub fn unemployed(previous_monthly_income: f64, replacement_rate_percent: u32) -> Self {
        Self {
            previous_monthly_income,
            replacement_rate_percent,
            current_monthly_income: 0.0,
            unavailable_days: 0,
        }
    }

    pub fn with_current_income(mut self, current_monthly_income: f64) -> Self {
        self.current_monthly_income = current_monthly_income;
        self
    }

    pub fn with_unavailable_days(mut self, unavailable_days: u32) -> Self {
        self.unavailable_days = unavailable_days;
        self
    }
}

/// Breakdown of the benefit for one period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenefitResult {
    pub base_amount: f64,
    pub income_reduction: f64,
    pub availability_reduction: f64,
    pub final_amount: f64,
    pub replacement_rate_percent: u32,
}

/// Result paired with the display context the form collected.
#[derive(Debug, Clone, Serialize)]
pub struct BenefitReport {
    pub work_status: WorkStatus,
    pub status_label: &'static str,
    #[serde(flatten)]
    pub result: BenefitResult,
}

impl BenefitReport {
    pub fn new(work_status: WorkStatus, result: BenefitResult) -> Self {
        Self {
            work_status,
            status_label: work_status.label(),
            result,
        }
    }
}

/// Rejected benefit input.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} must not be negative (found {value})")]
    NegativeAmount { field: &'static str, value: f64 },
    #[error("{field} must be a finite number")]
    NonFiniteAmount { field: &'static str },
    #[error("replacement rate must be within 1..=100 percent (found {0})")]
    ReplacementRateOutOfRange(u32),
    #[error("unavailable days must not be negative (found {0})")]
    NegativeDays(i64),
}

/// Failure modes of a benefit calculation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BenefitError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("previous monthly income must be greater than zero to calculate a benefit")]
    IncompleteRequest,
}
