//! Monthly benefit calculation for a single benefit period.
//!
//! The base amount is the replacement rate applied to prior income, capped at the
//! monthly ceiling. Concurrent income is offset first; days unavailable for work
//! then remove a proportional share of what remains.

mod calculator;
pub mod domain;
pub mod form;
pub mod router;
mod scenarios;

pub use calculator::{compute_benefit, BenefitCalculator};
pub use domain::{
    BenefitError, BenefitInput, BenefitReport, BenefitResult, BenefitRules, ReplacementRate,
    ValidationError, WorkStatus, DAILY_REDUCTION_FACTOR, MAX_MONTHLY_AMOUNT,
    WORKING_DAYS_PER_MONTH,
};
pub use form::{BenefitForm, FormValue};
pub use router::benefit_router;
pub use scenarios::{Scenario, ScenarioOutcome};
