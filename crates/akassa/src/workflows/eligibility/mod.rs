//! Qualifying-month counting and tiered eligibility decisions over a rolling
//! 24-month income history and a requirement checklist.
//!
//! Auto-derived requirements (`income-months`, `work-history`) are always
//! recomputed from the history before a decision, so stored or attested values
//! for those entries never reach the decision cascade.

pub mod domain;
mod duration;
mod evaluation;
mod history;
pub mod repository;
pub mod router;
pub mod service;
mod transfer;

#[cfg(test)]
mod tests;

pub use domain::{
    DecisionStatus, EligibilityDecision, EligibilityReport, EligibilityRules, IncomeSummary,
    InvalidMonth, MonthlyIncomeRecord, RecommendedAction, Requirement, RequirementChecklist,
    UnknownRequirement, YearMonth, HISTORY_WINDOW_MONTHS, MIN_QUALIFYING_INCOME,
    REQUIRED_QUALIFYING_MONTHS,
};
pub use duration::{overall_duration_tier, DurationPolicy, DurationTier};
pub use evaluation::{
    decide, derive_auto_requirements, evaluate_eligibility, qualifying_months, summarize,
    EligibilityEvaluator,
};
pub use history::{fit_to_window, rolling_window};
pub use repository::{InvalidUserId, ProfileRepository, ProfileSnapshot, RepositoryError, UserId};
pub use router::eligibility_router;
pub use service::{ProfileService, ProfileServiceError};
pub use transfer::{
    export_history_csv, import_history_csv, validate_history, ExportError, HistoryError,
    ImportError,
};
