pub mod benefit;
pub mod eligibility;
