//! Benefit and eligibility calculation engine for unemployment insurance claims.
//!
//! The engine lives under [`workflows`]: [`workflows::benefit`] turns a single
//! period's inputs into a benefit breakdown and [`workflows::eligibility`] folds a
//! 24-month income history and an attested checklist into a tiered decision.
//! Both are pure; persistence and rendering are supplied by callers.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
