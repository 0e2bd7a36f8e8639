use std::io::Read;
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use super::domain::{EligibilityReport, MonthlyIncomeRecord, RequirementChecklist};
use super::evaluation::EligibilityEvaluator;
use super::repository::{ProfileRepository, ProfileSnapshot, RepositoryError, UserId};
use super::transfer::{import_history_csv, validate_history, ExportError, HistoryError, ImportError};
use crate::config::RulesConfig;
use crate::workflows::benefit::{BenefitCalculator, BenefitError, BenefitReport};

/// Service composing the profile repository with both calculators.
pub struct ProfileService<R> {
    repository: Arc<R>,
    evaluator: Arc<EligibilityEvaluator>,
    calculator: Arc<BenefitCalculator>,
}

impl<R> ProfileService<R>
where
    R: ProfileRepository + 'static,
{
    pub fn new(repository: Arc<R>, rules: &RulesConfig) -> Self {
        Self {
            repository,
            evaluator: Arc::new(EligibilityEvaluator::new(rules.eligibility.clone())),
            calculator: Arc::new(BenefitCalculator::new(rules.benefit.clone())),
        }
    }

    pub fn evaluator(&self) -> &EligibilityEvaluator {
        &self.evaluator
    }

    pub fn calculator(&self) -> &BenefitCalculator {
        &self.calculator
    }

    /// Stores the snapshot, stamping the save time.
    pub fn save(
        &self,
        user: &UserId,
        mut snapshot: ProfileSnapshot,
    ) -> Result<ProfileSnapshot, ProfileServiceError> {
        validate_history(&snapshot.history)?;
        snapshot.saved_at = Some(Utc::now());
        self.repository.save(user, snapshot.clone())?;
        info!(%user, months = snapshot.history.len(), "profile saved");
        Ok(snapshot)
    }

    pub fn load(&self, user: &UserId) -> Result<ProfileSnapshot, ProfileServiceError> {
        self.repository
            .load(user)?
            .ok_or_else(|| ProfileServiceError::NotFound(user.clone()))
    }

    pub fn clear(&self, user: &UserId) -> Result<(), ProfileServiceError> {
        self.repository.clear(user)?;
        info!(%user, "profile cleared");
        Ok(())
    }

    pub fn export_json(&self, user: &UserId) -> Result<Vec<u8>, ProfileServiceError> {
        Ok(self.load(user)?.export_json()?)
    }

    pub fn export_history_csv(&self, user: &UserId) -> Result<Vec<u8>, ProfileServiceError> {
        Ok(self.load(user)?.export_history_csv()?)
    }

    /// Replaces the stored income history with the CSV contents, creating the
    /// profile when none exists.
    pub fn import_history_csv<T: Read>(
        &self,
        user: &UserId,
        reader: T,
    ) -> Result<ProfileSnapshot, ProfileServiceError> {
        let history = import_history_csv(reader)?;
        let mut snapshot = self.repository.load(user)?.unwrap_or_default();
        snapshot.history = history;
        self.save(user, snapshot)
    }

    /// Evaluates an unsaved history and checklist.
    pub fn evaluate(
        &self,
        history: &[MonthlyIncomeRecord],
        checklist: &RequirementChecklist,
    ) -> Result<EligibilityReport, ProfileServiceError> {
        validate_history(history)?;
        let report = self.evaluator.evaluate(history, checklist);
        debug!(
            status = ?report.decision.status,
            met = report.decision.met_requirements,
            total = report.decision.total_requirements,
            qualifying_months = report.summary.qualifying_months,
            "eligibility evaluated"
        );
        Ok(report)
    }

    pub fn evaluate_saved(&self, user: &UserId) -> Result<EligibilityReport, ProfileServiceError> {
        let snapshot = self.load(user)?;
        self.evaluate(&snapshot.history, &snapshot.checklist)
    }

    /// Runs the benefit calculator over the saved form.
    pub fn calculate_saved(&self, user: &UserId) -> Result<BenefitReport, ProfileServiceError> {
        let snapshot = self.load(user)?;
        let form = snapshot
            .benefit_form
            .ok_or_else(|| ProfileServiceError::MissingBenefitForm(user.clone()))?;
        let input = form.to_input().map_err(BenefitError::from)?;
        let result = self.calculator.compute(&input)?;
        Ok(BenefitReport::new(form.work_status, result))
    }
}

/// Error raised by the profile service.
#[derive(Debug, thiserror::Error)]
pub enum ProfileServiceError {
    #[error("no saved profile for user '{0}'")]
    NotFound(UserId),
    #[error("saved profile for user '{0}' has no benefit form")]
    MissingBenefitForm(UserId),
    #[error(transparent)]
    History(#[from] HistoryError),
    #[error(transparent)]
    Benefit(#[from] BenefitError),
    #[error(transparent)]
    Import(#[from] ImportError),
    #[error(transparent)]
    Export(#[from] ExportError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
