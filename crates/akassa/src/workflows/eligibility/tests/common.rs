use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::config::RulesConfig;
use crate::workflows::benefit::{BenefitForm, WorkStatus};
use crate::workflows::eligibility::domain::{
    MonthlyIncomeRecord, Requirement, RequirementChecklist, YearMonth,
};
use crate::workflows::eligibility::history::rolling_window;
use crate::workflows::eligibility::repository::{
    ProfileRepository, ProfileSnapshot, RepositoryError, UserId,
};
use crate::workflows::eligibility::service::ProfileService;
use crate::workflows::eligibility::{eligibility_router, EligibilityEvaluator};

pub(super) fn month(year: i32, month: u32) -> YearMonth {
    YearMonth::new(year, month).expect("valid month")
}

pub(super) fn window_end() -> YearMonth {
    month(2025, 9)
}

/// 24-month window with `qualifying` months at 12 000 kr (most recent first)
/// and the rest at zero.
pub(super) fn history_with_qualifying(qualifying: usize) -> Vec<MonthlyIncomeRecord> {
    let mut history = rolling_window(window_end());
    for record in history.iter_mut().rev().take(qualifying) {
        record.income = 12_000.0;
    }
    history
}

/// The ten attested requirements, the first `checked` of them ticked.
pub(super) fn attested_checklist(checked: usize) -> RequirementChecklist {
    Requirement::ALL
        .into_iter()
        .filter(|requirement| !requirement.is_auto_derived())
        .enumerate()
        .map(|(index, requirement)| (requirement, index < checked))
        .collect()
}

/// The full standard checklist with exactly `met` entries ticked.
pub(super) fn checklist_meeting(met: usize) -> RequirementChecklist {
    Requirement::ALL
        .into_iter()
        .enumerate()
        .map(|(index, requirement)| (requirement, index < met))
        .collect()
}

pub(super) fn evaluator() -> EligibilityEvaluator {
    EligibilityEvaluator::default()
}

pub(super) fn user(raw: &str) -> UserId {
    UserId::parse(raw).expect("valid user id")
}

pub(super) fn saved_form() -> BenefitForm {
    BenefitForm {
        previous_income: Some("30000".into()),
        replacement_rate: Some(80.0.into()),
        current_income: Some("6000".into()),
        unavailable_days: Some("0".into()),
        work_status: WorkStatus::PartTime,
    }
}

pub(super) fn snapshot(qualifying: usize, attested: usize) -> ProfileSnapshot {
    ProfileSnapshot {
        history: history_with_qualifying(qualifying),
        checklist: attested_checklist(attested),
        benefit_form: Some(saved_form()),
        saved_at: None,
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    profiles: Arc<Mutex<HashMap<UserId, ProfileSnapshot>>>,
}

impl MemoryRepository {
    pub(super) fn stored(&self, user: &UserId) -> Option<ProfileSnapshot> {
        self.profiles
            .lock()
            .expect("repository mutex poisoned")
            .get(user)
            .cloned()
    }
}

impl ProfileRepository for MemoryRepository {
    fn save(&self, user: &UserId, snapshot: ProfileSnapshot) -> Result<(), RepositoryError> {
        let mut guard = self.profiles.lock().expect("repository mutex poisoned");
        guard.insert(user.clone(), snapshot);
        Ok(())
    }

    fn load(&self, user: &UserId) -> Result<Option<ProfileSnapshot>, RepositoryError> {
        let guard = self.profiles.lock().expect("repository mutex poisoned");
        Ok(guard.get(user).cloned())
    }

    fn clear(&self, user: &UserId) -> Result<(), RepositoryError> {
        let mut guard = self.profiles.lock().expect("repository mutex poisoned");
        guard.remove(user);
        Ok(())
    }
}

pub(super) struct UnavailableRepository;

impl ProfileRepository for UnavailableRepository {
    fn save(&self, _user: &UserId, _snapshot: ProfileSnapshot) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("storage offline".to_string()))
    }

    fn load(&self, _user: &UserId) -> Result<Option<ProfileSnapshot>, RepositoryError> {
        Err(RepositoryError::Unavailable("storage offline".to_string()))
    }

    fn clear(&self, _user: &UserId) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("storage offline".to_string()))
    }
}

pub(super) fn build_service() -> (ProfileService<MemoryRepository>, MemoryRepository) {
    let repository = MemoryRepository::default();
    let service = ProfileService::new(Arc::new(repository.clone()), &RulesConfig::default());
    (service, repository)
}

pub(super) fn router_with_service(service: ProfileService<MemoryRepository>) -> axum::Router {
    eligibility_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
