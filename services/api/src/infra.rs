use akassa::workflows::eligibility::{
    ProfileRepository, ProfileSnapshot, RepositoryError, Requirement, RequirementChecklist,
    UserId, YearMonth,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local profile store; contents are lost on restart.
#[derive(Default, Clone)]
pub(crate) struct InMemoryProfileRepository {
    profiles: Arc<Mutex<HashMap<UserId, ProfileSnapshot>>>,
}

impl InMemoryProfileRepository {
    fn guard(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, HashMap<UserId, ProfileSnapshot>>, RepositoryError> {
        self.profiles
            .lock()
            .map_err(|_| RepositoryError::Unavailable("profile store lock poisoned".to_string()))
    }
}

impl ProfileRepository for InMemoryProfileRepository {
    fn save(&self, user: &UserId, snapshot: ProfileSnapshot) -> Result<(), RepositoryError> {
        self.guard()?.insert(user.clone(), snapshot);
        Ok(())
    }

    fn load(&self, user: &UserId) -> Result<Option<ProfileSnapshot>, RepositoryError> {
        Ok(self.guard()?.get(user).cloned())
    }

    fn clear(&self, user: &UserId) -> Result<(), RepositoryError> {
        self.guard()?.remove(user);
        Ok(())
    }
}

pub(crate) fn parse_month(raw: &str) -> Result<YearMonth, String> {
    raw.trim()
        .parse::<YearMonth>()
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM ({err})"))
}

/// Parses a comma-separated list of requirement keys into a ticked checklist.
/// `all` ticks every attested requirement.
pub(crate) fn parse_checklist(raw: &str) -> Result<RequirementChecklist, String> {
    if raw.trim().eq_ignore_ascii_case("all") {
        return Ok(Requirement::ALL
            .into_iter()
            .filter(|requirement| !requirement.is_auto_derived())
            .map(|requirement| (requirement, true))
            .collect());
    }

    raw.split(',')
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .map(|key| {
            key.parse::<Requirement>()
                .map(|requirement| (requirement, true))
                .map_err(|err| err.to_string())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repository_round_trips_snapshots() {
        let repository = InMemoryProfileRepository::default();
        let user = UserId::parse("demo-user").expect("valid id");
        let snapshot = ProfileSnapshot::default();

        repository.save(&user, snapshot.clone()).expect("save");
        assert_eq!(repository.load(&user).expect("load"), Some(snapshot));

        repository.clear(&user).expect("clear");
        assert_eq!(repository.load(&user).expect("load"), None);
    }

    #[test]
    fn checklist_parses_keys_and_all() {
        let checklist = parse_checklist("fund-member, available-for-work").expect("parses");
        assert_eq!(checklist.met(), 2);
        assert!(checklist.is_checked(Requirement::FundMember));

        let everything = parse_checklist("all").expect("parses");
        assert_eq!(everything.met(), 10);
        assert!(!everything.is_checked(Requirement::IncomeMonths));

        assert!(parse_checklist("fund-member,unknown").is_err());
    }

    #[test]
    fn month_parser_reports_input() {
        assert_eq!(
            parse_month(" 2025-03 ").expect("parses"),
            YearMonth::new(2025, 3).expect("valid")
        );
        let err = parse_month("March").expect_err("rejected");
        assert!(err.contains("March"));
    }
}
