use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{MonthlyIncomeRecord, RequirementChecklist};
use crate::workflows::benefit::BenefitForm;

/// Opaque per-user key for stored profiles.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

const MAX_USER_ID_LEN: usize = 64;

impl UserId {
    pub fn parse(raw: &str) -> Result<Self, InvalidUserId> {
        let trimmed = raw.trim();
        let valid = !trimmed.is_empty()
            && trimmed.len() <= MAX_USER_ID_LEN
            && trimmed
                .chars()
                .all(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '_');
        if valid {
            Ok(Self(trimmed.to_string()))
        } else {
            Err(InvalidUserId(raw.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for UserId {
    type Error = InvalidUserId;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("user id '{0}' must be 1-64 characters of letters, digits, '-' or '_'")]
pub struct InvalidUserId(pub String);

/// Everything the calculator pages persist for one user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileSnapshot {
    #[serde(default)]
    pub history: Vec<MonthlyIncomeRecord>,
    #[serde(default)]
    pub checklist: RequirementChecklist,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub benefit_form: Option<BenefitForm>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<DateTime<Utc>>,
}

/// Storage abstraction for saved profiles; the engine never calls it directly.
pub trait ProfileRepository: Send + Sync {
    fn save(&self, user: &UserId, snapshot: ProfileSnapshot) -> Result<(), RepositoryError>;
    fn load(&self, user: &UserId) -> Result<Option<ProfileSnapshot>, RepositoryError>;
    fn clear(&self, user: &UserId) -> Result<(), RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
