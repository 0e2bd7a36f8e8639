use serde::{Deserialize, Serialize};

use super::domain::{BenefitInput, ValidationError, WorkStatus};

/// A raw form field: browsers post numbers as text, API clients as numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FormValue {
    Number(f64),
    Text(String),
}

impl FormValue {
    /// Missing, blank, and non-numeric entries read as zero.
    fn coerce(value: Option<&FormValue>) -> f64 {
        match value {
            Some(FormValue::Number(number)) if number.is_finite() => *number,
            Some(FormValue::Text(text)) => text
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|number| number.is_finite())
                .unwrap_or(0.0),
            _ => 0.0,
        }
    }
}

impl From<f64> for FormValue {
    fn from(value: f64) -> Self {
        FormValue::Number(value)
    }
}

impl From<&str> for FormValue {
    fn from(value: &str) -> Self {
        FormValue::Text(value.to_string())
    }
}

/// Calculator form as submitted, before any engine validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BenefitForm {
    #[serde(default)]
    pub previous_income: Option<FormValue>,
    #[serde(default)]
    pub replacement_rate: Option<FormValue>,
    #[serde(default)]
    pub current_income: Option<FormValue>,
    #[serde(default)]
    pub unavailable_days: Option<FormValue>,
    #[serde(default)]
    pub work_status: WorkStatus,
}

impl BenefitForm {
    /// Coerces the raw fields into a typed input. Blank or unreadable fields
    /// become zero; negative amounts and days are rejected.
    pub fn to_input(&self) -> Result<BenefitInput, ValidationError> {
        let previous_monthly_income = non_negative(
            "previous_monthly_income",
            FormValue::coerce(self.previous_income.as_ref()),
        )?;
        let current_monthly_income = non_negative(
            "current_monthly_income",
            FormValue::coerce(self.current_income.as_ref()),
        )?;

        let rate = non_negative(
            "replacement_rate_percent",
            FormValue::coerce(self.replacement_rate.as_ref()).trunc(),
        )?;
        if rate > f64::from(u32::MAX) {
            return Err(ValidationError::ReplacementRateOutOfRange(u32::MAX));
        }

        let days = FormValue::coerce(self.unavailable_days.as_ref()).trunc();
        if days < 0.0 {
            return Err(ValidationError::NegativeDays(days as i64));
        }

        Ok(BenefitInput {
            previous_monthly_income,
            replacement_rate_percent: rate as u32,
            current_monthly_income,
            unavailable_days: days.min(f64::from(u32::MAX)) as u32,
        })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    if value < 0.0 {
        return Err(ValidationError::NegativeAmount { field, value });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(previous: &str, rate: &str, current: &str, days: &str) -> BenefitForm {
        BenefitForm {
            previous_income: Some(previous.into()),
            replacement_rate: Some(rate.into()),
            current_income: Some(current.into()),
            unavailable_days: Some(days.into()),
            work_status: WorkStatus::PartTime,
        }
    }

    #[test]
    fn blank_and_garbage_fields_read_as_zero() {
        let input = form("30000", "80", "", "abc").to_input().expect("coerces");

        assert_eq!(input.previous_monthly_income, 30_000.0);
        assert_eq!(input.replacement_rate_percent, 80);
        assert_eq!(input.current_monthly_income, 0.0);
        assert_eq!(input.unavailable_days, 0);
    }

    #[test]
    fn missing_fields_read_as_zero() {
        let input = BenefitForm::default().to_input().expect("coerces");
        assert_eq!(input, BenefitInput::unemployed(0.0, 0));
    }

    #[test]
    fn fractional_days_are_truncated() {
        let input = form("30000", "80", "0", "3.9").to_input().expect("coerces");
        assert_eq!(input.unavailable_days, 3);
    }

    #[test]
    fn negative_amounts_are_rejected_not_clamped() {
        let err = form("30000", "80", "-100", "0")
            .to_input()
            .expect_err("negative income rejected");
        assert_eq!(
            err,
            ValidationError::NegativeAmount {
                field: "current_monthly_income",
                value: -100.0
            }
        );

        let err = form("30000", "80", "0", "-2")
            .to_input()
            .expect_err("negative days rejected");
        assert_eq!(err, ValidationError::NegativeDays(-2));
    }

    #[test]
    fn accepts_numeric_json_fields() {
        let form: BenefitForm = serde_json::from_str(
            r#"{"previous_income": 40000, "replacement_rate": "70", "work_status": "part-time"}"#,
        )
        .expect("form parses");

        let input = form.to_input().expect("coerces");
        assert_eq!(input.previous_monthly_income, 40_000.0);
        assert_eq!(input.replacement_rate_percent, 70);
        assert_eq!(form.work_status, WorkStatus::PartTime);
    }
}
