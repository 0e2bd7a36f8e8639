use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::calculator::BenefitCalculator;
use super::domain::{BenefitError, BenefitReport};
use super::form::BenefitForm;
use super::scenarios::{Scenario, ScenarioOutcome};

/// Router exposing the benefit calculator.
pub fn benefit_router(calculator: Arc<BenefitCalculator>) -> Router {
    Router::new()
        .route("/api/v1/benefit/calculate", post(calculate_handler))
        .route("/api/v1/benefit/scenarios", post(scenarios_handler))
        .with_state(calculator)
}

#[derive(Debug, Deserialize)]
pub(crate) struct ScenarioRequest {
    #[serde(flatten)]
    form: BenefitForm,
    #[serde(default)]
    scenarios: Option<Vec<Scenario>>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ScenarioResponse {
    break_even_income: f64,
    outcomes: Vec<ScenarioOutcome>,
}

pub(crate) async fn calculate_handler(
    State(calculator): State<Arc<BenefitCalculator>>,
    Json(form): Json<BenefitForm>,
) -> Response {
    let outcome = form
        .to_input()
        .map_err(BenefitError::from)
        .and_then(|input| calculator.compute(&input));

    match outcome {
        Ok(result) => {
            let report = BenefitReport::new(form.work_status, result);
            (StatusCode::OK, Json(report)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn scenarios_handler(
    State(calculator): State<Arc<BenefitCalculator>>,
    Json(request): Json<ScenarioRequest>,
) -> Response {
    let scenarios = request.scenarios.unwrap_or_else(Scenario::presets);

    let outcome = request
        .form
        .to_input()
        .map_err(BenefitError::from)
        .and_then(|base| {
            let outcomes = calculator.compare_scenarios(&base, &scenarios)?;
            let break_even_income = calculator
                .break_even_income(base.previous_monthly_income, base.replacement_rate_percent)?;
            Ok(ScenarioResponse {
                break_even_income,
                outcomes,
            })
        });

    match outcome {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: BenefitError) -> Response {
    let kind = match error {
        BenefitError::Validation(_) => "validation",
        BenefitError::IncompleteRequest => "incomplete_request",
    };
    let payload = json!({
        "error": error.to_string(),
        "kind": kind,
    });
    (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
}
