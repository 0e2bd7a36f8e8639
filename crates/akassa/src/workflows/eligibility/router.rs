use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{MonthlyIncomeRecord, RequirementChecklist};
use super::repository::{ProfileRepository, ProfileSnapshot, UserId};
use super::service::{ProfileService, ProfileServiceError};

/// Router builder exposing evaluation and saved-profile endpoints.
pub fn eligibility_router<R>(service: Arc<ProfileService<R>>) -> Router
where
    R: ProfileRepository + 'static,
{
    Router::new()
        .route("/api/v1/eligibility/evaluate", post(evaluate_handler::<R>))
        .route(
            "/api/v1/profiles/:user_id",
            get(load_handler::<R>)
                .put(save_handler::<R>)
                .delete(clear_handler::<R>),
        )
        .route(
            "/api/v1/profiles/:user_id/evaluate",
            post(evaluate_saved_handler::<R>),
        )
        .route(
            "/api/v1/profiles/:user_id/benefit",
            post(benefit_saved_handler::<R>),
        )
        .route(
            "/api/v1/profiles/:user_id/export",
            get(export_json_handler::<R>),
        )
        .route(
            "/api/v1/profiles/:user_id/export.csv",
            get(export_csv_handler::<R>),
        )
        .route(
            "/api/v1/profiles/:user_id/history.csv",
            put(import_csv_handler::<R>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct EvaluateRequest {
    #[serde(default)]
    history: Vec<MonthlyIncomeRecord>,
    #[serde(default)]
    checklist: RequirementChecklist,
}

pub(crate) async fn evaluate_handler<R>(
    State(service): State<Arc<ProfileService<R>>>,
    Json(request): Json<EvaluateRequest>,
) -> Response
where
    R: ProfileRepository + 'static,
{
    match service.evaluate(&request.history, &request.checklist) {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn save_handler<R>(
    State(service): State<Arc<ProfileService<R>>>,
    Path(user_id): Path<String>,
    Json(snapshot): Json<ProfileSnapshot>,
) -> Response
where
    R: ProfileRepository + 'static,
{
    let user = match UserId::parse(&user_id) {
        Ok(user) => user,
        Err(error) => return bad_request(error.to_string()),
    };

    match service.save(&user, snapshot) {
        Ok(saved) => (StatusCode::OK, Json(saved)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn load_handler<R>(
    State(service): State<Arc<ProfileService<R>>>,
    Path(user_id): Path<String>,
) -> Response
where
    R: ProfileRepository + 'static,
{
    with_user(&user_id, |user| {
        service
            .load(user)
            .map(|snapshot| (StatusCode::OK, Json(snapshot)).into_response())
    })
}

pub(crate) async fn clear_handler<R>(
    State(service): State<Arc<ProfileService<R>>>,
    Path(user_id): Path<String>,
) -> Response
where
    R: ProfileRepository + 'static,
{
    with_user(&user_id, |user| {
        service
            .clear(user)
            .map(|()| StatusCode::NO_CONTENT.into_response())
    })
}

pub(crate) async fn evaluate_saved_handler<R>(
    State(service): State<Arc<ProfileService<R>>>,
    Path(user_id): Path<String>,
) -> Response
where
    R: ProfileRepository + 'static,
{
    with_user(&user_id, |user| {
        service
            .evaluate_saved(user)
            .map(|report| (StatusCode::OK, Json(report)).into_response())
    })
}

pub(crate) async fn benefit_saved_handler<R>(
    State(service): State<Arc<ProfileService<R>>>,
    Path(user_id): Path<String>,
) -> Response
where
    R: ProfileRepository + 'static,
{
    with_user(&user_id, |user| {
        service
            .calculate_saved(user)
            .map(|report| (StatusCode::OK, Json(report)).into_response())
    })
}

pub(crate) async fn export_json_handler<R>(
    State(service): State<Arc<ProfileService<R>>>,
    Path(user_id): Path<String>,
) -> Response
where
    R: ProfileRepository + 'static,
{
    with_user(&user_id, |user| {
        service
            .export_json(user)
            .map(|bytes| attachment(bytes, "application/json", user, "json"))
    })
}

pub(crate) async fn export_csv_handler<R>(
    State(service): State<Arc<ProfileService<R>>>,
    Path(user_id): Path<String>,
) -> Response
where
    R: ProfileRepository + 'static,
{
    with_user(&user_id, |user| {
        service
            .export_history_csv(user)
            .map(|bytes| attachment(bytes, "text/csv", user, "csv"))
    })
}

pub(crate) async fn import_csv_handler<R>(
    State(service): State<Arc<ProfileService<R>>>,
    Path(user_id): Path<String>,
    body: Bytes,
) -> Response
where
    R: ProfileRepository + 'static,
{
    with_user(&user_id, |user| {
        service
            .import_history_csv(user, body.as_ref())
            .map(|saved| (StatusCode::OK, Json(saved)).into_response())
    })
}

fn with_user<F>(raw: &str, action: F) -> Response
where
    F: FnOnce(&UserId) -> Result<Response, ProfileServiceError>,
{
    match UserId::parse(raw) {
        Ok(user) => action(&user).unwrap_or_else(error_response),
        Err(error) => bad_request(error.to_string()),
    }
}

fn attachment(bytes: Vec<u8>, content_type: &'static str, user: &UserId, ext: &str) -> Response {
    let disposition = format!("attachment; filename=\"akassa-{user}.{ext}\"");
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response()
}

fn bad_request(message: String) -> Response {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
}

pub(crate) fn error_response(error: ProfileServiceError) -> Response {
    let status = match &error {
        ProfileServiceError::NotFound(_) => StatusCode::NOT_FOUND,
        ProfileServiceError::MissingBenefitForm(_)
        | ProfileServiceError::History(_)
        | ProfileServiceError::Benefit(_)
        | ProfileServiceError::Import(_) => StatusCode::UNPROCESSABLE_ENTITY,
        ProfileServiceError::Export(_) | ProfileServiceError::Repository(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    let payload = json!({ "error": error.to_string() });
    (status, Json(payload)).into_response()
}
