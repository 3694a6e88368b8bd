//! Request handlers.
//!
//! Handlers only decode input, call one service method, and encode the
//! result. Extractor failures arrive as `Result` arguments so they can be
//! turned into JSON errors instead of axum's plain-text rejections.

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Response;
use serde::Deserialize;
use serde_json::json;

use crate::error::AppError;
use crate::response::json_response;
use crate::state::AppState;

type Handled = Result<Response, AppError>;

pub async fn animals_handler(State(state): State<AppState>) -> Handled {
    let animals = state.service.list_animals().await?;
    Ok(json_response(StatusCode::OK, &animals))
}

pub async fn symptoms_handler(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Handled {
    let Path(animal_id) = path?;
    let symptoms = state.service.list_symptoms(animal_id).await?;
    Ok(json_response(StatusCode::OK, &symptoms))
}

pub async fn action_handler(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Handled {
    let Path(id) = path?;
    let node = state.service.resolve_actionable(id).await?;
    Ok(json_response(StatusCode::OK, &node))
}

#[derive(Debug, Deserialize)]
pub struct NewFeedback {
    #[serde(default)]
    pub diagnose_id: Option<i64>,
    pub content: String,
}

pub async fn create_feedback_handler(
    State(state): State<AppState>,
    payload: Result<Json<NewFeedback>, JsonRejection>,
) -> Handled {
    let Json(payload) = payload?;
    let feedback = state
        .service
        .create_feedback(payload.diagnose_id, &payload.content)
        .await?;
    Ok(json_response(StatusCode::CREATED, &feedback))
}

pub async fn list_feedback_handler(State(state): State<AppState>) -> Handled {
    let entries = state.service.list_feedback().await?;
    Ok(json_response(StatusCode::OK, &entries))
}

#[derive(Debug, Default, Deserialize)]
pub struct AffiliateQuery {
    #[serde(default)]
    pub pet_type: String,
}

pub async fn affiliate_handler(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    query: Result<Query<AffiliateQuery>, QueryRejection>,
) -> Handled {
    let Path(disease_id) = path?;
    let Query(query) = query?;
    let products = state
        .affiliate
        .get_products(&disease_id, &query.pet_type)
        .await?;
    Ok(json_response(StatusCode::OK, &products))
}

pub async fn health_handler() -> Response {
    json_response(StatusCode::OK, &json!({ "status": "ok" }))
}
