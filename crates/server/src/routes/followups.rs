//! Follow-up endpoints

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::WithRejection;
use chrono::Utc;
use serde::Deserialize;

use shared::{FollowUp, InsertFollowUp, UpdateFollowUp};

use crate::{error::AppError, query, state::AppState};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListFollowUpsParams {
    pub client_id: Option<i64>,
    pub upcoming: Option<bool>,
}

/// GET /api/followups?clientId=&upcoming=true
pub async fn list_follow_ups(
    State(state): State<AppState>,
    Query(params): Query<ListFollowUpsParams>,
) -> Json<Vec<FollowUp>> {
    let follow_ups = state.store.list_follow_ups();
    let follow_ups = if let Some(client_id) = params.client_id {
        query::follow_ups_by_client(&follow_ups, client_id)
    } else if params.upcoming.unwrap_or(false) {
        query::upcoming_follow_ups(&follow_ups, Utc::now())
    } else {
        follow_ups
    };
    Json(follow_ups)
}

/// GET /api/followups/overdue
pub async fn overdue_follow_ups(State(state): State<AppState>) -> Json<Vec<FollowUp>> {
    let follow_ups = state.store.list_follow_ups();
    Json(query::overdue_follow_ups(&follow_ups, Utc::now()))
}

/// GET /api/followups/:id
pub async fn get_follow_up(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<FollowUp>, AppError> {
    state
        .store
        .get_follow_up(id)
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Follow-up not found".to_string()))
}

/// POST /api/followups
pub async fn create_follow_up(
    State(state): State<AppState>,
    WithRejection(Json(data), _): WithRejection<Json<InsertFollowUp>, AppError>,
) -> (StatusCode, Json<FollowUp>) {
    let follow_up = state.store.create_follow_up(data);
    (StatusCode::CREATED, Json(follow_up))
}

/// PATCH /api/followups/:id
pub async fn update_follow_up(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    WithRejection(Json(data), _): WithRejection<Json<UpdateFollowUp>, AppError>,
) -> Result<Json<FollowUp>, AppError> {
    state
        .store
        .update_follow_up(id, data)
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Follow-up not found".to_string()))
}

/// DELETE /api/followups/:id
pub async fn delete_follow_up(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    if state.store.delete_follow_up(id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound("Follow-up not found".to_string()))
    }
}
