//! Interaction endpoints. Interactions are immutable once logged, so there
//! is no update route.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::WithRejection;
use serde::Deserialize;

use shared::{InsertInteraction, Interaction};

use crate::{error::AppError, query, state::AppState};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListInteractionsParams {
    pub client_id: Option<i64>,
}

/// GET /api/interactions?clientId=
/// Per-client listings come back most recent first.
pub async fn list_interactions(
    State(state): State<AppState>,
    Query(params): Query<ListInteractionsParams>,
) -> Json<Vec<Interaction>> {
    let interactions = state.store.list_interactions();
    let interactions = if let Some(client_id) = params.client_id {
        query::interactions_by_client(&interactions, client_id)
    } else {
        interactions
    };
    Json(interactions)
}

/// GET /api/interactions/:id
pub async fn get_interaction(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Interaction>, AppError> {
    state
        .store
        .get_interaction(id)
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Interaction not found".to_string()))
}

/// POST /api/interactions
pub async fn create_interaction(
    State(state): State<AppState>,
    WithRejection(Json(data), _): WithRejection<Json<InsertInteraction>, AppError>,
) -> (StatusCode, Json<Interaction>) {
    let interaction = state.store.create_interaction(data);
    (StatusCode::CREATED, Json(interaction))
}

/// DELETE /api/interactions/:id
pub async fn delete_interaction(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    if state.store.delete_interaction(id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound("Interaction not found".to_string()))
    }
}
