//! Client endpoints

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::WithRejection;
use serde::Deserialize;

use shared::{Client, ClientStatus, InsertClient, UpdateClient};

use crate::{error::AppError, query, state::AppState};

#[derive(Debug, Deserialize)]
pub struct ListClientsParams {
    pub search: Option<String>,
    pub status: Option<ClientStatus>,
}

/// GET /api/clients?search=&status=
/// Search takes precedence over status filtering, matching the UI's usage.
pub async fn list_clients(
    State(state): State<AppState>,
    Query(params): Query<ListClientsParams>,
) -> Json<Vec<Client>> {
    let clients = state.store.list_clients();
    let clients = if let Some(search) = params.search {
        query::search_clients(&clients, &search)
    } else if let Some(status) = params.status {
        query::clients_by_status(&clients, status)
    } else {
        clients
    };
    Json(clients)
}

/// GET /api/clients/:id
pub async fn get_client(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Client>, AppError> {
    state
        .store
        .get_client(id)
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Client not found".to_string()))
}

/// POST /api/clients
pub async fn create_client(
    State(state): State<AppState>,
    WithRejection(Json(data), _): WithRejection<Json<InsertClient>, AppError>,
) -> (StatusCode, Json<Client>) {
    let client = state.store.create_client(data);
    (StatusCode::CREATED, Json(client))
}

/// PATCH /api/clients/:id
pub async fn update_client(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    WithRejection(Json(data), _): WithRejection<Json<UpdateClient>, AppError>,
) -> Result<Json<Client>, AppError> {
    state
        .store
        .update_client(id, data)
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Client not found".to_string()))
}

/// DELETE /api/clients/:id
pub async fn delete_client(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    if state.store.delete_client(id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound("Client not found".to_string()))
    }
}
