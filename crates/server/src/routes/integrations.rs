//! CRM integration endpoints. The connect flow is simulated: the UI flips
//! `isConnected` and stamps `lastSync` through the PATCH route; no external
//! provider is ever called.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::WithRejection;

use shared::{CrmIntegration, InsertCrmIntegration, UpdateCrmIntegration};

use crate::{error::AppError, state::AppState};

/// GET /api/integrations
pub async fn list_integrations(State(state): State<AppState>) -> Json<Vec<CrmIntegration>> {
    Json(state.store.list_crm_integrations())
}

/// GET /api/integrations/:id
pub async fn get_integration(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<CrmIntegration>, AppError> {
    state
        .store
        .get_crm_integration(id)
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Integration not found".to_string()))
}

/// POST /api/integrations
pub async fn create_integration(
    State(state): State<AppState>,
    WithRejection(Json(data), _): WithRejection<Json<InsertCrmIntegration>, AppError>,
) -> (StatusCode, Json<CrmIntegration>) {
    let integration = state.store.create_crm_integration(data);
    (StatusCode::CREATED, Json(integration))
}

/// PATCH /api/integrations/:id
pub async fn update_integration(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    WithRejection(Json(data), _): WithRejection<Json<UpdateCrmIntegration>, AppError>,
) -> Result<Json<CrmIntegration>, AppError> {
    state
        .store
        .update_crm_integration(id, data)
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Integration not found".to_string()))
}

/// DELETE /api/integrations/:id
pub async fn delete_integration(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    if state.store.delete_crm_integration(id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound("Integration not found".to_string()))
    }
}
