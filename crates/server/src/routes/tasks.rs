//! Task endpoints

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::WithRejection;
use chrono::Utc;
use serde::Deserialize;

use shared::{InsertTask, Task, TaskStatus, UpdateTask};

use crate::{error::AppError, query, state::AppState};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListTasksParams {
    pub client_id: Option<i64>,
    pub status: Option<TaskStatus>,
}

/// GET /api/tasks?clientId=&status=
pub async fn list_tasks(
    State(state): State<AppState>,
    Query(params): Query<ListTasksParams>,
) -> Json<Vec<Task>> {
    let tasks = state.store.list_tasks();
    let tasks = if let Some(client_id) = params.client_id {
        query::tasks_by_client(&tasks, client_id)
    } else if let Some(status) = params.status {
        query::tasks_by_status(&tasks, status)
    } else {
        tasks
    };
    Json(tasks)
}

/// GET /api/tasks/overdue
pub async fn overdue_tasks(State(state): State<AppState>) -> Json<Vec<Task>> {
    let tasks = state.store.list_tasks();
    Json(query::overdue_tasks(&tasks, Utc::now()))
}

/// GET /api/tasks/:id
pub async fn get_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Task>, AppError> {
    state
        .store
        .get_task(id)
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Task not found".to_string()))
}

/// POST /api/tasks
pub async fn create_task(
    State(state): State<AppState>,
    WithRejection(Json(data), _): WithRejection<Json<InsertTask>, AppError>,
) -> (StatusCode, Json<Task>) {
    let task = state.store.create_task(data);
    (StatusCode::CREATED, Json(task))
}

/// PATCH /api/tasks/:id
pub async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    WithRejection(Json(data), _): WithRejection<Json<UpdateTask>, AppError>,
) -> Result<Json<Task>, AppError> {
    state
        .store
        .update_task(id, data)
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Task not found".to_string()))
}

/// DELETE /api/tasks/:id
pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    if state.store.delete_task(id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound("Task not found".to_string()))
    }
}
