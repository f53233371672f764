//! Dashboard endpoints

use axum::extract::State;
use axum::Json;
use chrono::Utc;

use shared::DashboardStats;

use crate::{state::AppState, stats};

/// GET /api/dashboard/stats
pub async fn stats(State(state): State<AppState>) -> Json<DashboardStats> {
    Json(stats::dashboard_stats(&state.store, Utc::now()))
}
