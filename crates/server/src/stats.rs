//! Dashboard aggregation, composed from store snapshots and the query
//! filters.

use chrono::{DateTime, Duration, Utc};

use shared::{DashboardStats, FollowUpStatus, TaskStatus};

use crate::query;
use crate::store::MemStore;

/// Compute the dashboard counters. Pending follow-ups count every scheduled
/// one, including those already overdue; completed-this-week is a rolling
/// 7-day window over `updated_at`, not a calendar week.
pub fn dashboard_stats(store: &MemStore, now: DateTime<Utc>) -> DashboardStats {
    let one_week_ago = now - Duration::days(7);
    let clients = store.list_clients();
    let tasks = store.list_tasks();
    let follow_ups = store.list_follow_ups();

    DashboardStats {
        total_clients: clients.len(),
        pending_followups: follow_ups
            .iter()
            .filter(|f| f.status == FollowUpStatus::Scheduled)
            .count(),
        overdue_tasks: query::overdue_tasks(&tasks, now).len(),
        completed_this_week: tasks
            .iter()
            .filter(|t| t.status == TaskStatus::Completed && t.updated_at >= one_week_ago)
            .count(),
    }
}

// ============================================================================
// Tests
// ============================================================================
