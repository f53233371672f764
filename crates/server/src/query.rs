//! Read-only filters over store snapshots.
//!
//! Everything here is a pure function of (records, now): derived state such
//! as "overdue" is computed at read time and never persisted. Sorts are
//! stable, so equal timestamps keep insertion order.

use chrono::{DateTime, Duration, Utc};

use shared::{Client, ClientStatus, FollowUp, FollowUpStatus, Interaction, Task, TaskStatus};

/// How far ahead the upcoming follow-up window reaches, inclusive.
const UPCOMING_HORIZON_DAYS: i64 = 7;

pub fn clients_by_status(clients: &[Client], status: ClientStatus) -> Vec<Client> {
    clients
        .iter()
        .filter(|c| c.status == status)
        .cloned()
        .collect()
}

/// Case-insensitive substring match against name, company, or email.
pub fn search_clients(clients: &[Client], query: &str) -> Vec<Client> {
    let query = query.to_lowercase();
    clients
        .iter()
        .filter(|c| {
            c.name.to_lowercase().contains(&query)
                || c.company
                    .as_ref()
                    .is_some_and(|company| company.to_lowercase().contains(&query))
                || c.email.to_lowercase().contains(&query)
        })
        .cloned()
        .collect()
}

pub fn tasks_by_client(tasks: &[Task], client_id: i64) -> Vec<Task> {
    tasks
        .iter()
        .filter(|t| t.client_id == Some(client_id))
        .cloned()
        .collect()
}

pub fn tasks_by_status(tasks: &[Task], status: TaskStatus) -> Vec<Task> {
    tasks
        .iter()
        .filter(|t| t.status == status)
        .cloned()
        .collect()
}

/// A task is overdue when it has a due date in the past and is not completed.
pub fn overdue_tasks(tasks: &[Task], now: DateTime<Utc>) -> Vec<Task> {
    tasks
        .iter()
        .filter(|t| {
            t.due_date.is_some_and(|due| due < now) && t.status != TaskStatus::Completed
        })
        .cloned()
        .collect()
}

pub fn follow_ups_by_client(follow_ups: &[FollowUp], client_id: i64) -> Vec<FollowUp> {
    follow_ups
        .iter()
        .filter(|f| f.client_id == client_id)
        .cloned()
        .collect()
}

pub fn overdue_follow_ups(follow_ups: &[FollowUp], now: DateTime<Utc>) -> Vec<FollowUp> {
    follow_ups
        .iter()
        .filter(|f| f.status == FollowUpStatus::Scheduled && f.scheduled_date < now)
        .cloned()
        .collect()
}

/// Scheduled follow-ups inside the next week, soonest first. Both window
/// edges are inclusive.
pub fn upcoming_follow_ups(follow_ups: &[FollowUp], now: DateTime<Utc>) -> Vec<FollowUp> {
    let horizon = now + Duration::days(UPCOMING_HORIZON_DAYS);
    let mut upcoming: Vec<FollowUp> = follow_ups
        .iter()
        .filter(|f| {
            f.status == FollowUpStatus::Scheduled
                && f.scheduled_date >= now
                && f.scheduled_date <= horizon
        })
        .cloned()
        .collect();
    upcoming.sort_by_key(|f| f.scheduled_date);
    upcoming
}

/// Interactions for a client, most recent first.
pub fn interactions_by_client(interactions: &[Interaction], client_id: i64) -> Vec<Interaction> {
    let mut matching: Vec<Interaction> = interactions
        .iter()
        .filter(|i| i.client_id == client_id)
        .cloned()
        .collect();
    matching.sort_by(|a, b| b.date.cmp(&a.date));
    matching
}

/// Resolve a weak client reference to a display name. References are never
/// enforced, so a deleted client yields a placeholder instead of an error.
pub fn client_name(clients: &[Client], client_id: Option<i64>) -> String {
    let Some(client_id) = client_id else {
        return "No client".to_string();
    };
    clients
        .iter()
        .find(|c| c.id == client_id)
        .map(|c| c.name.clone())
        .unwrap_or_else(|| "Unknown client".to_string())
}

// ============================================================================
// Tests
// ============================================================================
