use chrono::Utc;
use dashmap::DashMap;
use std::sync::atomic::{AtomicI64, Ordering};

use shared::{
    Client, CrmIntegration, FollowUp, InsertClient, InsertCrmIntegration, InsertFollowUp,
    InsertInteraction, InsertTask, InsertUser, Interaction, Task, UpdateClient,
    UpdateCrmIntegration, UpdateFollowUp, UpdateTask, User,
};

/// In-memory entity store. Sole owner of all records; everything else reads
/// snapshots taken via the `list_*` methods.
///
/// Identifiers are assigned per kind, sequentially from 1, and never reused,
/// so listing in ascending id order is insertion order. Deletes never
/// cascade: a task or follow-up may keep a `client_id` that no longer
/// resolves, and readers handle that case (see `query::client_name`).
pub struct MemStore {
    users: DashMap<i64, User>,
    clients: DashMap<i64, Client>,
    tasks: DashMap<i64, Task>,
    follow_ups: DashMap<i64, FollowUp>,
    interactions: DashMap<i64, Interaction>,
    crm_integrations: DashMap<i64, CrmIntegration>,
    next_user_id: AtomicI64,
    next_client_id: AtomicI64,
    next_task_id: AtomicI64,
    next_follow_up_id: AtomicI64,
    next_interaction_id: AtomicI64,
    next_crm_integration_id: AtomicI64,
}

impl MemStore {
    pub fn new() -> Self {
        Self {
            users: DashMap::new(),
            clients: DashMap::new(),
            tasks: DashMap::new(),
            follow_ups: DashMap::new(),
            interactions: DashMap::new(),
            crm_integrations: DashMap::new(),
            next_user_id: AtomicI64::new(1),
            next_client_id: AtomicI64::new(1),
            next_task_id: AtomicI64::new(1),
            next_follow_up_id: AtomicI64::new(1),
            next_interaction_id: AtomicI64::new(1),
            next_crm_integration_id: AtomicI64::new(1),
        }
    }

    /// Seed the default admin user. Called once at startup.
    pub fn seed_defaults(&self) {
        let admin = self.create_user(InsertUser {
            username: "admin".to_string(),
            password: "password".to_string(),
            name: Some("Sarah Johnson".to_string()),
            role: Some("Project Manager".to_string()),
        });
        tracing::info!("Seeded default user '{}' (id {})", admin.username, admin.id);
    }

    // ========================================================================
    // Users
    // ========================================================================

    pub fn create_user(&self, insert: InsertUser) -> User {
        let id = self.next_user_id.fetch_add(1, Ordering::SeqCst);
        let user = User {
            id,
            username: insert.username,
            password: insert.password,
            name: insert.name.unwrap_or_else(|| "User".to_string()),
            role: insert.role.unwrap_or_else(|| "Project Manager".to_string()),
        };
        self.users.insert(id, user.clone());
        user
    }

    pub fn get_user(&self, id: i64) -> Option<User> {
        self.users.get(&id).map(|u| u.value().clone())
    }

    pub fn get_user_by_username(&self, username: &str) -> Option<User> {
        self.users
            .iter()
            .find(|u| u.username == username)
            .map(|u| u.value().clone())
    }

    // ========================================================================
    // Clients
    // ========================================================================

    pub fn list_clients(&self) -> Vec<Client> {
        let mut clients: Vec<Client> = self.clients.iter().map(|c| c.value().clone()).collect();
        clients.sort_by_key(|c| c.id);
        clients
    }

    pub fn get_client(&self, id: i64) -> Option<Client> {
        self.clients.get(&id).map(|c| c.value().clone())
    }

    pub fn create_client(&self, insert: InsertClient) -> Client {
        let id = self.next_client_id.fetch_add(1, Ordering::SeqCst);
        let now = Utc::now();
        let client = Client {
            id,
            name: insert.name,
            company: insert.company,
            email: insert.email,
            phone: insert.phone,
            status: insert.status,
            created_at: now,
            updated_at: now,
        };
        self.clients.insert(id, client.clone());
        client
    }

    pub fn update_client(&self, id: i64, update: UpdateClient) -> Option<Client> {
        let mut entry = self.clients.get_mut(&id)?;
        let client = entry.value_mut();
        if let Some(name) = update.name {
            client.name = name;
        }
        if let Some(company) = update.company {
            client.company = Some(company);
        }
        if let Some(email) = update.email {
            client.email = email;
        }
        if let Some(phone) = update.phone {
            client.phone = Some(phone);
        }
        if let Some(status) = update.status {
            client.status = status;
        }
        client.updated_at = Utc::now();
        Some(client.clone())
    }

    pub fn delete_client(&self, id: i64) -> bool {
        self.clients.remove(&id).is_some()
    }

    // ========================================================================
    // Tasks
    // ========================================================================

    pub fn list_tasks(&self) -> Vec<Task> {
        let mut tasks: Vec<Task> = self.tasks.iter().map(|t| t.value().clone()).collect();
        tasks.sort_by_key(|t| t.id);
        tasks
    }

    pub fn get_task(&self, id: i64) -> Option<Task> {
        self.tasks.get(&id).map(|t| t.value().clone())
    }

    pub fn create_task(&self, insert: InsertTask) -> Task {
        let id = self.next_task_id.fetch_add(1, Ordering::SeqCst);
        let now = Utc::now();
        let task = Task {
            id,
            title: insert.title,
            description: insert.description,
            client_id: insert.client_id,
            status: insert.status,
            priority: insert.priority,
            due_date: insert.due_date,
            created_at: now,
            updated_at: now,
        };
        self.tasks.insert(id, task.clone());
        task
    }

    pub fn update_task(&self, id: i64, update: UpdateTask) -> Option<Task> {
        let mut entry = self.tasks.get_mut(&id)?;
        let task = entry.value_mut();
        if let Some(title) = update.title {
            task.title = title;
        }
        if let Some(description) = update.description {
            task.description = Some(description);
        }
        if let Some(client_id) = update.client_id {
            task.client_id = Some(client_id);
        }
        if let Some(status) = update.status {
            task.status = status;
        }
        if let Some(priority) = update.priority {
            task.priority = priority;
        }
        if let Some(due_date) = update.due_date {
            task.due_date = Some(due_date);
        }
        task.updated_at = Utc::now();
        Some(task.clone())
    }

    pub fn delete_task(&self, id: i64) -> bool {
        self.tasks.remove(&id).is_some()
    }

    // ========================================================================
    // Follow-ups
    // ========================================================================

    pub fn list_follow_ups(&self) -> Vec<FollowUp> {
        let mut follow_ups: Vec<FollowUp> = self.follow_ups.iter().map(|f| f.value().clone()).collect();
        follow_ups.sort_by_key(|f| f.id);
        follow_ups
    }

    pub fn get_follow_up(&self, id: i64) -> Option<FollowUp> {
        self.follow_ups.get(&id).map(|f| f.value().clone())
    }

    pub fn create_follow_up(&self, insert: InsertFollowUp) -> FollowUp {
        let id = self.next_follow_up_id.fetch_add(1, Ordering::SeqCst);
        let now = Utc::now();
        let follow_up = FollowUp {
            id,
            client_id: insert.client_id,
            title: insert.title,
            description: insert.description,
            scheduled_date: insert.scheduled_date,
            kind: insert.kind,
            status: insert.status,
            created_at: now,
            updated_at: now,
        };
        self.follow_ups.insert(id, follow_up.clone());
        follow_up
    }

    pub fn update_follow_up(&self, id: i64, update: UpdateFollowUp) -> Option<FollowUp> {
        let mut entry = self.follow_ups.get_mut(&id)?;
        let follow_up = entry.value_mut();
        if let Some(client_id) = update.client_id {
            follow_up.client_id = client_id;
        }
        if let Some(title) = update.title {
            follow_up.title = title;
        }
        if let Some(description) = update.description {
            follow_up.description = Some(description);
        }
        if let Some(scheduled_date) = update.scheduled_date {
            follow_up.scheduled_date = scheduled_date;
        }
        if let Some(kind) = update.kind {
            follow_up.kind = kind;
        }
        if let Some(status) = update.status {
            follow_up.status = status;
        }
        follow_up.updated_at = Utc::now();
        Some(follow_up.clone())
    }

    pub fn delete_follow_up(&self, id: i64) -> bool {
        self.follow_ups.remove(&id).is_some()
    }

    // ========================================================================
    // Interactions
    // ========================================================================

    pub fn list_interactions(&self) -> Vec<Interaction> {
        let mut interactions: Vec<Interaction> =
            self.interactions.iter().map(|i| i.value().clone()).collect();
        interactions.sort_by_key(|i| i.id);
        interactions
    }

    pub fn get_interaction(&self, id: i64) -> Option<Interaction> {
        self.interactions.get(&id).map(|i| i.value().clone())
    }

    pub fn create_interaction(&self, insert: InsertInteraction) -> Interaction {
        let id = self.next_interaction_id.fetch_add(1, Ordering::SeqCst);
        let now = Utc::now();
        let interaction = Interaction {
            id,
            client_id: insert.client_id,
            kind: insert.kind,
            content: insert.content,
            date: insert.date.unwrap_or(now),
            created_at: now,
        };
        self.interactions.insert(id, interaction.clone());
        interaction
    }

    pub fn delete_interaction(&self, id: i64) -> bool {
        self.interactions.remove(&id).is_some()
    }

    // ========================================================================
    // CRM integrations
    // ========================================================================

    pub fn list_crm_integrations(&self) -> Vec<CrmIntegration> {
        let mut integrations: Vec<CrmIntegration> =
            self.crm_integrations.iter().map(|i| i.value().clone()).collect();
        integrations.sort_by_key(|i| i.id);
        integrations
    }

    pub fn get_crm_integration(&self, id: i64) -> Option<CrmIntegration> {
        self.crm_integrations.get(&id).map(|i| i.value().clone())
    }

    pub fn create_crm_integration(&self, insert: InsertCrmIntegration) -> CrmIntegration {
        let id = self.next_crm_integration_id.fetch_add(1, Ordering::SeqCst);
        let integration = CrmIntegration {
            id,
            name: insert.name,
            kind: insert.kind,
            api_key: insert.api_key,
            is_connected: insert.is_connected,
            last_sync: insert.last_sync,
            created_at: Utc::now(),
        };
        self.crm_integrations.insert(id, integration.clone());
        integration
    }

    // Integrations carry no updated_at, so a partial update only merges fields.
    pub fn update_crm_integration(
        &self,
        id: i64,
        update: UpdateCrmIntegration,
    ) -> Option<CrmIntegration> {
        let mut entry = self.crm_integrations.get_mut(&id)?;
        let integration = entry.value_mut();
        if let Some(name) = update.name {
            integration.name = name;
        }
        if let Some(kind) = update.kind {
            integration.kind = kind;
        }
        if let Some(api_key) = update.api_key {
            integration.api_key = Some(api_key);
        }
        if let Some(is_connected) = update.is_connected {
            integration.is_connected = is_connected;
        }
        if let Some(last_sync) = update.last_sync {
            integration.last_sync = Some(last_sync);
        }
        Some(integration.clone())
    }

    pub fn delete_crm_integration(&self, id: i64) -> bool {
        self.crm_integrations.remove(&id).is_some()
    }
}

impl Default for MemStore {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{ClientStatus, TaskStatus};

    fn insert_client(name: &str, email: &str) -> InsertClient {
        InsertClient {
            name: name.to_string(),
            company: None,
            email: email.to_string(),
            phone: None,
            status: ClientStatus::Active,
        }
    }

    fn insert_task(title: &str) -> InsertTask {
        InsertTask {
            title: title.to_string(),
            description: None,
            client_id: None,
            status: TaskStatus::Pending,
            priority: Default::default(),
            due_date: None,
        }
    }

    #[test]
    fn test_ids_are_sequential_and_never_reused() {
        let store = MemStore::new();
        let a = store.create_client(insert_client("A", "a@x.com"));
        let b = store.create_client(insert_client("B", "b@x.com"));
        let c = store.create_client(insert_client("C", "c@x.com"));
        assert_eq!((a.id, b.id, c.id), (1, 2, 3));

        assert!(store.delete_client(b.id));
        let d = store.create_client(insert_client("D", "d@x.com"));
        assert_eq!(d.id, 4);
    }

    #[test]
    fn test_id_counters_are_per_kind() {
        let store = MemStore::new();
        let client = store.create_client(insert_client("A", "a@x.com"));
        let task = store.create_task(insert_task("Call A"));
        assert_eq!(client.id, 1);
        assert_eq!(task.id, 1);
    }

    #[test]
    fn test_list_is_insertion_order_after_deletes() {
        let store = MemStore::new();
        for name in ["A", "B", "C"] {
            store.create_client(insert_client(name, "x@x.com"));
        }
        store.delete_client(2);
        store.create_client(insert_client("D", "d@x.com"));

        let names: Vec<String> = store.list_clients().into_iter().map(|c| c.name).collect();
        assert_eq!(names, ["A", "C", "D"]);
    }

    #[test]
    fn test_update_merges_only_provided_fields() {
        let store = MemStore::new();
        let mut insert = insert_client("Jane", "jane@x.com");
        insert.company = Some("Acme Corp".to_string());
        let created = store.create_client(insert);

        let updated = store
            .update_client(
                created.id,
                UpdateClient {
                    status: Some(ClientStatus::Inactive),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.status, ClientStatus::Inactive);
        assert_eq!(updated.name, "Jane");
        assert_eq!(updated.company.as_deref(), Some("Acme Corp"));
        assert_eq!(updated.email, "jane@x.com");
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);
    }

    #[test]
    fn test_update_unknown_id_returns_none() {
        let store = MemStore::new();
        assert!(store.update_task(42, UpdateTask::default()).is_none());
        assert!(store.get_task(42).is_none());
    }

    #[test]
    fn test_delete_is_idempotent_on_absence() {
        let store = MemStore::new();
        let task = store.create_task(insert_task("Call Jane"));
        assert!(store.delete_task(task.id));
        assert!(!store.delete_task(task.id));
        assert!(store.list_tasks().is_empty());
    }

    #[test]
    fn test_delete_client_does_not_cascade() {
        let store = MemStore::new();
        let client = store.create_client(insert_client("Jane", "jane@x.com"));
        let follow_up = store.create_follow_up(InsertFollowUp {
            client_id: client.id,
            title: "Check in".to_string(),
            description: None,
            scheduled_date: Utc::now(),
            kind: Default::default(),
            status: Default::default(),
        });

        assert!(store.delete_client(client.id));
        let remaining = store.get_follow_up(follow_up.id).unwrap();
        assert_eq!(remaining.client_id, client.id);
    }

    #[test]
    fn test_user_defaults_and_lookup_by_username() {
        let store = MemStore::new();
        let user = store.create_user(InsertUser {
            username: "jdoe".to_string(),
            password: "secret".to_string(),
            name: None,
            role: None,
        });
        assert_eq!(user.name, "User");
        assert_eq!(user.role, "Project Manager");

        let found = store.get_user_by_username("jdoe").unwrap();
        assert_eq!(found.id, user.id);
        assert!(store.get_user_by_username("nobody").is_none());
    }

    #[test]
    fn test_seed_defaults_creates_admin() {
        let store = MemStore::new();
        store.seed_defaults();
        let admin = store.get_user_by_username("admin").unwrap();
        assert_eq!(admin.id, 1);
        assert_eq!(admin.role, "Project Manager");
    }

    #[test]
    fn test_interaction_date_defaults_to_now() {
        let store = MemStore::new();
        let before = Utc::now();
        let interaction = store.create_interaction(InsertInteraction {
            client_id: 1,
            kind: "note".to_string(),
            content: "Spoke on the phone".to_string(),
            date: None,
        });
        assert!(interaction.date >= before);
        assert!(store.delete_interaction(interaction.id));
        assert!(!store.delete_interaction(interaction.id));
    }

    #[test]
    fn test_crm_integration_connect_flow() {
        let store = MemStore::new();
        let integration = store.create_crm_integration(InsertCrmIntegration {
            name: "Salesforce".to_string(),
            kind: "salesforce".to_string(),
            api_key: None,
            is_connected: false,
            last_sync: None,
        });
        assert!(!integration.is_connected);

        let now = Utc::now();
        let connected = store
            .update_crm_integration(
                integration.id,
                UpdateCrmIntegration {
                    is_connected: Some(true),
                    last_sync: Some(now),
                    ..Default::default()
                },
            )
            .unwrap();
        assert!(connected.is_connected);
        assert_eq!(connected.last_sync, Some(now));
        assert_eq!(connected.name, "Salesforce");
    }
}
