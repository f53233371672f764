use axum::{routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

mod clients;
mod dashboard;
mod followups;
mod health;
mod integrations;
mod interactions;
mod tasks;

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Dashboard
        .route("/api/dashboard/stats", get(dashboard::stats))
        // Clients
        .route(
            "/api/clients",
            get(clients::list_clients).post(clients::create_client),
        )
        .route(
            "/api/clients/:id",
            get(clients::get_client)
                .patch(clients::update_client)
                .delete(clients::delete_client),
        )
        // Tasks
        .route("/api/tasks", get(tasks::list_tasks).post(tasks::create_task))
        .route("/api/tasks/overdue", get(tasks::overdue_tasks))
        .route(
            "/api/tasks/:id",
            get(tasks::get_task)
                .patch(tasks::update_task)
                .delete(tasks::delete_task),
        )
        // Follow-ups
        .route(
            "/api/followups",
            get(followups::list_follow_ups).post(followups::create_follow_up),
        )
        .route("/api/followups/overdue", get(followups::overdue_follow_ups))
        .route(
            "/api/followups/:id",
            get(followups::get_follow_up)
                .patch(followups::update_follow_up)
                .delete(followups::delete_follow_up),
        )
        // Interactions
        .route(
            "/api/interactions",
            get(interactions::list_interactions).post(interactions::create_interaction),
        )
        .route(
            "/api/interactions/:id",
            get(interactions::get_interaction).delete(interactions::delete_interaction),
        )
        // CRM integrations
        .route(
            "/api/integrations",
            get(integrations::list_integrations).post(integrations::create_integration),
        )
        .route(
            "/api/integrations/:id",
            get(integrations::get_integration)
                .patch(integrations::update_integration)
                .delete(integrations::delete_integration),
        )
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemStore;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn test_app() -> Router {
        create_router(AppState::new(Arc::new(MemStore::new())))
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_create_client_returns_201_then_readable() {
        let app = test_app();

        let response = app
            .clone()
            .oneshot(post_json(
                "/api/clients",
                r#"{"name":"Jane Doe","email":"jane@x.com"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = app.oneshot(get("/api/clients/1")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_missing_client_returns_404() {
        let app = test_app();
        let response = app.oneshot(get("/api/clients/42")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_returns_204_then_404() {
        let app = test_app();
        app.clone()
            .oneshot(post_json(
                "/api/clients",
                r#"{"name":"Jane Doe","email":"jane@x.com"}"#,
            ))
            .await
            .unwrap();

        let delete = |app: Router| async move {
            app.oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/api/clients/1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap()
        };

        let response = delete(app.clone()).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = delete(app).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_invalid_enum_value_returns_400() {
        let app = test_app();
        let response = app
            .oneshot(post_json(
                "/api/tasks",
                r#"{"title":"Call Jane","status":"overdue"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unknown_field_returns_400() {
        let app = test_app();
        let response = app
            .oneshot(post_json(
                "/api/clients",
                r#"{"name":"Jane","email":"jane@x.com","favouriteColor":"blue"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_dashboard_stats_on_empty_store() {
        let app = test_app();
        let response = app.oneshot(get("/api/dashboard/stats")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_check() {
        let app = test_app();
        let response = app.oneshot(get("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
