//! REST API server for test cases, test runs and test suites.
//!
//! All collections live in memory behind a single `TestManager`, shared by
//! the handlers through `AppState`. Optionally serves the built browser
//! client from a static directory.
//!
//! # Module Structure
//!
//! - `handlers` - HTTP route handlers
//! - `models` - API response types and query parameters
//! - `error` - Mapping of errors onto HTTP responses

mod error;
mod handlers;
mod models;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use playtrace_core::{MemoryStorage, ServerConfig, TestManager};

// =============================================================================
// Application State
// =============================================================================

/// Shared application state for the server.
pub struct AppState {
    /// Owner of every collection. Writers are serialized by the lock.
    pub manager: RwLock<TestManager<MemoryStorage>>,
}

impl AppState {
    /// Creates state with empty collections.
    pub fn new() -> Self {
        Self {
            manager: RwLock::new(TestManager::new(MemoryStorage::new())),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Routing
// =============================================================================

/// Build the application router.
///
/// API routes live under `/api`; unmatched `/api` paths and unsupported
/// methods on known paths get a JSON 404. Other paths are served from
/// `static_dir` when configured, with `index.html` as the fallback, and get
/// the same JSON 404 otherwise.
pub fn router(state: Arc<AppState>, config: &ServerConfig) -> Router {
    let tests = Router::new()
        .route(
            "/cases",
            get(handlers::list_cases)
                .post(handlers::create_case)
                .fallback(handlers::not_found),
        )
        .route(
            "/cases/{id}",
            get(handlers::get_case)
                .put(handlers::update_case)
                .delete(handlers::delete_case)
                .fallback(handlers::not_found),
        )
        .route(
            "/runs",
            post(handlers::create_run)
                .get(handlers::list_runs)
                .fallback(handlers::not_found),
        )
        .route(
            "/suites",
            get(handlers::list_suites)
                .post(handlers::create_suite)
                .fallback(handlers::not_found),
        )
        .route(
            "/suites/{id}",
            get(handlers::get_suite).fallback(handlers::not_found),
        )
        .route("/stats", get(handlers::stats).fallback(handlers::not_found));

    let api = Router::new()
        .route("/health", get(handlers::health).fallback(handlers::not_found))
        .nest("/tests", tests)
        .fallback(handlers::not_found);

    let mut app = Router::new().nest("/api", api);

    app = match &config.static_dir {
        Some(dir) => app.fallback_service(
            ServeDir::new(dir).fallback(ServeFile::new(dir.join("index.html"))),
        ),
        None => app.fallback(handlers::not_found),
    };

    if config.cors {
        app = app.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );
    }

    app.layer(TraceLayer::new_for_http()).with_state(state)
}

// =============================================================================
// Server Entry Point
// =============================================================================

/// Start the API server and run until Ctrl+C.
pub async fn start_server(config: ServerConfig) -> std::io::Result<()> {
    let state = Arc::new(AppState::new());
    let app = router(state, &config);

    let addr = format!("{}:{}", config.host, config.port);
    let url = config.url();

    let listener = TcpListener::bind(&addr).await?;
    info!(%addr, "PlayTrace QA Tool API ready at {}/api", url);
    if let Some(dir) = &config.static_dir {
        info!(dir = %dir.display(), "serving browser client");
    }

    if config.open_browser {
        if let Err(e) = open::that(&url) {
            warn!(error = %e, "could not open browser");
        }
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use playtrace_core::{CaseStatus, TestCase};
    use reqwest::{Client, StatusCode};
    use serde_json::{json, Value};

    async fn spawn_app_with(config: ServerConfig) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = router(Arc::new(AppState::new()), &config);

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        format!("http://{}", addr)
    }

    async fn spawn_app() -> String {
        spawn_app_with(ServerConfig::default()).await
    }

    async fn create_case(client: &Client, base: &str, title: &str) -> TestCase {
        let resp = client
            .post(format!("{base}/api/tests/cases"))
            .json(&json!({
                "title": title,
                "description": "User can log in",
                "expectedResult": "Dashboard shown",
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);
        resp.json().await.unwrap()
    }

    async fn create_run(client: &Client, base: &str, body: Value) -> reqwest::Response {
        client
            .post(format!("{base}/api/tests/runs"))
            .json(&body)
            .send()
            .await
            .unwrap()
    }

    async fn list(client: &Client, url: String) -> Vec<Value> {
        client.get(url).send().await.unwrap().json().await.unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let base = spawn_app().await;

        let body: Value = reqwest::get(format!("{base}/api/health"))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["message"], "PlayTrace QA Tool API is running");
    }

    #[tokio::test]
    async fn test_create_case_defaults() {
        let base = spawn_app().await;
        let client = Client::new();

        let resp = client
            .post(format!("{base}/api/tests/cases"))
            .json(&json!({
                "title": "Login",
                "description": "User can log in",
                "expectedResult": "Dashboard shown",
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);

        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["status"], "pending");
        assert_eq!(body["priority"], "medium");
        assert_eq!(body["steps"], json!([]));
        assert_eq!(body["createdAt"], body["updatedAt"]);

        let other = create_case(&client, &base, "Logout").await;
        assert_ne!(body["id"], json!(other.id));
    }

    #[tokio::test]
    async fn test_create_case_missing_field() {
        let base = spawn_app().await;
        let client = Client::new();
        create_case(&client, &base, "Existing").await;

        let full = json!({
            "title": "Login",
            "description": "User can log in",
            "expectedResult": "Dashboard shown",
        });
        for field in ["title", "description", "expectedResult"] {
            let mut body = full.clone();
            body.as_object_mut().unwrap().remove(field);

            let resp = client
                .post(format!("{base}/api/tests/cases"))
                .json(&body)
                .send()
                .await
                .unwrap();
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
            let err: Value = resp.json().await.unwrap();
            assert_eq!(err["error"], "Missing required fields");
        }

        let cases = list(&client, format!("{base}/api/tests/cases")).await;
        assert_eq!(cases.len(), 1);
    }

    #[tokio::test]
    async fn test_update_to_blocked() {
        let base = spawn_app().await;
        let client = Client::new();
        let case = create_case(&client, &base, "Login").await;

        let resp = client
            .put(format!("{base}/api/tests/cases/{}", case.id))
            .json(&json!({ "status": "blocked", "id": "forged" }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let updated: TestCase = resp.json().await.unwrap();
        assert_eq!(updated.status, CaseStatus::Blocked);
        assert_eq!(updated.id, case.id);
        assert_eq!(updated.title, case.title);
        assert_eq!(updated.description, case.description);
        assert_eq!(updated.steps, case.steps);
        assert_eq!(updated.expected_result, case.expected_result);
        assert_eq!(updated.priority, case.priority);
        assert_eq!(updated.created_at, case.created_at);
        assert!(updated.updated_at > case.updated_at);
    }

    #[tokio::test]
    async fn test_update_missing_case_and_free_form_values() {
        let base = spawn_app().await;
        let client = Client::new();
        let case = create_case(&client, &base, "Login").await;

        let resp = client
            .put(format!("{base}/api/tests/cases/missing"))
            .json(&json!({ "title": "x" }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let resp = client
            .put(format!("{base}/api/tests/cases/{}", case.id))
            .json(&json!({ "status": "skipped", "priority": "urgent" }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let updated: Value = resp.json().await.unwrap();
        assert_eq!(updated["status"], "skipped");
        assert_eq!(updated["priority"], "urgent");

        let resp = client
            .post(format!("{base}/api/tests/cases"))
            .json(&json!({
                "title": "Checkout",
                "description": "Pay for cart",
                "expectedResult": "Receipt shown",
                "priority": "urgent",
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);
        let created: Value = resp.json().await.unwrap();
        assert_eq!(created["priority"], "urgent");
    }

    #[tokio::test]
    async fn test_delete_then_get() {
        let base = spawn_app().await;
        let client = Client::new();
        let case = create_case(&client, &base, "Doomed").await;
        let url = format!("{base}/api/tests/cases/{}", case.id);

        let resp = client.delete(&url).send().await.unwrap();
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
        assert!(resp.text().await.unwrap().is_empty());

        let resp = client.get(&url).send().await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let resp = client.delete(&url).send().await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_run_updates_case_status() {
        let base = spawn_app().await;
        let client = Client::new();
        let case = create_case(&client, &base, "Login").await;

        let resp = create_run(
            &client,
            &base,
            json!({
                "testCaseId": case.id,
                "executedBy": "alice",
                "status": "failed",
                "actualResult": "500 error",
                "duration": 3.5,
            }),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let run: Value = resp.json().await.unwrap();
        assert!(run["id"].is_string());
        assert!(run["executedAt"].is_string());
        assert_eq!(run["duration"], 3.5);
        assert!(run.get("notes").is_none());

        let fetched: TestCase = client
            .get(format!("{base}/api/tests/cases/{}", case.id))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(fetched.status, CaseStatus::Failed);
    }

    #[tokio::test]
    async fn test_run_rejections() {
        let base = spawn_app().await;
        let client = Client::new();
        let case = create_case(&client, &base, "Login").await;

        let resp = create_run(
            &client,
            &base,
            json!({
                "testCaseId": "missing",
                "executedBy": "alice",
                "status": "passed",
                "actualResult": "ok",
            }),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let resp = create_run(
            &client,
            &base,
            json!({ "testCaseId": case.id, "status": "passed", "actualResult": "ok" }),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let resp = create_run(
            &client,
            &base,
            json!({
                "testCaseId": case.id,
                "executedBy": "alice",
                "status": "blocked",
                "actualResult": "ok",
            }),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let runs = list(&client, format!("{base}/api/tests/runs")).await;
        assert!(runs.is_empty());
    }

    #[tokio::test]
    async fn test_runs_filter() {
        let base = spawn_app().await;
        let client = Client::new();
        let a = create_case(&client, &base, "A").await;
        let b = create_case(&client, &base, "B").await;

        let mut ids = Vec::new();
        for (case_id, status) in [(&a.id, "passed"), (&b.id, "failed"), (&a.id, "failed")] {
            let run: Value = create_run(
                &client,
                &base,
                json!({
                    "testCaseId": case_id,
                    "executedBy": "alice",
                    "status": status,
                    "actualResult": "observed",
                }),
            )
            .await
            .json()
            .await
            .unwrap();
            ids.push(run["id"].clone());
        }

        let filtered = list(&client, format!("{base}/api/tests/runs?testCaseId={}", a.id)).await;
        let filtered_ids: Vec<Value> = filtered.iter().map(|r| r["id"].clone()).collect();
        assert_eq!(filtered_ids, vec![ids[0].clone(), ids[2].clone()]);

        let all = list(&client, format!("{base}/api/tests/runs")).await;
        assert_eq!(all.len(), 3);
    }

    #[tokio::test]
    async fn test_suites() {
        let base = spawn_app().await;
        let client = Client::new();

        let resp = client
            .post(format!("{base}/api/tests/suites"))
            .json(&json!({ "name": "Smoke" }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);
        let suite: Value = resp.json().await.unwrap();
        assert_eq!(suite["description"], "");
        assert_eq!(suite["testCases"], json!([]));

        let id = suite["id"].as_str().unwrap();
        let fetched: Value = client
            .get(format!("{base}/api/tests/suites/{id}"))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(fetched, suite);

        let resp = client
            .post(format!("{base}/api/tests/suites"))
            .json(&json!({ "description": "no name" }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let err: Value = resp.json().await.unwrap();
        assert_eq!(err["error"], "Name is required");

        let resp = client
            .get(format!("{base}/api/tests/suites/missing"))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let suites = list(&client, format!("{base}/api/tests/suites")).await;
        assert_eq!(suites.len(), 1);
    }

    #[tokio::test]
    async fn test_unmatched_routes() {
        let base = spawn_app().await;

        for path in ["/api/nope", "/api/tests/unknown", "/index.html"] {
            let resp = reqwest::get(format!("{base}{path}")).await.unwrap();
            assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{path}");
            let err: Value = resp.json().await.unwrap();
            assert_eq!(err["error"], "Route not found");
        }

        let client = Client::new();
        let requests = [
            client.patch(format!("{base}/api/tests/cases")),
            client.delete(format!("{base}/api/tests/suites/x")),
            client.post(format!("{base}/api/health")),
            client.put(format!("{base}/api/tests/runs")),
        ];
        for request in requests {
            let resp = request.send().await.unwrap();
            assert_eq!(resp.status(), StatusCode::NOT_FOUND);
            let err: Value = resp.json().await.unwrap();
            assert_eq!(err["error"], "Route not found");
        }
    }

    #[tokio::test]
    async fn test_malformed_body() {
        let base = spawn_app().await;

        let resp = Client::new()
            .post(format!("{base}/api/tests/cases"))
            .header("content-type", "application/json")
            .body("{not json")
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let err: Value = resp.json().await.unwrap();
        assert!(err["error"].is_string());
    }

    #[tokio::test]
    async fn test_list_cases_is_idempotent() {
        let base = spawn_app().await;
        let client = Client::new();
        create_case(&client, &base, "A").await;
        create_case(&client, &base, "B").await;

        let first = list(&client, format!("{base}/api/tests/cases")).await;
        let second = list(&client, format!("{base}/api/tests/cases")).await;
        assert_eq!(first, second);
        assert_eq!(first[0]["title"], "A");
        assert_eq!(first[1]["title"], "B");
    }

    #[tokio::test]
    async fn test_stats() {
        let base = spawn_app().await;
        let client = Client::new();
        let case = create_case(&client, &base, "A").await;
        create_case(&client, &base, "B").await;
        create_run(
            &client,
            &base,
            json!({
                "testCaseId": case.id,
                "executedBy": "alice",
                "status": "passed",
                "actualResult": "ok",
            }),
        )
        .await;

        let stats: Value = reqwest::get(format!("{base}/api/tests/stats"))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(stats["total"], 2);
        assert_eq!(stats["passed"], 1);
        assert_eq!(stats["pending"], 1);
        assert_eq!(stats["passRate"], 50.0);
    }

    #[tokio::test]
    async fn test_static_dir_serves_client() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join("index.html"), "<html>PlayTrace</html>").unwrap();

        let base = spawn_app_with(ServerConfig {
            static_dir: Some(dir.path().to_path_buf()),
            ..ServerConfig::default()
        })
        .await;

        for path in ["/", "/cases/some-client-route"] {
            let resp = reqwest::get(format!("{base}{path}")).await.unwrap();
            assert_eq!(resp.status(), StatusCode::OK, "{path}");
            assert!(resp.text().await.unwrap().contains("PlayTrace"));
        }

        let resp = reqwest::get(format!("{base}/api/nope")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
