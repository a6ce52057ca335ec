//! Axum router configuration with middleware.
//!
//! All routes are under `/api/v1/`.
//! Middleware: CORS, tracing.

use axum::Router;
use axum::routing::{get, post, put};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Sessions
        .route("/sessions", post(handlers::session::create_session))
        .route(
            "/sessions/{id}",
            get(handlers::session::get_session).delete(handlers::session::delete_session),
        )
        .route(
            "/sessions/{id}/messages",
            get(handlers::session::list_messages).post(handlers::session::submit_message),
        )
        .route("/sessions/{id}/mode", put(handlers::session::set_mode))
        .route("/sessions/{id}/clear", post(handlers::session::clear_session))
        .route("/sessions/{id}/export", get(handlers::session::export_session))
        .route("/sessions/{id}/import", post(handlers::session::import_session))
        .route("/sessions/{id}/events", get(handlers::session::session_events))
        // Providers
        .route("/providers", get(handlers::provider::list_providers));

    Router::new()
        .nest("/api/v1", api_routes)
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health - Simple health check endpoint.
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use axum::http::StatusCode;
    use futures_util::StreamExt;
    use serde_json::{Value, json};
    use tokio::sync::Notify;

    use neko_core::chat::router::ResponseRouter;
    use neko_infra::llm::build_router as build_response_router;
    use neko_types::config::GlobalConfig;
    use neko_types::provider::{ProviderConfig, ProviderEndpoint};

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    async fn serve_api(config: GlobalConfig) -> String {
        let tmp = tempfile::tempdir().unwrap();
        let router = build_response_router(&config);
        let state = AppState::new(config, router, tmp.path().to_path_buf());
        serve(build_router(state)).await
    }

    async fn serve_local_api() -> String {
        let tmp = tempfile::tempdir().unwrap();
        let state = AppState::new(
            GlobalConfig::default(),
            ResponseRouter::local_only(),
            tmp.path().to_path_buf(),
        );
        serve(build_router(state)).await
    }

    fn provider(id: &str, urls: &[String]) -> ProviderConfig {
        ProviderConfig {
            id: id.to_string(),
            name: None,
            endpoints: urls
                .iter()
                .enumerate()
                .map(|(i, url)| ProviderEndpoint {
                    order: i as u32,
                    url: url.clone(),
                    query_param: "q".to_string(),
                    fields: vec!["response".to_string()],
                })
                .collect(),
        }
    }

    async fn create_session(client: &reqwest::Client, base: &str, body: Value) -> String {
        let resp: Value = client
            .post(format!("{base}/api/v1/sessions"))
            .json(&body)
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        resp["data"]["id"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_health() {
        let base = serve_local_api().await;
        let resp: Value = reqwest::get(format!("{base}/health"))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(resp["status"], "ok");
    }

    #[tokio::test]
    async fn test_local_submit_roundtrip() {
        let base = serve_local_api().await;
        let client = reqwest::Client::new();
        let id = create_session(&client, &base, json!({})).await;

        let resp = client
            .post(format!("{base}/api/v1/sessions/{id}/messages"))
            .json(&json!({ "text": "what can you do" }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["data"]["role"], "assistant");
        assert_eq!(body["data"]["confidence"], 98);

        let messages: Value = client
            .get(format!("{base}/api/v1/sessions/{id}/messages"))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        let roles: Vec<&str> = messages["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|m| m["role"].as_str().unwrap())
            .collect();
        assert_eq!(roles, vec!["user", "assistant"]);
    }

    #[tokio::test]
    async fn test_empty_input_is_rejected() {
        let base = serve_local_api().await;
        let client = reqwest::Client::new();
        let id = create_session(&client, &base, json!({})).await;

        let resp = client
            .post(format!("{base}/api/v1/sessions/{id}/messages"))
            .json(&json!({ "text": "   " }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["errors"][0]["code"], "INVALID_INPUT");

        let session: Value = client
            .get(format!("{base}/api/v1/sessions/{id}"))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(session["data"]["message_count"], 0);
    }

    #[tokio::test]
    async fn test_unknown_and_malformed_session_ids() {
        let base = serve_local_api().await;
        let client = reqwest::Client::new();

        let missing = client
            .get(format!("{base}/api/v1/sessions/{}", uuid::Uuid::now_v7()))
            .send()
            .await
            .unwrap();
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);

        let malformed = client
            .get(format!("{base}/api/v1/sessions/not-a-uuid"))
            .send()
            .await
            .unwrap();
        assert_eq!(malformed.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_session_with_unknown_mode() {
        let base = serve_local_api().await;
        let resp = reqwest::Client::new()
            .post(format!("{base}/api/v1/sessions"))
            .json(&json!({ "mode": "remote-x" }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["errors"][0]["code"], "VALIDATION_ERROR");
        assert_eq!(body["errors"][0]["message"], "provider 'remote-x' is not configured");
    }

    #[tokio::test]
    async fn test_submit_while_pending_is_conflict() {
        let release = Arc::new(Notify::new());
        let gate = release.clone();
        let mirror = serve(Router::new().route(
            "/ask",
            get(move || {
                let gate = gate.clone();
                async move {
                    gate.notified().await;
                    axum::Json(json!({ "response": "late answer" }))
                }
            }),
        ))
        .await;

        let base = serve_api(GlobalConfig {
            providers: vec![provider("remote-b", &[format!("{mirror}/ask")])],
            ..GlobalConfig::default()
        })
        .await;
        let client = reqwest::Client::new();
        let id = create_session(&client, &base, json!({ "mode": "remote-b" })).await;

        let first = tokio::spawn({
            let client = client.clone();
            let url = format!("{base}/api/v1/sessions/{id}/messages");
            async move { client.post(url).json(&json!({ "text": "first" })).send().await }
        });

        loop {
            let session: Value = client
                .get(format!("{base}/api/v1/sessions/{id}"))
                .send()
                .await
                .unwrap()
                .json()
                .await
                .unwrap();
            if session["data"]["state"]["pending"] == true {
                break;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }

        let second = client
            .post(format!("{base}/api/v1/sessions/{id}/messages"))
            .json(&json!({ "text": "second" }))
            .send()
            .await
            .unwrap();
        assert_eq!(second.status(), StatusCode::CONFLICT);
        let body: Value = second.json().await.unwrap();
        assert_eq!(body["errors"][0]["code"], "REQUEST_PENDING");

        release.notify_one();
        let first: Value = first.await.unwrap().unwrap().json().await.unwrap();
        assert_eq!(first["data"]["content"], "late answer");
        assert_eq!(first["data"]["providerTag"], "remote-b");
    }

    #[tokio::test]
    async fn test_failing_mirrors_return_error_message() {
        let mirror = serve(Router::new().route(
            "/ask",
            get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        ))
        .await;
        let urls: Vec<String> = (0..3).map(|_| format!("{mirror}/ask")).collect();
        let base = serve_api(GlobalConfig {
            providers: vec![provider("remote-b", &urls)],
            ..GlobalConfig::default()
        })
        .await;
        let client = reqwest::Client::new();
        let id = create_session(&client, &base, json!({ "mode": "remote-b" })).await;

        let body: Value = client
            .post(format!("{base}/api/v1/sessions/{id}/messages"))
            .json(&json!({ "text": "whois example.com" }))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(body["data"]["role"], "error");

        let session: Value = client
            .get(format!("{base}/api/v1/sessions/{id}"))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(session["data"]["status"], "errored");
        assert_eq!(session["data"]["state"]["pending"], false);
    }

    #[tokio::test]
    async fn test_mode_clear_export_import() {
        let base = serve_local_api().await;
        let client = reqwest::Client::new();
        let id = create_session(&client, &base, json!({})).await;

        client
            .post(format!("{base}/api/v1/sessions/{id}/messages"))
            .json(&json!({ "text": "hello" }))
            .send()
            .await
            .unwrap();

        let bad_mode = client
            .put(format!("{base}/api/v1/sessions/{id}/mode"))
            .json(&json!({ "mode": "remote-x" }))
            .send()
            .await
            .unwrap();
        assert_eq!(bad_mode.status(), StatusCode::BAD_REQUEST);

        let export: Value = client
            .get(format!("{base}/api/v1/sessions/{id}/export"))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        let snapshot = export["data"].clone();
        assert_eq!(snapshot["providerId"], "local");
        assert_eq!(snapshot["messages"].as_array().unwrap().len(), 2);

        let cleared: Value = client
            .post(format!("{base}/api/v1/sessions/{id}/clear"))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(cleared["data"]["message_count"], 0);

        let imported = client
            .post(format!("{base}/api/v1/sessions/{id}/import"))
            .body(snapshot.to_string())
            .send()
            .await
            .unwrap();
        assert_eq!(imported.status(), StatusCode::OK);
        let imported: Value = imported.json().await.unwrap();
        assert_eq!(imported["data"]["message_count"], 2);

        let garbage = client
            .post(format!("{base}/api/v1/sessions/{id}/import"))
            .body("{ not json")
            .send()
            .await
            .unwrap();
        assert_eq!(garbage.status(), StatusCode::BAD_REQUEST);
        let garbage: Value = garbage.json().await.unwrap();
        assert_eq!(garbage["errors"][0]["code"], "INVALID_SNAPSHOT");
    }

    #[tokio::test]
    async fn test_delete_session() {
        let base = serve_local_api().await;
        let client = reqwest::Client::new();
        let id = create_session(&client, &base, json!({})).await;

        let deleted = client
            .delete(format!("{base}/api/v1/sessions/{id}"))
            .send()
            .await
            .unwrap();
        assert_eq!(deleted.status(), StatusCode::OK);

        let again = client
            .delete(format!("{base}/api/v1/sessions/{id}"))
            .send()
            .await
            .unwrap();
        assert_eq!(again.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_providers_listing() {
        let base = serve_api(GlobalConfig {
            providers: vec![provider(
                "remote-b",
                &["https://one.example/api".to_string(), "https://two.example/api".to_string()],
            )],
            ..GlobalConfig::default()
        })
        .await;

        let body: Value = reqwest::get(format!("{base}/api/v1/providers"))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(body["data"][0]["id"], "remote-b");
        assert_eq!(body["data"][0]["endpoints"], json!(["one.example", "two.example"]));
    }

    #[tokio::test]
    async fn test_events_stream_reports_reply() {
        let base = serve_local_api().await;
        let client = reqwest::Client::new();
        let id = create_session(&client, &base, json!({})).await;

        let events = client
            .get(format!("{base}/api/v1/sessions/{id}/events"))
            .send()
            .await
            .unwrap();
        assert_eq!(events.status(), StatusCode::OK);
        let mut stream = events.bytes_stream();

        // Wait for the subscription before submitting.
        let mut seen = String::new();
        while !seen.contains("event: subscribed") {
            let chunk = stream.next().await.unwrap().unwrap();
            seen.push_str(&String::from_utf8_lossy(&chunk));
        }

        client
            .post(format!("{base}/api/v1/sessions/{id}/messages"))
            .json(&json!({ "text": "what can you do" }))
            .send()
            .await
            .unwrap();

        let collected = tokio::time::timeout(Duration::from_secs(5), async {
            while !(seen.contains("\"role\":\"assistant\"")
                && seen.contains("\"status\":\"settled\""))
            {
                let chunk = stream.next().await.unwrap().unwrap();
                seen.push_str(&String::from_utf8_lossy(&chunk));
            }
            seen
        })
        .await
        .unwrap();

        assert!(collected.contains("event: message_appended"));
        assert!(collected.contains("event: status_changed"));
    }
}
