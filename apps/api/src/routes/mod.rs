pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::interview::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Interview lifecycle
        .route(
            "/api/v1/interviews",
            post(handlers::handle_create_interview),
        )
        .route(
            "/api/v1/interviews/:id",
            get(handlers::handle_get_interview).delete(handlers::handle_delete_interview),
        )
        .route(
            "/api/v1/interviews/:id/answers",
            post(handlers::handle_submit_answer),
        )
        .route(
            "/api/v1/interviews/:id/improvise",
            post(handlers::handle_improvise),
        )
        .route(
            "/api/v1/interviews/:id/continue",
            post(handlers::handle_ask_more),
        )
        .route(
            "/api/v1/interviews/:id/finalize",
            post(handlers::handle_finalize),
        )
        // Report and exports
        .route(
            "/api/v1/interviews/:id/report",
            get(handlers::handle_get_report),
        )
        .route(
            "/api/v1/interviews/:id/report/sections",
            get(handlers::handle_get_report_sections),
        )
        .route(
            "/api/v1/interviews/:id/export/transcript",
            get(handlers::handle_export_transcript),
        )
        .route(
            "/api/v1/interviews/:id/export/report.json",
            get(handlers::handle_export_report),
        )
        .route(
            "/api/v1/interviews/:id/export/document",
            get(handlers::handle_export_document),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::gateway::prompts::OPENING_QUESTION;
    use crate::gateway::testing::ScriptedBackend;
    use crate::gateway::Gateway;
    use crate::interview::store::SessionStore;
    use crate::llm_client::ModelBackend;
    use crate::models::report::sample_report;

    fn test_config(question_cap: u32) -> Config {
        Config {
            anthropic_api_key: None,
            port: 0,
            rust_log: "info".to_string(),
            question_cap,
            cap_increment: 5,
        }
    }

    fn app_with(gateway: Gateway, question_cap: u32) -> (Router, SessionStore) {
        let sessions = SessionStore::new();
        let state = AppState {
            gateway,
            sessions: sessions.clone(),
            config: test_config(question_cap),
        };
        (build_router(state), sessions)
    }

    fn scripted_app(question_cap: u32) -> (Router, Arc<ScriptedBackend>, SessionStore) {
        let backend = Arc::new(ScriptedBackend::default());
        let gateway = Gateway::new(Some(backend.clone() as Arc<dyn ModelBackend>));
        let (app, sessions) = app_with(gateway, question_cap);
        (app, backend, sessions)
    }

    async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, String) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        let resp = app
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    async fn send_json(
        app: &Router,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let (status, text) = send(app, method, uri, body).await;
        let value = if text.is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).unwrap()
        };
        (status, value)
    }

    async fn create(app: &Router) -> String {
        let (status, view) = send_json(app, Method::POST, "/api/v1/interviews", None).await;
        assert_eq!(status, StatusCode::CREATED);
        view["id"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_health() {
        let (app, _, _) = scripted_app(30);
        let (status, body) = send_json(&app, Method::GET, "/health", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "life-architect-api");
    }

    #[tokio::test]
    async fn test_create_returns_opening_question() {
        let (app, backend, _) = scripted_app(30);
        let (status, view) = send_json(&app, Method::POST, "/api/v1/interviews", None).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(view["state"], "in_progress");
        assert_eq!(view["question_cap"], 30);
        assert_eq!(view["turns"][0]["role"], "asker");
        assert_eq!(view["turns"][0]["content"], OPENING_QUESTION);
        assert_eq!(backend.calls(), 0);
    }

    #[tokio::test]
    async fn test_unknown_session_is_404() {
        let (app, _, _) = scripted_app(30);
        let uri = format!("/api/v1/interviews/{}", uuid::Uuid::new_v4());
        let (status, body) = send_json(&app, Method::GET, &uri, None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_answer_then_blank_answer() {
        let (app, backend, _) = scripted_app(30);
        backend.push_text(Ok("What does silence buy you?".to_string()));
        let id = create(&app).await;
        let uri = format!("/api/v1/interviews/{id}/answers");

        let (status, view) =
            send_json(&app, Method::POST, &uri, Some(json!({ "text": "34, Porto" }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(view["turns"].as_array().unwrap().len(), 3);
        assert_eq!(view["turns"][2]["content"], "What does silence buy you?");
        assert_eq!(view["answered"], 1);

        let (status, view) =
            send_json(&app, Method::POST, &uri, Some(json!({ "text": "  " }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(view["turns"].as_array().unwrap().len(), 3);
        assert_eq!(backend.calls(), 1);
    }

    #[tokio::test]
    async fn test_improvise_does_not_touch_transcript() {
        let (app, backend, _) = scripted_app(30);
        backend.push_text(Ok("I am drawn to maps and the order they impose.".to_string()));
        let id = create(&app).await;

        let (status, body) = send_json(
            &app,
            Method::POST,
            &format!("/api/v1/interviews/{id}/improvise"),
            Some(json!({ "text": "i like maps" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["text"], "I am drawn to maps and the order they impose.");

        let (_, view) =
            send_json(&app, Method::GET, &format!("/api/v1/interviews/{id}"), None).await;
        assert_eq!(view["turns"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_continue_only_at_cap() {
        let (app, backend, _) = scripted_app(1);
        let id = create(&app).await;
        let continue_uri = format!("/api/v1/interviews/{id}/continue");

        let (status, body) = send_json(&app, Method::POST, &continue_uri, None).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"]["code"], "CONFLICT");

        let (_, view) = send_json(
            &app,
            Method::POST,
            &format!("/api/v1/interviews/{id}/answers"),
            Some(json!({ "text": "Porto" })),
        )
        .await;
        assert_eq!(view["state"], "cap_reached");
        assert_eq!(view["cap_reached"], true);

        backend.push_text(Ok("And the frustration?".to_string()));
        let (status, view) = send_json(&app, Method::POST, &continue_uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(view["state"], "in_progress");
        assert_eq!(view["question_cap"], 6);
        assert_eq!(view["turns"][2]["content"], "And the frustration?");
    }

    #[tokio::test]
    async fn test_report_before_finalize_is_422() {
        let (app, _, _) = scripted_app(30);
        let id = create(&app).await;

        let (status, body) = send_json(
            &app,
            Method::GET,
            &format!("/api/v1/interviews/{id}/report"),
            None,
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], "REPORT_UNAVAILABLE");
    }

    #[tokio::test]
    async fn test_finalize_and_exports() {
        let (app, backend, _) = scripted_app(30);
        backend.push_structured(Ok(serde_json::to_value(sample_report()).unwrap()));
        let id = create(&app).await;
        let base = format!("/api/v1/interviews/{id}");

        let (status, view) =
            send_json(&app, Method::POST, &format!("{base}/finalize"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(view["state"], "done");
        assert_eq!(view["report_ready"], true);

        let (status, report) = send_json(&app, Method::GET, &format!("{base}/report"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(report, serde_json::to_value(sample_report()).unwrap());

        let (status, sections) =
            send_json(&app, Method::GET, &format!("{base}/report/sections"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(sections.as_array().unwrap().len(), 10);
        assert_eq!(sections[0]["title"], "Core Profile");

        let (status, text) =
            send(&app, Method::GET, &format!("{base}/export/transcript"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(text.starts_with("[MODEL]\n"));

        let (status, json_text) =
            send(&app, Method::GET, &format!("{base}/export/report.json"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(json_text.contains("\n  \"coreProfile\""));

        let (status, document) = send_json(
            &app,
            Method::GET,
            &format!("{base}/export/document?font=serif"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(document["font"], "serif");
        assert!(document["page_count"].as_u64().unwrap() >= 1);
        assert_eq!(document["pages"][0]["number"], 1);
        assert_eq!(document["pages"][0]["lines"][0]["text"], "CORE PROFILE");
    }

    #[tokio::test]
    async fn test_finalize_without_credential_fails_but_transcript_survives() {
        let (app, _) = app_with(Gateway::new(None), 30);
        let id = create(&app).await;
        let base = format!("/api/v1/interviews/{id}");

        let (status, view) =
            send_json(&app, Method::POST, &format!("{base}/finalize"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(view["state"], "failed");

        let (status, _) = send_json(&app, Method::GET, &format!("{base}/report"), None).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let (status, _) = send_json(&app, Method::POST, &format!("{base}/finalize"), None).await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, text) =
            send(&app, Method::GET, &format!("{base}/export/transcript"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(text.contains(OPENING_QUESTION));
    }

    #[tokio::test]
    async fn test_busy_session_is_409() {
        let (app, _, sessions) = scripted_app(30);
        let id = create(&app).await;
        let held = sessions.claim(id.parse().unwrap()).await.unwrap();

        let (status, body) = send_json(
            &app,
            Method::POST,
            &format!("/api/v1/interviews/{id}/answers"),
            Some(json!({ "text": "Porto" })),
        )
        .await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"]["code"], "CONFLICT");
        drop(held);
    }

    #[tokio::test]
    async fn test_delete_then_gone() {
        let (app, _, _) = scripted_app(30);
        let id = create(&app).await;
        let uri = format!("/api/v1/interviews/{id}");

        let (status, _) = send(&app, Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = send(&app, Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_malformed_answer_body_is_400() {
        let (app, backend, _) = scripted_app(30);
        let id = create(&app).await;

        let (status, body) = send_json(
            &app,
            Method::POST,
            &format!("/api/v1/interviews/{id}/answers"),
            Some(json!({ "answer": "Porto" })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(backend.calls(), 0);
    }

    #[tokio::test]
    async fn test_view_waits_for_busy_session() {
        let (app, _, sessions) = scripted_app(30);
        let id = create(&app).await;
        let held = sessions.claim(id.parse().unwrap()).await.unwrap();

        let poll = tokio::spawn({
            let app = app.clone();
            let uri = format!("/api/v1/interviews/{id}");
            async move { send_json(&app, Method::GET, &uri, None).await }
        });
        tokio::task::yield_now().await;
        assert!(!poll.is_finished());

        drop(held);
        let (status, view) = poll.await.unwrap();
        assert_eq!(status, StatusCode::OK);
        assert_eq!(view["id"], id.as_str());
    }
}
