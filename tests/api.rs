//! End-to-end API tests driving the router directly.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use pharma_agentic::config::Config;
use pharma_agentic::queue::JobStore;
use pharma_agentic::{create_router, AppState};

fn test_app() -> axum::Router {
    let state = AppState {
        config: Config::for_tests(),
        jobs: JobStore::new(),
    };
    create_router(state)
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn health_endpoint_responds() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let health = json_body(response).await;
    assert_eq!(health["status"], "ok");
    assert_eq!(health["llm_provider"], "google");
}

#[tokio::test]
async fn index_serves_embedded_ui() {
    let response = test_app()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("Drug Repurposing Assistant"));
    assert!(html.contains("/api/chat/start"));
}

#[tokio::test]
async fn synchronous_chat_runs_the_full_workflow() {
    let request = post_json(
        "/api/chat",
        serde_json::json!({
            "message": "Assess repurposing options",
            "molecule": "Metformin",
            "session_id": "it-1"
        }),
    );
    let response = test_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["status"], "completed");
    assert_eq!(body["session_id"], "it-1");
    assert_eq!(body["data"]["molecule"], "Metformin");
    assert_eq!(body["data"]["summary"]["total_agents_executed"], 6);
    assert_eq!(body["data"]["summary"]["agents_failed"], 0);
    assert_eq!(body["workflow_state"]["current_step"], "completed");
    assert_eq!(
        body["workflow_state"]["agents_completed"]
            .as_array()
            .unwrap()
            .len(),
        6
    );
    // Reports land in the test output directory and are exposed by name.
    assert!(body["report_paths"]["pdf"]
        .as_str()
        .unwrap()
        .ends_with(".pdf"));
}

#[tokio::test]
async fn chat_without_molecule_is_rejected() {
    let request = post_json("/api/chat", serde_json::json!({ "message": "   " }));
    let response = test_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn background_job_completes_and_is_pollable() {
    let state = AppState {
        config: Config::for_tests(),
        jobs: JobStore::new(),
    };
    let app = create_router(state);

    let request = post_json(
        "/api/chat/start",
        serde_json::json!({
            "message": "Aspirin repurposing",
            "session_id": "bg-1"
        }),
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let started = json_body(response).await;
    assert_eq!(started["status"], "started");
    let job_id = started["job_id"].as_str().unwrap().to_string();
    assert!(job_id.starts_with("bg-1-"));

    // Offline runs finish quickly; poll until terminal.
    let mut last = serde_json::Value::Null;
    for _ in 0..50 {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri(format!("/api/chat/status/{job_id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        last = json_body(response).await;
        if last["status"] == "completed" || last["status"] == "failed" {
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(100)).await;
    }

    assert_eq!(last["status"], "completed");
    assert_eq!(last["result"]["data"]["molecule"], "Aspirin");
    assert_eq!(
        last["workflow_state"]["agents_completed"]
            .as_array()
            .unwrap()
            .len(),
        6
    );
}

#[tokio::test]
async fn unknown_job_id_is_404() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .uri("/api/chat/status/missing-12345678")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn report_download_round_trip() {
    let state = AppState {
        config: Config::for_tests(),
        jobs: JobStore::new(),
    };
    let app = create_router(state);

    let request = post_json(
        "/api/chat",
        serde_json::json!({ "message": "Sildenafil repurposing" }),
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    let pdf_name = body["report_paths"]["pdf"].as_str().unwrap().to_string();

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/api/reports/pdf/{pdf_name}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/pdf"
    );
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert!(bytes.starts_with(b"%PDF"));
}
